use super::*;

// Elements whose body is kept verbatim up to the matching end tag.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Parses markup into a fresh [`Dom`]. Unknown end tags are ignored and
/// unclosed elements are closed at end of input.
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut builder = TreeBuilder::new();
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            i = end + 3;
            continue;
        }
        if starts_with_at(bytes, i, b"</") {
            let (tag, next) = parse_end_tag(html, i)?;
            builder.close(&tag);
            i = next;
            continue;
        }
        if starts_with_at(bytes, i, b"<!") {
            i = skip_declaration(bytes, i)?;
            continue;
        }
        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let start = parse_start_tag(html, i)?;
            i = start.end;
            let tag = start.tag.clone();
            let self_closing = start.self_closing;
            let node = builder.open(start);

            if !self_closing && RAW_TEXT_TAGS.contains(&tag.as_str()) {
                let close = find_raw_end_tag(bytes, i, tag.as_bytes())
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
                let body = &html[i..close];
                if !body.is_empty() {
                    let text = if tag == "script" || tag == "style" {
                        body.to_string()
                    } else {
                        decode_html_character_references(body)
                    };
                    builder.dom.create_text(node, text);
                }
                let (_, after) = parse_end_tag(html, close)?;
                builder.close(&tag);
                i = after;
            }
            continue;
        }

        // A stray `<` that does not open a tag is literal text.
        let text_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        builder.text(&html[text_start..i]);
    }

    let mut dom = builder.dom;
    dom.rebuild_id_index();
    Ok(dom)
}

struct StartTag {
    tag: String,
    attrs: HashMap<String, String>,
    self_closing: bool,
    end: usize,
}

struct TreeBuilder {
    dom: Dom,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        let dom = Dom::new();
        let stack = vec![dom.root];
        Self { dom, stack }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.dom.root)
    }

    fn open(&mut self, start: StartTag) -> NodeId {
        self.close_implied(&start.tag);
        let parent = self.current();
        let node = self
            .dom
            .create_element(parent, start.tag.clone(), start.attrs);
        if !start.self_closing && !is_void_tag(&start.tag) {
            self.stack.push(node);
        }
        node
    }

    fn close(&mut self, tag: &str) {
        let Some(index) = self
            .stack
            .iter()
            .rposition(|node| self.dom.tag_name(*node) == Some(tag))
        else {
            return;
        };
        self.stack.truncate(index.max(1));
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = decode_html_character_references(raw);
        let parent = self.current();
        self.dom.create_text(parent, decoded);
    }

    // `<li>` closes an open `<li>` in the same list; block starts close `<p>`.
    fn close_implied(&mut self, tag: &str) {
        let (closes, scope_limit): (&[&str], &[&str]) = match tag {
            "li" => (&["li"], &["ul", "ol", "menu"]),
            "dt" | "dd" => (&["dt", "dd"], &["dl"]),
            "option" => (&["option"], &["select", "datalist", "optgroup"]),
            _ if closes_paragraph(tag) => (&["p"], &[]),
            _ => return,
        };

        for index in (1..self.stack.len()).rev() {
            let Some(open_tag) = self.dom.tag_name(self.stack[index]) else {
                continue;
            };
            if closes.contains(&open_tag) {
                self.stack.truncate(index);
                return;
            }
            if scope_limit.contains(&open_tag) {
                return;
            }
        }
    }
}

fn closes_paragraph(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "div"
            | "dl"
            | "fieldset"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

fn parse_start_tag(html: &str, at: usize) -> Result<StartTag> {
    let bytes = html.as_bytes();
    let mut i = at + 1;
    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();
    if tag.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs = HashMap::new();
    loop {
        skip_ws(bytes, &mut i);
        match bytes.get(i) {
            None => return Err(Error::HtmlParse(format!("unclosed start tag <{tag}"))),
            Some(b'>') => {
                return Ok(StartTag {
                    tag,
                    attrs,
                    self_closing: false,
                    end: i + 1,
                });
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                return Ok(StartTag {
                    tag,
                    attrs,
                    self_closing: true,
                    end: i + 2,
                });
            }
            Some(b) if !is_attr_name_char(*b) => {
                // Skip junk such as a lone `/` or stray quotes.
                i += 1;
                continue;
            }
            Some(_) => {}
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        let name = html[name_start..i].to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, &mut i)?
        } else {
            String::new()
        };
        // First occurrence wins.
        attrs.entry(name).or_insert(value);
    }
}

fn parse_attr_value(html: &str, i: &mut usize) -> Result<String> {
    let bytes = html.as_bytes();
    match bytes.get(*i) {
        None => Err(Error::HtmlParse("missing attribute value".into())),
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            let start = *i + 1;
            let end = bytes[start..]
                .iter()
                .position(|b| *b == quote)
                .map(|offset| start + offset)
                .ok_or_else(|| Error::HtmlParse("unclosed quoted attribute value".into()))?;
            *i = end + 1;
            Ok(decode_html_character_references(&html[start..end]))
        }
        Some(_) => {
            let start = *i;
            while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
                *i += 1;
            }
            Ok(decode_html_character_references(&html[start..*i]))
        }
    }
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);
    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();

    let close = find_subslice(bytes, i, b">")
        .ok_or_else(|| Error::HtmlParse(format!("unclosed end tag </{tag}")))?;
    Ok((tag, close + 1))
}

// `<!DOCTYPE ...>` and friends carry no content.
fn skip_declaration(bytes: &[u8], at: usize) -> Result<usize> {
    find_subslice(bytes, at + 2, b">")
        .map(|end| end + 1)
        .ok_or_else(|| Error::HtmlParse("unclosed declaration tag".into()))
}

fn find_raw_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while let Some(open) = find_subslice(bytes, i, b"</") {
        let name_start = open + 2;
        let name_end = name_start + tag.len();
        if bytes.len() >= name_end
            && bytes[name_start..name_end].eq_ignore_ascii_case(tag)
            && bytes
                .get(name_end)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
        {
            return Some(open);
        }
        i = open + 2;
    }
    None
}

fn decode_html_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest[1..].find(';').and_then(|semi| {
            let name = &rest[1..1 + semi];
            decode_entity(name).map(|ch| (ch, semi + 2))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let codepoint = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(codepoint);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "copy" => Some('\u{00A9}'),
        "hellip" => Some('\u{2026}'),
        _ => None,
    }
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'@' || b == b'.'
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.get(at..at + needle.len()) == Some(needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}
