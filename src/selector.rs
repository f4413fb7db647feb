use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrMatch {
    Exists,
    Eq(String),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    // `~=`: whitespace separated word list.
    Includes(String),
    // `|=`: exact or followed by `-`.
    DashMatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorAttrCondition {
    pub(crate) key: String,
    pub(crate) op: AttrMatch,
}

impl SelectorAttrCondition {
    pub(crate) fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.op {
            AttrMatch::Exists => true,
            AttrMatch::Eq(expected) => value == expected,
            AttrMatch::StartsWith(prefix) => !prefix.is_empty() && value.starts_with(prefix),
            AttrMatch::EndsWith(suffix) => !suffix.is_empty() && value.ends_with(suffix),
            AttrMatch::Contains(part) => !part.is_empty() && value.contains(part),
            AttrMatch::Includes(word) => value.split_whitespace().any(|token| token == word),
            AttrMatch::DashMatch(prefix) => {
                value == prefix
                    || value
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorPseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    Empty,
    Disabled,
    Enabled,
    Not(Vec<Vec<SelectorPart>>),
}

const SIMPLE_PSEUDO_CLASSES: &[(&str, SelectorPseudoClass)] = &[
    ("first-child", SelectorPseudoClass::FirstChild),
    ("last-child", SelectorPseudoClass::LastChild),
    ("only-child", SelectorPseudoClass::OnlyChild),
    ("empty", SelectorPseudoClass::Empty),
    ("disabled", SelectorPseudoClass::Disabled),
    ("enabled", SelectorPseudoClass::Enabled),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
    pub(crate) pseudo_classes: Vec<SelectorPseudoClass>,
}

impl SelectorStep {
    /// `#id` with nothing else attached; such queries go through the id index.
    pub(crate) fn id_only(&self) -> Option<&str> {
        if self.universal
            || self.tag.is_some()
            || !self.classes.is_empty()
            || !self.attrs.is_empty()
            || !self.pseudo_classes.is_empty()
        {
            return None;
        }
        self.id.as_deref()
    }

    fn is_blank(&self) -> bool {
        !self.universal
            && self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

impl SelectorCombinator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Self::Child),
            "+" => Some(Self::AdjacentSibling),
            "~" => Some(Self::GeneralSibling),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to the part on the left.
    pub(crate) combinator: Option<SelectorCombinator>,
}

fn unsupported(selector: &str) -> Error {
    Error::UnsupportedSelector(selector.to_string())
}

/// Parses a comma separated selector list.
pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    split_selector_groups(selector)?
        .iter()
        .map(|group| parse_selector_chain(group))
        .collect()
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(unsupported(selector));
    }

    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<SelectorCombinator> = None;
    for token in tokenize_selector(selector)? {
        if let Some(combinator) = SelectorCombinator::from_token(&token) {
            if pending.is_some() || parts.is_empty() {
                return Err(unsupported(selector));
            }
            pending = Some(combinator);
            continue;
        }

        let step = parse_selector_step(&token)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(SelectorCombinator::Descendant))
        };
        parts.push(SelectorPart { step, combinator });
    }

    if parts.is_empty() || pending.is_some() {
        return Err(unsupported(selector));
    }
    Ok(parts)
}

// Walks `selector` at nesting depth zero, calling `on_top` for every char
// outside brackets and parens. `on_top` returns true when it consumed the char.
fn scan_top_level(
    selector: &str,
    mut on_top: impl FnMut(char, &mut String) -> bool,
) -> Result<String> {
    let mut current = String::new();
    let mut brackets = 0usize;
    let mut parens = 0usize;

    for ch in selector.chars() {
        match ch {
            '[' => brackets += 1,
            ']' => brackets = brackets.checked_sub(1).ok_or_else(|| unsupported(selector))?,
            '(' => parens += 1,
            ')' => parens = parens.checked_sub(1).ok_or_else(|| unsupported(selector))?,
            _ if brackets == 0 && parens == 0 => {
                if on_top(ch, &mut current) {
                    continue;
                }
            }
            _ => {}
        }
        current.push(ch);
    }

    if brackets != 0 || parens != 0 {
        return Err(unsupported(selector));
    }
    Ok(current)
}

pub(crate) fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut empty_group = false;
    let tail = scan_top_level(selector, |ch, current| {
        if ch != ',' {
            return false;
        }
        let trimmed = current.trim();
        if trimmed.is_empty() {
            empty_group = true;
        }
        groups.push(trimmed.to_string());
        current.clear();
        true
    })?;

    let tail = tail.trim();
    if empty_group || tail.is_empty() {
        return Err(unsupported(selector));
    }
    groups.push(tail.to_string());
    Ok(groups)
}

pub(crate) fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let tail = scan_top_level(selector, |ch, current| {
        let combinator = matches!(ch, '>' | '+' | '~');
        if !combinator && !ch.is_ascii_whitespace() {
            return false;
        }
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
        if combinator {
            tokens.push(ch.to_string());
        }
        true
    })?;

    if !tail.trim().is_empty() {
        tokens.push(tail.trim().to_string());
    }
    Ok(tokens)
}

pub(crate) fn parse_selector_step(part: &str) -> Result<SelectorStep> {
    let part = part.trim();
    let bytes = part.as_bytes();
    let mut step = SelectorStep::default();
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'*' if !step.universal && step.tag.is_none() && i == 0 => {
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_selector_ident(part, i + 1).ok_or_else(|| unsupported(part))?;
                if step.id.replace(id).is_some() {
                    return Err(unsupported(part));
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) =
                    parse_selector_ident(part, i + 1).ok_or_else(|| unsupported(part))?;
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(attr);
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_selector_pseudo(part, i)?;
                step.pseudo_classes.push(pseudo);
                i = next;
            }
            _ if i == 0 => {
                let (tag, next) = parse_selector_ident(part, i).ok_or_else(|| unsupported(part))?;
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
            _ => return Err(unsupported(part)),
        }
    }

    if step.is_blank() {
        return Err(unsupported(part));
    }
    Ok(step)
}

fn parse_selector_pseudo(part: &str, start: usize) -> Result<(SelectorPseudoClass, usize)> {
    let (name, next) = parse_selector_ident(part, start + 1).ok_or_else(|| unsupported(part))?;
    let name = name.to_ascii_lowercase();

    if name == "not" {
        let rest = part.get(next..).ok_or_else(|| unsupported(part))?;
        let body_start = rest.strip_prefix('(').ok_or_else(|| unsupported(part))?;
        let close = find_matching_paren(body_start).ok_or_else(|| unsupported(part))?;
        let inner = parse_selector_groups(body_start[..close].trim())?;
        let after = next + 1 + close + 1;
        if let Some(ch) = part.as_bytes().get(after) {
            if !is_selector_continuation(ch) {
                return Err(unsupported(part));
            }
        }
        return Ok((SelectorPseudoClass::Not(inner), after));
    }

    SIMPLE_PSEUDO_CLASSES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, pseudo)| (pseudo.clone(), next))
        .ok_or_else(|| unsupported(part))
}

/// Index of the `)` closing an already-consumed `(` in `body`.
pub(crate) fn find_matching_paren(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    for (idx, b) in body.bytes().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'\'' | b'"' => quote = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

pub(crate) fn is_selector_continuation(next: &u8) -> bool {
    matches!(next, b'.' | b'#' | b'[' | b':')
}

pub(crate) fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let end = bytes
        .iter()
        .skip(start)
        .position(|b| !is_selector_ident_char(*b))
        .map_or(bytes.len(), |offset| start + offset);
    if end <= start {
        return None;
    }
    Some((src.get(start..end)?.to_string(), end))
}

pub(crate) fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn skip_selector_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

pub(crate) fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
) -> Result<(SelectorAttrCondition, usize)> {
    let bytes = src.as_bytes();
    let key_start = skip_selector_ws(bytes, open_bracket + 1);
    let mut i = key_start;
    while i < bytes.len() && (is_selector_ident_char(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if i == key_start {
        return Err(unsupported(src));
    }
    let key = src[key_start..i].to_ascii_lowercase();

    i = skip_selector_ws(bytes, i);
    match bytes.get(i) {
        Some(b']') => {
            return Ok((
                SelectorAttrCondition {
                    key,
                    op: AttrMatch::Exists,
                },
                i + 1,
            ));
        }
        None => return Err(unsupported(src)),
        _ => {}
    }

    let (op_byte, value_start) = match (bytes[i], bytes.get(i + 1)) {
        (b'=', _) => (b'=', i + 1),
        (b @ (b'^' | b'$' | b'*' | b'~' | b'|'), Some(b'=')) => (b, i + 2),
        _ => return Err(unsupported(src)),
    };

    let i = skip_selector_ws(bytes, value_start);
    let (value, after_value) = parse_selector_attr_value(src, i)?;
    let close = skip_selector_ws(bytes, after_value);
    if bytes.get(close) != Some(&b']') {
        return Err(unsupported(src));
    }

    let op = match op_byte {
        b'^' => AttrMatch::StartsWith(value),
        b'$' => AttrMatch::EndsWith(value),
        b'*' => AttrMatch::Contains(value),
        b'~' => AttrMatch::Includes(value),
        b'|' => AttrMatch::DashMatch(value),
        _ => AttrMatch::Eq(value),
    };
    Ok((SelectorAttrCondition { key, op }, close + 1))
}

fn parse_selector_attr_value(src: &str, start: usize) -> Result<(String, usize)> {
    let bytes = src.as_bytes();
    let Some(&first) = bytes.get(start) else {
        return Err(unsupported(src));
    };

    if first == b'"' || first == b'\'' {
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == first => return Ok((unescape_selector_value(&src[start + 1..i]), i + 1)),
                _ => i += 1,
            }
        }
        return Err(unsupported(src));
    }

    let mut i = start;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
        i += if bytes[i] == b'\\' { 2 } else { 1 };
    }
    let i = i.min(bytes.len());
    Ok((unescape_selector_value(&src[start..i]), i))
}

// Backslash escapes keep the following char literally.
fn unescape_selector_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
