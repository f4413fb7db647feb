use super::*;

#[test]
fn character_references_are_decoded_in_text_and_attributes() -> Result<()> {
    let doc = Document::from_html(
        "<p id='t' title='a &amp; b &quot;c&quot;'>&lt;tag&gt; &#65;&#x42; &copy; &hellip; &unknown; & done</p>",
    )?;
    let p = doc.select_one("#t")?;
    assert_eq!(doc.text_content(p)?, "<tag> AB \u{a9} \u{2026} &unknown; & done");
    assert_eq!(doc.get_attribute(p, "title").as_deref(), Some("a & b \"c\""));
    Ok(())
}

#[test]
fn void_and_self_closing_tags_do_not_take_children() -> Result<()> {
    let doc = Document::from_html("<div id='d'><img id='pic' src='a.png'><br/><span id='s'>x</span></div>")?;
    let div = doc.select_one("#d")?;
    let img = doc.select_one("#pic")?;
    let span = doc.select_one("#s")?;

    assert!(doc.child_nodes(img).is_empty());
    assert_eq!(doc.parent_element(span), Some(div));
    assert_eq!(doc.children(div).len(), 3);
    assert_eq!(
        doc.outer_html(div)?,
        "<div id=\"d\"><img id=\"pic\" src=\"a.png\"><br><span id=\"s\">x</span></div>"
    );
    Ok(())
}

#[test]
fn list_items_close_each_other_within_their_list() -> Result<()> {
    let doc = Document::from_html("<ul id='outer'><li>a<li>b<ul><li>c<li>d</ul><li>e</ul>")?;
    let outer = doc.select_one("#outer")?;
    assert_eq!(doc.children(outer).len(), 3);
    assert_eq!(doc.query_selector_all("#outer > li > ul > li")?.len(), 2);
    assert_eq!(doc.text_content(outer)?, "abcde");
    Ok(())
}

#[test]
fn block_elements_close_an_open_paragraph() -> Result<()> {
    let doc = Document::from_html("<p id='p'>intro<div id='d'>block</div>")?;
    let p = doc.select_one("#p")?;
    let d = doc.select_one("#d")?;
    assert_eq!(doc.parent_node(d), Some(doc.root()));
    assert_eq!(doc.text_content(p)?, "intro");
    Ok(())
}

#[test]
fn comments_and_doctype_are_skipped() -> Result<()> {
    let doc = Document::from_html(
        "<!DOCTYPE html><!-- header --><div id='d'>a<!-- <span>not</span> -->b</div>",
    )?;
    assert_eq!(doc.text_content(doc.select_one("#d")?)?, "ab");
    assert_eq!(doc.query_selector("span")?, None);
    Ok(())
}

#[test]
fn malformed_markup_is_reported() {
    for html in ["<div><!-- never closed", "<div id='x'", "<script>no end", "<p title='x>y</p>"] {
        match Document::from_html(html) {
            Err(Error::HtmlParse(_)) => {}
            other => panic!("{html:?} gave {other:?}"),
        }
    }
}

#[test]
fn script_and_style_bodies_stay_raw() -> Result<()> {
    let doc = Document::from_html(
        "<script id='s'>if (a < b && c) { x = '</div>'; }</script><style id='c'>a > b { }</style>",
    )?;
    let script = doc.select_one("#s")?;
    assert_eq!(doc.text_content(script)?, "if (a < b && c) { x = '</div>'; }");
    assert_eq!(
        doc.outer_html(script)?,
        "<script id=\"s\">if (a < b && c) { x = '</div>'; }</script>"
    );
    assert_eq!(doc.text_content(doc.select_one("#c")?)?, "a > b { }");
    Ok(())
}

#[test]
fn boolean_attributes_parse_to_empty_strings() -> Result<()> {
    let doc = Document::from_html("<input id='i' disabled required data-x=1 data-x=2>")?;
    let input = doc.select_one("#i")?;
    assert_eq!(doc.get_attribute(input, "disabled").as_deref(), Some(""));
    assert!(doc.has_attribute(input, "required"));
    assert_eq!(doc.get_attribute(input, "data-x").as_deref(), Some("1"));
    assert!(doc.disabled(input));
    Ok(())
}

#[test]
fn textarea_content_is_its_default_value() -> Result<()> {
    let doc = Document::from_html("<textarea id='t'>a &lt; <b>b</b></textarea>")?;
    let textarea = doc.select_one("#t")?;
    assert_eq!(doc.value(textarea)?, "a < <b>b</b>");
    assert_eq!(doc.query_selector("b")?, None);
    Ok(())
}

#[test]
fn stray_end_tags_are_ignored() -> Result<()> {
    let doc = Document::from_html("</span><div id='d'>x</em></div>y")?;
    let d = doc.select_one("#d")?;
    assert_eq!(doc.text_content(d)?, "x");
    assert_eq!(doc.text_content(doc.root())?, "xy");
    Ok(())
}

#[test]
fn dump_dom_sorts_attributes_and_escapes() -> Result<()> {
    let doc = Document::from_html("<a title='1 &lt; 2' href='/q?a=1&amp;b=2' id='link'>Tom &amp; Jerry</a>")?;
    assert_eq!(
        doc.dump_dom("#link")?,
        "<a href=\"/q?a=1&amp;b=2\" id=\"link\" title=\"1 &lt; 2\">Tom &amp; Jerry</a>"
    );
    Ok(())
}
