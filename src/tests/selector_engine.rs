use super::*;

const PAGE: &str = "\
<main id='app'>\
<nav class='menu top'><a id='home' href='/home' lang='en-US'>Home</a><a id='docs' href='https://example.com/docs.pdf' rel='external noopener'>Docs</a></nav>\
<ul id='items'><li id='i1' class='item'>one</li><li id='i2' class='item done'>two</li><li id='i3' class='item'></li></ul>\
<form id='f'><input id='name' name='name'><input id='age' name='age' disabled><button id='send'>Send</button></form>\
<p id='solo'><span id='only'>x</span></p>\
</main>";

fn ids(doc: &Document, nodes: Vec<NodeId>) -> Vec<String> {
    nodes
        .into_iter()
        .map(|node| doc.get_attribute(node, "id").unwrap_or_default())
        .collect()
}

#[test]
fn selector_groups_return_document_order_without_duplicates() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    let found = doc.query_selector_all("li.done, #i1, .item")?;
    assert_eq!(ids(&doc, found), vec!["i1", "i2", "i3"]);
    Ok(())
}

#[test]
fn combinators() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    assert_eq!(ids(&doc, doc.query_selector_all("main a")?), vec!["home", "docs"]);
    assert_eq!(ids(&doc, doc.query_selector_all("#app > p > span")?), vec!["only"]);
    assert!(doc.query_selector_all("#app > span")?.is_empty());
    assert_eq!(ids(&doc, doc.query_selector_all("#i1 + li")?), vec!["i2"]);
    assert_eq!(ids(&doc, doc.query_selector_all("#i1 ~ li")?), vec!["i2", "i3"]);
    assert_eq!(ids(&doc, doc.query_selector_all("nav.menu.top>a#docs")?), vec!["docs"]);
    Ok(())
}

#[test]
fn attribute_operators() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    let cases = [
        ("a[href]", vec!["home", "docs"]),
        ("a[href='/home']", vec!["home"]),
        ("a[href^=https]", vec!["docs"]),
        ("a[href$='.pdf']", vec!["docs"]),
        ("a[href*=\"example\"]", vec!["docs"]),
        ("a[rel~=noopener]", vec!["docs"]),
        ("a[lang|=en]", vec!["home"]),
        ("input[name = age]", vec!["age"]),
        ("a[href^='']", vec![]),
    ];
    for (selector, expected) in cases {
        let found = ids(&doc, doc.query_selector_all(selector)?);
        assert_eq!(found, expected, "selector {selector}");
    }
    Ok(())
}

#[test]
fn pseudo_classes() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    assert_eq!(ids(&doc, doc.query_selector_all("li:first-child")?), vec!["i1"]);
    assert_eq!(ids(&doc, doc.query_selector_all("li:last-child")?), vec!["i3"]);
    assert_eq!(ids(&doc, doc.query_selector_all("span:only-child")?), vec!["only"]);
    assert_eq!(ids(&doc, doc.query_selector_all("li:empty")?), vec!["i3"]);
    assert_eq!(ids(&doc, doc.query_selector_all("input:disabled")?), vec!["age"]);
    assert_eq!(
        ids(&doc, doc.query_selector_all("#f :enabled")?),
        vec!["name", "send"]
    );
    assert_eq!(
        ids(&doc, doc.query_selector_all("li:not(.done, #i3)")?),
        vec!["i1"]
    );
    Ok(())
}

#[test]
fn unsupported_selectors_are_errors() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    for selector in ["p:hover", "div::before", "", "a,,b", "a >", "[", "li:not(", "#a#b"] {
        match doc.query_selector(selector) {
            Err(Error::UnsupportedSelector(_)) => {}
            other => panic!("{selector:?} gave {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn missing_matches_are_not_errors_until_select_one() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    assert_eq!(doc.query_selector("table")?, None);
    assert!(doc.query_selector_all("table")?.is_empty());
    assert_eq!(
        doc.select_one("table"),
        Err(Error::SelectorNotFound("table".into()))
    );
    Ok(())
}

#[test]
fn closest_and_matches() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    let only = doc.select_one("#only")?;
    let home = doc.select_one("#home")?;

    assert_eq!(doc.closest(only, "span")?, Some(only));
    assert_eq!(doc.closest(only, "main")?, doc.get_element_by_id("app"));
    assert_eq!(doc.closest(only, "nav")?, None);
    assert!(doc.matches(home, "nav > a[href^='/']")?);
    assert!(!doc.matches(home, "#docs")?);
    assert!(!doc.matches(doc.root(), "*")?);
    Ok(())
}

#[test]
fn scoped_queries_only_see_descendants() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    let list = doc.select_one("#items")?;

    assert_eq!(ids(&doc, doc.query_selector_all_from(list, "li")?), vec!["i1", "i2", "i3"]);
    assert_eq!(doc.query_selector_from(list, "ul")?, None);
    assert_eq!(doc.query_selector_from(list, "main li.done")?, doc.get_element_by_id("i2"));
    Ok(())
}

#[test]
fn tag_names_match_case_insensitively() -> Result<()> {
    let doc = Document::from_html(PAGE)?;
    assert_eq!(ids(&doc, doc.query_selector_all("LI.done")?), vec!["i2"]);
    Ok(())
}

#[test]
fn duplicate_ids_resolve_to_the_first_in_document_order() -> Result<()> {
    let doc = Document::from_html("<p id='dup'>a</p><div><p id='dup'>b</p></div>")?;
    let all = doc.query_selector_all("#dup")?;
    assert_eq!(all.len(), 2);
    assert_eq!(doc.text_content(doc.select_one("#dup")?)?, "a");
    Ok(())
}
