use super::*;

#[test]
fn built_tree_serializes_and_dispatches_through_new_parents() -> Result<()> {
    let mut doc = Document::new();
    let root = doc.root();
    let list = doc.create_element("UL");
    let item = doc.create_element("li");
    let label = doc.create_text_node("first");

    doc.append_child(root, list)?;
    doc.append_child(list, item)?;
    doc.append_child(item, label)?;
    doc.set_attribute(list, "id", "todo")?;

    assert_eq!(doc.outer_html(list)?, "<ul id=\"todo\"><li>first</li></ul>");
    assert_eq!(doc.get_element_by_id("todo"), Some(list));
    assert_eq!(doc.tag_name(item).as_deref(), Some("LI"));
    assert_eq!(doc.tag_name(label), None);

    doc.add_event_listener(list, "click", log_handler("list"), ListenerOptions::default())?;
    doc.dispatch_event(item, Event::new("click"))?;
    assert_eq!(doc.take_console_logs(), vec!["list"]);
    Ok(())
}

#[test]
fn insert_before_and_prepend_order_children() -> Result<()> {
    let mut doc = Document::from_html("<ol id='list'><li id='b'>b</li></ol>")?;
    let list = doc.select_one("#list")?;
    let b = doc.select_one("#b")?;

    let a = doc.create_element("li");
    doc.set_text_content(a, "a")?;
    doc.insert_before(list, a, b)?;

    let zero = doc.create_element("li");
    doc.set_text_content(zero, "0")?;
    doc.prepend_child(list, zero)?;

    assert_eq!(doc.text_content(list)?, "0ab");
    assert_eq!(doc.children(list), vec![zero, a, b]);
    assert_eq!(doc.first_element_child(list), Some(zero));
    assert_eq!(doc.last_element_child(list), Some(b));
    assert_eq!(doc.next_element_sibling(zero), Some(a));
    assert_eq!(doc.previous_element_sibling(a), Some(zero));
    assert_eq!(doc.previous_element_sibling(zero), None);
    Ok(())
}

#[test]
fn append_moves_an_attached_node() -> Result<()> {
    let mut doc = Document::from_html("<div id='left'><span id='s'>x</span></div><div id='right'></div>")?;
    let right = doc.select_one("#right")?;
    let span = doc.select_one("#s")?;

    doc.append_child(right, span)?;
    assert_eq!(doc.inner_html(doc.select_one("#left")?)?, "");
    assert_eq!(doc.parent_node(span), Some(right));
    assert_eq!(doc.query_selector("#right > span")?, Some(span));
    Ok(())
}

#[test]
fn insertions_that_would_create_a_cycle_are_rejected() -> Result<()> {
    let mut doc = Document::from_html("<div id='outer'><div id='inner'></div></div><br id='br'>")?;
    let outer = doc.select_one("#outer")?;
    let inner = doc.select_one("#inner")?;
    let br = doc.select_one("#br")?;

    assert!(matches!(doc.append_child(inner, outer), Err(Error::Runtime(_))));
    assert!(matches!(doc.append_child(outer, outer), Err(Error::Runtime(_))));
    assert!(matches!(doc.append_child(outer, doc.root()), Err(Error::Runtime(_))));
    assert!(matches!(doc.append_child(br, inner), Err(Error::Runtime(_))));
    assert_eq!(doc.parent_node(inner), Some(outer));
    Ok(())
}

#[test]
fn removed_nodes_leave_the_id_index_but_keep_listeners() -> Result<()> {
    let mut doc = Document::from_html("<div id='wrap'><p id='gone'>bye</p></div>")?;
    let wrap = doc.select_one("#wrap")?;
    let gone = doc.select_one("#gone")?;
    doc.add_event_listener(wrap, "ping", log_handler("wrap"), ListenerOptions::default())?;
    doc.add_event_listener(gone, "ping", log_handler("gone"), ListenerOptions::default())?;

    doc.remove_node(gone)?;
    assert_eq!(doc.get_element_by_id("gone"), None);
    assert!(matches!(doc.select_one("#gone"), Err(Error::SelectorNotFound(_))));
    assert!(!doc.contains(wrap, gone));

    // A detached node only reaches itself.
    doc.dispatch_event(gone, Event::new("ping"))?;
    assert_eq!(doc.take_console_logs(), vec!["gone"]);

    doc.remove_node(gone)?;
    assert!(matches!(doc.remove_node(doc.root()), Err(Error::Runtime(_))));
    Ok(())
}

#[test]
fn remove_child_requires_a_direct_child() -> Result<()> {
    let mut doc = Document::from_html("<div id='a'><div id='b'><i id='c'></i></div></div>")?;
    let a = doc.select_one("#a")?;
    let b = doc.select_one("#b")?;
    let c = doc.select_one("#c")?;

    assert!(matches!(doc.remove_child(a, c), Err(Error::Runtime(_))));
    doc.remove_child(b, c)?;
    assert!(doc.children(b).is_empty());
    assert!(doc.contains(a, b));
    assert!(doc.contains(a, a));
    Ok(())
}

#[test]
fn class_list_operations() -> Result<()> {
    let mut doc = Document::from_html("<div id='box' class='card  wide'></div>")?;
    let node = doc.select_one("#box")?;

    assert_eq!(doc.class_list(node)?, vec!["card", "wide"]);
    doc.class_add(node, "active")?;
    doc.class_add(node, "card")?;
    doc.class_remove(node, "wide")?;
    assert_eq!(doc.get_attribute(node, "class").as_deref(), Some("card active"));

    assert!(!doc.class_toggle(node, "active")?);
    assert!(doc.class_toggle(node, "open")?);
    assert!(doc.class_contains(node, "open")?);
    assert!(!doc.class_contains(node, "active")?);

    doc.class_remove(node, "card")?;
    doc.class_remove(node, "open")?;
    assert!(!doc.has_attribute(node, "class"));
    Ok(())
}

#[test]
fn inline_style_uses_camel_case_properties() -> Result<()> {
    let mut doc = Document::from_html("<div id='box' style='color: blue'></div>")?;
    let node = doc.select_one("#box")?;

    assert_eq!(doc.style_get(node, "color")?, "blue");
    doc.style_set(node, "backgroundColor", "red")?;
    assert_eq!(
        doc.get_attribute(node, "style").as_deref(),
        Some("color: blue; background-color: red;")
    );
    assert_eq!(doc.style_get(node, "backgroundColor")?, "red");
    assert_eq!(doc.style_get(node, "marginTop")?, "");

    doc.style_set(node, "color", "")?;
    doc.style_set(node, "backgroundColor", "")?;
    assert!(!doc.has_attribute(node, "style"));
    Ok(())
}

#[test]
fn value_property_diverges_from_the_attribute_once_written() -> Result<()> {
    let mut doc = Document::from_html("<input id='name' value='初期'>")?;
    let input = doc.select_one("#name")?;

    assert_eq!(doc.value(input)?, "初期");
    doc.set_attribute(input, "value", "attr-1")?;
    assert_eq!(doc.value(input)?, "attr-1");

    doc.set_value(input, "typed")?;
    doc.set_attribute(input, "value", "attr-2")?;
    assert_eq!(doc.value(input)?, "typed");
    assert_eq!(doc.get_attribute(input, "value").as_deref(), Some("attr-2"));
    Ok(())
}

#[test]
fn disabled_applies_to_form_controls_only() -> Result<()> {
    let mut doc = Document::from_html("<button id='b'>b</button><div id='d' disabled></div>")?;
    let button = doc.select_one("#b")?;
    let div = doc.select_one("#d")?;

    assert!(!doc.disabled(button));
    doc.set_disabled(button, true)?;
    assert!(doc.disabled(button));
    assert_eq!(doc.get_attribute(button, "disabled").as_deref(), Some(""));
    assert!(!doc.disabled(div));

    doc.set_disabled(button, false)?;
    assert!(!doc.has_attribute(button, "disabled"));
    Ok(())
}

#[test]
fn attribute_names_are_case_insensitive() -> Result<()> {
    let mut doc = Document::from_html("<a id='link' HREF='/x'>x</a>")?;
    let link = doc.select_one("#link")?;

    assert_eq!(doc.get_attribute(link, "href").as_deref(), Some("/x"));
    doc.set_attribute(link, "Data-Role", "nav")?;
    assert_eq!(doc.get_attribute(link, "data-role").as_deref(), Some("nav"));
    doc.remove_attribute(link, "DATA-ROLE")?;
    assert!(!doc.has_attribute(link, "data-role"));
    Ok(())
}

#[test]
fn changing_an_id_updates_lookups() -> Result<()> {
    let mut doc = Document::from_html("<p id='old'>x</p>")?;
    let p = doc.select_one("#old")?;

    doc.set_attribute(p, "id", "new")?;
    assert_eq!(doc.get_element_by_id("old"), None);
    assert_eq!(doc.get_element_by_id("new"), Some(p));

    doc.remove_attribute(p, "id")?;
    assert_eq!(doc.get_element_by_id("new"), None);
    Ok(())
}

#[test]
fn text_content_replaces_children_and_escapes_on_output() -> Result<()> {
    let mut doc = Document::from_html("<div id='box'><b id='bold'>x</b><i>y</i></div>")?;
    let node = doc.select_one("#box")?;

    doc.set_text_content(node, "a < b & c")?;
    assert_eq!(doc.text_content(node)?, "a < b & c");
    assert_eq!(doc.inner_html(node)?, "a &lt; b &amp; c");
    assert_eq!(doc.get_element_by_id("bold"), None);
    assert_eq!(doc.child_nodes(node).len(), 1);

    doc.set_text_content(node, "")?;
    assert!(doc.child_nodes(node).is_empty());
    Ok(())
}

#[test]
fn inner_html_replaces_the_subtree() -> Result<()> {
    let mut doc = Document::from_html("<section id='host'><p>old</p></section>")?;
    let host = doc.select_one("#host")?;

    doc.set_inner_html(host, "<button id='fresh' class='primary'>Go</button> now")?;
    let fresh = doc.select_one("#fresh")?;
    assert_eq!(doc.parent_element(fresh), Some(host));
    assert_eq!(doc.text_content(host)?, "Go now");
    assert_eq!(
        doc.inner_html(host)?,
        "<button class=\"primary\" id=\"fresh\">Go</button> now"
    );

    assert!(matches!(doc.set_inner_html(host, "<!-- open"), Err(Error::HtmlParse(_))));
    Ok(())
}

#[test]
fn element_operations_reject_text_nodes() -> Result<()> {
    let mut doc = Document::new();
    let text = doc.create_text_node("plain");
    assert!(matches!(doc.set_attribute(text, "id", "x"), Err(Error::Runtime(_))));
    assert!(matches!(doc.class_list(text), Err(Error::Runtime(_))));
    assert!(matches!(doc.outer_html(text), Err(Error::Runtime(_))));
    assert_eq!(doc.text_content(text)?, "plain");
    assert!(matches!(doc.text_content(NodeId(77)), Err(Error::Runtime(_))));
    Ok(())
}
