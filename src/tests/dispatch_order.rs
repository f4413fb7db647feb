use super::*;

#[test]
fn capture_then_target_then_bubble() -> Result<()> {
    let mut doc = Document::from_html("<div id='root'><div id='leaf'></div></div>")?;
    let root = doc.select_one("#root")?;
    let leaf = doc.select_one("#leaf")?;

    doc.add_event_listener(root, "ping", log_handler("cap"), ListenerOptions::capture())?;
    doc.add_event_listener(root, "ping", log_handler("bub-R"), ListenerOptions::default())?;
    doc.add_event_listener(leaf, "ping", log_handler("bub-L"), ListenerOptions::default())?;

    doc.dispatch_event(leaf, Event::new("ping"))?;
    assert_eq!(doc.take_console_logs(), vec!["cap", "bub-L", "bub-R"]);
    Ok(())
}

#[test]
fn document_root_sees_capture_first_and_bubble_last() -> Result<()> {
    let mut doc = Document::from_html("<section id='s'><button id='btn'>go</button></section>")?;
    let root = doc.root();
    let section = doc.select_one("#s")?;
    let btn = doc.select_one("#btn")?;

    doc.add_event_listener(root, "click", log_handler("doc-bubble"), ListenerOptions::default())?;
    doc.add_event_listener(root, "click", log_handler("doc-capture"), ListenerOptions::capture())?;
    doc.add_event_listener(section, "click", log_handler("section-capture"), ListenerOptions::capture())?;
    doc.add_event_listener(section, "click", log_handler("section-bubble"), ListenerOptions::default())?;
    doc.add_event_listener(btn, "click", log_handler("btn"), ListenerOptions::default())?;

    doc.click("#btn")?;
    assert_eq!(
        doc.take_console_logs(),
        vec![
            "doc-capture",
            "section-capture",
            "btn",
            "section-bubble",
            "doc-bubble"
        ]
    );
    Ok(())
}

#[test]
fn target_capture_listeners_run_before_target_bubble_listeners() -> Result<()> {
    let mut doc = Document::from_html("<p id='p'>x</p>")?;
    let p = doc.select_one("#p")?;

    doc.add_event_listener(p, "ping", log_handler("bubble"), ListenerOptions::default())?;
    doc.add_event_listener(p, "ping", log_handler("capture"), ListenerOptions::capture())?;

    doc.dispatch_event(p, Event::new("ping"))?;
    assert_eq!(doc.take_console_logs(), vec!["capture", "bubble"]);
    Ok(())
}

#[test]
fn non_bubbling_event_skips_ancestor_bubble_listeners_only() -> Result<()> {
    let mut doc = Document::from_html("<form id='f'><input id='name'></form>")?;
    let form = doc.select_one("#f")?;
    let input = doc.select_one("#name")?;

    doc.add_event_listener(form, "focus", log_handler("form-capture"), ListenerOptions::capture())?;
    doc.add_event_listener(form, "focus", log_handler("form-bubble"), ListenerOptions::default())?;
    doc.add_event_listener(input, "focus", log_handler("input"), ListenerOptions::default())?;

    let event = Event::with_init(
        "focus",
        EventInit {
            bubbles: false,
            cancelable: false,
        },
    );
    doc.dispatch_event(input, event)?;
    assert_eq!(doc.take_console_logs(), vec!["form-capture", "input"]);
    Ok(())
}

#[test]
fn handlers_observe_phase_and_current_target() -> Result<()> {
    let mut doc = Document::from_html("<div id='outer'><span id='inner'>t</span></div>")?;
    let outer = doc.select_one("#outer")?;
    let inner = doc.select_one("#inner")?;

    let record = EventHandler::new(|doc, event| {
        let current = event
            .current_target()
            .and_then(|node| doc.get_attribute(node, "id"))
            .unwrap_or_default();
        doc.log(format!("{current}:{:?}", event.event_phase()));
        Ok(())
    });
    doc.add_event_listener(outer, "ping", &record, ListenerOptions::capture())?;
    doc.add_event_listener(outer, "ping", &record, ListenerOptions::default())?;
    doc.add_event_listener(inner, "ping", &record, ListenerOptions::default())?;

    let done = doc.dispatch_event(inner, Event::new("ping"))?;
    assert_eq!(
        doc.take_console_logs(),
        vec!["outer:Capturing", "inner:AtTarget", "outer:Bubbling"]
    );
    assert_eq!(done.event_phase(), EventPhase::None);
    assert_eq!(done.current_target(), None);
    assert_eq!(done.target(), Some(inner));
    Ok(())
}

#[test]
fn composed_path_runs_from_root_to_target() -> Result<()> {
    let mut doc = Document::from_html("<ul id='list'><li id='item'>a</li></ul>")?;
    let list = doc.select_one("#list")?;
    let item = doc.select_one("#item")?;

    let event = doc.dispatch_event(item, Event::new("ping"))?;
    assert_eq!(event.composed_path(), &[doc.root(), list, item]);
    Ok(())
}

#[test]
fn detached_nodes_dispatch_to_themselves() -> Result<()> {
    let mut doc = Document::new();
    let orphan = doc.create_element("div");
    doc.add_event_listener(orphan, "ping", log_handler("orphan"), ListenerOptions::default())?;

    let event = doc.dispatch_event(orphan, Event::new("ping"))?;
    assert_eq!(doc.take_console_logs(), vec!["orphan"]);
    assert_eq!(event.composed_path(), &[orphan]);
    Ok(())
}

#[test]
fn duplicate_registrations_all_fire_in_registration_order() -> Result<()> {
    let mut doc = Document::from_html("<button id='btn'>go</button>")?;
    let btn = doc.select_one("#btn")?;
    let first = log_handler("first");

    doc.add_event_listener(btn, "click", &first, ListenerOptions::default())?;
    doc.add_event_listener(btn, "click", log_handler("second"), ListenerOptions::default())?;
    doc.add_event_listener(btn, "click", &first, ListenerOptions::default())?;

    doc.click("#btn")?;
    assert_eq!(doc.take_console_logs(), vec!["first", "second", "first"]);
    assert_eq!(doc.listener_count(btn, "click"), 3);
    Ok(())
}

#[test]
fn listeners_only_fire_for_their_own_kind() -> Result<()> {
    let mut doc = Document::from_html("<button id='btn'>go</button>")?;
    let btn = doc.select_one("#btn")?;
    doc.add_event_listener(btn, "click", log_handler("click"), ListenerOptions::default())?;
    doc.add_event_listener(btn, "keydown", log_handler("keydown"), ListenerOptions::default())?;

    doc.dispatch("#btn", "keydown")?;
    assert_eq!(doc.take_console_logs(), vec!["keydown"]);
    Ok(())
}

#[test]
fn time_stamp_follows_the_virtual_clock() -> Result<()> {
    let mut doc = Document::from_html("<p id='p'></p>")?;
    let p = doc.select_one("#p")?;
    doc.advance_time(250)?;
    let event = doc.dispatch_event(p, Event::new("ping"))?;
    assert_eq!(event.time_stamp_ms(), 250);
    Ok(())
}
