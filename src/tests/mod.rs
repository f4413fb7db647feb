use super::*;

mod dispatch_order;
mod dom_mutation;
mod html_parsing;
mod selector_engine;

fn log_handler(message: &'static str) -> EventHandler {
    EventHandler::new(move |doc, _event| {
        doc.log(message);
        Ok(())
    })
}

fn quiet_trace(doc: &mut Document) {
    doc.enable_trace(true);
    doc.set_trace_stderr(false);
}
