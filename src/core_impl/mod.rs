use super::*;

mod dom;
mod html;
mod runtime;

pub(crate) use html::{is_void_tag, parse_html};
