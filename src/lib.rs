//! # dom_events
//!
//! A deterministic, single-threaded, in-memory DOM with browser-style event
//! listeners. Build a tree from markup or node by node, mutate content,
//! attributes, classes and inline styles, and drive listeners through the
//! same capture / target / bubble flow a browser uses.
//!
//! ## Architecture
//! ```text
//!   Document (owns everything, no globals)
//!   ├─ Dom             node arena, attributes, classes, style, text
//!   ├─ ListenerStore   subscriptions per (node, kind), registration order
//!   ├─ signals         AbortSignal state (cancellation tokens)
//!   ├─ functions       named handlers for removable listeners
//!   ├─ SchedulerState  virtual clock + timer queue (delayed dispatch)
//!   └─ TraceState      bounded trace log + console buffer
//!
//! dispatch_event(target, event)
//!   path = [root, ..., parent, target]
//!   ├─ capture: root → target      (capture listeners, target included)
//!   ├─ target:  target             (bubble listeners)
//!   └─ bubble:  parent → root      (bubble listeners, if event.bubbles)
//!   stop_propagation ends the walk after the current node
//! ```
//!
//! ## Example
//! ```rust
//! use dom_events::{Document, EventHandler, ListenerOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let mut doc = Document::from_html(
//!         "<div id='outer'><button id='btn'>go</button></div>",
//!     )?;
//!     let outer = doc.select_one("#outer")?;
//!     let btn = doc.select_one("#btn")?;
//!
//!     doc.add_event_listener(
//!         outer,
//!         "click",
//!         EventHandler::new(|doc, _event| {
//!             doc.log("capture: outer");
//!             Ok(())
//!         }),
//!         ListenerOptions::capture(),
//!     )?;
//!     doc.add_event_listener(
//!         btn,
//!         "click",
//!         EventHandler::new(|doc, _event| {
//!             doc.log("target: button");
//!             Ok(())
//!         }),
//!         ListenerOptions::once(),
//!     )?;
//!
//!     doc.click("#btn")?;
//!     doc.click("#btn")?;
//!     assert_eq!(
//!         doc.take_console_logs(),
//!         vec!["capture: outer", "target: button", "capture: outer"]
//!     );
//!     Ok(())
//! }
//! ```
use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

mod core_dom_utils;
mod core_impl;
mod document_api;
mod runtime_state;
mod runtime_values;
mod selector;

use core_dom_utils::*;
use core_impl::*;
use runtime_state::*;
use runtime_values::*;
use selector::*;

pub use core_dom_utils::{Error, NodeId, Result};
pub use document_api::Document;
pub use runtime_state::{
    AbortController, AbortSignal, Callback, EventHandler, ListenerInfo, ListenerOptions,
    PendingTimer, TimerHandler, TimerId,
};
pub use runtime_values::{Event, EventInit, EventPhase};

#[cfg(test)]
mod tests;
