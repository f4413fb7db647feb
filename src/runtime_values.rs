use super::*;

/// Where an event currently is on its propagation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

impl EventPhase {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Capturing => "capture",
            Self::AtTarget => "target",
            Self::Bubbling => "bubble",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl Default for EventInit {
    fn default() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
        }
    }
}

/// One dispatch occurrence.
///
/// The schema is fixed; only `detail` varies by event kind. Read it back
/// with [`Event::detail`] using the type it was created with.
#[derive(Clone)]
pub struct Event {
    pub(crate) kind: String,
    pub(crate) target: Option<NodeId>,
    pub(crate) current_target: Option<NodeId>,
    pub(crate) phase: EventPhase,
    pub(crate) path: Vec<NodeId>,
    pub(crate) time_stamp_ms: i64,
    pub(crate) default_prevented: bool,
    pub(crate) is_trusted: bool,
    pub(crate) bubbles: bool,
    pub(crate) cancelable: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
    pub(crate) detail: Option<Rc<dyn Any>>,
}

impl Event {
    pub fn new(kind: &str) -> Self {
        Self::with_init(kind, EventInit::default())
    }

    pub fn with_init(kind: &str, init: EventInit) -> Self {
        Self {
            kind: kind.to_string(),
            target: None,
            current_target: None,
            phase: EventPhase::None,
            path: Vec::new(),
            time_stamp_ms: 0,
            default_prevented: false,
            is_trusted: false,
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            detail: None,
        }
    }

    /// A user-defined event carrying `detail`, like `new CustomEvent(kind, { detail })`.
    pub fn custom<T: Any>(kind: &str, detail: T) -> Self {
        Self::new(kind).with_detail(detail)
    }

    pub fn with_detail<T: Any>(mut self, detail: T) -> Self {
        self.detail = Some(Rc::new(detail));
        self
    }

    pub(crate) fn trusted(kind: &str) -> Self {
        let mut event = Self::new(kind);
        event.is_trusted = true;
        event
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The node the event was dispatched to. `None` before dispatch.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn event_phase(&self) -> EventPhase {
        self.phase
    }

    /// Root-to-target propagation path, fixed when dispatch starts.
    pub fn composed_path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn time_stamp_ms(&self) -> i64 {
        self.time_stamp_ms
    }

    pub fn is_trusted(&self) -> bool {
        self.is_trusted
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail
            .as_ref()
            .and_then(|detail| detail.downcast_ref::<T>())
    }

    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Marks the default action as suppressed. Does not stop propagation.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("phase", &self.phase)
            .field("path", &self.path)
            .field("time_stamp_ms", &self.time_stamp_ms)
            .field("default_prevented", &self.default_prevented)
            .field("is_trusted", &self.is_trusted)
            .field("bubbles", &self.bubbles)
            .field("cancelable", &self.cancelable)
            .field("propagation_stopped", &self.propagation_stopped)
            .field(
                "immediate_propagation_stopped",
                &self.immediate_propagation_stopped,
            )
            .field("has_detail", &self.detail.is_some())
            .finish()
    }
}
