use super::*;

/// An in-memory document: the node tree plus every listener, abort signal
/// and timer attached to it.
///
/// All state lives here; there is no process-wide document. Handlers
/// receive `&mut Document` and may freely mutate the tree, add or remove
/// listeners, abort signals, schedule timers or dispatch further events.
#[derive(Debug)]
pub struct Document {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) signals: SignalRegistry,
    pub(crate) functions: HashMap<String, EventHandler>,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace_state: TraceState,
    pub(crate) console_logs: Vec<String>,
    pub(crate) navigations: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a root node with no children.
    pub fn new() -> Self {
        Self::from_dom(Dom::new())
    }

    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        Ok(Self::from_dom(dom))
    }

    fn from_dom(dom: Dom) -> Self {
        Self {
            dom,
            listeners: ListenerStore::default(),
            signals: SignalRegistry::default(),
            functions: HashMap::new(),
            scheduler: SchedulerState::default(),
            trace_state: TraceState::default(),
            console_logs: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// The document node. It has no tag and is the last stop of bubbling.
    pub fn root(&self) -> NodeId {
        self.dom.root
    }
}
