use super::*;

type HandlerFn = dyn Fn(&mut Document, &mut Event) -> Result<()>;
type TimerFn = dyn Fn(&mut Document) -> Result<()>;

/// A listener callback with reference identity.
///
/// Clones share identity, so keep a clone around to remove the listener later.
#[derive(Clone)]
pub struct EventHandler {
    inner: Rc<HandlerFn>,
}

impl EventHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Document, &mut Event) -> Result<()> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    pub fn same_handler(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }

    pub(crate) fn call(&self, doc: &mut Document, event: &mut Event) -> Result<()> {
        (self.inner)(doc, event)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.same_handler(other)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.inner) as *const ())
    }
}

/// How a listener refers to its handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    Inline(EventHandler),
    /// A function registered with [`Document::define_function`].
    Named(String),
}

impl Callback {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    pub(crate) fn label(&self) -> String {
        match self {
            Self::Inline(handler) => format!("{handler:?}"),
            Self::Named(name) => name.clone(),
        }
    }
}

impl From<EventHandler> for Callback {
    fn from(handler: EventHandler) -> Self {
        Self::Inline(handler)
    }
}

impl From<&EventHandler> for Callback {
    fn from(handler: &EventHandler) -> Self {
        Self::Inline(handler.clone())
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Callback {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Cancellation token shared by any number of listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbortSignal(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortController {
    pub(crate) signal: AbortSignal,
}

impl AbortController {
    pub fn signal(&self) -> AbortSignal {
        self.signal
    }

    /// Same as [`Document::abort`] with no reason.
    pub fn abort(&self, doc: &mut Document) -> usize {
        doc.abort(self, None)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
    pub signal: Option<AbortSignal>,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self::default().with_capture(true)
    }

    pub fn once() -> Self {
        Self::default().with_once(true)
    }

    pub fn passive() -> Self {
        Self::default().with_passive(true)
    }

    pub fn signal(signal: AbortSignal) -> Self {
        Self::default().with_signal(signal)
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }

    pub fn with_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// Read-only view of one registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerInfo {
    pub kind: String,
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
    pub signal: Option<AbortSignal>,
    pub named: Option<String>,
    pub from_handler_property: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ListenerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerSource {
    AddEventListener,
    HandlerProperty,
}

#[derive(Debug, Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) capture: bool,
    pub(crate) once: bool,
    pub(crate) passive: bool,
    pub(crate) signal: Option<AbortSignal>,
    pub(crate) callback: Callback,
    pub(crate) source: ListenerSource,
}

impl Listener {
    pub(crate) fn info(&self, kind: &str) -> ListenerInfo {
        ListenerInfo {
            kind: kind.to_string(),
            capture: self.capture,
            once: self.once,
            passive: self.passive,
            signal: self.signal,
            named: match &self.callback {
                Callback::Named(name) => Some(name.clone()),
                Callback::Inline(_) => None,
            },
            from_handler_property: self.source == ListenerSource::HandlerProperty,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    pub(crate) map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
    pub(crate) next_listener_id: u64,
}

impl ListenerStore {
    pub(crate) fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        id
    }

    // Duplicates are kept on purpose: every copy fires in registration order.
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    pub(crate) fn remove(
        &mut self,
        node_id: NodeId,
        event: &str,
        capture: bool,
        callback: &Callback,
    ) -> Option<Listener> {
        self.remove_first(node_id, event, |listener| {
            listener.source == ListenerSource::AddEventListener
                && listener.capture == capture
                && listener.callback == *callback
        })
    }

    pub(crate) fn remove_by_id(
        &mut self,
        node_id: NodeId,
        event: &str,
        id: ListenerId,
    ) -> Option<Listener> {
        self.remove_first(node_id, event, |listener| listener.id == id)
    }

    fn remove_first(
        &mut self,
        node_id: NodeId,
        event: &str,
        pred: impl Fn(&Listener) -> bool,
    ) -> Option<Listener> {
        let events = self.map.get_mut(&node_id)?;
        let listeners = events.get_mut(event)?;
        let pos = listeners.iter().position(pred)?;
        let removed = listeners.remove(pos);
        if listeners.is_empty() {
            events.remove(event);
        }
        if events.is_empty() {
            self.map.remove(&node_id);
        }
        Some(removed)
    }

    /// Drops every listener tied to `signal`, across all nodes and kinds.
    pub(crate) fn remove_with_signal(&mut self, signal: AbortSignal) -> usize {
        let mut removed = 0usize;
        for events in self.map.values_mut() {
            for listeners in events.values_mut() {
                let before = listeners.len();
                listeners.retain(|listener| listener.signal != Some(signal));
                removed += before - listeners.len();
            }
            events.retain(|_, listeners| !listeners.is_empty());
        }
        self.map.retain(|_, events| !events.is_empty());
        removed
    }

    pub(crate) fn contains(&self, node_id: NodeId, event: &str, id: ListenerId) -> bool {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .is_some_and(|listeners| listeners.iter().any(|listener| listener.id == id))
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node_id: NodeId, event: &str) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }

    /// All listeners on `node_id`, in global registration order.
    pub(crate) fn infos(&self, node_id: NodeId) -> Vec<ListenerInfo> {
        let Some(events) = self.map.get(&node_id) else {
            return Vec::new();
        };
        let mut entries = events
            .iter()
            .flat_map(|(kind, listeners)| listeners.iter().map(move |l| (l.id, l.info(kind))))
            .collect::<Vec<_>>();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, info)| info).collect()
    }

    pub(crate) fn handler_property(&self, node_id: NodeId, event: &str) -> Option<&Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .and_then(|listeners| {
                listeners
                    .iter()
                    .find(|listener| listener.source == ListenerSource::HandlerProperty)
            })
    }

    /// Replaces the handler-property slot in place, keeping its position.
    /// Returns `false` when there was no slot to replace.
    pub(crate) fn replace_handler_property(
        &mut self,
        node_id: NodeId,
        event: &str,
        handler: EventHandler,
    ) -> bool {
        let slot = self
            .map
            .get_mut(&node_id)
            .and_then(|events| events.get_mut(event))
            .and_then(|listeners| {
                listeners
                    .iter_mut()
                    .find(|listener| listener.source == ListenerSource::HandlerProperty)
            });
        match slot {
            Some(listener) => {
                listener.callback = Callback::Inline(handler);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_handler_property(&mut self, node_id: NodeId, event: &str) -> bool {
        self.remove_first(node_id, event, |listener| {
            listener.source == ListenerSource::HandlerProperty
        })
        .is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SignalState {
    pub(crate) aborted: bool,
    pub(crate) reason: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct SignalRegistry {
    pub(crate) signals: HashMap<AbortSignal, SignalState>,
    pub(crate) next_signal_id: usize,
}

impl SignalRegistry {
    pub(crate) fn allocate(&mut self) -> AbortSignal {
        let signal = AbortSignal(self.next_signal_id);
        self.next_signal_id = self.next_signal_id.saturating_add(1);
        self.signals.insert(signal, SignalState::default());
        signal
    }

    pub(crate) fn is_aborted(&self, signal: AbortSignal) -> bool {
        self.signals
            .get(&signal)
            .is_some_and(|state| state.aborted)
    }
}

pub type TimerId = i64;

/// A scheduled callback. Runs with full access to the document.
#[derive(Clone)]
pub struct TimerHandler {
    inner: Rc<TimerFn>,
}

impl TimerHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Document) -> Result<()> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    pub(crate) fn call(&self, doc: &mut Document) -> Result<()> {
        (self.inner)(doc)
    }
}

impl fmt::Debug for TimerHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerHandler({:p})", Rc::as_ptr(&self.inner) as *const ())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: TimerId,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) callback: TimerHandler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
    pub interval_ms: Option<i64>,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: TimerId,
    pub(crate) next_task_order: i64,
    pub(crate) running_timer_id: Option<TimerId>,
    pub(crate) running_timer_canceled: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
            running_timer_id: None,
            running_timer_canceled: false,
        }
    }
}

impl SchedulerState {
    pub(crate) fn allocate_timer_id(&mut self) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    pub(crate) fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}
