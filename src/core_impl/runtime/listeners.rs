use super::*;

impl Document {
    /// Registers `handler` under `name` so listeners can refer to it with
    /// [`Callback::Named`]. Redefining a name swaps the function every
    /// existing named listener calls.
    pub fn define_function(&mut self, name: &str, handler: EventHandler) {
        self.functions.insert(name.to_string(), handler);
    }

    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        kind: &str,
        callback: impl Into<Callback>,
        options: ListenerOptions,
    ) -> Result<()> {
        self.dom.ensure_node(target, "addEventListener")?;
        let callback = callback.into();
        if let Callback::Named(name) = &callback {
            if !self.functions.contains_key(name) {
                return Err(Error::InvalidHandler(name.clone()));
            }
        }

        if let Some(signal) = options.signal {
            if self.signals.is_aborted(signal) {
                self.trace_listener_line(format!(
                    "[listener] skip {kind} target={} signal={} already aborted",
                    self.trace_node_label(target),
                    signal.0
                ));
                return Ok(());
            }
        }

        let id = self.listeners.allocate_id();
        self.trace_listener_line(format!(
            "[listener] add {kind} target={} handler={} capture={} once={} passive={}",
            self.trace_node_label(target),
            callback.label(),
            options.capture,
            options.once,
            options.passive
        ));
        self.listeners.add(
            target,
            kind,
            Listener {
                id,
                capture: options.capture,
                once: options.once,
                passive: options.passive,
                signal: options.signal,
                callback,
                source: ListenerSource::AddEventListener,
            },
        );
        Ok(())
    }

    /// Removes the first listener matching target, kind, handler and phase.
    /// Returns `false` when nothing matched.
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        kind: &str,
        callback: impl Into<Callback>,
        capture: bool,
    ) -> bool {
        let callback = callback.into();
        let removed = self
            .listeners
            .remove(target, kind, capture, &callback)
            .is_some();
        self.trace_listener_line(format!(
            "[listener] remove {kind} target={} handler={} capture={capture} removed={removed}",
            self.trace_node_label(target),
            callback.label()
        ));
        removed
    }

    /// Sets or clears the `on<kind>` handler property of `target`.
    ///
    /// The property is one bubbling listener slot. Replacing the handler
    /// keeps the slot's position among the other listeners; clearing it
    /// removes the slot.
    pub fn set_event_handler(
        &mut self,
        target: NodeId,
        kind: &str,
        handler: Option<EventHandler>,
    ) -> Result<()> {
        self.dom.ensure_node(target, "event handler property")?;
        let label = self.trace_node_label(target);
        match handler {
            Some(handler) => {
                if self
                    .listeners
                    .replace_handler_property(target, kind, handler.clone())
                {
                    self.trace_listener_line(format!("[listener] on{kind} replace target={label}"));
                    return Ok(());
                }
                let id = self.listeners.allocate_id();
                self.listeners.add(
                    target,
                    kind,
                    Listener {
                        id,
                        capture: false,
                        once: false,
                        passive: false,
                        signal: None,
                        callback: Callback::Inline(handler),
                        source: ListenerSource::HandlerProperty,
                    },
                );
                self.trace_listener_line(format!("[listener] on{kind} set target={label}"));
            }
            None => {
                let removed = self.listeners.remove_handler_property(target, kind);
                self.trace_listener_line(format!(
                    "[listener] on{kind} clear target={label} removed={removed}"
                ));
            }
        }
        Ok(())
    }

    pub fn event_handler(&self, target: NodeId, kind: &str) -> Option<EventHandler> {
        match &self.listeners.handler_property(target, kind)?.callback {
            Callback::Inline(handler) => Some(handler.clone()),
            Callback::Named(name) => self.functions.get(name).cloned(),
        }
    }

    /// Number of live subscriptions for (target, kind), both phases.
    pub fn listener_count(&self, target: NodeId, kind: &str) -> usize {
        self.listeners.count(target, kind)
    }

    /// Every live subscription on `target`, in registration order.
    pub fn listeners(&self, target: NodeId) -> Vec<ListenerInfo> {
        self.listeners.infos(target)
    }

    pub(crate) fn resolve_callback(&self, callback: &Callback) -> Result<EventHandler> {
        match callback {
            Callback::Inline(handler) => Ok(handler.clone()),
            Callback::Named(name) => self
                .functions
                .get(name)
                .cloned()
                .ok_or_else(|| Error::InvalidHandler(name.clone())),
        }
    }
}
