use super::*;

enum Flow {
    Continue,
    Stopped,
}

impl Document {
    /// Dispatches `event` at `target` and returns it once every phase ran.
    ///
    /// Capture listeners run from the root down to the target (the
    /// target's own capture listeners included), then the target's bubble
    /// listeners, then, if the event bubbles, the bubble listeners of each
    /// ancestor back up to the root. An error returned by a handler aborts
    /// the dispatch and is passed through.
    pub fn dispatch_event(&mut self, target: NodeId, event: Event) -> Result<Event> {
        self.dom.ensure_node(target, "dispatchEvent")?;
        stacker::grow(STACK_RED_ZONE, || self.dispatch_prepared_event(target, event))
    }

    pub(crate) fn dispatch_trusted(&mut self, target: NodeId, kind: &str) -> Result<Event> {
        self.dispatch_event(target, Event::trusted(kind))
    }

    fn dispatch_prepared_event(&mut self, target: NodeId, mut event: Event) -> Result<Event> {
        let path = self.dom.propagation_path(target);
        event.target = Some(target);
        event.path = path.clone();
        event.time_stamp_ms = self.scheduler.now_ms;
        event.propagation_stopped = false;
        event.immediate_propagation_stopped = false;
        self.trace_event_line(format!(
            "[event] dispatch {} target={} path_len={} bubbles={} cancelable={}",
            event.kind,
            self.trace_node_label(target),
            path.len(),
            event.bubbles,
            event.cancelable
        ));

        let outcome = match self.run_phases(target, &path, &mut event) {
            Ok(Flow::Continue) => "completed",
            Ok(Flow::Stopped) => "propagation_stopped",
            Err(err) => {
                self.trace_event_done(&event, "error");
                event.phase = EventPhase::None;
                event.current_target = None;
                return Err(err);
            }
        };
        self.trace_event_done(&event, outcome);
        event.phase = EventPhase::None;
        event.current_target = None;
        Ok(event)
    }

    fn run_phases(&mut self, target: NodeId, path: &[NodeId], event: &mut Event) -> Result<Flow> {
        let ancestors = &path[..path.len().saturating_sub(1)];

        for node in ancestors {
            if let Flow::Stopped = self.visit(*node, EventPhase::Capturing, true, event)? {
                return Ok(Flow::Stopped);
            }
        }

        if let Flow::Stopped = self.visit(target, EventPhase::AtTarget, true, event)? {
            return Ok(Flow::Stopped);
        }
        if let Flow::Stopped = self.visit(target, EventPhase::AtTarget, false, event)? {
            return Ok(Flow::Stopped);
        }

        if event.bubbles {
            for node in ancestors.iter().rev() {
                if let Flow::Stopped = self.visit(*node, EventPhase::Bubbling, false, event)? {
                    return Ok(Flow::Stopped);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn visit(
        &mut self,
        node: NodeId,
        phase: EventPhase,
        capture: bool,
        event: &mut Event,
    ) -> Result<Flow> {
        event.phase = phase;
        event.current_target = Some(node);
        self.invoke_listeners(node, event, capture)?;
        if event.propagation_stopped {
            Ok(Flow::Stopped)
        } else {
            Ok(Flow::Continue)
        }
    }

    // Runs a snapshot of the node's listeners. Entries removed since the
    // snapshot was taken are skipped; entries added since are not seen.
    fn invoke_listeners(&mut self, node: NodeId, event: &mut Event, capture: bool) -> Result<()> {
        let kind = event.kind.clone();
        let snapshot = self.listeners.get(node, &kind, capture);
        for listener in snapshot {
            if !self.listeners.contains(node, &kind, listener.id) {
                continue;
            }
            if listener.once {
                self.listeners.remove_by_id(node, &kind, listener.id);
            }
            let handler = self.resolve_callback(&listener.callback)?;

            if self.trace_state.enabled {
                let target_label = event
                    .target
                    .map(|target| self.trace_node_label(target))
                    .unwrap_or_default();
                self.trace_event_line(format!(
                    "[event] {kind} target={target_label} current={} phase={} handler={} passive={} default_prevented={}",
                    self.trace_node_label(node),
                    event.phase.as_str(),
                    listener.callback.label(),
                    listener.passive,
                    event.default_prevented
                ));
            }

            handler.call(self, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn trace_event_done(&mut self, event: &Event, outcome: &str) {
        if !self.trace_state.enabled {
            return;
        }
        let target_label = event
            .target
            .map(|target| self.trace_node_label(target))
            .unwrap_or_default();
        self.trace_event_line(format!(
            "[event] done {} target={} outcome={} default_prevented={} propagation_stopped={} immediate_stopped={}",
            event.kind,
            target_label,
            outcome,
            event.default_prevented,
            event.propagation_stopped,
            event.immediate_propagation_stopped
        ));
    }
}
