use super::*;

impl Document {
    pub fn create_abort_controller(&mut self) -> AbortController {
        AbortController {
            signal: self.signals.allocate(),
        }
    }

    /// Aborts the controller's signal and drops every listener registered
    /// with it, on any node and for any event kind. Returns how many
    /// listeners were removed; a second call removes nothing.
    ///
    /// Handlers already running finish normally. Listeners from this
    /// signal that were queued later in the same dispatch do not run.
    pub fn abort(&mut self, controller: &AbortController, reason: Option<&str>) -> usize {
        let signal = controller.signal;
        let Some(state) = self.signals.signals.get_mut(&signal) else {
            return 0;
        };
        if state.aborted {
            return 0;
        }
        state.aborted = true;
        state.reason = Some(reason.unwrap_or("AbortError").to_string());

        let removed = self.listeners.remove_with_signal(signal);
        self.trace_listener_line(format!(
            "[abort] signal={} reason={} removed={removed}",
            signal.0,
            reason.unwrap_or("AbortError")
        ));
        removed
    }

    pub fn signal_aborted(&self, signal: AbortSignal) -> bool {
        self.signals.is_aborted(signal)
    }

    /// `"AbortError"` when aborted without a reason; `None` while live.
    pub fn abort_reason(&self, signal: AbortSignal) -> Option<String> {
        self.signals
            .signals
            .get(&signal)
            .and_then(|state| state.reason.clone())
    }
}
