use super::*;

impl Document {
    /// Current virtual time in milliseconds. Starts at 0 and only moves
    /// through the `advance_*`, `run_next_timer` and `flush` calls.
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    /// Runs `callback` once after `delay_ms` of virtual time. Negative
    /// delays count as 0.
    pub fn set_timeout(&mut self, delay_ms: i64, callback: TimerHandler) -> TimerId {
        self.schedule_task(delay_ms, None, callback)
    }

    /// Runs `callback` every `interval_ms` until the timer is cleared.
    pub fn set_interval(&mut self, interval_ms: i64, callback: TimerHandler) -> TimerId {
        let interval_ms = interval_ms.max(0);
        self.schedule_task(interval_ms, Some(interval_ms), callback)
    }

    /// Dispatches `event` at `target` after `delay_ms`.
    pub fn dispatch_later(&mut self, target: NodeId, event: Event, delay_ms: i64) -> Result<TimerId> {
        self.dom.ensure_node(target, "dispatch_later")?;
        Ok(self.set_timeout(
            delay_ms,
            TimerHandler::new(move |doc| doc.dispatch_event(target, event.clone()).map(|_| ())),
        ))
    }

    fn schedule_task(
        &mut self,
        delay_ms: i64,
        interval_ms: Option<i64>,
        callback: TimerHandler,
    ) -> TimerId {
        let delay_ms = delay_ms.max(0);
        let id = self.scheduler.allocate_timer_id();
        let order = self.scheduler.allocate_task_order();
        let due_at = self.scheduler.now_ms.saturating_add(delay_ms);
        self.scheduler.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            interval_ms,
            callback,
        });
        self.trace_timer_line(format!(
            "[timer] schedule id={id} due_at={due_at} delay_ms={delay_ms} interval_ms={}",
            interval_ms.map_or_else(|| "none".to_string(), |value| value.to_string())
        ));
        id
    }

    /// Cancels a pending timer, or stops an interval from inside its own
    /// callback. Returns whether the id was known.
    pub fn clear_timer(&mut self, timer_id: TimerId) -> bool {
        let running = self.scheduler.running_timer_id == Some(timer_id);
        if running {
            self.scheduler.running_timer_canceled = true;
        }
        let before = self.scheduler.task_queue.len();
        self.scheduler.task_queue.retain(|task| task.id != timer_id);
        let existed = running || self.scheduler.task_queue.len() != before;
        self.trace_timer_line(format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        if self.scheduler.running_timer_id.is_some() {
            self.scheduler.running_timer_canceled = true;
        }
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    /// Queued timers ordered by `(due_at, order)`.
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .scheduler
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target_ms = self.scheduler.now_ms.saturating_add(delta_ms);
        self.advance_time_to(target_ms)
    }

    /// Moves the clock to `target_ms`, running every timer that falls due
    /// on the way at its own due time.
    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(Some(target_ms))?;
        // A callback may already have moved the clock past the target.
        self.scheduler.now_ms = self.scheduler.now_ms.max(target_ms);
        self.trace_timer_line(format!(
            "[timer] advance from={from} to={target_ms} ran={ran}"
        ));
        Ok(())
    }

    /// Runs the timers already due at the current time. The clock does not move.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms))?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(ran)
    }

    /// Runs the earliest pending timer, jumping the clock forward to it.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.scheduler.task_queue.remove(next_idx);
        self.scheduler.now_ms = self.scheduler.now_ms.max(task.due_at);
        self.execute_timer_task(task)?;
        Ok(true)
    }

    /// Runs timers until the queue is empty, advancing the clock as it goes.
    /// Fails once more than the timer step limit have run, which catches
    /// intervals nobody clears.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            self.scheduler.now_ms = self.scheduler.now_ms.max(task.due_at);
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let next_task = self
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| format!("id={},due_at={}", task.id, task.due_at))
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "timer queue exceeded max steps (possible uncleared interval): limit={}, steps={steps}, now_ms={}, pending={}, next={next_task}",
            self.scheduler.timer_step_limit,
            self.scheduler.now_ms,
            self.scheduler.task_queue.len(),
        ))
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.scheduler
            .task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        stacker::grow(STACK_RED_ZONE, || self.execute_timer_task_impl(task))
    }

    fn execute_timer_task_impl(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} now_ms={}",
            task.id, task.due_at, self.scheduler.now_ms
        ));

        // Callbacks may run timers themselves; the outer timer's state comes back afterwards.
        let outer = (
            self.scheduler.running_timer_id.replace(task.id),
            std::mem::replace(&mut self.scheduler.running_timer_canceled, false),
        );
        let result = task.callback.call(self);
        let canceled = self.scheduler.running_timer_canceled;
        (
            self.scheduler.running_timer_id,
            self.scheduler.running_timer_canceled,
        ) = outer;
        result?;

        if let Some(interval_ms) = task.interval_ms {
            if !canceled {
                let due_at = task.due_at.saturating_add(interval_ms);
                let order = self.scheduler.allocate_task_order();
                self.trace_timer_line(format!(
                    "[timer] requeue id={} due_at={due_at} interval_ms={interval_ms}",
                    task.id
                ));
                self.scheduler.task_queue.push(ScheduledTask {
                    id: task.id,
                    due_at,
                    order,
                    interval_ms: Some(interval_ms),
                    callback: task.callback,
                });
            }
        }
        Ok(())
    }
}
