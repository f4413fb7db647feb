use super::*;

impl Document {
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    /// Clicks like a user would: nothing happens on a disabled control, and
    /// an unprevented click inside `<a href>` records a navigation.
    pub fn click_node(&mut self, target: NodeId) -> Result<()> {
        self.dom.ensure_node(target, "click")?;
        if self.dom.is_disabled(target) {
            self.trace_event_line(format!(
                "[event] click skipped target={} disabled",
                self.trace_node_label(target)
            ));
            return Ok(());
        }

        stacker::grow(STACK_RED_ZONE, || {
            let outcome = self.dispatch_trusted(target, "click")?;
            if outcome.default_prevented {
                return Ok(());
            }
            if let Some(href) = self.link_href(target) {
                self.trace_event_line(format!("[event] navigate href={href}"));
                self.navigations.push(href);
            }
            Ok(())
        })
    }

    fn link_href(&self, target: NodeId) -> Option<String> {
        let anchor = self.dom.closest(target, "a[href]").ok().flatten()?;
        self.dom.attr(anchor, "href")
    }

    /// Replaces the value of an `<input>` or `<textarea>` and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self.dom.tag_name(target).unwrap_or_default().to_string();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        if self.dom.is_disabled(target) {
            return Ok(());
        }

        stacker::grow(STACK_RED_ZONE, || {
            self.dom.set_value(target, text)?;
            self.dispatch_trusted(target, "input")?;
            Ok(())
        })
    }

    /// Fires a trusted, bubbling event of `kind` at the first match.
    pub fn dispatch(&mut self, selector: &str, kind: &str) -> Result<Event> {
        let target = self.select_one(selector)?;
        self.dispatch_trusted(target, kind)
    }

    /// Hrefs followed by clicks since the last call.
    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.navigations)
    }
}
