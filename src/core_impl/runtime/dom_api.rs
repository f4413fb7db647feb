use super::*;

impl Document {
    /// Creates a detached element. Insert it with [`Document::append_child`]
    /// and friends; until then its propagation path starts at itself.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom.create_detached_element(tag.to_ascii_lowercase())
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.dom.create_detached_text(text.to_string())
    }

    /// Moves `child` (detaching it from any previous parent) to the end of
    /// `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.append_child(parent, child)
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.ensure_node(parent, "prepend")?;
        self.dom.prepend_child(parent, child)
    }

    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        self.dom.ensure_node(reference, "insertBefore")?;
        self.dom.insert_before(parent, child, reference)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.ensure_node(parent, "removeChild")?;
        self.dom.ensure_node(child, "removeChild")?;
        self.dom.remove_child(parent, child)
    }

    /// Detaches `node` from its parent. Listeners stay attached to it.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.dom.ensure_node(node, "remove")?;
        self.dom.remove_node(node)
    }

    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.dom.parent(node)
    }

    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.dom.parent_element(node)
    }

    /// Element children only.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.dom.child_elements(node)
    }

    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.dom.child_nodes(node)
    }

    pub fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.dom.child_elements(node).first().copied()
    }

    pub fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.dom.child_elements(node).last().copied()
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.dom.next_element_sibling(node)
    }

    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.dom.previous_element_sibling(node)
    }

    /// Inclusive: a node contains itself.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.dom.is_valid_node(node) && (ancestor == node || self.dom.is_descendant_of(node, ancestor))
    }

    pub fn text_content(&self, node: NodeId) -> Result<String> {
        self.dom.ensure_node(node, "textContent")?;
        Ok(self.dom.text_content(node))
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.dom.ensure_node(node, "textContent")?;
        self.dom.set_text_content(node, text)
    }

    pub fn inner_html(&self, node: NodeId) -> Result<String> {
        self.dom.ensure_node(node, "innerHTML")?;
        self.dom.inner_html(node)
    }

    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        self.dom.ensure_node(node, "innerHTML")?;
        self.dom.set_inner_html(node, html)
    }

    pub fn outer_html(&self, node: NodeId) -> Result<String> {
        self.dom.ensure_node(node, "outerHTML")?;
        self.dom.outer_html(node)
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.attr(node, name)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.dom.has_attr(node, name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.dom.ensure_node(node, "setAttribute")?;
        self.dom.set_attr(node, name, value)
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.dom.ensure_node(node, "removeAttribute")?;
        self.dom.remove_attr(node, name)
    }

    /// The `value` property. Starts out as the `value` attribute and
    /// diverges once written.
    pub fn value(&self, node: NodeId) -> Result<String> {
        self.dom.ensure_node(node, "value")?;
        self.dom.value(node)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.dom.ensure_node(node, "value")?;
        self.dom.set_value(node, value)
    }

    pub fn disabled(&self, node: NodeId) -> bool {
        self.dom.is_disabled(node)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.dom.ensure_node(node, "disabled")?;
        self.dom.set_disabled(node, disabled)
    }

    /// Upper-case tag name; `None` for text and document nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.dom.tag_name(node).map(str::to_ascii_uppercase)
    }

    pub fn class_list(&self, node: NodeId) -> Result<Vec<String>> {
        self.dom.ensure_node(node, "classList")?;
        self.dom.class_list(node)
    }

    pub fn class_add(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.ensure_node(node, "classList.add")?;
        self.dom.class_add(node, class_name)
    }

    pub fn class_remove(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.ensure_node(node, "classList.remove")?;
        self.dom.class_remove(node, class_name)
    }

    /// Returns whether the class is present afterwards.
    pub fn class_toggle(&mut self, node: NodeId, class_name: &str) -> Result<bool> {
        self.dom.ensure_node(node, "classList.toggle")?;
        self.dom.class_toggle(node, class_name)
    }

    pub fn class_contains(&self, node: NodeId, class_name: &str) -> Result<bool> {
        self.dom.ensure_node(node, "classList.contains")?;
        self.dom.class_contains(node, class_name)
    }

    /// Reads an inline style property by its camelCase name
    /// (`"backgroundColor"`). Missing properties read as `""`.
    pub fn style_get(&self, node: NodeId, prop: &str) -> Result<String> {
        self.dom.ensure_node(node, "style")?;
        self.dom.style_get(node, prop)
    }

    pub fn style_set(&mut self, node: NodeId, prop: &str, value: &str) -> Result<()> {
        self.dom.ensure_node(node, "style")?;
        self.dom.style_set(node, prop, value)
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }
}
