use super::*;

impl Document {
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    /// Matches in document order, without duplicates.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    pub fn query_selector_from(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.ensure_node(scope, "querySelector")?;
        self.dom.query_selector_from(scope, selector)
    }

    pub fn query_selector_all_from(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.ensure_node(scope, "querySelectorAll")?;
        self.dom.query_selector_all_from(scope, selector)
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool> {
        self.dom.ensure_node(node, "matches")?;
        self.dom.matches_selector(node, selector)
    }

    /// The nearest inclusive ancestor element matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.ensure_node(node, "closest")?;
        self.dom.closest(node, selector)
    }

    /// First match, or [`Error::SelectorNotFound`].
    pub fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }
}
