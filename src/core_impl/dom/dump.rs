use super::*;

impl Dom {
    /// Serializes a node as HTML with attributes in name order.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(node_id, &mut out);
        out
    }

    fn dump_into(&self, node_id: NodeId, out: &mut String) {
        let node = &self.nodes[node_id.0];
        let element = match &node.node_type {
            NodeType::Document => {
                for child in &node.children {
                    self.dump_into(*child, out);
                }
                return;
            }
            NodeType::Text(text) => {
                out.push_str(&escape_html_text_for_serialization(text));
                return;
            }
            NodeType::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag_name);
        let mut attrs = element.attrs.iter().collect::<Vec<_>>();
        attrs.sort_by(|(left, _), (right, _)| left.cmp(right));
        for (name, value) in attrs {
            out.push_str(&format!(
                " {name}=\"{}\"",
                escape_html_attr_for_serialization(value)
            ));
        }
        out.push('>');
        if is_void_tag(&element.tag_name) {
            return;
        }

        let raw_text = matches!(element.tag_name.as_str(), "script" | "style");
        for child in &node.children {
            match &self.nodes[child.0].node_type {
                NodeType::Text(text) if raw_text => out.push_str(text),
                _ => self.dump_into(*child, out),
            }
        }
        out.push_str(&format!("</{}>", element.tag_name));
    }

    /// Short description of a node for assertion messages.
    pub(crate) fn snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dump_node(node_id), 200)
    }
}
