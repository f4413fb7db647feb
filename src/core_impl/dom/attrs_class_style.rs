use super::*;

fn not_an_element(what: &str) -> Error {
    Error::Runtime(format!("{what} target is not an element"))
}

impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.attrs.contains_key(&name.to_ascii_lowercase()))
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| not_an_element("setAttribute"))?;
        element.attrs.insert(name.clone(), value.to_string());
        if name == "value" && !element.value_dirty {
            element.value = value.to_string();
        }
        if name == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| not_an_element("removeAttribute"))?;
        element.attrs.remove(&name);
        if name == "value" && !element.value_dirty {
            element.value.clear();
        }
        if name == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self.element(node_id).ok_or_else(|| not_an_element("value"))?;
        if element.tag_name == "textarea" && !element.value_dirty {
            return Ok(self.text_content(node_id));
        }
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| not_an_element("value"))?;
        element.value = value.to_string();
        element.value_dirty = true;
        Ok(())
    }

    /// Only form controls can be disabled.
    pub(crate) fn is_disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|element| {
            is_form_control_tag(&element.tag_name) && element.attrs.contains_key("disabled")
        })
    }

    pub(crate) fn set_disabled(&mut self, node_id: NodeId, disabled: bool) -> Result<()> {
        if disabled {
            self.set_attr(node_id, "disabled", "")
        } else {
            self.remove_attr(node_id, "disabled")
        }
    }

    pub(crate) fn class_list(&self, node_id: NodeId) -> Result<Vec<String>> {
        let element = self.element(node_id).ok_or_else(|| not_an_element("classList"))?;
        Ok(class_tokens(element.attrs.get("class").map(String::as_str)))
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self.element(node_id).ok_or_else(|| not_an_element("classList"))?;
        Ok(has_class(element, class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        self.update_classes(node_id, |classes| {
            if !classes.iter().any(|name| name == class_name) {
                classes.push(class_name.to_string());
            }
        })
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        self.update_classes(node_id, |classes| classes.retain(|name| name != class_name))
    }

    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str) -> Result<bool> {
        if self.class_contains(node_id, class_name)? {
            self.class_remove(node_id, class_name)?;
            Ok(false)
        } else {
            self.class_add(node_id, class_name)?;
            Ok(true)
        }
    }

    fn update_classes(&mut self, node_id: NodeId, edit: impl FnOnce(&mut Vec<String>)) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| not_an_element("classList"))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        edit(&mut classes);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, prop: &str) -> Result<String> {
        let element = self.element(node_id).ok_or_else(|| not_an_element("style"))?;
        let css_name = js_prop_to_css_name(prop);
        Ok(
            parse_style_declarations(element.attrs.get("style").map(String::as_str))
                .into_iter()
                .find(|(name, _)| *name == css_name)
                .map(|(_, value)| value)
                .unwrap_or_default(),
        )
    }

    /// An empty value removes the declaration.
    pub(crate) fn style_set(&mut self, node_id: NodeId, prop: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| not_an_element("style"))?;
        let css_name = js_prop_to_css_name(prop);
        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if value.is_empty() {
            decls.retain(|(name, _)| *name != css_name);
        } else if let Some(pos) = decls.iter().position(|(name, _)| *name == css_name) {
            decls[pos].1 = value.to_string();
        } else {
            decls.push((css_name, value.to_string()));
        }

        if decls.is_empty() {
            element.attrs.remove("style");
        } else {
            element
                .attrs
                .insert("style".to_string(), serialize_style_declarations(&decls));
        }
        Ok(())
    }
}
