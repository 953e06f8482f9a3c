//! Light-DOM children supplied to a widget.
//!
//! Widgets that accept composed content (navbar links, accordion panels, modal
//! decorations) read it from a tree of [`ChildNode`]s. Children carrying a
//! `slot` attribute are assigned to that named slot; the rest belong to the
//! default slot.

use std::collections::BTreeMap;

/// One element of supplied child content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<ChildNode>,
}

impl ChildNode {
    /// An element with the given tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Assign the node to a named slot.
    pub fn slot(self, name: impl Into<String>) -> Self {
        self.attr("slot", name)
    }

    /// Set the node's own text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child.
    pub fn child(mut self, child: ChildNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = ChildNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Child elements.
    pub fn child_nodes(&self) -> &[ChildNode] {
        &self.children
    }

    /// The slot this node is assigned to, if any.
    pub fn slot_name(&self) -> Option<&str> {
        self.attribute("slot")
    }

    /// Concatenated text of the node and its descendants, trimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    fn descendants_or_self<'a>(&'a self, out: &mut Vec<&'a ChildNode>) {
        out.push(self);
        for child in &self.children {
            child.descendants_or_self(out);
        }
    }
}

/// Elements inside slot `slot` matching `predicate`, in document order.
///
/// Matches `[slot="name"] tag` as well as a slotted element that itself
/// matches.
pub fn slotted<'a, F>(children: &'a [ChildNode], slot: &str, predicate: F) -> Vec<&'a ChildNode>
where
    F: Fn(&ChildNode) -> bool,
{
    let mut all = Vec::new();
    for child in children.iter().filter(|c| c.slot_name() == Some(slot)) {
        child.descendants_or_self(&mut all);
    }
    all.into_iter().filter(|node| predicate(node)).collect()
}

/// Top-level children with the given tag.
pub fn children_with_tag<'a>(children: &'a [ChildNode], tag: &str) -> Vec<&'a ChildNode> {
    children
        .iter()
        .filter(|child| child.tag.eq_ignore_ascii_case(tag))
        .collect()
}
