//! Display tree produced by the renderer and applied by a host.

use serde::Serialize;

use crate::domain::element::Element;

/// Horizontal alignment of a node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
}

/// One display node: a class list, optional text and children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Node {
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub align: Align,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Self::default()
        }
    }

    pub fn text(class: &str, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(class)
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Replace the node's element marker.
    ///
    /// Any previous element class is removed first; `None` leaves the node
    /// unclassified.
    pub fn set_element(&mut self, element: Option<Element>) {
        self.classes
            .retain(|class| Element::from_css_class(class).is_none());
        if let Some(element) = element {
            self.classes.push(element.css_class().to_string());
        }
    }

    pub fn element(&self) -> Option<Element> {
        self.classes
            .iter()
            .find_map(|class| Element::from_css_class(class))
    }

    /// Text of this node and all descendants, depth first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First direct child carrying `class`.
    pub fn child(&self, class: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.has_class(class))
    }
}

/// A rendered result panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Tree {
    pub root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// The date strip, if rendered.
    pub fn ganzhi(&self) -> Option<&Node> {
        self.root.child("ganzhi-info")
    }

    /// Rows in display order (header first).
    pub fn rows(&self) -> impl Iterator<Item = &Node> {
        self.root.children.iter().filter(|n| n.has_class("row"))
    }
}
