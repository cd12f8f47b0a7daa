//! Result renderer: `DivinationResult -> Tree`
//!
//! Layout, top to bottom:
//! - `ganzhi-info` strip with one `ganzhi` node per year/month/day/hour field,
//!   each coloured by its branch glyph
//! - `row header`: hexagram names, centered, never coloured
//! - `row line` x N: 上爻 first, 初爻 last; `zheng` and `bian` columns coloured
//!   independently

use tracing::trace;

use crate::domain::element::ClassifyMode;
use crate::domain::entities::{ganzhi_element, DivinationResult, GanzhiSet, HexagramLine, LineRole};
use crate::domain::tree::{Align, Node, Tree};

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    mode: ClassifyMode,
}

impl Renderer {
    pub fn new(mode: ClassifyMode) -> Self {
        Self { mode }
    }

    pub fn render(&self, result: &DivinationResult) -> Tree {
        let mut root = Node::new("gua-diagram");
        root.push(render_ganzhi(&result.ganzhi));

        if let Some(header) = result.header() {
            root.push(render_header(header));
        }
        for line in result.line_rows().iter().rev() {
            root.push(self.render_line(line));
        }
        trace!(rows = result.lines.len(), "rendered result");
        Tree::new(root)
    }

    fn render_line(&self, line: &HexagramLine) -> Node {
        let mut row = Node::new("row");
        row.add_class("line");
        row.push(self.render_column("zheng", &line.text, line.role, &line.relation));
        row.push(self.render_column("bian", &line.bian_text, LineRole::None, &line.bian_relation));
        row
    }

    fn render_column(&self, side: &str, text: &str, role: LineRole, relation: &str) -> Node {
        let mut column = Node::new("column");
        column.add_class(side);
        column.push(Node::text("text", text));
        if let (Some(marker), Some(class)) = (role.marker(), role.css_class()) {
            let mut node = Node::text("role", marker.to_string());
            node.add_class(class);
            column.push(node);
        }
        if !relation.is_empty() {
            column.push(Node::text("relation", relation));
        }
        column.set_element(self.mode.classify(text));
        column
    }
}

fn render_ganzhi(ganzhi: &GanzhiSet) -> Node {
    let mut strip = Node::new("ganzhi-info");
    for (value, unit) in ganzhi.fields() {
        let mut node = Node::text("ganzhi", format!("{value}{unit}"));
        node.set_element(ganzhi_element(value));
        strip.push(node);
    }
    strip
}

fn render_header(header: &HexagramLine) -> Node {
    let mut row = Node::new("row");
    row.add_class("header");
    for (side, text) in [("zheng", &header.text), ("bian", &header.bian_text)] {
        let mut column = Node::text("column", text.as_str()).with_align(Align::Center);
        column.add_class(side);
        row.push(column);
    }
    row
}
