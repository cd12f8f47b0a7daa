//! Host emitters: apply a rendered [`Tree`] to an output medium.

use std::fmt::Write as _;

use clap::ValueEnum;
use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Align, Element, Node, Tree};
use crate::infrastructure::{InfraError, InfraResult};

/// Output medium for a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured terminal text
    #[default]
    Text,
    /// HTML fragment with element classes
    Html,
    /// JSON dump of the tree
    Json,
    /// Indented outline of nodes and classes
    Tree,
}

pub trait Emitter {
    fn emit(&self, tree: &Tree) -> InfraResult<String>;
}

pub fn emitter_for(format: OutputFormat) -> Box<dyn Emitter> {
    match format {
        OutputFormat::Text => Box::new(TerminalEmitter),
        OutputFormat::Html => Box::new(HtmlEmitter),
        OutputFormat::Json => Box::new(JsonEmitter),
        OutputFormat::Tree => Box::new(TreeEmitter),
    }
}

/// Terminal colour of an element.
pub fn element_color(element: Element) -> Color {
    match element {
        Element::Wood => Color::Green,
        Element::Fire => Color::Red,
        Element::Earth => Color::TrueColor {
            r: 139,
            g: 69,
            b: 19,
        },
        Element::Metal => Color::Yellow,
        Element::Water => Color::Blue,
    }
}

fn paint(text: &str, element: Option<Element>) -> ColoredString {
    match element {
        Some(element) => text.color(element_color(element)),
        None => text.normal(),
    }
}

// ============================================================
// Terminal
// ============================================================

/// Side-by-side text rows, coloured per column.
#[derive(Debug, Default)]
pub struct TerminalEmitter;

impl TerminalEmitter {
    fn column_plain(column: &Node) -> String {
        if column.children.is_empty() {
            return column.text.clone().unwrap_or_default();
        }
        column
            .children
            .iter()
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Terminal cells taken by the column; CJK glyphs count double.
    fn display_width(column: &Node) -> usize {
        UnicodeWidthStr::width(Self::column_plain(column).as_str())
    }

    /// Spaces before and after a column to fill `width` cells.
    fn padding(column: &Node, width: usize) -> (usize, usize) {
        let pad = width.saturating_sub(Self::display_width(column));
        match column.align {
            Align::Center => (pad / 2, pad - pad / 2),
            Align::Start => (0, pad),
        }
    }

    fn column_painted(column: &Node) -> String {
        let element = column.element();
        if column.children.is_empty() {
            return paint(column.text.as_deref().unwrap_or_default(), element).to_string();
        }
        column
            .children
            .iter()
            .filter_map(|child| {
                let text = child.text.as_deref()?;
                let painted = if child.has_class("role") {
                    paint(text, element).bold()
                } else if child.has_class("relation") {
                    paint(text, element).italic()
                } else {
                    paint(text, element)
                };
                Some(painted.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Emitter for TerminalEmitter {
    fn emit(&self, tree: &Tree) -> InfraResult<String> {
        let mut out = String::new();

        if let Some(strip) = tree.ganzhi() {
            let fields: Vec<String> = strip
                .children
                .iter()
                .map(|n| paint(n.text.as_deref().unwrap_or_default(), n.element()).to_string())
                .collect();
            out.push_str(&fields.join(" "));
            out.push('\n');
        }

        let rows: Vec<&Node> = tree.rows().collect();
        let column_width = |index: usize| {
            rows.iter()
                .filter_map(|r| r.children.get(index))
                .map(Self::display_width)
                .max()
                .unwrap_or(0)
        };
        let (zheng_width, bian_width) = (column_width(0), column_width(1));

        for row in rows {
            let mut columns = row.children.iter();
            let (Some(zheng), bian) = (columns.next(), columns.next()) else {
                continue;
            };
            let (lead, trail) = Self::padding(zheng, zheng_width);
            let _ = write!(
                out,
                "{}{}{}    ",
                " ".repeat(lead),
                Self::column_painted(zheng),
                " ".repeat(trail)
            );
            if let Some(bian) = bian {
                // no trailing fill on the last column
                let (lead, _) = Self::padding(bian, bian_width);
                let _ = write!(out, "{}{}", " ".repeat(lead), Self::column_painted(bian));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

// ============================================================
// HTML
// ============================================================

/// `<div>` per node, element classes preserved for the page's stylesheet.
#[derive(Debug, Default)]
pub struct HtmlEmitter;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn write_html(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<div class=\"{}\"", escape_html(&node.classes.join(" ")));
    if node.align == Align::Center {
        out.push_str(" style=\"text-align: center\"");
    }
    out.push('>');
    if let Some(text) = &node.text {
        out.push_str(&escape_html(text));
    }
    if node.children.is_empty() {
        out.push_str("</div>\n");
        return;
    }
    out.push('\n');
    for child in &node.children {
        write_html(child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</div>");
}

impl Emitter for HtmlEmitter {
    fn emit(&self, tree: &Tree) -> InfraResult<String> {
        let mut out = String::new();
        write_html(&tree.root, 0, &mut out);
        Ok(out)
    }
}

// ============================================================
// JSON / outline
// ============================================================

#[derive(Debug, Default)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit(&self, tree: &Tree) -> InfraResult<String> {
        serde_json::to_string_pretty(tree).map_err(|e| InfraError::Emit {
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct TreeEmitter;

fn outline(node: &Node) -> termtree::Tree<String> {
    let label = match &node.text {
        Some(text) => format!("[{}] {}", node.classes.join(" "), text),
        None => format!("[{}]", node.classes.join(" ")),
    };
    termtree::Tree::new(label).with_leaves(node.children.iter().map(outline))
}

impl Emitter for TreeEmitter {
    fn emit(&self, tree: &Tree) -> InfraResult<String> {
        Ok(outline(&tree.root).to_string())
    }
}
