//! Indented text rendering of a filter tree for diagnostics.

use crate::ast::{
    literal::Literal,
    node::{FilterNode, FilterValue},
};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Renders `node` and its descendants, starting at indentation `level`.
///
/// Conditions print as `Property: <path>, Filter: <op>, Value: <value>` and
/// groups as `Operator: <combinator>, Not: <negated>`. Every line ends with a
/// newline; each nesting level adds two spaces. A quantifier's sub-filter is
/// printed beneath its condition, one level deeper.
pub fn print(node: &FilterNode, level: usize) -> String {
    Indented { node, level }.to_string()
}

/// A node rendered at a fixed indentation level
struct Indented<'a> {
    node: &'a FilterNode,
    level: usize,
}

impl fmt::Display for Indented<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.node, self.level)
    }
}

fn write_node<W: Write>(out: &mut W, node: &FilterNode, level: usize) -> fmt::Result {
    let indent = INDENT.repeat(level);

    match node {
        FilterNode::Condition(condition) => {
            let value = match &condition.value {
                Some(FilterValue::Literal(literal)) => render_value(literal),
                Some(FilterValue::Filter(_)) => "<filter>".to_string(),
                None => "null".to_string(),
            };
            writeln!(
                out,
                "{indent}Property: {}, Filter: {}, Value: {}",
                condition.path, condition.operator, value
            )?;

            if let Some(FilterValue::Filter(body)) = &condition.value {
                write_node(out, body, level + 1)?;
            }
        }
        FilterNode::Group(group) => {
            writeln!(
                out,
                "{indent}Operator: {}, Not: {}",
                group.combinator, group.negated
            )?;
            for child in &group.children {
                write_node(out, child, level + 1)?;
            }
        }
    }

    Ok(())
}

/// Strings are quoted, lists are bracketed and comma-joined with their
/// elements in plain form, everything else is plain text.
fn render_value(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => format!("\"{s}\""),
        Literal::List(items) => {
            let elements = items.iter().map(render_plain).collect::<Vec<_>>();
            format!("[{}]", elements.join(", "))
        }
        other => render_plain(other),
    }
}

fn render_plain(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => s.clone(),
        Literal::List(_) => render_value(literal),
        other => other.to_string(),
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}
