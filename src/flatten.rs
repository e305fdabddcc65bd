//! Linearizes an outline tree into base text plus substitution rules.
//!
//! Rules come out in the same order as their `original` texts appear in the
//! joined parent text. A renderer that replaces the leftmost remaining
//! occurrence of each rule in turn therefore always finds an occurrence to
//! consume, even when the same words occur more than once.

use crate::outline::{FlatContent, OutlineNode, SubstitutionRule};
use crate::parser;

/// Separator used to join sibling texts when none is configured.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Flatten root-level nodes into a single substitution record.
pub fn flatten(nodes: &[OutlineNode], separator: &str) -> FlatContent {
    FlatContent {
        text: join_texts(nodes, separator),
        rules: rules_for(nodes, separator),
    }
}

/// Parse an outline and flatten it in one step.
pub fn parse_and_flatten(raw: &str, separator: &str) -> FlatContent {
    flatten(&parser::parse(raw), separator)
}

fn join_texts(nodes: &[OutlineNode], separator: &str) -> String {
    nodes
        .iter()
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

fn rules_for(nodes: &[OutlineNode], separator: &str) -> Vec<SubstitutionRule> {
    nodes
        .iter()
        .filter(|node| !node.is_leaf())
        .map(|node| SubstitutionRule {
            original: node.text.clone(),
            expansion: join_texts(&node.children, separator),
            nested: rules_for(&node.children, separator),
        })
        .collect()
}
