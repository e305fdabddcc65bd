use serde::{Deserialize, Serialize};

/// One bullet of the outline, with its nested bullets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(text: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        Self {
            text: text.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A non-blank line that did not start with a bullet marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLine {
    /// 1-based
    pub line_number: usize,
    pub content: String,
}

/// Parse result carrying the tree and the lines that were dropped from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutline {
    pub nodes: Vec<OutlineNode>,
    pub invalid_lines: Vec<InvalidLine>,
}

/// Replace `original` with `expansion`, then apply `nested` within the expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub original: String,
    pub expansion: String,
    #[serde(default)]
    pub nested: Vec<SubstitutionRule>,
}

/// Base text plus the ordered substitutions that telescope out of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatContent {
    pub text: String,
    #[serde(default)]
    pub rules: Vec<SubstitutionRule>,
}

impl FlatContent {
    /// Total number of rules, nested ones included.
    pub fn rule_count(&self) -> usize {
        count_rules(&self.rules)
    }
}

fn count_rules(rules: &[SubstitutionRule]) -> usize {
    let mut count = rules.len();
    for rule in rules {
        count += count_rules(&rule.nested);
    }
    count
}
