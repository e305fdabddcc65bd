use tracing::{debug, instrument, warn};

use crate::outline::{InvalidLine, OutlineNode, ParsedOutline};

const BULLET_MARKERS: [char; 3] = ['*', '-', '+'];

/// Strip a UTF-8 byte order mark, which `trim` would otherwise leave in place
fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Parse an indented bullet outline into its root-level nodes
pub fn parse(raw: &str) -> Vec<OutlineNode> {
    parse_outline(raw).nodes
}

/// Parse an indented bullet outline, keeping the lines that were not bullets
#[instrument(level = "debug", skip(raw), fields(bytes = raw.len()))]
pub fn parse_outline(raw: &str) -> ParsedOutline {
    let raw = strip_bom(raw);
    let mut state = ParseState::default();

    for (index, line) in raw.split('\n').enumerate() {
        match classify_line(line) {
            Line::Blank => {}
            Line::Invalid => {
                warn!(line_number = index + 1, "Invalid line found! {}", line.trim_end());
                state.invalid_lines.push(InvalidLine {
                    line_number: index + 1,
                    content: line.trim_end_matches('\r').to_string(),
                });
            }
            Line::Bullet { depth, text } => state.push_bullet(depth, text),
        }
    }

    state.finish()
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Invalid,
    Bullet { depth: usize, text: &'a str },
}

fn classify_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }

    let Some(rest) = trimmed.strip_prefix(&BULLET_MARKERS[..]) else {
        return Line::Invalid;
    };

    // Column offset of the marker; tabs count as one column
    let depth = line.chars().take_while(|c| c.is_whitespace()).count();

    Line::Bullet {
        depth,
        text: rest.trim_start(),
    }
}

/// A bullet still accepting children
struct Frame {
    depth: usize,
    node: OutlineNode,
}

#[derive(Default)]
struct ParseState {
    roots: Vec<OutlineNode>,
    // Open bullets, shallowest first. Each frame nests under the one below it.
    stack: Vec<Frame>,
    base_depth: Option<usize>,
    invalid_lines: Vec<InvalidLine>,
}

impl ParseState {
    fn push_bullet(&mut self, depth: usize, text: &str) {
        let base = *self.base_depth.get_or_insert(depth);
        if depth < base {
            debug!(depth, base, "bullet shallower than the first bullet, placing at root level");
        }
        let depth = depth.max(base);

        while self.stack.last().is_some_and(|top| top.depth >= depth) {
            self.close_top();
        }

        if let Some(parent) = self.stack.last() {
            debug!(depth, parent_depth = parent.depth, parent = %parent.node.text, "nesting bullet");
        }

        self.stack.push(Frame {
            depth,
            node: OutlineNode::new(text),
        });
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.node.children.push(frame.node),
                None => self.roots.push(frame.node),
            }
        }
    }

    fn finish(mut self) -> ParsedOutline {
        while !self.stack.is_empty() {
            self.close_top();
        }
        ParsedOutline {
            nodes: self.roots,
            invalid_lines: self.invalid_lines,
        }
    }
}
