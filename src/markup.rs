use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::config::TextMode;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    Link { url: String, content: Vec<Span> },
    LineBreak,
}

/// Write a text fragment as HTML, interpreted according to `mode`.
pub fn render_fragment(text: &str, mode: TextMode, out: &mut String) {
    match mode {
        TextMode::Text => escape_html(text, out),
        TextMode::Html => out.push_str(text),
        TextMode::Markdown => spans_to_html(&parse_inline(text), out),
    }
}

/// Parse inline markdown into spans.
///
/// Fragments are usually slices between two substitutions, so the
/// surrounding whitespace is significant and is kept as plain text instead of
/// being swallowed by the paragraph parser.
///
/// Only inline syntax is interpreted. Source consumed by block syntax (list
/// and heading markers, `>`, rules, link reference definitions) is kept as
/// literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let body = text.trim();
    if body.is_empty() {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![Span::Text(text.to_string())]
        };
    }

    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];

    let mut state = InlineState::default();
    state.push_text(leading);

    // Byte offsets in `body` of the first and last inline content
    let mut content_start = None;
    let mut content_end = 0;
    for (event, range) in Parser::new(body).into_offset_iter() {
        if is_inline(&event) {
            if content_start.is_none() {
                content_start = Some(range.start);
                state.push_text(&body[..range.start]);
            }
            content_end = content_end.max(range.end);
        }
        process_event(event, &mut state);
    }
    match content_start {
        Some(_) => state.push_text(&body[content_end..]),
        None => state.push_text(body),
    }

    state.push_text(trailing);

    state.spans
}

#[derive(Default)]
struct InlineState {
    // Current inline content being built
    spans: Vec<Span>,
    // Nested span buffers for formatting
    span_stack: Vec<Vec<Span>>,
    link_url: Option<String>,
}

impl InlineState {
    /// Append text, merging with a preceding text span
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Span::Text(last)) = self.spans.last_mut() {
            last.push_str(text);
        } else {
            self.spans.push(Span::Text(text.to_string()));
        }
    }

    fn open(&mut self) {
        self.span_stack.push(std::mem::take(&mut self.spans));
    }

    fn close(&mut self, wrap: impl FnOnce(Vec<Span>) -> Span) {
        let inner = std::mem::take(&mut self.spans);
        if let Some(parent) = self.span_stack.pop() {
            self.spans = parent;
            self.spans.push(wrap(inner));
        } else {
            self.spans = inner;
        }
    }
}

fn is_inline(event: &Event) -> bool {
    matches!(
        event,
        Event::Text(_)
            | Event::Code(_)
            | Event::InlineHtml(_)
            | Event::Html(_)
            | Event::SoftBreak
            | Event::HardBreak
            | Event::FootnoteReference(_)
            | Event::Start(
                Tag::Strong
                    | Tag::Emphasis
                    | Tag::Strikethrough
                    | Tag::Link { .. }
                    | Tag::Image { .. }
            )
            | Event::End(
                TagEnd::Strong
                    | TagEnd::Emphasis
                    | TagEnd::Strikethrough
                    | TagEnd::Link
                    | TagEnd::Image
            )
    )
}

fn process_event(event: Event, state: &mut InlineState) {
    match event {
        Event::Text(text) | Event::InlineHtml(text) | Event::Html(text) => {
            state.push_text(&text);
        }
        Event::Code(code) => {
            state.spans.push(Span::Code(code.into_string()));
        }

        Event::Start(Tag::Strong) | Event::Start(Tag::Emphasis) => state.open(),
        Event::End(TagEnd::Strong) => state.close(Span::Bold),
        Event::End(TagEnd::Emphasis) => state.close(Span::Italic),

        Event::Start(Tag::Link { dest_url, .. }) => {
            state.link_url = Some(dest_url.into_string());
            state.open();
        }
        Event::End(TagEnd::Link) => {
            let url = state.link_url.take().unwrap_or_default();
            state.close(|content| Span::Link { url, content });
        }

        Event::SoftBreak => state.push_text(" "),
        Event::HardBreak => state.spans.push(Span::LineBreak),

        // Block structure is meaningless inside a single bullet
        _ => {}
    }
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_html(text, out),
        Span::Bold(inner) => {
            out.push_str("<strong>");
            spans_to_html(inner, out);
            out.push_str("</strong>");
        }
        Span::Italic(inner) => {
            out.push_str("<em>");
            spans_to_html(inner, out);
            out.push_str("</em>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            escape_html(text, out);
            out.push_str("</code>");
        }
        Span::Link { url, content } => {
            out.push_str("<a href=\"");
            escape_html(url, out);
            out.push_str("\">");
            spans_to_html(content, out);
            out.push_str("</a>");
        }
        Span::LineBreak => out.push_str("<br>"),
    }
}

/// Escape the characters HTML gives meaning to, in text and attribute values
pub fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
