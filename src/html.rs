use std::fmt::Write;

use tracing::warn;

use crate::config::{ExpandMode, RenderOptions, TextMode};
use crate::error::ConfigResult;
use crate::markup::render_fragment;
use crate::outline::{FlatContent, SubstitutionRule};

const QUOTE_MARKER: &str = "@Q ";

/// Render flattened content as nested, expandable HTML spans.
pub fn render(content: &FlatContent, options: &RenderOptions) -> ConfigResult<String> {
    options.validate()?;

    let mut out = String::new();
    let _ = write!(
        out,
        "<{} class=\"telescope\" data-expand=\"{}\"",
        options.wrapper_tag,
        options.expand.as_str()
    );
    if options.expand == ExpandMode::Hover {
        let _ = write!(out, " data-hover-delay=\"{}\"", options.hover_delay_ms);
    }
    out.push('>');

    emit_line(&content.text, &content.rules, options.text_mode, &mut out);

    let _ = writeln!(out, "</{}>", options.wrapper_tag);
    Ok(out)
}

/// Apply each rule to the leftmost occurrence of its original in what is
/// left of `text`, consuming the text up to and including that occurrence.
fn emit_line(text: &str, rules: &[SubstitutionRule], mode: TextMode, out: &mut String) {
    if rules.is_empty() {
        emit_leaf(text, mode, out);
        return;
    }

    let mut rest = text;
    for rule in rules {
        let Some(at) = rest.find(rule.original.as_str()) else {
            warn!(original = %rule.original, "substitution target not found, leaving text as is");
            continue;
        };

        render_fragment(&rest[..at], mode, out);
        emit_details(rule, mode, out);
        rest = &rest[at + rule.original.len()..];
    }

    render_fragment(rest, mode, out);
}

fn emit_details(rule: &SubstitutionRule, mode: TextMode, out: &mut String) {
    out.push_str("<span class=\"details close\"><span class=\"summary\">");
    render_fragment(&rule.original, mode, out);
    out.push_str("</span><span class=\"expanded\">");
    emit_line(&rule.expansion, &rule.nested, mode, out);
    out.push_str("</span></span>");
}

fn emit_leaf(text: &str, mode: TextMode, out: &mut String) {
    match text.split_once(QUOTE_MARKER) {
        Some((before, quote)) => {
            render_fragment(before, mode, out);
            out.push_str("<blockquote>");
            render_fragment(quote, mode, out);
            out.push_str("</blockquote>");
        }
        None => render_fragment(text, mode, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::flatten::{DEFAULT_SEPARATOR, parse_and_flatten};

    const OPEN: &str = "<div class=\"telescope\" data-expand=\"click\">";
    const CLOSE: &str = "</div>\n";

    fn to_html(raw: &str) -> String {
        let content = parse_and_flatten(raw, DEFAULT_SEPARATOR);
        render(&content, &RenderOptions::default()).unwrap()
    }

    fn details(summary: &str, expanded: &str) -> String {
        format!(
            "<span class=\"details close\"><span class=\"summary\">{summary}</span><span class=\"expanded\">{expanded}</span></span>"
        )
    }

    #[test]
    fn plain_list() {
        assert_eq!(to_html("* A\n* B"), format!("{OPEN}A B{CLOSE}"));
    }

    #[test]
    fn single_expansion() {
        assert_eq!(
            to_html("* A\n  * B\n  * C"),
            format!("{OPEN}{}{CLOSE}", details("A", "B C"))
        );
    }

    #[test]
    fn nested_expansion() {
        assert_eq!(
            to_html("* Texts\n  * Melodies\n    * clear notes\n* are"),
            format!(
                "{OPEN}{} are{CLOSE}",
                details("Texts", &details("Melodies", "clear notes"))
            )
        );
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        assert_eq!(
            to_html("* go\n  * walk\n* go"),
            format!("{OPEN}{} go{CLOSE}", details("go", "walk"))
        );
    }

    #[test]
    fn repeated_originals_consume_left_to_right() {
        assert_eq!(
            to_html("* go\n  * walk\n* go\n  * run"),
            format!("{OPEN}{} {}{CLOSE}", details("go", "walk"), details("go", "run"))
        );
    }

    #[test]
    fn missing_original_leaves_text_intact() {
        let content = FlatContent {
            text: "A B".to_string(),
            rules: vec![SubstitutionRule {
                original: "Z".to_string(),
                expansion: "zed".to_string(),
                nested: vec![],
            }],
        };
        assert_eq!(
            render(&content, &RenderOptions::default()).unwrap(),
            format!("{OPEN}A B{CLOSE}")
        );
    }

    #[test]
    fn empty_original_renders_empty_summary_at_start() {
        assert_eq!(
            to_html("* lead\n*\n  * hidden"),
            format!("{OPEN}{}lead {CLOSE}", details("", "hidden"))
        );
    }

    #[test]
    fn quotation_marker_in_leaf() {
        assert_eq!(
            to_html("* A\n  * she said @Q hello there"),
            format!(
                "{OPEN}{}{CLOSE}",
                details("A", "she said <blockquote>hello there</blockquote>")
            )
        );
    }

    #[test]
    fn escapes_text_mode() {
        assert_eq!(
            to_html("* a < b\n  * a & b"),
            format!("{OPEN}{}{CLOSE}", details("a &lt; b", "a &amp; b"))
        );
    }

    #[test]
    fn markdown_mode() {
        let options = RenderOptions {
            text_mode: TextMode::Markdown,
            ..RenderOptions::default()
        };
        let content = parse_and_flatten("* the **bold** claim\n  * evidence", DEFAULT_SEPARATOR);
        assert_eq!(
            render(&content, &options).unwrap(),
            format!(
                "{OPEN}{}{CLOSE}",
                details("the <strong>bold</strong> claim", "evidence")
            )
        );
    }

    #[test]
    fn hover_mode_and_wrapper_tag() {
        let options = RenderOptions {
            expand: ExpandMode::Hover,
            wrapper_tag: "section".to_string(),
            hover_delay_ms: 150,
            ..RenderOptions::default()
        };
        let content = parse_and_flatten("* A", DEFAULT_SEPARATOR);
        assert_eq!(
            render(&content, &options).unwrap(),
            "<section class=\"telescope\" data-expand=\"hover\" data-hover-delay=\"150\">A</section>\n"
        );
    }

    #[test]
    fn invalid_options_fail_before_rendering() {
        let options = RenderOptions {
            wrapper_tag: "<script>".to_string(),
            ..RenderOptions::default()
        };
        assert!(matches!(
            render(&FlatContent::default(), &options),
            Err(ConfigError::IllegalConfiguration(_))
        ));
    }
}
