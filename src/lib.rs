mod config;
mod error;
mod flatten;
mod html;
mod markup;
mod outline;
mod parser;

pub use config::{Config, ExpandMode, RenderOptions, TextMode};
pub use error::{ConfigError, ConfigResult};
pub use flatten::{DEFAULT_SEPARATOR, flatten, parse_and_flatten};
pub use markup::{Span, parse_inline};
pub use outline::{FlatContent, InvalidLine, OutlineNode, ParsedOutline, SubstitutionRule};
pub use parser::{parse, parse_outline};

/// Render flattened content as HTML.
pub fn render_html(content: &FlatContent, options: &RenderOptions) -> ConfigResult<String> {
    html::render(content, options)
}

/// Convert an outline to HTML using default config.
pub fn outline_to_html(raw: &str) -> ConfigResult<String> {
    outline_to_html_with_config(raw, &Config::compiled_default())
}

/// Convert an outline to HTML with custom config.
pub fn outline_to_html_with_config(raw: &str, config: &Config) -> ConfigResult<String> {
    let content = parse_and_flatten(raw, &config.separator);
    html::render(&content, &config.render)
}

/// Write an outline back out as an indented bullet list, two spaces per level.
pub fn outline_to_text(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    write_outline(nodes, 0, &mut out);
    out
}

fn write_outline(nodes: &[OutlineNode], indent: usize, out: &mut String) {
    let indent_str = "  ".repeat(indent);
    for node in nodes {
        out.push_str(&indent_str);
        out.push_str("* ");
        out.push_str(&node.text);
        out.push('\n');
        write_outline(&node.children, indent + 1, out);
    }
}
