use rstest::rstest;
use serde_json::json;
use telescope::{
    Config, DEFAULT_SEPARATOR, FlatContent, OutlineNode, SubstitutionRule, outline_to_html,
    outline_to_html_with_config, parse, parse_and_flatten, parse_outline,
};

const POEM: &str = "\
- the world
    - all of it
        - all that
        - is
            - exists
- is
    - is always
- a sacred object";

#[test]
fn nested_outline_parses_and_flattens() {
    let nodes = parse("* A\n  * B\n  * C");
    assert_eq!(
        nodes,
        vec![OutlineNode::with_children(
            "A",
            vec![OutlineNode::new("B"), OutlineNode::new("C")]
        )]
    );

    assert_eq!(
        telescope::flatten(&nodes, DEFAULT_SEPARATOR),
        FlatContent {
            text: "A".to_string(),
            rules: vec![SubstitutionRule {
                original: "A".to_string(),
                expansion: "B C".to_string(),
                nested: vec![],
            }],
        }
    );
}

#[rstest]
#[case("* A\n* B", "A B")]
#[case("- A\n+ B\n* C", "A B C")]
#[case("* A\nnot a bullet\n* B", "A B")]
#[case("\n\n* A\n\n\n* B\n\n", "A B")]
fn flat_outlines_have_no_rules(#[case] raw: &str, #[case] text: &str) {
    let flat = parse_and_flatten(raw, DEFAULT_SEPARATOR);
    assert_eq!(flat.text, text);
    assert!(flat.rules.is_empty());
}

#[test]
fn invalid_lines_never_fail_the_parse() {
    let parsed = parse_outline("intro\n* A\n  stray text\n  * B\n# heading");
    assert_eq!(
        parsed.nodes,
        vec![OutlineNode::with_children("A", vec![OutlineNode::new("B")])]
    );
    let numbers: Vec<usize> = parsed.invalid_lines.iter().map(|l| l.line_number).collect();
    assert_eq!(numbers, vec![1, 3, 5]);
}

#[test]
fn flat_content_json_shape() {
    let flat = parse_and_flatten(POEM, DEFAULT_SEPARATOR);
    assert_eq!(
        serde_json::to_value(&flat).unwrap(),
        json!({
            "text": "the world is a sacred object",
            "rules": [
                {
                    "original": "the world",
                    "expansion": "all of it",
                    "nested": [
                        {
                            "original": "all of it",
                            "expansion": "all that is",
                            "nested": [
                                { "original": "is", "expansion": "exists", "nested": [] }
                            ]
                        }
                    ]
                },
                { "original": "is", "expansion": "is always", "nested": [] }
            ]
        })
    );
}

#[test]
fn flat_content_round_trips_through_json() {
    let flat = parse_and_flatten(POEM, DEFAULT_SEPARATOR);
    let json = serde_json::to_string(&flat).unwrap();
    let back: FlatContent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, flat);
}

#[test]
fn repeated_word_is_expanded_once() {
    let html = outline_to_html("* go go\n  * go\n    * run").unwrap();
    assert_eq!(
        html,
        "<div class=\"telescope\" data-expand=\"click\">\
<span class=\"details close\"><span class=\"summary\">go go</span><span class=\"expanded\">\
<span class=\"details close\"><span class=\"summary\">go</span><span class=\"expanded\">run</span></span>\
</span></span></div>\n"
    );
}

#[test]
fn substring_of_earlier_word_is_consumed_first() {
    // "is" is found inside "this" before the bullet that owns it
    let html = outline_to_html("* this\n* is\n  * exists").unwrap();
    assert_eq!(
        html,
        "<div class=\"telescope\" data-expand=\"click\">th\
<span class=\"details close\"><span class=\"summary\">is</span><span class=\"expanded\">exists</span></span> is</div>\n"
    );
}

#[test]
fn config_separator_applies_to_html() {
    let config = Config {
        separator: " | ".to_string(),
        ..Config::default()
    };
    let html = outline_to_html_with_config("* A\n  * a1\n  * a2\n* B", &config).unwrap();
    assert_eq!(
        html,
        "<div class=\"telescope\" data-expand=\"click\">\
<span class=\"details close\"><span class=\"summary\">A</span><span class=\"expanded\">a1 | a2</span></span> | B</div>\n"
    );
}
