use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const RENDER_KEYS: [&str; 4] = ["expand", "text_mode", "wrapper_tag", "hover_delay_ms"];

fn main() {
    println!("cargo:rerun-if-changed={}", DEFAULT_CONFIG);

    let content = fs::read_to_string(DEFAULT_CONFIG).expect("Failed to read default_config.toml");
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid default_config.toml: {}", e));

    // Shape check; full deserialization is covered by the config unit tests
    if !table.get("separator").is_some_and(toml::Value::is_str) {
        panic!("default_config.toml: `separator` must be a string");
    }
    let Some(render) = table.get("render").and_then(toml::Value::as_table) else {
        panic!("default_config.toml: missing [render] table");
    };
    for key in render.keys() {
        if !RENDER_KEYS.contains(&key.as_str()) {
            panic!("default_config.toml: unknown [render] key `{}`", key);
        }
    }
}
