use regex::Regex;
use std::sync::OnceLock;

const FORBIDDEN: &str = r#"[\\/*?"<>| ,#:A-Z]"#;

fn forbidden() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FORBIDDEN).expect("static pattern"))
}

/// Checks a name against the engine's index naming rules before any call is made.
pub fn validate_index_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Index name must not be empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("Invalid index name \"{}\"", name));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(format!(
            "Invalid index name \"{}\": must not start with '-', '_' or '+'",
            name
        ));
    }
    if name.len() > 255 {
        return Err(format!("Invalid index name \"{}\": longer than 255 bytes", name));
    }
    if let Some(found) = forbidden().find(name) {
        return Err(format!(
            "Invalid index name \"{}\": must be lowercase and must not contain '{}'",
            name,
            found.as_str()
        ));
    }
    Ok(())
}
