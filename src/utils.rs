use regex::Regex;

/// Collapses runs of newlines and runs of two or more spaces into single
/// spaces. Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize_description(text: &str) -> String {
    let newlines = Regex::new(r"\n+").unwrap();
    let spaces = Regex::new(r" {2,}").unwrap();

    let collapsed = newlines.replace_all(text, " ");
    spaces.replace_all(&collapsed, " ").to_string()
}
