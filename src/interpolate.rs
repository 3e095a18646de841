use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Matches `{{ key }}` tokens: dotted word-segment paths with optional
/// whitespace inside the braces.
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"\{\{\s*(\w+(?:\.\w+)*)\s*\}\}").expect("token pattern compiles")
    })
}

/// Resolve `{{ key }}` tokens in `template` against `vars`.
///
/// Present keys substitute their value verbatim. No escaping happens here,
/// because every interpolation output subsequently passes through a
/// sanitizer. Absent keys leave the token untouched in the output, so a
/// missing binding stays visible to the page author instead of silently
/// erasing content.
///
/// Pure and total: never fails, and re-applying it to already-resolved
/// output is a no-op.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    token_regex()
        .replace_all(template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
