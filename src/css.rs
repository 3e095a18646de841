use regex::Regex;
use std::sync::OnceLock;

/// Reserved selector token in block stylesheets. Every rule an author wants
/// scoped to their block is written under this placeholder and rewritten to
/// the section's unique container id at render time.
pub const SCOPE_PLACEHOLDER: &str = ":scope";

/// Replacement text for neutralized CSS constructs. A comment keeps the
/// surrounding stylesheet syntactically valid, unlike outright deletion.
const REMOVED: &str = "/* removed */";

/// Derive the unique DOM id for a custom-HTML section's container.
///
/// Section ids are already unique within a page, so no counter or allocator
/// is needed and recomputation is deterministic.
pub fn scope_id_for(section_id: &str) -> String {
    format!("custom-html-{}", section_id)
}

/// Rewrite every literal [`SCOPE_PLACEHOLDER`] in `css` to `#scope_id`,
/// confining the block's rules to its own container element.
///
/// Must run before [`sanitize_css`]: the sanitizer matches literal
/// substrings, so the pipeline fixes this ordering as a contract (see
/// `pipeline::CSS_STAGES`).
pub fn scope_css(css: &str, scope_id: &str) -> String {
    css.replace(SCOPE_PLACEHOLDER, &format!("#{}", scope_id))
}

fn expression_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)expression\s*\([^)]*\)").expect("expression pattern compiles")
    })
}

fn import_javascript_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)@import\s+(?:url\s*\(\s*)?['"]?\s*javascript:[^;]*;?"#)
            .expect("import pattern compiles")
    })
}

fn javascript_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)javascript\s*:").expect("uri pattern compiles"))
}

/// Neutralize known CSS-based script vectors: `expression(...)` calls,
/// `@import` of `javascript:` URLs, and bare `javascript:` URIs. Each match
/// is replaced with an inert comment; the rest of the stylesheet still
/// applies.
///
/// This is textual pattern matching, not a CSS parser: a defense-in-depth
/// layer behind the allow-list HTML sanitizer, not the sole safety boundary.
pub fn sanitize_css(css: &str) -> String {
    let css = expression_pattern().replace_all(css, REMOVED);
    let css = import_javascript_pattern().replace_all(&css, REMOVED);
    javascript_uri_pattern().replace_all(&css, REMOVED).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scope_id_for() {
        assert_eq!(scope_id_for("abc-123"), "custom-html-abc-123");
    }

    #[test]
    fn test_scope_css_rewrites_every_occurrence() {
        let css = ":scope { color: red } :scope h2 { margin: 0 }";
        assert_eq!(
            scope_css(css, "custom-html-s1"),
            "#custom-html-s1 { color: red } #custom-html-s1 h2 { margin: 0 }"
        );
    }

    #[test]
    fn test_scope_css_deterministic() {
        let css = ":scope p { padding: 8px }";
        let a = scope_css(css, "custom-html-s1");
        let b = scope_css(css, "custom-html-s1");
        assert_eq!(a, b);

        let other = scope_css(css, "custom-html-s2");
        assert!(!other.contains("#custom-html-s1"));
    }

    #[test]
    fn test_sanitize_expression_call() {
        let out = sanitize_css("a { width: expression(evil()) }");
        assert!(!out.contains("expression("));
        assert!(out.contains(REMOVED));
        // surrounding rule survives
        assert!(out.starts_with("a { width: "));
    }

    #[test]
    fn test_sanitize_expression_case_insensitive() {
        let out = sanitize_css("a { width: EXPRESSION( alert(1) ) }");
        assert!(!out.to_lowercase().contains("expression("));
    }

    #[test]
    fn test_sanitize_import_javascript() {
        let out = sanitize_css("@import url('javascript:alert(1)'); body { margin: 0 }");
        assert!(!out.to_lowercase().contains("javascript:"));
        assert!(out.contains("body { margin: 0 }"));
    }

    #[test]
    fn test_sanitize_javascript_uri() {
        let out = sanitize_css("div { background: url(javascript:alert(1)) }");
        assert!(!out.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_harmless_css_untouched() {
        let css = ".hero { background: linear-gradient(#fff, #000); }";
        assert_eq!(sanitize_css(css), css);
    }

    #[test]
    fn test_plain_import_untouched() {
        let css = "@import url('theme.css');";
        assert_eq!(sanitize_css(css), css);
    }
}
