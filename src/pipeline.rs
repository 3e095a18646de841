//! The custom-HTML processing pipeline as an explicit, ordered contract.
//!
//! Scoping must happen before CSS sanitization (the sanitizer matches
//! literal substrings), and sanitization must be the last stage before
//! attachment. Encoding the order as data keeps it a visible contract
//! instead of an accident of call order, and lets tests assert it.

use std::collections::HashMap;

use crate::css::{sanitize_css, scope_css};
use crate::interpolate::interpolate;
use crate::sanitize::{HtmlSanitizer, SafeMarkup, SanitizeError};

/// Stages of the CSS track, applied in array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssStage {
    /// Resolve `{{ var }}` tokens against the variable dictionary.
    Interpolate,
    /// Rewrite the `:scope` placeholder to the section's container id.
    Scope,
    /// Neutralize dangerous CSS constructs.
    Sanitize,
}

/// Stages of the HTML track, applied in array order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlStage {
    /// Resolve `{{ var }}` tokens against the variable dictionary.
    Interpolate,
    /// Allow-list sanitization; the only producer of [`SafeMarkup`].
    Sanitize,
}

pub const CSS_STAGES: [CssStage; 3] = [CssStage::Interpolate, CssStage::Scope, CssStage::Sanitize];

pub const HTML_STAGES: [HtmlStage; 2] = [HtmlStage::Interpolate, HtmlStage::Sanitize];

/// Run a stylesheet through the full CSS track.
pub fn process_css(css: &str, vars: &HashMap<String, String>, scope_id: &str) -> String {
    let mut out = css.to_string();
    for stage in CSS_STAGES {
        out = match stage {
            CssStage::Interpolate => interpolate(&out, vars),
            CssStage::Scope => scope_css(&out, scope_id),
            CssStage::Sanitize => sanitize_css(&out),
        };
    }
    out
}

/// Run markup through the full HTML track. A sanitizer failure propagates so
/// the caller can blank the whole affected section (fail closed); it is
/// never a license to use the unsanitized input.
pub fn process_html(
    html: &str,
    vars: &HashMap<String, String>,
    sanitizer: &dyn HtmlSanitizer,
) -> Result<SafeMarkup, SanitizeError> {
    let mut text = html.to_string();
    for stage in HTML_STAGES {
        match stage {
            HtmlStage::Interpolate => text = interpolate(&text, vars),
            HtmlStage::Sanitize => return sanitizer.sanitize(&text),
        }
    }
    // HTML_STAGES always ends with Sanitize; reaching here means the stage
    // list was edited without updating this function.
    Ok(SafeMarkup::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::default_sanitizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_order_is_scope_before_sanitize() {
        let scope_pos = CSS_STAGES.iter().position(|s| *s == CssStage::Scope);
        let sanitize_pos = CSS_STAGES.iter().position(|s| *s == CssStage::Sanitize);
        assert!(scope_pos < sanitize_pos);
        assert_eq!(CSS_STAGES[0], CssStage::Interpolate);
        assert_eq!(*HTML_STAGES.last().unwrap(), HtmlStage::Sanitize);
    }

    #[test]
    fn test_process_css_full_track() {
        let vars = [("brand.primaryColor".to_string(), "#1a6b3c".to_string())]
            .into_iter()
            .collect();
        let css = ":scope { color: {{brand.primaryColor}}; width: expression(evil()) }";
        let out = process_css(css, &vars, "custom-html-s1");
        assert!(out.starts_with("#custom-html-s1 {"));
        assert!(out.contains("#1a6b3c"));
        assert!(!out.contains("expression("));
    }

    #[test]
    fn test_process_html_full_track() {
        let vars = [("customer.name".to_string(), "Jane Doe".to_string())]
            .into_iter()
            .collect();
        let out = process_html(
            "<p>{{customer.name}}</p><script>x</script>",
            &vars,
            default_sanitizer(),
        )
        .unwrap();
        assert!(out.as_str().contains("Jane Doe"));
        assert!(!out.as_str().contains("<script"));
    }
}
