use std::sync::OnceLock;

use ammonia::Builder;
use thiserror::Error;

/// HTML that has passed the allow-list sanitizer and is trusted for
/// attachment. The only constructors are a sanitizer and [`SafeMarkup::empty`];
/// nothing downstream re-decides safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    /// The fail-closed value: renders nothing.
    pub fn empty() -> Self {
        SafeMarkup(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone)]
pub enum SanitizeError {
    #[error("Sanitizer unavailable: {0}")]
    Unavailable(String),
}

/// The single seam between the pipeline and the underlying sanitizer
/// library. The adapter owns all configuration; callers treat a returned
/// error as "render nothing" (fail closed), never as permission to attach
/// the unsanitized input.
pub trait HtmlSanitizer {
    fn sanitize(&self, html: &str) -> Result<SafeMarkup, SanitizeError>;
}

/// Allow-list adapter over the `ammonia` crate.
///
/// Ammonia's defaults already cover ordinary flow content (text, headings,
/// lists, images, anchors) and unconditionally strip `<script>`, inline
/// event handlers, and `javascript:` URLs. On top of the defaults the block
/// library needs the `details`/`summary` disclosure pair with its `open`
/// attribute, plus `style`/`class`/`id` as styling hooks for scoped CSS.
pub struct AmmoniaSanitizer {
    builder: Builder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder.add_tags(["details", "summary"]);
        builder.add_tag_attributes("details", ["open"]);
        builder.add_generic_attributes(["style", "class", "id"]);
        AmmoniaSanitizer { builder }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str) -> Result<SafeMarkup, SanitizeError> {
        Ok(SafeMarkup(self.builder.clean(html).to_string()))
    }
}

/// Process-wide default sanitizer used by [`render_safe_html`] and the
/// section dispatcher.
pub fn default_sanitizer() -> &'static AmmoniaSanitizer {
    static SANITIZER: OnceLock<AmmoniaSanitizer> = OnceLock::new();
    SANITIZER.get_or_init(AmmoniaSanitizer::new)
}

/// Sanitize `html` with the default adapter. A sanitizer failure degrades to
/// empty markup: a blank section, never unsanitized output.
pub fn render_safe_html(html: &str) -> SafeMarkup {
    default_sanitizer()
        .sanitize(html)
        .unwrap_or_else(|_| SafeMarkup::empty())
}

/// Escape text for insertion into strategy-generated markup. Section content
/// values are author data, not HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
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
    out
}
