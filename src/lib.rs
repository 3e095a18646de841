//! # TradeFlow Estimate Pages
//!
//! The page composition and safe template-rendering engine behind the
//! TradeFlow estimate-page builder.
//!
//! ## Features
//! - Ordered, schema-driven section dispatch with per-type strategies
//! - `{{ var }}` interpolation of live business data (customer, estimate,
//!   brand kit); missing bindings stay visible instead of erasing content
//! - Allow-list HTML sanitization and textual CSS neutralization for
//!   author-supplied custom blocks
//! - Per-section CSS scoping, so one block's styles never leak into another
//! - A static, validated block library authors can drop into custom sections
//!
//! ## Example
//! ```ignore
//! use tradeflow_pages::{render_page, compose_document, RenderContext, Section};
//!
//! let sections: Vec<Section> = serde_json::from_str(page_json)?;
//! let ctx = RenderContext::new("page-1");
//!
//! let rendered = render_page(&sections, &ctx);
//! let html = compose_document(&rendered);
//! ```

pub mod blocks;
pub mod context;
pub mod css;
pub mod error;
pub mod interpolate;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod section;
pub mod variables;

// --- Core types ---
pub use context::{BrandKit, Customer, Estimate, Incentive, LineItem, RenderContext};
pub use error::{PageError, PageResult};
pub use render::{compose_document, render_page, render_section, RenderedSection};
pub use sanitize::{AmmoniaSanitizer, HtmlSanitizer, SafeMarkup, SanitizeError};
pub use section::{Section, SectionType};

// --- Block library types ---
pub use blocks::{catalog, BlockCatalog, BlockCategory, HtmlBlock};

/// Resolve `{{ var }}` tokens in a template. See [`interpolate::interpolate`].
pub use interpolate::interpolate;

/// Build the variable dictionary for a render. See [`variables::build_variables`].
pub use variables::build_variables;

/// Neutralize dangerous CSS constructs. See [`css::sanitize_css`].
pub use css::{sanitize_css, scope_css, scope_id_for, SCOPE_PLACEHOLDER};

/// Allow-list sanitize HTML with the default adapter, failing closed.
pub use sanitize::render_safe_html;
