use serde::Serialize;
use std::collections::HashMap;

use crate::context::RenderContext;
use crate::css::scope_id_for;
use crate::pipeline::{process_css, process_html};
use crate::sanitize::{default_sanitizer, escape_html, HtmlSanitizer};
use crate::section::{Section, SectionType};
use crate::variables::{build_variables, format_currency};

/// The render output for one section, ready for document attachment.
///
/// `css` is only populated by the custom-HTML strategy; when present it is
/// already scoped and sanitized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub section_id: String,
    pub html: String,
    pub css: Option<String>,
}

/// Render a full page: sections sorted ascending by `order`, each rendered
/// independently. Invisible and unknown-type sections are skipped; a failure
/// in one section never affects another.
pub fn render_page(sections: &[Section], ctx: &RenderContext) -> Vec<RenderedSection> {
    render_page_with(sections, ctx, default_sanitizer())
}

/// [`render_page`] with an explicit sanitizer (tests inject spies and
/// failing sanitizers through this).
pub fn render_page_with(
    sections: &[Section],
    ctx: &RenderContext,
    sanitizer: &dyn HtmlSanitizer,
) -> Vec<RenderedSection> {
    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by_key(|s| s.order);
    ordered
        .into_iter()
        .filter_map(|s| render_section_with(s, ctx, sanitizer))
        .collect()
}

/// Binding seam between the dispatcher and the variable binder. The default
/// implementation reads the three context records; tests can observe or stub
/// this seam the same way they can the sanitizer.
pub trait VariableBinder {
    fn bind(&self, ctx: &RenderContext) -> HashMap<String, String>;
}

/// The production binder over the render context.
pub struct ContextBinder;

impl VariableBinder for ContextBinder {
    fn bind(&self, ctx: &RenderContext) -> HashMap<String, String> {
        build_variables(
            ctx.customer.as_ref(),
            ctx.estimate.as_ref(),
            ctx.brand.as_ref(),
        )
    }
}

/// Render one section, or `None` when the section is invisible or its type
/// is unknown to this build.
pub fn render_section(section: &Section, ctx: &RenderContext) -> Option<RenderedSection> {
    render_section_with(section, ctx, default_sanitizer())
}

/// [`render_section`] with an explicit sanitizer.
pub fn render_section_with(
    section: &Section,
    ctx: &RenderContext,
    sanitizer: &dyn HtmlSanitizer,
) -> Option<RenderedSection> {
    render_section_with_binder(section, ctx, sanitizer, &ContextBinder)
}

/// [`render_section`] with explicit sanitizer and binder seams.
pub fn render_section_with_binder(
    section: &Section,
    ctx: &RenderContext,
    sanitizer: &dyn HtmlSanitizer,
    binder: &dyn VariableBinder,
) -> Option<RenderedSection> {
    // Visibility gate: no data binding, no output, no side effects.
    if !section.visible {
        return None;
    }

    match section.section_type {
        SectionType::Hero => Some(render_hero(section, ctx)),
        SectionType::About => Some(render_about(section, ctx)),
        SectionType::Pricing => Some(render_pricing(section, ctx)),
        SectionType::Gallery => Some(render_gallery(section)),
        SectionType::Testimonials => Some(render_testimonials(section)),
        SectionType::Faq => Some(render_faq(section)),
        SectionType::Cta => Some(render_cta(section, ctx)),
        SectionType::CustomHtml => Some(render_custom_html(section, ctx, sanitizer, binder)),
        // Sections written by a newer editor degrade to "not rendered".
        SectionType::Unknown => None,
    }
}

/// Concatenate rendered sections into one document fragment, scoped styles
/// first within each section, preserving section order.
pub fn compose_document(sections: &[RenderedSection]) -> String {
    let mut out = String::new();
    for section in sections {
        if let Some(css) = &section.css {
            out.push_str("<style>");
            out.push_str(css);
            out.push_str("</style>\n");
        }
        out.push_str(&section.html);
        out.push('\n');
    }
    out
}

// ─── custom_html ─────────────────────────────────────────────────────────────

/// The full untrusted-content pipeline: build variables, interpolate both
/// templates, scope then sanitize the CSS, allow-list sanitize the HTML, and
/// wrap the result in the section's unique container. A sanitizer failure
/// fails closed to an empty container with no stylesheet (the whole section
/// renders nothing, never unsanitized output).
fn render_custom_html(
    section: &Section,
    ctx: &RenderContext,
    sanitizer: &dyn HtmlSanitizer,
    binder: &dyn VariableBinder,
) -> RenderedSection {
    let vars = binder.bind(ctx);
    let scope_id = scope_id_for(&section.id);

    let markup = match process_html(section.content_str("html", ""), &vars, sanitizer) {
        Ok(markup) => markup,
        Err(_) => {
            return RenderedSection {
                section_id: section.id.clone(),
                html: format!("<div id=\"{}\"></div>", scope_id),
                css: None,
            };
        }
    };

    let css = section.content_str("css", "");
    let css = if css.trim().is_empty() {
        None
    } else {
        Some(process_css(css, &vars, &scope_id))
    };

    RenderedSection {
        section_id: section.id.clone(),
        html: format!("<div id=\"{}\">{}</div>", scope_id, markup),
        css,
    }
}

// ─── Built-in strategies ─────────────────────────────────────────────────────
//
// Each strategy reads only its own keys out of `content`/`settings` and
// falls back to a documented default on anything missing or mis-shaped.
// Strategy-generated markup is trusted; every content value is escaped at
// insertion.

/// Strategy-inserted image URLs allow http(s) and scheme-less (relative)
/// targets only. Anything else (`javascript:`, `data:`) is dropped; the
/// custom-HTML path gets the same policy from the allow-list sanitizer.
fn is_safe_image_url(url: &str) -> bool {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return true;
    }
    match trimmed.find(':') {
        // a colon before any path separator marks a non-http scheme
        Some(pos) => trimmed[..pos].contains('/'),
        None => true,
    }
}

fn render_hero(section: &Section, ctx: &RenderContext) -> RenderedSection {
    let title = escape_html(section.content_str("title", "Your Estimate"));
    let subtitle = escape_html(section.content_str("subtitle", ""));
    let image = section.content_str("imageUrl", "");
    let image = if is_safe_image_url(image) {
        escape_html(image)
    } else {
        String::new()
    };
    let accent = ctx
        .brand
        .as_ref()
        .map(|b| escape_html(&b.primary_color))
        .unwrap_or_default();

    let heading = format!(
        "<h1 style=\"color: {}\">{}</h1><p>{}</p>",
        accent, title, subtitle
    );
    // Layout variant: "split" puts the image beside the copy, anything else
    // renders the standard centered banner.
    let body = match section.setting_str("layout", "standard") {
        "split" if !image.is_empty() => format!(
            "<div class=\"hero hero-split\"><div class=\"hero-copy\">{}</div><img src=\"{}\" alt=\"\"></div>",
            heading, image
        ),
        _ => format!("<div class=\"hero\">{}</div>", heading),
    };

    RenderedSection {
        section_id: section.id.clone(),
        html: body,
        css: None,
    }
}

fn render_about(section: &Section, ctx: &RenderContext) -> RenderedSection {
    let heading = escape_html(section.content_str("heading", "About Us"));
    let fallback = ctx
        .brand
        .as_ref()
        .map(|b| b.company_description.as_str())
        .unwrap_or("");
    let body = escape_html(section.content_str("body", fallback));

    RenderedSection {
        section_id: section.id.clone(),
        html: format!("<div class=\"about\"><h2>{}</h2><p>{}</p></div>", heading, body),
        css: None,
    }
}

fn render_pricing(section: &Section, ctx: &RenderContext) -> RenderedSection {
    let mut html = String::from("<div class=\"pricing\"><h2>Pricing</h2>");

    if let Some(incentive) = &ctx.incentive {
        html.push_str(&format!(
            "<div class=\"incentive\"><strong>{}</strong> {} <em>{}</em></div>",
            escape_html(&incentive.label),
            escape_html(&incentive.detail),
            escape_html(&incentive.expires),
        ));
    }

    match &ctx.estimate {
        Some(estimate) => {
            // "detailed" adds the per-line table; "standard" shows totals only.
            if section.setting_str("layout", "standard") == "detailed" {
                html.push_str("<table class=\"line-items\">");
                for item in &estimate.line_items {
                    html.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape_html(&item.description),
                        item.quantity,
                        escape_html(&format_currency(item.total)),
                    ));
                }
                html.push_str("</table>");
            }
            html.push_str(&format!(
                "<ul class=\"totals\"><li>Subtotal: {}</li><li>Tax: {}</li><li class=\"total\">Total: {}</li></ul>",
                escape_html(&format_currency(estimate.subtotal)),
                escape_html(&format_currency(estimate.tax_amount)),
                escape_html(&format_currency(estimate.total)),
            ));
        }
        None => {
            html.push_str("<p class=\"pending\">Your estimate is being prepared.</p>");
        }
    }

    // Preview copy mirrors the CTA strategy: the author sees what pricing
    // will show without the totals reading as a live quote.
    if ctx.is_preview {
        html.push_str(
            "<p class=\"preview-note\">Preview pricing. Totals update when the estimate is sent.</p>",
        );
    }

    html.push_str("</div>");
    RenderedSection {
        section_id: section.id.clone(),
        html,
        css: None,
    }
}

fn render_gallery(section: &Section) -> RenderedSection {
    let images = section.content_str_list("images");
    let mut html = String::from("<div class=\"gallery\">");
    for src in images.into_iter().filter(|src| is_safe_image_url(src)) {
        html.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"\"></figure>",
            escape_html(src)
        ));
    }
    html.push_str("</div>");

    RenderedSection {
        section_id: section.id.clone(),
        html,
        css: None,
    }
}

fn render_testimonials(section: &Section) -> RenderedSection {
    let mut html = String::from("<div class=\"testimonials\">");
    for item in section.content_obj_list("items") {
        let quote = item.get("quote").and_then(|v| v.as_str()).unwrap_or("");
        let author = item
            .get("author")
            .and_then(|v| v.as_str())
            .unwrap_or("Anonymous");
        html.push_str(&format!(
            "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
            escape_html(quote),
            escape_html(author)
        ));
    }
    html.push_str("</div>");

    RenderedSection {
        section_id: section.id.clone(),
        html,
        css: None,
    }
}

fn render_faq(section: &Section) -> RenderedSection {
    let mut html = String::from("<div class=\"faq\">");
    for (i, item) in section.content_obj_list("items").iter().enumerate() {
        let question = item.get("question").and_then(|v| v.as_str()).unwrap_or("");
        let answer = item.get("answer").and_then(|v| v.as_str()).unwrap_or("");
        let open = if i == 0 { " open" } else { "" };
        html.push_str(&format!(
            "<details{}><summary>{}</summary><p>{}</p></details>",
            open,
            escape_html(question),
            escape_html(answer)
        ));
    }
    html.push_str("</div>");

    RenderedSection {
        section_id: section.id.clone(),
        html,
        css: None,
    }
}

fn render_cta(section: &Section, ctx: &RenderContext) -> RenderedSection {
    let heading = escape_html(section.content_str("heading", "Ready to get started?"));
    let button = if ctx.is_preview {
        "<button class=\"approve\" disabled>Approval disabled in preview</button>".to_string()
    } else {
        let label = escape_html(section.content_str("buttonLabel", "Approve Estimate"));
        format!("<button class=\"approve\">{}</button>", label)
    };

    RenderedSection {
        section_id: section.id.clone(),
        html: format!("<div class=\"cta\"><h2>{}</h2>{}</div>", heading, button),
        css: None,
    }
}
