use serde::{Deserialize, Serialize};

/// Customer record, read-only. Schema owned by the CRM collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One line of an estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Estimate record, read-only. Schema owned by the estimates collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Estimate {
    pub estimate_number: String,
    pub total: f64,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub line_items: Vec<LineItem>,
}

/// Brand kit record, read-only. Colors, copy, and social proof configured
/// once per company and shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandKit {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub tagline: String,
    pub company_description: String,
    pub google_rating: f64,
    pub google_review_count: u32,
    pub certifications: Vec<String>,
    pub insurance_info: String,
    pub logo_url: String,
}

/// Pricing-incentive data shown by the pricing strategy (limited-time
/// discounts, seasonal offers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Incentive {
    pub label: String,
    pub detail: String,
    pub expires: String,
}

/// Everything a rendering strategy may read for one page render.
///
/// All data inputs are optional: a preview can render before an estimate
/// exists, and a template page has no customer at all. Missing inputs simply
/// leave their `{{...}}` variable family unbound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderContext {
    pub page_id: String,
    pub is_preview: bool,
    pub customer: Option<Customer>,
    pub estimate: Option<Estimate>,
    pub brand: Option<BrandKit>,
    pub incentive: Option<Incentive>,
}

impl RenderContext {
    pub fn new(page_id: impl Into<String>) -> Self {
        RenderContext {
            page_id: page_id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_deserializes_camel_case() {
        let ctx: RenderContext = serde_json::from_value(json!({
            "pageId": "page-1",
            "isPreview": true,
            "estimate": {
                "estimateNumber": "EST-1042",
                "total": 2480.5,
                "taxRate": 8.25,
                "lineItems": [
                    { "description": "Gutter replacement", "quantity": 1, "unitPrice": 1800.0, "total": 1800.0 }
                ]
            }
        }))
        .unwrap();

        assert_eq!(ctx.page_id, "page-1");
        assert!(ctx.is_preview);
        let estimate = ctx.estimate.unwrap();
        assert_eq!(estimate.estimate_number, "EST-1042");
        assert_eq!(estimate.line_items.len(), 1);
        assert!(ctx.customer.is_none());
        assert!(ctx.brand.is_none());
    }
}
