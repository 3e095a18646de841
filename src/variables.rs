use std::collections::HashMap;

use crate::context::{BrandKit, Customer, Estimate};

/// Build the variable dictionary for one render.
///
/// Each input is optional; an absent input omits its whole key family rather
/// than emitting empty strings, so the interpolator's leave-unresolved
/// behavior surfaces the gap to the author.
///
/// Every value is a pre-formatted display string: currency and percentage
/// formatting happen here, never in the interpolator.
pub fn build_variables(
    customer: Option<&Customer>,
    estimate: Option<&Estimate>,
    brand: Option<&BrandKit>,
) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    if let Some(customer) = customer {
        vars.insert("customer.name".into(), customer.name.clone());
        vars.insert("customer.email".into(), customer.email.clone());
        vars.insert("customer.phone".into(), customer.phone.clone());
    }

    if let Some(estimate) = estimate {
        vars.insert("estimate.number".into(), estimate.estimate_number.clone());
        vars.insert("estimate.total".into(), format_currency(estimate.total));
        vars.insert("estimate.subtotal".into(), format_currency(estimate.subtotal));
        vars.insert("estimate.taxRate".into(), format_percent(estimate.tax_rate));
        vars.insert("estimate.taxAmount".into(), format_currency(estimate.tax_amount));
        vars.insert(
            "estimate.lineItemCount".into(),
            estimate.line_items.len().to_string(),
        );
    }

    if let Some(brand) = brand {
        vars.insert("brand.primaryColor".into(), brand.primary_color.clone());
        vars.insert("brand.secondaryColor".into(), brand.secondary_color.clone());
        vars.insert("brand.accentColor".into(), brand.accent_color.clone());
        vars.insert("brand.tagline".into(), brand.tagline.clone());
        vars.insert("brand.description".into(), brand.company_description.clone());
        vars.insert("brand.googleRating".into(), brand.google_rating.to_string());
        vars.insert(
            "brand.googleReviewCount".into(),
            brand.google_review_count.to_string(),
        );
        vars.insert("brand.certifications".into(), brand.certifications.join(", "));
        vars.insert("brand.insurance".into(), brand.insurance_info.clone());
        vars.insert("brand.logoUrl".into(), brand.logo_url.clone());
    }

    vars
}

/// Format a dollar amount with a `$` sign, thousands separators, and exactly
/// two decimal places (e.g. `$12,480.50`). Negative amounts keep the sign
/// before the `$`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Format a rate as a percentage string (e.g. `8.25%`). Whole-number rates
/// drop the fraction (`5%`, not `5.0%`).
pub fn format_percent(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}%", rate as i64)
    } else {
        format!("{}%", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(2480.5), "$2,480.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.89), "$1,234,567.89");
        assert_eq!(format_currency(-45.0), "-$45.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(8.25), "8.25%");
        assert_eq!(format_percent(5.0), "5%");
        assert_eq!(format_percent(0.0), "0%");
    }

    #[test]
    fn test_absent_inputs_omit_families() {
        let vars = build_variables(None, None, None);
        assert!(vars.is_empty());

        let customer = Customer {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-0100".into(),
        };
        let vars = build_variables(Some(&customer), None, None);
        assert_eq!(vars.get("customer.name").unwrap(), "Jane Doe");
        assert!(!vars.contains_key("estimate.total"));
        assert!(!vars.contains_key("brand.primaryColor"));
    }

    #[test]
    fn test_estimate_family_formatted() {
        let estimate = Estimate {
            estimate_number: "EST-1042".into(),
            total: 2480.5,
            subtotal: 2291.45,
            tax_rate: 8.25,
            tax_amount: 189.05,
            line_items: vec![Default::default(), Default::default()],
        };
        let vars = build_variables(None, Some(&estimate), None);
        assert_eq!(vars.get("estimate.number").unwrap(), "EST-1042");
        assert_eq!(vars.get("estimate.total").unwrap(), "$2,480.50");
        assert_eq!(vars.get("estimate.subtotal").unwrap(), "$2,291.45");
        assert_eq!(vars.get("estimate.taxRate").unwrap(), "8.25%");
        assert_eq!(vars.get("estimate.taxAmount").unwrap(), "$189.05");
        assert_eq!(vars.get("estimate.lineItemCount").unwrap(), "2");
    }

    #[test]
    fn test_brand_family() {
        let brand = BrandKit {
            primary_color: "#1a6b3c".into(),
            secondary_color: "#0d3b20".into(),
            accent_color: "#f5a623".into(),
            tagline: "Built to last".into(),
            company_description: "Family-owned roofing since 1998".into(),
            google_rating: 4.8,
            google_review_count: 212,
            certifications: vec!["GAF Certified".into(), "BBB A+".into()],
            insurance_info: "Licensed & insured, #C-39 982114".into(),
            logo_url: "https://cdn.example.com/logo.png".into(),
        };
        let vars = build_variables(None, None, Some(&brand));
        assert_eq!(vars.get("brand.primaryColor").unwrap(), "#1a6b3c");
        assert_eq!(vars.get("brand.googleRating").unwrap(), "4.8");
        assert_eq!(vars.get("brand.googleReviewCount").unwrap(), "212");
        assert_eq!(
            vars.get("brand.certifications").unwrap(),
            "GAF Certified, BBB A+"
        );
    }
}
