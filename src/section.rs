use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminator selecting the rendering strategy for a section.
///
/// The enumeration is closed: values written by a newer page editor that this
/// build does not know deserialize as [`SectionType::Unknown`] and render to
/// nothing instead of failing the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    About,
    Pricing,
    Gallery,
    Testimonials,
    Faq,
    Cta,
    CustomHtml,
    #[serde(other)]
    Unknown,
}

/// One visual unit of a composed estimate page.
///
/// `settings` and `content` are opaque to the dispatcher; only the strategy
/// for `section_type` interprets their keys. The rendering engine only ever
/// reads sections; they are created and edited by the page builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub settings: Map<String, Value>,
    #[serde(default)]
    pub content: Map<String, Value>,
}

fn default_visible() -> bool {
    true
}

impl Section {
    pub fn new(id: impl Into<String>, section_type: SectionType) -> Self {
        Section {
            id: id.into(),
            section_type,
            order: 0,
            visible: true,
            settings: Map::new(),
            content: Map::new(),
        }
    }

    /// Read a string out of `content`, falling back to `default` when the key
    /// is absent or holds a non-string value.
    pub fn content_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.content
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Read an array of strings out of `content`. Non-string elements are
    /// skipped; a missing or mis-shaped key yields an empty list.
    pub fn content_str_list(&self, key: &str) -> Vec<&str> {
        self.content
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Read an array of objects out of `content` (testimonial entries, FAQ
    /// items and the like). Missing or mis-shaped keys yield an empty list.
    pub fn content_obj_list(&self, key: &str) -> Vec<&Map<String, Value>> {
        self.content
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Read a string out of `settings`, falling back to `default` when the
    /// key is absent or holds a non-string value.
    pub fn setting_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.settings
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_type_deserializes() {
        let section: Section = serde_json::from_value(json!({
            "id": "s1",
            "type": "not_a_real_type"
        }))
        .unwrap();
        assert_eq!(section.section_type, SectionType::Unknown);
        assert!(section.visible);
        assert_eq!(section.order, 0);
    }

    #[test]
    fn test_custom_html_type_name() {
        let section: Section = serde_json::from_value(json!({
            "id": "s2",
            "type": "custom_html",
            "order": 3,
            "visible": false
        }))
        .unwrap();
        assert_eq!(section.section_type, SectionType::CustomHtml);
        assert!(!section.visible);
        assert_eq!(section.order, 3);
    }

    #[test]
    fn test_content_str_defaults() {
        let mut section = Section::new("s3", SectionType::Hero);
        section.content.insert("title".into(), json!("Roof Repair"));
        section.content.insert("badge".into(), json!(42));

        assert_eq!(section.content_str("title", "Untitled"), "Roof Repair");
        // wrong shape falls back
        assert_eq!(section.content_str("badge", "none"), "none");
        // absent falls back
        assert_eq!(section.content_str("subtitle", ""), "");
    }

    #[test]
    fn test_content_lists_skip_bad_shapes() {
        let mut section = Section::new("s4", SectionType::Gallery);
        section
            .content
            .insert("images".into(), json!(["a.jpg", 7, "b.jpg"]));
        assert_eq!(section.content_str_list("images"), vec!["a.jpg", "b.jpg"]);
        assert!(section.content_obj_list("images").is_empty());
        assert!(section.content_str_list("missing").is_empty());
    }
}
