use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::{PageError, PageResult};

/// Raw JSON catalog shipped with the application bundle.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/blocks.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Headers,
    Features,
    SocialProof,
    Promotions,
    Guarantees,
    Faq,
}

/// A catalog entry an author can drop into a `custom_html` section.
///
/// `html` and `css` are template strings with `{{dotted.key}}` tokens; `css`
/// additionally uses the literal `:scope` placeholder selector. `variables`
/// documents which bindings the template expects; it is not enforced at
/// render time (an unresolved token simply survives in the output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlBlock {
    pub id: String,
    pub name: String,
    pub category: BlockCategory,
    #[serde(default)]
    pub description: String,
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

/// The immutable block library. Loaded once from the embedded JSON asset;
/// no runtime mutation path exists, so the catalog cannot drift between
/// renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockCatalog {
    pub blocks: Vec<HtmlBlock>,
}

impl BlockCatalog {
    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> PageResult<Self> {
        let catalog: BlockCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog invariants: non-empty unique ids, non-empty html, declared
    /// variable names are dotted word paths.
    pub fn validate(&self) -> PageResult<()> {
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if block.id.is_empty() {
                return Err(PageError::ValidationError(
                    "Block id must be non-empty".to_string(),
                ));
            }
            if !seen.insert(block.id.as_str()) {
                return Err(PageError::DuplicateBlockId {
                    id: block.id.clone(),
                });
            }
            if block.html.trim().is_empty() {
                return Err(PageError::EmptyTemplate {
                    block: block.id.clone(),
                    field: "html".to_string(),
                });
            }
            for name in &block.variables {
                if !is_dotted_path(name) {
                    return Err(PageError::InvalidVariableName {
                        block: block.id.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&HtmlBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn by_category(&self, category: BlockCategory) -> Vec<&HtmlBlock> {
        self.blocks.iter().filter(|b| b.category == category).collect()
    }

    pub fn all(&self) -> &[HtmlBlock] {
        &self.blocks
    }
}

/// A variable name is one or more word segments joined by dots.
fn is_dotted_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// The process-wide block library.
///
/// The embedded asset is validated by the test suite, so a load failure here
/// is a build defect, not a runtime condition.
pub fn catalog() -> &'static BlockCatalog {
    static CATALOG: OnceLock<BlockCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        BlockCatalog::from_json(EMBEDDED_CATALOG).expect("embedded block catalog is valid")
    })
}
