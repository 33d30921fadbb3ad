//! The procurement taxonomy catalog. Explicit L1 → L2 → L3 tree.
//!
//! Loaded once at startup (embedded default or operator-supplied file) and
//! shared read-only for the lifetime of the process. Structural invariants
//! are checked at load time; a catalog that fails them never enters the
//! process.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::entities::TaxonomyLevel;

/// Default catalog embedded at compile time.
const DEFAULT_CATALOG_JSON: &str = include_str!("taxonomy.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog has no categories")]
    Empty,

    #[error("{parent:?} has no children")]
    EmptyLevel { parent: String },

    #[error("label {label:?} appears more than once at {level}")]
    DuplicateLabel { level: TaxonomyLevel, label: String },
}

/// A Category (L1) with its Sub-Categories.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub sub_categories: Vec<SubCategoryNode>,
}

/// A Sub-Category (L2) with its Commodities (L3).
#[derive(Debug, Clone, Deserialize)]
pub struct SubCategoryNode {
    pub name: String,
    pub commodities: Vec<String>,
}

/// The authoritative hierarchical taxonomy. Order-preserving; immutable
/// after load.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyCatalog {
    categories: Vec<CategoryNode>,
}

impl TaxonomyCatalog {
    /// Load the catalog shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }

    /// Parse a catalog from JSON and check its structural invariants.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Load a catalog from an operator-supplied JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Invariants: at least one category, no childless node, and no label
    /// appearing twice at the same level (each L2 belongs to exactly one
    /// L1, each L3 to exactly one L2).
    fn check(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut l1_seen = HashSet::new();
        let mut l2_seen = HashSet::new();
        let mut l3_seen = HashSet::new();

        for category in &self.categories {
            if !l1_seen.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateLabel {
                    level: TaxonomyLevel::Category,
                    label: category.name.clone(),
                });
            }
            if category.sub_categories.is_empty() {
                return Err(CatalogError::EmptyLevel {
                    parent: category.name.clone(),
                });
            }
            for sub in &category.sub_categories {
                if !l2_seen.insert(sub.name.as_str()) {
                    return Err(CatalogError::DuplicateLabel {
                        level: TaxonomyLevel::SubCategory,
                        label: sub.name.clone(),
                    });
                }
                if sub.commodities.is_empty() {
                    return Err(CatalogError::EmptyLevel {
                        parent: sub.name.clone(),
                    });
                }
                for commodity in &sub.commodities {
                    if !l3_seen.insert(commodity.as_str()) {
                        return Err(CatalogError::DuplicateLabel {
                            level: TaxonomyLevel::Commodity,
                            label: commodity.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn categories(&self) -> &[CategoryNode] {
        &self.categories
    }

    /// Exact-match membership check at one level.
    pub fn contains(&self, level: TaxonomyLevel, label: &str) -> bool {
        match level {
            TaxonomyLevel::Category => self.category(label).is_some(),
            TaxonomyLevel::SubCategory => self.sub_category(label).is_some(),
            TaxonomyLevel::Commodity => self
                .categories
                .iter()
                .flat_map(|c| &c.sub_categories)
                .any(|s| s.commodities.iter().any(|m| m == label)),
        }
    }

    /// True if `sub_category` is listed under `category`.
    pub fn sub_category_belongs_to(&self, category: &str, sub_category: &str) -> bool {
        self.category(category)
            .map(|c| c.sub_categories.iter().any(|s| s.name == sub_category))
            .unwrap_or(false)
    }

    /// True if `commodity` is listed under `sub_category`.
    pub fn commodity_belongs_to(&self, sub_category: &str, commodity: &str) -> bool {
        self.sub_category(sub_category)
            .map(|s| s.commodities.iter().any(|m| m == commodity))
            .unwrap_or(false)
    }

    fn category(&self, name: &str) -> Option<&CategoryNode> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn sub_category(&self, name: &str) -> Option<&SubCategoryNode> {
        self.categories
            .iter()
            .flat_map(|c| &c.sub_categories)
            .find(|s| s.name == name)
    }
}
