//! Domain entities. Pure data structures for the classification core.
//!
//! No HTTP/UI types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ClassifyError;

/// The three taxonomy levels, broadest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyLevel {
    Category,
    SubCategory,
    Commodity,
}

impl TaxonomyLevel {
    /// Wire key used by the backend contract (`L1`/`L2`/`L3`).
    pub fn key(self) -> &'static str {
        match self {
            TaxonomyLevel::Category => "L1",
            TaxonomyLevel::SubCategory => "L2",
            TaxonomyLevel::Commodity => "L3",
        }
    }
}

impl std::fmt::Display for TaxonomyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One classification job: a PO description plus an optional supplier hint.
///
/// Created per user action, consumed once. The description is guaranteed
/// non-empty after trimming; a blank supplier collapses to `None`.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    description: String,
    supplier: Option<String>,
}

impl ClassificationRequest {
    pub fn new(description: &str, supplier: Option<&str>) -> Result<Self, ClassifyError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ClassifyError::InvalidRequest);
        }
        let supplier = supplier
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Self {
            description: description.to_string(),
            supplier,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }
}

/// A validated three-level label chain. Hierarchical consistency is
/// guaranteed by the validator that produced it: the sub-category belongs
/// to the category and the commodity belongs to the sub-category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "L1")]
    pub category: String,
    #[serde(rename = "L2")]
    pub sub_category: String,
    #[serde(rename = "L3")]
    pub commodity: String,
}

/// A model-facing instruction pair: role/contract text plus the
/// request-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_description() {
        let req = ClassificationRequest::new("  laptops for the sales team  ", None).unwrap();
        assert_eq!(req.description(), "laptops for the sales team");
        assert_eq!(req.supplier(), None);
    }

    #[test]
    fn test_request_rejects_whitespace_description() {
        assert!(matches!(
            ClassificationRequest::new("   \t\n", None),
            Err(ClassifyError::InvalidRequest)
        ));
    }

    #[test]
    fn test_blank_supplier_collapses_to_none() {
        let req = ClassificationRequest::new("toner cartridges", Some("   ")).unwrap();
        assert_eq!(req.supplier(), None);

        let req = ClassificationRequest::new("toner cartridges", Some(" Staples ")).unwrap();
        assert_eq!(req.supplier(), Some("Staples"));
    }

    #[test]
    fn test_result_serializes_with_wire_keys() {
        let result = ClassificationResult {
            category: "IT Services".to_string(),
            sub_category: "Cloud".to_string(),
            commodity: "SaaS Subscription".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["L1"], "IT Services");
        assert_eq!(json["L2"], "Cloud");
        assert_eq!(json["L3"], "SaaS Subscription");
    }
}
