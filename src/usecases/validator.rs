//! Response validation. Raw backend text in, validated label chain out.
//!
//! All-or-nothing: no partial results. Every failure keeps the unmodified
//! raw text for the diagnostic view. Pure function of its input and the
//! catalog, so re-validating the same text always yields the same outcome.

use serde_json::Value;
use tracing::warn;

use crate::domain::{ClassificationResult, ClassifyError, TaxonomyCatalog, TaxonomyLevel};

/// Parse backend text as a `{"L1": ..., "L2": ..., "L3": ...}` object and
/// check it against the catalog: field presence and type, per-level
/// membership, then hierarchy consistency.
pub fn validate_response(
    raw: &str,
    catalog: &TaxonomyCatalog,
) -> Result<ClassificationResult, ClassifyError> {
    let cleaned = sanitize_json(raw);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        warn!(error = %e, "backend output is not JSON");
        ClassifyError::MalformedOutput {
            raw: raw.to_string(),
        }
    })?;
    let object = value.as_object().ok_or_else(|| ClassifyError::MalformedOutput {
        raw: raw.to_string(),
    })?;

    let category = string_field(object, TaxonomyLevel::Category, raw)?;
    let sub_category = string_field(object, TaxonomyLevel::SubCategory, raw)?;
    let commodity = string_field(object, TaxonomyLevel::Commodity, raw)?;

    for (level, label) in [
        (TaxonomyLevel::Category, category),
        (TaxonomyLevel::SubCategory, sub_category),
        (TaxonomyLevel::Commodity, commodity),
    ] {
        if !catalog.contains(level, label) {
            return Err(ClassifyError::UnknownLabel {
                level,
                label: label.to_string(),
                raw: raw.to_string(),
            });
        }
    }

    if !catalog.sub_category_belongs_to(category, sub_category) {
        return Err(ClassifyError::InconsistentHierarchy {
            child_level: TaxonomyLevel::SubCategory,
            parent: category.to_string(),
            child: sub_category.to_string(),
            raw: raw.to_string(),
        });
    }
    if !catalog.commodity_belongs_to(sub_category, commodity) {
        return Err(ClassifyError::InconsistentHierarchy {
            child_level: TaxonomyLevel::Commodity,
            parent: sub_category.to_string(),
            child: commodity.to_string(),
            raw: raw.to_string(),
        });
    }

    Ok(ClassificationResult {
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        commodity: commodity.to_string(),
    })
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    level: TaxonomyLevel,
    raw: &str,
) -> Result<&'a str, ClassifyError> {
    object
        .get(level.key())
        .and_then(Value::as_str)
        .ok_or_else(|| ClassifyError::MissingField {
            field: level.key(),
            raw: raw.to_string(),
        })
}

/// Strip the decorations LLMs like to wrap JSON in.
///
/// Handles markdown code blocks (```json ... ``` or ``` ... ```) and JSON
/// embedded in surrounding prose. The raw text itself is never mutated;
/// callers keep it for error reporting.
fn sanitize_json(raw_text: &str) -> String {
    let trimmed = raw_text.trim();

    if trimmed.starts_with("```") {
        let without_prefix = if trimmed.starts_with("```json") {
            trimmed.strip_prefix("```json").unwrap_or(trimmed)
        } else {
            trimmed.strip_prefix("```").unwrap_or(trimmed)
        };

        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
        return without_prefix.trim().to_string();
    }

    // JSON buried in prose: take the outermost brace span.
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if start < end {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TaxonomyCatalog {
        TaxonomyCatalog::embedded().unwrap()
    }

    #[test]
    fn test_valid_chain_accepted() {
        let raw = r#"{"L1":"IT Services","L2":"Cloud","L3":"SaaS Subscription"}"#;
        let result = validate_response(raw, &catalog()).unwrap();
        assert_eq!(
            result,
            ClassificationResult {
                category: "IT Services".to_string(),
                sub_category: "Cloud".to_string(),
                commodity: "SaaS Subscription".to_string(),
            }
        );
    }

    #[test]
    fn test_markdown_fenced_json_accepted() {
        let raw = "```json\n{\"L1\":\"IT Services\",\"L2\":\"Cloud\",\"L3\":\"SaaS Subscription\"}\n```";
        let result = validate_response(raw, &catalog()).unwrap();
        assert_eq!(result.commodity, "SaaS Subscription");
    }

    #[test]
    fn test_prose_is_malformed_and_raw_preserved() {
        let raw = "This PO looks like an IT purchase to me.";
        match validate_response(raw, &catalog()) {
            Err(ClassifyError::MalformedOutput { raw: kept }) => assert_eq!(kept, raw),
            other => panic!("expected MalformedOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        let raw = r#"["IT Services","Cloud","SaaS Subscription"]"#;
        assert!(matches!(
            validate_response(raw, &catalog()),
            Err(ClassifyError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_missing_l3_named() {
        let raw = r#"{"L1":"IT Services","L2":"Cloud"}"#;
        match validate_response(raw, &catalog()) {
            Err(ClassifyError::MissingField { field, raw: kept }) => {
                assert_eq!(field, "L3");
                assert_eq!(kept, raw);
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_field_is_missing() {
        let raw = r#"{"L1":"IT Services","L2":42,"L3":"SaaS Subscription"}"#;
        assert!(matches!(
            validate_response(raw, &catalog()),
            Err(ClassifyError::MissingField { field: "L2", .. })
        ));
    }

    #[test]
    fn test_unknown_label_names_level() {
        let raw = r#"{"L1":"Cryptocurrency","L2":"Cloud","L3":"SaaS Subscription"}"#;
        match validate_response(raw, &catalog()) {
            Err(ClassifyError::UnknownLabel { level, label, .. }) => {
                assert_eq!(level, TaxonomyLevel::Category);
                assert_eq!(label, "Cryptocurrency");
            }
            other => panic!("expected UnknownLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_l3_under_wrong_l2_is_inconsistent() {
        let raw = r#"{"L1":"IT Services","L2":"Hardware","L3":"SaaS Subscription"}"#;
        match validate_response(raw, &catalog()) {
            Err(ClassifyError::InconsistentHierarchy {
                child_level,
                parent,
                child,
                ..
            }) => {
                assert_eq!(child_level, TaxonomyLevel::Commodity);
                assert_eq!(parent, "Hardware");
                assert_eq!(child, "SaaS Subscription");
            }
            other => panic!("expected InconsistentHierarchy, got {:?}", other),
        }
    }

    #[test]
    fn test_l2_under_wrong_l1_is_inconsistent() {
        let raw = r#"{"L1":"Facilities","L2":"Cloud","L3":"SaaS Subscription"}"#;
        assert!(matches!(
            validate_response(raw, &catalog()),
            Err(ClassifyError::InconsistentHierarchy {
                child_level: TaxonomyLevel::SubCategory,
                ..
            })
        ));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let cat = catalog();
        for raw in [
            r#"{"L1":"IT Services","L2":"Cloud","L3":"SaaS Subscription"}"#,
            "free-form prose",
            r#"{"L1":"IT Services","L2":"Hardware","L3":"SaaS Subscription"}"#,
        ] {
            let first = validate_response(raw, &cat);
            let second = validate_response(raw, &cat);
            match (first, second) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => assert_eq!(format!("{:?}", a), format!("{:?}", b)),
                _ => panic!("outcomes diverged for {:?}", raw),
            }
        }
    }

    #[test]
    fn test_sanitize_json_clean() {
        let input = r#"{"L1": "IT Services"}"#;
        assert_eq!(sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = "```json\n{\"L1\": \"IT Services\"}\n```";
        assert_eq!(sanitize_json(input), r#"{"L1": "IT Services"}"#);
    }

    #[test]
    fn test_sanitize_json_markdown_no_lang() {
        let input = "```\n{\"L1\": \"IT Services\"}\n```";
        assert_eq!(sanitize_json(input), r#"{"L1": "IT Services"}"#);
    }

    #[test]
    fn test_sanitize_json_with_surrounding_prose() {
        let input = "Here is the classification:\n{\"L1\": \"IT Services\"}";
        assert_eq!(sanitize_json(input), r#"{"L1": "IT Services"}"#);
    }
}
