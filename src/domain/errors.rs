//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Validation failures keep
//! the unmodified backend text so callers can show it for diagnosis.

use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::TaxonomyLevel;

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Description was empty or whitespace-only. Rejected before any
    /// backend call.
    #[error("description is empty")]
    InvalidRequest,

    /// Backend call exceeded the configured duration.
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),

    /// Network or backend-level failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Backend-reported rate limit (HTTP 429). Caller should back off
    /// before retrying.
    #[error("backend rate limited the request")]
    RateLimited,

    /// Backend text is not parseable as a JSON object.
    #[error("backend output is not a JSON object")]
    MalformedOutput { raw: String },

    /// One of the `L1`/`L2`/`L3` fields is absent or not a string.
    #[error("backend output is missing `{field}` (or it is not a string)")]
    MissingField { field: &'static str, raw: String },

    /// A field's value is not present at that level of the catalog.
    #[error("{label:?} is not a known {level} label")]
    UnknownLabel {
        level: TaxonomyLevel,
        label: String,
        raw: String,
    },

    /// All labels exist individually but the child is not under the parent.
    #[error("{child:?} ({child_level}) does not belong to {parent:?}")]
    InconsistentHierarchy {
        child_level: TaxonomyLevel,
        parent: String,
        child: String,
        raw: String,
    },
}

impl ClassifyError {
    /// Transient failures are worth retrying; everything else is not.
    /// A response that arrived but failed validation is never transient:
    /// silently retrying it would mask a prompt/model mismatch.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClassifyError::Timeout(_) | ClassifyError::Transport(_) | ClassifyError::RateLimited
        )
    }

    /// The unmodified backend text, present on validation failures.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ClassifyError::MalformedOutput { raw }
            | ClassifyError::MissingField { raw, .. }
            | ClassifyError::UnknownLabel { raw, .. }
            | ClassifyError::InconsistentHierarchy { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(ClassifyError::Timeout(Duration::from_secs(30)).is_transient());
        assert!(ClassifyError::Transport("connection reset".into()).is_transient());
        assert!(ClassifyError::RateLimited.is_transient());
        assert!(!ClassifyError::InvalidRequest.is_transient());
        assert!(
            !ClassifyError::MalformedOutput {
                raw: "not json".into()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_raw_output_only_on_validation_failures() {
        let err = ClassifyError::MissingField {
            field: "L3",
            raw: "{\"L1\":\"IT Services\"}".into(),
        };
        assert_eq!(err.raw_output(), Some("{\"L1\":\"IT Services\"}"));
        assert_eq!(ClassifyError::RateLimited.raw_output(), None);
    }
}
