//! Enumerated field values shared by forms, facets and printed documents.

use crate::table::FacetOption;

/// A closed set of values serialized as snake_case keys.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    /// Wire key, identical to the serde representation.
    fn key(self) -> &'static str;

    /// Human-readable label.
    fn label(self) -> &'static str;

    fn facet_options() -> Vec<FacetOption> {
        Self::ALL.iter().map(|c| FacetOption::new(c.key(), c.label())).collect()
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisciplinaryDegree, InvestigationStatus, Sector};

    #[test]
    fn test_keys_match_serde() {
        for status in InvestigationStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.key()));
        }
        for sector in Sector::ALL {
            let json = serde_json::to_string(sector).unwrap();
            assert_eq!(json, format!("\"{}\"", sector.key()));
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(DisciplinaryDegree::from_key("third"), Some(DisciplinaryDegree::Third));
        assert_eq!(DisciplinaryDegree::from_key("fifth"), None);
    }

    #[test]
    fn test_facet_options_cover_all() {
        let options = InvestigationStatus::facet_options();
        assert_eq!(options.len(), InvestigationStatus::ALL.len());
        assert_eq!(options[0].value, "pending");
    }
}
