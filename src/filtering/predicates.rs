//! Pure predicate functions for filtering segment records.
//!
//! Each predicate takes a record and one part of the criteria and returns a
//! boolean. The filter engine combines them with AND semantics.
//!
//! # Examples
//!
//! ```
//! use roadwatch::core::{RoughnessCondition, SegmentRecord};
//! use roadwatch::filtering::predicates::within_iri_range;
//!
//! let record = SegmentRecord {
//!     start_point: 0.0,
//!     end_point: 100.0,
//!     latitude: -7.8,
//!     longitude: 110.4,
//!     iri: 5.0,
//!     roughness_condition: RoughnessCondition::Fair,
//!     condition_label: "Sedang".to_string(),
//!     total_crack_area_percent: 4.0,
//!     average_crack_width_mm: 1.5,
//!     number_of_potholes_per_km: 2.0,
//!     average_rut_depth_cm: 0.8,
//!     speed_kmh: 40.0,
//! };
//!
//! // Both bounds are inclusive
//! assert!(within_iri_range(&record, 5.0, 5.0));
//! assert!(!within_iri_range(&record, 5.1, 10.0));
//! ```

use super::FilterCriteria;
use crate::core::{RoughnessCondition, SegmentRecord};
use std::collections::BTreeSet;

/// Check if the record's condition is one of the selected conditions.
///
/// An empty selection means no restriction and always passes.
#[inline]
pub fn matches_condition(record: &SegmentRecord, conditions: &BTreeSet<RoughnessCondition>) -> bool {
    conditions.is_empty() || conditions.contains(&record.roughness_condition)
}

/// Check if the record's IRI lies in `[iri_min, iri_max]`.
///
/// A NaN IRI is never within range.
#[inline]
pub fn within_iri_range(record: &SegmentRecord, iri_min: f64, iri_max: f64) -> bool {
    iri_min <= record.iri && record.iri <= iri_max
}

/// Check every part of the criteria
#[inline]
pub fn matches_criteria(record: &SegmentRecord, criteria: &FilterCriteria) -> bool {
    matches_condition(record, criteria.conditions())
        && within_iri_range(record, criteria.iri_min(), criteria.iri_max())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::test_support::segment;

    #[test]
    fn empty_selection_passes_every_condition() {
        let selection = BTreeSet::new();
        assert!(matches_condition(
            &segment(0.0, 2.0, RoughnessCondition::Good),
            &selection
        ));
        assert!(matches_condition(
            &segment(0.0, 2.0, RoughnessCondition::parse("???")),
            &selection
        ));
    }

    #[test]
    fn selection_restricts_conditions() {
        let selection: BTreeSet<_> = [RoughnessCondition::Poor].into_iter().collect();
        assert!(matches_condition(
            &segment(0.0, 9.0, RoughnessCondition::Poor),
            &selection
        ));
        assert!(!matches_condition(
            &segment(0.0, 9.0, RoughnessCondition::Fair),
            &selection
        ));
    }

    #[test]
    fn iri_range_is_inclusive_on_both_ends() {
        let low = segment(0.0, 2.0, RoughnessCondition::Good);
        let high = segment(0.0, 6.0, RoughnessCondition::Fair);
        assert!(within_iri_range(&low, 2.0, 6.0));
        assert!(within_iri_range(&high, 2.0, 6.0));
        assert!(!within_iri_range(&high, 2.0, 5.99));
    }

    #[test]
    fn nan_iri_is_outside_any_range() {
        let record = segment(0.0, f64::NAN, RoughnessCondition::Good);
        assert!(!within_iri_range(&record, f64::MIN, f64::MAX));
    }
}
