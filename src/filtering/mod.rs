//! Filter engine with metrics tracking.
//!
//! Filtering is pure and order-preserving: it borrows the source rows and
//! returns a [`SegmentView`] over the survivors. An empty result is a normal
//! outcome, not an error.

pub mod predicates;

use crate::core::{RoughnessCondition, SegmentCollection, SegmentRecord, SegmentView};
use crate::errors::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Lower end of the dashboard's IRI slider (m/km)
pub const DEFAULT_IRI_MIN: f64 = 0.0;

/// Upper end of the dashboard's IRI slider (m/km)
pub const DEFAULT_IRI_MAX: f64 = 10.0;

/// Condition labels meaning "no condition restriction"
const ALL_SENTINELS: [&str; 2] = ["all", "semua"];

/// User-selected filter criteria.
///
/// Immutable once built; a new value is created per interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    conditions: BTreeSet<RoughnessCondition>,
    iri_min: f64,
    iri_max: f64,
}

impl FilterCriteria {
    /// Build criteria from a condition selection and an inclusive IRI range.
    ///
    /// An empty selection means every condition.
    pub fn new(
        conditions: impl IntoIterator<Item = RoughnessCondition>,
        iri_min: f64,
        iri_max: f64,
    ) -> Result<Self> {
        if !iri_min.is_finite() || !iri_max.is_finite() {
            return Err(Error::invalid_criteria(format!(
                "IRI bounds must be finite numbers, got [{}, {}]",
                iri_min, iri_max
            )));
        }
        if iri_min > iri_max {
            return Err(Error::invalid_criteria(format!(
                "IRI minimum {} is greater than maximum {}",
                iri_min, iri_max
            )));
        }

        Ok(Self {
            conditions: conditions.into_iter().collect(),
            iri_min,
            iri_max,
        })
    }

    /// Build criteria from condition labels.
    ///
    /// The sentinel `all` (or `semua`) anywhere in the list lifts the
    /// condition restriction, as does an empty list.
    pub fn from_labels<S: AsRef<str>>(labels: &[S], iri_min: f64, iri_max: f64) -> Result<Self> {
        let wants_all = labels
            .iter()
            .any(|label| ALL_SENTINELS.contains(&label.as_ref().trim().to_lowercase().as_str()));

        let conditions: Vec<RoughnessCondition> = if wants_all {
            Vec::new()
        } else {
            labels
                .iter()
                .map(|label| RoughnessCondition::parse(label.as_ref()))
                .collect()
        };

        if let Some(unknown) = conditions.iter().find(|c| !c.is_known()) {
            return Err(Error::invalid_criteria(format!(
                "unknown roughness condition '{}'",
                unknown
            )));
        }

        Self::new(conditions, iri_min, iri_max)
    }

    /// No condition restriction over the default IRI range
    pub fn all() -> Self {
        Self {
            conditions: BTreeSet::new(),
            iri_min: DEFAULT_IRI_MIN,
            iri_max: DEFAULT_IRI_MAX,
        }
    }

    pub fn conditions(&self) -> &BTreeSet<RoughnessCondition> {
        &self.conditions
    }

    pub fn iri_min(&self) -> f64 {
        self.iri_min
    }

    pub fn iri_max(&self) -> f64 {
        self.iri_max
    }

    /// Whether the condition part of the criteria is unrestricted
    pub fn all_conditions(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::all()
    }
}

/// Metrics tracking filtering decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterMetrics {
    /// Total records before filtering
    pub total_items: usize,

    /// Records removed by the condition selection
    pub filtered_by_condition: usize,

    /// Records that passed the condition selection but not the IRI range
    pub filtered_by_iri: usize,

    /// Records included in the result
    pub included: usize,
}

impl FilterMetrics {
    /// Total records filtered (all reasons).
    pub fn total_filtered(&self) -> usize {
        self.filtered_by_condition + self.filtered_by_iri
    }

    /// Percentage of records included.
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_items == 0 {
            0.0
        } else {
            (self.included as f64 / self.total_items as f64) * 100.0
        }
    }
}

/// Result of filtering with transparency metrics.
#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub view: SegmentView<'a>,
    pub metrics: FilterMetrics,
}

/// Keep the records matching `criteria`, in input order.
///
/// Accepts any iterator of borrowed records, so a view can be filtered
/// again: `filter_segments(view.iter(), &criteria)`.
pub fn filter_segments<'a, I>(records: I, criteria: &FilterCriteria) -> SegmentView<'a>
where
    I: IntoIterator<Item = &'a SegmentRecord>,
{
    records
        .into_iter()
        .filter(|record| predicates::matches_criteria(record, criteria))
        .collect()
}

/// Same as [`filter_segments`] but also reports why records were dropped.
pub fn filter_with_metrics<'a, I>(records: I, criteria: &FilterCriteria) -> FilterResult<'a>
where
    I: IntoIterator<Item = &'a SegmentRecord>,
{
    let mut metrics = FilterMetrics::default();
    let mut kept = Vec::new();

    for record in records {
        metrics.total_items += 1;
        if !predicates::matches_condition(record, criteria.conditions()) {
            metrics.filtered_by_condition += 1;
        } else if !predicates::within_iri_range(record, criteria.iri_min(), criteria.iri_max()) {
            metrics.filtered_by_iri += 1;
        } else {
            kept.push(record);
        }
    }
    metrics.included = kept.len();

    debug!(
        total = metrics.total_items,
        by_condition = metrics.filtered_by_condition,
        by_iri = metrics.filtered_by_iri,
        included = metrics.included,
        removed = metrics.total_filtered(),
        "Filtered segments"
    );

    FilterResult {
        view: SegmentView::new(kept),
        metrics,
    }
}

impl SegmentCollection {
    /// Filter this collection without copying rows
    pub fn filter(&self, criteria: &FilterCriteria) -> SegmentView<'_> {
        filter_segments(self.iter(), criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::test_support::segment;
    use pretty_assertions::assert_eq;

    fn mixed() -> SegmentCollection {
        SegmentCollection::new(vec![
            segment(0.0, 1.8, RoughnessCondition::VeryGood),
            segment(100.0, 9.4, RoughnessCondition::Poor),
            segment(200.0, 4.1, RoughnessCondition::Fair),
            segment(300.0, 2.9, RoughnessCondition::Poor),
            segment(400.0, 12.0, RoughnessCondition::Poor),
            segment(500.0, 6.0, RoughnessCondition::Good),
        ])
    }

    fn starts(view: &SegmentView<'_>) -> Vec<f64> {
        view.iter().map(|r| r.start_point).collect()
    }

    #[test]
    fn all_criteria_apply_default_iri_range() {
        let data = mixed();
        let view = data.filter(&FilterCriteria::all());
        // 12.0 is above the default 10.0 maximum
        assert_eq!(starts(&view), vec![0.0, 100.0, 200.0, 300.0, 500.0]);
    }

    #[test]
    fn condition_and_iri_apply_together() {
        let data = mixed();
        let criteria = FilterCriteria::new([RoughnessCondition::Poor], 0.0, 10.0).unwrap();
        let view = data.filter(&criteria);
        assert_eq!(starts(&view), vec![100.0, 300.0]);
        assert!(view
            .iter()
            .all(|r| r.roughness_condition == RoughnessCondition::Poor));
    }

    #[test]
    fn no_match_yields_empty_view() {
        let data = mixed();
        let criteria = FilterCriteria::new([RoughnessCondition::VeryGood], 5.0, 10.0).unwrap();
        assert!(data.filter(&criteria).is_empty());
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let data = mixed();
        let criteria = FilterCriteria::new([RoughnessCondition::Poor], 2.0, 10.0).unwrap();
        let once = data.filter(&criteria);
        let twice = filter_segments(once.iter(), &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn sentinel_label_lifts_condition_restriction() {
        let criteria = FilterCriteria::from_labels(&["Poor", "All"], 0.0, 10.0).unwrap();
        assert!(criteria.all_conditions());

        let criteria = FilterCriteria::from_labels(&["Semua"], 0.0, 10.0).unwrap();
        assert!(criteria.all_conditions());

        let empty: [&str; 0] = [];
        let criteria = FilterCriteria::from_labels(&empty, 0.0, 10.0).unwrap();
        assert!(criteria.all_conditions());
    }

    #[test]
    fn labels_parse_into_conditions() {
        let criteria = FilterCriteria::from_labels(&["poor", "Sedang"], 1.0, 9.0).unwrap();
        let expected: BTreeSet<_> = [RoughnessCondition::Fair, RoughnessCondition::Poor]
            .into_iter()
            .collect();
        assert_eq!(criteria.conditions(), &expected);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = FilterCriteria::from_labels(&["Excellent"], 0.0, 10.0).unwrap_err();
        assert!(err.to_string().contains("Excellent"));
    }

    #[test]
    fn inverted_or_non_finite_range_is_rejected() {
        let none: [RoughnessCondition; 0] = [];
        assert!(FilterCriteria::new(none.clone(), 6.0, 5.0).is_err());
        assert!(FilterCriteria::new(none.clone(), f64::NAN, 5.0).is_err());
        assert!(FilterCriteria::new(none, 5.0, 5.0).is_ok());
    }

    #[test]
    fn metrics_explain_dropped_records() {
        let data = mixed();
        let criteria = FilterCriteria::new([RoughnessCondition::Poor], 0.0, 10.0).unwrap();
        let result = filter_with_metrics(data.iter(), &criteria);
        assert_eq!(
            result.metrics,
            FilterMetrics {
                total_items: 6,
                filtered_by_condition: 3,
                filtered_by_iri: 1,
                included: 2,
            }
        );
        assert_eq!(result.metrics.total_filtered(), 4);
        assert_eq!(result.view, data.filter(&criteria));
    }

    #[test]
    fn inclusion_rate_handles_empty_input() {
        assert_eq!(FilterMetrics::default().inclusion_rate(), 0.0);
    }
}
