//! Dataset-level aggregation of a filtered segment selection.
//!
//! [`aggregate`] recomputes everything from scratch on every call. Each
//! statistic that divides has a defined value for an empty selection:
//! counts and percentages are zero and means are `None`.

pub mod charts;
pub mod stats;

pub use charts::{BoxSummary, ChartSeries, ConditionBox, Histogram, HistogramBin, TrendLine};
pub use stats::{describe, DescriptiveStats, Metric, MetricStats};

use crate::core::{RoughnessCondition, SegmentRecord, SegmentView};
use crate::priority::{classify, needs_repair, PriorityTier};
use serde::{Deserialize, Serialize};
use stats::{mean, percent, round2};
use tracing::{debug, info_span};

/// Count and share of one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionShare {
    pub condition: RoughnessCondition,
    pub count: usize,
    /// Percent of the selection, rounded to 2 decimals
    pub percent: f64,
}

/// How the selection splits across roughness conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDistribution {
    /// One entry per known condition, best to worst, including zero counts
    pub shares: Vec<ConditionShare>,
    /// Records whose condition label is not one of the known four
    pub unrecognized_count: usize,
    pub unrecognized_percent: f64,
}

impl ConditionDistribution {
    fn compute<'a>(records: impl Iterator<Item = &'a SegmentRecord>, total: usize) -> Self {
        let mut counts = [0usize; 4];
        let mut unrecognized_count = 0;
        for record in records {
            match record.roughness_condition.known_index() {
                Some(i) => counts[i] += 1,
                None => unrecognized_count += 1,
            }
        }

        let shares = RoughnessCondition::KNOWN
            .iter()
            .zip(counts)
            .map(|(condition, count)| ConditionShare {
                condition: condition.clone(),
                count,
                percent: round2(percent(count, total)),
            })
            .collect();

        Self {
            shares,
            unrecognized_count,
            unrecognized_percent: round2(percent(unrecognized_count, total)),
        }
    }

    pub fn get(&self, condition: &RoughnessCondition) -> Option<&ConditionShare> {
        self.shares.iter().find(|s| &s.condition == condition)
    }

    /// Sum of every count, including unrecognized labels
    pub fn total_count(&self) -> usize {
        self.shares.iter().map(|s| s.count).sum::<usize>() + self.unrecognized_count
    }

    pub fn total_percent(&self) -> f64 {
        self.shares.iter().map(|s| s.percent).sum::<f64>() + self.unrecognized_percent
    }
}

/// Mean of the five profile metrics for one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionProfile {
    pub condition: RoughnessCondition,
    pub count: usize,
    /// IRI, crack area, crack width, potholes, rut depth; `None` when no
    /// member has a finite value for that metric
    pub means: [Option<f64>; 5],
}

/// Profiles for the known conditions present in the selection.
///
/// Absent conditions get no profile at all rather than a zero vector.
fn condition_profiles(view: &SegmentView<'_>) -> Vec<ConditionProfile> {
    RoughnessCondition::KNOWN
        .iter()
        .filter_map(|condition| {
            let members: Vec<&SegmentRecord> = view
                .iter()
                .filter(|r| &r.roughness_condition == condition)
                .collect();
            if members.is_empty() {
                return None;
            }

            let means = Metric::ALL.map(|metric| mean(members.iter().map(|r| metric.value(r))));

            Some(ConditionProfile {
                condition: condition.clone(),
                count: members.len(),
                means,
            })
        })
        .collect()
}

/// Count and covered length of one priority tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTotal {
    pub tier: PriorityTier,
    pub count: usize,
    /// `max(end_point) - min(start_point)` over the tier's records: the
    /// span of the bounding envelope, not the sum of segment lengths
    pub total_length_meters: f64,
}

impl TierTotal {
    pub fn total_length_km(&self) -> f64 {
        self.total_length_meters / 1000.0
    }
}

/// Span from the first start to the last end, 0 for no records
fn envelope_span<'a>(records: impl Iterator<Item = &'a SegmentRecord>) -> f64 {
    let (min_start, max_end) = records.fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), r| (lo.min(r.start_point), hi.max(r.end_point)),
    );
    if min_start.is_finite() && max_end.is_finite() {
        max_end - min_start
    } else {
        0.0
    }
}

/// Tiers reported with totals: every valid tier, most urgent first
const TOTALED_TIERS: [PriorityTier; 4] = [
    PriorityTier::High,
    PriorityTier::Medium,
    PriorityTier::Low,
    PriorityTier::None,
];

fn tier_totals(view: &SegmentView<'_>) -> Vec<TierTotal> {
    TOTALED_TIERS
        .iter()
        .map(|tier| {
            let members = || view.iter().filter(|r| classify(r) == *tier);
            TierTotal {
                tier: *tier,
                count: members().count(),
                total_length_meters: envelope_span(members()),
            }
        })
        .collect()
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Headline numbers for the dashboard overview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    /// Envelope of the whole selection in km
    pub total_length_km: Option<f64>,
    pub mean_iri: Option<f64>,
    pub mean_crack_area: Option<f64>,
    pub mean_potholes: Option<f64>,
    /// Where the map is centered
    pub map_center: Option<GeoPoint>,
}

fn overview(view: &SegmentView<'_>, stats: &DescriptiveStats) -> OverviewMetrics {
    let latitude = mean(view.iter().map(|r| r.latitude));
    let longitude = mean(view.iter().map(|r| r.longitude));

    OverviewMetrics {
        total_length_km: (!view.is_empty()).then(|| envelope_span(view.iter()) / 1000.0),
        mean_iri: stats.iri.map(|s| s.mean),
        mean_crack_area: stats.crack_area.map(|s| s.mean),
        mean_potholes: stats.potholes.map(|s| s.mean),
        map_center: latitude
            .zip(longitude)
            .map(|(latitude, longitude)| GeoPoint {
                latitude,
                longitude,
            }),
    }
}

/// Every statistic derived from one filtered selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_segments: usize,
    pub distribution: ConditionDistribution,
    pub stats: DescriptiveStats,
    pub profiles: Vec<ConditionProfile>,
    /// Segments with IRI > 8
    pub repair_count: usize,
    /// `repair_count / total_segments * 100`, 0 for an empty selection
    pub repair_percent: f64,
    /// High, Medium, Low and None, in that order
    pub tier_totals: Vec<TierTotal>,
    /// Segments whose IRI is negative or not a number
    pub unclassified_count: usize,
    pub overview: OverviewMetrics,
    pub charts: ChartSeries,
}

impl AggregateReport {
    pub fn is_empty(&self) -> bool {
        self.total_segments == 0
    }

    pub fn tier_total(&self, tier: PriorityTier) -> Option<&TierTotal> {
        self.tier_totals.iter().find(|t| t.tier == tier)
    }

    pub fn profile(&self, condition: &RoughnessCondition) -> Option<&ConditionProfile> {
        self.profiles.iter().find(|p| &p.condition == condition)
    }
}

/// Compute the aggregate report for a selection
pub fn aggregate(view: &SegmentView<'_>) -> AggregateReport {
    let _span = info_span!("aggregate", segments = view.len()).entered();

    let total = view.len();
    let stats = DescriptiveStats::compute(view.iter());
    let repair_count = view.iter().filter(|r| needs_repair(r)).count();
    let unclassified_count = view
        .iter()
        .filter(|r| classify(r) == PriorityTier::Unclassified)
        .count();

    let report = AggregateReport {
        total_segments: total,
        distribution: ConditionDistribution::compute(view.iter(), total),
        profiles: condition_profiles(view),
        repair_count,
        repair_percent: percent(repair_count, total),
        tier_totals: tier_totals(view),
        unclassified_count,
        overview: overview(view, &stats),
        charts: charts::chart_series(view, &stats),
        stats,
    };

    debug!(
        total,
        repair_count,
        unclassified = unclassified_count,
        profiles = report.profiles.len(),
        "Aggregated selection"
    );

    report
}
