//! Descriptive statistics over segment metrics.

use crate::core::SegmentRecord;
use serde::{Deserialize, Serialize};

/// The five numeric survey metrics, in radar-chart order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Iri,
    CrackArea,
    CrackWidth,
    Potholes,
    RutDepth,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Iri,
        Metric::CrackArea,
        Metric::CrackWidth,
        Metric::Potholes,
        Metric::RutDepth,
    ];

    pub fn value(&self, record: &SegmentRecord) -> f64 {
        match self {
            Metric::Iri => record.iri,
            Metric::CrackArea => record.total_crack_area_percent,
            Metric::CrackWidth => record.average_crack_width_mm,
            Metric::Potholes => record.number_of_potholes_per_km,
            Metric::RutDepth => record.average_rut_depth_cm,
        }
    }

    /// Short name used in summary text
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Iri => "IRI",
            Metric::CrackArea => "Crack Area",
            Metric::CrackWidth => "Crack Width",
            Metric::Potholes => "Potholes",
            Metric::RutDepth => "Rut Depth",
        }
    }

    /// Axis label used by charts
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Iri => "IRI (m/km)",
            Metric::CrackArea => "Total Crack Area (%)",
            Metric::CrackWidth => "Avg Crack Width (mm)",
            Metric::Potholes => "Potholes (per km)",
            Metric::RutDepth => "Rut Depth (cm)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Iri => "m/km",
            Metric::CrackArea => "%",
            Metric::CrackWidth => "mm",
            Metric::Potholes => "per km",
            Metric::RutDepth => "cm",
        }
    }
}

/// Mean, minimum and maximum of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Number of finite values that went into the statistics
    pub count: usize,
}

/// Plain arithmetic mean/min/max in one pass.
///
/// Non-finite values are skipped. Returns `None` when nothing is left,
/// which is the "no data" marker for empty selections.
pub fn describe(values: impl IntoIterator<Item = f64>) -> Option<MetricStats> {
    let (sum, min, max, count) = values.into_iter().filter(|v| v.is_finite()).fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY, 0usize),
        |(sum, min, max, count), v| (sum + v, min.min(v), max.max(v), count + 1),
    );

    (count > 0).then(|| MetricStats {
        mean: sum / count as f64,
        min,
        max,
        count,
    })
}

/// Arithmetic mean of the finite values
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    describe(values).map(|stats| stats.mean)
}

/// Round to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / total * 100`, or 0 when `total` is 0
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Per-metric descriptive statistics over a selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub iri: Option<MetricStats>,
    pub crack_area: Option<MetricStats>,
    pub crack_width: Option<MetricStats>,
    pub potholes: Option<MetricStats>,
    pub rut_depth: Option<MetricStats>,
}

impl DescriptiveStats {
    pub fn compute<'a>(records: impl Iterator<Item = &'a SegmentRecord> + Clone) -> Self {
        let of = |metric: Metric| describe(records.clone().map(|r| metric.value(r)));
        Self {
            iri: of(Metric::Iri),
            crack_area: of(Metric::CrackArea),
            crack_width: of(Metric::CrackWidth),
            potholes: of(Metric::Potholes),
            rut_depth: of(Metric::RutDepth),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricStats> {
        match metric {
            Metric::Iri => self.iri.as_ref(),
            Metric::CrackArea => self.crack_area.as_ref(),
            Metric::CrackWidth => self.crack_width.as_ref(),
            Metric::Potholes => self.potholes.as_ref(),
            Metric::RutDepth => self.rut_depth.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::test_support::segment;
    use crate::core::RoughnessCondition;

    #[test]
    fn describe_computes_plain_mean_min_max() {
        let stats = describe([2.0, 4.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn describe_skips_non_finite_values() {
        let stats = describe([1.0, f64::NAN, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn describe_empty_is_none() {
        assert_eq!(describe(std::iter::empty()), None);
        assert_eq!(describe([f64::NAN]), None);
    }

    #[test]
    fn round2_and_percent() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(percent(1, 3), 100.0 / 3.0);
        assert_eq!(percent(0, 0), 0.0);
    }

    #[test]
    fn descriptive_stats_cover_every_metric() {
        let records = [
            segment(0.0, 2.0, RoughnessCondition::Good),
            segment(100.0, 6.0, RoughnessCondition::Fair),
        ];
        let stats = DescriptiveStats::compute(records.iter());
        assert_eq!(stats.iri.unwrap().mean, 4.0);
        assert_eq!(stats.crack_area.unwrap().max, 12.0);
        assert_eq!(stats.crack_width.unwrap().min, 1.0);
        assert_eq!(stats.potholes.unwrap().mean, 4.0);
        assert_eq!(stats.rut_depth.unwrap().max, 1.5);
        for metric in Metric::ALL {
            assert!(stats.get(metric).is_some());
        }
    }
}
