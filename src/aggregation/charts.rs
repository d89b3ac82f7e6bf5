//! Display series for the chart tabs: histograms, trend lines and box
//! summaries. These are descriptive only and feed no decision logic.

use super::stats::{describe, mean, DescriptiveStats, Metric};
use crate::core::{RoughnessCondition, SegmentRecord, SegmentView};
use serde::{Deserialize, Serialize};

/// Bin count for the IRI distribution chart
pub const IRI_HISTOGRAM_BINS: usize = 20;

/// Bin count for the crack width, pothole and rut depth charts
pub const DETAIL_HISTOGRAM_BINS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram with the mean as reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub metric: Metric,
    pub bins: Vec<HistogramBin>,
    pub mean: Option<f64>,
}

/// Bin finite values into `bin_count` equal-width bins over `[min, max]`.
///
/// The last bin is closed so the maximum lands in it. When every value is
/// equal a single bin holds them all. No values means no bins.
pub fn histogram(metric: Metric, values: &[f64], bin_count: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let mean = mean(finite.iter().copied());

    let Some(stats) = describe(finite.iter().copied()) else {
        return Histogram {
            metric,
            bins: Vec::new(),
            mean,
        };
    };

    let span = stats.max - stats.min;
    if span == 0.0 || bin_count <= 1 {
        return Histogram {
            metric,
            bins: vec![HistogramBin {
                lower: stats.min,
                upper: stats.max,
                count: finite.len(),
            }],
            mean,
        };
    }

    let width = span / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: stats.min + width * i as f64,
            upper: stats.min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for value in finite {
        let index = (((value - stats.min) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    Histogram { metric, bins, mean }
}

/// Ordinary least squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub x: Metric,
    pub y: Metric,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Smallest and largest x, the extent over which the line is drawn
    pub x_min: f64,
    pub x_max: f64,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y` against `x` over the records where both are finite.
///
/// Returns `None` with fewer than two points or when `x` has no variance.
pub fn fit_trend<'a>(
    records: impl IntoIterator<Item = &'a SegmentRecord>,
    x: Metric,
    y: Metric,
) -> Option<TrendLine> {
    let points: Vec<(f64, f64)> = records
        .into_iter()
        .map(|r| (x.value(r), y.value(r)))
        .filter(|(px, py)| px.is_finite() && py.is_finite())
        .collect();

    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let x_mean = points.iter().map(|(px, _)| px).sum::<f64>() / n;
    let y_mean = points.iter().map(|(_, py)| py).sum::<f64>() / n;

    let (sxx, sxy, syy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), (px, py)| {
        let dx = px - x_mean;
        let dy = py - y_mean;
        (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
    });

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    // A flat y is fitted exactly by the horizontal line
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    let (x_min, x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (px, _)| {
            (lo.min(*px), hi.max(*px))
        });

    Some(TrendLine {
        x,
        y,
        slope,
        intercept,
        r_squared,
        x_min,
        x_max,
    })
}

/// Five-number summary for a box plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

pub fn box_summary(values: impl IntoIterator<Item = f64>) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    Some(BoxSummary {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
        count: sorted.len(),
    })
}

/// Box summary of one metric for the records of one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionBox {
    pub condition: RoughnessCondition,
    pub metric: Metric,
    pub summary: BoxSummary,
}

/// Metrics shown as per-condition box plots
pub const BOX_METRICS: [Metric; 3] = [Metric::CrackArea, Metric::Potholes, Metric::RutDepth];

/// Everything the chart tabs plot besides the raw rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub histograms: Vec<Histogram>,
    pub trends: Vec<TrendLine>,
    pub boxes: Vec<ConditionBox>,
    /// Radial axis maximum shared by every radar series
    pub radar_axis_max: Option<f64>,
}

/// Radial range that keeps every profile on the chart:
/// crack area is scaled down by 3 and potholes by 5 before comparing.
pub fn radar_axis_max(stats: &DescriptiveStats) -> Option<f64> {
    let candidates = [
        stats.iri.map(|s| s.max),
        stats.crack_area.map(|s| s.max / 3.0),
        stats.crack_width.map(|s| s.max),
        stats.potholes.map(|s| s.max / 5.0),
        stats.rut_depth.map(|s| s.max),
    ];

    candidates.into_iter().flatten().reduce(f64::max)
}

pub fn chart_series(view: &SegmentView<'_>, stats: &DescriptiveStats) -> ChartSeries {
    let values = |metric: Metric| -> Vec<f64> { view.iter().map(|r| metric.value(r)).collect() };

    let histograms = vec![
        histogram(Metric::Iri, &values(Metric::Iri), IRI_HISTOGRAM_BINS),
        histogram(
            Metric::CrackWidth,
            &values(Metric::CrackWidth),
            DETAIL_HISTOGRAM_BINS,
        ),
        histogram(
            Metric::Potholes,
            &values(Metric::Potholes),
            DETAIL_HISTOGRAM_BINS,
        ),
        histogram(
            Metric::RutDepth,
            &values(Metric::RutDepth),
            DETAIL_HISTOGRAM_BINS,
        ),
    ];

    let trends = [Metric::Potholes, Metric::RutDepth]
        .into_iter()
        .filter_map(|y| fit_trend(view.iter(), Metric::Iri, y))
        .collect();

    let boxes = RoughnessCondition::KNOWN
        .iter()
        .flat_map(|condition| {
            BOX_METRICS.iter().filter_map(move |metric| {
                box_summary(
                    view.iter()
                        .filter(|r| &r.roughness_condition == condition)
                        .map(|r| metric.value(r)),
                )
                .map(|summary| ConditionBox {
                    condition: condition.clone(),
                    metric: *metric,
                    summary,
                })
            })
        })
        .collect();

    ChartSeries {
        histograms,
        trends,
        boxes,
        radar_axis_max: radar_axis_max(stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::test_support::segment;
    use crate::core::SegmentCollection;

    #[test]
    fn histogram_puts_maximum_in_last_bin() {
        let h = histogram(Metric::Iri, &[0.0, 2.5, 5.0, 10.0], 4);
        let counts: Vec<usize> = h.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1]);
        assert_eq!(h.bins[0].lower, 0.0);
        assert_eq!(h.bins[3].upper, 10.0);
        assert_eq!(h.mean, Some(4.375));
    }

    #[test]
    fn histogram_of_equal_values_is_one_bin() {
        let h = histogram(Metric::Potholes, &[3.0, 3.0, 3.0], 15);
        assert_eq!(h.bins.len(), 1);
        assert_eq!(h.bins[0].count, 3);
    }

    #[test]
    fn histogram_of_nothing_has_no_bins() {
        let h = histogram(Metric::RutDepth, &[], 15);
        assert!(h.bins.is_empty());
        assert_eq!(h.mean, None);
    }

    #[test]
    fn trend_fits_exact_line() {
        let records: Vec<SegmentRecord> = [1.0, 2.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, iri)| {
                let mut r = segment(i as f64 * 100.0, *iri, RoughnessCondition::Fair);
                r.number_of_potholes_per_km = 2.0 * iri + 1.0;
                r
            })
            .collect();
        let trend = fit_trend(records.iter(), Metric::Iri, Metric::Potholes).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
        assert!((trend.r_squared - 1.0).abs() < 1e-12);
        assert_eq!((trend.x_min, trend.x_max), (1.0, 3.0));
        assert!((trend.predict(4.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn trend_needs_two_points_and_x_variance() {
        let one = [segment(0.0, 4.0, RoughnessCondition::Fair)];
        assert_eq!(fit_trend(one.iter(), Metric::Iri, Metric::RutDepth), None);

        let flat = [
            segment(0.0, 4.0, RoughnessCondition::Fair),
            segment(100.0, 4.0, RoughnessCondition::Poor),
        ];
        assert_eq!(fit_trend(flat.iter(), Metric::Iri, Metric::RutDepth), None);
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let summary = box_summary([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
        assert_eq!(summary.max, 4.0);
        assert_eq!(box_summary(std::iter::empty()), None);
    }

    #[test]
    fn radar_axis_scales_crack_area_and_potholes() {
        let data = SegmentCollection::new(vec![segment(0.0, 2.0, RoughnessCondition::Good)]);
        let mut record = data.records()[0].clone();
        record.total_crack_area_percent = 60.0;
        record.number_of_potholes_per_km = 10.0;
        let stats = DescriptiveStats::compute([record].iter());
        // crack area 60 / 3 = 20 beats IRI 2, width 1, potholes 2, rut 0.5
        assert_eq!(radar_axis_max(&stats), Some(20.0));
        assert_eq!(radar_axis_max(&DescriptiveStats::default()), None);
    }

    #[test]
    fn chart_series_only_boxes_present_conditions() {
        let data = SegmentCollection::new(vec![
            segment(0.0, 2.0, RoughnessCondition::Good),
            segment(100.0, 9.0, RoughnessCondition::Poor),
        ]);
        let view = data.view();
        let stats = DescriptiveStats::compute(view.iter());
        let series = chart_series(&view, &stats);
        assert_eq!(series.histograms.len(), 4);
        assert_eq!(series.trends.len(), 2);
        assert_eq!(series.boxes.len(), 6);
        assert!(series
            .boxes
            .iter()
            .all(|b| b.condition == RoughnessCondition::Good
                || b.condition == RoughnessCondition::Poor));
    }
}
