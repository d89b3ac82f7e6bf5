//! Presentation report assembly.
//!
//! [`build_report`] only repackages what [`aggregate`](crate::aggregation::aggregate)
//! already computed, plus row projections of the selection (the repair
//! table and the map markers). Writers render a [`PresentationReport`]
//! without touching the source rows again.

pub mod palette;

pub use palette::{condition_hex, gauge_band, GaugeBand, MarkerColor, GAUGE_BANDS, GAUGE_THRESHOLD};

use crate::aggregation::{AggregateReport, ChartSeries, GeoPoint, Metric, OverviewMetrics};
use crate::core::{RoughnessCondition, SegmentRecord, SegmentView};
use crate::priority::{needs_repair, PriorityTier};
use serde::Serialize;
use tracing::debug;

/// Placeholder shown in place of a statistic over an empty selection
pub const NO_DATA: &str = "no data";

/// Message shown instead of the report body for an empty selection
pub const NO_MATCHING_SEGMENTS: &str = "No matching segments";

/// One line of the condition distribution summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionLine {
    pub condition: RoughnessCondition,
    pub count: usize,
    pub percent: f64,
    /// e.g. `Very Good: 33.33% (1 segments)`
    pub text: String,
}

/// One line of the damage statistics summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub metric: Metric,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Percent of segments needing repair
    pub value: f64,
    pub bands: Vec<GaugeBand>,
    pub threshold: f64,
}

impl Gauge {
    pub fn band(&self) -> &'static GaugeBand {
        gauge_band(self.value)
    }

    pub fn exceeds_threshold(&self) -> bool {
        self.value > self.threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub condition: RoughnessCondition,
    pub color: &'static str,
    /// Mean of each metric, in [`RadarChart::axes`] order; `None` leaves
    /// the axis unplotted
    pub values: [Option<f64>; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: [&'static str; 5],
    /// Upper end of the radial axis, `None` without data
    pub axis_max: Option<f64>,
    pub series: Vec<RadarSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummaryRow {
    pub tier: PriorityTier,
    pub label: &'static str,
    pub range: &'static str,
    pub count: usize,
    pub total_length_km: f64,
    pub recommended_action: &'static str,
}

/// What the map renderer needs for one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub condition: RoughnessCondition,
    pub start_point: f64,
    pub end_point: f64,
    pub total_crack_area_percent: f64,
    pub number_of_potholes_per_km: f64,
    pub iri: f64,
    pub color: MarkerColor,
}

impl MapMarker {
    fn from_record(record: &SegmentRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            condition: record.roughness_condition.clone(),
            start_point: record.start_point,
            end_point: record.end_point,
            total_crack_area_percent: record.total_crack_area_percent,
            number_of_potholes_per_km: record.number_of_potholes_per_km,
            iri: record.iri,
            color: MarkerColor::for_condition(&record.roughness_condition),
        }
    }
}

/// Everything a renderer needs, computed once per filter change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationReport<'a> {
    /// Set when the selection is empty; renderers show
    /// [`NO_MATCHING_SEGMENTS`] instead of the body
    pub no_data: bool,
    pub total_segments: usize,
    pub overview: OverviewMetrics,
    pub distribution: Vec<DistributionLine>,
    pub statistics: Vec<StatLine>,
    /// Segments with IRI > 8, in selection order, borrowed from the source
    pub needs_repair: Vec<&'a SegmentRecord>,
    pub gauge: Gauge,
    pub radar: RadarChart,
    pub tiers: Vec<TierSummaryRow>,
    pub markers: Vec<MapMarker>,
    pub map_center: Option<GeoPoint>,
    pub charts: ChartSeries,
}

fn distribution_lines(report: &AggregateReport) -> Vec<DistributionLine> {
    let mut lines: Vec<DistributionLine> = report
        .distribution
        .shares
        .iter()
        .map(|share| DistributionLine {
            condition: share.condition.clone(),
            count: share.count,
            percent: share.percent,
            text: format!(
                "{}: {}% ({} segments)",
                share.condition.label(),
                share.percent,
                share.count
            ),
        })
        .collect();

    if report.distribution.unrecognized_count > 0 {
        let condition = RoughnessCondition::Unrecognized("Unrecognized".to_string());
        lines.push(DistributionLine {
            text: format!(
                "{}: {}% ({} segments)",
                condition.label(),
                report.distribution.unrecognized_percent,
                report.distribution.unrecognized_count
            ),
            condition,
            count: report.distribution.unrecognized_count,
            percent: report.distribution.unrecognized_percent,
        });
    }

    lines
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit == "%" {
        format!("{:.2}%", value)
    } else {
        format!("{:.2} {}", value, unit)
    }
}

fn stat_lines(report: &AggregateReport) -> Vec<StatLine> {
    Metric::ALL
        .iter()
        .map(|metric| {
            let text = match report.stats.get(*metric) {
                Some(stats) => format!(
                    "Average {}: {} (Minimum: {}, Maximum: {})",
                    metric.name(),
                    with_unit(stats.mean, metric.unit()),
                    with_unit(stats.min, metric.unit()),
                    with_unit(stats.max, metric.unit()),
                ),
                None => format!("Average {}: {}", metric.name(), NO_DATA),
            };
            StatLine {
                metric: *metric,
                text,
            }
        })
        .collect()
}

fn radar_chart(report: &AggregateReport) -> RadarChart {
    RadarChart {
        axes: Metric::ALL.map(|metric| metric.label()),
        axis_max: report.charts.radar_axis_max,
        series: report
            .profiles
            .iter()
            .map(|profile| RadarSeries {
                condition: profile.condition.clone(),
                color: condition_hex(&profile.condition),
                values: profile.means,
            })
            .collect(),
    }
}

fn tier_rows(report: &AggregateReport) -> Vec<TierSummaryRow> {
    if report.is_empty() {
        return Vec::new();
    }

    PriorityTier::ACTIONABLE
        .iter()
        .filter_map(|tier| {
            let total = report.tier_total(*tier)?;
            Some(TierSummaryRow {
                tier: *tier,
                label: tier.label(),
                range: tier.range_label(),
                count: total.count,
                total_length_km: total.total_length_km(),
                recommended_action: tier.recommended_action()?,
            })
        })
        .collect()
}

/// Package an aggregate report and its selection for rendering.
///
/// `view` must be the selection `report` was computed from.
pub fn build_report<'a>(report: &AggregateReport, view: &SegmentView<'a>) -> PresentationReport<'a> {
    let needs_repair: Vec<&'a SegmentRecord> = view.iter().filter(|r| needs_repair(r)).collect();
    let markers: Vec<MapMarker> = view.iter().map(MapMarker::from_record).collect();

    debug!(
        repair_rows = needs_repair.len(),
        markers = markers.len(),
        "Built presentation report"
    );

    PresentationReport {
        no_data: report.is_empty(),
        total_segments: report.total_segments,
        overview: report.overview.clone(),
        distribution: distribution_lines(report),
        statistics: stat_lines(report),
        needs_repair,
        gauge: Gauge {
            value: report.repair_percent,
            bands: GAUGE_BANDS.to_vec(),
            threshold: GAUGE_THRESHOLD,
        },
        radar: radar_chart(report),
        tiers: tier_rows(report),
        markers,
        map_center: report.overview.map_center,
        charts: report.charts.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::core::types::test_support::segment;
    use crate::core::SegmentCollection;
    use pretty_assertions::assert_eq;

    fn sample() -> SegmentCollection {
        SegmentCollection::new(vec![
            segment(0.0, 9.0, RoughnessCondition::Poor),
            segment(100.0, 4.0, RoughnessCondition::Fair),
            segment(200.0, 1.5, RoughnessCondition::VeryGood),
            segment(300.0, 11.0, RoughnessCondition::Poor),
        ])
    }

    #[test]
    fn distribution_text_matches_counts() {
        let data = sample();
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        let texts: Vec<&str> = report.distribution.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Very Good: 25% (1 segments)",
                "Good: 0% (0 segments)",
                "Fair: 25% (1 segments)",
                "Poor: 50% (2 segments)",
            ]
        );
    }

    #[test]
    fn needs_repair_rows_are_borrowed_in_order() {
        let data = sample();
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        assert_eq!(report.needs_repair.len(), 2);
        assert!(std::ptr::eq(report.needs_repair[0], &data.records()[0]));
        assert!(std::ptr::eq(report.needs_repair[1], &data.records()[3]));
        assert_eq!(report.gauge.value, 50.0);
        assert!(report.gauge.exceeds_threshold());
        assert_eq!(report.gauge.bands.len(), 4);
    }

    #[test]
    fn radar_has_one_series_per_present_condition() {
        let data = sample();
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        let conditions: Vec<_> = report.radar.series.iter().map(|s| s.condition.clone()).collect();
        assert_eq!(
            conditions,
            vec![
                RoughnessCondition::VeryGood,
                RoughnessCondition::Fair,
                RoughnessCondition::Poor
            ]
        );
        assert_eq!(report.radar.series[2].values[0], Some(10.0));
        assert_eq!(report.radar.series[0].color, "#2ecc71");
        assert_eq!(report.radar.axes[0], "IRI (m/km)");
    }

    #[test]
    fn tier_rows_carry_actions() {
        let data = sample();
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        let rows: Vec<(&str, usize, &str)> = report
            .tiers
            .iter()
            .map(|row| (row.label, row.count, row.recommended_action))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("High Priority", 2, "reconstruction/thick overlay"),
                ("Medium Priority", 0, "thin overlay or extensive patching"),
                ("Low Priority", 1, "routine maintenance/patching"),
            ]
        );
        assert_eq!(report.tiers[0].total_length_km, 0.4);
    }

    #[test]
    fn markers_follow_condition_palette() {
        let data = SegmentCollection::new(vec![
            segment(0.0, 2.0, RoughnessCondition::Good),
            segment(100.0, 2.0, RoughnessCondition::parse("Rusak")),
        ]);
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        let colors: Vec<_> = report.markers.iter().map(|m| m.color).collect();
        assert_eq!(colors, vec![MarkerColor::Blue, MarkerColor::Gray]);
        assert_eq!(report.markers[1].end_point, 200.0);
        assert_eq!(report.distribution.len(), 5);
    }

    #[test]
    fn empty_selection_reports_no_data() {
        let data = SegmentCollection::default();
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        assert!(report.no_data);
        assert!(report.needs_repair.is_empty());
        assert!(report.tiers.is_empty());
        assert!(report.markers.is_empty());
        assert!(report.radar.series.is_empty());
        assert_eq!(report.gauge.value, 0.0);
        assert_eq!(report.statistics[0].text, "Average IRI: no data");
        assert!(report.distribution.iter().all(|l| l.count == 0));
    }

    #[test]
    fn stat_lines_format_units() {
        let data = SegmentCollection::new(vec![segment(0.0, 4.0, RoughnessCondition::Fair)]);
        let view = data.view();
        let report = build_report(&aggregate(&view), &view);

        assert_eq!(
            report.statistics[0].text,
            "Average IRI: 4.00 m/km (Minimum: 4.00 m/km, Maximum: 4.00 m/km)"
        );
        assert_eq!(
            report.statistics[1].text,
            "Average Crack Area: 8.00% (Minimum: 8.00%, Maximum: 8.00%)"
        );
    }
}
