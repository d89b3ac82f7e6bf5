//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roughness condition label assigned to a segment by the survey process.
///
/// The label is ground truth: it is never re-derived from the IRI value,
/// even when the two disagree. Labels outside the four known values are
/// kept verbatim as [`RoughnessCondition::Unrecognized`]. The exact source
/// text of every label lives on [`SegmentRecord::condition_label`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoughnessCondition {
    VeryGood,
    Good,
    Fair,
    Poor,
    Unrecognized(String),
}

impl RoughnessCondition {
    /// The four known conditions, best to worst.
    pub const KNOWN: [RoughnessCondition; 4] = [
        RoughnessCondition::VeryGood,
        RoughnessCondition::Good,
        RoughnessCondition::Fair,
        RoughnessCondition::Poor,
    ];

    /// Parse a label. Accepts the English names and the Indonesian labels
    /// used by the source survey data, ignoring case and surrounding space.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "very good" | "verygood" | "sangat baik" => Self::VeryGood,
            "good" | "baik" => Self::Good,
            "fair" | "sedang" => Self::Fair,
            "poor" | "buruk" => Self::Poor,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    /// Display label, also used as the CSV value
    pub fn label(&self) -> &str {
        match self {
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Position within [`RoughnessCondition::KNOWN`]
    pub fn known_index(&self) -> Option<usize> {
        match self {
            Self::VeryGood => Some(0),
            Self::Good => Some(1),
            Self::Fair => Some(2),
            Self::Poor => Some(3),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for RoughnessCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for RoughnessCondition {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for RoughnessCondition {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<RoughnessCondition> for String {
    fn from(condition: RoughnessCondition) -> Self {
        match condition {
            RoughnessCondition::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

/// One measured road interval.
///
/// Field order is the column order of the tabular dataset. Serde goes
/// through [`SurveyRow`] so the header names and the condition label are
/// written back exactly as they were read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SurveyRow", into = "SurveyRow")]
pub struct SegmentRecord {
    /// Position along the route where the segment starts (m)
    pub start_point: f64,
    /// Position along the route where the segment ends (m)
    pub end_point: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// International Roughness Index (m/km)
    pub iri: f64,
    pub roughness_condition: RoughnessCondition,
    /// Condition label as written in the source table, e.g. `Buruk`
    pub condition_label: String,
    pub total_crack_area_percent: f64,
    pub average_crack_width_mm: f64,
    pub number_of_potholes_per_km: f64,
    pub average_rut_depth_cm: f64,
    /// Survey vehicle speed, informational only
    pub speed_kmh: f64,
}

/// One row of the segment table, with the condition as raw text
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurveyRow {
    #[serde(rename = "Start Point (m)")]
    start_point: f64,
    #[serde(rename = "End Point (m)")]
    end_point: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "IRI (m/km)")]
    iri: f64,
    #[serde(rename = "Roughness Condition")]
    roughness_condition: String,
    #[serde(rename = "Total Crack Area (%)")]
    total_crack_area_percent: f64,
    #[serde(rename = "Average Crack Width (mm)")]
    average_crack_width_mm: f64,
    #[serde(rename = "Number of Potholes (per km)")]
    number_of_potholes_per_km: f64,
    #[serde(rename = "Average Rut Depth (cm)")]
    average_rut_depth_cm: f64,
    #[serde(rename = "Speed (km/h)")]
    speed_kmh: f64,
}

impl From<SurveyRow> for SegmentRecord {
    fn from(row: SurveyRow) -> Self {
        Self {
            start_point: row.start_point,
            end_point: row.end_point,
            latitude: row.latitude,
            longitude: row.longitude,
            iri: row.iri,
            roughness_condition: RoughnessCondition::parse(&row.roughness_condition),
            condition_label: row.roughness_condition,
            total_crack_area_percent: row.total_crack_area_percent,
            average_crack_width_mm: row.average_crack_width_mm,
            number_of_potholes_per_km: row.number_of_potholes_per_km,
            average_rut_depth_cm: row.average_rut_depth_cm,
            speed_kmh: row.speed_kmh,
        }
    }
}

impl From<SegmentRecord> for SurveyRow {
    fn from(record: SegmentRecord) -> Self {
        Self {
            start_point: record.start_point,
            end_point: record.end_point,
            latitude: record.latitude,
            longitude: record.longitude,
            iri: record.iri,
            roughness_condition: record.condition_label,
            total_crack_area_percent: record.total_crack_area_percent,
            average_crack_width_mm: record.average_crack_width_mm,
            number_of_potholes_per_km: record.number_of_potholes_per_km,
            average_rut_depth_cm: record.average_rut_depth_cm,
            speed_kmh: record.speed_kmh,
        }
    }
}

impl SegmentRecord {
    /// Header names in column order
    pub const COLUMNS: [&'static str; 11] = [
        "Start Point (m)",
        "End Point (m)",
        "Latitude",
        "Longitude",
        "IRI (m/km)",
        "Roughness Condition",
        "Total Crack Area (%)",
        "Average Crack Width (mm)",
        "Number of Potholes (per km)",
        "Average Rut Depth (cm)",
        "Speed (km/h)",
    ];

    /// The five profile metrics in radar order:
    /// IRI, crack area, crack width, potholes, rut depth.
    pub fn profile_metrics(&self) -> [f64; 5] {
        [
            self.iri,
            self.total_crack_area_percent,
            self.average_crack_width_mm,
            self.number_of_potholes_per_km,
            self.average_rut_depth_cm,
        ]
    }
}

/// Ordered segment table, in physical order along the road.
///
/// Owned by whoever loaded it; the analytics only ever borrow from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentCollection {
    records: Vec<SegmentRecord>,
}

impl SegmentCollection {
    pub fn new(records: Vec<SegmentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentRecord> {
        self.records.iter()
    }

    /// A view over every record, in order
    pub fn view(&self) -> SegmentView<'_> {
        self.records.iter().collect()
    }

}

impl From<Vec<SegmentRecord>> for SegmentCollection {
    fn from(records: Vec<SegmentRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<SegmentRecord> for SegmentCollection {
    fn from_iter<I: IntoIterator<Item = SegmentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SegmentCollection {
    type Item = &'a SegmentRecord;
    type IntoIter = std::slice::Iter<'a, SegmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Ordered references into a [`SegmentCollection`].
///
/// Filtering produces a view rather than a copy, so tables built from a
/// view point at the original rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SegmentView<'a> {
    rows: Vec<&'a SegmentRecord>,
}

impl<'a> SegmentView<'a> {
    pub fn new(rows: Vec<&'a SegmentRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a SegmentRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a SegmentRecord>> {
        self.rows.iter().copied()
    }

    /// Clone the referenced rows into an owned collection
    pub fn to_collection(&self) -> SegmentCollection {
        self.iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a SegmentRecord> for SegmentView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a SegmentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Well-formed record with the given IRI and condition; other metrics
    /// scale with IRI so profile means are easy to predict.
    pub fn segment(start: f64, iri: f64, condition: RoughnessCondition) -> SegmentRecord {
        SegmentRecord {
            start_point: start,
            end_point: start + 100.0,
            latitude: -7.78,
            longitude: 110.36,
            iri,
            condition_label: condition.label().to_string(),
            roughness_condition: condition,
            total_crack_area_percent: iri * 2.0,
            average_crack_width_mm: iri / 2.0,
            number_of_potholes_per_km: iri,
            average_rut_depth_cm: iri / 4.0,
            speed_kmh: 40.0,
        }
    }
}
