//! Detection of malformed segment records.
//!
//! Malformed records are never dropped or corrected. Callers log the issues
//! and the analytics route the record to an "unknown" bucket where needed.

use super::types::SegmentRecord;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordIssue {
    UnrecognizedCondition(String),
    /// A metric that must be a finite, non-negative number is not
    InvalidMetric { column: &'static str, value: f64 },
    CrackAreaAbove100(f64),
    /// `start_point >= end_point`
    EmptyInterval { start: f64, end: f64 },
    CoordinateOutOfRange { column: &'static str, value: f64 },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCondition(label) => {
                write!(f, "unrecognized roughness condition '{}'", label)
            }
            Self::InvalidMetric { column, value } => {
                write!(f, "{} must be a non-negative number, got {}", column, value)
            }
            Self::CrackAreaAbove100(value) => {
                write!(f, "crack area {}% exceeds 100%", value)
            }
            Self::EmptyInterval { start, end } => {
                write!(f, "start point {} is not before end point {}", start, end)
            }
            Self::CoordinateOutOfRange { column, value } => {
                write!(f, "{} {} is out of range", column, value)
            }
        }
    }
}

fn non_negative(column: &'static str, value: f64) -> Option<RecordIssue> {
    (!value.is_finite() || value < 0.0).then_some(RecordIssue::InvalidMetric { column, value })
}

fn in_range(column: &'static str, value: f64, limit: f64) -> Option<RecordIssue> {
    (!value.is_finite() || value.abs() > limit)
        .then_some(RecordIssue::CoordinateOutOfRange { column, value })
}

/// List everything wrong with a record. An empty list means well-formed.
pub fn validate_record(record: &SegmentRecord) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    if !record.roughness_condition.is_known() {
        issues.push(RecordIssue::UnrecognizedCondition(
            record.roughness_condition.label().to_string(),
        ));
    }

    issues.extend(
        [
            ("IRI (m/km)", record.iri),
            ("Total Crack Area (%)", record.total_crack_area_percent),
            ("Average Crack Width (mm)", record.average_crack_width_mm),
            ("Number of Potholes (per km)", record.number_of_potholes_per_km),
            ("Average Rut Depth (cm)", record.average_rut_depth_cm),
            ("Speed (km/h)", record.speed_kmh),
        ]
        .into_iter()
        .filter_map(|(column, value)| non_negative(column, value)),
    );

    if record.total_crack_area_percent > 100.0 {
        issues.push(RecordIssue::CrackAreaAbove100(
            record.total_crack_area_percent,
        ));
    }

    if !(record.start_point < record.end_point) {
        issues.push(RecordIssue::EmptyInterval {
            start: record.start_point,
            end: record.end_point,
        });
    }

    issues.extend(in_range("Latitude", record.latitude, 90.0));
    issues.extend(in_range("Longitude", record.longitude, 180.0));

    issues
}

pub fn is_well_formed(record: &SegmentRecord) -> bool {
    validate_record(record).is_empty()
}
