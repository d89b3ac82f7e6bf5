// Test utility module for roadwatch integration tests
#![allow(dead_code)]

use roadwatch::{RoughnessCondition, SegmentCollection, SegmentRecord};
use std::path::PathBuf;

/// Record builder with readable defaults for the metrics a test ignores
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    record: SegmentRecord,
}

impl SegmentBuilder {
    pub fn new(start: f64, iri: f64) -> Self {
        Self {
            record: SegmentRecord {
                start_point: start,
                end_point: start + 100.0,
                latitude: -7.7956,
                longitude: 110.3695,
                iri,
                roughness_condition: RoughnessCondition::Good,
                condition_label: "Good".to_string(),
                total_crack_area_percent: 5.0,
                average_crack_width_mm: 1.5,
                number_of_potholes_per_km: 1.0,
                average_rut_depth_cm: 0.8,
                speed_kmh: 40.0,
            },
        }
    }

    pub fn condition(mut self, condition: RoughnessCondition) -> Self {
        self.record.condition_label = condition.label().to_string();
        self.record.roughness_condition = condition;
        self
    }

    pub fn length(mut self, meters: f64) -> Self {
        self.record.end_point = self.record.start_point + meters;
        self
    }

    pub fn potholes(mut self, per_km: f64) -> Self {
        self.record.number_of_potholes_per_km = per_km;
        self
    }

    pub fn build(self) -> SegmentRecord {
        self.record
    }
}

/// A survey mixing every condition and every tier
pub fn mixed_survey() -> SegmentCollection {
    use RoughnessCondition::*;
    SegmentCollection::new(vec![
        SegmentBuilder::new(0.0, 1.8).condition(VeryGood).build(),
        SegmentBuilder::new(100.0, 9.4).condition(Poor).potholes(12.0).build(),
        SegmentBuilder::new(200.0, 4.1).condition(Fair).build(),
        SegmentBuilder::new(300.0, 2.9).condition(Poor).build(),
        SegmentBuilder::new(400.0, 6.5).condition(Fair).build(),
        SegmentBuilder::new(500.0, 2.4).condition(Good).build(),
        SegmentBuilder::new(600.0, 8.0).condition(Poor).build(),
        SegmentBuilder::new(700.0, 11.2).condition(Poor).potholes(20.0).build(),
    ])
}

// Helper to create temporary test files
pub fn create_test_file(content: &str, name: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content).expect("Failed to write test file");
    (temp_dir, file_path)
}

/// Survey table as the field teams deliver it, with Indonesian labels.
///
/// Numbers are written in their shortest round-trip form, so exporting
/// the parsed rows reproduces this text byte for byte.
pub const SURVEY_CSV: &str = "\
Start Point (m),End Point (m),Latitude,Longitude,IRI (m/km),Roughness Condition,Total Crack Area (%),Average Crack Width (mm),Number of Potholes (per km),Average Rut Depth (cm),Speed (km/h)
0.0,100.0,-7.7956,110.3695,1.9,Sangat Baik,1.2,0.4,0.0,0.2,55.0
100.0,200.0,-7.7961,110.3702,3.6,Baik,6.8,1.1,1.0,0.6,48.0
200.0,300.0,-7.7967,110.3711,5.7,Sedang,14.5,2.9,4.0,1.4,39.0
300.0,400.0,-7.7972,110.3718,8.9,Buruk,31.0,6.2,9.0,2.7,27.0
400.0,500.0,-7.7978,110.3725,10.4,Buruk,38.5,7.4,14.0,3.3,22.0
";
