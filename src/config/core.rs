use serde::{Deserialize, Serialize};

/// Default input table, next to where the tool runs
pub const DEFAULT_DATA_PATH: &str = "dummy_data_yogyakarta.csv";

/// Root configuration structure for roadwatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoadwatchConfig {
    /// Input data configuration
    #[serde(default)]
    pub data: Option<DataConfig>,

    /// Default filter criteria
    #[serde(default)]
    pub filter: Option<FilterConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Segment table to load when no path is given on the command line
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub iri_min: Option<f64>,

    #[serde(default)]
    pub iri_max: Option<f64>,

    /// Condition labels; empty or `["all"]` means every condition
    #[serde(default)]
    pub conditions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// One of `terminal`, `markdown`, `json`
    #[serde(default)]
    pub default_format: Option<String>,
}

impl RoadwatchConfig {
    pub fn data_path(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.path.as_deref())
            .unwrap_or(DEFAULT_DATA_PATH)
    }

    pub fn iri_min(&self) -> Option<f64> {
        self.filter.as_ref().and_then(|f| f.iri_min)
    }

    pub fn iri_max(&self) -> Option<f64> {
        self.filter.as_ref().and_then(|f| f.iri_max)
    }

    pub fn conditions(&self) -> &[String] {
        self.filter
            .as_ref()
            .and_then(|f| f.conditions.as_deref())
            .unwrap_or(&[])
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
    }
}
