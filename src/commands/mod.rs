//! CLI command implementations for roadwatch operations.
//!
//! Available commands:
//! - **report**: Filter the survey and render the condition report
//! - **export**: Filter the survey and write the selected rows as CSV
//! - **init**: Initialize a new roadwatch configuration file
//!
//! Every run recomputes the whole pipeline from the source table:
//! load, filter, aggregate, build.

pub mod export;
pub mod init;
pub mod report;

pub use export::{export_segments, ExportConfig};
pub use init::{init_config, init_config_at};
pub use report::{run_report, ReportConfig};

use crate::cli::FilterArgs;
use crate::config::RoadwatchConfig;
use crate::filtering::{FilterCriteria, DEFAULT_IRI_MAX, DEFAULT_IRI_MIN};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Input path and criteria after merging flags over configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub path: PathBuf,
    pub criteria: FilterCriteria,
}

/// Command-line flags win over configuration, which wins over defaults
pub fn resolve_selection(args: &FilterArgs, config: &RoadwatchConfig) -> Result<Selection> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.data_path()));

    let conditions: &[String] = match &args.conditions {
        Some(labels) => labels.as_slice(),
        None => config.conditions(),
    };
    let iri_min = args.iri_min.or(config.iri_min()).unwrap_or(DEFAULT_IRI_MIN);
    let iri_max = args.iri_max.or(config.iri_max()).unwrap_or(DEFAULT_IRI_MAX);

    let criteria = FilterCriteria::from_labels(conditions, iri_min, iri_max)
        .context("Invalid filter options")?;
    debug!(?criteria, path = %path.display(), "Resolved selection");

    Ok(Selection { path, criteria })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, DEFAULT_DATA_PATH};
    use crate::core::RoughnessCondition;

    #[test]
    fn defaults_apply_without_flags_or_config() {
        let selection =
            resolve_selection(&FilterArgs::default(), &RoadwatchConfig::default()).unwrap();
        assert_eq!(selection.path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(selection.criteria, FilterCriteria::all());
    }

    #[test]
    fn flags_override_config() {
        let config = parse_and_validate_config(
            "[data]\npath = \"a.csv\"\n[filter]\niri_min = 1.0\niri_max = 6.0\nconditions = [\"Good\"]\n",
        )
        .unwrap();
        let args = FilterArgs {
            path: Some(PathBuf::from("b.csv")),
            conditions: Some(vec!["Poor".to_string()]),
            iri_min: None,
            iri_max: Some(9.0),
        };

        let selection = resolve_selection(&args, &config).unwrap();
        assert_eq!(selection.path, PathBuf::from("b.csv"));
        assert_eq!(selection.criteria.iri_min(), 1.0);
        assert_eq!(selection.criteria.iri_max(), 9.0);
        assert!(selection
            .criteria
            .conditions()
            .contains(&RoughnessCondition::Poor));
        assert_eq!(selection.criteria.conditions().len(), 1);
    }

    #[test]
    fn invalid_range_is_an_error() {
        let args = FilterArgs {
            iri_min: Some(7.0),
            iri_max: Some(2.0),
            ..FilterArgs::default()
        };
        assert!(resolve_selection(&args, &RoadwatchConfig::default()).is_err());
    }
}
