use crate::cli::FilterArgs;
use crate::config::RoadwatchConfig;
use crate::filtering::filter_with_metrics;
use crate::io::{export_csv, load_segments, write_segments};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub filter: FilterArgs,
    pub output: Option<PathBuf>,
}

/// Write the filtered rows in source order as the eleven survey columns.
///
/// Condition labels are written exactly as read and numbers in their
/// shortest round-trip form. Input columns outside the survey schema are
/// not carried over.
pub fn export_segments(export_config: ExportConfig, config: &RoadwatchConfig) -> Result<()> {
    let selection = super::resolve_selection(&export_config.filter, config)?;

    let collection = load_segments(&selection.path)
        .with_context(|| format!("Failed to load {}", selection.path.display()))?;
    let result = filter_with_metrics(collection.iter(), &selection.criteria);

    match &export_config.output {
        Some(path) => {
            export_csv(result.view.iter(), path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
        }
        None => {
            write_segments(result.view.iter(), std::io::stdout().lock())
                .context("Failed to write CSV to stdout")?;
        }
    }

    info!(
        exported = result.metrics.included,
        total = result.metrics.total_items,
        "Exported filtered segments"
    );
    Ok(())
}
