use crate::aggregation::aggregate;
use crate::cli::{FilterArgs, OutputFormat};
use crate::config::RoadwatchConfig;
use crate::filtering::filter_with_metrics;
use crate::formatting::{ColorMode, FormattingConfig};
use crate::io::output::{create_output_file, create_writer, ReportContext};
use crate::io::load_segments;
use crate::report::build_report;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, info_span, warn};

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub filter: FilterArgs,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

/// Flag, then configured format, then terminal
fn resolve_format(requested: Option<OutputFormat>, config: &RoadwatchConfig) -> OutputFormat {
    requested
        .or_else(|| {
            let name = config.default_format()?;
            let parsed = OutputFormat::from_config(name);
            if parsed.is_none() {
                warn!("Ignoring unknown output format '{}'", name);
            }
            parsed
        })
        .unwrap_or(OutputFormat::Terminal)
}

fn formatting_for(report_config: &ReportConfig) -> FormattingConfig {
    if report_config.plain {
        FormattingConfig::plain()
    } else if report_config.output.is_some() {
        // Never write escape codes into files
        FormattingConfig::new(ColorMode::Never, false)
    } else {
        FormattingConfig::from_env()
    }
}

pub fn run_report(report_config: ReportConfig, config: &RoadwatchConfig) -> Result<()> {
    let selection = super::resolve_selection(&report_config.filter, config)?;
    let _span = info_span!("report", path = %selection.path.display()).entered();

    let collection = load_segments(&selection.path)
        .with_context(|| format!("Failed to load {}", selection.path.display()))?;

    let result = filter_with_metrics(collection.iter(), &selection.criteria);
    let aggregated = aggregate(&result.view);
    let report = build_report(&aggregated, &result.view);
    if report.no_data {
        info!("No segments match the selected filters");
    }

    let context = ReportContext::new(&selection.path, selection.criteria, result.metrics);
    let format = resolve_format(report_config.format, config);
    let formatting = formatting_for(&report_config);

    let out: Box<dyn Write> = match &report_config.output {
        Some(path) => Box::new(
            create_output_file(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = create_writer(format.into(), out, formatting);
    writer
        .write_report(&report, &context)
        .context("Failed to write report")?;

    if let Some(path) = &report_config.output {
        info!("Wrote report to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;

    #[test]
    fn format_falls_back_through_config_to_terminal() {
        let config = parse_and_validate_config("[output]\ndefault_format = \"json\"\n").unwrap();
        assert_eq!(resolve_format(None, &config), OutputFormat::Json);
        assert_eq!(
            resolve_format(Some(OutputFormat::Markdown), &config),
            OutputFormat::Markdown
        );
        assert_eq!(
            resolve_format(None, &RoadwatchConfig::default()),
            OutputFormat::Terminal
        );
    }

    #[test]
    fn file_output_is_never_colored() {
        let report_config = ReportConfig {
            filter: FilterArgs::default(),
            format: None,
            output: Some(PathBuf::from("out.md")),
            plain: false,
        };
        assert_eq!(formatting_for(&report_config).color, ColorMode::Never);
    }
}
