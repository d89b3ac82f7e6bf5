use crate::core::SegmentRecord;
use crate::errors::Result;
use crate::filtering::{FilterCriteria, FilterMetrics};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::report::{PresentationReport, NO_DATA, NO_MATCHING_SEGMENTS};
use chrono::{DateTime, Utc};
use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Where a report came from and how it was selected
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub source: PathBuf,
    pub criteria: FilterCriteria,
    pub filter: FilterMetrics,
    pub generated_at: DateTime<Utc>,
}

impl ReportContext {
    pub fn new(source: impl Into<PathBuf>, criteria: FilterCriteria, filter: FilterMetrics) -> Self {
        Self {
            source: source.into(),
            criteria,
            filter,
            generated_at: Utc::now(),
        }
    }

    fn conditions_label(&self) -> String {
        if self.criteria.all_conditions() {
            "all".to_string()
        } else {
            self.criteria
                .conditions()
                .iter()
                .map(|c| c.label().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn filter_summary(&self) -> String {
        format!(
            "conditions: {}; IRI {} to {} m/km; {} of {} segments ({:.1}%)",
            self.conditions_label(),
            self.criteria.iri_min(),
            self.criteria.iri_max(),
            self.filter.included,
            self.filter.total_items,
            self.filter.inclusion_rate()
        )
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &PresentationReport<'_>, context: &ReportContext)
        -> Result<()>;
}

#[derive(Serialize)]
struct JsonReport<'r, 'a> {
    context: &'r ReportContext,
    report: &'r PresentationReport<'a>,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(
        &mut self,
        report: &PresentationReport<'_>,
        context: &ReportContext,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport { context, report })?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(
        &mut self,
        report: &PresentationReport<'_>,
        context: &ReportContext,
    ) -> Result<()> {
        self.write_header(context)?;
        if report.no_data {
            writeln!(self.writer, "_{}_", NO_MATCHING_SEGMENTS)?;
            self.writer.flush()?;
            return Ok(());
        }
        self.write_overview(report)?;
        self.write_summary(report)?;
        self.write_repair(report)?;
        self.write_profiles(report)?;
        self.write_trends(report)?;
        self.write_priorities(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, context: &ReportContext) -> Result<()> {
        writeln!(self.writer, "# Road Condition Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Source: `{}`", context.source.display())?;
        writeln!(self.writer, "Filter: {}", context.filter_summary())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        let overview = &report.overview;
        writeln!(self.writer, "## Overview")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Segments | {} |", report.total_segments)?;
        writeln!(
            self.writer,
            "| Total Length | {} |",
            optional(overview.total_length_km, "km")
        )?;
        writeln!(
            self.writer,
            "| Average IRI | {} |",
            optional(overview.mean_iri, "m/km")
        )?;
        writeln!(
            self.writer,
            "| Average Crack Area | {} |",
            optional(overview.mean_crack_area, "%")
        )?;
        writeln!(
            self.writer,
            "| Average Potholes | {} |",
            optional(overview.mean_potholes, "per km")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        writeln!(self.writer, "## Condition Distribution")?;
        writeln!(self.writer)?;
        for line in &report.distribution {
            writeln!(self.writer, "- {}", line.text)?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Damage Statistics")?;
        writeln!(self.writer)?;
        for line in &report.statistics {
            writeln!(self.writer, "- {}", line.text)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_repair(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        writeln!(self.writer, "## Segments Needing Repair")?;
        writeln!(self.writer)?;
        let band = report.gauge.band();
        writeln!(
            self.writer,
            "{:.2}% of segments need repair (gauge band {}-{}%, threshold {}%).",
            report.gauge.value, band.lower, band.upper, report.gauge.threshold
        )?;
        writeln!(self.writer)?;

        if report.needs_repair.is_empty() {
            writeln!(self.writer, "No segments need urgent repair.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| Start (m) | End (m) | IRI (m/km) | Condition | Potholes (per km) |"
        )?;
        writeln!(
            self.writer,
            "|-----------|---------|------------|-----------|-------------------|"
        )?;
        for record in &report.needs_repair {
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} |",
                record.start_point,
                record.end_point,
                record.iri,
                record.roughness_condition,
                record.number_of_potholes_per_km
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_profiles(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        writeln!(self.writer, "## Condition Profiles")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Condition | {} |",
            report.radar.axes.join(" | ")
        )?;
        writeln!(self.writer, "|-----------|{}", "------|".repeat(5))?;
        for series in &report.radar.series {
            let values: Vec<String> = series
                .values
                .iter()
                .map(|v| match v {
                    Some(v) => format!("{v:.2}"),
                    None => NO_DATA.to_string(),
                })
                .collect();
            writeln!(
                self.writer,
                "| {} | {} |",
                series.condition,
                values.join(" | ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trends(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        if report.charts.trends.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Damage Trends")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Trend | Slope | R² | At lowest IRI | At highest IRI |")?;
        writeln!(self.writer, "|-------|-------|----|---------------|----------------|")?;
        for trend in &report.charts.trends {
            writeln!(
                self.writer,
                "| {} vs {} | {:.3} | {:.3} | {:.2} | {:.2} |",
                trend.y.name(),
                trend.x.name(),
                trend.slope,
                trend.r_squared,
                trend.predict(trend.x_min),
                trend.predict(trend.x_max)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_priorities(&mut self, report: &PresentationReport<'_>) -> Result<()> {
        writeln!(self.writer, "## Repair Priorities")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Priority | Range | Segments | Total Length | Action |"
        )?;
        writeln!(
            self.writer,
            "|----------|-------|----------|--------------|--------|"
        )?;
        for row in &report.tiers {
            writeln!(
                self.writer,
                "| {} | {} | {} | {:.2} km | {} |",
                row.label, row.range, row.count, row.total_length_km, row.recommended_action
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            config,
            formatter: formatter_for(config),
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.config.ascii {
                presets::ASCII_FULL
            } else {
                presets::UTF8_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(
        &mut self,
        report: &PresentationReport<'_>,
        context: &ReportContext,
    ) -> Result<()> {
        let f = &self.formatter;
        writeln!(self.writer, "{}", f.header("ROAD CONDITION REPORT"))?;
        writeln!(self.writer, "{}", f.dim(&context.source.display().to_string()))?;
        writeln!(self.writer, "{}", f.dim(&context.filter_summary()))?;
        writeln!(self.writer)?;

        if report.no_data {
            writeln!(self.writer, "{}", f.warning(NO_MATCHING_SEGMENTS))?;
            self.writer.flush()?;
            return Ok(());
        }

        writeln!(self.writer, "{}", f.bold("Condition Distribution"))?;
        for line in &report.distribution {
            writeln!(
                self.writer,
                "  {}: {}% ({} segments)",
                f.condition(&line.condition),
                line.percent,
                line.count
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", f.bold("Damage Statistics"))?;
        for line in &report.statistics {
            writeln!(self.writer, "  {}", line.text)?;
        }
        writeln!(self.writer)?;

        let band = report.gauge.band();
        let gauge = format!(
            "Segments needing repair: {:.2}% (band {}-{}%, threshold {}%)",
            report.gauge.value, band.lower, band.upper, report.gauge.threshold
        );
        if report.gauge.exceeds_threshold() {
            writeln!(self.writer, "{}", f.warning(&gauge))?;
        } else {
            writeln!(self.writer, "{}", gauge)?;
        }

        if !report.needs_repair.is_empty() {
            let table = repair_table(self.table(), &report.needs_repair);
            writeln!(self.writer, "{table}")?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", f.bold("Repair Priorities"))?;
        let mut tiers = self.table();
        tiers.set_header(vec!["Priority", "Range", "Segments", "Length (km)", "Action"]);
        for row in &report.tiers {
            tiers.add_row(vec![
                f.tier(row.tier),
                row.range.to_string(),
                row.count.to_string(),
                format!("{:.2}", row.total_length_km),
                row.recommended_action.to_string(),
            ]);
        }
        writeln!(self.writer, "{tiers}")?;
        self.writer.flush()?;
        Ok(())
    }
}

fn repair_table(mut table: Table, records: &[&SegmentRecord]) -> Table {
    table.set_header(vec![
        "Start (m)",
        "End (m)",
        "IRI (m/km)",
        "Condition",
        "Potholes (per km)",
    ]);
    for record in records {
        table.add_row(vec![
            record.start_point.to_string(),
            record.end_point.to_string(),
            format!("{:.2}", record.iri),
            record.roughness_condition.to_string(),
            record.number_of_potholes_per_km.to_string(),
        ]);
    }
    table
}

fn optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if unit == "%" => format!("{v:.2}%"),
        Some(v) => format!("{v:.2} {unit}"),
        None => NO_DATA.to_string(),
    }
}

pub fn create_writer<'w>(
    format: OutputFormat,
    out: Box<dyn Write + 'w>,
    config: FormattingConfig,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out, config)),
    }
}

/// Open `path` for writing, creating parent directories
pub fn create_output_file(path: &Path) -> Result<BufWriter<File>> {
    super::ensure_parent_dir(path)?;
    Ok(BufWriter::new(File::create(path)?))
}
