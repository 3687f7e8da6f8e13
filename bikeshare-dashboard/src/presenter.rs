//! Presenters turning a pass outcome into terminal output

use crate::page::{Kpi, PassOutcome, Section, SelectionStatus, Sidebar, KPI_HEADING};
use bikeshare_common::{format_decimal, format_thousands, DashboardError, Result};
use bikeshare_config::OutputConfig;
use bikeshare_graphs::{CategoryBarChart, Chart, DailyTimelineChart, PieChart};
use std::io::Write;
use std::str::FromStr;

/// Terminal output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(DashboardError::validation_field(
                format!("Unknown output format '{other}'"),
                "format",
            )),
        }
    }
}

/// Writes a pass outcome to a stream
pub trait Presenter {
    fn present(&self, outcome: &PassOutcome, out: &mut dyn Write) -> Result<()>;
}

/// Build the presenter for `format`
pub fn presenter_for(format: OutputFormat, output: &OutputConfig) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Text => Box::new(TextPresenter::new(output.text_bar_width)),
        OutputFormat::Json => Box::new(JsonPresenter),
    }
}

/// Plain text page with charts drawn as horizontal bar tables
#[derive(Debug, Clone)]
pub struct TextPresenter {
    bar_width: usize,
}

impl TextPresenter {
    pub fn new(bar_width: usize) -> Self {
        Self {
            bar_width: bar_width.max(1),
        }
    }

    fn bar(&self, value: u64, max: u64) -> String {
        let filled = if max == 0 {
            0
        } else {
            ((value as f64 / max as f64) * self.bar_width as f64).round() as usize
        };
        format!("{}{}", "#".repeat(filled), " ".repeat(self.bar_width - filled.min(self.bar_width)))
    }

    fn write_sidebar(&self, sidebar: &Sidebar, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "[{}] {}", sidebar.title, sidebar.note)?;
        if let Some(bounds) = &sidebar.bounds {
            writeln!(out, "Available dates: {bounds}")?;
        }
        match &sidebar.status {
            SelectionStatus::Confirmed(message) => writeln!(out, "OK: {message}")?,
            SelectionStatus::Warning(message) => writeln!(out, "WARNING: {message}")?,
        }
        Ok(())
    }

    fn write_kpis(&self, kpis: &[Kpi], out: &mut dyn Write) -> Result<()> {
        writeln!(out, "\n{KPI_HEADING}")?;
        for kpi in kpis {
            writeln!(out, "  {:<24} {:>14}", kpi.label, kpi.value)?;
        }
        Ok(())
    }

    fn write_section(&self, section: &Section, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "\n## {}", section.heading)?;
        match &section.chart {
            Some(Chart::Bar(chart)) => self.write_bars(chart, out)?,
            Some(Chart::Pie(chart)) => self.write_pie(chart, out)?,
            Some(Chart::Timeline(chart)) => self.write_timeline(chart, out)?,
            None => {}
        }
        for line in &section.text {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    fn write_bars(&self, chart: &CategoryBarChart, out: &mut dyn Write) -> Result<()> {
        let max = chart.bars.iter().map(|bar| bar.value).max().unwrap_or(0);
        let label_width = chart.bars.iter().map(|bar| bar.label.len()).max().unwrap_or(0);
        for bar in &chart.bars {
            let marker = if bar.highlighted { " *" } else { "" };
            let annotation = bar
                .annotation
                .as_ref()
                .map(|text| format!(" ({text})"))
                .unwrap_or_default();
            writeln!(
                out,
                "  {:>label_width$} |{}| {:>10}{marker}{annotation}",
                bar.label,
                self.bar(bar.value, max),
                format_thousands(bar.value),
            )?;
        }
        Ok(())
    }

    fn write_pie(&self, chart: &PieChart, out: &mut dyn Write) -> Result<()> {
        let label_width = chart.slices.iter().map(|slice| slice.label.len()).max().unwrap_or(0);
        for (slice, share) in chart.slices.iter().zip(chart.percentages()) {
            writeln!(
                out,
                "  {:>label_width$} |{}| {:>6}% {:>10}",
                slice.label,
                self.bar((share * 10.0).round() as u64, 1000),
                format_decimal(share, 1),
                format_thousands(slice.value),
            )?;
        }
        Ok(())
    }

    fn write_timeline(&self, chart: &DailyTimelineChart, out: &mut dyn Write) -> Result<()> {
        let (Some(first), Some(last)) = (chart.points.first(), chart.points.last()) else {
            writeln!(out, "  (no days)")?;
            return Ok(());
        };
        writeln!(out, "  {} days from {} to {}", chart.points.len(), first.date, last.date)?;

        if let Some(busiest) = chart.points.iter().max_by_key(|point| point.value) {
            writeln!(
                out,
                "  Highest: {} on {}",
                format_thousands(busiest.value),
                busiest.date
            )?;
        }
        if let Some(quietest) = chart.points.iter().min_by_key(|point| point.value) {
            writeln!(
                out,
                "  Lowest:  {} on {}",
                format_thousands(quietest.value),
                quietest.date
            )?;
        }
        Ok(())
    }
}

impl Presenter for TextPresenter {
    fn present(&self, outcome: &PassOutcome, out: &mut dyn Write) -> Result<()> {
        self.write_sidebar(outcome.sidebar(), out)?;
        match outcome {
            PassOutcome::Rendered { page } => {
                let rule = "=".repeat(page.title.len());
                writeln!(out, "\n{rule}\n{}\n{rule}", page.title)?;
                self.write_kpis(&page.kpis, out)?;
                for section in &page.sections {
                    self.write_section(section, out)?;
                }
            }
            PassOutcome::MissingDateSelection { .. } => {}
            PassOutcome::EmptyFilterResult { notice, .. } => writeln!(out, "\n{notice}")?,
            PassOutcome::ComputationFailed { message, .. } => writeln!(out, "\nERROR: {message}")?,
        }
        out.flush()?;
        Ok(())
    }
}

/// The outcome as one pretty-printed JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn present(&self, outcome: &PassOutcome, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, outcome)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
