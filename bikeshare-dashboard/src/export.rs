//! HTML page and PNG chart export

use crate::page::{PassOutcome, Section, SelectionStatus, KPI_HEADING, PAGE_TITLE};
use bikeshare_common::{with_context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}\
.kpis{display:flex;gap:2rem}.kpi .value{font-size:1.8rem}\
.ok{color:#1b5e20}.warning{color:#e65100}.error{color:#b71c1c}\
figure{margin:0}svg{max-width:100%;height:auto}";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// File-name friendly form of a heading
fn slug(heading: &str) -> String {
    heading
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn write_section(html: &mut String, section: &Section) -> Result<()> {
    html.push_str(&format!("<section><h3>{}</h3>", escape(&section.heading)));
    if let Some(chart) = &section.chart {
        let svg = chart.render_to_svg()?;
        html.push_str(&format!("<figure>{svg}</figure>"));
    }
    for line in &section.text {
        html.push_str(&format!("<p>{}</p>", escape(line)));
    }
    html.push_str("</section>");
    Ok(())
}

/// Render the outcome as a self-contained HTML document with inline SVG charts
pub fn render_html(outcome: &PassOutcome) -> Result<String> {
    let sidebar = outcome.sidebar();
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape(PAGE_TITLE)
    ));

    html.push_str(&format!(
        "<aside><h2>{}</h2><p><strong>{}</strong></p>",
        escape(&sidebar.title),
        escape(&sidebar.note)
    ));
    if let Some(bounds) = &sidebar.bounds {
        html.push_str(&format!("<p>Available dates: {}</p>", escape(&bounds.to_string())));
    }
    let (class, message) = match &sidebar.status {
        SelectionStatus::Confirmed(message) => ("ok", message),
        SelectionStatus::Warning(message) => ("warning", message),
    };
    html.push_str(&format!("<p class=\"{class}\">{}</p></aside><main>", escape(message)));

    match outcome {
        PassOutcome::Rendered { page } => {
            html.push_str(&format!(
                "<h1>{}</h1><h3>{KPI_HEADING}</h3><div class=\"kpis\">",
                escape(&page.title)
            ));
            for kpi in &page.kpis {
                html.push_str(&format!(
                    "<div class=\"kpi\"><div>{}</div><div class=\"value\">{}</div></div>",
                    escape(&kpi.label),
                    escape(&kpi.value)
                ));
            }
            html.push_str("</div>");
            for section in &page.sections {
                write_section(&mut html, section)?;
            }
        }
        PassOutcome::MissingDateSelection { .. } => {}
        PassOutcome::EmptyFilterResult { notice, .. } => {
            html.push_str(&format!("<p class=\"warning\">{}</p>", escape(notice)));
        }
        PassOutcome::ComputationFailed { message, .. } => {
            html.push_str(&format!("<p class=\"error\">{}</p>", escape(message)));
        }
    }

    html.push_str("</main></body></html>\n");
    Ok(html)
}

/// Write the HTML page to `path`, creating parent directories
pub fn export_html(outcome: &PassOutcome, path: &Path) -> Result<()> {
    let html = render_html(outcome)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| with_context!(e, "Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, html).map_err(|e| with_context!(e, "Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Exported HTML page");
    Ok(())
}

/// Write every chart of a rendered page as `NN-heading.png` into `dir`
pub fn export_png(outcome: &PassOutcome, dir: &Path) -> Result<Vec<PathBuf>> {
    let Some(page) = outcome.page() else {
        return Ok(Vec::new());
    };

    fs::create_dir_all(dir)
        .map_err(|e| with_context!(e, "Failed to create directory {}", dir.display()))?;

    let mut written = Vec::new();
    for (idx, section) in page.sections.iter().enumerate() {
        if let Some(chart) = &section.chart {
            let path = dir.join(format!("{:02}-{}.png", idx + 1, slug(&section.heading)));
            chart.render_to_file(&path)?;
            written.push(path);
        }
    }

    info!(dir = %dir.display(), charts = written.len(), "Exported chart images");
    Ok(written)
}
