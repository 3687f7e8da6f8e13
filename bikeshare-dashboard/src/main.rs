//! Bike Sharing Dashboard - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};

use bikeshare_common::{init_logging, LoggingConfig};
use bikeshare_config::{CliOverrides, Config, ConfigLoader};
use bikeshare_dashboard::{
    export_html, export_png, presenter_for, DashboardContext, OutputFormat, PassOutcome,
    Presenter, ReportingView,
};

const PROMPT: &str = "Date range (YYYY-MM-DD YYYY-MM-DD), or 'quit': ";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Directory containing dashboard/day_cleaned.csv and dashboard/hour_cleaned.csv
    #[arg(long, default_value = ".")]
    data_root: PathBuf,

    /// First day of the selection; with --end, renders one page and exits
    #[arg(long)]
    start: Option<String>,

    /// Last day of the selection
    #[arg(long)]
    end: Option<String>,

    /// Terminal output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write each page as HTML to this path
    #[arg(long)]
    html: Option<PathBuf>,

    /// Also write each chart as a PNG into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// Everything a render pass needs to be shown and exported
struct Session<'a> {
    view: ReportingView<'a>,
    presenter: Box<dyn Presenter>,
    html_path: Option<PathBuf>,
    export_dir: Option<PathBuf>,
}

impl Session<'_> {
    fn publish(&self, outcome: &PassOutcome) -> Result<()> {
        info!(outcome = outcome.kind(), "Render pass finished");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.presenter
            .present(outcome, &mut out)
            .context("Failed to write dashboard output")?;

        // Export failures only cost this pass its files
        if let Some(path) = &self.html_path {
            if let Err(e) = export_html(outcome, path) {
                error!(error = %e, path = %path.display(), "HTML export failed");
            }
        }
        if let Some(dir) = &self.export_dir {
            match export_png(outcome, dir) {
                Ok(files) => debug!(count = files.len(), "Wrote chart images"),
                Err(e) => error!(error = %e, dir = %dir.display(), "Chart export failed"),
            }
        }
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };

    config
        .apply_overrides(CliOverrides {
            log_level: args.log_level.clone(),
            html_path: args.html.as_ref().map(|path| path.display().to_string()),
            export_dir: args.export_dir.as_ref().map(|dir| dir.display().to_string()),
        })
        .context("Invalid command line arguments")?;
    Ok(config)
}

async fn run_interactive(session: &Session<'_>, context: &DashboardContext) -> Result<()> {
    let initial = match context.initial_selection() {
        Some(range) => session.view.render_range(&range),
        None => session.view.render_input(""),
    };
    session.publish(&initial)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("{PROMPT}");
        io::stderr().flush().ok();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    info!("Input closed, ending session");
                    break;
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if matches!(input, "quit" | "exit" | "q") {
                    info!("Session ended by user");
                    break;
                }
                session.publish(&session.view.render_input(input))?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal, ending session");
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(LoggingConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")?;

    info!("Starting bike sharing dashboard");

    let context = DashboardContext::load(&args.data_root).with_context(|| {
        format!("Failed to load datasets below {}", args.data_root.display())
    })?;

    let format = match args.format {
        Some(format) => format,
        None => config
            .output
            .format
            .parse::<OutputFormat>()
            .context("Invalid output format in configuration")?,
    };

    let session = Session {
        view: ReportingView::new(&context, config.graph.clone()),
        presenter: presenter_for(format, &config.output),
        html_path: config.output.html_path.as_ref().map(PathBuf::from),
        export_dir: config.output.export_dir.as_ref().map(PathBuf::from),
    };

    if args.start.is_some() || args.end.is_some() {
        let input = [args.start.as_deref(), args.end.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        session.publish(&session.view.render_input(&input))?;
    } else {
        run_interactive(&session, &context).await?;
    }

    info!("Dashboard shutdown complete");
    Ok(())
}
