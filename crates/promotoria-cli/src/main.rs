mod report;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "promotoria-cli")]
#[command(about = "Promotoría campaign reporting command line interface")]
struct Cli {
    /// Directory holding the campaign folders (overrides `PROMOTORIA_DATA_ROOT`)
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List campaign folders
    Campaigns,
    /// List advisors across every campaign folder
    Advisors,
    /// Tier counts and advisor lists per campaign
    Report {
        /// Restrict the report to one campaign folder
        #[arg(long)]
        campaign: Option<String>,
    },
    /// Summary workbook sections and paid/pending totals
    Summary {
        /// Comma-separated branch codes to keep, e.g. 2692,2856
        #[arg(long)]
        sucursal: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = promotoria_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = promotoria_core::resolve_settings(config.settings_path.as_deref())?;
    let root = cli.data_root.unwrap_or(config.data_root);
    tracing::debug!(data_root = %root.display(), "using data root");

    let mut out = std::io::stdout().lock();
    match cli.command {
        Some(Commands::Campaigns) => report::run_campaigns(&mut out, &root, &settings)?,
        Some(Commands::Advisors) => report::run_advisors(&mut out, &root, &settings)?,
        Some(Commands::Report { campaign }) => {
            report::run_report(&mut out, &root, &settings, campaign.as_deref())?;
        }
        Some(Commands::Summary { sucursal }) => {
            report::run_summary(&mut out, &root, &settings, sucursal.as_deref())?;
        }
        None => writeln!(out, "promotoria-cli ready; run with --help to list commands")?,
    }

    Ok(())
}
