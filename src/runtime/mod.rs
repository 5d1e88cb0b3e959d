use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::catalog::Outcome;

mod cli;
mod modes;
mod prompt;
mod settings;

use cli::{Args, RunMode};
use modes::{ArtistStatus, Catalogs};
use prompt::ConsolePrompt;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "tracklist=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = settings::load_settings(args.config.clone())
        .context("failed to load configuration")?;
    args.apply(&mut settings);

    if args.show_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let catalog_root = settings
        .paths
        .catalog_root
        .clone()
        .context("no catalog root: pass --catalog-root or set paths.catalog_root")?;
    let catalogs = Catalogs::new(&settings, catalog_root);

    match args.mode {
        RunMode::Artist => {
            let outcome = catalogs
                .process_artist(&args.path, &mut ConsolePrompt)
                .with_context(|| format!("failed to catalog {}", args.path.display()))?;
            report_outcome(&args.path.display().to_string(), outcome);
        }
        RunMode::All => {
            let report = catalogs
                .process_all(&args.path, &mut ConsolePrompt, &mut ConsolePrompt)
                .with_context(|| format!("failed to catalog artists under {}", args.path.display()))?;
            let failed = report
                .iter()
                .filter(|(_, status)| matches!(status, ArtistStatus::Failed(_)))
                .count();
            for (artist, status) in &report {
                match status {
                    ArtistStatus::Done(outcome) => report_outcome(artist, *outcome),
                    ArtistStatus::NotSelected => info!(%artist, "not selected"),
                    ArtistStatus::Failed(cause) => warn!(%artist, %cause, "failed"),
                }
            }
            info!(artists = report.len(), failed, "all artists processed");
        }
        RunMode::Summary => {
            let outcome = catalogs
                .process_summary(&args.path, &mut ConsolePrompt)
                .with_context(|| format!("failed to build summary from {}", args.path.display()))?;
            report_outcome(&settings.layout.summary_name, outcome);
        }
    }

    Ok(())
}

fn report_outcome(label: &str, outcome: Outcome) {
    match outcome {
        Outcome::Committed { added, removed } => {
            info!(%label, added, removed, "catalog updated")
        }
        Outcome::Unchanged => info!(%label, "catalog already up to date"),
        Outcome::Skipped => info!(%label, "catalog update skipped"),
    }
}
