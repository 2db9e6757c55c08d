//! tipdesk - admin tooling for the prediction store
//!
//! Parses exported prediction files, bulk-saves them, and runs the admin
//! list/archive/delete operations against the hosted backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use tipdesk_lib::modules::data_import::commands::{
    bulk_save_predictions, generate_example, parse_import, BulkSaveRequest, ParseImportRequest,
};
use tipdesk_lib::modules::data_import::{ImportProgress, ParsedBatch};
use tipdesk_lib::modules::prediction::commands::{
    delete_prediction, get_archive, list_predictions, save_prediction, ListPredictionsRequest,
    SavePredictionRequest,
};
use tipdesk_lib::modules::prediction::domain::services::PredictionFilter;
use tipdesk_lib::modules::prediction::{PredictionForm, ResultStatus, Tier};
use tipdesk_lib::shared::utils::init_logger;
use tipdesk_lib::shared::BackendConfig;
use tipdesk_lib::AppState;

#[derive(Parser, Debug)]
#[command(name = "tipdesk")]
#[command(about = "Prediction import and admin tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a JSON or CSV export without saving it
    Parse {
        file: PathBuf,
        /// Print the normalised records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse an export and save every record
    Import {
        file: PathBuf,
        /// Save into a throwaway in-memory store instead of the backend
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a sample import payload for a tier
    Example { tier: Tier },
    /// List stored predictions, newest first
    List {
        #[arg(long)]
        tier: Option<Tier>,
        /// Text matched against match names and picks
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        status: Option<ResultStatus>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Create a prediction from an admin form file, or edit one with --id
    Save {
        form: PathBuf,
        /// Existing prediction to overwrite
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Show the public archive grouped by tier
    Archive,
    /// Delete a prediction and its matches
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { file, json } => {
            let state = AppState::in_memory();
            let batch = parse_file(&state, &file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&batch.predictions)?);
            }
        }
        Command::Import { file, dry_run } => {
            let state = if dry_run {
                AppState::in_memory()
            } else {
                backend_state()?
            };
            let batch = parse_file(&state, &file)?;

            let import_service = state.import_service.as_ref().clone().with_progress(Arc::new(
                |progress: &ImportProgress| {
                    eprintln!(
                        "[{}/{}] {}",
                        progress.current, progress.total, progress.current_label
                    );
                },
            ));
            let result = bulk_save_predictions(
                BulkSaveRequest {
                    predictions: batch.predictions,
                },
                &import_service,
            )
            .await;

            for failed in &result.failed {
                eprintln!("  failed {}: {}", failed.label, failed.reason);
            }
            println!("{}", result.summary());
            if !result.failed.is_empty() {
                return Err(anyhow!("{} prediction(s) could not be saved", result.failed.len()));
            }
        }
        Command::Example { tier } => {
            let state = AppState::in_memory();
            let example = generate_example(tier, &state.import_service).map_err(|e| anyhow!(e))?;
            println!("{}", example);
        }
        Command::List {
            tier,
            query,
            from,
            to,
            status,
            limit,
        } => {
            let state = backend_state()?;
            let mut filter = PredictionFilter::default().with_range(from, to);
            if let Some(tier) = tier {
                filter = filter.with_tier(tier);
            }
            if let Some(query) = query {
                filter = filter.with_query(query);
            }
            if let Some(status) = status {
                filter = filter.with_status(status);
            }

            let entries = list_predictions(
                ListPredictionsRequest { filter, limit },
                &state.prediction_service,
            )
            .await
            .map_err(|e| anyhow!(e))?;

            for entry in &entries {
                let record = &entry.prediction;
                println!(
                    "{}  {}  {:<8}  {:>6}  {:<7}  {} match(es)",
                    record.id,
                    record.prediction_date,
                    record.tier.to_string(),
                    record
                        .ticket_odds
                        .map(|o| format!("{:.2}", o))
                        .unwrap_or_else(|| "-".to_string()),
                    entry.status().to_string(),
                    entry.matches.len()
                );
            }
            println!("{} prediction(s)", entries.len());
        }
        Command::Save { form: path, id } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let form: PredictionForm = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a prediction form", path.display()))?;

            let state = backend_state()?;
            let saved = save_prediction(SavePredictionRequest { id, form }, &state.prediction_service)
                .await
                .map_err(|e| anyhow!(e))?;
            println!(
                "Saved {} ({}, {} match(es))",
                saved.id(),
                saved.prediction.tier,
                saved.matches.len()
            );
        }
        Command::Archive => {
            let state = backend_state()?;
            let archive = get_archive(&state.prediction_service)
                .await
                .map_err(|e| anyhow!(e))?;

            for tier in Tier::ALL {
                let record = archive.record(tier);
                let win_rate = record
                    .win_rate()
                    .map(|rate| format!("{:.0}%", rate))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{}: {} prediction(s), {} settled, {} won ({})",
                    tier.display_name(),
                    record.total,
                    record.settled,
                    record.won,
                    win_rate
                );
                for entry in archive.bucket(tier) {
                    println!(
                        "  {}  {}",
                        entry.prediction.prediction_date,
                        entry.prediction.result.as_deref().unwrap_or("pending")
                    );
                }
            }
        }
        Command::Delete { id } => {
            let state = backend_state()?;
            delete_prediction(id, &state.prediction_service)
                .await
                .map_err(|e| anyhow!(e))?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

fn backend_state() -> Result<AppState> {
    let config = BackendConfig::from_env().context("Backend is not configured")?;
    AppState::from_config(config).context("Failed to initialise backend client")
}

/// Read and parse an export; validation messages go to stderr
fn parse_file(state: &AppState, path: &Path) -> Result<ParsedBatch> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match parse_import(ParseImportRequest { content }, &state.import_service) {
        Ok(batch) => {
            for row in &batch.skipped_rows {
                eprintln!("  skipped {}", row);
            }
            for warning in &batch.warnings {
                eprintln!("  warning: {}", warning);
            }
            println!(
                "{} prediction(s) with {} match(es) ready to import",
                batch.len(),
                batch.match_count()
            );
            Ok(batch)
        }
        Err(messages) => {
            for message in &messages {
                eprintln!("  {}", message);
            }
            Err(anyhow!("{} rejected with {} error(s)", path.display(), messages.len()))
        }
    }
}
