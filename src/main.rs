//! Generate a report for one session from a JSON file.
//!
//! Usage: `examwatch <session.json>` where the file holds
//! `{"session": {...}, "events": [...]}`. Storage backend selection comes
//! from the environment (see `StorageConfig::from_env`). The structured
//! record is printed to stdout; the HTML and CSV renderings land in the
//! configured store.

use anyhow::{Context, Result};
use serde::Deserialize;

use examwatch::{Event, ReportService, Session, StorageConfig, WeightTable};

#[derive(Debug, Deserialize)]
struct SessionFile {
    session: Session,
    events: Vec<Event>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: examwatch <session.json>")?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read session file {path}"))?;
    let input: SessionFile =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))?;

    let config = StorageConfig::from_env()?;
    let store = examwatch::storage::from_config(&config)?;
    let service = ReportService::new(store, WeightTable::default());

    let (record, keys) = service.generate_report(&input.session, input.events)?;
    log::info!("wrote {} and {}", keys.document, keys.table);
    println!("{}", record.to_json()?);
    Ok(())
}
