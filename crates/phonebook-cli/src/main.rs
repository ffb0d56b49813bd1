//! `phonebook`: command-line front end for the phonebook contact store.
//!
//! # Usage
//!
//! ```text
//! phonebook add first_name=Ann last_name=Lee homePh=555-0100
//! phonebook search 'ann|bob'
//! phonebook --file ~/contacts.json list --json
//! ```

mod app;
mod config;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use config::Settings;
use phonebook_store_json::JsonStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "A personal contact manager")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the phonebook document (default: phonebook.json).
  #[arg(short, long, env = "PHONEBOOK_FILE", value_name = "PATH")]
  file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List {
    /// Print field documents as JSON instead of display labels.
    #[arg(long)]
    json: bool,
  },
  /// List contacts matching a case-insensitive regular expression.
  Search {
    query: String,
    #[arg(long)]
    json: bool,
  },
  /// Show matching contacts field by field (all contacts if no query).
  Show { query: Option<String> },
  /// Add a contact from `key=value` pairs, e.g. `first_name=Ann`.
  Add {
    #[arg(required = true, value_parser = app::parse_assignment)]
    fields: Vec<(String, String)>,
  },
  /// Print the recognised field keys and labels.
  Fields,
  /// Write the current phonebook to a backup document.
  Backup { dest: PathBuf },
  /// Replace the phonebook with the contents of a backup document.
  Restore { backup: PathBuf },
  /// Remove every contact.
  Clear,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let settings = Settings::resolve(args.config.as_deref(), args.file)?;

  let store = JsonStore::open(&settings.file)
    .with_context(|| format!("opening phonebook at {}", settings.file.display()))?;
  let mut app = App::new(store, io::stdout().lock());

  match args.command {
    Command::List { json } => app.list(json),
    Command::Search { query, json } => app.search(&query, json),
    Command::Show { query } => app.show(query.as_deref().unwrap_or_default()),
    Command::Add { fields } => app.add(fields),
    Command::Fields => app.fields(),
    Command::Backup { dest } => app.backup(&dest),
    Command::Restore { backup } => app.restore(&backup),
    Command::Clear => app.clear(),
  }
}
