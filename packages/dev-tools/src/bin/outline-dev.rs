//! Outline Development CLI
//!
//! Drives the outline engine against a JSON outline file, for poking at
//! drag-and-drop edge cases without the editor running.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin outline-dev -- --file draft.json add-part --title "Act One"
//! cargo run --bin outline-dev -- --file draft.json add-chapter --parent <PART_ID>
//! cargo run --bin outline-dev -- --file draft.json move <ID> <TARGET_ID> inside
//! cargo run --bin outline-dev -- --file draft.json show --depth
//! cargo run --bin outline-dev -- --file draft.json apply '{"op":"toggleCollapsed","id":"<ID>"}'
//! ```
//!
//! Rejected edits print `no change` and exit successfully, matching how the
//! editor ignores invalid drops. Logging follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyloom_core::outline::{flatten_with_depth, violations, word_count_summary};
use storyloom_core::{
    AutosaveProcessor, DropPosition, JsonFileStore, MemoryStore, Outline, OutlineConfig,
    OutlineOperation, OutlineSession, OutlineStore,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "outline-dev")]
#[command(about = "Inspect and edit a Storyloom outline file")]
struct Cli {
    /// Outline file (defaults to the configured store path)
    #[arg(long, value_name = "PATH", global = true)]
    file: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Apply edits in memory only and leave the file untouched
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the visible outline
    Show {
        /// Indent chapters under their part
        #[arg(long)]
        depth: bool,
    },
    /// Append a part to the top level
    AddPart {
        #[arg(long)]
        title: Option<String>,
    },
    /// Append a chapter to a part, or to the top level
    AddChapter {
        #[arg(long, value_name = "PART_ID")]
        parent: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Drop one node before, after or inside another
    Move {
        active: String,
        target: String,
        position: DropPosition,
    },
    /// Delete a node (a part takes its chapters with it)
    Delete { id: String },
    Rename { id: String, title: String },
    /// Toggle a part between collapsed and expanded
    Toggle { id: String },
    /// Report invariant violations in the stored file
    Check,
    /// Print word counts per part as JSON
    Stats,
    /// Apply a raw JSON operation
    Apply { operation: String },
}

impl Command {
    /// The edit this command performs, if it is one
    fn operation(&self) -> Result<Option<OutlineOperation>> {
        let operation = match self {
            Command::Show { .. } | Command::Check | Command::Stats => return Ok(None),
            Command::AddPart { title } => OutlineOperation::InsertPart {
                title: title.clone(),
            },
            Command::AddChapter { parent, title } => OutlineOperation::InsertChapter {
                parent_id: parent.clone(),
                title: title.clone(),
            },
            Command::Move {
                active,
                target,
                position,
            } => OutlineOperation::Move {
                active_id: active.clone(),
                target_id: target.clone(),
                position: *position,
            },
            Command::Delete { id } => OutlineOperation::Delete { id: id.clone() },
            Command::Rename { id, title } => OutlineOperation::Rename {
                id: id.clone(),
                title: title.clone(),
            },
            Command::Toggle { id } => OutlineOperation::ToggleCollapsed { id: id.clone() },
            Command::Apply { operation } => {
                serde_json::from_str(operation).context("Invalid operation JSON")?
            }
        };
        Ok(Some(operation))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse(), &mut std::io::stdout()).await
}

/// Execute one command, writing its report to `out`
async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => OutlineConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => OutlineConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;

    let path = match &cli.file {
        Some(path) => path.clone(),
        None => config.resolve_store_path()?,
    };

    let file_store = JsonFileStore::new(&path);
    if let Command::Check = cli.command {
        let outline = file_store
            .load_raw()
            .await
            .with_context(|| format!("Failed to read outline {}", path.display()))?
            .unwrap_or_default();
        return check(&outline, &path, out);
    }

    let outline = file_store
        .load()
        .await
        .with_context(|| format!("Failed to load outline {}", path.display()))?
        .unwrap_or_default();

    let Some(operation) = cli.command.operation()? else {
        return inspect(&cli.command, &outline, out);
    };
    tracing::info!("Applying '{}' to {}", operation.name(), path.display());

    let store: Arc<dyn OutlineStore> = if cli.dry_run {
        Arc::new(MemoryStore::with_outline(outline.clone()))
    } else {
        Arc::new(file_store)
    };
    let autosave = AutosaveProcessor::spawn(store, config.autosave_debounce());
    let mut session = OutlineSession::new(outline, &config).with_autosave(autosave.handle());

    let outcome = session.apply(operation);
    if outcome.changed {
        if let Some(id) = &outcome.created_id {
            writeln!(out, "created {}", id)?;
        }
        print_outline(session.outline(), true, out)?;
    } else {
        writeln!(out, "no change")?;
    }

    // Shutdown flushes the pending save before the process exits
    autosave.shutdown().await?;
    if cli.dry_run && outcome.changed {
        tracing::info!("Dry run: {} left untouched", path.display());
    }
    Ok(())
}

/// Read-only commands
fn inspect(command: &Command, outline: &Outline, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show { depth } => print_outline(outline, *depth, out)?,
        Command::Stats => {
            let summary = serde_json::to_string_pretty(&word_count_summary(outline))?;
            writeln!(out, "{}", summary)?;
        }
        _ => {}
    }
    Ok(())
}

/// Report violations in the file as stored, before load-time repair
fn check(outline: &Outline, path: &Path, out: &mut impl Write) -> Result<()> {
    let found = violations(outline);
    if found.is_empty() {
        writeln!(out, "{}: ok ({} nodes)", path.display(), outline.len())?;
        return Ok(());
    }
    for violation in &found {
        writeln!(out, "{}", violation)?;
    }
    anyhow::bail!("{} invariant violation(s)", found.len())
}

fn print_outline(outline: &Outline, indent: bool, out: &mut impl Write) -> Result<()> {
    if outline.is_empty() {
        writeln!(out, "(empty outline)")?;
        return Ok(());
    }
    for item in flatten_with_depth(outline) {
        let node = &item.node;
        let pad = if indent { "  ".repeat(item.depth) } else { String::new() };
        let marker = match (node.is_part(), node.collapsed) {
            (true, true) => "+",
            (true, false) => "-",
            (false, _) => " ",
        };
        writeln!(out, "{pad}{marker} [{}] {} ({})", node.kind, node.title, node.id)?;
    }
    Ok(())
}
