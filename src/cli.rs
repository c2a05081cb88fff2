//! Command-line interface
//!
//! Supports:
//! - Printing the heading outline of a file
//! - Document statistics
//! - Writing and restoring JSON snapshots
//! - Showing or writing the engine configuration

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::EngineConfig;
use crate::engine::DocumentEngine;
use crate::mode::Mode;
use crate::outline::OutlineNode;
use crate::project::{read_snapshot, write_snapshot, ProjectFile};

/// Document engine for mode-based writing
#[derive(Parser, Debug)]
#[command(name = "wordsmith", version, about = "Document engine for mode-based writing")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/wordsmith/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the heading outline of a file
    Outline {
        file: PathBuf,
        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print line, word, character and heading counts
    Stats { file: PathBuf },
    /// Write a JSON snapshot of a file
    Snapshot {
        file: PathBuf,
        /// Mode recorded in the snapshot
        #[arg(long, value_name = "MODE")]
        mode: Option<Mode>,
        /// Output path (stdout when omitted)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write the text of a JSON snapshot to a file
    Restore {
        snapshot: PathBuf,
        #[arg(short = 'o', long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the effective configuration as YAML
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

impl CliArgs {
    pub fn engine_config(&self) -> EngineConfig {
        match &self.config {
            Some(path) => EngineConfig::load_from(path),
            None => EngineConfig::load(),
        }
    }
}

/// Run a parsed command, writing its report to `out`
pub fn run(args: CliArgs, out: &mut impl Write) -> Result<()> {
    let config = args.engine_config();
    match args.command {
        Command::Config { write } => {
            let rendered =
                serde_yaml::to_string(&config).context("Failed to serialize config")?;
            write!(out, "{}", rendered)?;
            if write {
                match &args.config {
                    Some(path) => config.save_to(path),
                    None => config.save(),
                }
                .map_err(anyhow::Error::msg)?;
            }
        }
        Command::Outline { file, json } => {
            let (_, engine) = ProjectFile::open(&file, &config)?;
            let outline = engine.outline();
            if json {
                let rendered = serde_json::to_string_pretty(&outline)
                    .context("Failed to serialize outline")?;
                writeln!(out, "{}", rendered)?;
            } else {
                for node in &outline.roots {
                    write_node(out, node, 0)?;
                }
            }
        }
        Command::Stats { file } => {
            let (_, engine) = ProjectFile::open(&file, &config)?;
            write_stats(out, &engine)?;
        }
        Command::Snapshot { file, mode, output } => {
            let (_, engine) = ProjectFile::open(&file, &config)?;
            if let Some(mode) = mode {
                engine
                    .request_mode_switch(mode)
                    .with_context(|| format!("Cannot snapshot in {} mode", mode))?;
            }
            let snapshot = engine.snapshot();
            match output {
                Some(path) => write_snapshot(&path, &snapshot)?,
                None => writeln!(out, "{}", snapshot.to_json()?)?,
            }
        }
        Command::Restore { snapshot, output } => {
            let snapshot = read_snapshot(&snapshot)?;
            let mode = snapshot.mode;
            let (mut project, engine) = ProjectFile::open(&output, &config)?;
            engine.restore(snapshot)?;
            project.save(&engine)?;
            writeln!(
                out,
                "Restored {} chars ({} mode) to {}",
                engine.len(),
                mode,
                output.display()
            )?;
        }
    }
    Ok(())
}

fn write_node(out: &mut impl Write, node: &OutlineNode, depth: usize) -> Result<()> {
    writeln!(
        out,
        "{}{} {} (line {})",
        "  ".repeat(depth),
        "#".repeat(node.level as usize),
        node.title,
        node.line + 1
    )?;
    for child in &node.children {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, engine: &DocumentEngine) -> Result<()> {
    let (lines, words, chars, graphemes) = engine.with(|doc| {
        let storage = doc.storage();
        (
            storage.line_count(),
            storage.word_count(),
            storage.len(),
            storage.grapheme_count(),
        )
    });
    let headings = engine.outline().heading_count();
    writeln!(out, "lines:     {}", lines)?;
    writeln!(out, "words:     {}", words)?;
    writeln!(out, "chars:     {}", chars)?;
    writeln!(out, "graphemes: {}", graphemes)?;
    writeln!(out, "headings:  {}", headings)?;
    Ok(())
}
