//! CLI host for the collectible lister.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use collectible_core::config::CollectibleConfig;
use collectible_core::{App, Lifetime};
use std::path::PathBuf;

use commands::{run_catalog, run_completions, run_download, run_man, run_tally};

/// Top-level CLI for the collectible lister.
#[derive(Debug, Parser)]
#[command(name = "collectible")]
#[command(about = "List and download collectibles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Request a download and print its status line.
    Download {
        /// Address of the item. Any text is accepted.
        url: String,
    },

    /// Count collectibles in decoded map dumps (JSON), one report per map.
    Tally {
        /// Paths to the map dumps.
        #[arg(required = true)]
        maps: Vec<PathBuf>,

        /// Entity catalog used to show display names instead of ids.
        #[arg(long, value_name = "CATALOG_JSON")]
        catalog: Option<PathBuf>,
    },

    /// Build an entity catalog from mods and print it as JSON.
    Catalog {
        /// Mod `.zip` archives or unpacked mod directories. Later mods win on id clashes.
        #[arg(required = true)]
        mods: Vec<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub fn run(self, cfg: &CollectibleConfig, lifetime: Lifetime) -> Result<()> {
        tracing::debug!("loaded config: {:?}", cfg);
        let app = App::with_lifetime(lifetime);

        match self {
            CliCommand::Download { url } => run_download(&app, &url),
            CliCommand::Tally { maps, catalog } => {
                run_tally(&app, cfg, &maps, catalog.as_deref())?
            }
            CliCommand::Catalog { mods } => run_catalog(&app, &mods)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
