use std::path::PathBuf;

use anyhow::Context;
use burrow_catalog::{CardId, CatalogConfig, Deck, SourceConfig};
use clap::{Parser, Subcommand};

/// Browse the card catalog.
#[derive(Parser, Debug)]
#[command(name = "burrow", version, about)]
pub struct Cli {
	/// Config file (default: <config dir>/burrow/config.toml if present)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Read <deck>.json partitions from this directory instead of bundled data
	#[arg(long, value_name = "DIR", global = true)]
	pub data_dir: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List decks with their card counts
	Decks,
	/// List cards, optionally from a single deck
	List {
		#[arg(long)]
		deck: Option<Deck>,
	},
	/// Show one card by id (`42` or `#42`)
	Show { id: CardId },
	/// Reload on every line read from stdin and report each published catalog
	Watch,
}

impl Cli {
	/// Resolves the effective config: explicit file, else the default file if
	/// it exists, else defaults; then command-line overrides.
	pub fn resolve_config(&self) -> anyhow::Result<CatalogConfig> {
		let mut config = match &self.config {
			Some(path) => CatalogConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
			None => match default_config_path().filter(|path| path.exists()) {
				Some(path) => CatalogConfig::load(&path).with_context(|| format!("loading config {}", path.display()))?,
				None => CatalogConfig::default(),
			},
		};

		if let Some(dir) = &self.data_dir {
			config.source = SourceConfig::Directory(dir.clone());
		}
		Ok(config)
	}
}

fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("burrow").join("config.toml"))
}
