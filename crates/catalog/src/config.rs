//! Catalog configuration.
//!
//! Written in TOML:
//!
//! ```toml
//! # "bundled" (default) or a directory of <deck>.json files
//! source = { directory = "/usr/share/burrow/decks" }
//! load_on_start = true
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::source::{BundledSource, DirectorySource, PartitionSource};

/// Where partition bytes come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
	#[default]
	Bundled,
	Directory(PathBuf),
}

impl SourceConfig {
	pub fn open(&self) -> Arc<dyn PartitionSource> {
		match self {
			Self::Bundled => Arc::new(BundledSource),
			Self::Directory(root) => Arc::new(DirectorySource::new(root)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
	pub source: SourceConfig,
	/// Run one load cycle as soon as the service starts.
	pub load_on_start: bool,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			source: SourceConfig::Bundled,
			load_on_start: true,
		}
	}
}

impl CatalogConfig {
	pub fn parse(input: &str) -> ConfigResult<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}
}
