//! Resolution of the effective cleaning options.
//!
//! Layers, lowest first: built-in defaults, the user config file, `--options`,
//! `--all`/`--none`, `--strip`/`--keep`, `--tidy`.

use std::path::{Path, PathBuf};

use mdclean::CleaningOptions;
use tracing::debug;

use crate::cli::SelectionArgs;
use crate::error::{CliError, Result};
use crate::output::EffectiveConfig;

pub const CONFIG_DIR_NAME: &str = "mdclean";
pub const CONFIG_FILE_NAME: &str = "options.json";

/// `<config_dir>/mdclean/options.json`, when the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Options after every layer, plus the files that contributed.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
	pub options: CleaningOptions,
	pub config_files: Vec<PathBuf>,
}

impl ResolvedOptions {
	pub fn effective(&self) -> EffectiveConfig {
		EffectiveConfig {
			options: self.options,
			config_files: self.config_files.clone(),
		}
	}
}

/// Resolves options from an optional user config (skipped when missing), an
/// optional explicit options file (must exist) and the command-line selection.
pub fn resolve(user_config: Option<&Path>, options_file: Option<&Path>, selection: &SelectionArgs) -> Result<ResolvedOptions> {
	let mut options = CleaningOptions::default();
	let mut config_files = Vec::new();

	if let Some(path) = user_config.filter(|path| path.is_file()) {
		options = overlay_file(&options, path)?;
		config_files.push(path.to_path_buf());
	}
	if let Some(path) = options_file {
		options = overlay_file(&options, path)?;
		config_files.push(path.to_path_buf());
	}

	apply_selection(&mut options, selection);
	debug!(target = "mdclean.config", ?options, files = config_files.len(), "resolved cleaning options");

	Ok(ResolvedOptions { options, config_files })
}

fn overlay_file(base: &CleaningOptions, path: &Path) -> Result<CleaningOptions> {
	let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	base.overlay_json(&json).map_err(|source| CliError::Options {
		path: path.to_path_buf(),
		source,
	})
}

fn apply_selection(options: &mut CleaningOptions, selection: &SelectionArgs) {
	let tidy = options.tidy;
	if selection.all {
		*options = CleaningOptions { tidy, ..CleaningOptions::strip_all() };
	} else if selection.none {
		*options = CleaningOptions { tidy, ..CleaningOptions::preserve_all() };
	}

	for category in &selection.strip {
		options.set(*category, true);
	}
	for category in &selection.keep {
		options.set(*category, false);
	}
	if selection.tidy {
		options.tidy = true;
	}
}
