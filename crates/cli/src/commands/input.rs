//! Reading inputs and fanning them out over the blocking pool.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use crate::error::{CliError, Result};

const STDIN_MARKER: &str = "-";

/// Where one document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
	Stdin,
	File(PathBuf),
}

impl Source {
	/// Label used in results: the path as given, or `-`.
	pub(crate) fn label(&self) -> String {
		match self {
			Source::Stdin => STDIN_MARKER.to_string(),
			Source::File(path) => path.display().to_string(),
		}
	}

	fn read(&self) -> Result<String> {
		match self {
			Source::Stdin => {
				let mut text = String::new();
				std::io::stdin().read_to_string(&mut text).map_err(CliError::Stdin)?;
				Ok(text)
			}
			Source::File(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
				path: path.clone(),
				source,
			}),
		}
	}
}

/// Sources for the given file arguments; none means stdin.
pub(crate) fn sources(files: &[PathBuf]) -> Result<Vec<Source>> {
	if files.is_empty() {
		return Ok(vec![Source::Stdin]);
	}

	let sources: Vec<Source> = files
		.iter()
		.map(|path| if path == Path::new(STDIN_MARKER) { Source::Stdin } else { Source::File(path.clone()) })
		.collect();
	if sources.iter().filter(|source| **source == Source::Stdin).count() > 1 {
		return Err(CliError::InvalidInput("stdin (`-`) can only be read once".to_string()));
	}
	Ok(sources)
}

/// Reads every source and runs `work` on it, one blocking task per source.
///
/// Results come back in input order. The first failure aborts the rest.
pub(crate) async fn process_all<T, F>(sources: Vec<Source>, work: F) -> Result<Vec<T>>
where
	T: Send + 'static,
	F: Fn(&Source, String) -> T + Send + Sync + 'static,
{
	let work = Arc::new(work);
	let mut tasks = JoinSet::new();
	for (index, source) in sources.into_iter().enumerate() {
		let work = Arc::clone(&work);
		tasks.spawn_blocking(move || -> Result<(usize, T)> {
			let text = source.read()?;
			debug!(target = "mdclean.input", source = %source.label(), bytes = text.len(), "read input");
			Ok((index, work(&source, text)))
		});
	}

	let mut results = Vec::with_capacity(tasks.len());
	while let Some(joined) = tasks.join_next().await {
		results.push(joined??);
	}
	results.sort_by_key(|(index, _)| *index);
	Ok(results.into_iter().map(|(_, value)| value).collect())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;

	#[test]
	fn no_files_means_stdin() {
		assert_eq!(sources(&[]).unwrap(), vec![Source::Stdin]);
		assert_eq!(sources(&[PathBuf::from("-")]).unwrap(), vec![Source::Stdin]);
	}

	#[test]
	fn stdin_only_once() {
		let err = sources(&[PathBuf::from("-"), PathBuf::from("a.md"), PathBuf::from("-")]).unwrap_err();
		assert!(matches!(err, CliError::InvalidInput(_)));
	}

	#[tokio::test]
	async fn results_keep_input_order() {
		let dir = TempDir::new().unwrap();
		let files: Vec<PathBuf> = (0..8)
			.map(|i| {
				let path = dir.path().join(format!("{i}.md"));
				fs::write(&path, "x".repeat(i + 1)).unwrap();
				path
			})
			.collect();

		let lengths = process_all(sources(&files).unwrap(), |_, text| text.len()).await.unwrap();
		assert_eq!(lengths, (1..=8).collect::<Vec<_>>());
	}

	#[tokio::test]
	async fn missing_file_fails_with_its_path() {
		let dir = TempDir::new().unwrap();
		let missing = dir.path().join("missing.md");
		let err = process_all(vec![Source::File(missing.clone())], |_, text| text).await.unwrap_err();
		assert!(matches!(err, CliError::Read { ref path, .. } if *path == missing));
	}
}
