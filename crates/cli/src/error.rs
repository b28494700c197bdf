use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to read stdin: {0}")]
	Stdin(#[source] io::Error),

	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write output: {0}")]
	Output(#[source] io::Error),

	#[error("invalid options in {}: {source}", path.display())]
	Options {
		path: PathBuf,
		#[source]
		source: mdclean::Error,
	},

	#[error("{0}")]
	InvalidInput(String),

	#[error("worker task failed: {0}")]
	Join(#[from] tokio::task::JoinError),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Read { .. } | CliError::Stdin(_) | CliError::Write { .. } | CliError::Output(_) => ErrorCode::IoError,
			CliError::Options { .. } => ErrorCode::InvalidOptions,
			CliError::InvalidInput(_) => ErrorCode::InvalidInput,
			CliError::Join(_) => ErrorCode::InternalError,
		}
	}

	/// File the error concerns, if any.
	pub fn path(&self) -> Option<&PathBuf> {
		match self {
			CliError::Read { path, .. } | CliError::Write { path, .. } | CliError::Options { path, .. } => Some(path),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_file() {
		let err = CliError::Read {
			path: PathBuf::from("notes.md"),
			source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
		};
		assert_eq!(err.to_string(), "failed to read notes.md: no such file");
		assert_eq!(err.code(), ErrorCode::IoError);
		assert_eq!(err.path(), Some(&PathBuf::from("notes.md")));
	}

	#[test]
	fn option_errors_map_to_invalid_options() {
		let err = CliError::Options {
			path: PathBuf::from("opts.json"),
			source: mdclean::Error::UnknownCategory("x".into()),
		};
		assert_eq!(err.code(), ErrorCode::InvalidOptions);
		assert!(err.to_string().starts_with("invalid options in opts.json"));
		assert_eq!(CliError::InvalidInput("bad".into()).code(), ErrorCode::InvalidInput);
	}
}
