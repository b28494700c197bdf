//! Errors raised while building cleaning options.
//!
//! Cleaning itself never fails; only option parsing can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("unknown element category: {0}")]
	UnknownCategory(String),

	#[error("invalid cleaning options: {0}")]
	InvalidOptions(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
