use std::path::PathBuf;

use mdclean::CleaningOptions;
use serde::{Deserialize, Serialize};

/// Current schema version for command output.
pub const SCHEMA_VERSION: u32 = 1;

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<CommandInputs>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub artifacts: Vec<Artifact>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub diagnostics: Vec<Diagnostic>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub config: Option<EffectiveConfig>,
}

/// Inputs used for a command execution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
	/// File paths, or `-` for stdin, in the order given.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub sources: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_path: Option<PathBuf>,
}

/// Error information for failed commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	IoError,
	InvalidInput,
	InvalidOptions,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::InvalidOptions => write!(f, "INVALID_OPTIONS"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// File written by a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
	#[serde(rename = "type")]
	pub artifact_type: ArtifactType,
	pub path: PathBuf,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size_bytes: Option<u64>,
}

/// Artifact categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
	Text,
}

/// Diagnostic message attached to a command result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
	pub level: DiagnosticLevel,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
	Info,
	Warning,
	Error,
}

/// Options a command actually ran with, and the files they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
	pub options: CleaningOptions,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub config_files: Vec<PathBuf>,
}
