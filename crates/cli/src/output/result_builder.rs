use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::output::format::OutputFormat;
use crate::output::model::{
	Artifact, CommandError, CommandInputs, CommandResult, Diagnostic, DiagnosticLevel, EffectiveConfig, ErrorCode, SCHEMA_VERSION,
};

/// Human-readable rendering of a payload for `--format text`.
pub trait TextRender {
	fn render_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl TextRender for () {
	fn render_text(&self, _out: &mut dyn Write) -> io::Result<()> {
		Ok(())
	}
}

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	inputs: Option<CommandInputs>,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
	artifacts: Vec<Artifact>,
	diagnostics: Vec<Diagnostic>,
	config: Option<EffectiveConfig>,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			inputs: None,
			data: None,
			error: None,
			start_time: Instant::now(),
			artifacts: Vec::new(),
			diagnostics: Vec::new(),
			config: None,
		}
	}

	pub fn inputs(mut self, inputs: CommandInputs) -> Self {
		self.inputs = Some(inputs);
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
			details: None,
		});
		self
	}

	pub fn error_with_details(mut self, code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
			details: Some(details),
		});
		self
	}

	pub fn artifact(mut self, artifact: Artifact) -> Self {
		self.artifacts.push(artifact);
		self
	}

	pub fn diagnostic_with_source(mut self, level: DiagnosticLevel, message: impl Into<String>, source: impl Into<String>) -> Self {
		self.diagnostics.push(Diagnostic {
			level,
			message: message.into(),
			source: Some(source.into()),
		});
		self
	}

	pub fn config(mut self, config: EffectiveConfig) -> Self {
		self.config = Some(config);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();

		CommandResult {
			schema_version: Some(SCHEMA_VERSION),
			ok,
			command: self.command,
			inputs: self.inputs,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
			artifacts: self.artifacts,
			diagnostics: self.diagnostics,
			config: self.config,
		}
	}
}

/// Print a command result in the specified format.
///
/// Structured formats go to stdout whole. Text prints only the payload on
/// stdout; errors, diagnostics and artifacts go to stderr so piped output stays
/// clean.
pub fn print_result<T: Serialize + TextRender>(result: &CommandResult<T>, format: OutputFormat) -> io::Result<()> {
	let mut stdout = io::stdout().lock();
	match format {
		OutputFormat::Toon => {
			let json_value = serde_json::to_value(result)?;
			writeln!(stdout, "{}", toon::encode(&json_value, None))?;
		}
		OutputFormat::Json => {
			writeln!(stdout, "{}", serde_json::to_string_pretty(result)?)?;
		}
		OutputFormat::Ndjson => {
			writeln!(stdout, "{}", serde_json::to_string(result)?)?;
		}
		OutputFormat::Text => {
			if let Some(data) = result.data.as_ref().filter(|_| result.ok) {
				data.render_text(&mut stdout)?;
			}
			print_result_notes(result);
		}
	}
	stdout.flush()
}

fn print_result_notes<T: Serialize>(result: &CommandResult<T>) {
	if let Some(ref error) = result.error {
		print_error_stderr(error);
	}

	for diag in &result.diagnostics {
		let prefix = match diag.level {
			DiagnosticLevel::Info => "info",
			DiagnosticLevel::Warning => "warning",
			DiagnosticLevel::Error => "error",
		};
		match diag.source {
			Some(ref source) => eprintln!("[{prefix}:{source}] {}", diag.message),
			None => eprintln!("[{prefix}] {}", diag.message),
		}
	}

	for artifact in &result.artifacts {
		eprintln!("Saved {:?}: {}", artifact.artifact_type, artifact.path.display());
	}
}

/// Print an error to stderr in human-readable format.
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ok_requires_data_and_no_error() {
		let result = ResultBuilder::new("clean").data("text".to_string()).build();
		assert!(result.ok);
		assert_eq!(result.schema_version, Some(SCHEMA_VERSION));

		let result: CommandResult<()> = ResultBuilder::new("clean").error(ErrorCode::IoError, "missing").build();
		assert!(!result.ok);
		assert!(result.data.is_none());
	}

	#[test]
	fn envelope_uses_camel_case_and_skips_empty_fields() {
		let result = ResultBuilder::new("inspect")
			.data(1u32)
			.inputs(CommandInputs {
				sources: vec!["-".into()],
				output_path: None,
			})
			.build();
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
		assert_eq!(json["inputs"]["sources"][0], "-");
		assert!(json.get("durationMs").is_some());
		assert!(json.get("error").is_none());
		assert!(json.get("artifacts").is_none());
		assert!(json["inputs"].get("outputPath").is_none());
	}

	#[test]
	fn error_codes_serialize_screaming_snake() {
		let result: CommandResult<()> = ResultBuilder::new("clean")
			.error_with_details(ErrorCode::InvalidOptions, "bad", serde_json::json!({"path": "x.json"}))
			.build();
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["error"]["code"], "INVALID_OPTIONS");
		assert_eq!(json["error"]["details"]["path"], "x.json");
		assert_eq!(ErrorCode::InvalidOptions.to_string(), "INVALID_OPTIONS");
	}
}
