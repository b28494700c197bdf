use clap::ValueEnum;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Plain text: cleaned text verbatim, tables for reports (default)
	#[default]
	Text,
	/// JSON envelope
	Json,
	/// Newline-delimited JSON envelope
	Ndjson,
	/// TOON envelope (token-efficient for LLMs)
	Toon,
}

impl OutputFormat {
	/// Whether results are printed as a serialized envelope.
	pub fn is_structured(self) -> bool {
		self != OutputFormat::Text
	}
}

impl std::str::FromStr for OutputFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"text" => Ok(OutputFormat::Text),
			"json" => Ok(OutputFormat::Json),
			"ndjson" => Ok(OutputFormat::Ndjson),
			"toon" => Ok(OutputFormat::Toon),
			_ => Err(format!("unknown format: {s}")),
		}
	}
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Ndjson => write!(f, "ndjson"),
			OutputFormat::Toon => write!(f, "toon"),
		}
	}
}
