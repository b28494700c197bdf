use mdclean::clean_with_report;
use tracing::info;

use crate::cli::CleanArgs;
use crate::commands::input::{self, Source};
use crate::commands::{Globals, emit};
use crate::error::{CliError, Result};
use crate::output::{Artifact, ArtifactType, CleanData, CleanedDocument, CommandInputs, DiagnosticLevel, ResultBuilder};

pub(crate) async fn run(args: CleanArgs, globals: &Globals) -> Result<()> {
	let sources = input::sources(&args.files)?;
	if args.output.is_some() && sources.len() > 1 {
		return Err(CliError::InvalidInput("--output needs exactly one input".to_string()));
	}

	let resolved = globals.resolve_options(&args.selection)?;
	let options = resolved.options;
	let labels: Vec<String> = sources.iter().map(Source::label).collect();
	info!(target = "mdclean", inputs = sources.len(), "cleaning");

	let mut documents = input::process_all(sources, move |source, text| {
		let cleaned = clean_with_report(&text, &options);
		CleanedDocument {
			source: source.label(),
			bytes_in: text.len(),
			bytes_out: cleaned.text.len(),
			removed: cleaned.removed,
			text: Some(cleaned.text),
		}
	})
	.await?;

	let mut builder = ResultBuilder::new("clean")
		.inputs(CommandInputs {
			sources: labels,
			output_path: args.output.clone(),
		})
		.config(resolved.effective());

	for doc in documents.iter().filter(|doc| doc.bytes_in == 0) {
		builder = builder.diagnostic_with_source(DiagnosticLevel::Warning, "input is empty", &doc.source);
	}

	if let Some(path) = &args.output {
		let text = documents.iter_mut().find_map(|doc| doc.text.take()).unwrap_or_default();
		tokio::fs::write(path, &text).await.map_err(|source| CliError::Write {
			path: path.clone(),
			source,
		})?;
		info!(target = "mdclean", path = %path.display(), bytes = text.len(), "wrote cleaned text");
		builder = builder.artifact(Artifact {
			artifact_type: ArtifactType::Text,
			path: path.clone(),
			size_bytes: Some(text.len() as u64),
		});
	}

	emit(&builder.data(CleanData { documents }).build(), globals.format)
}
