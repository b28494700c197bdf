use tracing::info;

use crate::cli::InspectArgs;
use crate::commands::input::{self, Source};
use crate::commands::{Globals, emit};
use crate::error::Result;
use crate::output::{CommandInputs, InspectData, InspectedDocument, ResultBuilder};

pub(crate) async fn run(args: InspectArgs, globals: &Globals) -> Result<()> {
	let sources = input::sources(&args.files)?;
	let labels: Vec<String> = sources.iter().map(Source::label).collect();
	info!(target = "mdclean", inputs = sources.len(), "inspecting");

	let documents = input::process_all(sources, |source, text| {
		let counts = mdclean::inspect(&text);
		InspectedDocument {
			source: source.label(),
			total: counts.total(),
			counts,
		}
	})
	.await?;

	let result = ResultBuilder::new("inspect")
		.inputs(CommandInputs {
			sources: labels,
			output_path: None,
		})
		.data(InspectData { documents })
		.build();
	emit(&result, globals.format)
}
