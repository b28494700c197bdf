mod categories;
mod clean;
mod input;
mod inspect;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;

use crate::cli::{Cli, Commands, SelectionArgs};
use crate::config::{self, ResolvedOptions};
use crate::error::{CliError, Result};
use crate::output::{CommandResult, OutputFormat, ResultBuilder, TextRender, print_error_stderr, print_result};

/// Flags shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct Globals {
	pub(crate) format: OutputFormat,
	pub(crate) options_file: Option<PathBuf>,
	pub(crate) no_config: bool,
}

impl Globals {
	pub(crate) fn resolve_options(&self, selection: &SelectionArgs) -> Result<ResolvedOptions> {
		let user_config = if self.no_config { None } else { config::user_config_path() };
		config::resolve(user_config.as_deref(), self.options_file.as_deref(), selection)
	}
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let globals = Globals {
		format: cli.format,
		options_file: cli.options,
		no_config: cli.no_config,
	};

	match cli.command {
		Commands::Clean(args) => clean::run(args, &globals).await?,
		Commands::Inspect(args) => inspect::run(args, &globals).await?,
		Commands::Categories(args) => categories::run(args, &globals)?,
	}

	Ok(())
}

/// Reports a failed command: an error envelope on stdout for structured
/// formats, a one-line message on stderr for text.
pub fn report_failure(command: &str, err: &CliError, format: OutputFormat) {
	let builder = ResultBuilder::<()>::new(command);
	let builder = match err.path() {
		Some(path) => builder.error_with_details(err.code(), err.to_string(), json!({ "path": path })),
		None => builder.error(err.code(), err.to_string()),
	};
	let result = builder.build();

	if format.is_structured() {
		let _ = print_result(&result, format);
	} else if let Some(ref error) = result.error {
		print_error_stderr(error);
	}
}

fn emit<T: Serialize + TextRender>(result: &CommandResult<T>, format: OutputFormat) -> Result<()> {
	print_result(result, format).map_err(CliError::Output)
}
