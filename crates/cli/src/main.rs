use std::io::{self, IsTerminal};

use clap::Parser;
use mdclean_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if !io::stdout().is_terminal() {
		colored::control::set_override(false);
	}

	let command = cli.command.name();
	let format = cli.format;
	if let Err(err) = commands::dispatch(cli).await {
		error!(target = "mdclean", error = %err, "command failed");
		commands::report_failure(command, &err, format);
		std::process::exit(1);
	}
}
