use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mdclean::Category;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mdclean")]
#[command(about = "Strip markdown syntax from text while keeping its layout")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Load cleaning options from a JSON file (applied over the user config)
	#[arg(long, global = true, value_name = "FILE")]
	pub options: Option<PathBuf>,

	/// Ignore the user config file
	#[arg(long, global = true)]
	pub no_config: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Strip markdown from files (or stdin) and print the result
	#[command(alias = "c")]
	Clean(CleanArgs),

	/// Count the markdown constructs in files without changing them
	#[command(alias = "count")]
	Inspect(InspectArgs),

	/// List element categories and whether they would be stripped
	#[command(alias = "cats")]
	Categories(CategoriesArgs),
}

impl Commands {
	/// Name reported in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Clean(_) => "clean",
			Commands::Inspect(_) => "inspect",
			Commands::Categories(_) => "categories",
		}
	}
}

#[derive(Args, Debug)]
pub struct CleanArgs {
	/// Input files; `-` or none reads stdin
	#[arg(value_name = "FILES")]
	pub files: Vec<PathBuf>,

	#[command(flatten)]
	pub selection: SelectionArgs,

	/// Write the cleaned text to FILE instead of stdout (single input only)
	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
	/// Input files; `-` or none reads stdin
	#[arg(value_name = "FILES")]
	pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
	#[command(flatten)]
	pub selection: SelectionArgs,
}

/// Per-invocation overrides applied after the config files.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
	/// Strip a category (repeatable, or comma separated)
	#[arg(long, value_name = "CATEGORY", value_delimiter = ',')]
	pub strip: Vec<Category>,

	/// Keep a category (repeatable, or comma separated); wins over --strip
	#[arg(long, value_name = "CATEGORY", value_delimiter = ',')]
	pub keep: Vec<Category>,

	/// Strip every category
	#[arg(long, conflicts_with = "none")]
	pub all: bool,

	/// Keep every category
	#[arg(long)]
	pub none: bool,

	/// Collapse runs of blank lines and trim blank lines at both ends
	#[arg(long)]
	pub tidy: bool,
}
