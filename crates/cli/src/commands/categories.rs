use crate::cli::CategoriesArgs;
use crate::commands::{Globals, emit};
use crate::error::Result;
use crate::output::{CategoriesData, ResultBuilder};

pub(crate) fn run(args: CategoriesArgs, globals: &Globals) -> Result<()> {
	let resolved = globals.resolve_options(&args.selection)?;
	let result = ResultBuilder::new("categories")
		.data(CategoriesData::from_options(&resolved.options))
		.config(resolved.effective())
		.build();
	emit(&result, globals.format)
}
