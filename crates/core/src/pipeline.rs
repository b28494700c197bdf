//! The fixed-order cleaning pipeline.

use tracing::{debug, trace};

use crate::lines;
use crate::options::{Category, CleaningOptions};
use crate::report::{Cleaned, ElementCounts};
use crate::rules::{Context, rule_for};

/// Strips every category `options` enables and returns the cleaned text.
pub fn clean(text: &str, options: &CleaningOptions) -> String {
	clean_with_report(text, options).text
}

/// Like [`clean`], also reporting how many constructs of each category were stripped.
pub fn clean_with_report(text: &str, options: &CleaningOptions) -> Cleaned {
	if text.trim().is_empty() {
		return Cleaned {
			text: text.to_string(),
			removed: ElementCounts::default(),
		};
	}

	let mut cx = Context::new(text);
	let mut buffer = text.to_string();
	for category in Category::ALL {
		let enabled = options.is_enabled(category);
		buffer = rule_for(category)(&buffer, enabled, &mut cx);
		trace!(
			target = "mdclean.pipeline",
			%category,
			enabled,
			len = buffer.len(),
			"stage finished"
		);
	}

	let mut cleaned = cx.shield.restore(&buffer);
	if options.tidy {
		cleaned = lines::tidy(&cleaned);
	}

	debug!(
		target = "mdclean.pipeline",
		input_len = text.len(),
		output_len = cleaned.len(),
		removed = cx.removed.total(),
		"cleaned text"
	);
	Cleaned {
		text: cleaned,
		removed: cx.removed,
	}
}

/// Counts every recognised construct, as if all categories were stripped.
pub fn inspect(text: &str) -> ElementCounts {
	clean_with_report(text, &CleaningOptions::strip_all()).removed
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whitespace_only_input_is_returned_as_is() {
		let options = CleaningOptions::strip_all().with(Category::Bold, true);
		for text in ["", "  ", "\n\n\t\n"] {
			assert_eq!(clean(text, &options), text);
		}
	}

	#[test]
	fn runs_every_enabled_stage() {
		let text = "# Title\n\n> **Note**: see [docs](https://docs.rs).\n\n- `cargo` works\n";
		let out = clean(text, &CleaningOptions::strip_all());
		assert_eq!(out, "Title\n\nNote: see docs.\n\ncargo works\n");
	}

	#[test]
	fn tidy_runs_after_the_rules() {
		let options = CleaningOptions { tidy: true, ..CleaningOptions::default() };
		assert_eq!(clean("\n\nabove\n\n---\n\nbelow\n\n", &options), "above\n\nbelow");
	}

	#[test]
	fn inspect_counts_without_options() {
		let counts = inspect("**a** *b* [c](d)\n\n1. e\n2. f");
		assert_eq!(counts.get(Category::Bold), 1);
		assert_eq!(counts.get(Category::Italic), 1);
		assert_eq!(counts.get(Category::Links), 1);
		assert_eq!(counts.get(Category::OrderedLists), 2);
		assert_eq!(counts.total(), 5);
	}
}
