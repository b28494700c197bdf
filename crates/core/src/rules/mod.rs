//! One rewrite rule per element category.
//!
//! Every rule has the same shape: it takes the current buffer, whether its
//! category is being stripped, and the per-run [`Context`], and returns a new
//! buffer. A disabled rule returns its input unchanged apart from shielding the
//! constructs it owns.

pub(crate) mod code;
pub(crate) mod emphasis;
pub(crate) mod headers;
pub(crate) mod links;
pub(crate) mod lists;
pub(crate) mod quotes;
pub(crate) mod tables;
pub(crate) mod thematic;

use crate::options::Category;
use crate::report::ElementCounts;
use crate::shield::Shield;

pub(crate) type Rule = fn(&str, bool, &mut Context) -> String;

/// State owned by a single pipeline run.
#[derive(Debug)]
pub(crate) struct Context {
	pub(crate) shield: Shield,
	pub(crate) removed: ElementCounts,
}

impl Context {
	pub(crate) fn new(text: &str) -> Self {
		Self {
			shield: Shield::for_text(text),
			removed: ElementCounts::default(),
		}
	}

	pub(crate) fn record(&mut self, category: Category, count: usize) {
		self.removed.record(category, count);
	}
}

pub(crate) fn rule_for(category: Category) -> Rule {
	match category {
		Category::CodeBlocks => code::strip_code_blocks,
		Category::InlineCode => code::strip_inline_code,
		Category::Images => links::strip_images,
		Category::Links => links::strip_links,
		Category::Headers => headers::strip_headers,
		Category::Bold => emphasis::strip_bold,
		Category::Italic => emphasis::strip_italic,
		Category::Blockquotes => quotes::strip_blockquotes,
		Category::UnorderedLists => lists::strip_unordered_lists,
		Category::OrderedLists => lists::strip_ordered_lists,
		Category::HorizontalRules => thematic::strip_horizontal_rules,
		Category::Tables => tables::strip_tables,
	}
}

/// Runs one rule in isolation and restores shielded text.
#[cfg(test)]
pub(crate) fn apply(rule: Rule, text: &str, enabled: bool) -> String {
	let mut cx = Context::new(text);
	let out = rule(text, enabled, &mut cx);
	cx.shield.restore(&out)
}
