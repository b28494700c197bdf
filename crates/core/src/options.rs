//! Element categories and the per-category strip flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One family of markdown syntax handled by a single rule.
///
/// Variants are declared in pipeline order, so sorting categories yields the
/// order in which they are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	CodeBlocks,
	InlineCode,
	Images,
	Links,
	Headers,
	Bold,
	Italic,
	Blockquotes,
	UnorderedLists,
	OrderedLists,
	HorizontalRules,
	Tables,
}

impl Category {
	/// Every category, in pipeline order.
	pub const ALL: [Category; 12] = [
		Category::CodeBlocks,
		Category::InlineCode,
		Category::Images,
		Category::Links,
		Category::Headers,
		Category::Bold,
		Category::Italic,
		Category::Blockquotes,
		Category::UnorderedLists,
		Category::OrderedLists,
		Category::HorizontalRules,
		Category::Tables,
	];

	pub fn name(self) -> &'static str {
		match self {
			Category::CodeBlocks => "code_blocks",
			Category::InlineCode => "inline_code",
			Category::Images => "images",
			Category::Links => "links",
			Category::Headers => "headers",
			Category::Bold => "bold",
			Category::Italic => "italic",
			Category::Blockquotes => "blockquotes",
			Category::UnorderedLists => "unordered_lists",
			Category::OrderedLists => "ordered_lists",
			Category::HorizontalRules => "horizontal_rules",
			Category::Tables => "tables",
		}
	}

	/// Short human label with an example of the syntax.
	pub fn describe(self) -> &'static str {
		match self {
			Category::CodeBlocks => "Code blocks (```code```)",
			Category::InlineCode => "Inline code (`code`)",
			Category::Images => "Images (![alt](url))",
			Category::Links => "Links ([text](url))",
			Category::Headers => "Headers (# Title)",
			Category::Bold => "Bold (**text**)",
			Category::Italic => "Italic (*text*)",
			Category::Blockquotes => "Blockquotes (> text)",
			Category::UnorderedLists => "Bullet lists (- item)",
			Category::OrderedLists => "Numbered lists (1. item)",
			Category::HorizontalRules => "Horizontal rules (---)",
			Category::Tables => "Tables (| cell | cell |)",
		}
	}

	/// Emphasis is kept unless asked for; everything else is stripped.
	pub fn strips_by_default(self) -> bool {
		!matches!(self, Category::Bold | Category::Italic)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Category {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
		Category::ALL
			.into_iter()
			.find(|category| category.name() == normalized)
			.ok_or_else(|| Error::UnknownCategory(s.to_string()))
	}
}

/// Which categories to strip. `true` strips, `false` preserves.
///
/// Deserializes from a JSON object keyed by category name. Missing keys take
/// the defaults, unknown keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningOptions {
	pub code_blocks: bool,
	pub inline_code: bool,
	pub images: bool,
	pub links: bool,
	pub headers: bool,
	pub bold: bool,
	pub italic: bool,
	pub blockquotes: bool,
	pub unordered_lists: bool,
	pub ordered_lists: bool,
	pub horizontal_rules: bool,
	pub tables: bool,
	/// Collapse blank-line runs and trim blank edges after stripping.
	pub tidy: bool,
}

impl Default for CleaningOptions {
	fn default() -> Self {
		let mut options = Self::preserve_all();
		for category in Category::ALL {
			options.set(category, category.strips_by_default());
		}
		options
	}
}

impl CleaningOptions {
	pub fn strip_all() -> Self {
		Self::uniform(true)
	}

	/// Every category preserved; cleaning with this is the identity.
	pub fn preserve_all() -> Self {
		Self::uniform(false)
	}

	fn uniform(strip: bool) -> Self {
		Self {
			code_blocks: strip,
			inline_code: strip,
			images: strip,
			links: strip,
			headers: strip,
			bold: strip,
			italic: strip,
			blockquotes: strip,
			unordered_lists: strip,
			ordered_lists: strip,
			horizontal_rules: strip,
			tables: strip,
			tidy: false,
		}
	}

	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Applies a partial JSON object on top of `self`; keys it omits keep their current value.
	pub fn overlay_json(&self, json: &str) -> Result<Self> {
		let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
		let mut merged = match serde_json::to_value(self)? {
			serde_json::Value::Object(fields) => fields,
			_ => serde_json::Map::new(),
		};
		merged.extend(overrides);
		Ok(serde_json::from_value(serde_json::Value::Object(merged))?)
	}

	pub fn is_enabled(&self, category: Category) -> bool {
		match category {
			Category::CodeBlocks => self.code_blocks,
			Category::InlineCode => self.inline_code,
			Category::Images => self.images,
			Category::Links => self.links,
			Category::Headers => self.headers,
			Category::Bold => self.bold,
			Category::Italic => self.italic,
			Category::Blockquotes => self.blockquotes,
			Category::UnorderedLists => self.unordered_lists,
			Category::OrderedLists => self.ordered_lists,
			Category::HorizontalRules => self.horizontal_rules,
			Category::Tables => self.tables,
		}
	}

	pub fn set(&mut self, category: Category, strip: bool) {
		let flag = match category {
			Category::CodeBlocks => &mut self.code_blocks,
			Category::InlineCode => &mut self.inline_code,
			Category::Images => &mut self.images,
			Category::Links => &mut self.links,
			Category::Headers => &mut self.headers,
			Category::Bold => &mut self.bold,
			Category::Italic => &mut self.italic,
			Category::Blockquotes => &mut self.blockquotes,
			Category::UnorderedLists => &mut self.unordered_lists,
			Category::OrderedLists => &mut self.ordered_lists,
			Category::HorizontalRules => &mut self.horizontal_rules,
			Category::Tables => &mut self.tables,
		};
		*flag = strip;
	}

	/// Builder-style variant of [`CleaningOptions::set`].
	pub fn with(mut self, category: Category, strip: bool) -> Self {
		self.set(category, strip);
		self
	}

	/// Categories this configuration strips, in pipeline order.
	pub fn enabled(&self) -> impl Iterator<Item = Category> + '_ {
		Category::ALL.into_iter().filter(|category| self.is_enabled(*category))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_keep_emphasis_and_strip_the_rest() {
		let options = CleaningOptions::default();
		assert!(!options.bold);
		assert!(!options.italic);
		assert!(!options.tidy);
		for category in Category::ALL {
			assert_eq!(options.is_enabled(category), category.strips_by_default(), "{category}");
		}
	}

	#[test]
	fn parses_names_with_dashes_and_case() {
		assert_eq!("code-blocks".parse::<Category>().unwrap(), Category::CodeBlocks);
		assert_eq!("Horizontal_Rules".parse::<Category>().unwrap(), Category::HorizontalRules);
		assert!(matches!("footnotes".parse::<Category>(), Err(Error::UnknownCategory(name)) if name == "footnotes"));
	}

	#[test]
	fn display_round_trips_through_from_str() {
		for category in Category::ALL {
			assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
		}
	}

	#[test]
	fn json_fills_missing_keys_with_defaults() {
		let options = CleaningOptions::from_json(r#"{"bold": true, "links": false}"#).unwrap();
		assert!(options.bold);
		assert!(!options.links);
		assert!(options.headers);
		assert!(!options.italic);
	}

	#[test]
	fn json_rejects_unknown_keys() {
		let err = CleaningOptions::from_json(r#"{"bold_italic": true}"#).unwrap_err();
		assert!(matches!(err, Error::InvalidOptions(_)));
		assert!(err.to_string().contains("bold_italic"));
	}

	#[test]
	fn enabled_lists_categories_in_pipeline_order() {
		let options = CleaningOptions::preserve_all().with(Category::Tables, true).with(Category::Links, true);
		assert_eq!(options.enabled().collect::<Vec<_>>(), vec![Category::Links, Category::Tables]);
	}

	#[test]
	fn overlay_keeps_unmentioned_keys() {
		let base = CleaningOptions::preserve_all().with(Category::Tables, true);
		let layered = base.overlay_json(r#"{"bold": true, "tidy": true}"#).unwrap();
		assert!(layered.tables);
		assert!(layered.bold);
		assert!(layered.tidy);
		assert!(!layered.headers);
		assert!(base.overlay_json(r#"{"colour": true}"#).is_err());
		assert!(base.overlay_json("[true]").is_err());
	}
}
