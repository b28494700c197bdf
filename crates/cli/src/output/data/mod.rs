use std::io::{self, Write};

use colored::Colorize;
use mdclean::{Category, CleaningOptions, ElementCounts};
use serde::{Deserialize, Serialize};

use crate::output::result_builder::TextRender;

/// Result data for the clean command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanData {
	pub documents: Vec<CleanedDocument>,
}

/// One cleaned input.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedDocument {
	pub source: String,
	/// Absent when the text went to `--output`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	pub removed: ElementCounts,
	pub bytes_in: usize,
	pub bytes_out: usize,
}

/// Result data for the inspect command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectData {
	pub documents: Vec<InspectedDocument>,
}

/// Construct counts for one input.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectedDocument {
	pub source: String,
	pub counts: ElementCounts,
	pub total: usize,
}

/// Result data for the categories command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesData {
	pub categories: Vec<CategoryInfo>,
	pub tidy: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
	pub name: Category,
	pub description: String,
	pub strip: bool,
	pub strip_by_default: bool,
}

impl CategoriesData {
	pub fn from_options(options: &CleaningOptions) -> Self {
		Self {
			categories: Category::ALL
				.into_iter()
				.map(|category| CategoryInfo {
					name: category,
					description: category.describe().to_string(),
					strip: options.is_enabled(category),
					strip_by_default: category.strips_by_default(),
				})
				.collect(),
			tidy: options.tidy,
		}
	}
}

const NAME_WIDTH: usize = 16;

impl TextRender for CleanData {
	/// Cleaned text exactly as produced, documents back to back.
	fn render_text(&self, out: &mut dyn Write) -> io::Result<()> {
		for text in self.documents.iter().filter_map(|doc| doc.text.as_deref()) {
			out.write_all(text.as_bytes())?;
		}
		Ok(())
	}
}

impl TextRender for InspectData {
	fn render_text(&self, out: &mut dyn Write) -> io::Result<()> {
		let multiple = self.documents.len() > 1;
		for (idx, doc) in self.documents.iter().enumerate() {
			if multiple {
				if idx > 0 {
					writeln!(out)?;
				}
				writeln!(out, "{}", doc.source.bold())?;
			}
			if doc.counts.is_empty() {
				writeln!(out, "{}", "no markdown constructs found".dimmed())?;
				continue;
			}
			for (category, count) in doc.counts.iter() {
				writeln!(out, "{:<NAME_WIDTH$} {count:>6}", category.name())?;
			}
			writeln!(out, "{:<NAME_WIDTH$} {:>6}", "total".bold(), doc.total)?;
		}
		Ok(())
	}
}

impl TextRender for CategoriesData {
	fn render_text(&self, out: &mut dyn Write) -> io::Result<()> {
		for info in &self.categories {
			let setting = if info.strip { "strip".green() } else { "keep".yellow() };
			writeln!(out, "{:<NAME_WIDTH$} {:<5}  {}", info.name.name(), setting, info.description)?;
		}
		writeln!(out, "{:<NAME_WIDTH$} {}", "tidy", if self.tidy { "on" } else { "off" })?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn render(data: &impl TextRender) -> String {
		colored::control::set_override(false);
		let mut buf = Vec::new();
		data.render_text(&mut buf).unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[test]
	fn clean_text_is_verbatim() {
		let data = CleanData {
			documents: vec![
				CleanedDocument {
					source: "a.md".into(),
					text: Some("one\n".into()),
					removed: ElementCounts::default(),
					bytes_in: 6,
					bytes_out: 4,
				},
				CleanedDocument {
					source: "b.md".into(),
					text: Some("two".into()),
					removed: ElementCounts::default(),
					bytes_in: 3,
					bytes_out: 3,
				},
			],
		};
		assert_eq!(render(&data), "one\ntwo");
	}

	#[test]
	fn categories_table_lists_every_category() {
		let out = render(&CategoriesData::from_options(&CleaningOptions::default()));
		assert_eq!(out.lines().count(), Category::ALL.len() + 1);
		assert!(out.lines().any(|line| line.starts_with("bold") && line.contains("keep")));
		assert!(out.lines().any(|line| line.starts_with("tables") && line.contains("strip")));
		assert!(out.ends_with("off\n"));
	}

	#[test]
	fn categories_serialize_by_name() {
		let data = CategoriesData::from_options(&CleaningOptions::default());
		let json = serde_json::to_value(&data).unwrap();
		assert_eq!(json["categories"][0]["name"], "code_blocks");
		assert_eq!(json["categories"][5]["stripByDefault"], false);
	}

	#[test]
	fn empty_inspection_says_so() {
		let data = InspectData {
			documents: vec![InspectedDocument {
				source: "-".into(),
				counts: ElementCounts::default(),
				total: 0,
			}],
		};
		assert_eq!(render(&data), "no markdown constructs found\n");
	}
}
