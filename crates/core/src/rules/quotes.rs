//! Blockquote markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::lines::split_lines;
use crate::options::Category;
use crate::rules::Context;

static QUOTE_PREFIX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^( {0,3})(?:>[ \t]*)+").expect("QUOTE_PREFIX should compile"));

/// Byte length of the leading `>` markers (and the indentation before them), or 0.
pub(crate) fn quote_prefix_len(body: &str) -> usize {
	QUOTE_PREFIX.find(body).map_or(0, |m| m.end())
}

pub(crate) fn strip_blockquotes(text: &str, enabled: bool, cx: &mut Context) -> String {
	if !enabled || !text.contains('>') {
		return text.to_string();
	}

	let mut out = String::with_capacity(text.len());
	let mut removed = 0;
	let mut in_quote = false;

	for line in split_lines(text) {
		match QUOTE_PREFIX.captures(line.body) {
			Some(caps) => {
				if !in_quote {
					removed += 1;
				}
				in_quote = true;
				let prefix = caps.get(0).map_or(0, |m| m.end());
				out.push_str(&caps[1]);
				out.push_str(&line.body[prefix..]);
			}
			None => {
				in_quote = false;
				out.push_str(line.body);
			}
		}
		out.push_str(line.eol);
	}

	cx.record(Category::Blockquotes, removed);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::apply;

	#[test]
	fn strips_markers_and_following_blank() {
		assert_eq!(apply(strip_blockquotes, "> quoted\n>\n> more", true), "quoted\n\nmore");
		assert_eq!(apply(strip_blockquotes, ">tight", true), "tight");
	}

	#[test]
	fn strips_nested_markers_at_once() {
		assert_eq!(apply(strip_blockquotes, "> > deep\n>> deeper", true), "deep\ndeeper");
	}

	#[test]
	fn keeps_leading_indentation() {
		assert_eq!(apply(strip_blockquotes, "  > indented", true), "  indented");
	}

	#[test]
	fn ignores_inline_angle_brackets() {
		let text = "a > b\n    > code";
		assert_eq!(apply(strip_blockquotes, text, true), text);
	}

	#[test]
	fn counts_quoted_blocks() {
		let mut cx = Context::new("");
		let _ = strip_blockquotes("> a\n> b\n\n> c", true, &mut cx);
		assert_eq!(cx.removed.get(Category::Blockquotes), 2);
	}

	#[test]
	fn prefix_length_covers_markers_only() {
		assert_eq!(quote_prefix_len("> ## x"), 2);
		assert_eq!(quote_prefix_len(" >> x"), 4);
		assert_eq!(quote_prefix_len("x > y"), 0);
	}
}
