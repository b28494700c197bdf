//! ATX (`# Title`) and Setext (`Title` over `===`) headers.

use crate::lines::{Line, indent_width, is_blank, is_thematic_break, setext_level, split_lines};
use crate::options::Category;
use crate::rules::Context;
use crate::rules::lists::is_list_item;
use crate::rules::quotes::quote_prefix_len;
use crate::shield::Shield;

#[derive(Debug, PartialEq, Eq)]
struct Atx<'a> {
	/// Blockquote markers in front of the header, kept as-is.
	prefix: &'a str,
	content: &'a str,
}

fn parse_atx(body: &str) -> Option<Atx<'_>> {
	let prefix_len = quote_prefix_len(body);
	let rest = &body[prefix_len..];
	let marker = rest.trim_start_matches(' ');
	if rest.len() - marker.len() > 3 {
		return None;
	}

	let level = marker.bytes().take_while(|&b| b == b'#').count();
	if !(1..=6).contains(&level) {
		return None;
	}
	let after = &marker[level..];
	if !after.is_empty() && !after.starts_with([' ', '\t']) {
		return None;
	}

	Some(Atx {
		prefix: &body[..prefix_len],
		content: trim_closing_sequence(after.trim()),
	})
}

/// `# Title ##` closes with a run of `#` preceded by a blank; `# C#` does not.
fn trim_closing_sequence(content: &str) -> &str {
	let without = content.trim_end_matches('#');
	if without.is_empty() {
		""
	} else if without.len() < content.len() && without.ends_with([' ', '\t']) {
		without.trim_end()
	} else {
		content
	}
}

/// A line that can carry a Setext underline.
fn is_paragraph_line(body: &str, shield: &Shield) -> bool {
	!is_blank(body)
		&& indent_width(body) < 4
		&& parse_atx(body).is_none()
		&& quote_prefix_len(body) == 0
		&& !is_list_item(body)
		&& !is_thematic_break(body)
		&& !shield.is_block_line(body)
}

pub(crate) fn strip_headers(text: &str, enabled: bool, cx: &mut Context) -> String {
	let lines: Vec<Line<'_>> = split_lines(text).collect();
	let mut out = String::with_capacity(text.len());
	let mut removed = 0;
	let mut i = 0;

	while i < lines.len() {
		let line = lines[i];

		if let Some(atx) = parse_atx(line.body) {
			if enabled {
				removed += 1;
				out.push_str(atx.prefix);
				out.push_str(atx.content);
			} else {
				out.push_str(line.body);
			}
			out.push_str(line.eol);
			i += 1;
			continue;
		}

		let underline = lines.get(i + 1).filter(|next| setext_level(next.body).is_some());
		if let Some(next) = underline.filter(|_| is_paragraph_line(line.body, &cx.shield)) {
			out.push_str(line.body);
			if enabled {
				removed += 1;
				out.push_str(next.eol);
			} else {
				// Shielded so the horizontal-rule rule never mistakes it for a `---` rule.
				out.push_str(line.eol);
				out.push_str(&cx.shield.block(next.body));
				out.push_str(next.eol);
			}
			i += 2;
			continue;
		}

		out.push_str(line.body);
		out.push_str(line.eol);
		i += 1;
	}

	cx.record(Category::Headers, removed);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::apply;

	#[test]
	fn strips_atx_markers() {
		let text = "# Title\nSome **bold** and *italic* text.";
		assert_eq!(apply(strip_headers, text, true), "Title\nSome **bold** and *italic* text.");
		assert_eq!(apply(strip_headers, "###### Deep ###", true), "Deep");
		assert_eq!(apply(strip_headers, "  ## Indented", true), "Indented");
	}

	#[test]
	fn requires_blank_after_hashes() {
		for text in ["#hashtag", "####### seven", "    # code-ish"] {
			assert_eq!(apply(strip_headers, text, true), text);
		}
	}

	#[test]
	fn keeps_hash_that_is_part_of_text() {
		assert_eq!(apply(strip_headers, "# Learning C#", true), "Learning C#");
		assert_eq!(apply(strip_headers, "#", true), "");
	}

	#[test]
	fn strips_header_inside_blockquote() {
		assert_eq!(apply(strip_headers, "> ## Quoted", true), "> Quoted");
	}

	#[test]
	fn strips_setext_underlines() {
		assert_eq!(apply(strip_headers, "Title\n=====\nBody", true), "Title\nBody");
		assert_eq!(apply(strip_headers, "Sub\n---", true), "Sub");
	}

	#[test]
	fn dash_line_after_list_or_blank_is_not_setext() {
		for text in ["- item\n---", "\n---", "# Title\n---", "***\n---"] {
			let out = apply(strip_headers, text, true);
			assert!(out.ends_with("---"), "{text:?} -> {out:?}");
		}
	}

	#[test]
	fn preserved_setext_underline_is_shielded() {
		let text = "Title\n---\n";
		let mut cx = Context::new(text);
		let out = strip_headers(text, false, &mut cx);
		assert!(!out.contains("---"));
		assert_eq!(cx.shield.restore(&out), text);
	}
}
