//! Fenced and indented code blocks, and inline code spans.
//!
//! Code is literal text: whether stripped or preserved, its contents are
//! shielded so no later rule rewrites them.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::lines::{Line, indent_width, is_blank, map_lines, split_lines, strip_indent};
use crate::options::Category;
use crate::rules::Context;
use crate::rules::lists::is_list_item;

#[derive(Debug, Clone, Copy)]
struct Fence {
	marker: u8,
	len: usize,
	indent: usize,
}

impl Fence {
	fn open(body: &str) -> Option<Self> {
		let indent = body.len() - body.trim_start_matches(' ').len();
		if indent > 3 {
			return None;
		}
		let rest = &body[indent..];
		let marker = *rest.as_bytes().first()?;
		if marker != b'`' && marker != b'~' {
			return None;
		}
		let len = rest.bytes().take_while(|&b| b == marker).count();
		if len < 3 {
			return None;
		}
		// A backtick info string may not contain backticks; that line is inline code.
		if marker == b'`' && rest[len..].contains('`') {
			return None;
		}
		Some(Self { marker, len, indent })
	}

	fn is_closed_by(&self, body: &str) -> bool {
		let indent = body.len() - body.trim_start_matches(' ').len();
		if indent > 3 {
			return false;
		}
		let rest = &body[indent..];
		let len = rest.bytes().take_while(|&b| b == self.marker).count();
		len >= self.len && rest[len..].trim().is_empty()
	}
}

pub(crate) fn strip_code_blocks(text: &str, enabled: bool, cx: &mut Context) -> String {
	let lines: Vec<Line<'_>> = split_lines(text).collect();
	let mut out = String::with_capacity(text.len());
	// Shortest fence per marker already known to have no closing line.
	let mut unclosed: [Option<usize>; 2] = [None, None];
	let mut after_blank = true;
	let mut in_list = false;
	let mut i = 0;

	while i < lines.len() {
		let line = lines[i];

		if let Some(fence) = Fence::open(line.body) {
			let slot = usize::from(fence.marker == b'~');
			let close = if unclosed[slot].is_some_and(|len| fence.len >= len) {
				None
			} else {
				(i + 1..lines.len()).find(|&j| fence.is_closed_by(lines[j].body))
			};

			if let Some(close) = close {
				let replacement = if enabled {
					cx.record(Category::CodeBlocks, 1);
					join_lines(&lines[i + 1..close], |body| strip_indent(body, fence.indent))
				} else {
					join_lines(&lines[i..=close], |body| body)
				};
				out.push_str(&cx.shield.block(replacement));
				out.push_str(lines[close].eol);
				i = close + 1;
				after_blank = false;
				in_list = false;
				continue;
			}
			unclosed[slot] = Some(unclosed[slot].map_or(fence.len, |len| len.min(fence.len)));
		}

		if after_blank && !in_list && !is_blank(line.body) && indent_width(line.body) >= 4 {
			let mut end = i + 1;
			let mut j = i + 1;
			while j < lines.len() && (is_blank(lines[j].body) || indent_width(lines[j].body) >= 4) {
				if !is_blank(lines[j].body) {
					end = j + 1;
				}
				j += 1;
			}

			let block = &lines[i..end];
			let replacement = if enabled {
				cx.record(Category::CodeBlocks, 1);
				join_lines(block, |body| strip_indent(body, 4))
			} else {
				join_lines(block, |body| body)
			};
			out.push_str(&cx.shield.block(replacement));
			out.push_str(lines[end - 1].eol);
			i = end;
			after_blank = false;
			continue;
		}

		out.push_str(line.body);
		out.push_str(line.eol);
		if is_blank(line.body) {
			after_blank = true;
		} else {
			after_blank = false;
			in_list = is_list_item(line.body) || (in_list && indent_width(line.body) > 0);
		}
		i += 1;
	}

	out
}

/// Joins line bodies with their own terminators, leaving off the last one.
fn join_lines<'a>(lines: &[Line<'a>], mut body: impl FnMut(&'a str) -> &'a str) -> String {
	let mut out = String::new();
	for (idx, line) in lines.iter().enumerate() {
		out.push_str(body(line.body));
		if idx + 1 < lines.len() {
			out.push_str(line.eol);
		}
	}
	out
}

pub(crate) fn strip_inline_code(text: &str, enabled: bool, cx: &mut Context) -> String {
	map_lines(text, |body| {
		if body.contains('`') {
			Cow::Owned(rewrite_spans(body, enabled, cx))
		} else {
			Cow::Borrowed(body)
		}
	})
}

fn rewrite_spans(body: &str, enabled: bool, cx: &mut Context) -> String {
	let bytes = body.as_bytes();
	let mut out = String::with_capacity(body.len());
	let mut copied = 0;
	// Widths already known to have no closing run further on.
	let mut unclosed = HashSet::new();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] != b'`' {
			i += 1;
			continue;
		}
		let open = i;
		i = run_end(bytes, i);
		let width = i - open;
		if unclosed.contains(&width) {
			continue;
		}
		let Some((close, end)) = closing_run(bytes, i, width) else {
			unclosed.insert(width);
			continue;
		};

		out.push_str(&body[copied..open]);
		let replacement = if enabled {
			cx.record(Category::InlineCode, 1);
			trim_padding(&body[i..close]).to_string()
		} else {
			body[open..end].to_string()
		};
		out.push_str(&cx.shield.inline(replacement));
		copied = end;
		i = end;
	}

	out.push_str(&body[copied..]);
	out
}

fn run_end(bytes: &[u8], mut i: usize) -> usize {
	while i < bytes.len() && bytes[i] == b'`' {
		i += 1;
	}
	i
}

/// Next backtick run of exactly `width`, as (start, end).
fn closing_run(bytes: &[u8], mut i: usize, width: usize) -> Option<(usize, usize)> {
	while i < bytes.len() {
		if bytes[i] == b'`' {
			let start = i;
			i = run_end(bytes, i);
			if i - start == width {
				return Some((start, i));
			}
		} else {
			i += 1;
		}
	}
	None
}

/// `` ` `x` ` `` carries one space of padding on each side.
fn trim_padding(inner: &str) -> &str {
	if inner.len() >= 2 && inner.starts_with(' ') && inner.ends_with(' ') && !inner.trim().is_empty() {
		&inner[1..inner.len() - 1]
	} else {
		inner
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::apply;

	#[test]
	fn strips_backtick_fence_and_language_tag() {
		let text = "before\n```rust\nlet x = 1;\n```\nafter";
		assert_eq!(apply(strip_code_blocks, text, true), "before\nlet x = 1;\nafter");
	}

	#[test]
	fn strips_tilde_fence_with_longer_closer() {
		assert_eq!(apply(strip_code_blocks, "~~~\na\nb\n~~~~~", true), "a\nb");
	}

	#[test]
	fn keeps_unterminated_fence_literal() {
		let text = "```\nnever closed\n";
		assert_eq!(apply(strip_code_blocks, text, true), text);
	}

	#[test]
	fn short_closer_does_not_end_a_long_fence() {
		let text = "````\n```\ninside\n````";
		assert_eq!(apply(strip_code_blocks, text, true), "```\ninside");
	}

	#[test]
	fn dedents_indented_block_after_blank_line() {
		let text = "Intro:\n\n    fn main() {}\n        nested\n\nDone";
		assert_eq!(apply(strip_code_blocks, text, true), "Intro:\n\nfn main() {}\n    nested\n\nDone");
	}

	#[test]
	fn indented_list_continuation_is_not_code() {
		let text = "- item\n\n    continued paragraph";
		assert_eq!(apply(strip_code_blocks, text, true), text);
	}

	#[test]
	fn preserved_blocks_are_untouched_and_shielded() {
		let text = "```md\n# not a header\n```";
		let mut cx = Context::new(text);
		let out = strip_code_blocks(text, false, &mut cx);
		assert!(!out.contains('#'));
		assert!(cx.shield.is_block_line(&out));
		assert_eq!(cx.shield.restore(&out), text);
	}

	#[test]
	fn keeps_crlf_terminators() {
		assert_eq!(apply(strip_code_blocks, "```\r\nx\r\n```\r\ny", true), "x\r\ny");
	}

	#[test]
	fn strips_inline_spans() {
		assert_eq!(apply(strip_inline_code, "run `cargo test` now", true), "run cargo test now");
		assert_eq!(apply(strip_inline_code, "``a ` b`` and `` `x` ``", true), "a ` b and `x`");
	}

	#[test]
	fn inline_span_never_crosses_lines() {
		let text = "open `tick\nclose` here";
		assert_eq!(apply(strip_inline_code, text, true), text);
	}

	#[test]
	fn counts_stripped_spans() {
		let mut cx = Context::new("");
		let _ = strip_inline_code("`a` `b` `c", true, &mut cx);
		assert_eq!(cx.removed.get(Category::InlineCode), 2);
	}
}
