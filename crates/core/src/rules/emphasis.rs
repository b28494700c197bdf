//! Bold and italic delimiters.
//!
//! Each line is scanned once for runs of `*` or `_`. A run can open when the
//! character after it is not whitespace and close when the character before it
//! is not whitespace. `_` refuses to open or close inside a word, and so does a
//! lone `*` between two alphanumerics, which keeps `2*3*4` and `w*h` intact.
//! Closers pair with the nearest open run of the same character, so the scan
//! stays linear however many delimiters a line carries.

use std::borrow::Cow;

use crate::lines::{is_thematic_break, map_lines};
use crate::options::Category;
use crate::rules::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strength {
	Bold,
	Italic,
}

impl Strength {
	/// Markers taken from each side of a pair.
	fn width(self) -> usize {
		match self {
			Self::Bold => 2,
			Self::Italic => 1,
		}
	}

	/// `***x***` counts for both: bold takes two markers, italic the odd one.
	fn accepts(self, run_len: usize) -> bool {
		match self {
			Self::Bold => run_len >= 2,
			Self::Italic => run_len % 2 == 1,
		}
	}

	fn category(self) -> Category {
		match self {
			Self::Bold => Category::Bold,
			Self::Italic => Category::Italic,
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct DelimiterRun {
	marker: u8,
	start: usize,
	end: usize,
	can_open: bool,
	can_close: bool,
}

impl DelimiterRun {
	fn len(&self) -> usize {
		self.end - self.start
	}
}

pub(crate) fn strip_bold(text: &str, enabled: bool, cx: &mut Context) -> String {
	strip(text, enabled, cx, Strength::Bold)
}

pub(crate) fn strip_italic(text: &str, enabled: bool, cx: &mut Context) -> String {
	strip(text, enabled, cx, Strength::Italic)
}

fn strip(text: &str, enabled: bool, cx: &mut Context, strength: Strength) -> String {
	if !enabled || !text.contains(['*', '_']) {
		return text.to_string();
	}

	let mut removed = 0;
	let out = map_lines(text, |body| {
		if is_thematic_break(body) {
			return Cow::Borrowed(body);
		}
		let (line, pairs) = strip_line(body, strength);
		removed += pairs;
		line
	});
	cx.record(strength.category(), removed);
	out
}

fn strip_line(body: &str, strength: Strength) -> (Cow<'_, str>, usize) {
	let runs = delimiter_runs(body);
	let width = strength.width();
	// Open runs per marker: `*` then `_`.
	let mut stacks: [Vec<DelimiterRun>; 2] = [Vec::new(), Vec::new()];
	let mut cuts = Vec::new();

	for run in runs.into_iter().filter(|run| strength.accepts(run.len())) {
		let stack = &mut stacks[usize::from(run.marker == b'_')];
		if run.can_close {
			if let Some(opener) = stack.pop() {
				cuts.push((opener.end - width, opener.end));
				cuts.push((run.start, run.start + width));
				continue;
			}
		}
		if run.can_open {
			stack.push(run);
		}
	}

	if cuts.is_empty() {
		return (Cow::Borrowed(body), 0);
	}
	cuts.sort_unstable();

	let mut out = String::with_capacity(body.len());
	let mut copied = 0;
	for &(start, end) in &cuts {
		out.push_str(&body[copied..start]);
		copied = end;
	}
	out.push_str(&body[copied..]);
	(Cow::Owned(out), cuts.len() / 2)
}

fn delimiter_runs(body: &str) -> Vec<DelimiterRun> {
	let bytes = body.as_bytes();
	let mut runs = Vec::new();
	let mut i = 0;

	while i < bytes.len() {
		let marker = bytes[i];
		if marker == b'\\' {
			i += 2;
			continue;
		}
		if marker != b'*' && marker != b'_' {
			i += 1;
			continue;
		}

		let start = i;
		while i < bytes.len() && bytes[i] == marker {
			i += 1;
		}
		let before = body[..start].chars().next_back();
		let after = body[i..].chars().next();
		let intraword = before.is_some_and(char::is_alphanumeric) && after.is_some_and(char::is_alphanumeric);
		let inside_word = marker == b'_';
		let operator = marker == b'*' && i - start == 1 && intraword;
		runs.push(DelimiterRun {
			marker,
			start,
			end: i,
			can_open: !operator
				&& after.is_some_and(|c| !c.is_whitespace())
				&& !(inside_word && before.is_some_and(char::is_alphanumeric)),
			can_close: !operator
				&& before.is_some_and(|c| !c.is_whitespace())
				&& !(inside_word && after.is_some_and(char::is_alphanumeric)),
		});
	}
	runs
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::apply;

	#[test]
	fn strips_bold_of_both_kinds() {
		assert_eq!(apply(strip_bold, "Some **bold** and __strong__ text", true), "Some bold and strong text");
	}

	#[test]
	fn strips_italic_of_both_kinds() {
		assert_eq!(apply(strip_italic, "*a* and _b_", true), "a and b");
	}

	#[test]
	fn bold_and_italic_leave_each_other_alone() {
		let text = "**bold** and *italic*";
		assert_eq!(apply(strip_bold, text, true), "bold and *italic*");
		assert_eq!(apply(strip_italic, text, true), "**bold** and italic");
	}

	#[test]
	fn triple_runs_split_into_bold_and_italic() {
		assert_eq!(apply(strip_bold, "***x***", true), "*x*");
		assert_eq!(apply(strip_italic, "***x***", true), "**x**");
		assert_eq!(apply(strip_italic, &apply(strip_bold, "***x***", true), true), "x");
	}

	#[test]
	fn nested_emphasis() {
		assert_eq!(apply(strip_italic, "*a **b** c*", true), "a **b** c");
		assert_eq!(apply(strip_bold, "*a **b** c*", true), "*a b c*");
	}

	#[test]
	fn unterminated_markers_stay() {
		assert_eq!(apply(strip_bold, "**bold text", true), "**bold text");
		assert_eq!(apply(strip_italic, "*open and **closed**", true), "*open and **closed**");
	}

	#[test]
	fn ignores_non_emphasis_markers() {
		for text in [
			"snake_case_name",
			"2 * 3 * 4",
			"2*3*4",
			"area = w*h*2",
			"compute a*b*c and x*y",
			"\\*escaped\\*",
			"***",
			"* list item",
		] {
			assert_eq!(apply(strip_italic, text, true), text, "{text:?}");
			assert_eq!(apply(strip_bold, text, true), text, "{text:?}");
		}
	}

	#[test]
	fn lone_star_needs_a_non_word_side() {
		assert_eq!(apply(strip_italic, "un*frigging*believable", true), "un*frigging*believable");
		assert_eq!(apply(strip_italic, "(*note*) and *a*b", true), "(note) and *a*b");
		assert_eq!(apply(strip_bold, "un**frigging**believable", true), "unfriggingbelievable");
	}

	#[test]
	fn never_spans_lines() {
		let text = "**start\nend**";
		assert_eq!(apply(strip_bold, text, true), text);
	}

	#[test]
	fn counts_pairs() {
		let mut cx = Context::new("");
		let _ = strip_bold("**a** **b**\n__c__ **d", true, &mut cx);
		assert_eq!(cx.removed.get(Category::Bold), 3);
	}

	#[test]
	fn stays_linear_on_long_delimiter_runs() {
		let text = "*a* ".repeat(50_000);
		let out = apply(strip_italic, &text, true);
		assert_eq!(out.matches('*').count(), 0);
	}
}
