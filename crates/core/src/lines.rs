//! Line splitting and whole-line predicates shared by the rules.

use std::borrow::Cow;

/// One line of input with its terminator kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
	pub(crate) body: &'a str,
	pub(crate) eol: &'a str,
}

/// Splits on `\n`, recognising `\r\n`. A trailing line without terminator has an empty `eol`.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
	text.split_inclusive('\n').map(|raw| {
		if let Some(body) = raw.strip_suffix("\r\n") {
			Line { body, eol: "\r\n" }
		} else if let Some(body) = raw.strip_suffix('\n') {
			Line { body, eol: "\n" }
		} else {
			Line { body: raw, eol: "" }
		}
	})
}

/// Rewrites every line body, leaving terminators untouched.
pub(crate) fn map_lines<'a, F>(text: &'a str, mut rewrite: F) -> String
where
	F: FnMut(&'a str) -> Cow<'a, str>,
{
	let mut out = String::with_capacity(text.len());
	for line in split_lines(text) {
		out.push_str(&rewrite(line.body));
		out.push_str(line.eol);
	}
	out
}

pub(crate) fn is_blank(body: &str) -> bool {
	body.trim().is_empty()
}

/// Indentation width in columns; tabs advance to the next multiple of four.
pub(crate) fn indent_width(body: &str) -> usize {
	let mut column = 0;
	for ch in body.chars() {
		match ch {
			' ' => column += 1,
			'\t' => column += 4 - column % 4,
			_ => break,
		}
	}
	column
}

/// Drops up to `columns` of leading indentation.
pub(crate) fn strip_indent(body: &str, columns: usize) -> &str {
	let mut column = 0;
	for (idx, ch) in body.char_indices() {
		if column >= columns {
			return &body[idx..];
		}
		match ch {
			' ' => column += 1,
			'\t' => column += 4 - column % 4,
			_ => return &body[idx..],
		}
	}
	""
}

/// A line of three or more `*`, `-` or `_`, optionally separated by blanks.
pub(crate) fn is_thematic_break(body: &str) -> bool {
	let trimmed = body.trim_start_matches(' ');
	if body.len() - trimmed.len() > 3 {
		return false;
	}

	let mut marker = None;
	let mut count = 0;
	for ch in trimmed.chars() {
		match ch {
			' ' | '\t' => {}
			'*' | '-' | '_' if marker.is_none_or(|m| m == ch) => {
				marker = Some(ch);
				count += 1;
			}
			_ => return false,
		}
	}
	count >= 3
}

/// Level of a Setext underline: 1 for `=`, 2 for `-`.
pub(crate) fn setext_level(body: &str) -> Option<u8> {
	let trimmed = body.trim_start_matches(' ');
	if body.len() - trimmed.len() > 3 {
		return None;
	}

	let run = trimmed.trim_end();
	let first = run.chars().next()?;
	if !run.chars().all(|c| c == first) {
		return None;
	}
	match first {
		'=' => Some(1),
		'-' if run.len() >= 2 => Some(2),
		_ => None,
	}
}

/// Collapses runs of blank lines to one and drops blank lines at both ends.
pub(crate) fn tidy(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut eol = "\n";
	let mut pending_blank = false;

	for line in split_lines(text) {
		if is_blank(line.body) {
			pending_blank |= !out.is_empty();
			continue;
		}
		if !out.is_empty() {
			out.push_str(eol);
			if pending_blank {
				out.push_str(eol);
			}
		}
		pending_blank = false;
		out.push_str(line.body.trim_end());
		if !line.eol.is_empty() {
			eol = line.eol;
		}
	}
	out
}
