//! Unordered (`-`, `*`, `+`) and ordered (`1.`) list markers.

use std::borrow::Cow;

use crate::lines::{is_thematic_break, map_lines};
use crate::options::Category;
use crate::rules::Context;
use crate::rules::quotes::quote_prefix_len;

const MAX_ORDINAL_DIGITS: usize = 9;

/// End of a bullet and the blanks after it, if `rest` starts with one.
pub(crate) fn unordered_marker_end(rest: &str) -> Option<usize> {
	match rest.as_bytes() {
		[b'-' | b'*' | b'+', b' ' | b'\t', ..] => Some(marker_gap_end(rest, 1)),
		_ => None,
	}
}

/// End of `<digits>.` and the blanks after it, if `rest` starts with one.
pub(crate) fn ordered_marker_end(rest: &str) -> Option<usize> {
	let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
	if !(1..=MAX_ORDINAL_DIGITS).contains(&digits) {
		return None;
	}
	match &rest.as_bytes()[digits..] {
		[b'.', b' ' | b'\t', ..] => Some(marker_gap_end(rest, digits + 1)),
		_ => None,
	}
}

fn marker_gap_end(rest: &str, marker_end: usize) -> usize {
	let gap = rest[marker_end..].bytes().take_while(|&b| b == b' ' || b == b'\t').count();
	marker_end + gap
}

/// Whether `body` opens a list item of either kind.
pub(crate) fn is_list_item(body: &str) -> bool {
	let rest = body.trim_start_matches([' ', '\t']);
	!is_thematic_break(rest) && (unordered_marker_end(rest).is_some() || ordered_marker_end(rest).is_some())
}

pub(crate) fn strip_unordered_lists(text: &str, enabled: bool, cx: &mut Context) -> String {
	strip_markers(text, enabled, cx, Category::UnorderedLists, unordered_marker_end)
}

pub(crate) fn strip_ordered_lists(text: &str, enabled: bool, cx: &mut Context) -> String {
	strip_markers(text, enabled, cx, Category::OrderedLists, ordered_marker_end)
}

fn strip_markers(
	text: &str,
	enabled: bool,
	cx: &mut Context,
	category: Category,
	marker_end: fn(&str) -> Option<usize>,
) -> String {
	if !enabled {
		return text.to_string();
	}

	let mut removed = 0;
	let out = map_lines(text, |body| {
		let prefix = quote_prefix_len(body);
		let rest = body[prefix..].trim_start_matches([' ', '\t']);
		if is_thematic_break(rest) {
			return Cow::Borrowed(body);
		}
		match marker_end(rest) {
			Some(end) => {
				removed += 1;
				Cow::Owned(format!("{}{}", &body[..prefix], &rest[end..]))
			}
			None => Cow::Borrowed(body),
		}
	});
	cx.record(category, removed);
	out
}
