//! Horizontal rules.

use std::borrow::Cow;

use crate::lines::{is_thematic_break, map_lines};
use crate::options::Category;
use crate::rules::Context;

/// Empties every rule line but keeps its line break.
pub(crate) fn strip_horizontal_rules(text: &str, enabled: bool, cx: &mut Context) -> String {
	if !enabled {
		return text.to_string();
	}

	let mut removed = 0;
	let out = map_lines(text, |body| {
		if is_thematic_break(body) {
			removed += 1;
			Cow::Borrowed("")
		} else {
			Cow::Borrowed(body)
		}
	});
	cx.record(Category::HorizontalRules, removed);
	out
}
