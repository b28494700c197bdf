//! Images, links, autolinks and reference definitions.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lines::split_lines;
use crate::options::Category;
use crate::rules::Context;

/// Bracketed label allowing one level of nested brackets, e.g. `[![alt](src)]`.
const LABEL: &str = r"((?:[^\[\]\n]|\[[^\[\]\n]*\])*)";
/// Parenthesised destination allowing one level of balanced parentheses.
const DESTINATION: &str = r"([^()\n]*(?:\([^()\n]*\)[^()\n]*)*)";

static INLINE_IMAGE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(&format!(r"!\[{LABEL}\]\({DESTINATION}\)")).expect("INLINE_IMAGE should compile"));
static REFERENCE_IMAGE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(&format!(r"!\[{LABEL}\]\[([^\[\]\n]*)\]")).expect("REFERENCE_IMAGE should compile"));
// The optional `!` lets the link rules consume and skip images in one match.
static INLINE_LINK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(&format!(r"(!?)\[{LABEL}\]\({DESTINATION}\)")).expect("INLINE_LINK should compile"));
static REFERENCE_LINK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(&format!(r"(!?)\[{LABEL}\]\[([^\[\]\n]*)\]")).expect("REFERENCE_LINK should compile"));
static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"<([A-Za-z][A-Za-z0-9+.\-]{1,31}:[^<>\s]*|[A-Za-z0-9.!#$%&'*+/=?^_`{|}~\-]+@[A-Za-z0-9](?:[A-Za-z0-9.\-]*[A-Za-z0-9])?)>")
		.expect("AUTOLINK should compile")
});
static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^ {0,3}\[([^\[\]]+)\]:[ \t]*(?:<[^<>]*>|\S+)(?:[ \t]+(?:"[^"]*"|'[^']*'|\([^()]*\)))?[ \t]*$"#)
		.expect("DEFINITION should compile")
});

pub(crate) fn strip_images(text: &str, enabled: bool, cx: &mut Context) -> String {
	if !text.contains("![") {
		return text.to_string();
	}

	if !enabled {
		return INLINE_IMAGE
			.replace_all(text, |caps: &Captures<'_>| format!("![{}]({})", &caps[1], cx.shield.inline(&caps[2])))
			.into_owned();
	}

	let labels = defined_labels(text);
	let mut removed = 0;
	let text = INLINE_IMAGE.replace_all(text, |caps: &Captures<'_>| {
		removed += 1;
		caps[1].to_string()
	});
	let text = REFERENCE_IMAGE
		.replace_all(&text, |caps: &Captures<'_>| {
			if labels.contains(&reference_key(&caps[1], &caps[2])) {
				removed += 1;
				caps[1].to_string()
			} else {
				caps[0].to_string()
			}
		})
		.into_owned();
	cx.record(Category::Images, removed);
	text
}

pub(crate) fn strip_links(text: &str, enabled: bool, cx: &mut Context) -> String {
	if !enabled {
		return shield_links(text, cx);
	}

	let labels = defined_labels(text);
	let mut removed = 0;
	let text = drop_definitions(text, &image_references(text), cx);
	let text = INLINE_LINK.replace_all(&text, |caps: &Captures<'_>| {
		if caps[1].is_empty() {
			removed += 1;
			caps[2].to_string()
		} else {
			caps[0].to_string()
		}
	});
	let text = REFERENCE_LINK.replace_all(&text, |caps: &Captures<'_>| {
		if caps[1].is_empty() && labels.contains(&reference_key(&caps[2], &caps[3])) {
			removed += 1;
			caps[2].to_string()
		} else {
			caps[0].to_string()
		}
	});
	let text = AUTOLINK
		.replace_all(&text, |caps: &Captures<'_>| {
			removed += 1;
			cx.shield.inline(&caps[1])
		})
		.into_owned();
	cx.record(Category::Links, removed);
	text
}

/// Keeps preserved destinations, autolinks and definitions away from later rules.
fn shield_links(text: &str, cx: &mut Context) -> String {
	let mut out = String::with_capacity(text.len());
	for line in split_lines(text) {
		if DEFINITION.is_match(line.body) {
			out.push_str(&cx.shield.block(line.body));
		} else {
			out.push_str(line.body);
		}
		out.push_str(line.eol);
	}

	let out = INLINE_LINK.replace_all(&out, |caps: &Captures<'_>| {
		if caps[1].is_empty() {
			format!("[{}]({})", &caps[2], cx.shield.inline(&caps[3]))
		} else {
			caps[0].to_string()
		}
	});
	AUTOLINK.replace_all(&out, |caps: &Captures<'_>| cx.shield.inline(&caps[0])).into_owned()
}

/// Drops definition lines, except those a remaining image still refers to.
fn drop_definitions(text: &str, keep: &HashSet<String>, cx: &mut Context) -> String {
	let mut out = String::with_capacity(text.len());
	for line in split_lines(text) {
		match DEFINITION.captures(line.body) {
			Some(caps) if keep.contains(&normalize_label(&caps[1])) => out.push_str(&cx.shield.block(line.body)),
			Some(_) => continue,
			None => out.push_str(line.body),
		}
		out.push_str(line.eol);
	}
	out
}

/// Keys of the `![alt][ref]` images left in the text.
fn image_references(text: &str) -> HashSet<String> {
	REFERENCE_IMAGE
		.captures_iter(text)
		.map(|caps| reference_key(&caps[1], &caps[2]))
		.collect()
}

/// Normalised labels of every `[label]: destination` line.
fn defined_labels(text: &str) -> HashSet<String> {
	split_lines(text)
		.filter_map(|line| DEFINITION.captures(line.body))
		.map(|caps| normalize_label(&caps[1]))
		.collect()
}

/// `[text][]` refers to its own text; `[text][ref]` to `ref`.
fn reference_key(text: &str, reference: &str) -> String {
	if reference.trim().is_empty() {
		normalize_label(text)
	} else {
		normalize_label(reference)
	}
}

fn normalize_label(label: &str) -> String {
	label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
