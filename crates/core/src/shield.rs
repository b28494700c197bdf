//! Placeholders for text that later rules must not rewrite.
//!
//! Code contents and preserved link destinations are swapped for opaque
//! tokens as soon as their rule has run, then swapped back once every rule has
//! finished. Tokens are built from a private-use character absent from the
//! input, so they never collide with real text and carry no markdown syntax.

use std::collections::HashSet;

const BLOCK: char = 'b';
const INLINE: char = 'i';

#[derive(Debug)]
pub(crate) struct Shield {
	sentinel: char,
	entries: Vec<String>,
}

impl Shield {
	pub(crate) fn for_text(text: &str) -> Self {
		let used: HashSet<char> = text.chars().filter(|c| is_private_use(*c)).collect();
		let sentinel = (0xE000..=0xF8FF)
			.chain(0xF0000..=0xFFFFD)
			.filter_map(char::from_u32)
			.find(|c| !used.contains(c))
			.unwrap_or('\u{E000}');
		Self { sentinel, entries: Vec::new() }
	}

	/// Token for text that stays inside a line.
	pub(crate) fn inline(&mut self, original: impl Into<String>) -> String {
		self.token(INLINE, original.into())
	}

	/// Token standing in for whole lines; see [`Shield::is_block_line`].
	pub(crate) fn block(&mut self, original: impl Into<String>) -> String {
		self.token(BLOCK, original.into())
	}

	fn token(&mut self, kind: char, original: String) -> String {
		let index = self.entries.len();
		self.entries.push(original);
		format!("{s}{kind}{index}{s}", s = self.sentinel)
	}

	/// Whether `body` is nothing but a block token.
	pub(crate) fn is_block_line(&self, body: &str) -> bool {
		body.trim_end()
			.strip_prefix(self.sentinel)
			.and_then(|rest| rest.strip_prefix(BLOCK))
			.and_then(|rest| rest.strip_suffix(self.sentinel))
			.is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
	}

	/// Replaces every token with the text it stands for.
	pub(crate) fn restore(&self, text: &str) -> String {
		if self.entries.is_empty() {
			return text.to_string();
		}
		let mut out = String::with_capacity(text.len());
		self.restore_into(text, &mut out);
		out
	}

	fn restore_into(&self, text: &str, out: &mut String) {
		let mut rest = text;
		while let Some(start) = rest.find(self.sentinel) {
			out.push_str(&rest[..start]);
			let after = &rest[start + self.sentinel.len_utf8()..];
			match self.parse_token(after) {
				Some((index, consumed)) => {
					// Entries only ever reference earlier entries.
					self.restore_into(&self.entries[index], out);
					rest = &after[consumed..];
				}
				None => {
					out.push(self.sentinel);
					rest = after;
				}
			}
		}
		out.push_str(rest);
	}

	/// Parses `<kind><digits><sentinel>` and returns the entry index and bytes consumed.
	fn parse_token(&self, after: &str) -> Option<(usize, usize)> {
		let kind = after.chars().next()?;
		if kind != BLOCK && kind != INLINE {
			return None;
		}
		let digits = &after[kind.len_utf8()..];
		let end = digits.find(self.sentinel)?;
		if end == 0 || !digits[..end].bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		let index: usize = digits[..end].parse().ok()?;
		(index < self.entries.len()).then_some((index, kind.len_utf8() + end + self.sentinel.len_utf8()))
	}
}

fn is_private_use(c: char) -> bool {
	matches!(c as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn restores_tokens_in_place() {
		let mut shield = Shield::for_text("a `b` c");
		let token = shield.inline("`b`");
		let text = format!("a {token} c");
		assert_ne!(text, "a `b` c");
		assert_eq!(shield.restore(&text), "a `b` c");
	}

	#[test]
	fn picks_a_sentinel_missing_from_the_input() {
		let shield = Shield::for_text("\u{E000}\u{E001}");
		assert_eq!(shield.sentinel, '\u{E002}');
	}

	#[test]
	fn restores_nested_tokens() {
		let mut shield = Shield::for_text("");
		let inner = shield.inline("code");
		let outer = shield.inline(format!("({inner})"));
		assert_eq!(shield.restore(&format!("x{outer}y")), "x(code)y");
	}

	#[test]
	fn detects_block_lines_only() {
		let mut shield = Shield::for_text("");
		let block = shield.block("```\nx\n```");
		let inline = shield.inline("y");
		assert!(shield.is_block_line(&block));
		assert!(!shield.is_block_line(&inline));
		assert!(!shield.is_block_line(&format!("{block} tail")));
	}

	#[test]
	fn leaves_stray_sentinels_alone() {
		let shield = Shield::for_text("");
		let mut with_entry = Shield::for_text("");
		let _ = with_entry.inline("z");
		let stray = format!("{}q", shield.sentinel);
		assert_eq!(with_entry.restore(&stray), stray);
	}
}
