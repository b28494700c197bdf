//! Pipe tables.

use std::sync::LazyLock;

use regex::Regex;

use crate::lines::{Line, is_blank, split_lines};
use crate::options::Category;
use crate::rules::Context;

const CELL_SEPARATOR: &str = "  ";

static DELIMITER_CELL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("DELIMITER_CELL should compile"));

pub(crate) fn strip_tables(text: &str, enabled: bool, cx: &mut Context) -> String {
	if !enabled || !text.contains('|') {
		return text.to_string();
	}

	let lines: Vec<Line<'_>> = split_lines(text).collect();
	let mut out = String::with_capacity(text.len());
	let mut removed = 0;
	let mut i = 0;

	while i < lines.len() {
		let line = lines[i];
		let starts_table = line.body.contains('|')
			&& !cx.shield.is_block_line(line.body)
			&& lines.get(i + 1).is_some_and(|next| is_delimiter_row(next.body));
		if !starts_table {
			out.push_str(line.body);
			out.push_str(line.eol);
			i += 1;
			continue;
		}

		removed += 1;
		out.push_str(&flatten_row(line.body));
		out.push_str(lines[i + 1].eol);
		i += 2;
		while let Some(row) = lines.get(i).filter(|row| row.body.contains('|') && !is_blank(row.body)) {
			out.push_str(&flatten_row(row.body));
			out.push_str(row.eol);
			i += 1;
		}
	}

	cx.record(Category::Tables, removed);
	out
}

fn is_delimiter_row(body: &str) -> bool {
	body.contains('|')
		&& body.contains('-')
		&& split_cells(body).iter().all(|cell| DELIMITER_CELL.is_match(cell.trim()))
}

/// Cells between unescaped pipes; `\|` becomes a literal `|` inside its cell.
fn split_cells(row: &str) -> Vec<String> {
	let row = row.trim();
	let row = row.strip_prefix('|').unwrap_or(row);
	let row = match row.strip_suffix('|') {
		Some(inner) if !inner.ends_with('\\') => inner,
		_ => row,
	};

	let mut cells = Vec::new();
	let mut cell = String::new();
	let mut chars = row.chars();
	while let Some(ch) = chars.next() {
		match ch {
			'\\' => match chars.next() {
				Some('|') => cell.push('|'),
				Some(other) => {
					cell.push('\\');
					cell.push(other);
				}
				None => cell.push('\\'),
			},
			'|' => cells.push(std::mem::take(&mut cell)),
			_ => cell.push(ch),
		}
	}
	cells.push(cell);
	cells
}

fn flatten_row(body: &str) -> String {
	split_cells(body)
		.iter()
		.map(|cell| cell.trim())
		.filter(|cell| !cell.is_empty())
		.collect::<Vec<_>>()
		.join(CELL_SEPARATOR)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::apply;

	#[test]
	fn flattens_rows_and_drops_separator() {
		let text = "| Name | Qty |\n|------|:---:|\n| pen  | 2   |\n| ink  |     |\n\nafter";
		assert_eq!(apply(strip_tables, text, true), "Name  Qty\npen  2\nink\n\nafter");
	}

	#[test]
	fn accepts_tables_without_outer_pipes() {
		assert_eq!(apply(strip_tables, "a | b\n--|--\n1 | 2", true), "a  b\n1  2");
	}

	#[test]
	fn escaped_pipe_stays_in_cell() {
		assert_eq!(apply(strip_tables, "| a \\| b | c |\n|---|---|", true), "a | b  c");
	}

	#[test]
	fn pipes_without_separator_are_text() {
		let text = "a | b\nc | d";
		assert_eq!(apply(strip_tables, text, true), text);
		let text = "a | b\n|x|y|";
		assert_eq!(apply(strip_tables, text, true), text);
	}

	#[test]
	fn table_ends_at_first_row_without_pipe() {
		let text = "h1|h2\n-|-\nr1|r2\nplain line";
		assert_eq!(apply(strip_tables, text, true), "h1  h2\nr1  r2\nplain line");
	}

	#[test]
	fn counts_tables() {
		let mut cx = Context::new("");
		let _ = strip_tables("a|b\n-|-\n\nc|d\n-|-", true, &mut cx);
		assert_eq!(cx.removed.get(Category::Tables), 2);
	}
}
