use std::sync::LazyLock;

use regex::Regex;

/// Token standing in for a paragraph / line break.
pub const PARAGRAPH_BREAK: &str = "";

/// Token returned when the text holds no words at all.
pub const BLANK_TOKEN: &str = " ";

// Patterns are applied in this order by `normalize_whitespace`.
static CONTROL_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\x00\x0B]").expect("valid regex"));
// Any whitespace other than a line break, Unicode spaces included
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n\r]+").expect("valid regex"));
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?: *[\n\r]+ *)+").expect("valid regex"));

/// Splits raw text into tokens.
///
/// - Tabs, NUL and vertical tabs become spaces
/// - Each run of line breaks (with the spaces around it) becomes one
///   paragraph break, emitted as [`PARAGRAPH_BREAK`] between paragraphs
/// - Other whitespace runs (Unicode spaces included) collapse to one space
///
/// Text without any word yields `[" "]` so downstream code always has
/// at least one token. If the text ends with a paragraph break, one trailing
/// [`PARAGRAPH_BREAK`] is kept.
pub fn extract_tokens(text: &str) -> Vec<String> {
	let normalized = normalize_whitespace(text);
	let trimmed = normalized.trim();

	if trimmed.is_empty() {
		return vec![BLANK_TOKEN.to_owned()];
	}

	let mut tokens = Vec::new();
	for (i, paragraph) in trimmed.split('\n').enumerate() {
		if i > 0 {
			tokens.push(PARAGRAPH_BREAK.to_owned());
		}
		tokens.extend(paragraph.split(' ').map(str::to_owned));
	}

	if normalized.trim_end_matches(' ').ends_with('\n') {
		tokens.push(PARAGRAPH_BREAK.to_owned());
	}

	tokens
}

/// Whether `token` is the paragraph break sentinel.
pub fn is_paragraph_break(token: &str) -> bool {
	token == PARAGRAPH_BREAK
}

fn normalize_whitespace(text: &str) -> String {
	let text = CONTROL_SPACES.replace_all(text, " ");
	let text = SPACE_RUNS.replace_all(&text, " ");
	LINE_BREAKS.replace_all(&text, "\n").into_owned()
}
