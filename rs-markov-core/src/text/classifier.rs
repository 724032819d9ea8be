use std::sync::LazyLock;

use regex::Regex;

// Closing quotes and brackets may trail the terminal punctuation: `dollar."`
static END_OF_SENTENCE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"[.!?]['’"”»)\]]*$"#).expect("valid regex"));

/// Whether `token` closes a sentence (`.`, `!` or `?`, optionally followed
/// by closing quotes or brackets).
pub fn is_end_of_sentence(token: &str) -> bool {
	END_OF_SENTENCE.is_match(token)
}

/// Whether `token` starts with a lowercase ASCII letter.
///
/// Tokens starting with punctuation, digits or non-ASCII letters are not
/// lowercase.
pub fn is_word_lower_case(token: &str) -> bool {
	token.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recognizes_sentence_endings() {
		for word in ["I'd", "buy", "that", "for", "a", "", " ", "Mr", "e.g"] {
			assert!(!is_end_of_sentence(word), "{word:?}");
		}
		for word in ["dollar!", "dollar?", "dollar.", "dollar.\"", "dollar!”", "(dollar.)", "so?'»"] {
			assert!(is_end_of_sentence(word), "{word:?}");
		}
	}

	#[test]
	fn quote_without_punctuation_is_not_an_ending() {
		assert!(!is_end_of_sentence("dollar\""));
		assert!(!is_end_of_sentence(".dollar"));
	}

	#[test]
	fn recognizes_lower_case_words() {
		assert!(is_word_lower_case("buy"));
		assert!(is_word_lower_case("a"));
		assert!(!is_word_lower_case("I'd"));
		assert!(!is_word_lower_case("\"quoted"));
		assert!(!is_word_lower_case("42"));
		assert!(!is_word_lower_case("élan"));
		assert!(!is_word_lower_case(""));
	}
}
