use crate::error::{Result, invalid_input};

/// Separator placed between words of a paragraph by default.
pub const DEFAULT_WORD_SEPARATOR: &str = " ";

/// Separator placed between paragraphs by default.
pub const DEFAULT_PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Default cap on generation steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000_000;

/// Parameters of one text generation.
///
/// `TextGeneratorOptions` holds the **stop conditions** (paragraphs,
/// sentences, words), the separators used to render the output, and a
/// safety cap on the number of generation steps.
///
/// # Stop conditions
/// Generation stops as soon as any configured limit is reached. At least one
/// must be set for [`generate`](super::generator::generate); the
/// [`generate_text`](super::generator::generate_text) wrapper falls back to a
/// single paragraph. A limit of 0 yields an empty text.
///
/// # Invariants
/// - `max_iterations`, when set, is >= 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextGeneratorOptions {
	/// Maximum number of paragraphs to emit.
	pub max_paragraphs: Option<usize>,

	/// Maximum number of sentences to emit.
	pub max_sentences: Option<usize>,

	/// Maximum number of words to emit.
	pub max_words: Option<usize>,

	/// Glue between words of a paragraph.
	pub word_separator: String,

	/// Glue between paragraphs.
	pub paragraph_separator: String,

	/// Hard cap on generation steps (`None` = unbounded).
	max_iterations: Option<usize>,
}

impl Default for TextGeneratorOptions {
	fn default() -> Self {
		Self {
			max_paragraphs: None,
			max_sentences: None,
			max_words: None,
			word_separator: DEFAULT_WORD_SEPARATOR.to_owned(),
			paragraph_separator: DEFAULT_PARAGRAPH_SEPARATOR.to_owned(),
			max_iterations: Some(DEFAULT_MAX_ITERATIONS),
		}
	}
}

impl TextGeneratorOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Options stopping after `max_paragraphs` paragraphs.
	pub fn paragraphs(max_paragraphs: usize) -> Self {
		Self { max_paragraphs: Some(max_paragraphs), ..Self::default() }
	}

	/// Options stopping after `max_sentences` sentences.
	pub fn sentences(max_sentences: usize) -> Self {
		Self { max_sentences: Some(max_sentences), ..Self::default() }
	}

	/// Options stopping after `max_words` words.
	pub fn words(max_words: usize) -> Self {
		Self { max_words: Some(max_words), ..Self::default() }
	}

	/// Returns the iteration cap.
	pub fn max_iterations(&self) -> Option<usize> {
		self.max_iterations
	}

	/// Sets the iteration cap. `None` removes it.
	///
	/// Without a cap, a sentence-only limit on a chain whose reachable
	/// tokens never end a sentence loops forever.
	///
	/// # Errors
	/// Returns an error if the cap is `Some(0)`.
	pub fn set_max_iterations(&mut self, max_iterations: Option<usize>) -> Result<()> {
		if max_iterations == Some(0) {
			return Err(invalid_input("maximum iterations must be at least 1"));
		}
		self.max_iterations = max_iterations;
		Ok(())
	}

	/// Whether no stop condition is set.
	pub fn is_unbounded(&self) -> bool {
		self.max_paragraphs.is_none() && self.max_sentences.is_none() && self.max_words.is_none()
	}

	/// Whether a stop condition is set to 0, making the output empty.
	pub fn has_zero_limit(&self) -> bool {
		[self.max_paragraphs, self.max_sentences, self.max_words].contains(&Some(0))
	}

	/// Checks that generation with these options can terminate.
	///
	/// # Errors
	/// Returns an error if no stop condition is set.
	pub fn validate(&self) -> Result<()> {
		if self.is_unbounded() {
			return Err(invalid_input("at least one of maximum paragraphs, sentences or words must be set"));
		}
		Ok(())
	}

	/// Returns a copy limited to one paragraph if no stop condition is set.
	pub(crate) fn or_single_paragraph(&self) -> Self {
		let mut options = self.clone();
		if options.is_unbounded() {
			options.max_paragraphs = Some(1);
		}
		options
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;

	#[test]
	fn defaults() {
		let options = TextGeneratorOptions::default();
		assert!(options.is_unbounded());
		assert_eq!(options.word_separator, " ");
		assert_eq!(options.paragraph_separator, "\n\n");
		assert_eq!(options.max_iterations(), Some(DEFAULT_MAX_ITERATIONS));
	}

	#[test]
	fn unbounded_options_are_invalid() {
		assert!(matches!(TextGeneratorOptions::new().validate(), Err(MarkovError::InvalidInput(_))));
		assert!(TextGeneratorOptions::words(3).validate().is_ok());
	}

	#[test]
	fn wrapper_default_is_one_paragraph() {
		let options = TextGeneratorOptions::new().or_single_paragraph();
		assert_eq!(options.max_paragraphs, Some(1));

		let options = TextGeneratorOptions::sentences(2).or_single_paragraph();
		assert_eq!(options.max_paragraphs, None);
		assert_eq!(options.max_sentences, Some(2));
	}

	#[test]
	fn detects_zero_limits() {
		assert!(TextGeneratorOptions::paragraphs(0).has_zero_limit());
		assert!(TextGeneratorOptions::sentences(0).has_zero_limit());
		assert!(TextGeneratorOptions::words(0).has_zero_limit());
		assert!(!TextGeneratorOptions::words(1).has_zero_limit());
	}

	#[test]
	fn iteration_cap_must_be_positive() {
		let mut options = TextGeneratorOptions::words(5);
		assert!(options.set_max_iterations(Some(0)).is_err());
		assert_eq!(options.max_iterations(), Some(DEFAULT_MAX_ITERATIONS));

		options.set_max_iterations(None).unwrap();
		assert_eq!(options.max_iterations(), None);
	}
}
