/// Metadata about one distinct token of the training text.
///
/// Computed once per token value while a chain is built, then only read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
	value: String,
	start_of_sentence: bool,
	end_of_sentence: bool,
}

impl Word {
	/// Creates the record for `value` with both flags unset.
	pub fn new(value: &str) -> Self {
		Self {
			value: value.to_owned(),
			start_of_sentence: false,
			end_of_sentence: false,
		}
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	/// True if the token was seen opening a sentence at least once.
	pub fn is_start_of_sentence(&self) -> bool {
		self.start_of_sentence
	}

	/// True if the token closes a sentence.
	pub fn is_end_of_sentence(&self) -> bool {
		self.end_of_sentence
	}

	/// Marks the token as a sentence start. Never reverts to `false`.
	pub(crate) fn mark_start_of_sentence(&mut self) {
		self.start_of_sentence = true;
	}

	pub(crate) fn mark_end_of_sentence(&mut self) {
		self.end_of_sentence = true;
	}
}
