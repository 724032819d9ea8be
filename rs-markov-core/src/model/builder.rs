use super::chain::Chain;
use super::state::State;
use super::word::Word;
use crate::error::{MarkovError, Result, invalid_input};
use crate::text::classifier::{is_end_of_sentence, is_word_lower_case};
use crate::text::tokenizer::{PARAGRAPH_BREAK, extract_tokens, is_paragraph_break};
use std::collections::{HashMap, HashSet};

/// Coherence used when the caller does not pick one.
pub const DEFAULT_COHERENCE: usize = 2;

/// Builds a chain from raw text.
///
/// The text is tokenized, a trailing paragraph break is added if missing,
/// and with `ignore_line_breaks` every paragraph break is dropped before
/// the chain is built.
///
/// # Errors
/// See [`build`].
pub fn build_chain(text: &str, coherence: usize, ignore_line_breaks: bool) -> Result<Chain> {
	let mut tokens = extract_tokens(text);

	// The end of the text closes a paragraph
	if tokens.last().is_none_or(|token| !is_paragraph_break(token)) {
		tokens.push(PARAGRAPH_BREAK.to_owned());
	}

	if ignore_line_breaks {
		tokens.retain(|token| !is_paragraph_break(token));
	}

	let paragraphs = tokens.iter().filter(|token| is_paragraph_break(token)).count();
	log::debug!(
		"extracted {} tokens ({} words, {} paragraph breaks)",
		tokens.len(),
		tokens.len() - paragraphs,
		paragraphs
	);

	build(&tokens, coherence)
}

/// Builds a chain from a token stream.
///
/// The stream is made cyclic (the first `coherence` tokens follow the last
/// one) so every state has a successor and generation never dead-ends.
/// A window of `coherence` tokens then slides over the stream, counting the
/// token that follows each window.
///
/// # Errors
/// - [`MarkovError::InvalidInput`] if `coherence` is 0 or larger than the
///   number of tokens.
/// - [`MarkovError::ModelInvariantViolation`] if the result is malformed,
///   which indicates a bug.
pub fn build(tokens: &[String], coherence: usize) -> Result<Chain> {
	if coherence < 1 {
		return Err(invalid_input("coherence cannot be less than 1"));
	}
	if tokens.len() < coherence {
		return Err(invalid_input(format!(
			"coherence {} exceeds the number of tokens ({})",
			coherence,
			tokens.len()
		)));
	}

	let words = classify_words(tokens);
	let count = tokens.len();

	let mut states: HashMap<Vec<String>, State> = HashMap::new();
	let mut starting_states: Vec<Vec<String>> = Vec::new();

	// The window starting at `i` is followed by the token at `i + coherence`,
	// indices wrapping around the end of the stream
	for i in 0..count {
		let key: Vec<String> = (i..i + coherence).map(|j| tokens[j % count].clone()).collect();
		let next_word = &tokens[(i + coherence) % count];

		let state = states.entry(key).or_insert_with_key(|key| {
			if words.get(&key[0]).is_some_and(Word::is_start_of_sentence) {
				starting_states.push(key.clone());
			}
			State::new(key)
		});
		state.add_transition(next_word);
	}

	if starting_states.is_empty() {
		return Err(MarkovError::ModelInvariantViolation("no starting state found".to_owned()));
	}

	let end_of_sentence: HashSet<String> = words
		.into_values()
		.filter(Word::is_end_of_sentence)
		.map(|word| word.value().to_owned())
		.collect();

	let chain = Chain::from_parts(coherence, states, starting_states, end_of_sentence);
	chain.validate()?;

	log::info!(
		"built chain of coherence {}: {} states, {} starting states, {} sentence endings",
		coherence,
		chain.len(),
		chain.starting_states().len(),
		chain.end_of_sentence_tokens().len()
	);

	Ok(chain)
}

/// Computes the [`Word`] record of every distinct token.
///
/// A token starts a sentence if it is the first token, follows a paragraph
/// break, or is not lowercase and follows a token ending a sentence. Once a
/// token is seen starting a sentence it stays so.
///
/// A token ends a sentence if the heuristic says so. If no token does, the
/// last token is taken as the sentence end so generation can terminate.
pub fn classify_words(tokens: &[String]) -> HashMap<String, Word> {
	let mut words: HashMap<String, Word> = HashMap::new();
	let mut previous: Option<&str> = None;
	let mut any_end = false;

	for token in tokens {
		let word = words.entry(token.clone()).or_insert_with(|| Word::new(token));

		let starts = match previous {
			None => true,
			Some(prev) if is_paragraph_break(prev) => true,
			Some(prev) => is_end_of_sentence(prev) && !is_word_lower_case(token),
		};
		if starts {
			word.mark_start_of_sentence();
		}

		if is_end_of_sentence(token) {
			word.mark_end_of_sentence();
			any_end = true;
		}

		previous = Some(token);
	}

	if !any_end {
		if let Some(word) = tokens.last().and_then(|last| words.get_mut(last)) {
			word.mark_end_of_sentence();
		}
	}

	words
}
