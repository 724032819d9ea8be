use crate::error::{MarkovError, Result};
use crate::model::chain::Chain;
use crate::model::options::TextGeneratorOptions;
use crate::model::state::WeightedTable;
use crate::text::classifier::is_end_of_sentence;
use crate::text::tokenizer::is_paragraph_break;
use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// Generates text from `chain`, drawing randomness from `rng`.
///
/// # Behavior
/// - Picks a random starting state and emits its tokens.
/// - Repeatedly picks the next token with probability proportional to its
///   observed frequency after the last `coherence` emitted tokens.
/// - Stops as soon as one of the configured limits is reached.
/// - Joins words with `word_separator` and paragraphs with
///   `paragraph_separator`; paragraph breaks themselves are not rendered.
///
/// A limit of 0 returns an empty string without using `rng`.
///
/// # Errors
/// - [`MarkovError::InvalidInput`] if no stop condition is set.
/// - [`MarkovError::EmptyModel`] / [`MarkovError::DegenerateState`] if the
///   chain has no usable starting state.
/// - [`MarkovError::BrokenChain`] if the walk reaches a state without
///   successors.
/// - [`MarkovError::IterationLimit`] if the iteration cap is hit first.
pub fn generate<R: Rng + ?Sized>(chain: &Chain, options: &TextGeneratorOptions, rng: &mut R) -> Result<String> {
	options.validate()?;

	if options.has_zero_limit() {
		return Ok(String::new());
	}

	let mut walk = Walk::new(chain, options);
	walk.run(rng)?;

	log::debug!(
		"generated {} tokens ({} paragraphs, {} sentences, {} words), {} sampling tables cached",
		walk.output.len(),
		walk.paragraphs,
		walk.sentences,
		walk.words,
		walk.tables.len()
	);

	Ok(render(&walk.output, &options.word_separator, &options.paragraph_separator))
}

/// Generates text with the thread-local random generator.
///
/// Unlike [`generate`], a call without any stop condition produces one
/// paragraph.
///
/// # Errors
/// See [`generate`].
pub fn generate_text(chain: &Chain, options: &TextGeneratorOptions) -> Result<String> {
	generate_text_with_rng(chain, options, &mut rand::rng())
}

/// [`generate_text`] with an explicit random generator.
///
/// # Errors
/// See [`generate`].
pub fn generate_text_with_rng<R: Rng + ?Sized>(
	chain: &Chain,
	options: &TextGeneratorOptions,
	rng: &mut R,
) -> Result<String> {
	generate(chain, &options.or_single_paragraph(), rng)
}

/// State of one generation call.
///
/// The caches live as long as the call: they are never shared between calls
/// nor written back into the chain.
struct Walk<'a> {
	chain: &'a Chain,
	options: &'a TextGeneratorOptions,
	/// Sampling table per visited state
	tables: HashMap<Vec<String>, WeightedTable>,
	/// Whether a token ends a sentence
	endings: HashMap<String, bool>,
	output: Vec<String>,
	paragraphs: usize,
	sentences: usize,
	words: usize,
}

impl<'a> Walk<'a> {
	fn new(chain: &'a Chain, options: &'a TextGeneratorOptions) -> Self {
		Self {
			chain,
			options,
			tables: HashMap::new(),
			endings: HashMap::new(),
			output: Vec::new(),
			paragraphs: 0,
			sentences: 0,
			words: 0,
		}
	}

	fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
		let start = self.starting_state(rng)?;

		let mut window: VecDeque<String> = VecDeque::with_capacity(start.len());
		for word in start {
			if self.emit(word.clone()) {
				return Ok(());
			}
			window.push_back(word.clone());
		}

		let mut iterations = 0;
		loop {
			if let Some(limit) = self.options.max_iterations() {
				if iterations >= limit {
					return Err(MarkovError::IterationLimit(limit));
				}
			}
			iterations += 1;

			let next_word = self.next_word(window.make_contiguous(), rng)?;

			window.pop_front();
			window.push_back(next_word.clone());

			if self.emit(next_word) {
				return Ok(());
			}
		}
	}

	/// Picks one of the chain's starting states uniformly.
	fn starting_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'a [String]> {
		let chain: &'a Chain = self.chain;
		let starts = chain.starting_states();
		if starts.is_empty() {
			return Err(MarkovError::EmptyModel);
		}

		let start = &starts[rng.random_range(0..starts.len())];
		if start.is_empty() {
			return Err(MarkovError::DegenerateState);
		}
		Ok(start.as_slice())
	}

	/// Samples the token following `state`.
	fn next_word<R: Rng + ?Sized>(&mut self, state: &[String], rng: &mut R) -> Result<String> {
		if let Some(table) = self.tables.get(state) {
			return Ok(table.pick(rng).to_owned());
		}

		let frequencies = self.chain.lookup(state).map_err(|e| match e {
			MarkovError::StateNotFound(words) => {
				MarkovError::BrokenChain(format!("word combination \"{}\" not found in chain", words.join(", ")))
			}
			other => other,
		})?;
		let table = WeightedTable::from_frequencies(frequencies)
			.ok_or_else(|| MarkovError::BrokenChain("cannot find the next word in the chain".to_owned()))?;

		let next_word = table.pick(rng).to_owned();
		self.tables.insert(state.to_vec(), table);
		Ok(next_word)
	}

	/// Appends `word` to the output and updates the counters.
	///
	/// Returns true once a stop condition is met.
	fn emit(&mut self, word: String) -> bool {
		if is_paragraph_break(&word) {
			match self.output.last() {
				// A break before anything else closes no paragraph
				None => {}
				// Consecutive breaks also count as words so a word limit
				// still ends a walk over nothing but breaks
				Some(previous) if is_paragraph_break(previous) => {
					self.paragraphs += 1;
					self.words += 1;
				}
				Some(_) => self.paragraphs += 1,
			}
		} else {
			self.words += 1;
		}

		if self.ends_sentence(&word) {
			self.sentences += 1;
		}

		self.output.push(word);
		self.limit_reached()
	}

	fn ends_sentence(&mut self, word: &str) -> bool {
		if let Some(&ends) = self.endings.get(word) {
			return ends;
		}
		let ends = self.chain.is_end_of_sentence(word) || is_end_of_sentence(word);
		self.endings.insert(word.to_owned(), ends);
		ends
	}

	fn limit_reached(&self) -> bool {
		let reached = |limit: Option<usize>, count: usize| limit.is_some_and(|limit| count >= limit);

		reached(self.options.max_paragraphs, self.paragraphs)
			|| reached(self.options.max_sentences, self.sentences)
			|| reached(self.options.max_words, self.words)
	}
}

/// Joins generated tokens into text.
///
/// Paragraph breaks split the tokens into paragraphs; empty paragraphs are
/// skipped.
fn render(tokens: &[String], word_separator: &str, paragraph_separator: &str) -> String {
	let paragraphs: Vec<String> = tokens
		.split(|token| is_paragraph_break(token))
		.filter(|paragraph| !paragraph.is_empty())
		.map(|paragraph| paragraph.join(word_separator))
		.collect();

	paragraphs.join(paragraph_separator).trim().to_owned()
}
