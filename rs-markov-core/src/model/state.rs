use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The words seen after one run of `coherence` tokens.
///
/// `words` is the run itself (for coherence 2, e.g. `["I'd", "buy"]`) and
/// `transitions` counts each token that followed it in the training text,
/// paragraph breaks included.
///
/// ## Invariants
/// - `words` is as long as the chain's coherence
/// - Every count is >= 1 once the state belongs to a chain
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Tokens identifying the state.
	words: Vec<String>,
	/// Outgoing transitions indexed by the next token.
	/// Example: { "that" => 2, "this" => 1 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new state with no transitions yet.
	pub fn new(words: &[String]) -> Self {
		Self {
			words: words.to_vec(),
			transitions: BTreeMap::new(),
		}
	}

	pub(crate) fn with_transitions(words: Vec<String>, transitions: BTreeMap<String, usize>) -> Self {
		Self { words, transitions }
	}

	/// Records one occurrence of `next_word` following this state.
	pub fn add_transition(&mut self, next_word: &str) {
		*self.transitions.entry(next_word.to_owned()).or_insert(0) += 1;
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Frequency distribution of the tokens following this state.
	pub fn transitions(&self) -> &BTreeMap<String, usize> {
		&self.transitions
	}

	/// Number of times the state was observed with a successor.
	pub fn occurrences(&self) -> usize {
		self.transitions.values().sum()
	}
}

/// Flattened sampling table for one frequency distribution.
///
/// Each token appears as many times as its count, after all counts were
/// divided by their greatest common divisor. Picking a uniform index then
/// selects a token with probability proportional to its frequency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WeightedTable {
	entries: Vec<String>,
}

impl WeightedTable {
	/// Builds the table for `frequencies`.
	///
	/// Returns `None` if no token has a positive count.
	pub(crate) fn from_frequencies(frequencies: &BTreeMap<String, usize>) -> Option<Self> {
		if frequencies.len() == 1 {
			if let Some((word, &count)) = frequencies.iter().next() {
				if count > 0 {
					return Some(Self { entries: vec![word.clone()] });
				}
			}
		}

		let positive: Vec<(&String, usize)> = frequencies
			.iter()
			.filter(|(_, count)| **count > 0)
			.map(|(word, count)| (word, *count))
			.collect();

		if positive.is_empty() {
			return None;
		}

		// All counts equal to one: the keys are already the table
		if positive.iter().all(|(_, count)| *count == 1) {
			return Some(Self { entries: positive.into_iter().map(|(word, _)| word.clone()).collect() });
		}

		let divisor = positive.iter().fold(0, |acc, (_, count)| gcd(acc, *count));
		let mut entries = Vec::with_capacity(positive.iter().map(|(_, count)| count / divisor).sum());
		for (word, count) in positive {
			entries.extend(std::iter::repeat_n(word.clone(), count / divisor));
		}

		Some(Self { entries })
	}

	/// Picks a token uniformly from the table.
	///
	/// A table with a single entry returns it without touching `rng`.
	pub(crate) fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
		if self.entries.len() == 1 {
			return &self.entries[0];
		}
		&self.entries[rng.random_range(0..self.entries.len())]
	}

	#[cfg(test)]
	pub(crate) fn entries(&self) -> &[String] {
		&self.entries
	}
}

fn gcd(a: usize, b: usize) -> usize {
	if b == 0 { a } else { gcd(b, a % b) }
}
