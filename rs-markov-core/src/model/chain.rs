use super::state::State;
use crate::error::{MarkovError, Result, invalid_input};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Leading bytes of every serialized chain.
pub const MAGIC: &[u8; 4] = b"MKCH";

/// Version of the serialized layout following [`MAGIC`].
pub const FORMAT_VERSION: u8 = 1;

/// A word-level Markov chain.
///
/// The `Chain` maps every sequence of `coherence` tokens seen in the
/// training text to the frequencies of the tokens that followed it.
/// It is read-only once built: generation borrows it and keeps its own
/// caches.
///
/// # Invariants
/// - `coherence` is >= 1 and equals the length of every state key
/// - Every state has at least one transition, every count is >= 1
/// - Every starting state is a key of `states`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	/// Number of tokens per state
	coherence: usize,

	/// Mapping from a state's tokens to the state itself
	states: HashMap<Vec<String>, State>,

	/// States allowed to seed generation, in first-occurrence order
	starting_states: Vec<Vec<String>>,

	/// Tokens closing a sentence
	end_of_sentence: HashSet<String>,
}

impl Chain {
	pub(crate) fn from_parts(
		coherence: usize,
		states: HashMap<Vec<String>, State>,
		starting_states: Vec<Vec<String>>,
		end_of_sentence: HashSet<String>,
	) -> Self {
		Self { coherence, states, starting_states, end_of_sentence }
	}

	/// Number of tokens forming one state.
	pub fn coherence(&self) -> usize {
		self.coherence
	}

	/// Returns the successor frequencies of `state`.
	///
	/// Only exact matches are found: the state must have exactly
	/// `coherence` tokens and must have been observed while training.
	///
	/// # Errors
	/// Returns [`MarkovError::StateNotFound`] if the state is unknown.
	pub fn lookup(&self, state: &[String]) -> Result<&BTreeMap<String, usize>> {
		self.states
			.get(state)
			.map(State::transitions)
			.ok_or_else(|| MarkovError::StateNotFound(state.to_vec()))
	}

	/// States generation may start from. Never empty for a built chain.
	pub fn starting_states(&self) -> &[Vec<String>] {
		&self.starting_states
	}

	/// Whether `token` closes a sentence. False for unknown tokens.
	pub fn is_end_of_sentence(&self, token: &str) -> bool {
		self.end_of_sentence.contains(token)
	}

	pub fn end_of_sentence_tokens(&self) -> &HashSet<String> {
		&self.end_of_sentence
	}

	/// Iterates over all states, in no particular order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.values()
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Serializes the chain: [`MAGIC`], [`FORMAT_VERSION`], then the
	/// `postcard` encoding of the chain.
	///
	/// # Errors
	/// Returns [`MarkovError::ModelInvariantViolation`] if the chain breaks
	/// one of its invariants (it could not be read back) or cannot be
	/// encoded.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		self.validate()?;
		let body = postcard::to_stdvec(self)
			.map_err(|e| MarkovError::ModelInvariantViolation(format!("cannot encode chain: {e}")))?;

		let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + body.len());
		bytes.extend_from_slice(MAGIC);
		bytes.push(FORMAT_VERSION);
		bytes.extend_from_slice(&body);
		Ok(bytes)
	}

	/// Restores a chain written by [`Chain::to_bytes`].
	///
	/// # Errors
	/// Returns [`MarkovError::CorruptModel`] if the header is wrong, the body
	/// cannot be decoded, bytes are left over, or the decoded chain breaks
	/// one of the invariants.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let body = bytes
			.strip_prefix(MAGIC.as_slice())
			.ok_or_else(|| MarkovError::CorruptModel("missing chain header".to_owned()))?;

		let (version, body) = body
			.split_first()
			.ok_or_else(|| MarkovError::CorruptModel("missing format version".to_owned()))?;
		if *version != FORMAT_VERSION {
			return Err(MarkovError::CorruptModel(format!("unsupported format version {version}")));
		}

		let (chain, rest): (Self, &[u8]) =
			postcard::take_from_bytes(body).map_err(|e| MarkovError::CorruptModel(format!("cannot decode chain: {e}")))?;
		if !rest.is_empty() {
			return Err(MarkovError::CorruptModel(format!("{} unexpected trailing bytes", rest.len())));
		}

		chain.validate().map_err(|e| MarkovError::CorruptModel(e.to_string()))?;
		Ok(chain)
	}

	/// Checks the structural invariants.
	///
	/// # Errors
	/// Returns [`MarkovError::ModelInvariantViolation`] describing the first
	/// broken invariant.
	pub(crate) fn validate(&self) -> Result<()> {
		let violation = |reason: String| -> Result<()> { Err(MarkovError::ModelInvariantViolation(reason)) };

		if self.coherence < 1 {
			return violation("coherence must be >= 1".to_owned());
		}

		for (key, state) in &self.states {
			if key.len() != self.coherence {
				return violation(format!("state of {} word(s) in a chain of coherence {}", key.len(), self.coherence));
			}
			if state.words() != key.as_slice() {
				return violation(format!("state \"{}\" is stored under another key", state.words().join(", ")));
			}
			if state.transitions().is_empty() {
				return violation(format!("state \"{}\" has no transitions", key.join(", ")));
			}
			if state.transitions().values().any(|count| *count == 0) {
				return violation(format!("state \"{}\" has a zero count", key.join(", ")));
			}
		}

		for start in &self.starting_states {
			if start.is_empty() {
				return violation("empty starting state".to_owned());
			}
			if !self.states.contains_key(start) {
				return violation(format!("starting state \"{}\" is not in the chain", start.join(", ")));
			}
		}

		Ok(())
	}
}

/// Assembles a chain link by link.
///
/// Intended for chains that are not learned from text (fixtures, imports).
/// The chain only exists once [`ChainAssembler::finish`] consumed the
/// assembler, so a finished chain can never be extended.
#[derive(Debug, Default)]
pub struct ChainAssembler {
	coherence: usize,
	states: HashMap<Vec<String>, State>,
	starting_states: Vec<Vec<String>>,
	end_of_sentence: HashSet<String>,
}

impl ChainAssembler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the state `words` with its successor `frequencies`.
	///
	/// The first link fixes the coherence. When `starting` is `None`, the
	/// link becomes a starting state only if none was recorded yet.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidInput`] if `words` is empty or of the
	/// wrong length, if `frequencies` is empty or holds a zero count, or if
	/// the state was already added.
	pub fn add_link<S: AsRef<str>>(
		&mut self,
		words: &[S],
		frequencies: &[(S, usize)],
		starting: Option<bool>,
	) -> Result<&mut Self> {
		if words.is_empty() {
			return Err(invalid_input("link must have at least one word"));
		}

		if self.coherence != 0 && words.len() != self.coherence {
			return Err(invalid_input(format!("expected link to have {} word(s); got {}", self.coherence, words.len())));
		}

		if frequencies.is_empty() {
			return Err(invalid_input("link frequencies cannot be empty"));
		}

		let key: Vec<String> = words.iter().map(|w| w.as_ref().to_owned()).collect();
		if self.states.contains_key(&key) {
			return Err(invalid_input(format!("link with word values \"{}\" is not unique to the chain", key.join(", "))));
		}

		let mut transitions = BTreeMap::new();
		for (word, count) in frequencies {
			if *count == 0 {
				return Err(invalid_input(format!("link frequency for \"{}\" must be >= 1", word.as_ref())));
			}
			*transitions.entry(word.as_ref().to_owned()).or_insert(0) += count;
		}

		self.coherence = words.len();
		if starting.unwrap_or(self.starting_states.is_empty()) {
			self.starting_states.push(key.clone());
		}
		self.states.insert(key.clone(), State::with_transitions(key, transitions));

		Ok(self)
	}

	/// Declares `token` as closing a sentence.
	pub fn end_of_sentence(&mut self, token: &str) -> &mut Self {
		self.end_of_sentence.insert(token.to_owned());
		self
	}

	/// Produces the chain.
	///
	/// # Errors
	/// Returns [`MarkovError::EmptyModel`] if no link was added.
	pub fn finish(self) -> Result<Chain> {
		if self.states.is_empty() {
			return Err(MarkovError::EmptyModel);
		}
		Ok(Chain::from_parts(self.coherence, self.states, self.starting_states, self.end_of_sentence))
	}
}
