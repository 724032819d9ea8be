use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building, storing or walking a Markov chain.
///
/// Every error is returned to the immediate caller; nothing is retried
/// internally.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// A parameter is out of range (coherence, stop conditions, links...).
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// The exact state was never observed while training.
	#[error("word combination \"{}\" not found in chain", .0.join(", "))]
	StateNotFound(Vec<String>),

	/// Generation reached a state it cannot leave.
	#[error("cannot generate text; {0}")]
	BrokenChain(String),

	/// The chain has nothing to start from.
	#[error("cannot generate text; Markov chain has no starting point")]
	EmptyModel,

	/// A starting state holds no tokens.
	#[error("cannot generate text; starting words are empty")]
	DegenerateState,

	/// Serialized bytes could not be turned back into a chain.
	#[error("corrupt model: {0}")]
	CorruptModel(String),

	/// The builder produced something it should not have. Indicates a bug.
	#[error("model invariant violated: {0}")]
	ModelInvariantViolation(String),

	/// Generation ran past the configured iteration cap.
	#[error("generation stopped after {0} iterations without meeting a stop condition")]
	IterationLimit(usize),

	/// File system failure in the I/O helpers.
	#[error("I/O error on '{}': {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Shorthand for [`MarkovError::InvalidInput`].
pub(crate) fn invalid_input(reason: impl Into<String>) -> MarkovError {
	MarkovError::InvalidInput(reason.into())
}
