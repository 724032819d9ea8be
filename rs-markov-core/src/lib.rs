//! Word-level Markov chain text generation library.
//!
//! This crate learns which words follow which in a source text and walks
//! that model to produce new, plausible-looking text:
//! - Tokenization with paragraph-break tracking
//! - Chain construction keyed by fixed-length word sequences
//! - Frequency-weighted random generation bounded by paragraph, sentence
//!   and word limits
//! - Binary persistence of built chains
//!
//! The usual flow is [`build_chain`] followed by [`generate_text`].

/// Error taxonomy shared by every operation.
pub mod error;

/// I/O utilities (source loading, chain files, path helpers).
pub mod io;

/// Chains, their construction and text generation.
pub mod model;

/// Tokenizer and per-token heuristics.
pub mod text;

pub use error::{MarkovError, Result};
pub use model::builder::{DEFAULT_COHERENCE, build, build_chain};
pub use model::chain::{Chain, ChainAssembler};
pub use model::generator::{generate, generate_text, generate_text_with_rng};
pub use model::options::TextGeneratorOptions;
