//! Text handling shared by the chain builder and the text generator.

/// Whitespace normalization and tokenization.
///
/// Produces the token stream consumed by the chain builder, with the empty
/// string standing for a paragraph break.
pub mod tokenizer;

/// Sentence-boundary and case heuristics over a single token.
pub mod classifier;
