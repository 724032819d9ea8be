//! Top-level module for the Markov chain text system.
//!
//! This module provides the whole pipeline after tokenization:
//! - Chain construction from a token stream (`builder`)
//! - The immutable chain itself and its serialization (`Chain`)
//! - Transition table entries and sampling tables (`State`)
//! - Generation parameters (`TextGeneratorOptions`)
//! - Random text generation (`generator`)

/// Chain construction from raw text or a token stream.
///
/// Handles the cyclic wraparound, transition counting and the choice of
/// starting states and sentence endings.
pub mod builder;

/// The word-level Markov chain and its link-by-link assembler.
///
/// Supports exact state lookups and a self-checking binary format.
pub mod chain;

/// Random walks over a chain, rendered back into text.
pub mod generator;

/// Generation parameters: stop conditions, separators and iteration cap.
pub mod options;

/// One transition table entry, plus the weighted sampling table built
/// from it during generation.
pub mod state;

/// Per-token metadata computed while building.
pub mod word;
