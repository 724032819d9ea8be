//! Command-line arguments.

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use rs_markov_core::DEFAULT_COHERENCE;
use rs_markov_core::model::options::{DEFAULT_MAX_ITERATIONS, DEFAULT_PARAGRAPH_SEPARATOR, DEFAULT_WORD_SEPARATOR};

#[derive(Parser, Debug)]
#[command(name = "rs-markov")]
#[command(author, version, about = "Markov chain command-line utilities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emits randomly-generated text using a Markov chain algorithm
    GenerateText(GenerateTextArgs),
    /// Builds a Markov chain from text and writes it to a file
    GenerateChain(GenerateChainArgs),
}

/// Options shared by the commands learning from text.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source file containing text. Repeat to concatenate files
    #[arg(short, long = "source", value_name = "FILE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Number of words in the chain to "look back" when resolving the next word
    #[arg(short, long, default_value_t = DEFAULT_COHERENCE, value_parser = clap::value_parser!(u32).range(1..).map(|v| v as usize))]
    pub coherence: usize,

    /// Ignore line breaks in the source text
    #[arg(long)]
    pub ignore_line_breaks: bool,
}

#[derive(Args, Debug)]
pub struct GenerateTextArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of sentences to generate
    #[arg(long)]
    pub sentences: Option<usize>,

    /// Number of words to generate
    #[arg(long)]
    pub words: Option<usize>,

    /// Number of paragraphs to generate
    #[arg(long)]
    pub paragraphs: Option<usize>,

    /// Treat the source file as a serialized Markov chain instead of raw text
    #[arg(long)]
    pub unserialize: bool,

    /// Emit performance measures as well
    #[arg(long)]
    pub log_performance: bool,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Glue between words
    #[arg(long, default_value = DEFAULT_WORD_SEPARATOR)]
    pub word_separator: String,

    /// Glue between paragraphs
    #[arg(long, default_value = DEFAULT_PARAGRAPH_SEPARATOR)]
    pub paragraph_separator: String,

    /// Give up after this many generation steps (0 removes the cap)
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
}

impl GenerateTextArgs {
    /// Whether at least one stop condition was given.
    pub fn has_limit(&self) -> bool {
        self.sentences.is_some() || self.words.is_some() || self.paragraphs.is_some()
    }
}

#[derive(Args, Debug)]
pub struct GenerateChainArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file. Defaults to the first source with the `chain` extension
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
