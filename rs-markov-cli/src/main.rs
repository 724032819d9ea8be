mod cli;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::io::{CHAIN_EXTENSION, build_output_path, load_chain, read_sources, save_chain};
use rs_markov_core::{Chain, MarkovError, Result, TextGeneratorOptions, build_chain, generate};

use cli::{Cli, Command, GenerateChainArgs, GenerateTextArgs, SourceArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --log-performance raises the default level so timings are shown
    let default_level = match &cli.command {
        Command::GenerateText(args) if args.log_performance => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs `command` and returns what should be printed.
fn run(command: &Command) -> Result<String> {
    match command {
        Command::GenerateText(args) => generate_text(args),
        Command::GenerateChain(args) => generate_chain(args),
    }
}

/// Builds a chain from the source files.
fn learn(source: &SourceArgs) -> Result<Chain> {
    let text = read_sources(&source.sources)?;
    build_chain(&text, source.coherence, source.ignore_line_breaks)
}

/// Translates the command-line limits into generation options.
///
/// A `--max-iterations` of 0 removes the iteration cap.
fn text_options(args: &GenerateTextArgs) -> Result<TextGeneratorOptions> {
    if !args.has_limit() {
        return Err(MarkovError::InvalidInput("specify a maximum number of paragraphs, sentences or words".to_owned()));
    }

    let mut options = TextGeneratorOptions::new();
    options.max_paragraphs = args.paragraphs;
    options.max_sentences = args.sentences;
    options.max_words = args.words;
    options.word_separator = args.word_separator.clone();
    options.paragraph_separator = args.paragraph_separator.clone();
    options.set_max_iterations(Some(args.max_iterations).filter(|&cap| cap > 0))?;

    Ok(options)
}

fn generate_text(args: &GenerateTextArgs) -> Result<String> {
    let options = text_options(args)?;
    let start = Instant::now();

    let chain = if args.unserialize {
        let [path] = args.source.sources.as_slice() else {
            return Err(MarkovError::InvalidInput("exactly one source is needed to unserialize a chain".to_owned()));
        };
        load_chain(path)?
    } else {
        learn(&args.source)?
    };
    log::info!("chain ready in {:.3?}", start.elapsed());

    let generation = Instant::now();
    let text = match args.seed {
        Some(seed) => generate(&chain, &options, &mut StdRng::seed_from_u64(seed))?,
        None => generate(&chain, &options, &mut rand::rng())?,
    };
    log::info!(
        "generated {} words in {:.3?} ({:.3?} total)",
        text.split_whitespace().count(),
        generation.elapsed(),
        start.elapsed()
    );

    Ok(text)
}

fn generate_chain(args: &GenerateChainArgs) -> Result<String> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => build_output_path(&args.source.sources[0], CHAIN_EXTENSION)?,
    };

    let chain = learn(&args.source)?;
    save_chain(&chain, &output)?;

    Ok(format!("Chain of {} states written to {}", chain.len(), output.display()))
}
