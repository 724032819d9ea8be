use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MarkovError, Result};
use crate::model::chain::Chain;

/// Extension given to chain files by default.
pub const CHAIN_EXTENSION: &str = "chain";

fn io_error<P: AsRef<Path>>(path: P) -> impl FnOnce(std::io::Error) -> MarkovError {
	let path = path.as_ref().to_path_buf();
	move |source| MarkovError::Io { path, source }
}

/// Reads one or more text files and returns their concatenated content.
///
/// - Files are read in the given order
/// - A blank line is inserted between two files, so each file ends its
///   last paragraph
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<String> {
	let mut contents = Vec::with_capacity(paths.len());
	for path in paths {
		contents.push(fs::read_to_string(path).map_err(io_error(path))?);
	}
	Ok(contents.join("\n\n"))
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"chain"` → `data/input.chain`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path.file_stem().ok_or_else(|| MarkovError::Io {
		path: input_path.to_path_buf(),
		source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "input path has no filename"),
	})?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Writes `chain` to `path` in the binary chain format.
pub fn save_chain<P: AsRef<Path>>(chain: &Chain, path: P) -> Result<()> {
	let bytes = chain.to_bytes()?;
	fs::write(&path, bytes).map_err(io_error(&path))?;
	log::debug!("chain written to {}", path.as_ref().display());
	Ok(())
}

/// Reads a chain written by [`save_chain`].
///
/// # Errors
/// I/O failures, or [`MarkovError::CorruptModel`] if the file is not a
/// valid chain.
pub fn load_chain<P: AsRef<Path>>(path: P) -> Result<Chain> {
	let bytes = fs::read(&path).map_err(io_error(&path))?;
	Chain::from_bytes(&bytes)
}
