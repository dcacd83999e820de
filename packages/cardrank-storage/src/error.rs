use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Failed to read catalog seed at {path:?}.")]
	ReadSeed { path: PathBuf, source: std::io::Error },
	#[error("Catalog seed at {path:?} is not a JSON array of cards.")]
	ParseSeed { path: PathBuf, source: serde_json::Error },
}
