pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Model output rejected: {message}")]
	Parse { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<cardrank_providers::Error> for Error {
	fn from(err: cardrank_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse { message: err.to_string() }
	}
}
impl From<cardrank_storage::Error> for Error {
	fn from(err: cardrank_storage::Error) -> Self {
		match err {
			cardrank_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			cardrank_storage::Error::NotFound(message) => Self::NotFound { message },
			other => Self::Storage { message: other.to_string() },
		}
	}
}
