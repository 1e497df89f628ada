use std::path::PathBuf;

/// Library-level structured errors for dystill.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum DystillError {
	#[error("Failed to read account file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse account file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Missing required field `{field}` in {path}")]
	MissingField { path: PathBuf, field: String },

	#[error("Field `{field}` in {path} must be {expected}")]
	InvalidFieldType {
		path: PathBuf,
		field: String,
		expected: &'static str,
	},

	#[error("Field `{field}` in {path} must not be empty")]
	EmptyField { path: PathBuf, field: String },

	#[error("Failed to list config directory: {path}")]
	DirectoryReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("No accounts configured in {home_dir}")]
	NoAccountsConfigured { home_dir: PathBuf },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl DystillError {
	/// Whether the error came from reading or parsing a file, as opposed to
	/// validating its contents.
	pub fn is_parse_failure(&self) -> bool {
		matches!(
			self,
			DystillError::ConfigReadError { .. } | DystillError::ConfigParseError { .. }
		)
	}
}

/// Result type alias using DystillError.
pub type Result<T> = std::result::Result<T, DystillError>;
