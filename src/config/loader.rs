use crate::config::parser::parse_account_file;
use crate::config::types::{Configuration, FileOutcome, FileReport, LoadReport};
use crate::error::{DystillError, Result};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// File name prefix for account files.
pub const ACCOUNT_FILE_PREFIX: &str = "account";

/// File name suffix for account files.
pub const ACCOUNT_FILE_SUFFIX: &str = ".toml";

/// Whether a file name matches `account*.toml` (case-sensitive).
///
/// Matches on the raw encoded bytes, so names that are not valid UTF-8 still
/// match.
pub fn is_account_file_name(name: impl AsRef<OsStr>) -> bool {
	let name = name.as_ref().as_encoded_bytes();
	name.len() >= ACCOUNT_FILE_PREFIX.len() + ACCOUNT_FILE_SUFFIX.len()
		&& name.starts_with(ACCOUNT_FILE_PREFIX.as_bytes())
		&& name.ends_with(ACCOUNT_FILE_SUFFIX.as_bytes())
}

/// List the account files directly inside `home_dir`, sorted by file name.
///
/// A missing directory is not an error and yields no files. Entries that
/// cannot be read, and matching names that are not regular files, are logged
/// and skipped.
pub fn discover_account_files(home_dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = match std::fs::read_dir(home_dir) {
		Ok(entries) => entries,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
		Err(source) => {
			return Err(DystillError::DirectoryReadError {
				path: home_dir.to_path_buf(),
				source,
			});
		}
	};

	let mut files = Vec::new();
	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				tracing::warn!("Skipping unreadable entry in {}: {e}", home_dir.display());
				continue;
			}
		};

		if !is_account_file_name(entry.file_name()) {
			continue;
		}

		let path = entry.path();
		if path.is_file() {
			files.push(path);
		} else {
			tracing::warn!("Skipping {}: not a regular file", path.display());
		}
	}

	files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
	Ok(files)
}

/// Discover and load every account file in `home_dir`.
///
/// Never fails: unreadable, unparsable or invalid files are logged and
/// recorded in the report, and loading continues with the next file.
pub fn scan_accounts(home_dir: &Path) -> LoadReport {
	let mut report = LoadReport::new(home_dir);

	let files = match discover_account_files(home_dir) {
		Ok(files) => files,
		Err(e) => {
			tracing::warn!("{}", error_reason(&e));
			Vec::new()
		}
	};

	tracing::debug!(
		"Found {} account file(s) in {}",
		files.len(),
		home_dir.display()
	);

	for path in files {
		let outcome = match parse_account_file(&path) {
			Ok(parsed) => {
				for rejection in &parsed.rejected_rules {
					tracing::warn!(
						"Skipping rule {} in {}: {}",
						rejection.index,
						path.display(),
						rejection.error
					);
				}
				tracing::debug!(
					"Loaded account '{}' from {} ({} rule(s))",
					parsed.account.name,
					path.display(),
					parsed.account.rules.len()
				);
				FileOutcome::Loaded(parsed)
			}
			Err(e) => {
				tracing::warn!(
					"Error loading account details from {}: {}",
					path.display(),
					error_reason(&e)
				);
				if e.is_parse_failure() {
					FileOutcome::ParseFailed(e)
				} else {
					FileOutcome::Invalid(e)
				}
			}
		};

		report.files.push(FileReport { path, outcome });
	}

	warn_duplicate_names(&report);
	report
}

/// Load the configuration from `home_dir`.
///
/// Returns [`DystillError::NoAccountsConfigured`] when no file produced a valid
/// account; the caller decides how to report that.
pub fn load_configuration(home_dir: &Path) -> Result<Configuration> {
	scan_accounts(home_dir).into_configuration()
}

/// Describe an error including its source, for log lines.
pub fn error_reason(error: &DystillError) -> String {
	match std::error::Error::source(error) {
		Some(source) => format!("{error}: {}", source.to_string().trim_end()),
		None => error.to_string(),
	}
}

fn warn_duplicate_names(report: &LoadReport) {
	let mut seen: HashMap<&str, &Path> = HashMap::new();
	for account in report.accounts() {
		if let Some(first) = seen.get(account.name.as_str()) {
			tracing::warn!(
				"Account '{}' in {} is also defined in {}",
				account.name,
				account.source_file.display(),
				first.display()
			);
		} else {
			seen.insert(&account.name, &account.source_file);
		}
	}
}
