use crate::error::{DystillError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw top-level shape of an `account*.toml` file, before validation.
///
/// Sections are kept as untyped values so the parser can check their shape
/// and report per-field errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAccountFile {
	/// The `[credentials]` table.
	#[serde(default)]
	pub credentials: Option<toml::Value>,

	/// The `[[rules]]` entries, in file order.
	#[serde(default)]
	pub rules: Option<toml::Value>,
}

/// A filter/action pair. Both values are opaque to dystill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	/// Matching expression understood by the downstream consumer.
	pub filter: String,

	/// Action to take when `filter` matches.
	pub action: String,
}

/// One configured mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
	/// Value of `credentials.account_name`.
	pub name: String,

	/// Value of `credentials.account_token`.
	pub token: String,

	/// The file this account was loaded from.
	pub source_file: PathBuf,

	/// Rules in file order. Earlier rules take precedence downstream.
	pub rules: Vec<Rule>,
}

/// The validated, non-empty set of accounts.
#[derive(Debug, Clone)]
pub struct Configuration {
	/// Directory the accounts were discovered in.
	pub home_dir: PathBuf,

	/// Accounts in discovery order. Never empty.
	pub accounts: Vec<Account>,
}

/// A rule entry that was dropped during validation.
#[derive(Debug)]
pub struct RuleRejection {
	/// Zero-based position in the file's `rules` list. A `rules` value that is
	/// not an array is reported once, at index 0.
	pub index: usize,

	/// Why the entry was dropped.
	pub error: DystillError,
}

/// An account parsed from a single file, plus the rules dropped along the way.
#[derive(Debug)]
pub struct ParsedAccount {
	pub account: Account,
	pub rejected_rules: Vec<RuleRejection>,
}

/// What happened to one discovered file.
#[derive(Debug)]
pub enum FileOutcome {
	/// The file produced an account.
	Loaded(ParsedAccount),

	/// The file could not be read or is not valid TOML.
	ParseFailed(DystillError),

	/// The file parsed but its credentials are unusable.
	Invalid(DystillError),
}

/// Outcome for a single discovered file.
#[derive(Debug)]
pub struct FileReport {
	pub path: PathBuf,
	pub outcome: FileOutcome,
}

impl FileReport {
	/// The loaded account, if any.
	pub fn account(&self) -> Option<&Account> {
		match &self.outcome {
			FileOutcome::Loaded(parsed) => Some(&parsed.account),
			_ => None,
		}
	}

	/// The error that caused the file to be skipped, if any.
	pub fn error(&self) -> Option<&DystillError> {
		match &self.outcome {
			FileOutcome::Loaded(_) => None,
			FileOutcome::ParseFailed(e) | FileOutcome::Invalid(e) => Some(e),
		}
	}
}

/// Per-file results of scanning a config directory.
#[derive(Debug)]
pub struct LoadReport {
	/// Directory that was scanned.
	pub home_dir: PathBuf,

	/// One entry per discovered file, in discovery order.
	pub files: Vec<FileReport>,
}

impl LoadReport {
	pub fn new(home_dir: &Path) -> Self {
		Self {
			home_dir: home_dir.to_path_buf(),
			files: Vec::new(),
		}
	}

	/// Accounts that loaded successfully, in discovery order.
	pub fn accounts(&self) -> impl Iterator<Item = &Account> {
		self.files.iter().filter_map(FileReport::account)
	}

	pub fn loaded_count(&self) -> usize {
		self.accounts().count()
	}

	pub fn skipped_count(&self) -> usize {
		self.files.len() - self.loaded_count()
	}

	/// Total number of rule entries dropped across all loaded files.
	pub fn rejected_rule_count(&self) -> usize {
		self.files
			.iter()
			.map(|file| match &file.outcome {
				FileOutcome::Loaded(parsed) => parsed.rejected_rules.len(),
				_ => 0,
			})
			.sum()
	}

	/// Convert into a [`Configuration`], enforcing that at least one account loaded.
	pub fn into_configuration(self) -> Result<Configuration> {
		let accounts: Vec<Account> = self
			.files
			.into_iter()
			.filter_map(|file| match file.outcome {
				FileOutcome::Loaded(parsed) => Some(parsed.account),
				_ => None,
			})
			.collect();

		if accounts.is_empty() {
			return Err(DystillError::NoAccountsConfigured {
				home_dir: self.home_dir,
			});
		}

		Ok(Configuration {
			home_dir: self.home_dir,
			accounts,
		})
	}
}
