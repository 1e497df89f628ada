//! Account configuration loading for dystill.
//!
//! This module handles:
//! - Config directory resolution from the environment
//! - `account*.toml` discovery
//! - Per-file parsing and validation
//! - Aggregation into a non-empty configuration

pub mod home;
pub mod loader;
pub mod parser;
pub mod types;

pub use home::{APP_NAME, HomeEnv, resolve_home_dir};
pub use loader::{
	discover_account_files, error_reason, is_account_file_name, load_configuration, scan_accounts,
};
pub use parser::{parse_account_file, parse_account_str};
pub use types::{
	Account, Configuration, FileOutcome, FileReport, LoadReport, ParsedAccount, Rule,
	RuleRejection,
};
