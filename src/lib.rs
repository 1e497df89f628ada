//! Dystill - email account configuration loader.
//!
//! This library provides the core functionality for dystill, including:
//! - Config directory resolution (`APPDATA`, `XDG_CONFIG_HOME`, `~/.config`)
//! - Discovery of `account*.toml` files
//! - Credential and rule validation with per-file error recovery
//! - Summary and help text rendering
//!
//! # Example
//!
//! ```no_run
//! use dystill::config::{load_configuration, resolve_home_dir};
//!
//! let home_dir = resolve_home_dir().unwrap();
//! let config = load_configuration(&home_dir).unwrap();
//!
//! for account in &config.accounts {
//!     println!("{}: {} rule(s)", account.name, account.rules.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod summary;

pub use error::{DystillError, Result};
