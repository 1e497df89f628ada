use crate::error::{DystillError, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Application directory name appended to the config base.
pub const APP_NAME: &str = "dystill";

/// Environment inputs for home directory resolution.
///
/// Kept separate from [`HomeEnv::resolve`] so resolution can be tested without
/// touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct HomeEnv {
	/// `APPDATA` (Windows application data directory).
	pub app_data: Option<OsString>,

	/// `XDG_CONFIG_HOME`.
	pub xdg_config_home: Option<OsString>,

	/// The user's home directory.
	pub home: Option<PathBuf>,
}

impl HomeEnv {
	/// Capture the relevant variables from the process environment.
	///
	/// `HOME` falls back to the platform lookup from `dirs` when unset.
	pub fn from_env() -> Self {
		Self {
			app_data: non_empty_var("APPDATA"),
			xdg_config_home: non_empty_var("XDG_CONFIG_HOME"),
			home: non_empty_var("HOME")
				.map(PathBuf::from)
				.or_else(dirs::home_dir),
		}
	}

	/// Resolve the dystill config directory. Does not create it.
	///
	/// Order: `APPDATA`, then `XDG_CONFIG_HOME`, then `<home>/.config`, with
	/// [`APP_NAME`] appended to whichever base wins.
	pub fn resolve(&self) -> Result<PathBuf> {
		let base = if let Some(app_data) = non_empty(&self.app_data) {
			PathBuf::from(app_data)
		} else if let Some(config_home) = non_empty(&self.xdg_config_home) {
			PathBuf::from(config_home)
		} else {
			self.home
				.as_ref()
				.filter(|home| !home.as_os_str().is_empty())
				.ok_or(DystillError::HomeDirectoryNotFound)?
				.join(".config")
		};

		Ok(base.join(APP_NAME))
	}
}

/// Resolve the config directory from the process environment.
pub fn resolve_home_dir() -> Result<PathBuf> {
	HomeEnv::from_env().resolve()
}

fn non_empty_var(name: &str) -> Option<OsString> {
	std::env::var_os(name).filter(|value| !value.is_empty())
}

fn non_empty(value: &Option<OsString>) -> Option<&OsString> {
	value.as_ref().filter(|value| !value.is_empty())
}
