use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dystill::DystillError;
use dystill::config::{Configuration, resolve_home_dir, scan_accounts};
use dystill::logging::init_cli_logger;
use dystill::summary::{no_accounts_help, render_report, render_summary};

#[derive(Parser)]
#[command(name = "dystill")]
#[command(
	author,
	version,
	about = "Loads email account credentials and filter rules from local TOML files"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Read account files from this directory instead of the default location
	#[arg(long, global = true, value_name = "DIR")]
	config_dir: Option<PathBuf>,

	/// Show debug output while loading
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Print the directory account files are read from
	Path,
	/// Check every account file and report problems
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_cli_logger(cli.verbose);

	let home_dir = match cli.config_dir {
		Some(dir) => dir,
		None => resolve_home_dir().context("Failed to determine the dystill config directory")?,
	};

	match cli.command {
		Some(Commands::Config { action }) => match action {
			ConfigAction::Path => handle_config_path(&home_dir),
			ConfigAction::Validate => handle_config_validate(&home_dir),
		},
		None => handle_summary(&home_dir),
	}
}

fn handle_summary(home_dir: &Path) -> Result<ExitCode> {
	let Some(config) = load_or_help(home_dir)? else {
		return Ok(ExitCode::FAILURE);
	};

	print!("{}", render_summary(&config));
	Ok(ExitCode::SUCCESS)
}

fn handle_config_path(home_dir: &Path) -> Result<ExitCode> {
	println!("{}", home_dir.display());
	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(home_dir: &Path) -> Result<ExitCode> {
	let report = scan_accounts(home_dir);
	print!("{}", render_report(&report));

	let all_valid = report.skipped_count() == 0 && report.rejected_rule_count() == 0;
	match report.into_configuration() {
		Ok(_) if all_valid => {
			println!("All account files are valid.");
			Ok(ExitCode::SUCCESS)
		}
		Ok(_) => Ok(ExitCode::FAILURE),
		Err(DystillError::NoAccountsConfigured { home_dir }) => {
			println!();
			print!("{}", no_accounts_help(&home_dir));
			Ok(ExitCode::FAILURE)
		}
		Err(e) => Err(e.into()),
	}
}

/// Load the configuration, printing setup help when no account is configured.
fn load_or_help(home_dir: &Path) -> Result<Option<Configuration>> {
	match scan_accounts(home_dir).into_configuration() {
		Ok(config) => Ok(Some(config)),
		Err(DystillError::NoAccountsConfigured { home_dir }) => {
			print!("{}", no_accounts_help(&home_dir));
			Ok(None)
		}
		Err(e) => Err(e).context("Failed to load account configuration"),
	}
}
