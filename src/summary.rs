//! Text output for the dystill binary.

use crate::config::{Configuration, FileOutcome, LoadReport, error_reason};
use std::fmt::Write;
use std::path::Path;

/// Render every account and its rules.
pub fn render_summary(config: &Configuration) -> String {
	let mut out = String::new();

	for account in &config.accounts {
		let _ = writeln!(out);
		let _ = writeln!(out, "Account Name: {}", account.name);
		let _ = writeln!(out, "Account Token: {}", account.token);
		for rule in &account.rules {
			let _ = writeln!(out, "    Filter: {}", rule.filter);
			let _ = writeln!(out, "    Action: {}", rule.action);
		}
	}

	out
}

/// Guidance printed when no account could be loaded.
pub fn no_accounts_help(home_dir: &Path) -> String {
	format!(
		r#"No accounts configured. To add an account:

1. Create a TOML file in {} named 'account*.toml'

2. Add account credentials and rules to it:

	[credentials]
	account_name = "personal"
	account_token = "<your token>"

	[[rules]]
	filter = "from:newsletter@example.com"
	action = "archive"

3. You can set up multiple accounts, each in a separate TOML file using the `account` prefix:
	account.toml
	account2.toml
	account-primary.toml
"#,
		home_dir.display()
	)
}

/// Render the per-file results of a scan.
pub fn render_report(report: &LoadReport) -> String {
	let mut out = String::new();

	if report.files.is_empty() {
		let _ = writeln!(out, "No account files found in {}", report.home_dir.display());
		return out;
	}

	for file in &report.files {
		match &file.outcome {
			FileOutcome::Loaded(parsed) => {
				let _ = writeln!(
					out,
					"✓ {}: account '{}' ({} rule(s))",
					file.path.display(),
					parsed.account.name,
					parsed.account.rules.len()
				);
				for rejection in &parsed.rejected_rules {
					let _ = writeln!(
						out,
						"    skipped rule {}: {}",
						rejection.index, rejection.error
					);
				}
			}
			FileOutcome::ParseFailed(e) | FileOutcome::Invalid(e) => {
				let _ = writeln!(out, "✗ {}: {}", file.path.display(), error_reason(e));
			}
		}
	}

	let _ = writeln!(
		out,
		"\n{} account(s) loaded, {} file(s) skipped, {} rule(s) skipped",
		report.loaded_count(),
		report.skipped_count(),
		report.rejected_rule_count()
	);

	out
}
