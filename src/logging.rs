//! Diagnostic logging setup for the dystill binary.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact `tracing` subscriber writing to stdout.
///
/// `RUST_LOG` overrides the default filter, which shows warnings (skipped
/// files and rules) or, with `verbose`, debug output.
pub fn init_cli_logger(verbose: bool) {
	let default_filter = if verbose { "dystill=debug" } else { "dystill=warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stdout)
				.with_ansi(std::io::stdout().is_terminal())
				.with_target(false)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.without_time()
				.compact(),
		)
		.init();
}
