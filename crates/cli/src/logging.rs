//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

/// Installs a stderr fmt subscriber. `RUST_LOG` overrides the `-v` count.
pub fn init_logging(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	// Already-installed subscribers (tests, embedding) win.
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
