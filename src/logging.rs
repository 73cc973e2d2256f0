//! Diagnostic logging.
//!
//! User-facing messages go through `cli::output`; this is the `tracing`
//! side, for troubleshooting.  The filter comes from `QUILL_LOG`
//! (e.g. `QUILL_LOG=quill=debug`) and defaults to `warn`.  Output goes
//! to stderr so it never mixes with command output.
//!
//! Nothing secret is logged: no passphrases, keys, or entry text, only
//! ids, counts, and byte lengths.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "QUILL_LOG";

/// Install the global subscriber.  Safe to call more than once; later
/// calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
