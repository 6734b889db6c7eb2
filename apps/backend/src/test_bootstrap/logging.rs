//! Test logging for the backend's unit tests.
//!
//! Installed once per test binary by the `ctor` hook in `lib.rs`. The filter
//! comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`, e.g.
//!
//! ```bash
//! TEST_LOG=backend=debug cargo test -p wordduel-backend
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent; later calls are no-ops.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // try_init: another harness may already own the global subscriber.
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
