// Tracing setup for host binaries embedding the ledger.
//
// Filter comes from RUST_LOG, e.g. `RUST_LOG=salary_ledger=debug`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a formatting subscriber. Returns false if a global subscriber was already set.
pub fn init() -> bool {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod telemetry_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_only_install_one_global_subscriber() {
        let _ = init();
        assert!(!init());
        tracing::debug!("telemetry installed");
    }
}
