//! Shared helpers for the integration tests under `tests/`.

use std::io::Write;
use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Initialize the logger once for all tests in a binary.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .try_init();
    });
}
