use env_logger::{Builder, Env};
use std::io::Write;

/// Initialize logging with timestamp, level, and message formatting.
///
/// Defaults to INFO; `RUST_LOG` overrides the filter.
/// Format: `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
