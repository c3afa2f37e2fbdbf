use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

pub fn init() {
    // Default to info so run start/end records always show up;
    // RUST_LOG still overrides for debugging cache behavior.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
