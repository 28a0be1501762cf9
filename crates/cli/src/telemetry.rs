use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Default verbosity: `debug` when the runner has step debugging enabled
/// (`RUNNER_DEBUG=1`), `info` otherwise. `RUST_LOG` overrides both.
pub fn default_level(runner_debug: Option<&str>) -> LevelFilter {
    match runner_debug.map(str::trim) {
        Some("1") | Some("true") => LevelFilter::DEBUG,
        _ => LevelFilter::INFO,
    }
}

pub fn init_tracing(format: LogFormat) {
    let runner_debug = std::env::var("RUNNER_DEBUG").ok();
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(runner_debug.as_deref()).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
