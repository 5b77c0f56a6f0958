use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level names accepted in the `loglevel` config field (lowercase).
pub const LOG_LEVEL_NAMES: [&str; 8] = [
    "trace", "debug", "info", "warn", "warning", "error", "fatal", "panic",
];

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::ERROR,
            json_format: false,
        }
    }
}

impl TracingConfig {
    /// Build from the config's `loglevel` value. Empty or unknown names map to `error`.
    pub fn from_log_level(name: &str) -> Self {
        Self {
            level: parse_level(name).unwrap_or(Level::ERROR),
            ..Self::default()
        }
    }
}

fn parse_level(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" | "fatal" | "panic" => Some(Level::ERROR),
        _ => None,
    }
}

#[derive(Debug)]
pub struct TracingGuard {
    _default_guard: tracing::subscriber::DefaultGuard,
}

/// Install a stderr subscriber as the default for the current thread.
pub fn init_tracing(config: &TracingConfig) -> TracingGuard {
    init_tracing_with_writer(config, std::io::stderr)
}

pub fn init_tracing_with_writer<W>(config: &TracingConfig, writer: W) -> TracingGuard
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = resolve_env_filter(config);

    let default_guard = if config.json_format {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_level(true)
            .with_timer(tracing_subscriber::fmt::time::SystemTime);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .set_default()
    };

    TracingGuard {
        _default_guard: default_guard,
    }
}

/// The filter comes from the config alone; `RUST_LOG` is not consulted.
fn resolve_env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::new(config.level.as_str())
}
