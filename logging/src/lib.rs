mod log_style;
mod tracing_utils;
mod utils;

use std::{io::IsTerminal, sync::Once};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use log_style::{LogStyle, LogStyleParseError, TextColoring, get_log_style_from_env};
pub use tracing_utils::spawn_in_current_span;
pub use utils::{GetFromEnvError, get_from_env};

pub const LOG_STYLE_ENV_VAR: &str = "REMOOVE_LOG_STYLE";
const DEFAULT_LOG_FILTER: &str = "info";

static INITIALIZE_LOGGER_ONCE: Once = Once::new();

/// Initialize logging once per process. Later calls are no-ops.
///
/// Logs are written to stderr, leaving stdout for the rendered views.
pub fn init_logging() {
    INITIALIZE_LOGGER_ONCE.call_once(|| {
        let style = match get_log_style_from_env(LOG_STYLE_ENV_VAR) {
            Ok(style) => style.unwrap_or_default(),
            Err(e) => {
                eprintln!("Ignoring invalid {LOG_STYLE_ENV_VAR}: {e}");
                LogStyle::default()
            }
        };
        init_with_style(style);
    });
}

fn make_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_with_style(style: LogStyle) {
    let registry = tracing_subscriber::registry().with(make_env_filter());

    let result = match style {
        LogStyle::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogStyle::Text(coloring) => {
            let ansi = match coloring {
                TextColoring::On => true,
                TextColoring::Off => false,
                TextColoring::Auto => std::io::stderr().is_terminal(),
            };
            registry
                .with(fmt::layer().with_ansi(ansi).with_writer(std::io::stderr))
                .try_init()
        }
    };

    // A global subscriber may already be installed, e.g. by a test harness
    if let Err(e) = result {
        eprintln!("Logging was not initialized: {e}");
    }
}
