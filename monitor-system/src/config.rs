use serde::{Deserialize, Deserializer, de::Error};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_WEBSOCKET_SUBSCRIBE_ON_CONNECT: bool = true;
const DEFAULT_WEBSOCKET_RECONNECT: bool = true;
const DEFAULT_WEBSOCKET_RECONNECT_BASE_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_WEBSOCKET_RECONNECT_MAX_DELAY: Duration = Duration::from_secs(60);
const DEFAULT_WEBSOCKET_MAX_RECONNECT_ATTEMPTS: u32 = 0;
const DEFAULT_STATUS_REFRESH_INTERVAL: Duration = Duration::from_secs(10);
const DEFAULT_CHART_POLL_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_CHART_RANGE: &str = "week";
const DEFAULT_STORAGE_DIR: &str = ".remoove";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Config file doesn't exist in the provided (or default) path: {0}")]
    ConfigFileDoesNotExist(PathBuf),
    #[error("File exists but it could not be read to a string for parsing: {0}")]
    FileExistsButCannotBeReadToString(std::io::Error),
    #[error("Could not parse file to config; either invalid yaml or missing config: {0}")]
    FileFormatCouldNotBeParsed(serde_yml::Error),
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemooveConfig {
    control_api_address: String,
    data_api_address: Option<String>,
    api_proxy: Option<String>,

    websocket_url: String,
    websocket_subscribe_on_connect: Option<bool>,
    websocket_reconnect: Option<bool>,
    #[serde(default, deserialize_with = "duration_from_str")]
    websocket_reconnect_base_delay: Option<Duration>,
    #[serde(default, deserialize_with = "duration_from_str")]
    websocket_reconnect_max_delay: Option<Duration>,
    websocket_max_reconnect_attempts: Option<u32>,

    #[serde(default, deserialize_with = "duration_from_str")]
    status_refresh_interval: Option<Duration>,
    #[serde(default, deserialize_with = "duration_from_str")]
    chart_poll_interval: Option<Duration>,
    default_chart_range: Option<String>,

    storage_dir: Option<PathBuf>,
}

impl RemooveConfig {
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<RemooveConfig, ConfigError> {
        if !path.as_ref().exists() {
            return Err(ConfigError::ConfigFileDoesNotExist(
                path.as_ref().to_path_buf(),
            ));
        }

        let config_file_data = std::fs::read_to_string(path)
            .map_err(ConfigError::FileExistsButCannotBeReadToString)?;

        Self::from_yaml(&config_file_data)
    }

    pub fn from_yaml(data: &str) -> Result<RemooveConfig, ConfigError> {
        serde_yml::from_str(data).map_err(ConfigError::FileFormatCouldNotBeParsed)
    }

    pub fn control_api_address(&self) -> &str {
        &self.control_api_address
    }

    /// Sensor data and feedback live on a separate API; falls back to the control API
    pub fn data_api_address(&self) -> &str {
        self.data_api_address
            .as_deref()
            .unwrap_or(&self.control_api_address)
    }

    pub fn api_proxy(&self) -> Option<&str> {
        self.api_proxy.as_deref()
    }

    pub fn websocket_url(&self) -> &str {
        &self.websocket_url
    }

    pub fn websocket_subscribe_on_connect(&self) -> bool {
        self.websocket_subscribe_on_connect
            .unwrap_or(DEFAULT_WEBSOCKET_SUBSCRIBE_ON_CONNECT)
    }

    pub fn websocket_reconnect(&self) -> bool {
        self.websocket_reconnect
            .unwrap_or(DEFAULT_WEBSOCKET_RECONNECT)
    }

    pub fn websocket_reconnect_base_delay(&self) -> Duration {
        self.websocket_reconnect_base_delay
            .unwrap_or(DEFAULT_WEBSOCKET_RECONNECT_BASE_DELAY)
    }

    pub fn websocket_reconnect_max_delay(&self) -> Duration {
        self.websocket_reconnect_max_delay
            .unwrap_or(DEFAULT_WEBSOCKET_RECONNECT_MAX_DELAY)
    }

    pub fn websocket_max_reconnect_attempts(&self) -> u32 {
        self.websocket_max_reconnect_attempts
            .unwrap_or(DEFAULT_WEBSOCKET_MAX_RECONNECT_ATTEMPTS)
    }

    pub fn status_refresh_interval(&self) -> Duration {
        self.status_refresh_interval
            .unwrap_or(DEFAULT_STATUS_REFRESH_INTERVAL)
    }

    pub fn chart_poll_interval(&self) -> Duration {
        self.chart_poll_interval
            .unwrap_or(DEFAULT_CHART_POLL_INTERVAL)
    }

    pub fn default_chart_range(&self) -> &str {
        self.default_chart_range
            .as_deref()
            .unwrap_or(DEFAULT_CHART_RANGE)
    }

    pub fn storage_dir(&self) -> &Path {
        self.storage_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_STORAGE_DIR))
    }
}

/// Humantime strings, e.g. `10s` or `1m 30s`. Zero is rejected since every duration here
/// drives a timer.
fn duration_from_str<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let duration = humantime::parse_duration(&s)
        .map_err(|e| D::Error::custom(format!("Invalid duration `{s}`: {e}")))?;
    if duration.is_zero() {
        return Err(D::Error::custom(format!(
            "Duration `{s}` must be greater than zero"
        )));
    }
    Ok(Some(duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MINIMAL: &str = "
control_api_address: https://control.example.com/Dev
websocket_url: wss://ws.example.com/dev/
";

    #[test]
    fn defaults() {
        let config = RemooveConfig::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.control_api_address(), "https://control.example.com/Dev");
        assert_eq!(config.data_api_address(), "https://control.example.com/Dev");
        assert_eq!(config.api_proxy(), None);
        assert_eq!(config.websocket_url(), "wss://ws.example.com/dev/");
        assert!(config.websocket_subscribe_on_connect());
        assert!(config.websocket_reconnect());
        assert_eq!(config.websocket_reconnect_base_delay(), Duration::from_secs(1));
        assert_eq!(config.websocket_reconnect_max_delay(), Duration::from_secs(60));
        assert_eq!(config.websocket_max_reconnect_attempts(), 0);
        assert_eq!(config.status_refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.chart_poll_interval(), Duration::from_secs(60));
        assert_eq!(config.default_chart_range(), "week");
        assert_eq!(config.storage_dir(), Path::new(".remoove"));
    }

    #[test]
    fn everything_set() {
        let config = RemooveConfig::from_yaml(
            "
control_api_address: https://control.example.com/Dev
data_api_address: https://data.example.com
api_proxy: http://192.168.1.1:3128
websocket_url: wss://ws.example.com/dev/
websocket_subscribe_on_connect: false
websocket_reconnect: false
websocket_reconnect_base_delay: 500ms
websocket_reconnect_max_delay: 2m
websocket_max_reconnect_attempts: 7
status_refresh_interval: 5s
chart_poll_interval: 1m 30s
default_chart_range: month
storage_dir: /tmp/remoove
",
        )
        .unwrap();

        assert_eq!(config.data_api_address(), "https://data.example.com");
        assert_eq!(config.api_proxy(), Some("http://192.168.1.1:3128"));
        assert!(!config.websocket_subscribe_on_connect());
        assert!(!config.websocket_reconnect());
        assert_eq!(
            config.websocket_reconnect_base_delay(),
            Duration::from_millis(500)
        );
        assert_eq!(config.websocket_reconnect_max_delay(), Duration::from_secs(120));
        assert_eq!(config.websocket_max_reconnect_attempts(), 7);
        assert_eq!(config.status_refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.chart_poll_interval(), Duration::from_secs(90));
        assert_eq!(config.default_chart_range(), "month");
        assert_eq!(config.storage_dir(), Path::new("/tmp/remoove"));
    }

    #[rstest]
    #[case("websocket_url: wss://ws.example.com\n")]
    #[case("control_api_address: https://c.example.com\n")]
    #[case("control_api_address: https://c.example.com\nwebsocket_url: wss://w\nstatus_refresh_interval: soon\n")]
    #[case("control_api_address: https://c.example.com\nwebsocket_url: wss://w\nchart_poll_interval: 0s\n")]
    fn invalid(#[case] yaml: &str) {
        assert!(matches!(
            RemooveConfig::from_yaml(yaml),
            Err(ConfigError::FileFormatCouldNotBeParsed(_))
        ));
    }

    #[test]
    fn missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        assert!(matches!(
            RemooveConfig::from_file_or_default(&path),
            Err(ConfigError::ConfigFileDoesNotExist(p)) if p == path
        ));

        std::fs::write(&path, MINIMAL).unwrap();
        assert!(RemooveConfig::from_file_or_default(&path).is_ok());
    }
}
