use crate::errors::ApiFailure;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemooveApiConfig {
    // Hosts /Home, /status, /ManualControls, /TrashCount and /Alerts
    pub control_api_base_url: String,
    // Hosts /fetchSensorData and /feedback
    pub data_api_base_url: String,
    // e.g.: http://192.168.1.1:3128
    pub api_proxy: Option<String>,
}

impl RemooveApiConfig {
    #[must_use]
    pub fn control_url(&self, path: &str) -> String {
        join_url(&self.control_api_base_url, path)
    }

    #[must_use]
    pub fn data_url(&self, path: &str) -> String {
        join_url(&self.data_api_base_url, path)
    }

    /// `path` followed by `id` as one percent-encoded segment
    pub fn control_url_with_id(&self, path: &str, id: &str) -> Result<reqwest::Url, ApiFailure> {
        let mut url = reqwest::Url::parse(&self.control_url(path))
            .map_err(|e| ApiFailure::InvalidUrl(e.to_string()))?;
        let url_str = url.to_string();
        url.path_segments_mut()
            .map_err(|()| ApiFailure::InvalidUrl(format!("{url_str} cannot take path segments")))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
