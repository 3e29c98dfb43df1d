//! Network operations for querying the air quality server.
//!
//! This module owns the connection settings and the HTTP transport used to
//! talk to the ArcGIS MapServer that backs https://qualar.apambiente.pt.

use crate::error::NetworkError;
use tracing::debug;

/// MapServer root holding the air quality layers
pub const DEFAULT_BASE_URL: &str =
    "https://sniambgeoogc.apambiente.pt/getogc/rest/services/Visualizador/QAR/MapServer";

/// Upper bound on sequential page requests for one query
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Connection settings handed to the scraper at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Records per request, `None` lets the server decide.
    pub page_size: Option<u32>,
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: String::from(DEFAULT_BASE_URL),
            user_agent: format!("arqual/{}", env!("CARGO_PKG_VERSION")),
            page_size: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ClientConfig {
    /// URL of the `query` endpoint of a layer.
    pub fn layer_url(&self, layer: u32) -> String {
        format!("{}/{}/query", self.base_url.trim_end_matches('/'), layer)
    }
}

/// Performs a GET and returns the response body as text.
pub trait Transport {
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, NetworkError>;
}

/// Blocking HTTP transport backed by `ureq`.
pub struct HttpTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();

        HttpTransport {
            agent: agent_config.into(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Transport for HttpTransport {
    /// # Errors
    /// - [`NetworkError::Transport`] if the request cannot be sent
    /// - [`NetworkError::Status`] if the status is not 200
    /// - [`NetworkError::Body`] if the body cannot be decoded as text
    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<String, NetworkError> {
        debug!(url, ?params, "sending request");

        let mut request = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str());
        for (key, value) in params {
            request = request.query(*key, value.as_str());
        }

        let mut response = request.call().map_err(|e| NetworkError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        debug!(url, status, "response received");

        if status != 200 {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| NetworkError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
