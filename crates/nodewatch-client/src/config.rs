// Configuration for the registry and participant clients

use nodewatch_common::DEFAULT_SERVICE_TYPE;

/// Configuration for the underlying HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Base URL (e.g. "http://127.0.0.1:9098")
    pub base_url: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9098".to_string(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config for a single base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// Configuration for the registry client
#[derive(Clone, Debug)]
pub struct RegistryClientConfig {
    pub http: HttpClientConfig,
    /// Service type whose nodes are listed and deregistered (default: "vpn")
    pub service_type: String,
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
        }
    }
}

impl RegistryClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClientConfig::new(base_url),
            ..Default::default()
        }
    }

    pub fn with_service_type(mut self, service_type: &str) -> Self {
        self.service_type = service_type.to_string();
        self
    }
}

/// Configuration for the local participant control API client
#[derive(Clone, Debug)]
pub struct ParticipantClientConfig {
    pub http: HttpClientConfig,
}

impl Default for ParticipantClientConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::new("http://127.0.0.1:8000"),
        }
    }
}

impl ParticipantClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClientConfig::new(base_url),
        }
    }
}
