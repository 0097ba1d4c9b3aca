use std::env;

pub const DEFAULT_STABILITY_URL: &str = "https://api.stability.ai/v2beta/stable-image/generate/sd3";
pub const DEFAULT_STABILITY_MODEL: &str = "sd3-medium";

#[derive(Debug, Clone)]
pub struct StabilityConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub stability: StabilityConfig,
    pub server: ServerConfig,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        StabilityConfig {
            api_key: None,
            endpoint: DEFAULT_STABILITY_URL.to_string(),
            model: DEFAULT_STABILITY_MODEL.to_string(),
        }
    }
}

impl StabilityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `STABILITY_API_KEY`, `STABILITY_API_URL` and `STABILITY_MODEL`.
    ///
    /// A missing key is not an error here: the client still builds, and every
    /// call fails until a key is configured.
    pub fn from_env() -> Self {
        let api_key = env::var("STABILITY_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let endpoint =
            env::var("STABILITY_API_URL").unwrap_or_else(|_| DEFAULT_STABILITY_URL.to_string());
        let model =
            env::var("STABILITY_MODEL").unwrap_or_else(|_| DEFAULT_STABILITY_MODEL.to_string());

        if api_key.is_none() {
            log::warn!(
                "STABILITY_API_KEY is not set. Image generation will fail until you configure it."
            );
        }

        StabilityConfig {
            api_key,
            endpoint,
            model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        ServerConfig { host, port }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(8080)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stability: StabilityConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            stability: StabilityConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }

    pub fn with_stability(mut self, config: StabilityConfig) -> Self {
        self.stability = config;
        self
    }

    pub fn with_server(mut self, config: ServerConfig) -> Self {
        self.server = config;
        self
    }
}
