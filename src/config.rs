use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Bytes in one mebibyte
pub const MIB: u64 = 1024 * 1024;

/// Configuration for the Evalyn client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis service settings
    pub backend: BackendConfig,

    /// Upload validation settings
    pub upload: UploadConfig,

    /// Local web surface settings
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the analysis service
    pub endpoint: String,

    /// Deadline for each remote call in seconds (unset = wait indefinitely)
    pub timeout_seconds: Option<u64>,

    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted video in bytes
    pub max_file_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:4943/api".to_string(),
            timeout_seconds: None,
            connect_timeout_seconds: 10,
        }
    }
}

impl BackendConfig {
    /// Per-call deadline, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * MIB,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then the environment
    pub fn load() -> Result<Self> {
        let config_paths = [
            "evalyn-client.toml",
            "config/evalyn-client.toml",
            "/etc/evalyn-client/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                match Self::load_from(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config file {}: {}", path, e),
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file, applying environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&config_str)?;
        config.apply_env();
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(endpoint) = std::env::var("EVALYN_BACKEND_URL") {
            self.backend.endpoint = endpoint;
        }

        if let Ok(timeout) = std::env::var("EVALYN_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.backend.timeout_seconds = Some(secs),
                Err(_) => tracing::warn!("Ignoring invalid EVALYN_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(size) = std::env::var("EVALYN_MAX_FILE_SIZE") {
            match size.parse() {
                Ok(bytes) => self.upload.max_file_size = bytes,
                Err(_) => tracing::warn!("Ignoring invalid EVALYN_MAX_FILE_SIZE: {}", size),
            }
        }

        if let Ok(port) = std::env::var("EVALYN_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid EVALYN_PORT: {}", port),
            }
        }

        if let Ok(log_level) = std::env::var("EVALYN_LOG_LEVEL") {
            self.logging.log_level = log_level;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.backend.endpoint)
            .map_err(|e| anyhow!("Invalid backend endpoint {}: {}", self.backend.endpoint, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!("Backend endpoint must use http or https"));
        }

        if self.backend.timeout_seconds == Some(0) {
            return Err(anyhow!("timeout_seconds must be greater than 0 when set"));
        }

        if self.upload.max_file_size == 0 {
            return Err(anyhow!("max_file_size must be greater than 0"));
        }

        if self.server.port == 0 {
            return Err(anyhow!("port must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Evalyn Client Configuration:\n\
            - Backend: {}\n\
            - Request Timeout: {}\n\
            - Max Upload: {} MB\n\
            - Listen: {}:{}",
            self.backend.endpoint,
            self.backend
                .timeout_seconds
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string()),
            self.upload.max_file_size / MIB,
            self.server.host,
            self.server.port,
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.backend.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u64>) -> Self {
        self.config.backend.timeout_seconds = seconds;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.config.upload.max_file_size = bytes;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
