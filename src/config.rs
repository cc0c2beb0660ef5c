use crate::error::{FlashcardsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_SOURCE_URL: &str =
    "https://1000mostcommonwords.com/1000-most-common-filipino-words/";
pub const DEFAULT_OUTPUT_PATH: &str = "flashcards.csv";
/// Upper bound on the request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: 30,
            user_agent: format!("flashcards/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FlashcardsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlashcardsError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| FlashcardsError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["flashcards.toml", ".flashcards.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref url) = cli_args.url {
            self.source.url = url.clone();
        }

        if let Some(timeout) = cli_args.timeout {
            self.source.timeout = timeout;
        }

        if let Some(ref user_agent) = cli_args.user_agent {
            self.source.user_agent = user_agent.clone();
        }

        if let Some(ref output_path) = cli_args.output_path {
            self.output.path = output_path.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlashcardsError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)
            .map_err(|e| FlashcardsError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.source.url).map_err(|_| FlashcardsError::InvalidUrl {
            url: self.source.url.clone(),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(FlashcardsError::InvalidUrl {
                url: self.source.url.clone(),
            });
        }

        if self.source.timeout == 0 {
            return Err(FlashcardsError::Config {
                message: "Request timeout must be greater than 0".to_string(),
            });
        }

        if self.source.timeout > MAX_TIMEOUT_SECS {
            return Err(FlashcardsError::Config {
                message: format!(
                    "Request timeout must be at most {} seconds (got {})",
                    MAX_TIMEOUT_SECS, self.source.timeout
                ),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(FlashcardsError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        if self.output.path.is_dir() {
            return Err(FlashcardsError::Config {
                message: format!(
                    "Output path is a directory: {}",
                    self.output.path.display()
                ),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout)
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_output_path(mut self, output_path: Option<PathBuf>) -> Self {
        self.output_path = output_path;
        self
    }
}
