use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardsError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request to {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    #[error("Page could not be parsed as HTML: {message}")]
    Parse { message: String },

    #[error("No table found on the page")]
    TableNotFound,

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid source URL: {url}")]
    InvalidUrl { url: String },
}

/// The pipeline step an error came out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Configure,
    Fetch,
    Parse,
    Locate,
    Write,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Configure => "configure",
            PipelineStage::Fetch => "fetch",
            PipelineStage::Parse => "parse",
            PipelineStage::Locate => "locate table",
            PipelineStage::Write => "write",
        };
        f.write_str(name)
    }
}

impl FlashcardsError {
    pub fn stage(&self) -> PipelineStage {
        match self {
            FlashcardsError::Network { .. }
            | FlashcardsError::HttpStatus { .. }
            | FlashcardsError::Timeout { .. } => PipelineStage::Fetch,
            FlashcardsError::Parse { .. } => PipelineStage::Parse,
            FlashcardsError::TableNotFound => PipelineStage::Locate,
            FlashcardsError::Io(_) | FlashcardsError::Csv(_) | FlashcardsError::Write { .. } => {
                PipelineStage::Write
            }
            FlashcardsError::Config { .. } | FlashcardsError::InvalidUrl { .. } => {
                PipelineStage::Configure
            }
        }
    }

    pub fn is_network(&self) -> bool {
        self.stage() == PipelineStage::Fetch
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FlashcardsError {
    fn user_message(&self) -> String {
        match self {
            FlashcardsError::Network { url, message } => {
                format!("Network error while fetching {}: {}", url, message)
            }
            FlashcardsError::HttpStatus { url, status } => {
                format!("Network error: {} answered with HTTP status {}", url, status)
            }
            FlashcardsError::Timeout { url, seconds } => {
                format!("Network error: no response from {} within {} seconds", url, seconds)
            }
            FlashcardsError::Parse { message } => {
                format!("Parse error: {}", message)
            }
            FlashcardsError::TableNotFound => {
                "Could not find a table on the page".to_string()
            }
            FlashcardsError::Write { path, message } => {
                format!("Could not write {}: {}", path, message)
            }
            FlashcardsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            FlashcardsError::InvalidUrl { url } => {
                format!("Invalid source URL: {}", url)
            }
            _ => format!("{} failed: {}", self.stage(), self),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FlashcardsError::Network { .. } => Some(
                "Check your internet connection and that the host name is correct.".to_string()
            ),
            FlashcardsError::HttpStatus { status, .. } if *status == 403 => Some(
                "The server refused the request. Try a browser-like value for --user-agent.".to_string()
            ),
            FlashcardsError::HttpStatus { .. } => Some(
                "Verify the page still exists at that address, or pass a different one with --url.".to_string()
            ),
            FlashcardsError::Timeout { .. } => Some(
                "The server is slow to answer. Try again or increase the limit with --timeout.".to_string()
            ),
            FlashcardsError::Parse { .. } => Some(
                "Only UTF-8 HTML pages are supported.".to_string()
            ),
            FlashcardsError::TableNotFound => Some(
                "The page layout may have changed. Open it in a browser and check that the word list is still an HTML table.".to_string()
            ),
            FlashcardsError::Io(_) | FlashcardsError::Write { .. } => Some(
                "Ensure the output directory exists and you have write permission for it.".to_string()
            ),
            FlashcardsError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            FlashcardsError::InvalidUrl { .. } => Some(
                "Use a full http:// or https:// address.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<url::ParseError> for FlashcardsError {
    fn from(error: url::ParseError) -> Self {
        FlashcardsError::InvalidUrl {
            url: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for FlashcardsError {
    fn from(error: toml::de::Error) -> Self {
        FlashcardsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashcardsError>;
