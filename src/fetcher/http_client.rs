use crate::config::{Config, MAX_TIMEOUT_SECS};
use crate::error::{FlashcardsError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Issues the one GET request a run performs. No retries.
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config.request_timeout();
        // reqwest adds the timeout to `Instant::now()`; an unbounded value overflows.
        if timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(FlashcardsError::Config {
                message: format!(
                    "Request timeout must be at most {} seconds (got {})",
                    MAX_TIMEOUT_SECS,
                    timeout.as_secs()
                ),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.source.user_agent.clone())
            .build()
            .map_err(|e| FlashcardsError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    /// Fetch `url` and return its body as UTF-8 text.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlashcardsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| self.classify(url, e))?;

        String::from_utf8(body.to_vec()).map_err(|e| FlashcardsError::Parse {
            message: format!(
                "response body is not valid UTF-8 (byte offset {})",
                e.utf8_error().valid_up_to()
            ),
        })
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> FlashcardsError {
        if error.is_timeout() {
            return FlashcardsError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            };
        }

        if error.is_builder() {
            return FlashcardsError::InvalidUrl {
                url: url.to_string(),
            };
        }

        FlashcardsError::Network {
            url: url.to_string(),
            message: error_chain(&error),
        }
    }
}

// reqwest's top-level message is generic; the cause carries the detail.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
