//! Client for the homework review API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::io::HttpClient;
use crate::HomeworkBotError;

/// Source of raw review API answers
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ReviewApi: Send + Sync {
    /// Fetch every status change since `from_date` (Unix seconds)
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Authenticated client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        tracing::debug!("Requesting {} from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| HomeworkBotError::Transport {
                endpoint: self.endpoint.clone(),
                reason: match e {
                    HomeworkBotError::Http(msg) => msg,
                    other => other.to_string(),
                },
            })?;

        if response.status != 200 {
            tracing::debug!(
                "Non-200 response from {}: status={}",
                self.endpoint,
                response.status
            );
            return Err(HomeworkBotError::HttpStatus {
                endpoint: self.endpoint.clone(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| HomeworkBotError::MalformedBody(e.to_string()))
    }
}
