//! HTTP implementation of the answer service

use super::types::{Answer, AnswerRequest, AnswerResponse};
use super::{AnswerConfig, AnswerService, ServiceError};
use async_trait::async_trait;
use reqwest::Client;

const ANSWER_PATH: &str = "generar_respuesta";

/// Longest slice of a response body carried into an error message
const MAX_BODY_EXCERPT: usize = 200;

fn body_excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let excerpt: String = chars.by_ref().take(MAX_BODY_EXCERPT).collect();
    if chars.next().is_some() {
        format!("{excerpt}...")
    } else {
        excerpt
    }
}

/// Answer service reached over HTTP with transport defaults
pub struct HttpAnswerService {
    client: Client,
    endpoint: String,
}

impl HttpAnswerService {
    pub fn new(config: &AnswerConfig) -> Self {
        Self::with_client(Client::new(), &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/{ANSWER_PATH}", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, query: &str, k: u32) -> Result<Answer, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnswerRequest { query, k })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    ServiceError::network(format!("Connection failed: {e}"))
                } else {
                    ServiceError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ServiceError::status(format!("HTTP {status}: {}", body_excerpt(&body))));
        }

        let parsed: AnswerResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::malformed(format!(
                "Failed to parse response: {e} - body: {}",
                body_excerpt(&body)
            ))
        })?;

        Ok(parsed.into())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
