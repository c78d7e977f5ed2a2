//! Remote classifier — the backend agent service's interpret-voice endpoint.
//!
//! One POST per call, no retry. The resolver owns the fallback policy, so
//! every failure here is surfaced as a [`ClassifyError`] rather than masked.

use super::types::RawGuess;
use super::Classifier;
use crate::config::IntakeConfig;
use crate::error::ClassifyError;
use async_trait::async_trait;

pub const INTERPRET_PATH: &str = "/openai/interpret-voice";
pub const HEALTH_PATH: &str = "/health";

pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClassifier {
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &IntakeConfig) -> Result<Self, ClassifyError> {
        Self::new(config.api_base_url.clone(), config.remote_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend health endpoint. Any failure reads as "not connected".
    pub async fn check_connection(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                log::info!("[CLASSIFY] Backend reachable at {}", self.base_url);
                true
            }
            Ok(resp) => {
                log::warn!("[CLASSIFY] Backend health returned {}", resp.status());
                false
            }
            Err(e) => {
                log::warn!("[CLASSIFY] Backend unreachable: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Result<RawGuess, ClassifyError> {
        let url = format!("{}{}", self.base_url, INTERPRET_PATH);
        log::info!("[CLASSIFY] POST {} ({} chars)", url, text.chars().count());
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "texto": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| "Error del servidor".to_string());
            log::error!("[CLASSIFY] Remote returned {}: {}", status, body);
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        log::info!("[CLASSIFY] Remote latency: {}ms", start.elapsed().as_millis());

        serde_json::from_str::<RawGuess>(&body).map_err(|e| {
            log::warn!(
                "[CLASSIFY] Failed to parse remote guess: {} — raw: {}",
                e,
                body.chars().take(200).collect::<String>()
            );
            ClassifyError::Malformed(e.to_string())
        })
    }
}
