use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::menu_extractor::{ExtractionPoll, MenuExtractor};
use crate::domain::values::extraction::ExtractionStatus;
use async_trait::async_trait;
use std::time::Duration;

/// Client for a menu-extraction service exposing
/// `POST /extractions` and `GET /extractions/{job_id}`.
pub struct HttpMenuExtractor {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpMenuExtractor {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::builder()
                .user_agent("PriceLens/0.1")
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct SubmitRequest<'a> {
    url: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct SubmitResponse {
    job_id: String,
}

#[derive(Debug, serde::Deserialize)]
struct JobResponse {
    status: String,
    #[serde(default)]
    entries: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Keep the entries that validate; a bad row from the extractor should not
/// sink the whole menu.
fn parse_entries(raw: Vec<serde_json::Value>) -> Vec<MenuEntry> {
    raw.into_iter()
        .filter_map(|v| match serde_json::from_value::<MenuEntry>(v) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed extracted entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl MenuExtractor for HttpMenuExtractor {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, source_url: &str) -> Result<String, DomainError> {
        let resp = self
            .authorize(self.client.post(format!("{}/extractions", self.base_url)))
            .json(&SubmitRequest { url: source_url })
            .send()
            .await
            .map_err(|e| DomainError::Extraction(format!("submit failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Extraction(format!("submit returned HTTP {}", resp.status())));
        }

        let body: SubmitResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("submit response: {e}")))?;
        Ok(body.job_id)
    }

    async fn poll(&self, job_id: &str) -> Result<ExtractionPoll, DomainError> {
        let resp = self
            .authorize(self.client.get(format!("{}/extractions/{}", self.base_url, job_id)))
            .send()
            .await
            .map_err(|e| DomainError::Extraction(format!("poll failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Extraction(format!("poll returned HTTP {}", resp.status())));
        }

        let body: JobResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("poll response: {e}")))?;
        let status: ExtractionStatus = body.status.parse().map_err(DomainError::Parse)?;

        Ok(ExtractionPoll {
            status,
            entries: parse_entries(body.entries),
            error: body.error,
        })
    }
}
