//! Extract menu use case: drives a remote extraction job to completion and
//! stores the resulting competitor menu.
//!
//! The job is polled with bounded exponential backoff. Status reports must
//! follow `queued → processing → completed | failed`; anything else aborts.
//! Scoring never waits on this: it only ever sees a finished catalog.

use std::sync::Arc;

use serde::Serialize;

use crate::application::import::dedup_entries;
use crate::domain::entities::competitor_catalog::{CompetitorCatalog, CompetitorProfile};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_source::CatalogStore;
use crate::domain::ports::menu_extractor::MenuExtractor;
use crate::domain::values::extraction::{ExtractionStatus, RetryPolicy};

#[derive(Debug, Serialize)]
pub struct ExtractionReport {
    /// Local correlation id, distinct from the service's job id.
    pub request_id: String,
    pub job_id: String,
    pub extractor: String,
    pub attempts: u32,
    pub status: ExtractionStatus,
    pub catalog: CompetitorCatalog,
    /// Extracted rows left out of the stored menu.
    pub skipped: Vec<String>,
}

pub struct ExtractMenuUseCase {
    extractor: Arc<dyn MenuExtractor>,
    catalog: Arc<dyn CatalogStore>,
    policy: RetryPolicy,
}

impl ExtractMenuUseCase {
    pub fn new(extractor: Arc<dyn MenuExtractor>, catalog: Arc<dyn CatalogStore>, policy: RetryPolicy) -> Self {
        Self {
            extractor,
            catalog,
            policy,
        }
    }

    pub async fn execute(
        &self,
        business_id: &str,
        profile: CompetitorProfile,
        source_url: &str,
    ) -> Result<ExtractionReport, DomainError> {
        if source_url.trim().is_empty() {
            return Err(DomainError::InvalidInput("source url must not be empty".into()));
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        let job_id = self.extractor.submit(source_url).await?;
        tracing::info!(
            request_id = %request_id,
            job_id = %job_id,
            extractor = self.extractor.name(),
            "extraction submitted"
        );

        let mut status = ExtractionStatus::Queued;
        for attempt in 0..self.policy.max_attempts {
            tokio::time::sleep(self.policy.backoff(attempt)).await;

            let poll = match self.extractor.poll(&job_id).await {
                Ok(poll) => poll,
                Err(e) => {
                    tracing::warn!(job_id = %job_id, attempt, error = %e, "extraction poll failed");
                    continue;
                }
            };

            if !status.can_transition_to(poll.status) {
                return Err(DomainError::Extraction(format!(
                    "job {job_id} reported {} after {status}",
                    poll.status
                )));
            }
            status = poll.status;
            tracing::debug!(job_id = %job_id, attempt, status = %status, "extraction polled");

            match status {
                ExtractionStatus::Completed => {
                    let (entries, skipped) = dedup_entries(poll.entries);
                    if !skipped.is_empty() {
                        tracing::warn!(job_id = %job_id, skipped = skipped.len(), "extracted menu repeats entry ids");
                    }
                    let catalog = CompetitorCatalog::from_profile(profile, entries);
                    self.catalog.replace_entries(&catalog.competitor_id, &catalog.entries)?;
                    self.catalog.upsert_competitor(
                        business_id,
                        &CompetitorProfile {
                            competitor_id: catalog.competitor_id.clone(),
                            name: catalog.name.clone(),
                            distance_km: catalog.distance_km,
                        },
                    )?;
                    tracing::info!(
                        job_id = %job_id,
                        competitor = %catalog.competitor_id,
                        entries = catalog.entries.len(),
                        "extraction completed"
                    );
                    return Ok(ExtractionReport {
                        request_id,
                        job_id,
                        extractor: self.extractor.name().to_string(),
                        attempts: attempt + 1,
                        status,
                        catalog,
                        skipped,
                    });
                }
                ExtractionStatus::Failed => {
                    let reason = poll.error.unwrap_or_else(|| "no reason given".into());
                    return Err(DomainError::Extraction(format!("job {job_id} failed: {reason}")));
                }
                ExtractionStatus::Queued | ExtractionStatus::Processing => {}
            }
        }

        Err(DomainError::Extraction(format!(
            "job {job_id} still {status} after {} polls",
            self.policy.max_attempts
        )))
    }
}
