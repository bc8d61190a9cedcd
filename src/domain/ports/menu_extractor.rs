use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::error::DomainError;
use crate::domain::values::extraction::ExtractionStatus;
use async_trait::async_trait;

/// Snapshot of a remote extraction job.
#[derive(Debug, Clone)]
pub struct ExtractionPoll {
    pub status: ExtractionStatus,
    /// Present once the job has completed.
    pub entries: Vec<MenuEntry>,
    pub error: Option<String>,
}

/// Remote service that turns a menu page or document into menu entries.
#[async_trait]
pub trait MenuExtractor: Send + Sync {
    fn name(&self) -> &str;

    /// Start a job and return its id.
    async fn submit(&self, source_url: &str) -> Result<String, DomainError>;

    async fn poll(&self, job_id: &str) -> Result<ExtractionPoll, DomainError>;
}
