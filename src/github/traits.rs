use crate::model::{ClientError, LanguageBreakdown, RepoEntry};

/// Read-only view of a hosted repository.
#[async_trait::async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RepoEntry>, ClientError>;

    /// Decoded text of a single file.
    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, ClientError>;

    async fn fetch_languages(&self, owner: &str, repo: &str)
    -> Result<LanguageBreakdown, ClientError>;
}
