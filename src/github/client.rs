use crate::github::traits::RepoSource;
use crate::model::{ClientError, FileContent, LanguageBreakdown, RepoEntry};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("stack-sniper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path)
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        debug!("GET {}", url);
        let response = self.request(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Decodes a contents payload. GitHub wraps the base64 body at 60 columns.
pub fn decode_content(encoded: &str) -> Result<String, ClientError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[async_trait::async_trait]
impl RepoSource for GitHubClient {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RepoEntry>, ClientError> {
        self.get_json(&self.contents_url(owner, repo, path)).await
    }

    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, ClientError> {
        let file: FileContent = self.get_json(&self.contents_url(owner, repo, path)).await?;
        let encoded = file
            .content
            .ok_or_else(|| ClientError::MissingContent(path.to_string()))?;
        decode_content(&encoded)
    }

    async fn fetch_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<LanguageBreakdown, ClientError> {
        let url = format!("{}/repos/{}/{}/languages", self.base_url, owner, repo);
        self.get_json(&url).await
    }
}
