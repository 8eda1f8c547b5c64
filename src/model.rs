// Core structs: repository entries, detected tags, errors
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Detected technology tags. Ordered, so rendering is always lexicographic.
pub type TechSet = BTreeSet<String>;

/// Language name -> byte count, as returned by the languages endpoint.
pub type LanguageBreakdown = HashMap<String, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One item of a contents listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Single-file payload of the contents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub name: String,
    pub tech: TechSet,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("no content field for {0}")]
    MissingContent(String),
    #[error("base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid section pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}
