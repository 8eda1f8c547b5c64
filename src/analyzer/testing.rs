// In-memory RepoSource for analyzer tests
use crate::github::RepoSource;
use crate::model::{ClientError, EntryKind, LanguageBreakdown, RepoEntry};
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeRepo {
    entries: Vec<RepoEntry>,
    files: HashMap<String, String>,
    broken_files: HashSet<String>,
    languages: LanguageBreakdown,
    listing_fails: bool,
    languages_fail: bool,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, content: &str) -> Self {
        self.entries.push(RepoEntry {
            name: name.to_string(),
            kind: EntryKind::File,
        });
        self.files.insert(name.to_string(), content.to_string());
        self
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(RepoEntry {
            name: name.to_string(),
            kind: EntryKind::Dir,
        });
        self
    }

    pub fn language(mut self, name: &str, bytes: u64) -> Self {
        self.languages.insert(name.to_string(), bytes);
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn failing_languages(mut self) -> Self {
        self.languages_fail = true;
        self
    }

    pub fn failing_file(mut self, name: &str) -> Self {
        self.broken_files.insert(name.to_string());
        self
    }
}

#[async_trait::async_trait]
impl RepoSource for FakeRepo {
    async fn list_directory(
        &self,
        _owner: &str,
        _repo: &str,
        _path: &str,
    ) -> Result<Vec<RepoEntry>, ClientError> {
        if self.listing_fails {
            return Err(ClientError::MissingContent("/".into()));
        }
        Ok(self.entries.clone())
    }

    async fn fetch_file_content(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<String, ClientError> {
        if self.broken_files.contains(path) {
            return Err(ClientError::MissingContent(path.to_string()));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ClientError::MissingContent(path.to_string()))
    }

    async fn fetch_languages(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> Result<LanguageBreakdown, ClientError> {
        if self.languages_fail {
            return Err(ClientError::MissingContent("languages".into()));
        }
        Ok(self.languages.clone())
    }
}
