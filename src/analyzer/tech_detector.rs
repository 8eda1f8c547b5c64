use crate::github::RepoSource;
use crate::model::{EntryKind, RepoEntry, TechSet};
use crate::patterns::{TECH_TABLE, is_key_file, language_tag};
use tracing::{info, warn};

/// Tags whose patterns match anywhere in `text` (case-insensitive, unanchored).
pub fn match_tags(text: &str) -> TechSet {
    TECH_TABLE
        .iter()
        .filter(|entry| entry.patterns.iter().any(|re| re.is_match(text)))
        .map(|entry| entry.tag.to_string())
        .collect()
}

/// Infers a repository's tech stack from its root listing, key manifests and
/// the languages endpoint.
pub struct TechDetector<'a, S: RepoSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RepoSource + ?Sized> TechDetector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn detect(&self, owner: &str, repo: &str) -> TechSet {
        info!("Analyzing {}/{}...", owner, repo);

        let entries = match self.source.list_directory(owner, repo, "").await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error fetching {}/{}: {}", owner, repo, e);
                Vec::new()
            }
        };

        let mut detected = self.scan_key_files(owner, repo, &entries).await;
        detected.extend(scan_file_names(&entries));
        detected.extend(self.scan_languages(owner, repo).await);
        detected
    }

    async fn scan_key_files(&self, owner: &str, repo: &str, entries: &[RepoEntry]) -> TechSet {
        let mut detected = TechSet::new();
        for entry in entries.iter().filter(|e| is_key_file(&e.name)) {
            match self.source.fetch_file_content(owner, repo, &entry.name).await {
                Ok(content) => detected.extend(match_tags(&content)),
                Err(e) => warn!("Error analyzing {}: {}", entry.name, e),
            }
        }
        detected
    }

    async fn scan_languages(&self, owner: &str, repo: &str) -> TechSet {
        match self.source.fetch_languages(owner, repo).await {
            Ok(languages) => languages
                .keys()
                .filter_map(|lang| language_tag(lang))
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!("Error fetching languages for {}/{}: {}", owner, repo, e);
                TechSet::new()
            }
        }
    }
}

fn scan_file_names(entries: &[RepoEntry]) -> TechSet {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .flat_map(|e| match_tags(&e.name))
        .collect()
}
