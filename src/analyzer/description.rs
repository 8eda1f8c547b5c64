use crate::github::RepoSource;
use crate::patterns::README_CANDIDATES;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

const MIN_LINE_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#.*$").expect("header pattern"));
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("fence pattern"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("inline code pattern"));
static SYMBOLS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*$").expect("symbols pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Pulls a one-sentence summary out of a repository README.
pub struct DescriptionExtractor<'a, S: RepoSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RepoSource + ?Sized> DescriptionExtractor<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn extract(&self, owner: &str, repo: &str) -> String {
        info!("Fetching description for {}/{}...", owner, repo);

        let readme = self.fetch_readme(owner, repo).await;
        extract_description_from_readme(&readme)
    }

    /// First README variant that can be fetched, or an empty string.
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> String {
        for candidate in README_CANDIDATES {
            match self.source.fetch_file_content(owner, repo, candidate).await {
                Ok(content) => return content,
                Err(e) => debug!("{} not usable for {}/{}: {}", candidate, owner, repo, e),
            }
        }
        String::new()
    }
}

pub fn extract_description_from_readme(readme: &str) -> String {
    if readme.is_empty() {
        return String::new();
    }

    let text = HEADER_LINE.replace_all(readme, "");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| is_prose(line))
        .map(clean_line)
        .unwrap_or_default()
}

fn is_prose(line: &str) -> bool {
    line.chars().count() > MIN_LINE_CHARS
        && !line.starts_with('[')
        && !line.starts_with('!')
        && !line.starts_with('-')
        && !SYMBOLS_ONLY.is_match(line)
        && !line.to_lowercase().contains("http")
}

fn clean_line(line: &str) -> String {
    let untagged = HTML_TAG.replace_all(line, "");
    let plain = html_escape::decode_html_entities(&untagged);
    let collapsed = WHITESPACE_RUN.replace_all(&plain, " ");
    truncate(collapsed.trim())
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }
    let keep = MAX_DESCRIPTION_CHARS - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::testing::FakeRepo;

    const SENTENCE: &str = "A small service that turns voice notes into tidy meeting summaries.";

    #[test]
    fn clean_sentence_is_returned_unchanged() {
        let line = "This plain sentence runs past fifty characters with no markup.";
        assert!(line.len() > 50);
        assert_eq!(extract_description_from_readme(line), line);
    }

    #[test]
    fn empty_readme_gives_empty_description() {
        assert_eq!(extract_description_from_readme(""), "");
    }

    #[test]
    fn skips_lines_that_do_not_look_like_prose() {
        let readme = format!(
            "Too short to count.\n\
             [![build](badge.svg)](ci) a badge line that is long enough to pass length\n\
             ![screenshot](docs/screen.png) image line that is long enough to pass\n\
             - a list item that is certainly longer than fifty characters in total\n\
             ===========================================================\n\
             Docs live at HTTPS://example.org and this line is long enough too\n\
             {SENTENCE}\n"
        );

        assert_eq!(extract_description_from_readme(&readme), SENTENCE);
    }

    #[test]
    fn headers_and_code_are_removed() {
        let readme = format!(
            "# A heading that is long enough to be picked if it were not removed\n\
             ```bash\n\
             cargo install a-very-long-command-line-that-would-otherwise-qualify-here\n\
             ```\n\
             Run `this inline snippet which alone pushes the line past fifty` now.\n\
             {SENTENCE}\n"
        );

        assert_eq!(extract_description_from_readme(&readme), SENTENCE);
    }

    #[test]
    fn html_tags_are_stripped_and_entities_decoded() {
        let readme = "<p align=\"center\">Keeps portfolio pages <b>in sync</b> &amp; tidy with GitHub</p>";

        assert_eq!(
            extract_description_from_readme(readme),
            "Keeps portfolio pages in sync & tidy with GitHub"
        );
    }

    #[test]
    fn unclosed_angle_bracket_keeps_the_rest_of_the_line() {
        let line = "Proves that a<b holds for every pair in the sorted output of the merge step.";

        assert_eq!(extract_description_from_readme(line), line);
    }

    #[test]
    fn whitespace_runs_collapse() {
        let readme = "An   analyzer\tthat reads   repositories and reports what they use.";

        assert_eq!(
            extract_description_from_readme(readme),
            "An analyzer that reads repositories and reports what they use."
        );
    }

    #[test]
    fn long_line_is_truncated_with_ellipsis() {
        let line = "abcdefghij".repeat(25);
        let result = extract_description_from_readme(&line);

        assert_eq!(result.chars().count(), 200);
        assert!(result.ends_with("..."));
        assert_eq!(&result[..197], &line[..197]);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let line = "é".repeat(250);
        let result = extract_description_from_readme(&line);

        assert_eq!(result.chars().count(), 200);
        assert!(result.starts_with(&"é".repeat(197)));
    }

    #[test]
    fn no_qualifying_line_gives_empty() {
        assert_eq!(extract_description_from_readme("# Title\n\nshort\n- item\n"), "");
    }

    #[tokio::test]
    async fn first_available_readme_variant_wins() {
        let repo = FakeRepo::new()
            .file("readme.md", SENTENCE)
            .file("README.txt", "Another description line that is long enough to qualify here.");

        let description = DescriptionExtractor::new(&repo).extract("acme", "voice").await;

        assert_eq!(description, SENTENCE);
    }

    #[tokio::test]
    async fn broken_readme_falls_through_to_next_variant() {
        let repo = FakeRepo::new()
            .file("README.md", "ignored")
            .failing_file("README.md")
            .file("readme.txt", SENTENCE);

        let description = DescriptionExtractor::new(&repo).extract("acme", "voice").await;

        assert_eq!(description, SENTENCE);
    }

    #[tokio::test]
    async fn empty_readme_still_ends_the_fallback_chain() {
        let repo = FakeRepo::new()
            .file("README.md", "")
            .file("readme.md", SENTENCE);

        let description = DescriptionExtractor::new(&repo).extract("acme", "voice").await;

        assert!(description.is_empty());
    }

    #[tokio::test]
    async fn missing_readme_gives_empty_description() {
        let repo = FakeRepo::new().file("main.go", "package main");

        let description = DescriptionExtractor::new(&repo).extract("acme", "bare").await;

        assert!(description.is_empty());
    }
}
