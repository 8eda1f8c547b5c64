// Rewrites project cards in the portfolio page by text search; first match wins.
use crate::model::{TechSet, UpdateError};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const TECH_OPEN: &str = r#"<div class="project-tech">"#;
const TECH_CLOSE: &str = "</div>";
const DESCRIPTION_OPEN: &str = r#"<p class="project-description">"#;
const DESCRIPTION_CLOSE: &str = "</p>";

const TAG_INDENT: &str = "                                ";
const CLOSE_INDENT: &str = "                            ";

/// Result of one pass over the document.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub html: String,
    pub updated: Vec<String>,
}

fn section_pattern(project: &str, open: &str, close: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?s)(<div class="project-card">.*?<h3>{}</h3>.*?{}).*?({})"#,
        regex::escape(project),
        regex::escape(open),
        regex::escape(close),
    ))
}

/// Replaces the body of the matched section, keeping its opening and closing markers.
fn replace_section(
    html: &str,
    project: &str,
    open: &str,
    close: &str,
    body: &str,
) -> Result<Option<String>, UpdateError> {
    let pattern = section_pattern(project, open, close)?;
    let Some(caps) = pattern.captures(html) else {
        debug!("No {} section for {}", open, project);
        return Ok(None);
    };

    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let prefix = caps.get(1).map_or("", |m| m.as_str());
    let suffix = caps.get(2).map_or("", |m| m.as_str());

    let mut out = String::with_capacity(html.len() + body.len());
    out.push_str(&html[..whole.start]);
    out.push_str(prefix);
    out.push_str(body);
    out.push_str(suffix);
    out.push_str(&html[whole.end..]);
    Ok(Some(out))
}

fn render_tags(tech: &TechSet) -> String {
    let spans: Vec<String> = tech
        .iter()
        .map(|tag| format!(r#"{TAG_INDENT}<span class="tech-tag">{tag}</span>"#))
        .collect();
    format!("{}\n{}", spans.join("\n"), CLOSE_INDENT)
}

pub fn apply_tech_tags<'a, I>(html: &str, projects: I) -> Result<Rewrite, UpdateError>
where
    I: IntoIterator<Item = (&'a str, &'a TechSet)>,
{
    let mut current = html.to_string();
    let mut updated = Vec::new();

    for (project, tech) in projects {
        if let Some(next) = replace_section(&current, project, TECH_OPEN, TECH_CLOSE, &render_tags(tech))? {
            current = next;
            updated.push(project.to_string());
        }
    }

    Ok(Rewrite { html: current, updated })
}

pub fn apply_descriptions<'a, I>(html: &str, projects: I) -> Result<Rewrite, UpdateError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut current = html.to_string();
    let mut updated = Vec::new();

    for (project, description) in projects {
        if description.is_empty() {
            continue;
        }
        let body = html_escape::encode_text(description);
        if let Some(next) =
            replace_section(&current, project, DESCRIPTION_OPEN, DESCRIPTION_CLOSE, &body)?
        {
            current = next;
            updated.push(project.to_string());
        }
    }

    Ok(Rewrite { html: current, updated })
}

fn rewrite_file<F>(path: &Path, apply: F) -> Result<Vec<String>, UpdateError>
where
    F: FnOnce(&str) -> Result<Rewrite, UpdateError>,
{
    let original = fs::read_to_string(path)?;
    let rewrite = apply(&original)?;
    if !rewrite.updated.is_empty() {
        fs::write(path, &rewrite.html)?;
    }
    Ok(rewrite.updated)
}

/// One read-modify-write cycle over the tag containers.
pub fn update_tech_tags<'a, I>(path: &Path, projects: I) -> Result<usize, UpdateError>
where
    I: IntoIterator<Item = (&'a str, &'a TechSet)>,
{
    let updated = rewrite_file(path, |html| apply_tech_tags(html, projects))?;
    for project in &updated {
        info!("Updated tech tags for {}", project);
    }
    info!("Tech tags: {} project(s) updated in {}", updated.len(), path.display());
    Ok(updated.len())
}

/// One read-modify-write cycle over the description paragraphs.
pub fn update_descriptions<'a, I>(path: &Path, projects: I) -> Result<usize, UpdateError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let updated = rewrite_file(path, |html| apply_descriptions(html, projects))?;
    for project in &updated {
        info!("Updated description for {}", project);
    }
    info!("Descriptions: {} project(s) updated in {}", updated.len(), path.display());
    Ok(updated.len())
}
