// Analyzer module: tech detection and README descriptions per project.

pub mod description;
pub mod tech_detector;
#[cfg(test)]
pub mod testing;

pub use description::DescriptionExtractor;
pub use tech_detector::TechDetector;

use crate::config::ProjectConfig;
use crate::github::RepoSource;
use crate::model::ProjectReport;
use tracing::info;

/// Runs detection for every project, then description extraction, in order.
pub async fn analyze_projects<S: RepoSource + ?Sized>(
    source: &S,
    projects: &[ProjectConfig],
) -> Vec<ProjectReport> {
    let detector = TechDetector::new(source);
    let extractor = DescriptionExtractor::new(source);

    let mut reports = Vec::with_capacity(projects.len());
    for project in projects {
        let tech = detector.detect(&project.owner, &project.repo).await;
        info!("{}: {}", project.name, tech.iter().cloned().collect::<Vec<_>>().join(", "));
        reports.push(ProjectReport {
            name: project.name.clone(),
            tech,
            description: String::new(),
        });
    }

    for (project, report) in projects.iter().zip(reports.iter_mut()) {
        report.description = extractor.extract(&project.owner, &project.repo).await;
        if !report.description.is_empty() {
            info!("{} description: {}", project.name, report.description);
        }
    }

    reports
}
