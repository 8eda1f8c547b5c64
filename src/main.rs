mod analyzer;
mod config;
mod github;
mod model;
mod patterns;
mod updater;

use analyzer::analyze_projects;
use config::{AppConfig, TOKEN_ENV, apply_env_token, load_config, load_project_config};
use github::GitHubClient;
use model::ProjectReport;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config.json";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let mut config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}; using built-in projects", config_path, e);
            AppConfig::default()
        }
    };
    apply_env_token(&mut config, std::env::var(TOKEN_ENV).ok());

    let client = match GitHubClient::new(&config.api_base_url, config.github_token.clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let projects = load_project_config(&config);
    info!("Projects to analyze: {}", projects.len());
    let reports = analyze_projects(&client, &projects).await;

    update_page(Path::new(&config.html_file), &reports);
}

/// Folds the reports into the page: tags first, then descriptions.
/// Returns the number of cards updated per cycle, or `None` if the page is missing.
fn update_page(html_file: &Path, reports: &[ProjectReport]) -> Option<(usize, usize)> {
    if !html_file.exists() {
        warn!("HTML file '{}' not found!", html_file.display());
        return None;
    }

    let tags = reports.iter().map(|r| (r.name.as_str(), &r.tech));
    let tagged = updater::update_tech_tags(html_file, tags).unwrap_or_else(|e| {
        error!("Tech tag update failed: {}", e);
        0
    });

    let descriptions = reports
        .iter()
        .map(|r| (r.name.as_str(), r.description.as_str()));
    let described = updater::update_descriptions(html_file, descriptions).unwrap_or_else(|e| {
        error!("Description update failed: {}", e);
        0
    });

    Some((tagged, described))
}
