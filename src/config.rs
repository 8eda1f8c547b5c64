use crate::github::client::DEFAULT_API_BASE;
use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub owner: String,
    pub repo: String,
}

impl ProjectConfig {
    pub fn new(name: &str, owner: &str, repo: &str) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub html_file: String,
    pub projects: Vec<ProjectConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_BASE.to_string(),
            html_file: "index.html".to_string(),
            projects: default_projects(),
        }
    }
}

fn default_projects() -> Vec<ProjectConfig> {
    vec![
        ProjectConfig::new("Voice AI Pipeline", "thephiltacular", "voice-ai-pipeline"),
        ProjectConfig::new("Open Trading Algorithm", "thephiltacular", "open_trading_algo"),
        ProjectConfig::new("CRUD IAM Playground", "thephiltacular", "crud-iam-playground"),
    ]
}

/// Reads a JSON config. A missing file yields the built-in defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Environment token, when set and non-empty, wins over the file.
pub fn apply_env_token(config: &mut AppConfig, env_token: Option<String>) {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        config.github_token = Some(token);
    }
}

pub fn load_project_config(config: &AppConfig) -> Vec<ProjectConfig> {
    config.projects.clone()
}
