pub mod client;
pub mod traits;

pub use client::GitHubClient;
pub use traits::RepoSource;
