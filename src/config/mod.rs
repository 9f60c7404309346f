//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – branch `master`, a 10 second timeout, no metric toggles
//! 2. **Configuration file** – `.repostat.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPOSTAT_URL`, `REPOSTAT_TOKEN`, or
//!    `GITHUB_TOKEN` as a token fallback
//! 4. **Command-line arguments** – `--url`/`-u`, `--token`/`-t`, and friends
//!
//! # Configuration File
//!
//! ```toml
//! url = "https://github.com/octo/repo"
//! token = "ghp_example"
//! begin_date = "01.01.2024"
//! end_date = "31.01.2024"
//! branch = "main"
//! pull_requests = true
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::StatsError;
use crate::github::locator::PersonalAccessToken;
use crate::stats::query::{DEFAULT_BRANCH, MetricSelection, QueryInput};

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use repostat::RepostatConfig;
///
/// let config = RepostatConfig::load().expect("failed to load configuration");
/// let input = config.query_input().expect("URL and token required");
/// assert!(!input.branch.is_empty());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPOSTAT",
    discovery(
        dotfile_name = ".repostat.toml",
        config_file_name = "repostat.toml",
        app_name = "repostat"
    )
)]
pub struct RepostatConfig {
    /// Repository web URL, for example `https://github.com/octo/repo`.
    ///
    /// Can be provided via:
    /// - CLI: `--url <URL>` or `-u <URL>`
    /// - Environment: `REPOSTAT_URL`
    /// - Config file: `url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub url: Option<String>,

    /// API key for the hosting provider.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPOSTAT_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Inclusive start of the analysis window, as `dd.mm.yyyy`.
    #[ortho_config(cli_short = 'b')]
    pub begin_date: Option<String>,

    /// Inclusive end of the analysis window, as `dd.mm.yyyy`.
    #[ortho_config(cli_short = 'e')]
    pub end_date: Option<String>,

    /// Branch whose commits and pull requests are analysed.
    #[ortho_config()]
    pub branch: String,

    /// Collects the commit author tally.
    #[ortho_config()]
    pub commits: bool,

    /// Collects open, closed, and old pull request counts.
    #[ortho_config()]
    pub pull_requests: bool,

    /// Collects open, closed, and old issue counts.
    #[ortho_config()]
    pub issues: bool,

    /// Connect and read deadline for each request, in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Prints the result set as JSON instead of the text report.
    #[ortho_config()]
    pub json: bool,
}

impl Default for RepostatConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            begin_date: None,
            end_date: None,
            branch: DEFAULT_BRANCH.to_owned(),
            commits: false,
            pull_requests: false,
            issues: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            json: false,
        }
    }
}

impl RepostatConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, StatsError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(StatsError::MissingToken)?;
        PersonalAccessToken::new(raw)
    }

    /// Returns the repository URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Configuration`] when no URL is configured.
    pub fn require_url(&self) -> Result<&str, StatsError> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StatsError::Configuration {
                message: "repository URL is required (use --url or -u)".to_owned(),
            })
    }

    /// Metric groups requested through the toggles, before the "none means
    /// all" rule is applied.
    #[must_use]
    pub const fn metric_selection(&self) -> MetricSelection {
        MetricSelection {
            commits: self.commits,
            pull_requests: self.pull_requests,
            issues: self.issues,
        }
    }

    /// Per-request deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Configuration`] when the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, StatsError> {
        if self.timeout_seconds == 0 {
            return Err(StatsError::Configuration {
                message: "timeout_seconds must be greater than zero".to_owned(),
            });
        }
        Ok(Duration::from_secs(self.timeout_seconds))
    }

    /// Converts the configuration into unvalidated query input.
    ///
    /// Blank date strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Configuration`] when the URL is missing and
    /// [`StatsError::MissingToken`] when no token is available.
    pub fn query_input(&self) -> Result<QueryInput, StatsError> {
        let url = self.require_url()?;
        let token = self.resolve_token()?;
        let branch = if self.branch.trim().is_empty() {
            DEFAULT_BRANCH.to_owned()
        } else {
            self.branch.trim().to_owned()
        };

        Ok(QueryInput {
            url: url.trim().to_owned(),
            token,
            begin_date: non_blank(self.begin_date.as_deref()),
            end_date: non_blank(self.end_date.as_deref()),
            branch,
            metrics: self.metric_selection().or_all(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests;
