//! Command line handlers for the `repostat` binary.
//!
//! [`run`] wires configuration, validation, and collection together; report
//! formatting lives in [`output`].

use std::io;

use ortho_config::OrthoConfig;
use repostat::stats::{StatisticsCollector, SystemClock, validate};
use repostat::{ReqwestFetcher, RepostatConfig, StatsError};
use tracing::info;

pub mod output;

/// Loads configuration, validates the query, collects statistics, and prints
/// the report.
///
/// # Errors
///
/// Returns the configuration, validation, network, or output failure that
/// stopped the run.
pub fn run() -> Result<(), StatsError> {
    let config = load_config()?;
    let input = config.query_input()?;
    let fetcher = ReqwestFetcher::new(config.timeout()?)?;

    let params = validate(&input, &fetcher)?;
    info!(
        owner = params.locator().owner().as_str(),
        repository = params.locator().repository().as_str(),
        branch = params.branch(),
        "query validated"
    );

    let result = StatisticsCollector::new(&fetcher, SystemClock).collect(&params)?;

    let mut stdout = io::stdout().lock();
    if config.json {
        output::write_json_to(&mut stdout, &result)
    } else {
        output::write_report_to(&mut stdout, &params, &result)
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`StatsError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RepostatConfig, StatsError> {
    RepostatConfig::load().map_err(|error| StatsError::Configuration {
        message: error.to_string(),
    })
}
