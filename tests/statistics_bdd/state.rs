//! Scenario state and the validate-then-collect run for the statistics BDD
//! tests.

use std::time::Duration;

use chrono::NaiveDate;
use repostat::stats::FixedClock;
use repostat::{QueryInput, ReqwestFetcher, ResultSet, StatisticsCollector, StatsError, validate};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::{Mock, MockServer};

use super::runtime::{SharedRuntime, mount_all};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(ScenarioState, Default)]
pub(crate) struct StatisticsState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) input: Slot<QueryInput>,
    pub(crate) today: Slot<NaiveDate>,
    pub(crate) result: Slot<ResultSet>,
    pub(crate) error: Slot<StatsError>,
}

/// Registers mocks on the scenario's server, starting it if needed.
pub(crate) fn mount(state: &StatisticsState, mocks: Vec<Mock>) {
    mount_all(&state.runtime, &state.server, mocks)
        .unwrap_or_else(|error| panic!("failed to mount mocks: {error}"));
}

/// Base URI of the scenario's mock server.
pub(crate) fn server_uri(state: &StatisticsState) -> String {
    state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server not initialised"))
}

/// Applies `change` to the pending query input.
pub(crate) fn edit_input(state: &StatisticsState, change: impl FnOnce(&mut QueryInput)) {
    let mut input = state
        .input
        .take()
        .unwrap_or_else(|| panic!("query input missing"));
    change(&mut input);
    state.input.set(input);
}

/// Validates the pending input and collects the requested statistics.
pub(crate) fn run_statistics(state: &StatisticsState) -> Result<ResultSet, StatsError> {
    let input = state.input.get().ok_or_else(|| StatsError::Configuration {
        message: "query input missing".to_owned(),
    })?;
    let today = state.today.get().ok_or_else(|| StatsError::Configuration {
        message: "scenario date missing".to_owned(),
    })?;

    let fetcher = ReqwestFetcher::new(REQUEST_TIMEOUT)?;
    let params = validate(&input, &fetcher)?;
    StatisticsCollector::new(&fetcher, FixedClock(today)).collect(&params)
}
