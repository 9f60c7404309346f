//! Support modules for the statistics BDD tests.

pub(crate) mod domain;
pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use domain::{CalendarDay, RecordCount};
pub(crate) use harness::{collection_path, numbered_page, state_page, validation_probes};
pub(crate) use state::{StatisticsState, edit_input, mount, run_statistics, server_uri};
