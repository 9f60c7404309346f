//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, URL, and timeout resolution tests
//! - `query_input`: Conversion into unvalidated query input

mod helpers;
