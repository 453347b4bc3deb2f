//! Integration tests for Open5e-Harvest
//!
//! Mock HTTP servers (wiremock) stand in for the Open5e API.

mod fetch_tests;
mod harvest_tests;
mod normalize_tests;
