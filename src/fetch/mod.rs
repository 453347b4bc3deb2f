//! Fetch module for the Open5e HTTP API
//!
//! This module contains:
//! - HTTP client construction with the configured user agent and timeouts
//! - Single-page requests with error classification
//! - Sequential pagination with a fixed delay between pages

mod client;
mod pages;

pub use client::{build_http_client, user_agent_string};
pub use pages::{endpoint_url, fetch_all_pages, fetch_page, Page};
