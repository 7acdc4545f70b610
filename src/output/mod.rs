//! Output module for rendering search results and service status
//!
//! This module handles:
//! - Plain-text reports for terminal use
//! - JSON output for scripts and other programs

mod json;
mod text;

pub use json::to_json;
pub use text::{render_refresh, render_results, render_status};
