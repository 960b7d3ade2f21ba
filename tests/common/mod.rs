//! Shared test utilities for concierge
//!
//! - Fixture scripts and app drivers
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
