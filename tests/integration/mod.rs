//! Integration tests for concierge
//!
//! These tests drive the app end to end: script loading, timed playback
//! on a paused clock, keyboard actions, rendering and the CLI.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod playback_flow;
pub mod rendering;
