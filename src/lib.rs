//! college-connect library
//!
//! Client for the College-Connect placement records backend: typed API
//! access, the autocomplete widget, and one controller per dashboard page.
//! The `college-connect` binary renders these in a terminal.

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod pages;
pub mod prompt;
pub mod sort;
pub mod theme;
pub mod ui;
