//! Expose obmd's internal API for use in integration tests. It is not meant to
//! be a stable library interface; use `obmd-commonmark` for that.
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
