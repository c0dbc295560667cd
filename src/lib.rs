//! `itrack` - Minimal issue tracker
//!
//! This crate provides the `itrack` CLI on top of [`itrack_lib`], which owns
//! the issue model, the store and its persistence.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`app`] - Session shell wiring the store to the form and list view
//! - [`ui`] - Creation form and issue list view
//! - [`config`] - Layered configuration and workspace discovery
//! - [`format`] - Output formatting (text, JSON)
//! - [`error`] - Error types and handling
//! - [`logging`] - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod ui;

pub use cli::run;
pub use error::{ItrackError, Result};
