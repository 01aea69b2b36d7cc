//! Wiring for the `learnhub` binary: configuration, command definitions and
//! the application context that runs them.

pub mod app;
pub mod config;

pub use app::App;
pub use config::{Config, SESSION_PATH_ENV};
