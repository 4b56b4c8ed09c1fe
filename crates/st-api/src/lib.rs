//! Screen-time API service library.
//!
//! Wires the status service facade into an axum router and shapes every
//! response as a hypermedia document.

mod cli;
mod config;
mod error;
pub mod hydra;
mod routes;

pub use cli::Cli;
pub use config::Config;
pub use error::ApiError;
pub use routes::{AppState, router};
