//! HR directory and document comments REST API.
//!
//! Construct an [`AppState`] from a [`config::AppConfig`] and a connected
//! [`database::Database`], then serve [`routes::app`].

pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
