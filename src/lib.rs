//! Storefront API
//!
//! A small retail CRUD server with:
//! - Transaction-scoped data access: every request runs inside one
//!   transaction, and repositories resolved anywhere in its call tree are
//!   bound to the request's session without the session being passed around
//! - Isolation between concurrent operations over a shared worker pool
//! - A test harness that wraps each test in a rolled-back transaction, so
//!   tests never leak writes into each other

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
