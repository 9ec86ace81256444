//! Request handlers
//!
//! Success bodies are wrapped in a `{"data": ...}` envelope; errors render
//! as `{"message": ...}` through the crate error type.

pub mod auth;
pub mod categories;
pub mod clients;
pub mod products;
pub mod sales;
pub mod users;
