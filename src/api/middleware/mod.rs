//! Middleware

pub mod layers;
pub mod request_id;
pub mod transaction;

pub use layers::{compression, cors};
pub use request_id::request_id_middleware;
pub use transaction::transaction_middleware;
