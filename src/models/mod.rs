//! Domain models
//!
//! Rows expose their `uuid` publicly; the numeric rowid and password hashes
//! never leave the process.

pub mod category;
pub mod client;
pub mod product;
pub mod sale;
pub mod user;

pub use category::Category;
pub use client::Client;
pub use product::Product;
pub use sale::Sale;
pub use user::User;
