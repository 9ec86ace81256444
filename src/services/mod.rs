//! Business logic services
//!
//! Services resolve a repository per call through [`Database::repository`],
//! so nested calls made inside an open transaction scope all observe the
//! scope's session.
//!
//! [`Database::repository`]: crate::db::Database::repository

pub mod auth;
pub mod category;
pub mod client;
pub mod product;
pub mod sale;
pub mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use client::ClientService;
pub use product::ProductService;
pub use sale::SalesService;
pub use user::UserService;
