//! Database layer - sessions, transaction scopes, and repositories

pub mod category;
pub mod client;
pub mod product;
pub mod provider;
pub mod registry;
pub mod sale;
pub mod scope;
pub mod session;
pub mod user;

pub use category::CategoryRepository;
pub use client::ClientRepository;
pub use product::ProductRepository;
pub use provider::Database;
pub use sale::SaleRepository;
pub use scope::TransactionScope;
pub use session::{DbSession, SharedSession};
pub use user::UserRepository;

use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// A data-access handle constructible over any resolved session.
///
/// Repositories are built through [`Database::repository`] so they pick up
/// the scoped session when one is bound for the current operation and the
/// shared pool otherwise. Business logic never reaches the pool directly.
pub trait Repository {
    fn with_session(session: DbSession) -> Self;
}

/// Uuids are stored as hyphenated text.
pub(crate) fn read_uuid(row: &SqliteRow, column: &str) -> crate::Result<Uuid> {
    let raw: String = row.get(column);
    Uuid::parse_str(&raw)
        .map_err(|e| crate::Error::Internal(format!("invalid uuid in column {column}: {e}")))
}
