// Service exports
pub mod auth;
pub mod import;
pub mod store;

pub use auth::{AdminAuth, AdminClaims, AuthError, IssuedToken};
pub use import::{ColumnMap, ImportError, ImportReport, ParsedImport};
pub use store::{InMemoryStore, Pagination, RecordStore, StoreCounts, StoreError, StudentPage, StudentQuery};
