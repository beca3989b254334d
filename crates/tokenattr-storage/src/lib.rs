//! Store adapters answering the uniqueness query for token attributes.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryStore;
pub use mysql::MySqlTokenStore;
pub use tokenattr_core::error::{Result, StorageError};
pub use tokenattr_core::store::{ExistsQuery, Filter, TokenStore};
