//! Core types and traits for token attributes.
//!
//! This crate provides the types shared by the generator, the resolver and
//! the store adapters: attribute values, the entity capability, token
//! attribute definitions and the store query contract.

pub mod alphabet;
pub mod definition;
pub mod entity;
pub mod error;
pub mod store;
pub mod value;

pub use alphabet::{Alphabet, Symbols};
pub use definition::{TokenAttrOptions, TokenAttribute, DEFAULT_MAX_ATTEMPTS};
pub use entity::{Entity, EntityId, EntityType, Record};
pub use error::{DefinitionError, StorageError};
pub use store::{ExistsQuery, Filter, TokenStore};
pub use value::Value;
