//! Collision-checked token generation for entity attributes.
//!
//! Declare token attributes per entity type in an [`AttributeRegistry`],
//! then let [`TokenAttrs`] fill them in before each validation pass. Core
//! types are re-exported from `tokenattr_core`.

pub mod error;
pub mod registry;
pub mod resolver;
pub mod service;

pub use error::{Result, TokenAttrError};
pub use registry::{AttributeRegistry, EntityDeclarations, RegistryBuilder};
pub use resolver::UniquenessResolver;
pub use service::{should_generate, BeforeValidation, TokenAttrs};
pub use tokenattr_core::{
    Alphabet, Entity, EntityId, EntityType, Record, TokenAttrOptions, TokenAttribute, TokenStore,
    Value,
};
pub use tokenattr_generator::{RandomTokenGenerator, TokenGenerator};
