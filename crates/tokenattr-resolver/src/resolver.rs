use crate::error::{Result, TokenAttrError};
use std::sync::Arc;
use tokenattr_core::{Entity, ExistsQuery, TokenAttribute, TokenStore};
use tokenattr_generator::TokenGenerator;
use tracing::{debug, trace, warn};

/// Finds a token for one attribute that no other stored row holds.
///
/// Each attempt generates a candidate and runs one existence query, scoped
/// by the attribute's scope value when configured and excluding the
/// instance's own row once persisted. There is no backoff; the attempt
/// budget is the definition's `max_attempts`.
///
/// The check and the eventual write are not atomic. Two concurrent
/// validations can both see a candidate as free, so stores should enforce a
/// unique constraint as well.
#[derive(Debug)]
pub struct UniquenessResolver<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> Clone for UniquenessResolver<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<S: TokenStore, G: TokenGenerator> UniquenessResolver<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(generator))
    }

    /// Builds a resolver over a store and generator shared with other owners.
    pub fn from_shared(store: Arc<S>, generator: Arc<G>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns a unique token for `definition` on `entity` without assigning it.
    pub async fn resolve<E>(&self, entity: &E, definition: &TokenAttribute) -> Result<String>
    where
        E: Entity + ?Sized,
    {
        let entity_type = entity.entity_type();
        let scope = definition
            .scope()
            .map(|attribute| (attribute, entity.attribute(attribute)));

        let mut attempts = 0;
        loop {
            let candidate = entity.generate_token(definition).unwrap_or_else(|| {
                self.generator
                    .generate(definition.length(), definition.alphabet())
            });
            attempts += 1;

            let mut query = ExistsQuery::new(entity_type.clone())
                .filter(definition.name(), candidate.as_str())
                .excluding(entity.id());
            if let Some((attribute, value)) = &scope {
                query = query.filter(*attribute, value.clone());
            }

            trace!(
                entity_type = %entity_type,
                attribute = definition.name(),
                attempt = attempts,
                "checking token candidate"
            );

            if !self.store.exists(&query).await? {
                debug!(
                    entity_type = %entity_type,
                    attribute = definition.name(),
                    attempts,
                    "resolved unique token"
                );
                return Ok(candidate);
            }

            if attempts >= definition.max_attempts() {
                warn!(
                    entity_type = %entity_type,
                    attribute = definition.name(),
                    attempts,
                    "giving up on token generation"
                );
                return Err(TokenAttrError::TooManyAttempts {
                    attribute: definition.name().to_string(),
                    token: candidate,
                    attempts,
                });
            }

            debug!(
                entity_type = %entity_type,
                attribute = definition.name(),
                attempt = attempts,
                "token candidate collided, retrying"
            );
        }
    }
}
