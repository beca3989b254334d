use crate::error::Result;
use crate::registry::AttributeRegistry;
use crate::resolver::UniquenessResolver;
use async_trait::async_trait;
use std::sync::Arc;
use tokenattr_core::{Entity, TokenAttribute, TokenStore};
use tokenattr_generator::{RandomTokenGenerator, TokenGenerator};
use tracing::trace;

/// The hook a host entity framework calls before validating an instance.
#[async_trait]
pub trait BeforeValidation: Send + Sync + 'static {
    /// Fills in every token attribute that needs a value.
    async fn before_validation(&self, entity: &mut dyn Entity) -> Result<()>;
}

/// Whether `definition` needs a new token on `entity`.
///
/// The entity's own `should_generate_token` answer wins when it gives one;
/// otherwise a token is needed when the attribute is blank.
pub fn should_generate<E>(entity: &E, definition: &TokenAttribute) -> bool
where
    E: Entity + ?Sized,
{
    entity
        .should_generate_token(definition)
        .unwrap_or_else(|| entity.attribute(definition.name()).is_blank())
}

/// Drives token generation for registered entity types.
///
/// This service wraps an [`AttributeRegistry`], a [`TokenStore`] and a
/// [`TokenGenerator`]. The host calls [`drive_generation`](Self::drive_generation)
/// (or [`BeforeValidation::before_validation`]) once per validation pass.
#[derive(Debug)]
pub struct TokenAttrs<S, G = RandomTokenGenerator> {
    registry: Arc<AttributeRegistry>,
    resolver: UniquenessResolver<S, G>,
}

impl<S, G> Clone for TokenAttrs<S, G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            resolver: self.resolver.clone(),
        }
    }
}

impl<S: TokenStore> TokenAttrs<S, RandomTokenGenerator> {
    /// Creates a service drawing tokens from the OS random source.
    pub fn new(registry: impl Into<Arc<AttributeRegistry>>, store: S) -> Self {
        Self::with_generator(registry, store, RandomTokenGenerator::new())
    }
}

impl<S: TokenStore, G: TokenGenerator> TokenAttrs<S, G> {
    /// Creates a service with a custom generator.
    pub fn with_generator(
        registry: impl Into<Arc<AttributeRegistry>>,
        store: S,
        generator: G,
    ) -> Self {
        Self::from_parts(registry.into(), UniquenessResolver::new(store, generator))
    }

    pub fn from_parts(registry: Arc<AttributeRegistry>, resolver: UniquenessResolver<S, G>) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &UniquenessResolver<S, G> {
        &self.resolver
    }

    /// Whether the registered `attribute` needs a new token on `entity`.
    ///
    /// Attributes not registered for the entity's type never do.
    pub fn should_generate<E>(&self, entity: &E, attribute: &str) -> bool
    where
        E: Entity + ?Sized,
    {
        self.registry
            .definition(entity.entity_type(), attribute)
            .is_some_and(|definition| should_generate(entity, definition))
    }

    /// Resolves a unique token for the registered `attribute` without
    /// assigning it. Returns `None` when the attribute is not registered.
    pub async fn generate<E>(&self, entity: &E, attribute: &str) -> Result<Option<String>>
    where
        E: Entity + ?Sized,
    {
        let Some(definition) = self.registry.definition(entity.entity_type(), attribute) else {
            return Ok(None);
        };

        self.resolver.resolve(entity, definition).await.map(Some)
    }

    /// Assigns a unique token to every registered attribute that needs one,
    /// in declaration order.
    ///
    /// Stops at the first failure. Attributes assigned before it keep their
    /// new values; the failing attribute is left untouched.
    pub async fn drive_generation<E>(&self, entity: &mut E) -> Result<()>
    where
        E: Entity + ?Sized,
    {
        let definitions = self.registry.definitions(entity.entity_type());

        for definition in definitions {
            if !should_generate(&*entity, definition) {
                trace!(
                    entity_type = %entity.entity_type(),
                    attribute = definition.name(),
                    "keeping existing token"
                );
                continue;
            }

            let token = self.resolver.resolve(&*entity, definition).await?;
            entity.set_attribute(definition.name(), token);
        }

        Ok(())
    }
}

#[async_trait]
impl<S: TokenStore, G: TokenGenerator> BeforeValidation for TokenAttrs<S, G> {
    async fn before_validation(&self, entity: &mut dyn Entity) -> Result<()> {
        self.drive_generation(entity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenAttrError;
    use crate::registry::RegistryBuilder;
    use tokenattr_core::{EntityType, Record, TokenAttrOptions, Value};
    use tokenattr_generator::SequenceGenerator;
    use tokenattr_storage::InMemoryStore;

    static MODELS: EntityType = EntityType::from_static("models");
    static PLAIN: EntityType = EntityType::from_static("plain");

    fn registry(attributes: &[&str]) -> AttributeRegistry {
        let mut builder = RegistryBuilder::new();
        {
            let mut declarations = builder.entity(MODELS.clone());
            for attribute in attributes {
                declarations = declarations
                    .token_attr(*attribute, TokenAttrOptions::default())
                    .unwrap();
            }
        }
        builder.build()
    }

    #[tokio::test]
    async fn fills_blank_attributes() {
        let service = TokenAttrs::new(registry(&["token"]), InMemoryStore::new());
        let mut record = Record::new(MODELS.clone()).with("token", "");

        service.drive_generation(&mut record).await.unwrap();

        let token = record.attribute("token");
        assert!(!token.is_blank());
        assert_eq!(token.as_str().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn keeps_present_values() {
        let service = TokenAttrs::new(registry(&["token"]), InMemoryStore::new());
        let mut record = Record::new(MODELS.clone()).with("token", "not blank");

        service.drive_generation(&mut record).await.unwrap();

        assert_eq!(record.attribute("token"), Value::from("not blank"));
    }

    #[tokio::test]
    async fn unregistered_types_are_untouched() {
        let service = TokenAttrs::new(registry(&["token"]), InMemoryStore::new());
        let mut record = Record::new(PLAIN.clone());

        service.drive_generation(&mut record).await.unwrap();

        assert_eq!(record.attribute("token"), Value::Null);
        assert!(!service.should_generate(&record, "token"));
    }

    #[tokio::test]
    async fn should_generate_follows_the_blank_check() {
        let service = TokenAttrs::new(registry(&["token"]), InMemoryStore::new());

        assert!(service.should_generate(&Record::new(MODELS.clone()), "token"));
        assert!(!service.should_generate(&Record::new(MODELS.clone()).with("token", "x"), "token"));
        assert!(!service.should_generate(&Record::new(MODELS.clone()), "unknown"));
    }

    #[tokio::test]
    async fn generate_does_not_assign() {
        let service = TokenAttrs::with_generator(
            registry(&["token"]),
            InMemoryStore::new(),
            SequenceGenerator::repeat("abcdefgh"),
        );
        let record = Record::new(MODELS.clone());

        assert_eq!(
            service.generate(&record, "token").await.unwrap().as_deref(),
            Some("abcdefgh")
        );
        assert_eq!(service.generate(&record, "other").await.unwrap(), None);
        assert_eq!(record.attribute("token"), Value::Null);
    }

    #[tokio::test]
    async fn failure_leaves_the_attribute_unmodified() {
        let store = InMemoryStore::new();
        store.save(&mut Record::new(MODELS.clone()).with("private_token", "taken"));
        let service = TokenAttrs::with_generator(
            registry(&["token", "private_token"]),
            store,
            SequenceGenerator::new(["fresh", "taken"]),
        );
        let mut record = Record::new(MODELS.clone());

        let err = service.drive_generation(&mut record).await.unwrap_err();

        assert!(matches!(err, TokenAttrError::TooManyAttempts { .. }));
        assert_eq!(record.attribute("token"), Value::from("fresh"));
        assert_eq!(record.attribute("private_token"), Value::Null);
    }

    #[tokio::test]
    async fn usable_as_a_trait_object() {
        let hook: Arc<dyn BeforeValidation> =
            Arc::new(TokenAttrs::new(registry(&["token"]), InMemoryStore::new()));
        let mut record = Record::new(MODELS.clone());

        hook.before_validation(&mut record).await.unwrap();

        assert!(!record.attribute("token").is_blank());
    }
}
