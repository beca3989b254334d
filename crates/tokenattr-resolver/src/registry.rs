use std::collections::HashMap;
use tokenattr_core::{DefinitionError, EntityType, TokenAttrOptions, TokenAttribute};
use tracing::debug;

/// Collects token attribute declarations during type definition.
///
/// Declarations append in order and are never deduplicated: declaring the
/// same attribute twice generates it twice.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: HashMap<EntityType, Vec<TokenAttribute>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already validated definition to `entity_type`.
    pub fn register(&mut self, entity_type: EntityType, definition: TokenAttribute) -> &mut Self {
        self.definitions
            .entry(entity_type)
            .or_default()
            .push(definition);
        self
    }

    /// Declarations for a single entity type.
    ///
    /// ```ignore
    /// let mut builder = RegistryBuilder::new();
    /// builder
    ///     .entity(EntityType::from_static("invitations"))
    ///     .token_attr("code", TokenAttrOptions::default())?
    ///     .token_attr("slug", TokenAttrOptions::builder().alphabet("words").build())?;
    /// let registry = builder.build();
    /// ```
    pub fn entity(&mut self, entity_type: EntityType) -> EntityDeclarations<'_> {
        EntityDeclarations {
            builder: self,
            entity_type,
        }
    }

    /// Freezes the declarations.
    pub fn build(self) -> AttributeRegistry {
        for (entity_type, definitions) in &self.definitions {
            debug!(
                entity_type = %entity_type,
                attributes = definitions.len(),
                "registered token attributes"
            );
        }

        AttributeRegistry {
            definitions: self.definitions,
        }
    }
}

/// Declares token attributes on one entity type.
pub struct EntityDeclarations<'a> {
    builder: &'a mut RegistryBuilder,
    entity_type: EntityType,
}

impl EntityDeclarations<'_> {
    /// Declares `attribute` as a token attribute with `options`.
    pub fn token_attr(
        self,
        attribute: impl Into<String>,
        options: TokenAttrOptions,
    ) -> Result<Self, DefinitionError> {
        let definition = TokenAttribute::new(attribute, options)?;
        self.builder.register(self.entity_type.clone(), definition);
        Ok(self)
    }
}

/// Token attribute definitions per entity type, in declaration order.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    definitions: HashMap<EntityType, Vec<TokenAttribute>>,
}

impl AttributeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Definitions for `entity_type`; empty when the type declared none.
    pub fn definitions(&self, entity_type: &EntityType) -> &[TokenAttribute] {
        self.definitions
            .get(entity_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first definition of `attribute` on `entity_type`.
    pub fn definition(&self, entity_type: &EntityType, attribute: &str) -> Option<&TokenAttribute> {
        self.definitions(entity_type)
            .iter()
            .find(|definition| definition.name() == attribute)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.definitions.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenattr_core::Alphabet;

    static MODELS: EntityType = EntityType::from_static("models");
    static OTHERS: EntityType = EntityType::from_static("others");

    #[test]
    fn keeps_declaration_order() {
        let mut builder = RegistryBuilder::new();
        builder
            .entity(MODELS.clone())
            .token_attr("token", TokenAttrOptions::default())
            .unwrap()
            .token_attr("private_token", TokenAttrOptions::default())
            .unwrap();
        let registry = builder.build();

        let names: Vec<_> = registry
            .definitions(&MODELS)
            .iter()
            .map(TokenAttribute::name)
            .collect();
        assert_eq!(names, vec!["token", "private_token"]);
    }

    #[test]
    fn types_are_independent() {
        let mut builder = AttributeRegistry::builder();
        builder
            .entity(MODELS.clone())
            .token_attr("token", TokenAttrOptions::default())
            .unwrap();
        builder
            .entity(OTHERS.clone())
            .token_attr("slug", TokenAttrOptions::builder().alphabet(Alphabet::Words).build())
            .unwrap();
        let registry = builder.build();

        assert_eq!(registry.definitions(&MODELS).len(), 1);
        assert_eq!(
            registry.definition(&OTHERS, "slug").unwrap().alphabet(),
            &Alphabet::Words
        );
        assert!(registry.definition(&MODELS, "slug").is_none());
        assert_eq!(registry.entity_types().count(), 2);
    }

    #[test]
    fn unknown_type_has_no_definitions() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(registry.definitions(&MODELS).is_empty());
    }

    #[test]
    fn duplicate_declarations_are_kept() {
        let mut builder = RegistryBuilder::new();
        let definition = TokenAttribute::new("token", TokenAttrOptions::default()).unwrap();
        builder
            .register(MODELS.clone(), definition.clone())
            .register(MODELS.clone(), definition);

        assert_eq!(builder.build().definitions(&MODELS).len(), 2);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut builder = RegistryBuilder::new();
        let err = builder
            .entity(MODELS.clone())
            .token_attr("token", TokenAttrOptions::builder().length(0).build())
            .err()
            .unwrap();

        assert_eq!(err, DefinitionError::ZeroLength("token".into()));
        assert!(builder.build().definitions(&MODELS).is_empty());
    }
}
