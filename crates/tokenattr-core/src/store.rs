use crate::entity::{EntityId, EntityType};
use crate::error::Result;
use crate::value::Value;
use async_trait::async_trait;
use std::sync::Arc;

/// An equality condition on a single attribute.
///
/// A [`Value::Null`] filter matches rows where the attribute is null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub attribute: String,
    pub value: Value,
}

/// "Does another row of this type match every filter?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsQuery {
    pub entity_type: EntityType,
    pub filters: Vec<Filter>,
    /// Row to ignore, normally the instance being validated.
    pub excluding: Option<EntityId>,
}

impl ExistsQuery {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            filters: Vec::new(),
            excluding: None,
        }
    }

    pub fn filter(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            attribute: attribute.into(),
            value: value.into(),
        });
        self
    }

    pub fn excluding(mut self, id: Option<EntityId>) -> Self {
        self.excluding = id;
        self
    }
}

/// The store query capability the resolver depends on.
///
/// Implementations run one query per call and report backend failures as
/// [`StorageError`](crate::error::StorageError); they never retry.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Returns `true` if some row other than `query.excluding` has the given
    /// entity type and matches every filter.
    async fn exists(&self, query: &ExistsQuery) -> Result<bool>;
}

#[async_trait]
impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    async fn exists(&self, query: &ExistsQuery) -> Result<bool> {
        (**self).exists(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_filters_in_order() {
        let query = ExistsQuery::new(EntityType::from_static("models"))
            .filter("token", "abc")
            .filter("scope_id", 1)
            .excluding(Some(EntityId(3)));

        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].attribute, "token");
        assert_eq!(query.filters[1].value, Value::Integer(1));
        assert_eq!(query.excluding, Some(EntityId(3)));
    }

    struct AlwaysTaken;

    #[async_trait]
    impl TokenStore for AlwaysTaken {
        async fn exists(&self, _query: &ExistsQuery) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_store() {
        let store: Arc<dyn TokenStore> = Arc::new(AlwaysTaken);
        let query = ExistsQuery::new(EntityType::from_static("models"));
        assert!(store.exists(&query).await.unwrap());
    }
}
