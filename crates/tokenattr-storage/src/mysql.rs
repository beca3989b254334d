use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::HashMap;
use tokenattr_core::entity::EntityType;
use tokenattr_core::error::{Result, StorageError};
use tokenattr_core::store::{ExistsQuery, TokenStore};
use tokenattr_core::value::Value;

const DEFAULT_ID_COLUMN: &str = "id";
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// MySQL implementation of the store query.
///
/// Each entity type maps to a table, by default a table named after the type.
/// Attribute names are used as column names. Table and column names are
/// validated and backtick-quoted before being interpolated; values are always
/// bound as parameters.
#[derive(Debug, Clone)]
pub struct MySqlTokenStore {
    pool: MySqlPool,
    tables: HashMap<EntityType, String>,
    id_column: String,
}

impl MySqlTokenStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            tables: HashMap::new(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Maps `entity_type` to `table` instead of a table of the same name.
    pub fn with_table(mut self, entity_type: EntityType, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_identifier(&table)?;
        self.tables.insert(entity_type, table);
        Ok(self)
    }

    /// Sets the primary key column used to exclude the instance's own row.
    pub fn with_id_column(mut self, column: impl Into<String>) -> Result<Self> {
        let column = column.into();
        validate_identifier(&column)?;
        self.id_column = column;
        Ok(self)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn table_for<'a>(&'a self, entity_type: &'a EntityType) -> &'a str {
        self.tables
            .get(entity_type)
            .map_or(entity_type.as_str(), String::as_str)
    }
}

fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_IDENTIFIER_LENGTH
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidIdentifier(name.to_string()))
    }
}

/// Builds `SELECT 1 ... LIMIT 1` for the query.
///
/// Placeholders appear in filter order, followed by the excluded id.
/// Null filters render as `IS NULL` and take no placeholder.
fn exists_sql(table: &str, id_column: &str, query: &ExistsQuery) -> Result<String> {
    validate_identifier(table)?;

    let mut conditions = Vec::with_capacity(query.filters.len() + 1);
    for filter in &query.filters {
        validate_identifier(&filter.attribute)?;
        if filter.value.is_null() {
            conditions.push(format!("`{}` IS NULL", filter.attribute));
        } else {
            conditions.push(format!("`{}` = ?", filter.attribute));
        }
    }

    if query.excluding.is_some() {
        validate_identifier(id_column)?;
        conditions.push(format!("`{}` <> ?", id_column));
    }

    let mut sql = format!("SELECT 1 FROM `{}`", table);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" LIMIT 1");
    Ok(sql)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn exists(&self, query: &ExistsQuery) -> Result<bool> {
        let table = self.table_for(&query.entity_type);
        let sql = exists_sql(table, &self.id_column, query)?;

        let mut statement = sqlx::query(&sql);
        for filter in &query.filters {
            statement = match &filter.value {
                Value::Null => statement,
                Value::Integer(n) => statement.bind(*n),
                Value::Text(s) => statement.bind(s.as_str()),
            };
        }
        if let Some(id) = query.excluding {
            statement = statement.bind(id.0);
        }

        let exists = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .is_some();

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenattr_core::entity::EntityId;

    fn models() -> EntityType {
        EntityType::from_static("models")
    }

    #[test]
    fn token_only() {
        let query = ExistsQuery::new(models()).filter("token", "abc");
        assert_eq!(
            exists_sql("models", "id", &query).unwrap(),
            "SELECT 1 FROM `models` WHERE `token` = ? LIMIT 1"
        );
    }

    #[test]
    fn scope_and_exclusion() {
        let query = ExistsQuery::new(models())
            .filter("token", "abc")
            .filter("scope_id", 1)
            .excluding(Some(EntityId(9)));
        assert_eq!(
            exists_sql("models", "id", &query).unwrap(),
            "SELECT 1 FROM `models` WHERE `token` = ? AND `scope_id` = ? AND `id` <> ? LIMIT 1"
        );
    }

    #[test]
    fn null_scope_uses_is_null() {
        let query = ExistsQuery::new(models())
            .filter("token", "abc")
            .filter("scope_id", Value::Null);
        assert_eq!(
            exists_sql("models", "id", &query).unwrap(),
            "SELECT 1 FROM `models` WHERE `token` = ? AND `scope_id` IS NULL LIMIT 1"
        );
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        let query = ExistsQuery::new(models()).filter("token`; DROP TABLE models; --", "x");
        assert!(matches!(
            exists_sql("models", "id", &query),
            Err(StorageError::InvalidIdentifier(_))
        ));

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1models").is_err());
        assert!(validate_identifier(&"a".repeat(65)).is_err());
        assert!(validate_identifier("private_token").is_ok());
    }
}
