use crate::alphabet::Alphabet;
use crate::error::DefinitionError;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Number of candidates tried before giving up on an attribute.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Options accepted when declaring a token attribute.
///
/// Every field is optional. Deserializes from config with the same defaults
/// as the builder:
///
/// ```ignore
/// let options = TokenAttrOptions::builder()
///     .length(13)
///     .alphabet("alphanumeric")
///     .scope("scope_id")
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenAttrOptions {
    /// Token length; characters for character sets, words for `words`.
    #[builder(default, setter(strip_option))]
    pub length: Option<usize>,
    #[builder(default, setter(into))]
    pub alphabet: Alphabet,
    /// Sibling attribute that partitions the uniqueness check.
    #[builder(default, setter(strip_option, into))]
    pub scope: Option<String>,
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for TokenAttrOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A validated token attribute declaration.
///
/// Immutable once built and shared by every instance of the declaring type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAttribute {
    name: String,
    length: usize,
    alphabet: Alphabet,
    scope: Option<String>,
    max_attempts: usize,
}

impl TokenAttribute {
    pub fn new(
        name: impl Into<String>,
        options: TokenAttrOptions,
    ) -> std::result::Result<Self, DefinitionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DefinitionError::BlankAttribute);
        }

        let length = options
            .length
            .unwrap_or_else(|| options.alphabet.default_length());
        if length == 0 {
            return Err(DefinitionError::ZeroLength(name));
        }

        if options.max_attempts == 0 {
            return Err(DefinitionError::ZeroAttempts(name));
        }

        if options
            .alphabet
            .symbols()
            .is_some_and(|symbols| symbols.is_empty())
        {
            return Err(DefinitionError::EmptyAlphabet(name));
        }

        Ok(Self {
            name,
            length,
            alphabet: options.alphabet,
            scope: options.scope,
            max_attempts: options.max_attempts,
        })
    }

    /// The attribute the token is written to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let def = TokenAttribute::new("token", TokenAttrOptions::default()).unwrap();

        assert_eq!(def.name(), "token");
        assert_eq!(def.length(), 8);
        assert_eq!(def.alphabet(), &Alphabet::Hex);
        assert_eq!(def.scope(), None);
        assert_eq!(def.max_attempts(), 5);
    }

    #[test]
    fn words_default_to_three() {
        let options = TokenAttrOptions::builder().alphabet(Alphabet::Words).build();
        let def = TokenAttribute::new("token", options).unwrap();
        assert_eq!(def.length(), 3);
    }

    #[test]
    fn explicit_options() {
        let options = TokenAttrOptions::builder()
            .length(13)
            .alphabet("abc123")
            .scope("scope_id")
            .max_attempts(10)
            .build();
        let def = TokenAttribute::new("token", options).unwrap();

        assert_eq!(def.length(), 13);
        assert_eq!(def.alphabet(), &Alphabet::chars("abc123"));
        assert_eq!(def.scope(), Some("scope_id"));
        assert_eq!(def.max_attempts(), 10);
    }

    #[test]
    fn rejects_zero_length() {
        let options = TokenAttrOptions::builder().length(0).build();
        assert_eq!(
            TokenAttribute::new("token", options),
            Err(DefinitionError::ZeroLength("token".into()))
        );
    }

    #[test]
    fn rejects_zero_attempts() {
        let options = TokenAttrOptions::builder().max_attempts(0).build();
        assert_eq!(
            TokenAttribute::new("token", options),
            Err(DefinitionError::ZeroAttempts("token".into()))
        );
    }

    #[test]
    fn rejects_empty_alphabet() {
        let options = TokenAttrOptions::builder().alphabet("").build();
        assert_eq!(
            TokenAttribute::new("token", options),
            Err(DefinitionError::EmptyAlphabet("token".into()))
        );
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            TokenAttribute::new(" ", TokenAttrOptions::default()),
            Err(DefinitionError::BlankAttribute)
        );
    }

    #[test]
    fn options_from_config() {
        let options: TokenAttrOptions =
            serde_json::from_str(r#"{"length": 4, "alphabet": "words"}"#).unwrap();
        assert_eq!(options.length, Some(4));
        assert_eq!(options.alphabet, Alphabet::Words);
        assert_eq!(options.max_attempts, DEFAULT_MAX_ATTEMPTS);

        let err = serde_json::from_str::<TokenAttrOptions>(r#"{"size": 4}"#);
        assert!(err.is_err());
    }
}
