use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

/// Token length used when a definition does not specify one.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;
/// Number of words used by [`Alphabet::Words`] when no length is specified.
pub const DEFAULT_WORD_COUNT: usize = 3;

pub const ALPHABETIC_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMERIC_ALPHABET: &[u8] = b"0123456789";
pub const ALPHANUMERIC_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Prefix marking an explicit character set in the string form.
pub const CHARS_PREFIX: &str = "chars:";

/// The source a token is drawn from.
///
/// Parses from `hex`, `alphabetic`, `numeric`, `alphanumeric` and `words`.
/// A string starting with `chars:` is the explicit set after the prefix, so
/// `chars:numeric` is the set {n,u,m,e,r,i,c}. Any other string is taken as an
/// explicit set as-is. Display adds the prefix only when needed to parse back
/// to the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Alphabet {
    /// Lowercase hex digits derived from random bytes.
    #[default]
    Hex,
    Alphabetic,
    Numeric,
    Alphanumeric,
    /// Words from the generator's fixed word bank, concatenated.
    Words,
    /// An explicit character set; duplicates weight the draw.
    Chars(Vec<char>),
}

impl Alphabet {
    /// Builds an explicit character set from the characters of `set`.
    pub fn chars(set: &str) -> Self {
        Self::Chars(set.chars().collect())
    }

    /// The length applied when a definition leaves it unset.
    pub fn default_length(&self) -> usize {
        match self {
            Alphabet::Words => DEFAULT_WORD_COUNT,
            _ => DEFAULT_TOKEN_LENGTH,
        }
    }

    /// Returns the character pool for character-set alphabets.
    ///
    /// `Hex` and `Words` are not character sets and return `None`.
    pub fn symbols(&self) -> Option<Symbols<'_>> {
        match self {
            Alphabet::Hex | Alphabet::Words => None,
            Alphabet::Alphabetic => Some(Symbols::Ascii(ALPHABETIC_ALPHABET)),
            Alphabet::Numeric => Some(Symbols::Ascii(NUMERIC_ALPHABET)),
            Alphabet::Alphanumeric => Some(Symbols::Ascii(ALPHANUMERIC_ALPHABET)),
            Alphabet::Chars(chars) => Some(Symbols::Chars(chars)),
        }
    }
}

/// A borrowed pool of characters to sample from.
#[derive(Debug, Clone, Copy)]
pub enum Symbols<'a> {
    Ascii(&'static [u8]),
    Chars(&'a [char]),
}

impl Symbols<'_> {
    pub fn len(&self) -> usize {
        match self {
            Symbols::Ascii(bytes) => bytes.len(),
            Symbols::Chars(chars) => chars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the character at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<char> {
        match self {
            Symbols::Ascii(bytes) => bytes.get(index).map(|b| char::from(*b)),
            Symbols::Chars(chars) => chars.get(index).copied(),
        }
    }

    /// Returns the character at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, like slice indexing.
    pub fn at(&self, index: usize) -> char {
        match self {
            Symbols::Ascii(bytes) => char::from(bytes[index]),
            Symbols::Chars(chars) => chars[index],
        }
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            Symbols::Ascii(bytes) => c.is_ascii() && bytes.contains(&(c as u8)),
            Symbols::Chars(chars) => chars.contains(&c),
        }
    }
}

impl FromStr for Alphabet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "hex" => Alphabet::Hex,
            "alphabetic" => Alphabet::Alphabetic,
            "numeric" => Alphabet::Numeric,
            "alphanumeric" => Alphabet::Alphanumeric,
            "words" => Alphabet::Words,
            other => match other.strip_prefix(CHARS_PREFIX) {
                Some(set) => Alphabet::chars(set),
                None => Alphabet::chars(other),
            },
        })
    }
}

impl From<String> for Alphabet {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(alphabet) => alphabet,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Alphabet {
    fn from(value: &str) -> Self {
        Alphabet::from(value.to_owned())
    }
}

impl From<Alphabet> for String {
    fn from(value: Alphabet) -> Self {
        value.to_string()
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alphabet::Hex => f.write_str("hex"),
            Alphabet::Alphabetic => f.write_str("alphabetic"),
            Alphabet::Numeric => f.write_str("numeric"),
            Alphabet::Alphanumeric => f.write_str("alphanumeric"),
            Alphabet::Words => f.write_str("words"),
            Alphabet::Chars(chars) => {
                let set: String = chars.iter().collect();
                let ambiguous = set.starts_with(CHARS_PREFIX)
                    || matches!(
                        set.as_str(),
                        "hex" | "alphabetic" | "numeric" | "alphanumeric" | "words"
                    );
                if ambiguous {
                    f.write_str(CHARS_PREFIX)?;
                }
                for c in chars {
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
        }
    }
}
