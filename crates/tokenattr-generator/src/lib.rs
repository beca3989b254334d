pub mod random;
pub mod seq;
pub mod words;

pub use random::{OsRandom, RandomSource, SeededRandom};
pub use seq::SequenceGenerator;
pub use words::WORDS_BANK;

use tokenattr_core::{Alphabet, Symbols};

/// Trait for generating candidate tokens.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is checked by the caller.
pub trait TokenGenerator: Send + Sync + 'static {
    /// Generates a token of `length` units drawn from `alphabet`.
    ///
    /// `alphabet` must not be an empty character set. Validated definitions
    /// never carry one; [`RandomTokenGenerator`] panics on it.
    fn generate(&self, length: usize, alphabet: &Alphabet) -> String;
}

/// The default generator, drawing from a [`RandomSource`].
///
/// - `Hex`: `ceil(length / 2)` random bytes, hex-encoded and cut to `length`
///   characters. For odd lengths the last digit of the last byte is dropped.
/// - character sets: `length` independent draws with replacement.
/// - `Words`: `length` independent draws from the word bank, concatenated.
///
/// # Panics
///
/// [`generate`](TokenGenerator::generate) panics on an empty character set.
#[derive(Debug)]
pub struct RandomTokenGenerator<R: RandomSource = OsRandom> {
    source: R,
    words: &'static [&'static str],
}

impl RandomTokenGenerator<OsRandom> {
    /// Creates a generator backed by the OS random source.
    pub fn new() -> Self {
        Self::with_source(OsRandom)
    }
}

impl Default for RandomTokenGenerator<OsRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> RandomTokenGenerator<R> {
    pub fn with_source(source: R) -> Self {
        Self {
            source,
            words: WORDS_BANK,
        }
    }

    /// Replaces the word bank used by [`Alphabet::Words`].
    ///
    /// # Panics
    ///
    /// Panics if `words` is empty.
    pub fn with_word_bank(mut self, words: &'static [&'static str]) -> Self {
        assert!(!words.is_empty(), "word bank must not be empty");
        self.words = words;
        self
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    fn hex(&self, length: usize) -> String {
        let mut bytes = vec![0u8; length.div_ceil(2)];
        self.source.fill_bytes(&mut bytes);
        let mut token = hex::encode(bytes);
        token.truncate(length);
        token
    }

    fn sample(&self, length: usize, symbols: Symbols<'_>) -> String {
        (0..length)
            .map(|_| symbols.at(self.source.index(symbols.len())))
            .collect()
    }

    fn words(&self, length: usize) -> String {
        (0..length)
            .map(|_| self.words[self.source.index(self.words.len())])
            .collect()
    }
}

impl<R: RandomSource> TokenGenerator for RandomTokenGenerator<R> {
    fn generate(&self, length: usize, alphabet: &Alphabet) -> String {
        if let Alphabet::Words = alphabet {
            return self.words(length);
        }

        // every other non-hex alphabet is a character set
        match alphabet.symbols() {
            Some(symbols) => {
                assert!(!symbols.is_empty(), "cannot draw a token from an empty alphabet");
                self.sample(length, symbols)
            }
            None => self.hex(length),
        }
    }
}
