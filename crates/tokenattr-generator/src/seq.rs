use crate::TokenGenerator;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokenattr_core::Alphabet;

/// A generator that replays a fixed list of candidates.
///
/// Candidates are returned in order regardless of the requested length and
/// alphabet; once the list runs out the last candidate repeats. Useful for
/// driving the resolver through collisions deterministically.
#[derive(Debug)]
pub struct SequenceGenerator {
    pending: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: AtomicUsize,
}

impl SequenceGenerator {
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pending: VecDeque<String> = candidates.into_iter().map(Into::into).collect();
        let last = pending
            .back()
            .cloned()
            .expect("sequence generator needs at least one candidate");

        Self {
            pending: Mutex::new(pending),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
        }
    }

    /// A generator that always returns `candidate`.
    pub fn repeat(candidate: impl Into<String>) -> Self {
        Self::new([candidate.into()])
    }

    /// Number of candidates handed out so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&self, _length: usize, _alphabet: &Alphabet) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.pending.lock().pop_front() {
            Some(candidate) => {
                *self.last.lock() = candidate.clone();
                candidate
            }
            None => self.last.lock().clone(),
        }
    }
}
