//! Memoized scans.
//!
//! Results are keyed by the exact input string. Under one input, an entry
//! is reused when the requested delimiters form the same *set* as the cached
//! ones (order and duplicates ignored) and the options fingerprint matches.
//! Every hit hands out a deep copy, so callers may mutate what they get.
//!
//! The cache holds at most [`DEFAULT_MAX_INPUTS`] distinct inputs by
//! default and [`MAX_ENTRIES_PER_INPUT`] results per input; in both cases the
//! oldest is evicted first.

use alloc::{collections::VecDeque, string::String, vec::Vec};
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{
    Delimiter, LexError, LexOptions, Lexer, ScanResult, Token, delimiter::DelimiterKey,
    options::OptionsFingerprint,
};

/// Number of distinct inputs a [`ScanCache::new`] cache retains.
pub const DEFAULT_MAX_INPUTS: usize = 1024;

/// Number of results kept for one input string.
pub const MAX_ENTRIES_PER_INPUT: usize = 16;

static GLOBAL: LazyLock<ScanCache> = LazyLock::new(ScanCache::new);

/// A thread-safe store of scan results.
pub struct ScanCache {
    inner: RwLock<CacheInner>,
    max_inputs: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: FxHashMap<String, Vec<CacheEntry>>,
    /// Inputs in insertion order, for FIFO eviction.
    order: VecDeque<String>,
}

struct CacheEntry {
    delims: Vec<DelimiterKey>,
    options: OptionsFingerprint,
    result: ScanResult,
}

impl CacheEntry {
    fn matches(&self, delims: &[DelimiterKey], options: &OptionsFingerprint) -> bool {
        self.delims == delims && self.options == *options
    }
}

impl Default for ScanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanCache {
    /// Creates an empty cache retaining up to [`DEFAULT_MAX_INPUTS`] inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_inputs(DEFAULT_MAX_INPUTS)
    }

    /// Creates an empty cache retaining up to `max_inputs` distinct inputs.
    #[must_use]
    pub fn with_max_inputs(max_inputs: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            max_inputs: max_inputs.max(1),
        }
    }

    /// Scans `input`, serving the result from the cache when an equivalent
    /// scan has been stored. Failed scans are never cached.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn lex(
        &self,
        input: &str,
        delims: &[Delimiter],
        options: LexOptions,
    ) -> Result<ScanResult, LexError> {
        if !options.cache {
            return Lexer::new(input, options).lex(delims);
        }

        let keys = delimiter_set(delims);
        let fingerprint = options.fingerprint();
        if let Some(mut hit) = self.lookup(input, &keys, &fingerprint) {
            tracing::debug!(len = input.len(), "scan cache hit");
            // The entry may have been stored under another ordering.
            hit.delims = delims.to_vec();
            hit.options = options;
            return Ok(hit);
        }

        tracing::debug!(len = input.len(), "scan cache miss");
        let result = Lexer::new(input, options).lex(delims)?;
        self.store(input, keys, fingerprint, result.clone());
        Ok(result)
    }

    /// Number of cached results, across all inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.values().map(Vec::len).sum()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.order.clear();
    }

    fn lookup(
        &self,
        input: &str,
        delims: &[DelimiterKey],
        options: &OptionsFingerprint,
    ) -> Option<ScanResult> {
        let inner = self.inner.read();
        inner
            .entries
            .get(input)?
            .iter()
            .find(|entry| entry.matches(delims, options))
            .map(|entry| entry.result.clone())
    }

    fn store(
        &self,
        input: &str,
        delims: Vec<DelimiterKey>,
        options: OptionsFingerprint,
        result: ScanResult,
    ) {
        let mut inner = self.inner.write();

        // Another thread may have stored the same scan since our lookup.
        if let Some(existing) = inner.entries.get_mut(input) {
            if !existing.iter().any(|entry| entry.matches(&delims, &options)) {
                if existing.len() >= MAX_ENTRIES_PER_INPUT {
                    existing.remove(0);
                    tracing::debug!(len = input.len(), "scan cache evicted entry");
                }
                existing.push(CacheEntry {
                    delims,
                    options,
                    result,
                });
            }
            return;
        }

        while inner.order.len() >= self.max_inputs {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            tracing::debug!(len = oldest.len(), "scan cache evicted input");
        }

        inner.order.push_back(String::from(input));
        inner.entries.insert(
            String::from(input),
            alloc::vec![CacheEntry {
                delims,
                options,
                result,
            }],
        );
    }
}

impl core::fmt::Debug for ScanCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanCache")
            .field("entries", &self.len())
            .field("max_inputs", &self.max_inputs)
            .finish_non_exhaustive()
    }
}

/// Sorted, de-duplicated keys: the order-free identity of a delimiter list.
fn delimiter_set(delims: &[Delimiter]) -> Vec<DelimiterKey> {
    let mut keys = delims.iter().map(Delimiter::key).collect::<Vec<_>>();
    keys.sort();
    keys.dedup();
    keys
}

/// Scans `input` through the process-wide cache.
///
/// ```rust
/// use splitlex::{LexOptions, delims, lex};
///
/// let result = lex(",a,", &delims![","], LexOptions::default()).unwrap();
/// assert_eq!(result.tokens, ["", "a", ""]);
/// assert_eq!(result.matches, [Some(",".to_string()), Some(",".to_string())]);
/// ```
///
/// # Errors
///
/// See [`Lexer::lex`].
pub fn lex(input: &str, delims: &[Delimiter], options: LexOptions) -> Result<ScanResult, LexError> {
    GLOBAL.lex(input, delims, options)
}

/// Like [`lex`], for input that has not been checked to be UTF-8 yet.
///
/// # Errors
///
/// [`LexError::InvalidInput`] if `input` is not UTF-8; otherwise see
/// [`Lexer::lex`].
pub fn lex_bytes(
    input: &[u8],
    delims: &[Delimiter],
    options: LexOptions,
) -> Result<ScanResult, LexError> {
    let input = core::str::from_utf8(input)?;
    lex(input, delims, options)
}

/// [`lex`], returning only the tokens.
///
/// # Errors
///
/// See [`Lexer::lex`].
pub fn split(input: &str, delims: &[Delimiter], options: LexOptions) -> Result<Vec<Token>, LexError> {
    lex(input, delims, options).map(ScanResult::into_tokens)
}

/// [`lex`], returning only the matches.
///
/// # Errors
///
/// See [`Lexer::lex`].
pub fn matches(
    input: &str,
    delims: &[Delimiter],
    options: LexOptions,
) -> Result<Vec<Option<String>>, LexError> {
    lex(input, delims, options).map(ScanResult::into_matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delims;

    #[test]
    fn reordered_delimiters_share_an_entry() {
        let cache = ScanCache::new();
        let a = cache.lex("a,b;c", &delims![",", ";"], LexOptions::default()).unwrap();
        let b = cache.lex("a,b;c", &delims![";", ","], LexOptions::default()).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(a.tokens, b.tokens);
        assert_eq!(a.matches, b.matches);
        assert_eq!(a.delims, delims![",", ";"]);
        assert_eq!(b.delims, delims![";", ","]);
    }

    #[test]
    fn differing_options_do_not_share_an_entry() {
        let cache = ScanCache::new();
        let limited = LexOptions {
            limit: Some(1),
            ..Default::default()
        };
        let a = cache.lex("a,b,c", &delims![","], LexOptions::default()).unwrap();
        let b = cache.lex("a,b,c", &delims![","], limited).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(a.tokens, ["a", "b", "c"]);
        assert_eq!(b.tokens, ["a", "b,c"]);
    }

    #[test]
    fn cache_false_bypasses_storage() {
        let cache = ScanCache::new();
        let options = LexOptions {
            cache: false,
            ..Default::default()
        };
        cache.lex("a,b", &delims![","], options).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = ScanCache::new();
        let err = cache.lex("(a", &delims![","], LexOptions::default()).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlock { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn oldest_input_is_evicted_first() {
        let cache = ScanCache::with_max_inputs(2);
        for input in ["a", "b", "c"] {
            cache.lex(input, &delims![","], LexOptions::default()).unwrap();
        }
        assert_eq!(cache.len(), 2);
        let inner = cache.inner.read();
        assert!(!inner.entries.contains_key("a"));
        assert!(inner.entries.contains_key("c"));
    }

    #[test]
    fn results_per_input_are_bounded() {
        let cache = ScanCache::with_max_inputs(2);
        for _ in 0..100 {
            let comma =
                Delimiter::predicate(|_, rest: &str, _| rest.starts_with(',').then(|| ",".into()));
            let result = cache.lex("a,b", &[comma], LexOptions::default()).unwrap();
            assert_eq!(result.tokens, ["a", "b"]);
        }
        assert_eq!(cache.len(), MAX_ENTRIES_PER_INPUT);
    }

    #[test]
    fn predicates_compare_by_identity() {
        let cache = ScanCache::new();
        let comma = Delimiter::predicate(|_, rest: &str, _| rest.starts_with(',').then(|| ",".into()));
        let again = comma.clone();
        let other = Delimiter::predicate(|_, rest: &str, _| rest.starts_with(',').then(|| ",".into()));
        cache.lex("x,y", &[comma], LexOptions::default()).unwrap();
        cache.lex("x,y", &[again], LexOptions::default()).unwrap();
        assert_eq!(cache.len(), 1);
        cache.lex("x,y", &[other], LexOptions::default()).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_utf8_is_rejected_before_scanning() {
        let err = lex_bytes(&[b'a', 0xff, b','], &delims![","], LexOptions::default()).unwrap_err();
        assert!(matches!(err, LexError::InvalidInput(_)));
    }
}
