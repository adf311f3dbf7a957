use alloc::{
    borrow::ToOwned,
    format,
    string::{String, ToString},
    sync::Arc,
};
use core::fmt;

use regex::{Regex, RegexBuilder};

use crate::{LexError, RegexFlags, Token};

/// Signature of a predicate delimiter.
///
/// Called with the input before the cursor, the input from the cursor on,
/// and the tokens completed so far. Returns the matched text, which the
/// scanner then consumes, or `None`.
pub type PredicateFn = dyn Fn(&str, &str, &[Token]) -> Option<String> + Send + Sync;

/// A test applied at the cursor to find a split point (or, as a stop
/// character, the end of the scan).
#[derive(Clone)]
pub enum Delimiter {
    /// Matches this exact text.
    Literal(String),
    /// Matches a regular expression anchored at the cursor.
    Pattern(Pattern),
    /// Delegates the decision to a function.
    Predicate(Arc<PredicateFn>),
}

/// A compiled, cursor-anchored regular expression.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: RegexFlags,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` so that it only matches at the start of the text it
    /// is applied to.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidPattern`] if `source` does not compile.
    pub fn new(source: &str, flags: RegexFlags) -> Result<Self, LexError> {
        // `\A` rather than `^`: multi-line mode would let `^` match after
        // any newline in the remaining input.
        let anchored = if flags.ignore_whitespace {
            format!("\\A(?:{source}\n)")
        } else {
            format!("\\A(?:{source})")
        };
        let regex = RegexBuilder::new(&anchored)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .ignore_whitespace(flags.ignore_whitespace)
            .build()?;
        Ok(Self {
            source: source.to_owned(),
            flags,
            regex,
        })
    }

    /// The pattern as written, without the anchor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Flags the pattern was compiled with.
    #[must_use]
    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    fn find<'a>(&self, rest: &'a str) -> Option<&'a str> {
        self.regex.find(rest).map(|m| m.as_str())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Delimiter {
    /// A literal delimiter.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// A pattern delimiter, compiled immediately.
    ///
    /// # Errors
    ///
    /// [`LexError::InvalidPattern`] if `source` does not compile.
    pub fn pattern(source: &str, flags: RegexFlags) -> Result<Self, LexError> {
        Pattern::new(source, flags).map(Self::Pattern)
    }

    /// A predicate delimiter.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &str, &[Token]) -> Option<String> + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Rewrites a literal into a pattern compiled with `flags`; other
    /// variants are returned unchanged.
    pub(crate) fn into_pattern(self, flags: RegexFlags) -> Result<Self, LexError> {
        match self {
            Self::Literal(text) => Self::pattern(&text, flags),
            other => Ok(other),
        }
    }

    /// Tests this delimiter at byte offset `pos` of `input`.
    pub(crate) fn test_at(
        &self,
        input: &str,
        pos: usize,
        tokens: &[Token],
        case_insensitive: bool,
    ) -> Option<String> {
        let rest = &input[pos..];
        match self {
            Self::Predicate(f) => f(&input[..pos], rest, tokens),
            Self::Pattern(pattern) => pattern.find(rest).map(ToString::to_string),
            Self::Literal(text) => {
                let candidate = rest.get(..text.len())?;
                let hit = if case_insensitive {
                    candidate.to_lowercase() == text.to_lowercase()
                } else {
                    candidate == text
                };
                hit.then(|| text.clone())
            }
        }
    }

    /// Identity used to compare delimiter sets regardless of order.
    pub(crate) fn key(&self) -> DelimiterKey {
        match self {
            Self::Literal(text) => DelimiterKey::Literal(text.clone()),
            Self::Pattern(pattern) => DelimiterKey::Pattern(pattern.source.clone(), pattern.flags),
            Self::Predicate(f) => DelimiterKey::Predicate(Arc::as_ptr(f).cast::<()>().addr()),
        }
    }
}

impl fmt::Debug for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl PartialEq for Delimiter {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl From<&str> for Delimiter {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for Delimiter {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<char> for Delimiter {
    fn from(ch: char) -> Self {
        Self::Literal(ch.to_string())
    }
}

impl From<Pattern> for Delimiter {
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// Comparable stand-in for a [`Delimiter`]. Predicates compare by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum DelimiterKey {
    Literal(String),
    Pattern(String, RegexFlags),
    Predicate(usize),
}
