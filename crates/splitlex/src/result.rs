use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{Block, Delimiter, LexOptions, Token};

/// Outcome of a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// The delimiters the scan was asked for, as given.
    pub delims: Vec<Delimiter>,
    /// The options the scan ran with.
    pub options: LexOptions,
    /// Blocks still open when the scan ended. Always empty on success.
    pub nesting: Vec<Block>,
    /// Deepest nesting level reached.
    pub max_depth: usize,
    /// Top-level comment bodies, in order of appearance.
    pub comments: Vec<String>,
    /// Text between split points. Always one more than `matches`.
    pub tokens: Vec<Token>,
    /// What produced each split: the delimiter text, or `None` for a split
    /// made on a block boundary.
    pub matches: Vec<Option<String>>,
    /// Matched delimiter text keyed by the byte offset it was found at.
    pub matches_at: BTreeMap<usize, String>,
    /// Set when a stop character ended the scan early.
    pub stop: Option<Stop>,
}

/// Where and how a stop character ended a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Text matched by the stop character.
    pub matched: String,
    /// Byte offset of the match.
    pub offset: usize,
    /// Unconsumed input, starting with the match.
    pub rest: String,
}

impl ScanResult {
    /// Splits the result into tokens only.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Splits the result into matches only.
    #[must_use]
    pub fn into_matches(self) -> Vec<Option<String>> {
        self.matches
    }

    /// Token texts, without comments.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::as_str)
    }
}
