use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::fmt;

/// A start/end marker pair delimiting a nestable region, e.g. `(` and `)`.
///
/// The same type describes comment markers: `/*` .. `*/` or `//` .. `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Marker that opens the region.
    pub start: String,
    /// Marker that closes the region.
    pub end: String,
}

impl Block {
    /// Creates a block from its two markers.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl From<(&str, &str)> for Block {
    fn from((start, end): (&str, &str)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…{}", self.start, self.end.escape_debug())
    }
}

/// Nesting blocks used when [`LexOptions::blocks`](crate::LexOptions) is left
/// at its default.
pub const DEFAULT_BLOCKS: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];

/// Quote markers used by default.
pub const DEFAULT_QUOTES: [&str; 3] = ["\"", "'", "`"];

/// Comment markers used by default.
pub const DEFAULT_COMMENTS: [(&str, &str); 2] = [("/*", "*/"), ("//", "\n")];

pub(crate) fn default_blocks() -> Vec<Block> {
    DEFAULT_BLOCKS.iter().copied().map(Block::from).collect()
}

pub(crate) fn default_quotes() -> Vec<String> {
    DEFAULT_QUOTES.iter().map(|&q| q.to_owned()).collect()
}

pub(crate) fn default_comments() -> Vec<Block> {
    DEFAULT_COMMENTS.iter().copied().map(Block::from).collect()
}
