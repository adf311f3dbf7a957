#![allow(clippy::struct_excessive_bools)]

use alloc::{string::String, vec::Vec};
use core::str::FromStr;

use crate::{
    Block, Delimiter, LexError,
    block::{default_blocks, default_comments, default_quotes},
};

/// Configuration options for a scan.
///
/// # Examples
///
/// ```rust
/// use splitlex::{Block, LexOptions, Lexer, delims};
///
/// let options = LexOptions {
///     blocks: vec![Block::new("<", ">")],
///     limit: Some(1),
///     ..Default::default()
/// };
/// let tokens = Lexer::new("a<b,c>,d,e", options).split(&delims![","]).unwrap();
/// assert_eq!(tokens, ["a<b,c>", "d,e"]);
/// ```
///
/// # Default
///
/// Default blocks, quotes and comments (see [`DEFAULT_BLOCKS`],
/// [`DEFAULT_QUOTES`], [`DEFAULT_COMMENTS`]), no limit, no stop characters,
/// literal case-sensitive matching, and caching enabled.
///
/// [`DEFAULT_BLOCKS`]: crate::DEFAULT_BLOCKS
/// [`DEFAULT_QUOTES`]: crate::DEFAULT_QUOTES
/// [`DEFAULT_COMMENTS`]: crate::DEFAULT_COMMENTS
#[derive(Debug, Clone, PartialEq)]
pub struct LexOptions {
    /// Nestable regions. Delimiters inside an open block never split.
    pub blocks: Vec<Block>,

    /// Markers opening and closing a non-nestable literal region.
    pub quotes: Vec<String>,

    /// Comment regions. At the top level their bodies are moved out of the
    /// token text into [`Token::comments`](crate::Token).
    pub comments: Vec<Block>,

    /// Maximum number of delimiter matches to honor.
    ///
    /// Once reached, the rest of the input is appended to the last token
    /// without further classification.
    ///
    /// # Default
    ///
    /// `None`
    pub limit: Option<usize>,

    /// Tests that end the scan when they match outside of any block.
    ///
    /// The matched text and the unconsumed rest of the input are reported in
    /// [`ScanResult::stop`](crate::ScanResult).
    pub stop_chars: Vec<Delimiter>,

    /// Whether matched delimiter text stays in the token it terminates.
    ///
    /// # Default
    ///
    /// `false`
    pub preserve_delims: bool,

    /// Interpret literal delimiters and stop characters as regular
    /// expressions compiled with the given flags, anchored at the cursor.
    ///
    /// # Default
    ///
    /// `None`
    pub use_regex: Option<RegexFlags>,

    /// Compare literal delimiters case-insensitively.
    ///
    /// # Default
    ///
    /// `false`
    pub case_insensitive: bool,

    /// Whether the free functions may serve and store this scan in the
    /// result cache.
    ///
    /// # Default
    ///
    /// `true`
    pub cache: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            blocks: default_blocks(),
            quotes: default_quotes(),
            comments: default_comments(),
            limit: None,
            stop_chars: Vec::new(),
            preserve_delims: false,
            use_regex: None,
            case_insensitive: false,
            cache: true,
        }
    }
}

/// Flags applied to pattern delimiters.
///
/// Parses from JavaScript-style flag strings: `i`, `m`, `s` and `x` map to
/// the matching regex options; `g`, `u` and `y` are accepted and ignored
/// since every pattern is anchored and Unicode-aware already.
///
/// ```rust
/// use splitlex::RegexFlags;
///
/// let flags: RegexFlags = "gi".parse().unwrap();
/// assert!(flags.case_insensitive);
/// assert!(!flags.multi_line);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegexFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`
    pub dot_matches_new_line: bool,
    /// `x`
    pub ignore_whitespace: bool,
}

impl FromStr for RegexFlags {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::default();
        for ch in s.chars() {
            match ch {
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_matches_new_line = true,
                'x' => flags.ignore_whitespace = true,
                'g' | 'u' | 'y' => {}
                other => return Err(LexError::InvalidRegexFlag(other)),
            }
        }
        Ok(flags)
    }
}

impl LexOptions {
    /// Returns the same options with pattern mode switched on, keeping any
    /// flags already configured.
    pub(crate) fn with_regex(mut self) -> Self {
        if self.use_regex.is_none() {
            self.use_regex = Some(RegexFlags::default());
        }
        self
    }

    /// Comparable view of everything that influences a scan's output.
    pub(crate) fn fingerprint(&self) -> OptionsFingerprint {
        OptionsFingerprint {
            blocks: self.blocks.clone(),
            quotes: self.quotes.clone(),
            comments: self.comments.clone(),
            limit: self.limit,
            stop_chars: self.stop_chars.iter().map(Delimiter::key).collect(),
            preserve_delims: self.preserve_delims,
            use_regex: self.use_regex,
            case_insensitive: self.case_insensitive,
        }
    }
}

/// Options minus the `cache` switch, with stop characters reduced to keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionsFingerprint {
    blocks: Vec<Block>,
    quotes: Vec<String>,
    comments: Vec<Block>,
    limit: Option<usize>,
    stop_chars: Vec<crate::delimiter::DelimiterKey>,
    preserve_delims: bool,
    use_regex: Option<RegexFlags>,
    case_insensitive: bool,
}
