//! Per-scan mutable state and the token accumulator.
//!
//! Invariants
//! - The current token is always `tokens[matches.len()]`; it is created
//!   lazily by the first write after a split.
//! - `nesting`, `open_quote` and `open_comment` hold indices into the
//!   option tables of the [`Lexer`](super::Lexer) that owns the scan.
//! - `max_depth` never decreases.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{Stop, Token};

#[derive(Debug, Default)]
pub(crate) struct ScanState {
    pub(crate) nesting: Vec<usize>,
    pub(crate) open_quote: Option<usize>,
    pub(crate) open_comment: Option<usize>,
    pub(crate) max_depth: usize,
    pub(crate) comments: Vec<String>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) matches: Vec<Option<String>>,
    pub(crate) matches_at: BTreeMap<usize, String>,
    pub(crate) stop: Option<Stop>,
}

impl ScanState {
    /// Returns the token under construction, creating it if the last split
    /// has not been written to yet.
    pub(crate) fn current_token(&mut self) -> &mut Token {
        let idx = self.matches.len();
        while self.tokens.len() <= idx {
            self.tokens.push(Token::default());
        }
        &mut self.tokens[idx]
    }

    pub(crate) fn ensure_token(&mut self) {
        self.current_token();
    }

    /// Appends plain text to the current token.
    pub(crate) fn push_text(&mut self, s: &str) {
        self.current_token().push_str(s);
    }

    /// Appends comment text to the current token and mirrors it into the
    /// top-level comment list.
    pub(crate) fn push_comment(&mut self, s: &str, is_new_series: bool) {
        self.current_token().push_comment(s, is_new_series);
        match self.comments.last_mut() {
            Some(last) if !is_new_series => last.push_str(s),
            _ => self.comments.push(String::from(s)),
        }
    }

    /// Records a split point. `matched` is `None` for block boundaries.
    pub(crate) fn split(&mut self, matched: Option<String>) {
        self.matches.push(matched);
    }

    pub(crate) fn push_block(&mut self, idx: usize) {
        self.nesting.push(idx);
        self.max_depth = self.max_depth.max(self.nesting.len());
    }

    pub(crate) fn depth(&self) -> usize {
        self.nesting.len()
    }
}
