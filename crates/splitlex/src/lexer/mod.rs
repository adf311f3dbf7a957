//! The scan loop.
//!
//! A scan walks the input once, left to right. At every position the
//! classifiers in [`classify`] are consulted in a fixed order:
//!
//! 1. quotes (unless a comment is open),
//! 2. comments (unless a quote is open),
//! 3. an open comment diverts text into the comment channel (top level) or
//!    the token (nested),
//! 4. an open quote keeps text verbatim in the token,
//! 5. once `limit` matches were recorded, everything else is plain text,
//! 6. nesting, then stop characters at depth zero,
//! 7. block-mode splitting (no delimiters) or delimiter matching.
//!
//! Each step consumes at least one `char`, so the loop runs at most
//! `input.len()` times. All state lives in one [`ScanState`] owned by the
//! call to [`Lexer::lex`].

mod classify;
mod state;


use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
    vec::Vec,
};

use classify::{Boundary, test_chars, test_comments, test_nesting, test_quotes};
use state::ScanState;

use crate::{Delimiter, LexError, LexOptions, RegexFlags, ScanResult, Stop, Token};

/// A scanner bound to one input string and one set of options.
///
/// [`Lexer::lex`] always runs a fresh scan; see [`ScanCache`](crate::ScanCache)
/// for memoized scans.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    input: &'src str,
    options: LexOptions,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `input`.
    #[must_use]
    pub fn new(input: &'src str, options: LexOptions) -> Self {
        Self { input, options }
    }

    /// The input being scanned.
    #[must_use]
    pub fn input(&self) -> &'src str {
        self.input
    }

    /// The options scans run with.
    #[must_use]
    pub fn options(&self) -> &LexOptions {
        &self.options
    }

    /// Scans the input, splitting on `delims`.
    ///
    /// With no delimiters the input is split on block boundaries instead:
    /// when a block opens at depth two and when the outermost block closes.
    ///
    /// # Errors
    ///
    /// [`LexError::UnterminatedBlock`] if blocks are still open at the end
    /// of input, [`LexError::InvalidPattern`] if pattern mode is on and a
    /// delimiter does not compile.
    #[tracing::instrument(level = "trace", skip_all, fields(len = self.input.len(), delims = delims.len()))]
    pub fn lex(&self, delims: &[Delimiter]) -> Result<ScanResult, LexError> {
        let resolved = resolve(delims, self.options.use_regex)?;
        let stop_chars = resolve(&self.options.stop_chars, self.options.use_regex)?;

        let mut state = ScanState::default();
        let mut cursor = 0;
        while let Some(next) = self.step(&mut state, cursor, &resolved, &stop_chars) {
            cursor = next;
        }
        state.ensure_token();

        if !state.nesting.is_empty() {
            let open = state
                .nesting
                .iter()
                .map(|&idx| self.options.blocks[idx].clone())
                .collect::<Vec<_>>();
            tracing::trace!(depth = open.len(), "unterminated blocks at end of input");
            return Err(LexError::UnterminatedBlock { open });
        }

        Ok(ScanResult {
            delims: delims.to_vec(),
            options: self.options.clone(),
            nesting: Vec::new(),
            max_depth: state.max_depth,
            comments: state.comments,
            tokens: state.tokens,
            matches: state.matches,
            matches_at: state.matches_at,
            stop: state.stop,
        })
    }

    /// Scans and returns only the tokens.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn split(&self, delims: &[Delimiter]) -> Result<Vec<Token>, LexError> {
        self.lex(delims).map(ScanResult::into_tokens)
    }

    /// Scans and returns only the matches.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn matches(&self, delims: &[Delimiter]) -> Result<Vec<Option<String>>, LexError> {
        self.lex(delims).map(ScanResult::into_matches)
    }

    /// Scans with literal delimiters treated as regular expressions.
    ///
    /// Flags already set in [`LexOptions::use_regex`] are kept.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn reg_lex(&self, delims: &[Delimiter]) -> Result<ScanResult, LexError> {
        Lexer::new(self.input, self.options.clone().with_regex()).lex(delims)
    }

    /// [`Lexer::reg_lex`], returning only the tokens.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn reg_split(&self, delims: &[Delimiter]) -> Result<Vec<Token>, LexError> {
        self.reg_lex(delims).map(ScanResult::into_tokens)
    }

    /// [`Lexer::reg_lex`], returning only the matches.
    ///
    /// # Errors
    ///
    /// See [`Lexer::lex`].
    pub fn reg_matches(&self, delims: &[Delimiter]) -> Result<Vec<Option<String>>, LexError> {
        self.reg_lex(delims).map(ScanResult::into_matches)
    }

    /// Classifies the position `i` and consumes what it found. Returns the
    /// next cursor, or `None` once the scan is over.
    fn step(
        &self,
        state: &mut ScanState,
        i: usize,
        delims: &[Delimiter],
        stop_chars: &[Delimiter],
    ) -> Option<usize> {
        let input = self.input;
        let rest = input.get(i..).filter(|rest| !rest.is_empty())?;
        let current = first_char(rest);
        let options = &self.options;

        let quote = if state.open_comment.is_none() {
            test_quotes(&options.quotes, rest, state)
        } else {
            Boundary::default()
        };
        let comment = if state.open_quote.is_none() {
            test_comments(&options.comments, rest, state)
        } else {
            Boundary::default()
        };

        let width = if state.open_comment.is_some() || comment.ending.is_some() {
            let chars = comment.marker().unwrap_or(current);
            if state.nesting.is_empty() {
                // Markers are consumed but kept out of the comment body.
                match comment {
                    Boundary {
                        starting: Some(_), ..
                    } => state.push_comment("", true),
                    Boundary { ending: Some(_), .. } => {}
                    Boundary { .. } => state.push_comment(current, false),
                }
            } else {
                state.push_text(chars);
            }
            chars.len()
        } else if state.open_quote.is_some() || quote.ending.is_some() {
            let chars = quote.marker().unwrap_or(current);
            state.push_text(chars);
            chars.len()
        } else if options.limit == Some(state.matches.len()) {
            state.push_text(current);
            current.len()
        } else {
            let nesting = test_nesting(&options.blocks, rest, state);

            if state.nesting.is_empty() {
                if let Some(matched) =
                    test_chars(stop_chars, input, i, &state.tokens, options.case_insensitive)
                {
                    tracing::trace!(offset = i, %matched, "stop character");
                    state.stop = Some(Stop {
                        matched,
                        offset: i,
                        rest: rest.to_owned(),
                    });
                    return None;
                }
            }

            if delims.is_empty() {
                split_on_blocks(state, nesting, current)
            } else if state.nesting.is_empty() && nesting.ending.is_none() {
                // A delimiter at offset 0 still leaves an empty first token.
                state.ensure_token();
                match test_chars(delims, input, i, &state.tokens, options.case_insensitive) {
                    Some(matched) => {
                        let width = if matched.is_empty() { current.len() } else { matched.len() };
                        let next = advance(input, i, width);
                        state.matches_at.insert(i, matched.clone());
                        if options.preserve_delims {
                            state.push_text(&input[i..next]);
                            state.split(Some(matched));
                        } else {
                            state.split(Some(matched));
                            if next == input.len() {
                                state.ensure_token();
                            }
                        }
                        return Some(next);
                    }
                    None => {
                        state.push_text(current);
                        current.len()
                    }
                }
            } else {
                let chars = nesting.marker().unwrap_or(current);
                state.push_text(chars);
                chars.len()
            }
        };

        Some(advance(input, i, width))
    }
}

/// Block-mode splitting: a split opens when a block starts at depth two and
/// closes when the outermost block ends.
fn split_on_blocks(state: &mut ScanState, nesting: Boundary<'_>, current: &str) -> usize {
    match nesting {
        Boundary {
            starting: Some(start),
            ..
        } if state.depth() == 2 => {
            state.split(None);
            state.push_text(start);
            start.len()
        }
        Boundary {
            ending: Some(end), ..
        } if state.depth() == 0 => {
            state.push_text(end);
            state.split(None);
            end.len()
        }
        other => {
            let chars = other.marker().unwrap_or(current);
            state.push_text(chars);
            chars.len()
        }
    }
}

fn resolve(list: &[Delimiter], flags: Option<RegexFlags>) -> Result<Cow<'_, [Delimiter]>, LexError> {
    let Some(flags) = flags else {
        return Ok(Cow::Borrowed(list));
    };
    list.iter()
        .cloned()
        .map(|delimiter| delimiter.into_pattern(flags))
        .collect::<Result<Vec<_>, _>>()
        .map(Cow::Owned)
}

/// The first `char` of a non-empty string, as a string slice.
fn first_char(rest: &str) -> &str {
    let len = rest.chars().next().map_or(0, char::len_utf8);
    &rest[..len]
}

/// Moves `width` bytes past `from`, at least one byte, never past the end,
/// and rounded up to a `char` boundary.
fn advance(input: &str, from: usize, width: usize) -> usize {
    let mut next = (from + width.max(1)).min(input.len());
    while !input.is_char_boundary(next) {
        next += 1;
    }
    next
}
