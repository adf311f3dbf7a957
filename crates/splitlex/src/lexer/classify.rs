//! Position classifiers consulted by the scan loop.
//!
//! Each boundary test inspects `rest` (the input from the cursor on),
//! updates the open quote, comment or nesting stack in [`ScanState`], and
//! reports which marker it saw. The first configured marker that opens or
//! closes something wins.

use alloc::string::String;

use super::state::ScanState;
use crate::{Block, Delimiter, Token};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Boundary<'a> {
    pub(crate) starting: Option<&'a str>,
    pub(crate) ending: Option<&'a str>,
}

impl<'a> Boundary<'a> {
    fn starting(marker: &'a str) -> Self {
        Self {
            starting: Some(marker),
            ending: None,
        }
    }

    fn ending(marker: &'a str) -> Self {
        Self {
            starting: None,
            ending: Some(marker),
        }
    }

    /// The marker seen at the cursor, if any.
    pub(crate) fn marker(self) -> Option<&'a str> {
        self.starting.or(self.ending)
    }
}

pub(crate) fn test_quotes<'a>(quotes: &'a [String], rest: &str, state: &mut ScanState) -> Boundary<'a> {
    for (idx, quote) in quotes.iter().enumerate() {
        if quote.is_empty() || !rest.starts_with(quote.as_str()) {
            continue;
        }
        match state.open_quote {
            None => {
                state.open_quote = Some(idx);
                return Boundary::starting(quote);
            }
            Some(open) if quotes[open] == *quote => {
                state.open_quote = None;
                return Boundary::ending(quote);
            }
            Some(_) => {}
        }
    }
    Boundary::default()
}

pub(crate) fn test_comments<'a>(comments: &'a [Block], rest: &str, state: &mut ScanState) -> Boundary<'a> {
    for (idx, block) in comments.iter().enumerate() {
        match state.open_comment {
            None => {
                if !block.start.is_empty() && rest.starts_with(block.start.as_str()) {
                    state.open_comment = Some(idx);
                    return Boundary::starting(&block.start);
                }
            }
            Some(open) => {
                if !block.end.is_empty()
                    && block.end == comments[open].end
                    && rest.starts_with(block.end.as_str())
                {
                    state.open_comment = None;
                    return Boundary::ending(&block.end);
                }
            }
        }
    }
    Boundary::default()
}

/// Opens or closes a block at the cursor. Closing is LIFO: only a marker
/// equal to the end marker of the innermost open block closes anything.
pub(crate) fn test_nesting<'a>(blocks: &'a [Block], rest: &str, state: &mut ScanState) -> Boundary<'a> {
    let mut seen = Boundary::default();
    for (idx, block) in blocks.iter().enumerate() {
        if !block.start.is_empty() && rest.starts_with(block.start.as_str()) {
            state.push_block(idx);
            seen = Boundary::starting(&block.start);
            break;
        }
        let Some(&top) = state.nesting.last() else {
            continue;
        };
        if !block.end.is_empty() && block.end == blocks[top].end && rest.starts_with(block.end.as_str()) {
            state.nesting.pop();
            seen = Boundary::ending(&block.end);
            break;
        }
    }
    state.max_depth = state.max_depth.max(state.depth());
    seen
}

/// Tries each candidate in order and returns the first match.
pub(crate) fn test_chars(
    candidates: &[Delimiter],
    input: &str,
    pos: usize,
    tokens: &[Token],
    case_insensitive: bool,
) -> Option<String> {
    candidates
        .iter()
        .find_map(|candidate| candidate.test_at(input, pos, tokens, case_insensitive))
}
