use alloc::{string::String, vec::Vec};
use core::{fmt::Write, str::Utf8Error};

use thiserror::Error;

use crate::Block;

/// Errors returned by a scan. A failed scan never yields a partial result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    /// The input handed to [`lex_bytes`](crate::lex_bytes) is not UTF-8 text.
    #[error("input is not a valid string: {0}")]
    InvalidInput(#[from] Utf8Error),
    /// The whole input was consumed while blocks were still open.
    #[error("unterminated blocks: {}", open_markers(.open))]
    UnterminatedBlock {
        /// Blocks left open at end of input, outermost first.
        open: Vec<Block>,
    },
    /// A pattern delimiter failed to compile.
    #[error("invalid delimiter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// A regex flag string contained an unsupported flag.
    #[error("unsupported regex flag '{0}'")]
    InvalidRegexFlag(char),
}

fn open_markers(open: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in open.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{block}");
    }
    out
}
