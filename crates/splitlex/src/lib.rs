//! A delimiter scanner that understands nesting, quoting and comments.
//!
//! `splitlex` splits a string on a set of delimiters while stepping over
//! delimiters that appear inside bracket-like blocks, quoted regions or
//! comments. It is meant as a building block for small parsers that only need
//! "split this argument list on commas" without a full grammar.
//!
//! ```rust
//! use splitlex::{LexOptions, Lexer, delims};
//!
//! let lexer = Lexer::new("f(a, b), 'x,y', c", LexOptions::default());
//! let tokens = lexer.split(&delims![","]).unwrap();
//! assert_eq!(tokens, ["f(a, b)", " 'x,y'", " c"]);
//! ```
//!
//! Results of the free functions [`lex`], [`split`] and [`matches`] are
//! memoized per input string in a process-wide [`ScanCache`]; use
//! [`Lexer`] directly for an uncached scan.

extern crate alloc;

mod block;
mod cache;
mod delimiter;
mod error;
mod lexer;
mod options;
mod result;
mod token;

#[cfg(test)]
mod tests;

pub use block::{Block, DEFAULT_BLOCKS, DEFAULT_COMMENTS, DEFAULT_QUOTES};
pub use cache::{DEFAULT_MAX_INPUTS, MAX_ENTRIES_PER_INPUT, ScanCache, lex, lex_bytes, matches, split};
pub use delimiter::{Delimiter, Pattern, PredicateFn};
pub use error::LexError;
pub use lexer::Lexer;
pub use options::{LexOptions, RegexFlags};
pub use result::{ScanResult, Stop};
pub use token::Token;

#[doc(hidden)]
pub use alloc::vec;

/// Macro to build a `Vec<Delimiter>` from a list of literal delimiters.
///
/// ```rust
/// # use splitlex::{delims, Delimiter};
/// let d = delims![",", ";", '|'];
/// assert_eq!(
///     d,
///     vec![
///         Delimiter::literal(","),
///         Delimiter::literal(";"),
///         Delimiter::literal("|"),
///     ]
/// );
/// ```
#[macro_export]
macro_rules! delims {
    ( $( $elem:expr ),* $(,)? ) => {{
        $crate::vec![$($crate::Delimiter::from($elem)),*]
    }};
}
