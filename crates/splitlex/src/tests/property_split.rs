use alloc::{string::String, vec::Vec};

use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

use crate::{Delimiter, LexError, LexOptions, Lexer, ScanCache, delims};

const ALPHABET: &[char] = &[
    'a', 'b', 'é', ' ', ',', ';', '(', ')', '[', ']', '{', '}', '"', '\'', '/', '*', '\n',
];

/// Maps arbitrary bytes onto a small alphabet so that delimiters, brackets
/// and quotes show up often enough to matter.
fn from_alphabet(seed: &[u8]) -> String {
    seed.iter()
        .map(|&b| ALPHABET[usize::from(b) % ALPHABET.len()])
        .collect()
}

fn has_block_or_comment(input: &str) -> bool {
    input.contains(['(', ')', '[', ']', '{', '}', '/'])
}

/// Property: every successful scan yields exactly one more token than
/// matches, whatever the input and delimiter mode.
#[test]
fn tokens_outnumber_matches_by_one() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(seed: Vec<u8>, block_mode: bool, limit: Option<u8>) -> bool {
        let input = from_alphabet(&seed);
        let delims: Vec<Delimiter> = if block_mode { Vec::new() } else { delims![",", ";"] };
        let options = LexOptions {
            limit: limit.map(usize::from),
            ..Default::default()
        };
        match Lexer::new(&input, options).lex(&delims) {
            Ok(result) => result.tokens.len() == result.matches.len() + 1,
            Err(LexError::UnterminatedBlock { open }) => !open.is_empty(),
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<u8>, bool, Option<u8>) -> bool);
}

/// Property: with no delimiters and nothing to nest, the input comes back as
/// a single token.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn block_mode_without_blocks_is_identity(seed: Vec<u8>) -> TestResult {
    let input = from_alphabet(&seed);
    if has_block_or_comment(&input) {
        return TestResult::discard();
    }
    let result = Lexer::new(&input, LexOptions::default()).lex(&[]).unwrap();
    TestResult::from_bool(result.tokens == [input.as_str()] && result.matches.is_empty())
}

/// Property: interleaving tokens with the matched delimiters rebuilds the
/// input when no comment text was taken out.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn tokens_and_matches_rebuild_input(seed: Vec<u8>) -> TestResult {
    let input = from_alphabet(&seed);
    if input.contains('/') {
        return TestResult::discard();
    }
    let Ok(result) = Lexer::new(&input, LexOptions::default()).lex(&delims![",", ";"]) else {
        return TestResult::discard();
    };
    let mut rebuilt = String::new();
    for (idx, token) in result.tokens.iter().enumerate() {
        rebuilt.push_str(token);
        if let Some(Some(matched)) = result.matches.get(idx) {
            rebuilt.push_str(matched);
        }
    }
    TestResult::from_bool(rebuilt == input)
}

/// Property: a cached scan is indistinguishable from a fresh one.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn cached_scan_matches_fresh_scan(seed: Vec<u8>) -> bool {
    let input = from_alphabet(&seed);
    let cache = ScanCache::new();
    let delims = delims![";", ","];
    let fresh = Lexer::new(&input, LexOptions::default()).lex(&delims);
    let first = cache.lex(&input, &delims, LexOptions::default());
    let second = cache.lex(&input, &delims, LexOptions::default());
    fresh == first && first == second
}
