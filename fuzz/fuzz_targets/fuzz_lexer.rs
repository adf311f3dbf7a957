#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splitlex::{Delimiter, LexError, LexOptions, Lexer};

#[derive(Debug, Arbitrary)]
struct Case {
    input: String,
    delims: Vec<String>,
    preserve_delims: bool,
    case_insensitive: bool,
    limit: Option<u8>,
    stop: Option<String>,
}

fuzz_target!(|case: Case| {
    let delims: Vec<Delimiter> = case.delims.into_iter().take(4).map(Delimiter::from).collect();
    let options = LexOptions {
        preserve_delims: case.preserve_delims,
        case_insensitive: case.case_insensitive,
        limit: case.limit.map(usize::from),
        stop_chars: case.stop.into_iter().map(Delimiter::from).collect(),
        cache: false,
        ..Default::default()
    };

    match Lexer::new(&case.input, options).lex(&delims) {
        Ok(result) => {
            assert_eq!(result.tokens.len(), result.matches.len() + 1);
            assert!(result.nesting.is_empty());
            for offset in result.matches_at.keys() {
                assert!(case.input.is_char_boundary(*offset));
            }
            if let Some(stop) = &result.stop {
                assert_eq!(&case.input[stop.offset..], stop.rest);
            }
        }
        Err(LexError::UnterminatedBlock { open }) => assert!(!open.is_empty()),
        Err(other) => panic!("unexpected error: {other}"),
    }
});
