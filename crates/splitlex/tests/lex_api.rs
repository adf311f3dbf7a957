#![allow(missing_docs)]

use rstest::rstest;
use splitlex::{
    Block, Delimiter, LexError, LexOptions, Lexer, RegexFlags, Token, delims, lex, matches, split,
};

fn uncached() -> LexOptions {
    LexOptions {
        cache: false,
        ..Default::default()
    }
}

#[rstest]
#[case("a,b,c", &["a", "b", "c"], &[",", ","])]
#[case(",a,", &["", "a", ""], &[",", ","])]
#[case("f(a,b),c", &["f(a,b)", "c"], &[","])]
#[case(r#"a"b,c"d,e"#, &[r#"a"b,c"d"#, "e"], &[","])]
#[case("plain", &["plain"], &[])]
fn split_and_match(#[case] input: &str, #[case] tokens: &[&str], #[case] found: &[&str]) {
    let result = lex(input, &delims![","], uncached()).unwrap();
    assert_eq!(result.tokens, tokens);
    let found: Vec<Option<String>> = found.iter().map(|m| Some((*m).to_string())).collect();
    assert_eq!(result.matches, found);
}

#[test]
fn split_and_matches_are_projections_of_lex() {
    let input = "key = value; other = (1; 2)";
    let full = lex(input, &delims![";"], LexOptions::default()).unwrap();
    let tokens = split(input, &delims![";"], LexOptions::default()).unwrap();
    let found = matches(input, &delims![";"], LexOptions::default()).unwrap();
    assert_eq!(full.tokens, tokens);
    assert_eq!(full.matches, found);
    assert_eq!(tokens, ["key = value", " other = (1; 2)"]);
}

#[test]
fn comment_is_attached_to_its_token() {
    let tokens = split("a/*x,y*/,b", &delims![","], uncached()).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token {
                text: "a".into(),
                comments: vec!["x,y".into()],
            },
            Token::new("b"),
        ]
    );
}

#[test]
fn unterminated_block_never_returns_a_result() {
    let err = lex("call(a, b", &delims![","], uncached()).unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedBlock {
            open: vec![Block::new("(", ")")]
        }
    );
}

#[test]
fn argument_list_with_everything() {
    let input = r#"fn(a, b), "x, y" /* note, here */, [1, 2], 'z' // trailing, comment"#;
    let result = lex(input, &delims![","], uncached()).unwrap();
    let texts: Vec<&str> = result.texts().collect();
    assert_eq!(texts, ["fn(a, b)", r#" "x, y" "#, " [1, 2]", " 'z' "]);
    assert_eq!(result.comments, [" note, here ", " trailing, comment"]);
    assert_eq!(result.tokens[1].comments, [" note, here "]);
    assert_eq!(result.tokens[3].comments, [" trailing, comment"]);
    assert_eq!(result.max_depth, 1);
}

#[test]
fn predicate_and_pattern_delimiters_mix_with_literals() {
    let keyword = Delimiter::predicate(|before, after, _| {
        let at_word_start = before.is_empty() || before.ends_with(' ');
        (at_word_start && after.starts_with("then ")).then(|| "then ".into())
    });
    let arrow = Delimiter::pattern(r"\s*=>\s*", RegexFlags::default()).unwrap();
    let result = Lexer::new("if x then y => z; w", uncached())
        .lex(&[keyword, arrow, Delimiter::from(";")])
        .unwrap();
    let texts: Vec<&str> = result.texts().collect();
    assert_eq!(texts, ["if x ", "y", "z", " w"]);
    assert_eq!(
        result.matches,
        [
            Some("then ".to_string()),
            Some(" => ".to_string()),
            Some(";".to_string())
        ]
    );
}

#[test]
fn reg_lex_respects_flag_strings() {
    let flags: RegexFlags = "gi".parse().unwrap();
    let options = LexOptions {
        use_regex: Some(flags),
        ..uncached()
    };
    let tokens = Lexer::new("oneANDtwoandthree", options)
        .split(&delims!["and"])
        .unwrap();
    assert_eq!(tokens, ["one", "two", "three"]);
}

#[test]
fn unknown_regex_flag_is_an_error() {
    let err = "iq".parse::<RegexFlags>().unwrap_err();
    assert_eq!(err, LexError::InvalidRegexFlag('q'));
}

#[test]
fn stop_characters_report_the_rest() {
    let options = LexOptions {
        stop_chars: vec![Delimiter::from(" where ")],
        ..uncached()
    };
    let result = lex("a, b, (c where d) where e, f", &delims![","], options).unwrap();
    let texts: Vec<&str> = result.texts().collect();
    assert_eq!(texts, ["a", " b", " (c where d)"]);
    let stop = result.stop.unwrap();
    assert_eq!(stop.matched, " where ");
    assert_eq!(stop.rest, " where e, f");
}

#[test]
fn lexer_exposes_input_and_options() {
    let lexer = Lexer::new("a|b", uncached());
    assert_eq!(lexer.input(), "a|b");
    assert!(!lexer.options().cache);
    assert_eq!(lexer.split(&delims!['|']).unwrap(), ["a", "b"]);
}

#[cfg(feature = "serde")]
#[test]
fn tokens_serialize_with_their_comments() {
    let tokens = split("a/*c*/,b", &delims![","], uncached()).unwrap();
    let json = serde_json::to_string(&tokens).unwrap();
    assert_eq!(
        json,
        r#"[{"text":"a","comments":["c"]},{"text":"b","comments":[]}]"#
    );
    let back: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tokens);
}
