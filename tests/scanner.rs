//! Scanner behaviour: longest match, backtracking, ignored classes, locations, EOF.

use tablerun::{
    grammars::Grammar,
    lexer::{
        LexTables, Scanner, TokenSource, lex_all, tables::load_lex_tables_json_bytes,
    },
    token::{EOF, ERROR, Location},
};

fn pemdas() -> Grammar {
    Grammar::embedded("pemdas").expect("embedded pemdas tables")
}

fn types_and_lexemes(tables: &LexTables, src: &str) -> Vec<(String, String)> {
    Scanner::new(tables, src)
        .map(|t| (t.token_type, t.lexeme))
        .collect()
}

/// `a` and `abc` are tokens, `ab` is not.
fn backtrack_tables() -> LexTables {
    load_lex_tables_json_bytes(
        br#"{
            "start_state": 0,
            "transitions": {
                "0": [{"from": 97, "to": 97, "next": 1}, {"from": 32, "to": 32, "next": 4}],
                "1": [{"from": 98, "to": 98, "next": 2}],
                "2": [{"from": 99, "to": 99, "next": 3}]
            },
            "actions": {"1": "A", "3": "ABC", "4": "!space"}
        }"#,
    )
    .expect("valid tables")
}

#[test]
fn longest_match_prefers_longer_token() {
    let g = pemdas();
    let got = types_and_lexemes(&g.lex, "2**3*4");
    let want: Vec<(String, String)> = [
        ("int_literal", "2"),
        ("power", "**"),
        ("int_literal", "3"),
        ("times", "*"),
        ("int_literal", "4"),
    ]
    .iter()
    .map(|(t, l)| (t.to_string(), l.to_string()))
    .collect();
    assert_eq!(got, want);
}

#[test]
fn backtracks_to_last_accepting_mark() {
    let t = backtrack_tables();
    assert_eq!(
        types_and_lexemes(&t, "abc a"),
        vec![
            ("ABC".to_string(), "abc".to_string()),
            ("A".to_string(), "a".to_string())
        ]
    );

    // "ab" walks into a non-accepting state; the scanner must give back "b".
    let mut s = Scanner::new(&t, "ab");
    let a = s.next_token();
    assert_eq!((a.token_type.as_str(), a.lexeme.as_str()), ("A", "a"));
    let err = s.next_token();
    assert_eq!(err.token_type, ERROR);
    assert_eq!(err.location, Some(Location::new(1, 2, 1)));
    assert!(s.next_token().is_eof());
}

#[test]
fn ignored_tokens_are_transparent() {
    let g = pemdas();
    let tight = types_and_lexemes(&g.lex, "(2+3)*-4");
    let loose = types_and_lexemes(&g.lex, " ( 2\t+\n3 )\r\n*  - 4 \n");
    assert_eq!(tight, loose);
    assert!(tight.iter().all(|(t, _)| !t.starts_with('!')));
}

#[test]
fn locations_track_lines_columns_and_bytes() {
    let g = pemdas();
    let toks: Vec<_> = Scanner::new(&g.lex, "1 +\n 22").collect();
    let locs: Vec<Location> = toks.iter().map(|t| t.location.unwrap()).collect();
    assert_eq!(
        locs,
        vec![
            Location::new(1, 1, 0),
            Location::new(1, 3, 2),
            Location::new(2, 2, 5),
        ]
    );
}

#[test]
fn columns_count_characters_not_bytes() {
    let t = load_lex_tables_json_bytes(
        br#"{
            "start_state": 0,
            "transitions": {
                "0": [
                    {"from": 128, "to": 1114111, "next": 2},
                    {"from": 97, "to": 122, "next": 1},
                    {"from": 32, "to": 32, "next": 3}
                ],
                "1": [{"from": 97, "to": 122, "next": 1}]
            },
            "actions": {"1": "ident", "2": "wide", "3": "!ws"}
        }"#,
    )
    .unwrap();
    let toks: Vec<_> = Scanner::new(&t, "éé ab").collect();
    let got: Vec<(&str, &str, Location)> = toks
        .iter()
        .map(|t| (t.token_type.as_str(), t.lexeme.as_str(), t.location.unwrap()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("wide", "é", Location::new(1, 1, 0)),
            ("wide", "é", Location::new(1, 2, 2)),
            ("ident", "ab", Location::new(1, 4, 5)),
        ]
    );
}

#[test]
fn eof_is_idempotent() {
    let g = pemdas();
    let mut s = Scanner::new(&g.lex, "7 \n");
    assert_eq!(s.next_token().lexeme, "7");
    let first = s.next_token();
    assert_eq!(first.token_type, EOF);
    assert_eq!(first.lexeme, "");
    assert_eq!(first.location, Some(Location::new(2, 1, 3)));
    for _ in 0..3 {
        assert_eq!(s.next_token(), first);
    }
}

#[test]
fn empty_input_is_just_eof() {
    let g = pemdas();
    let mut s = Scanner::new(&g.lex, "");
    assert_eq!(s.next_token(), tablerun::token::Token::eof(Location::default()));
    assert!(lex_all(&g.lex, "   ").unwrap().is_empty());
}

#[test]
fn unrecognized_character_becomes_error_token_and_scanning_resumes() {
    let g = pemdas();
    let toks: Vec<_> = Scanner::new(&g.lex, "2 $ 3").collect();
    assert_eq!(toks.len(), 3);
    assert_eq!(toks[0].lexeme, "2");
    assert!(toks[1].is_error());
    assert_eq!(toks[1].lexeme, "lexer: unrecognized input '$' at 1:3");
    assert_eq!(toks[1].location, Some(Location::new(1, 3, 2)));
    assert_eq!(toks[2].lexeme, "3");
    assert_eq!(toks[2].location, Some(Location::new(1, 5, 4)));
}

#[test]
fn empty_language_tables_only_produce_errors_and_eof() {
    let t = load_lex_tables_json_bytes(br#"{"start_state": 0, "transitions": {}, "actions": {"5": "x"}}"#)
        .unwrap();
    let mut s = Scanner::new(&t, "ab");
    assert!(s.next_token().is_error());
    assert!(s.next_token().is_error());
    assert!(s.next_token().is_eof());
}

#[test]
fn token_source_and_iterator_share_one_cursor() {
    let g = pemdas();
    let mut s = Scanner::new(&g.lex, "1 + 22\n* 3");
    assert_eq!(s.location(), Location::default());
    assert_eq!(s.next_token().lexeme, "1");
    assert_eq!(s.location(), Location::new(1, 2, 1));

    let rest: Vec<String> = s.by_ref().map(|t| t.lexeme).collect();
    assert_eq!(rest, ["+", "22", "*", "3"]);
    assert!(s.next_token().is_eof());
    assert_eq!(s.location(), Location::new(2, 4, 10));
}
