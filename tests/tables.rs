//! Table loading: validation at load time and JSON round-trips.

use std::path::PathBuf;

use tablerun::{
    ast::{Hint, Parent},
    error::ConfigError,
    grammars::Grammar,
    lexer::tables::{load_lex_tables_json, load_lex_tables_json_bytes, save_lex_tables_json},
    parser::tables::{
        Action, HintMode, load_parse_tables_json, load_parse_tables_json_bytes,
        save_parse_tables_json,
    },
};

fn tmp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tablerun-{}-{name}", std::process::id()))
}

/// Minimal parser table around one production `S -> a b c` with `hint`.
fn with_hint(hint: &str) -> Result<tablerun::parser::ParseTables, ConfigError> {
    let json = format!(
        r#"{{
            "start_symbol": "S",
            "actions": {{"0": {{"a": {{"type": "shift", "target": 1}}}}}},
            "gotos": {{}},
            "productions": [
                {{"lhs": "__start", "rhs": [{{"name": "S", "terminal": false}}]}},
                {{"lhs": "S",
                  "rhs": [{{"name": "a", "terminal": true}},
                          {{"name": "b", "terminal": true}},
                          {{"name": "c", "terminal": true}}],
                  "hint": {hint}}}
            ],
            "hint_mode": "hints"
        }}"#
    );
    load_parse_tables_json_bytes(json.as_bytes())
}

fn with_action(action: &str) -> Result<tablerun::parser::ParseTables, ConfigError> {
    let json = format!(
        r#"{{
            "start_symbol": "S",
            "actions": {{"0": {{"x": {action}}}}},
            "productions": [{{"lhs": "__start", "rhs": []}}]
        }}"#
    );
    load_parse_tables_json_bytes(json.as_bytes())
}

#[test]
fn embedded_grammars_load() {
    for name in tablerun::grammars::names() {
        let g = Grammar::embedded(name).unwrap_or_else(|e| panic!("{name}: {e:#}"));
        assert!(!g.parse.productions.is_empty());
        assert_eq!(g.parse.hint_mode, HintMode::Hints);
        assert!(g.lex.has_ignored_actions());
    }
    assert!(Grammar::embedded("nope").is_err());
}

#[test]
fn transitions_are_sorted_at_load() {
    let t = load_lex_tables_json_bytes(
        br#"{"start_state": 0,
             "transitions": {"0": [{"from": 98, "to": 98, "next": 2}, {"from": 97, "to": 97, "next": 1}]},
             "actions": {"1": "a", "2": "b"}}"#,
    )
    .unwrap();
    assert_eq!(t.step(0, 'a'), Some(1));
    assert_eq!(t.step(0, 'b'), Some(2));
    assert_eq!(t.step(0, 'c'), None);
    assert_eq!(t.step(7, 'a'), None);
}

#[test]
fn inverted_range_is_rejected() {
    let err = load_lex_tables_json_bytes(
        br#"{"start_state": 0, "transitions": {"0": [{"from": 57, "to": 48, "next": 1}]}, "actions": {}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvertedRange { state: 0, from: 57, to: 48 }), "{err}");
}

#[test]
fn overlapping_ranges_are_rejected() {
    let err = load_lex_tables_json_bytes(
        br#"{"start_state": 0,
             "transitions": {"3": [{"from": 48, "to": 57, "next": 1}, {"from": 50, "to": 60, "next": 2}]},
             "actions": {}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::OverlappingRanges { state: 3, .. }), "{err}");
}

#[test]
fn non_integer_state_ids_are_rejected() {
    let err = load_lex_tables_json_bytes(
        br#"{"start_state": 0, "transitions": {"zero": []}, "actions": {}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Json { what: "lexer", .. }), "{err}");

    let err = load_parse_tables_json_bytes(br#"{"actions": {"s0": {}}, "productions": []}"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Json { what: "parser", .. }), "{err}");
}

#[test]
fn action_decoding() {
    let t = with_action(r#"{"type": "shift", "target": 4}"#).unwrap();
    assert_eq!(t.action(0, "x"), Some(Action::Shift(4)));
    assert_eq!(t.action(0, "y"), None);
    assert_eq!(t.start_state, 0);

    let t = with_action(r#"{"type": "accept"}"#).unwrap();
    assert_eq!(t.action(0, "x"), Some(Action::Accept));

    let err = with_action(r#"{"type": "goto", "target": 1}"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownActionType { ref kind, .. } if kind == "goto"), "{err}");

    let err = with_action(r#"{"type": "shift"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingActionTarget { kind: "shift", .. }), "{err}");

    let err = with_action(r#"{"type": "reduce"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingActionTarget { kind: "reduce", .. }), "{err}");

    let err = with_action(r#"{"type": "reduce", "target": 1}"#).unwrap_err();
    assert!(
        matches!(err, ConfigError::ReduceOutOfRange { production: 1, count: 1, .. }),
        "{err}"
    );
}

#[test]
fn hints_decode_into_closed_shapes() {
    let t = with_hint(r#"{"pass-through": 2}"#).unwrap();
    assert_eq!(t.productions[1].hint, Some(Hint::PassThrough(2)));
    assert_eq!(t.productions[0].hint, None);
    assert_eq!(t.productions[1].rhs_length(), 3);

    let t = with_hint(r#"{"children": [0, 2], "type": "op"}"#).unwrap();
    let Some(Hint::Structured(s)) = &t.productions[1].hint else {
        panic!("expected structured hint");
    };
    assert_eq!(s.parent, Parent::Index(0));
    assert_eq!(s.children, vec![0, 2]);
    assert_eq!(s.node_type.as_deref(), Some("op"));

    let t = with_hint(r#"{"parent_literal": "[]", "with_adopted_grandchildren": [1]}"#).unwrap();
    let Some(Hint::Structured(s)) = &t.productions[1].hint else {
        panic!("expected structured hint");
    };
    assert_eq!(s.parent, Parent::Literal("[]".to_string()));
    assert!(s.adopts());
}

#[test]
fn hint_indices_are_bounded_by_rhs_length() {
    for hint in [
        r#"{"pass-through": 3}"#,
        r#"{"parent": 3, "children": [0]}"#,
        r#"{"parent": 1, "children": [0, 5]}"#,
        r#"{"parent": 1, "with_appended_children": [3]}"#,
        r#"{"parent": 1, "with_prepended_children": [9]}"#,
        r#"{"parent_literal": "x", "with_adopted_grandchildren": [3]}"#,
    ] {
        let err = with_hint(hint).unwrap_err();
        assert!(
            matches!(err, ConfigError::HintIndex { production: 1, len: 3, .. }),
            "{hint}: {err}"
        );
    }
}

#[test]
fn contradictory_hints_are_rejected() {
    for hint in [
        r#"{"pass-through": 0, "parent": 1}"#,
        r#"{"pass-through": 0, "type": "x"}"#,
        r#"{"parent": 1, "parent_literal": "x"}"#,
        r#"{"parent": 1, "children": [0, 0]}"#,
        r#"{"parent": 1, "children": [0], "with_appended_children": [0]}"#,
        r#"{"parent": 1, "children": [2], "with_prepended_children": [2]}"#,
        r#"{"parent": 0, "with_adopted_grandchildren": [2], "with_appended_children": [2]}"#,
        r#"{"parent": 0, "with_appended_children": [1], "children": [0]}"#,
        r#"{"parent": 0, "with_prepended_children": [1], "with_adopted_grandchildren": [0]}"#,
        r#"{"parent": 0, "with_adopted_grandchildren": [1, 1]}"#,
    ] {
        let err = with_hint(hint).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHint { production: 1, .. }), "{hint}: {err}");
    }
}

#[test]
fn hints_without_hint_mode_are_honored() {
    let t = load_parse_tables_json_bytes(
        br#"{"start_symbol": "S", "actions": {},
             "productions": [{"lhs": "S", "rhs": [{"name": "a", "terminal": true}],
                              "hint": {"pass-through": 0}}]}"#,
    )
    .unwrap();
    assert_eq!(t.hint_mode, HintMode::Hints);

    let t = load_parse_tables_json_bytes(br#"{"actions": {}, "productions": []}"#).unwrap();
    assert_eq!(t.hint_mode, HintMode::None);
}

#[test]
fn expected_terminals_are_sorted() {
    let g = Grammar::embedded("pemdas").unwrap();
    assert_eq!(
        g.parse.expected_terminals(g.parse.start_state),
        vec!["int_literal", "lparen", "minus", "plus"]
    );
    assert!(g.parse.expected_terminals(9999).is_empty());
}

#[test]
fn tables_round_trip_through_files() {
    let g = Grammar::embedded("pemdas").unwrap();

    let lex_path = tmp_path("pemdas-lex.json");
    let parse_path = tmp_path("pemdas-parse.json");
    save_lex_tables_json(&lex_path, &g.lex).unwrap();
    save_parse_tables_json(&parse_path, &g.parse).unwrap();

    let lex = load_lex_tables_json(&lex_path).unwrap();
    let parse = load_parse_tables_json(&parse_path).unwrap();
    let _ = std::fs::remove_file(&lex_path);
    let _ = std::fs::remove_file(&parse_path);

    assert_eq!(lex.start_state, g.lex.start_state);
    assert_eq!(lex.transitions, g.lex.transitions);
    assert_eq!(lex.actions, g.lex.actions);
    assert_eq!(lex.rules, g.lex.rules);

    assert_eq!(parse.start_symbol, g.parse.start_symbol);
    assert_eq!(parse.actions, g.parse.actions);
    assert_eq!(parse.gotos, g.parse.gotos);
    assert_eq!(parse.productions, g.parse.productions);
    assert_eq!(parse.hint_mode, g.parse.hint_mode);
}

#[test]
fn missing_table_file_reports_path() {
    let path = tmp_path("does-not-exist.json");
    let err = load_parse_tables_json(&path).unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.json"));
}
