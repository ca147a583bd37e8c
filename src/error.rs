// src/error.rs
use thiserror::Error;

use crate::token::{Location, Token};

/// Malformed or inconsistent tables, or a contradictory mode selection.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to decode {what} tables JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("lexer state {state}: range {from}..={to} is inverted")]
    InvertedRange { state: u32, from: u32, to: u32 },

    #[error("lexer state {state}: ranges {a_from}..={a_to} and {b_from}..={b_to} overlap")]
    OverlappingRanges {
        state: u32,
        a_from: u32,
        a_to: u32,
        b_from: u32,
        b_to: u32,
    },

    #[error("state {state}, terminal {terminal:?}: unknown action type {kind:?}")]
    UnknownActionType {
        state: u32,
        terminal: String,
        kind: String,
    },

    #[error("state {state}, terminal {terminal:?}: {kind} action has no target")]
    MissingActionTarget {
        state: u32,
        terminal: String,
        kind: &'static str,
    },

    #[error("state {state}, terminal {terminal:?}: reduce by production {production}, but only {count} productions exist")]
    ReduceOutOfRange {
        state: u32,
        terminal: String,
        production: usize,
        count: usize,
    },

    #[error("production {production} ({lhs}): {reason}")]
    InvalidHint {
        production: usize,
        lhs: String,
        reason: String,
    },

    #[error("production {production} ({lhs}): hint index {index} out of range for {len} children")]
    HintIndex {
        production: usize,
        lhs: String,
        index: usize,
        len: usize,
    },

    #[error("reduction by {lhs} expects {expected} children, got {got}")]
    ChildCount {
        lhs: String,
        expected: usize,
        got: usize,
    },

    #[error("reduction by {lhs} pops {needed} entries but the stack holds {depth}")]
    StackUnderflow {
        lhs: String,
        needed: usize,
        depth: usize,
    },

    #[error("reduction by {lhs}: stack entry carries no node")]
    MissingNode { lhs: String },

    #[error("no goto from state {state} on {lhs}")]
    MissingGoto { state: u32, lhs: String },

    #[error("accept with unexpected parse stack size {0}")]
    AcceptStackSize(usize),

    #[error("unknown AST mode {0:?} (expected \"\", \"hints\", \"fullast\" or \"noast\")")]
    UnknownAstMode(String),

    #[error("cannot use noast and fullast together")]
    ConflictingAstModes,
}

/// Terminal failure of a parse call. No partial tree is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("lexer error at {location}: {message}")]
    Lexical { message: String, location: Location },

    #[error("{}", syntax_message(.state, .found, .expected))]
    Syntax {
        state: u32,
        found: Token,
        expected: Vec<String>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn syntax_message(state: &u32, found: &Token, expected: &[String]) -> String {
    let mut msg = format!(
        "parse error: unexpected {} ({:?}) in state {state}",
        found.token_type, found.lexeme
    );
    if let Some(loc) = found.location {
        msg.push_str(&format!(" at {loc}"));
    }
    if !expected.is_empty() {
        msg.push_str(&format!("; expected one of: {}", expected.join(", ")));
    }
    msg
}

impl ParseError {
    /// Where the failure happened, when the input position is known.
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::Lexical { location, .. } => Some(*location),
            ParseError::Syntax { found, .. } => found.location,
            ParseError::Config(_) => None,
        }
    }
}
