// src/parser/trace.rs
// Diagnostic hooks on the parse loop. Observers see decisions; they never steer them.

use super::{engine::StackEntry, tables::Action};
use crate::token::Token;

pub trait ParseObserver {
    /// A token was pulled from the scanner.
    fn on_token(&mut self, _tok: &Token) {}
    /// About to apply `action` in `state` with `lookahead`.
    fn on_action(&mut self, _state: u32, _action: &Action, _lookahead: &Token) {}
    /// Stack after a shift, reduce or accept.
    fn on_stack(&mut self, _stack: &[StackEntry]) {}
}

/// Observer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl ParseObserver for NoTrace {}

/// Prints the selected event kinds to stderr, one line each.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliTrace {
    pub tokens: bool,
    pub states: bool,
    pub stack: bool,
}

impl CliTrace {
    pub fn new(tokens: bool, states: bool, stack: bool) -> Self {
        Self {
            tokens,
            states,
            stack,
        }
    }

    pub fn is_quiet(&self) -> bool {
        !(self.tokens || self.states || self.stack)
    }
}

pub fn format_token(tok: &Token) -> String {
    let mut s = format!("TOK type={} lexeme={:?}", tok.token_type, tok.lexeme);
    if let Some(loc) = tok.location {
        s.push_str(&format!(" line={} col={}", loc.line, loc.column));
    }
    s
}

pub fn format_action(state: u32, action: &Action, lookahead: &Token) -> String {
    let on = format!("{}({:?})", lookahead.token_type, lookahead.lexeme);
    match action {
        Action::Shift(t) => format!("STATE {state} shift on {on} -> {t}"),
        Action::Reduce(p) => format!("STATE {state} reduce by {p} on {on}"),
        Action::Accept => format!("STATE {state} accept on {on}"),
    }
}

pub fn format_stack(stack: &[StackEntry]) -> String {
    let states: Vec<String> = stack.iter().map(|e| e.state.to_string()).collect();
    let nodes: Vec<&str> = stack
        .iter()
        .filter_map(|e| e.node.as_ref().map(|n| n.node_type.as_str()))
        .collect();
    format!("STACK states=[{}] nodes=[{}]", states.join(" "), nodes.join(" "))
}

impl ParseObserver for CliTrace {
    fn on_token(&mut self, tok: &Token) {
        if self.tokens {
            eprintln!("{}", format_token(tok));
        }
    }

    fn on_action(&mut self, state: u32, action: &Action, lookahead: &Token) {
        if self.states {
            eprintln!("{}", format_action(state, action, lookahead));
        }
    }

    fn on_stack(&mut self, stack: &[StackEntry]) {
        if self.stack {
            eprintln!("{}", format_stack(stack));
        }
    }
}
