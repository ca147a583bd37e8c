// src/parser/engine.rs
//! LR(1) shift/reduce loop over [`ParseTables`].

use super::{
    tables::{Action, ParseTables},
    trace::{NoTrace, ParseObserver, format_action},
};
use crate::{
    ast::{Ast, AstMode, AstNode, synthesize},
    error::{ConfigError, ParseError},
    lexer::TokenSource,
    token::Token,
};

/// One parse stack slot. The base entry and every entry in syntax-only mode
/// carry no node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    pub state: u32,
    pub node: Option<AstNode>,
}

/// Borrowing view over shared tables; cheap to create per call site.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    tables: &'t ParseTables,
}

impl<'t> Parser<'t> {
    pub fn new(tables: &'t ParseTables) -> Self {
        Self { tables }
    }

    /// Parse one complete input. `Ok(None)` only in [`AstMode::SyntaxOnly`].
    pub fn parse(
        &self,
        tokens: &mut impl TokenSource,
        mode: AstMode,
    ) -> Result<Option<Ast>, ParseError> {
        self.parse_observed(tokens, mode, &mut NoTrace)
    }

    pub fn parse_observed(
        &self,
        tokens: &mut impl TokenSource,
        mode: AstMode,
        observer: &mut dyn ParseObserver,
    ) -> Result<Option<Ast>, ParseError> {
        let t = self.tables;
        let mut stack = vec![StackEntry {
            state: t.start_state,
            node: None,
        }];
        let mut lookahead: Option<Token> = None;

        loop {
            let tok = match lookahead.take() {
                Some(tok) => tok,
                None => {
                    let tok = tokens.next_token();
                    observer.on_token(&tok);
                    if tok.is_error() {
                        return Err(lexical(tok));
                    }
                    tok
                }
            };

            let state = top_state(&stack);
            let Some(action) = t.action(state, &tok.token_type) else {
                log::trace!("state {state}: no action on {}", tok.token_type);
                return Err(ParseError::Syntax {
                    state,
                    expected: t.expected_terminals(state),
                    found: tok,
                });
            };
            observer.on_action(state, &action, &tok);
            log::trace!("{}", format_action(state, &action, &tok));

            match action {
                Action::Shift(next) => {
                    let node = mode.builds_tree().then(|| AstNode::terminal(tok));
                    stack.push(StackEntry { state: next, node });
                    observer.on_stack(&stack);
                }
                Action::Reduce(p) => {
                    self.reduce(&mut stack, p, mode, &tok)?;
                    observer.on_stack(&stack);
                    lookahead = Some(tok);
                }
                Action::Accept => {
                    observer.on_stack(&stack);
                    return accept(stack, mode).map_err(ParseError::from);
                }
            }
        }
    }

    fn reduce(
        &self,
        stack: &mut Vec<StackEntry>,
        production: usize,
        mode: AstMode,
        lookahead: &Token,
    ) -> Result<(), ConfigError> {
        // hand-built tables skip load-time checks
        let Some(prod) = self.tables.productions.get(production) else {
            return Err(ConfigError::ReduceOutOfRange {
                state: top_state(stack),
                terminal: lookahead.token_type.clone(),
                production,
                count: self.tables.productions.len(),
            });
        };
        let n = prod.rhs_length();
        // the base entry is never popped
        if stack.len() <= n {
            return Err(ConfigError::StackUnderflow {
                lhs: prod.lhs.clone(),
                needed: n,
                depth: stack.len() - 1,
            });
        }
        let popped = stack.split_off(stack.len() - n);

        let node = if mode.builds_tree() {
            let children = popped
                .into_iter()
                .map(|e| e.node)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ConfigError::MissingNode {
                    lhs: prod.lhs.clone(),
                })?;
            Some(synthesize(prod, children, mode)?)
        } else {
            None
        };

        let from = top_state(stack);
        let next = self
            .tables
            .goto(from, &prod.lhs)
            .ok_or_else(|| ConfigError::MissingGoto {
                state: from,
                lhs: prod.lhs.clone(),
            })?;
        stack.push(StackEntry { state: next, node });
        Ok(())
    }
}

fn top_state(stack: &[StackEntry]) -> u32 {
    stack.last().map_or(0, |e| e.state)
}

fn lexical(tok: Token) -> ParseError {
    ParseError::Lexical {
        location: tok.location.unwrap_or_default(),
        message: tok.lexeme,
    }
}

fn accept(mut stack: Vec<StackEntry>, mode: AstMode) -> Result<Option<Ast>, ConfigError> {
    if stack.len() != 2 {
        return Err(ConfigError::AcceptStackSize(stack.len()));
    }
    if !mode.builds_tree() {
        return Ok(None);
    }
    match stack.pop().and_then(|e| e.node) {
        Some(root) => Ok(Some(Ast::new(root))),
        None => Err(ConfigError::AcceptStackSize(stack.len() + 1)),
    }
}
