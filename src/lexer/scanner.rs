// src/lexer/scanner.rs
// Table-driven longest-match scanner over a whole in-memory input.

use super::tables::LexTables;
use crate::token::{Location, Token, is_ignored};

/// Anything that hands tokens to the parser, one at a time.
pub trait TokenSource {
    /// Next token; `EOF` once input is exhausted, on every later call too.
    fn next_token(&mut self) -> Token;
}

pub struct Scanner<'t, 'i> {
    tables: &'t LexTables,
    input: &'i str,
    cursor: Location,
    // set once EOF has been handed out by the iterator
    finished: bool,
}

impl<'t, 'i> Scanner<'t, 'i> {
    pub fn new(tables: &'t LexTables, input: &'i str) -> Self {
        Self {
            tables,
            input,
            cursor: Location::default(),
            finished: false,
        }
    }

    /// Position of the next unscanned character.
    pub fn location(&self) -> Location {
        self.cursor
    }

    fn peek_char(&self, at: usize) -> Option<char> {
        self.input[at..].chars().next()
    }

    /// Walk the DFA from the cursor; returns the last accepting state and the
    /// location just past it, if any prefix was accepted.
    fn longest_match(&self) -> Option<(u32, Location)> {
        let mut state = self.tables.start_state;
        let mut scan = self.cursor;
        let mut last_accept = None;

        while let Some(c) = self.peek_char(scan.byte_offset) {
            let Some(next) = self.tables.step(state, c) else {
                break;
            };
            scan.advance(c);
            state = next;
            if self.tables.action(state).is_some() {
                last_accept = Some((state, scan));
            }
        }
        last_accept
    }
}

impl TokenSource for Scanner<'_, '_> {
    fn next_token(&mut self) -> Token {
        loop {
            let start = self.cursor;
            let Some(c) = self.peek_char(start.byte_offset) else {
                return Token::eof(start);
            };

            let Some((accept_state, end)) = self.longest_match() else {
                // Skip the offending character so the next call makes progress.
                self.cursor.advance(c);
                return Token::error(
                    format!("lexer: unrecognized input {c:?} at {start}"),
                    start,
                );
            };

            self.cursor = end;
            let token_type = self.tables.action(accept_state).unwrap_or_default();
            if is_ignored(token_type) {
                continue;
            }
            let lexeme = &self.input[start.byte_offset..end.byte_offset];
            return Token::new(token_type, lexeme, start);
        }
    }
}

impl Iterator for Scanner<'_, '_> {
    type Item = Token;

    /// Every non-EOF token, error tokens included; ends at EOF.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let tok = self.next_token();
        if tok.is_eof() {
            self.finished = true;
            return None;
        }
        Some(tok)
    }
}

impl std::iter::FusedIterator for Scanner<'_, '_> {}

/// Lex the whole input eagerly, stopping at (and including) the first error.
pub fn lex_all(tables: &LexTables, input: &str) -> Result<Vec<Token>, Token> {
    let mut out = Vec::new();
    for tok in Scanner::new(tables, input) {
        if tok.is_error() {
            return Err(tok);
        }
        out.push(tok);
    }
    Ok(out)
}
