// src/token.rs
//! Token and location values shared by the scanner, the parser and the AST.

use std::fmt;

/// End-of-input sentinel type.
pub const EOF: &str = "EOF";
/// Lexical-error sentinel type; the lexeme carries the diagnostic.
pub const ERROR: &str = "!error";
/// Token types starting with this marker are dropped by the scanner.
pub const IGNORED_PREFIX: char = '!';

#[inline]
pub fn is_ignored(token_type: &str) -> bool {
    token_type.starts_with(IGNORED_PREFIX)
}

/// Line and column are 1-based, `byte_offset` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            byte_offset: 0,
        }
    }
}

impl Location {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Step over one accepted character.
    #[inline]
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.byte_offset += c.len_utf8();
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: String,
    pub lexeme: String,
    /// `None` only for tokens synthesized by a `parent_literal` hint.
    pub location: Option<Location>,
}

impl Token {
    pub fn new(token_type: impl Into<String>, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            token_type: token_type.into(),
            lexeme: lexeme.into(),
            location: Some(location),
        }
    }

    pub fn eof(location: Location) -> Self {
        Self::new(EOF, "", location)
    }

    pub fn error(message: impl Into<String>, location: Location) -> Self {
        Self::new(ERROR, message, location)
    }

    /// A token that stands for literal text rather than a span of input.
    pub fn synthetic(text: &str) -> Self {
        Self {
            token_type: text.to_string(),
            lexeme: text.to_string(),
            location: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == EOF
    }

    pub fn is_error(&self) -> bool {
        self.token_type == ERROR
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.token_type, self.lexeme)?;
        if let Some(loc) = self.location {
            write!(f, " at {loc}")?;
        }
        Ok(())
    }
}
