// src/lexer/mod.rs
pub mod scanner;
pub mod tables;

pub use scanner::{Scanner, TokenSource, lex_all};
pub use tables::LexTables;
