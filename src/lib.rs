// src/lib.rs
pub mod ast;
pub mod cli;
pub mod config;
pub mod dev;
pub mod error;
pub mod grammars;
pub mod lexer;
pub mod parser;
pub mod token;
