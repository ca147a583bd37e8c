// src/parser/mod.rs
pub mod engine;
pub mod tables;
pub mod trace;

pub use engine::{Parser, StackEntry};
pub use tables::{Action, ParseTables, Production, Symbol};
pub use trace::{CliTrace, ParseObserver};
