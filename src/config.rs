// src/config.rs
// Environment knobs shared by the binaries and tests.

use std::path::PathBuf;

use crate::{ast::AstMode, error::ConfigError};

/// Directory searched for `<grammar>-lex.json` / `<grammar>-parse.json`
/// before falling back to the embedded tables.
pub const TABLES_DIR_VAR: &str = "TABLERUN_TABLES_DIR";
/// Default AST mode: `hints`, `fullast` or `noast`.
pub const AST_MODE_VAR: &str = "TABLERUN_AST_MODE";
/// Turns on every parse trace kind in `tryparse`.
pub const TRACE_VAR: &str = "TABLERUN_TRACE";

/// Unset gives `default`; empty, `0`, `false`, `no` and `off` are false.
pub fn env_flag_true(var: &str, default: bool) -> bool {
    match std::env::var(var) {
        Ok(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "no" | "off"
        ),
        Err(_) => default,
    }
}

pub fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

pub fn trace_all() -> bool {
    env_flag_true(TRACE_VAR, false)
}

pub fn tables_dir() -> Option<PathBuf> {
    std::env::var_os(TABLES_DIR_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// AST mode from the command line flags, or from the environment when
/// neither flag is given.
pub fn ast_mode(no_ast: bool, full_ast: bool) -> Result<AstMode, ConfigError> {
    if no_ast || full_ast {
        return AstMode::from_flags(no_ast, full_ast);
    }
    match std::env::var(AST_MODE_VAR) {
        Ok(v) => v.trim().to_ascii_lowercase().parse(),
        Err(_) => Ok(AstMode::DefaultHints),
    }
}
