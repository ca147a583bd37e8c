// src/parser/tables/mod.rs
pub mod io;

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub use io::{load_parse_tables_json, load_parse_tables_json_bytes, save_parse_tables_json};

use crate::ast::Hint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(u32),
    /// Index into [`ParseTables::productions`].
    Reduce(usize),
    Accept,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Shift(_) => "shift",
            Action::Reduce(_) => "reduce",
            Action::Accept => "accept",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    /// Position in the production list, for diagnostics.
    pub id: usize,
    pub lhs: String,
    pub rhs: Vec<Symbol>,
    pub hint: Option<Hint>,
}

impl Production {
    /// Stack entries popped by one reduction.
    #[inline]
    pub fn rhs_length(&self) -> usize {
        self.rhs.len()
    }
}

/// Whether the table author shipped AST hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintMode {
    #[default]
    None,
    Hints,
}

/// LR(1) action/goto tables. Immutable once loaded; share by reference.
#[derive(Debug, Clone, Default)]
pub struct ParseTables {
    pub start_symbol: String,
    pub start_state: u32,
    pub actions: HashMap<u32, HashMap<String, Action>>,
    pub gotos: HashMap<u32, HashMap<String, u32>>,
    pub productions: Vec<Production>,
    pub hint_mode: HintMode,
    pub metadata: BTreeMap<String, String>,
}

impl ParseTables {
    pub fn action(&self, state: u32, terminal: &str) -> Option<Action> {
        self.actions.get(&state)?.get(terminal).copied()
    }

    pub fn goto(&self, state: u32, nonterminal: &str) -> Option<u32> {
        self.gotos.get(&state)?.get(nonterminal).copied()
    }

    /// Terminals with an action in `state`, sorted.
    pub fn expected_terminals(&self, state: u32) -> Vec<String> {
        let mut out: Vec<String> = self
            .actions
            .get(&state)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        out.sort();
        out
    }
}
