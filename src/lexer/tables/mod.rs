// src/lexer/tables/mod.rs
pub mod dfa;
pub mod io;

use std::collections::BTreeMap;

use hashbrown::HashMap;

pub use dfa::RangeTransition;
pub use io::{load_lex_tables_json, load_lex_tables_json_bytes, save_lex_tables_json};

/// DFA tables driving the scanner. Immutable once loaded; share by reference.
#[derive(Debug, Clone, Default)]
pub struct LexTables {
    pub start_state: u32,
    /// Per state, ranges sorted by `from` and non-overlapping.
    pub transitions: HashMap<u32, Vec<RangeTransition>>,
    /// Accepting states -> token type (`!`-prefixed types are ignored).
    pub actions: HashMap<u32, String>,
    pub rules: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
}

impl LexTables {
    pub fn action(&self, state: u32) -> Option<&str> {
        self.actions.get(&state).map(String::as_str)
    }

    pub fn has_ignored_actions(&self) -> bool {
        self.actions.values().any(|t| crate::token::is_ignored(t))
    }

    pub fn num_states(&self) -> usize {
        let mut ids: hashbrown::HashSet<u32> = self.transitions.keys().copied().collect();
        for rs in self.transitions.values() {
            ids.extend(rs.iter().map(|r| r.next));
        }
        ids.extend(self.actions.keys().copied());
        ids.insert(self.start_state);
        ids.len()
    }
}
