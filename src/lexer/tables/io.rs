// src/lexer/tables/io.rs
use std::{
    collections::BTreeMap,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::{LexTables, RangeTransition, dfa::normalize_ranges};
use crate::error::ConfigError;

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct LexTablesDisk {
    start_state: u32,
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    transitions: BTreeMap<u32, Vec<RangeTransition>>,
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    actions: BTreeMap<u32, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    rules: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
}

impl From<&LexTables> for LexTablesDisk {
    fn from(t: &LexTables) -> Self {
        Self {
            start_state: t.start_state,
            transitions: t
                .transitions
                .iter()
                .map(|(&s, rs)| (s, rs.clone()))
                .collect(),
            actions: t.actions.iter().map(|(&s, a)| (s, a.clone())).collect(),
            rules: t.rules.clone(),
            metadata: t.metadata.clone(),
        }
    }
}

impl LexTablesDisk {
    fn into_tables(self) -> Result<LexTables, ConfigError> {
        let mut transitions = hashbrown::HashMap::with_capacity(self.transitions.len());
        for (state, mut ranges) in self.transitions {
            normalize_ranges(state, &mut ranges)?;
            transitions.insert(state, ranges);
        }
        Ok(LexTables {
            start_state: self.start_state,
            transitions,
            actions: self.actions.into_iter().collect(),
            rules: self.rules,
            metadata: self.metadata,
        })
    }
}

pub fn load_lex_tables_json_bytes(data: &[u8]) -> Result<LexTables, ConfigError> {
    let disk = serde_json::from_slice::<LexTablesDisk>(data).map_err(|source| {
        ConfigError::Json {
            what: "lexer",
            source,
        }
    })?;
    let tables = disk.into_tables()?;
    log::debug!(
        "loaded lexer tables: {} states, {} accepting, start={}",
        tables.num_states(),
        tables.actions.len(),
        tables.start_state
    );
    Ok(tables)
}

pub fn load_lex_tables_json(path: &Path) -> anyhow::Result<LexTables> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read lexer tables at {}", path.display()))?;
    load_lex_tables_json_bytes(&data)
        .with_context(|| format!("invalid lexer tables in {}", path.display()))
}

pub fn save_lex_tables_json(path: &Path, t: &LexTables) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &LexTablesDisk::from(t))?;
    w.flush()
}
