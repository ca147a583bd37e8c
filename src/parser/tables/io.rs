// src/parser/tables/io.rs
use std::{
    collections::BTreeMap,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::{Action, HintMode, ParseTables, Production, Symbol};
use crate::{ast::hint::HintDisk, error::ConfigError};

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct ActionDisk {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<u64>,
}

#[derive(Serialize, Deserialize)]
struct ProductionDisk {
    lhs: String,
    #[serde(default)]
    rhs: Vec<Symbol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<HintDisk>,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct ParseTablesDisk {
    #[serde(default)]
    start_symbol: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    start_state: u32,
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    actions: BTreeMap<u32, BTreeMap<String, ActionDisk>>,
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    #[serde(default)]
    gotos: BTreeMap<u32, BTreeMap<String, u32>>,
    productions: Vec<ProductionDisk>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    hint_mode: String,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

impl From<&ParseTables> for ParseTablesDisk {
    fn from(t: &ParseTables) -> Self {
        let actions: BTreeMap<u32, BTreeMap<String, ActionDisk>> = t
            .actions
            .iter()
            .map(|(&state, row)| {
                let row = row
                    .iter()
                    .map(|(term, act)| {
                        let (kind, target) = match *act {
                            Action::Shift(s) => ("shift", Some(s as u64)),
                            Action::Reduce(p) => ("reduce", Some(p as u64)),
                            Action::Accept => ("accept", None),
                        };
                        (
                            term.clone(),
                            ActionDisk {
                                kind: kind.to_string(),
                                target,
                            },
                        )
                    })
                    .collect::<BTreeMap<_, _>>();
                (state, row)
            })
            .collect();
        let gotos: BTreeMap<u32, BTreeMap<String, u32>> = t
            .gotos
            .iter()
            .map(|(&state, row)| {
                let row = row.iter().map(|(nt, &s)| (nt.clone(), s)).collect::<BTreeMap<_, _>>();
                (state, row)
            })
            .collect();
        let productions = t
            .productions
            .iter()
            .map(|p| ProductionDisk {
                lhs: p.lhs.clone(),
                rhs: p.rhs.clone(),
                hint: p.hint.as_ref().map(HintDisk::from),
            })
            .collect();
        Self {
            start_symbol: t.start_symbol.clone(),
            start_state: t.start_state,
            actions,
            gotos,
            productions,
            metadata: t.metadata.clone(),
            hint_mode: match t.hint_mode {
                HintMode::None => String::new(),
                HintMode::Hints => "hints".to_string(),
            },
        }
    }
}

impl ParseTablesDisk {
    fn into_tables(self) -> Result<ParseTables, ConfigError> {
        let mut productions = Vec::with_capacity(self.productions.len());
        for (id, p) in self.productions.into_iter().enumerate() {
            let hint = p
                .hint
                .map(|h| h.into_hint(id, &p.lhs, p.rhs.len()))
                .transpose()?;
            productions.push(Production {
                id,
                lhs: p.lhs,
                rhs: p.rhs,
                hint,
            });
        }

        let mut actions = HashMap::with_capacity(self.actions.len());
        for (state, row) in self.actions {
            let mut decoded = HashMap::with_capacity(row.len());
            for (terminal, a) in row {
                let action = decode_action(state, &terminal, a, productions.len())?;
                decoded.insert(terminal, action);
            }
            actions.insert(state, decoded);
        }

        let gotos: HashMap<u32, HashMap<String, u32>> = self
            .gotos
            .into_iter()
            .map(|(state, row)| (state, row.into_iter().collect::<HashMap<_, _>>()))
            .collect();

        let hinted = productions.iter().filter(|p| p.hint.is_some()).count();
        let hint_mode = match self.hint_mode.as_str() {
            "hints" => HintMode::Hints,
            "" if hinted > 0 => {
                log::warn!("{hinted} productions carry hints but hint_mode is empty; honoring them");
                HintMode::Hints
            }
            "" => HintMode::None,
            other => {
                log::warn!("unknown hint_mode {other:?}; treating as \"hints\"");
                HintMode::Hints
            }
        };

        Ok(ParseTables {
            start_symbol: self.start_symbol,
            start_state: self.start_state,
            actions,
            gotos,
            productions,
            hint_mode,
            metadata: self.metadata,
        })
    }
}

fn decode_action(
    state: u32,
    terminal: &str,
    a: ActionDisk,
    n_productions: usize,
) -> Result<Action, ConfigError> {
    let missing = |kind: &'static str| ConfigError::MissingActionTarget {
        state,
        terminal: terminal.to_string(),
        kind,
    };
    match a.kind.as_str() {
        "shift" => {
            let target = a.target.ok_or_else(|| missing("shift"))?;
            let target = u32::try_from(target).map_err(|_| missing("shift"))?;
            Ok(Action::Shift(target))
        }
        "reduce" => {
            let target = a.target.ok_or_else(|| missing("reduce"))? as usize;
            if target >= n_productions {
                return Err(ConfigError::ReduceOutOfRange {
                    state,
                    terminal: terminal.to_string(),
                    production: target,
                    count: n_productions,
                });
            }
            Ok(Action::Reduce(target))
        }
        "accept" => Ok(Action::Accept),
        other => Err(ConfigError::UnknownActionType {
            state,
            terminal: terminal.to_string(),
            kind: other.to_string(),
        }),
    }
}

pub fn load_parse_tables_json_bytes(data: &[u8]) -> Result<ParseTables, ConfigError> {
    let disk = serde_json::from_slice::<ParseTablesDisk>(data).map_err(|source| {
        ConfigError::Json {
            what: "parser",
            source,
        }
    })?;
    let tables = disk.into_tables()?;
    log::debug!(
        "loaded parser tables: {} states, {} productions, start symbol {:?}, hint mode {:?}",
        tables.actions.len(),
        tables.productions.len(),
        tables.start_symbol,
        tables.hint_mode
    );
    Ok(tables)
}

pub fn load_parse_tables_json(path: &Path) -> anyhow::Result<ParseTables> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read parser tables at {}", path.display()))?;
    load_parse_tables_json_bytes(&data)
        .with_context(|| format!("invalid parser tables in {}", path.display()))
}

pub fn save_parse_tables_json(path: &Path, t: &ParseTables) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &ParseTablesDisk::from(t))?;
    w.flush()
}
