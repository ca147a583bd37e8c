// src/grammars.rs
// Table sets compiled into the binary, with an on-disk override.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::{
    ast::{Ast, AstMode},
    config,
    error::ParseError,
    lexer::{
        Scanner,
        tables::{LexTables, load_lex_tables_json, load_lex_tables_json_bytes},
    },
    parser::{
        ParseObserver, Parser,
        tables::{ParseTables, load_parse_tables_json, load_parse_tables_json_bytes},
    },
};

/// (name, lexer JSON, parser JSON)
const EMBEDDED: &[(&str, &str, &str)] = &[
    (
        "pemdas",
        include_str!("../tables/pemdas-lex.json"),
        include_str!("../tables/pemdas-parse.json"),
    ),
    (
        "list",
        include_str!("../tables/list-lex.json"),
        include_str!("../tables/list-parse.json"),
    ),
    (
        "json",
        include_str!("../tables/json-lex.json"),
        include_str!("../tables/json-parse.json"),
    ),
];

/// Names of the embedded grammars.
pub fn names() -> impl Iterator<Item = &'static str> {
    EMBEDDED.iter().map(|(n, _, _)| *n)
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub name: String,
    pub lex: LexTables,
    pub parse: ParseTables,
}

impl Grammar {
    pub fn embedded(name: &str) -> Result<Self> {
        let Some((_, lex, parse)) = EMBEDDED.iter().find(|(n, _, _)| *n == name) else {
            bail!(
                "unknown grammar {name:?} (known: {})",
                names().collect::<Vec<_>>().join(", ")
            );
        };
        Ok(Self {
            name: name.to_string(),
            lex: load_lex_tables_json_bytes(lex.as_bytes())
                .with_context(|| format!("embedded lexer tables for {name}"))?,
            parse: load_parse_tables_json_bytes(parse.as_bytes())
                .with_context(|| format!("embedded parser tables for {name}"))?,
        })
    }

    pub fn from_files(name: &str, lex: &Path, parse: &Path) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            lex: load_lex_tables_json(lex)?,
            parse: load_parse_tables_json(parse)?,
        })
    }

    /// `$TABLERUN_TABLES_DIR/<name>-{lex,parse}.json` when both exist,
    /// otherwise the embedded copy.
    pub fn load(name: &str) -> Result<Self> {
        if let Some(dir) = config::tables_dir() {
            let lex = dir.join(format!("{name}-lex.json"));
            let parse = dir.join(format!("{name}-parse.json"));
            if lex.exists() && parse.exists() {
                log::debug!("loading {name} tables from {}", dir.display());
                return Self::from_files(name, &lex, &parse);
            }
        }
        Self::embedded(name)
    }

    /// Scan and parse `input` in one call.
    pub fn parse(&self, input: &str, mode: AstMode) -> Result<Option<Ast>, ParseError> {
        let mut scanner = Scanner::new(&self.lex, input);
        Parser::new(&self.parse).parse(&mut scanner, mode)
    }

    pub fn parse_observed(
        &self,
        input: &str,
        mode: AstMode,
        observer: &mut dyn ParseObserver,
    ) -> Result<Option<Ast>, ParseError> {
        let mut scanner = Scanner::new(&self.lex, input);
        Parser::new(&self.parse).parse_observed(&mut scanner, mode, observer)
    }
}
