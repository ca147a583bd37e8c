// src/cli.rs
// Argument pieces shared by the command-line runners.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use crate::grammars::{self, Grammar};

/// Which table set to run.
#[derive(Debug, Clone, Args)]
pub struct GrammarArgs {
    /// Embedded grammar name (pemdas, list, json), or a label for external tables.
    pub grammar: String,

    /// Lexer tables JSON; overrides the embedded copy.
    #[arg(long, requires = "parse_tables")]
    pub lex_tables: Option<PathBuf>,

    /// Parser tables JSON; overrides the embedded copy.
    #[arg(long, requires = "lex_tables")]
    pub parse_tables: Option<PathBuf>,
}

impl GrammarArgs {
    pub fn resolve(&self) -> Result<Grammar> {
        match (&self.lex_tables, &self.parse_tables) {
            (Some(lex), Some(parse)) => Grammar::from_files(&self.grammar, lex, parse),
            _ => Grammar::load(&self.grammar).with_context(|| {
                format!(
                    "available grammars: {}",
                    grammars::names().collect::<Vec<_>>().join(", ")
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// Each argument is an input string.
    Expr,
    /// Each argument is a file path; none reads stdin.
    File,
}

/// One unit of work: where it came from and its text.
#[derive(Debug, Clone)]
pub struct Input {
    pub label: String,
    pub text: String,
}

/// Gather inputs. A file (or stdin) is one input, newlines included.
pub fn collect_inputs(mode: InputMode, args: &[String]) -> Result<Vec<Input>> {
    let mut out = Vec::new();
    match mode {
        InputMode::Expr => {
            if args.is_empty() {
                bail!("expr mode needs at least one input string");
            }
            for (i, a) in args.iter().enumerate() {
                out.push(Input {
                    label: format!("arg{}", i + 1),
                    text: a.clone(),
                });
            }
        }
        InputMode::File if args.is_empty() => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            out.push(Input {
                label: "<stdin>".to_string(),
                text,
            });
        }
        InputMode::File => {
            for a in args {
                let path = Path::new(a);
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                out.push(Input {
                    label: a.clone(),
                    text,
                });
            }
        }
    }
    Ok(out)
}
