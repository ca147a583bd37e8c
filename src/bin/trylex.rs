// src/bin/trylex.rs
// Print the token stream of each input, one token per line.

use anyhow::{Result, bail};
use clap::Parser;
use tablerun::{
    cli::{GrammarArgs, InputMode, collect_inputs},
    lexer::Scanner,
};

#[derive(Debug, Parser)]
#[command(name = "trylex", about = "Run a table-driven scanner over inputs")]
struct Opts {
    #[command(flatten)]
    grammar: GrammarArgs,

    /// `expr`: arguments are inputs; `file`: arguments are paths (none = stdin).
    #[arg(value_enum)]
    mode: InputMode,

    args: Vec<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let grammar = opts.grammar.resolve()?;

    let mut errors = 0usize;
    for input in collect_inputs(opts.mode, &opts.args)? {
        for tok in Scanner::new(&grammar.lex, &input.text) {
            let loc = tok.location.unwrap_or_default();
            if tok.is_error() {
                errors += 1;
                eprintln!("{}: {}", input.label, tok.lexeme);
                continue;
            }
            println!(
                "{:>4}:{:<4} {:<16} {:?}",
                loc.line, loc.column, tok.token_type, tok.lexeme
            );
        }
    }
    if errors > 0 {
        bail!("{errors} lexical error(s)");
    }
    Ok(())
}
