// src/bin/pemdas_eval.rs
// Parse arithmetic with the embedded pemdas tables and print the value.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tablerun::{
    ast::AstMode,
    cli::{InputMode, collect_inputs},
    dev::pemdas::evaluate,
    grammars::Grammar,
};

#[derive(Debug, Parser)]
#[command(name = "pemdas_eval", about = "Evaluate integer arithmetic")]
struct Opts {
    /// Print the tree before evaluating.
    #[arg(short = 'v')]
    verbose: bool,

    /// `expr`: arguments are expressions; `file`: arguments are paths (none = stdin).
    #[arg(value_enum)]
    mode: InputMode,

    args: Vec<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let grammar = Grammar::load("pemdas")?;

    for input in collect_inputs(opts.mode, &opts.args)? {
        let ast = grammar
            .parse(&input.text, AstMode::DefaultHints)
            .with_context(|| format!("{}: parse failed", input.label))?
            .ok_or_else(|| anyhow!("{}: no tree", input.label))?;
        if opts.verbose {
            print!("{ast}");
        }
        let v = evaluate(&ast).with_context(|| format!("{}: evaluation failed", input.label))?;
        println!("{v}");
    }
    Ok(())
}
