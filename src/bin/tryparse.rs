// src/bin/tryparse.rs
// Parse inputs with a table set and print the resulting tree.
//
//   tryparse -e pemdas '1 + 2 * 3'
//   tryparse --states --stack -e pemdas '2 ** 3'
//   tryparse --fullast json doc.json      (one input per file)
//   TABLERUN_TRACE=1 tryparse -e list '[1, 2]'

use anyhow::{Context, Result};
use clap::Parser;
use tablerun::{
    cli::{GrammarArgs, InputMode, collect_inputs},
    config,
    parser::CliTrace,
};

#[derive(Debug, Parser)]
#[command(name = "tryparse", about = "Run a table-driven parser over inputs")]
struct Opts {
    /// Print tokens as they are read.
    #[arg(long)]
    tokens: bool,
    /// Show parser state transitions.
    #[arg(long)]
    states: bool,
    /// Show the parse stack after each action.
    #[arg(long)]
    stack: bool,
    /// Check syntax only; build no tree.
    #[arg(long)]
    noast: bool,
    /// Ignore hints; one node per reduction.
    #[arg(long)]
    fullast: bool,
    /// Print the tree as a parenthesized expression.
    #[arg(long)]
    parex: bool,
    /// Inputs are expressions instead of files.
    #[arg(short = 'e', long = "expr")]
    expr: bool,

    #[command(flatten)]
    grammar: GrammarArgs,

    /// Expressions with -e; otherwise files, each parsed whole (none = stdin).
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let mode = config::ast_mode(opts.noast, opts.fullast)?;
    let grammar = opts.grammar.resolve()?;
    let input_mode = if opts.expr {
        InputMode::Expr
    } else {
        InputMode::File
    };
    let all = config::trace_all();
    let mut trace = CliTrace::new(opts.tokens || all, opts.states || all, opts.stack || all);

    for input in collect_inputs(input_mode, &opts.inputs)? {
        let parsed = if trace.is_quiet() {
            grammar.parse(&input.text, mode)
        } else {
            grammar.parse_observed(&input.text, mode, &mut trace)
        };
        let ast = parsed.with_context(|| format!("{}: {}", input.label, input.text))?;
        match ast {
            Some(ast) if opts.parex => print!("{}", ast.root.parex()),
            Some(ast) => print!("{ast}"),
            None => println!("ok"),
        }
    }
    Ok(())
}
