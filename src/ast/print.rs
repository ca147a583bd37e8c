// src/ast/print.rs
// Text renderings of a tree: indented outline and parenthesized expressions.

use std::fmt::{self, Write};

use super::{Ast, AstNode};

const INDENT: &str = "    ";

impl AstNode {
    /// One line per node, pre-order, four spaces per level.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |n, depth| {
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            match &n.token {
                Some(tok) => {
                    let lexeme = tok.lexeme.replace('\n', "\\n");
                    let _ = write!(out, "\"{lexeme}\" [tt:{}] [nt:{}]", tok.token_type, n.node_type);
                }
                None => {
                    let _ = write!(out, "[nt:{}]", n.node_type);
                }
            }
            out.push('\n');
        });
        out
    }

    /// `(+ 1 (* 2 3))`
    pub fn parex_one_line(&self) -> String {
        let mut out = String::new();
        self.parex_one_line_into(&mut out);
        out
    }

    fn parex_one_line_into(&self, out: &mut String) {
        if self.is_leaf() {
            out.push_str(self.text());
            return;
        }
        out.push('(');
        out.push_str(self.text());
        for c in &self.children {
            out.push(' ');
            c.parex_one_line_into(out);
        }
        out.push(')');
    }

    /// Multi-line parenthesized form; nodes whose children are all leaves stay
    /// on one line.
    pub fn parex(&self) -> String {
        let mut out = String::new();
        self.parex_into(&mut out, 0);
        out
    }

    fn parex_into(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        if self.is_leaf() {
            let _ = writeln!(out, "{pad}{}", self.text());
        } else if self.children.iter().all(AstNode::is_leaf) {
            let _ = write!(out, "{pad}({}", self.text());
            for c in &self.children {
                let _ = write!(out, " {}", c.text());
            }
            out.push_str(")\n");
        } else {
            let _ = writeln!(out, "{pad}({}", self.text());
            for c in &self.children {
                c.parex_into(out, depth + 1);
            }
            let _ = writeln!(out, "{pad})");
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root.pretty())
    }
}
