// src/ast/mod.rs
pub mod hint;
pub mod print;
pub mod synth;

use std::str::FromStr;

pub use hint::{Hint, Parent, StructuredHint};
pub use synth::synthesize;

use crate::{error::ConfigError, token::Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub token: Option<Token>,
    pub node_type: String,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn new(token: Option<Token>, node_type: impl Into<String>, children: Vec<AstNode>) -> Self {
        Self {
            token,
            node_type: node_type.into(),
            children,
        }
    }

    /// Leaf built on shift; its type is the token's type.
    pub fn terminal(token: Token) -> Self {
        let node_type = token.token_type.clone();
        Self {
            token: Some(token),
            node_type,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Token lexeme when present, else the node type.
    pub fn text(&self) -> &str {
        match &self.token {
            Some(tok) => &tok.lexeme,
            None => &self.node_type,
        }
    }

    /// Pre-order walk.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a AstNode, usize)) {
        fn go<'a>(n: &'a AstNode, depth: usize, f: &mut impl FnMut(&'a AstNode, usize)) {
            f(n, depth);
            for c in &n.children {
                go(c, depth + 1, f);
            }
        }
        go(self, 0, f);
    }

    /// Leaf tokens, left to right.
    pub fn leaf_tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.walk(&mut |n, _| {
            if n.is_leaf() {
                if let Some(t) = &n.token {
                    out.push(t);
                }
            }
        });
        out
    }

    pub fn count_nodes(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_, _| n += 1);
        n
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub root: AstNode,
}

impl Ast {
    pub fn new(root: AstNode) -> Self {
        Self { root }
    }
}

/// How reductions turn into tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AstMode {
    /// Follow each production's hint.
    #[default]
    DefaultHints,
    /// Ignore hints; one node per reduction with all children.
    FullTree,
    /// Build nothing; only check the input is in the language.
    SyntaxOnly,
}

impl AstMode {
    pub fn from_flags(no_ast: bool, full_ast: bool) -> Result<Self, ConfigError> {
        match (no_ast, full_ast) {
            (true, true) => Err(ConfigError::ConflictingAstModes),
            (true, false) => Ok(AstMode::SyntaxOnly),
            (false, true) => Ok(AstMode::FullTree),
            (false, false) => Ok(AstMode::DefaultHints),
        }
    }

    pub fn builds_tree(self) -> bool {
        !matches!(self, AstMode::SyntaxOnly)
    }
}

impl FromStr for AstMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "hints" => Ok(AstMode::DefaultHints),
            "fullast" => Ok(AstMode::FullTree),
            "noast" => Ok(AstMode::SyntaxOnly),
            other => Err(ConfigError::UnknownAstMode(other.to_string())),
        }
    }
}
