// src/ast/synth.rs
//! Tree synthesis for one reduction.
//!
//! [`synthesize`] is a pure function of the production, its hint and the
//! popped children: it never looks at the input or the parse stack.
//!
//! Structured hints assemble the new node's children in a fixed order:
//!
//! 1. `with_prepended_children`
//! 2. the parent's own children, when the hint extends the parent
//! 3. `children`, with adopted indices spliced in place
//! 4. grandchildren of adopted indices not listed in `children`
//! 5. `with_appended_children`

use super::{AstMode, AstNode, Hint, Parent, StructuredHint};
use crate::{error::ConfigError, parser::tables::Production, token::Token};

/// Build the node that replaces `children` on the parse stack.
///
/// `children` must hold exactly `production.rhs_length()` nodes, in input
/// order. `FullTree` ignores the hint.
pub fn synthesize(
    production: &Production,
    children: Vec<AstNode>,
    mode: AstMode,
) -> Result<AstNode, ConfigError> {
    if children.len() != production.rhs_length() {
        return Err(ConfigError::ChildCount {
            lhs: production.lhs.clone(),
            expected: production.rhs_length(),
            got: children.len(),
        });
    }

    let hint = match (&production.hint, mode) {
        (None, _) | (_, AstMode::FullTree) => {
            return Ok(AstNode::new(None, production.lhs.clone(), children));
        }
        (Some(hint), _) => hint,
    };

    match hint {
        Hint::PassThrough(i) => {
            let len = children.len();
            children
                .into_iter()
                .nth(*i)
                .ok_or_else(|| index_error(production, *i, len))
        }
        Hint::Structured(s) => structured(production, s, children),
    }
}

fn structured(
    production: &Production,
    hint: &StructuredHint,
    children: Vec<AstNode>,
) -> Result<AstNode, ConfigError> {
    let mut slots: Vec<Option<AstNode>> = children.into_iter().map(Some).collect();

    let (token, parent_type) = match &hint.parent {
        Parent::Literal(lit) => (Some(Token::synthetic(lit)), Some(lit.clone())),
        Parent::Index(i) => match slots.get(*i).and_then(Option::as_ref) {
            Some(p) => (p.token.clone(), Some(p.node_type.clone())),
            None => (None, None),
        },
    };

    // An explicit type always wins, adoption or not.
    let node_type = hint
        .node_type
        .clone()
        .or(if hint.inherits_parent_type() {
            parent_type
        } else {
            None
        })
        .unwrap_or_else(|| production.lhs.clone());

    let mut out = Vec::with_capacity(slots.len());
    for &i in &hint.with_prepended_children {
        out.push(take(&mut slots, i, production)?);
    }
    if hint.extends_parent() {
        if let Some(p) = hint.parent_index() {
            out.extend(take(&mut slots, p, production)?.children);
        }
    }
    for &i in &hint.children {
        let child = take(&mut slots, i, production)?;
        if hint.with_adopted_grandchildren.contains(&i) {
            out.extend(child.children);
        } else {
            out.push(child);
        }
    }
    for &i in &hint.with_adopted_grandchildren {
        if !hint.children.contains(&i) {
            out.extend(take(&mut slots, i, production)?.children);
        }
    }
    for &i in &hint.with_appended_children {
        out.push(take(&mut slots, i, production)?);
    }

    Ok(AstNode::new(token, node_type, out))
}

fn take(
    slots: &mut [Option<AstNode>],
    i: usize,
    production: &Production,
) -> Result<AstNode, ConfigError> {
    let len = slots.len();
    match slots.get_mut(i) {
        Some(slot) => slot.take().ok_or_else(|| ConfigError::InvalidHint {
            production: production.id,
            lhs: production.lhs.clone(),
            reason: format!("child {i} is used more than once"),
        }),
        None => Err(index_error(production, i, len)),
    }
}

fn index_error(production: &Production, index: usize, len: usize) -> ConfigError {
    ConfigError::HintIndex {
        production: production.id,
        lhs: production.lhs.clone(),
        index,
        len,
    }
}
