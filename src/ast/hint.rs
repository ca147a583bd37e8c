// src/ast/hint.rs
//! Per-production tree-shaping hints.
//!
//! On disk a hint is a loose JSON object; it is decoded once, at table load,
//! into the closed [`Hint`] enum and checked against the production's length.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// The reduction is exactly the child at this index.
    PassThrough(usize),
    Structured(StructuredHint),
}

/// Where a structured node takes its token (and, when inherited, its type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Index(usize),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredHint {
    pub parent: Parent,
    pub children: Vec<usize>,
    pub with_appended_children: Vec<usize>,
    pub with_prepended_children: Vec<usize>,
    pub with_adopted_grandchildren: Vec<usize>,
    pub node_type: Option<String>,
}

impl StructuredHint {
    pub fn parent_index(&self) -> Option<usize> {
        match self.parent {
            Parent::Index(i) => Some(i),
            Parent::Literal(_) => None,
        }
    }

    /// Any appended or prepended children.
    pub fn grows(&self) -> bool {
        !(self.with_appended_children.is_empty() && self.with_prepended_children.is_empty())
    }

    /// Appended/prepended children with an index parent grow that parent's
    /// child list instead of nesting it.
    pub fn extends_parent(&self) -> bool {
        self.parent_index().is_some() && self.grows()
    }

    pub fn adopts(&self) -> bool {
        !self.with_adopted_grandchildren.is_empty()
    }

    /// Shapes that take their type from the parent slot (or the literal)
    /// when no `type` is given.
    pub fn inherits_parent_type(&self) -> bool {
        self.grows() || self.adopts()
    }
}

/// Wire form of a hint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct HintDisk {
    #[serde(rename = "pass-through", default, skip_serializing_if = "Option::is_none")]
    pass_through: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_literal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    with_appended_children: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    with_prepended_children: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    with_adopted_grandchildren: Option<Vec<usize>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    node_type: Option<String>,
}

impl From<&Hint> for HintDisk {
    fn from(h: &Hint) -> Self {
        match h {
            Hint::PassThrough(i) => HintDisk {
                pass_through: Some(*i),
                ..Default::default()
            },
            Hint::Structured(s) => {
                let (parent, parent_literal) = match &s.parent {
                    Parent::Index(i) => (Some(*i), None),
                    Parent::Literal(lit) => (None, Some(lit.clone())),
                };
                let non_empty = |v: &Vec<usize>| (!v.is_empty()).then(|| v.clone());
                HintDisk {
                    pass_through: None,
                    parent,
                    parent_literal,
                    children: Some(s.children.clone()),
                    with_appended_children: non_empty(&s.with_appended_children),
                    with_prepended_children: non_empty(&s.with_prepended_children),
                    with_adopted_grandchildren: non_empty(&s.with_adopted_grandchildren),
                    node_type: s.node_type.clone(),
                }
            }
        }
    }
}

impl HintDisk {
    /// Decode and validate against a production popping `rhs_len` entries.
    pub(crate) fn into_hint(
        self,
        production: usize,
        lhs: &str,
        rhs_len: usize,
    ) -> Result<Hint, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidHint {
            production,
            lhs: lhs.to_string(),
            reason: reason.to_string(),
        };
        let check = |index: usize| {
            if index >= rhs_len {
                Err(ConfigError::HintIndex {
                    production,
                    lhs: lhs.to_string(),
                    index,
                    len: rhs_len,
                })
            } else {
                Ok(index)
            }
        };

        if let Some(i) = self.pass_through {
            let structured = self.parent.is_some()
                || self.parent_literal.is_some()
                || self.children.is_some()
                || self.with_appended_children.is_some()
                || self.with_prepended_children.is_some()
                || self.with_adopted_grandchildren.is_some()
                || self.node_type.is_some();
            if structured {
                return Err(invalid("pass-through cannot be combined with other hint fields"));
            }
            return Ok(Hint::PassThrough(check(i)?));
        }

        let parent = match (self.parent, self.parent_literal) {
            (Some(_), Some(_)) => return Err(invalid("both parent and parent_literal are set")),
            (Some(i), None) => Parent::Index(i),
            (None, Some(lit)) => Parent::Literal(lit),
            (None, None) => Parent::Index(0),
        };
        if let Parent::Index(i) = parent {
            // implicit parent 0 on an empty production has nothing to point at
            if rhs_len > 0 {
                check(i)?;
            }
        }

        let hint = StructuredHint {
            parent,
            children: self.children.unwrap_or_default(),
            with_appended_children: self.with_appended_children.unwrap_or_default(),
            with_prepended_children: self.with_prepended_children.unwrap_or_default(),
            with_adopted_grandchildren: self.with_adopted_grandchildren.unwrap_or_default(),
            node_type: self.node_type.filter(|t| !t.is_empty()),
        };

        for &i in hint
            .children
            .iter()
            .chain(&hint.with_appended_children)
            .chain(&hint.with_prepended_children)
            .chain(&hint.with_adopted_grandchildren)
        {
            check(i)?;
        }

        // Each child moves into the new node at most once.
        let mut placed = vec![false; rhs_len];
        for &i in hint
            .with_prepended_children
            .iter()
            .chain(&hint.children)
            .chain(&hint.with_appended_children)
        {
            if std::mem::replace(&mut placed[i], true) {
                return Err(invalid(&format!("child {i} is placed more than once")));
            }
        }
        let mut adopted = vec![false; rhs_len];
        for &i in &hint.with_adopted_grandchildren {
            if std::mem::replace(&mut adopted[i], true) {
                return Err(invalid(&format!("child {i} is adopted more than once")));
            }
            if hint.with_appended_children.contains(&i) || hint.with_prepended_children.contains(&i) {
                return Err(invalid(&format!(
                    "child {i} is both adopted and appended/prepended"
                )));
            }
        }
        if hint.extends_parent() {
            if let Some(p) = hint.parent_index() {
                if placed[p] || adopted[p] {
                    return Err(invalid(&format!(
                        "extended parent {p} is also listed as a child"
                    )));
                }
            }
        }

        Ok(Hint::Structured(hint))
    }
}
