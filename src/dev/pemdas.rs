// src/dev/pemdas.rs
// Integer evaluator over trees produced by the embedded `pemdas` grammar.
//
// Arithmetic is on i64 and wraps on overflow. `/` and `%` truncate toward
// zero, a negative exponent yields 0.

use thiserror::Error;

use crate::ast::{Ast, AstNode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("unhandled node type {0:?}")]
    UnknownNode(String),
    #[error("{node_type} node has no token")]
    MissingToken { node_type: String },
    #[error("invalid integer literal {0:?}")]
    BadLiteral(String),
    #[error("operator {op:?} expects {expected} operands, got {got}")]
    Arity {
        op: String,
        expected: usize,
        got: usize,
    },
    #[error("unhandled operator {0:?}")]
    UnknownOperator(String),
    #[error("{op:?} by zero")]
    DivisionByZero { op: String },
}

pub fn evaluate(ast: &Ast) -> Result<i64, EvalError> {
    eval_node(&ast.root)
}

pub fn eval_node(node: &AstNode) -> Result<i64, EvalError> {
    match node.node_type.as_str() {
        "int_literal" => {
            let lexeme = lexeme(node)?;
            lexeme
                .parse::<i64>()
                .map_err(|_| EvalError::BadLiteral(lexeme.to_string()))
        }
        "operator" => {
            let op = lexeme(node)?;
            let [lhs, rhs] = operands::<2>(op, node)?;
            binary(op, eval_node(lhs)?, eval_node(rhs)?)
        }
        "unary" => {
            let op = lexeme(node)?;
            let [operand] = operands::<1>(op, node)?;
            let v = eval_node(operand)?;
            match op {
                "-" => Ok(v.wrapping_neg()),
                "+" => Ok(v),
                other => Err(EvalError::UnknownOperator(other.to_string())),
            }
        }
        other => Err(EvalError::UnknownNode(other.to_string())),
    }
}

fn lexeme(node: &AstNode) -> Result<&str, EvalError> {
    node.token
        .as_ref()
        .map(|t| t.lexeme.as_str())
        .ok_or_else(|| EvalError::MissingToken {
            node_type: node.node_type.clone(),
        })
}

fn operands<'a, const N: usize>(op: &str, node: &'a AstNode) -> Result<[&'a AstNode; N], EvalError> {
    let refs: Vec<&AstNode> = node.children.iter().collect();
    refs.try_into().map_err(|v: Vec<&AstNode>| EvalError::Arity {
        op: op.to_string(),
        expected: N,
        got: v.len(),
    })
}

fn binary(op: &str, a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 && (op == "/" || op == "%") {
        return Err(EvalError::DivisionByZero { op: op.to_string() });
    }
    match op {
        "+" => Ok(a.wrapping_add(b)),
        "-" => Ok(a.wrapping_sub(b)),
        "*" => Ok(a.wrapping_mul(b)),
        // wrapping only matters for i64::MIN / -1
        "/" => Ok(a.wrapping_div(b)),
        "%" => Ok(a.wrapping_rem(b)),
        "**" => Ok(int_power(a, b)),
        other => Err(EvalError::UnknownOperator(other.to_string())),
    }
}

/// Square-and-multiply with wrapping; negative exponents give 0.
pub fn int_power(base: i64, exp: i64) -> i64 {
    if exp < 0 {
        return 0;
    }
    let (mut base, mut exp, mut out) = (base, exp as u64, 1i64);
    while exp > 0 {
        if exp & 1 == 1 {
            out = out.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    out
}
