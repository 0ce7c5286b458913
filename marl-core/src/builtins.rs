// marl-core - Built-in primitive operations
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Built-in primitive operations for Marl.
//!
//! The arity rules are deliberately asymmetric: `+` and `*` fold any number
//! of arguments from their identity element, while `-` and `/` demand
//! exactly two.

use marl_parser::MarlVal;

use crate::env::Env;
use crate::error::{Error, Result};

/// Register all built-in primitives in the given environment.
///
/// Called once on the root environment of a session.
pub fn register_builtins(env: &Env) {
    env.define_primitive("+", builtin_add);
    env.define_primitive("-", builtin_sub);
    env.define_primitive("*", builtin_mul);
    env.define_primitive("/", builtin_div);
}

fn as_int(val: &MarlVal) -> Result<i64> {
    match val {
        MarlVal::Int(n) => Ok(*n),
        other => Err(Error::type_error("integer", other.type_name())),
    }
}

/// Variadic sum: left fold from 0. Zero arguments yields 0. A sum outside
/// i64 is a defined overflow error, never a panic or a wrap.
fn builtin_add(args: &[MarlVal]) -> Result<MarlVal> {
    let mut sum = 0i64;
    for arg in args {
        sum = sum
            .checked_add(as_int(arg)?)
            .ok_or(Error::IntegerOverflow { op: "+" })?;
    }
    Ok(MarlVal::int(sum))
}

/// Strictly binary subtraction: `a - b`.
fn builtin_sub(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity("-", 2, args.len()));
    }
    as_int(&args[0])?
        .checked_sub(as_int(&args[1])?)
        .map(MarlVal::int)
        .ok_or(Error::IntegerOverflow { op: "-" })
}

/// Variadic product: left fold from 1. Zero arguments yields 1.
fn builtin_mul(args: &[MarlVal]) -> Result<MarlVal> {
    let mut product = 1i64;
    for arg in args {
        product = product
            .checked_mul(as_int(arg)?)
            .ok_or(Error::IntegerOverflow { op: "*" })?;
    }
    Ok(MarlVal::int(product))
}

/// Strictly binary truncating integer division: `a / b`.
fn builtin_div(args: &[MarlVal]) -> Result<MarlVal> {
    if args.len() != 2 {
        return Err(Error::arity("/", 2, args.len()));
    }
    let a = as_int(&args[0])?;
    let b = as_int(&args[1])?;
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    // checked_div only fails here for i64::MIN / -1
    a.checked_div(b)
        .map(MarlVal::int)
        .ok_or(Error::IntegerOverflow { op: "/" })
}

// ============================================================================
// Tests
// ============================================================================
