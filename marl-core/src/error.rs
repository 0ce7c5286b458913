// marl-core - Error types for the Marl evaluator
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Error types for Marl evaluation.

use marl_parser::Symbol;
use std::fmt;

/// Result type for Marl evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
///
/// Every error aborts only the current top-level evaluation; nothing is
/// retried. Callers (the REPL) report the error and continue with the next
/// form.
#[derive(Debug, Clone)]
pub enum Error {
    /// Strict lookup found no binding anywhere in the scope chain
    UndefinedSymbol(Symbol),
    /// Wrong number of arguments to a primitive
    Arity {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    /// Wrong type for an operation
    Type {
        expected: &'static str,
        got: &'static str,
    },
    /// Application head evaluated to something that cannot be called
    NotCallable(String),
    /// No scope in the chain has a primitive for this symbol
    UnknownOperation(Symbol),
    /// Division by zero
    DivisionByZero,
    /// Arithmetic result does not fit in an i64
    IntegerOverflow { op: &'static str },
    /// Invalid special form syntax
    Syntax { form: &'static str, message: String },
    /// Internal error - invariant violation
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UndefinedSymbol(sym) => {
                write!(f, "Unable to resolve symbol: {}", sym)
            }
            Error::Arity {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Wrong number of arguments to '{}': expected {}, got {}",
                    name, expected, got
                )
            }
            Error::Type { expected, got } => {
                write!(f, "Type error: expected {}, got {}", expected, got)
            }
            Error::NotCallable(val) => {
                write!(f, "Cannot call value: {}", val)
            }
            Error::UnknownOperation(sym) => {
                write!(f, "Unknown operation: {}", sym)
            }
            Error::DivisionByZero => {
                write!(f, "Division by zero")
            }
            Error::IntegerOverflow { op } => {
                write!(f, "Integer overflow in '{}'", op)
            }
            Error::Syntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create an arity error.
    pub fn arity(name: &'static str, expected: usize, got: usize) -> Self {
        Error::Arity {
            name,
            expected,
            got,
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::Type { expected, got }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::Syntax {
            form,
            message: message.into(),
        }
    }
}
