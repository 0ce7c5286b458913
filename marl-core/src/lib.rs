// marl-core - Runtime and evaluator for the Marl language
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! # marl-core
//!
//! Runtime and evaluator for the Marl language.
//! Provides a tree-walking interpreter for `MarlVal` forms against a chain
//! of lexical environments.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::register_builtins;
pub use env::{Env, Primitive};
pub use error::{Error, Result};
pub use eval::eval;

// Re-export parser types for convenience
pub use marl_parser::{MarlVal, ReadError, Reader, Symbol, read_str};
