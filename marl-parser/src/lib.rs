// marl-parser - Lexer and reader for the Marl language
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! # marl-parser
//!
//! Lexer and reader for the Marl language.
//! Produces `MarlVal` trees from source code strings.

pub mod lexer;
pub mod reader;
pub mod symbol;
pub mod value;

pub use im::{OrdMap, Vector};
pub use lexer::{Lexer, LexerError, Token};
pub use reader::{ReadError, Reader, read_str};
pub use symbol::Symbol;
pub use value::MarlVal;
