// marl-core - Common test utilities
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Shared test helpers for Marl integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with builtins
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_all`] - Evaluate multiple forms, returning the last
//! - [`new_env`] - Create a new environment with builtins registered

// Re-export common types for convenience
pub use marl_core::builtins::register_builtins;
pub use marl_core::env::Env;
pub use marl_core::eval::eval;
#[allow(unused_imports)]
pub use marl_parser::{MarlVal, Reader, Symbol, read_str};

/// Evaluate a Marl form string in a fresh environment.
///
/// The environment is pre-populated with built-in functions.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
pub fn eval_str(s: &str) -> Result<MarlVal, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a Marl form string in the given environment.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MarlVal, String> {
    let form = read_str(s).map_err(|e| e.to_string())?;
    eval(&form, env).map_err(|e| e.to_string())
}

/// Evaluate multiple Marl forms, returning the last result.
///
/// This is useful when you need to set up definitions before the final
/// form. Each form is read and evaluated sequentially.
///
/// # Returns
///
/// Returns the value of the last form, or an error.
#[allow(dead_code)]
pub fn eval_all(s: &str, env: &Env) -> Result<MarlVal, String> {
    let mut reader = Reader::new(s).map_err(|e| e.to_string())?;
    let mut result = None;

    while let Some(form) = reader.next_form().map_err(|e| e.to_string())? {
        result = Some(eval(&form, env).map_err(|e| e.to_string())?);
    }

    result.ok_or_else(|| "no forms in input".to_string())
}

/// Create a new environment with builtins registered.
///
/// # Returns
///
/// A fresh [`Env`] with all built-in functions available.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", MarlVal::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(- 1 2 3)");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` produces an error mentioning `pattern`.
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(/ 1 0)", "division by zero");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $pattern:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.to_lowercase().contains(&$pattern.to_lowercase()),
            "Error message '{}' does not contain '{}'",
            err_msg,
            $pattern
        );
    };
}

/// Assert that evaluating `input` in the given environment produces the
/// expected value.
///
/// # Example
///
/// ```ignore
/// let env = new_env();
/// eval_str_with_env("(def! x 42)", &env).unwrap();
/// assert_eval_with_env!("x", MarlVal::int(42), &env);
/// ```
#[macro_export]
macro_rules! assert_eval_with_env {
    ($input:expr, $expected:expr, $env:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_str_basic() {
        assert_eq!(eval_str("42").unwrap(), MarlVal::int(42));
        assert_eq!(eval_str("(+ 1 2)").unwrap(), MarlVal::int(3));
    }

    #[test]
    fn test_eval_str_error() {
        assert!(eval_str("(/ 1 0)").is_err());
    }

    #[test]
    fn test_eval_all() {
        let env = new_env();
        let result = eval_all("(def! x 1) (def! y 2) (+ x y)", &env).unwrap();
        assert_eq!(result, MarlVal::int(3));
    }
}
