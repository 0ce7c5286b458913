// marl-core - Environment for lexical scoping
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Environment for symbol bindings with lexical scoping.
//!
//! Environments form a chain through parent references. Each frame holds
//! its own bindings map and a table of primitive operations; the primitive
//! table is populated only on the root in practice (see
//! [`crate::builtins::register_builtins`]). All chain walks are iterative,
//! so deeply nested `let*` scopes cannot overflow the stack during lookup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use marl_parser::{MarlVal, Symbol};

use crate::error::{Error, Result};

/// A primitive operation bound in an environment's fixed table.
pub type Primitive = fn(&[MarlVal]) -> Result<MarlVal>;

/// A lexical environment for symbol bindings.
///
/// `Env` is a cheap handle; cloning it shares the underlying frame.
///
/// # Examples
///
/// ```
/// use marl_core::Env;
/// use marl_parser::{MarlVal, Symbol};
///
/// let env = Env::new();
/// env.set(Symbol::new("x"), MarlVal::int(42));
/// assert_eq!(env.get_symbol(&Symbol::new("x")).unwrap(), MarlVal::int(42));
///
/// // A child sees parent bindings and can shadow them locally
/// let child = env.child();
/// child.set(Symbol::new("x"), MarlVal::int(100));
/// assert_eq!(child.get_symbol(&Symbol::new("x")).unwrap(), MarlVal::int(100));
/// assert_eq!(env.get_symbol(&Symbol::new("x")).unwrap(), MarlVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, MarlVal>,
    primitives: HashMap<Symbol, Primitive>,
    parent: Option<Env>,
}

impl std::fmt::Debug for EnvInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvInner")
            .field("bindings", &self.bindings.len())
            .field("primitives", &self.primitives.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                primitives: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    ///
    /// Children start with empty bindings and an empty primitive table;
    /// primitives are still reachable through the chain.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                primitives: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Install a primitive operation in this environment's fixed table.
    pub fn define_primitive(&self, name: &str, f: Primitive) {
        self.inner
            .borrow_mut()
            .primitives
            .insert(Symbol::new(name), f);
    }

    /// Bind `sym` to `val` in this environment only (never a parent) and
    /// return the bound value.
    pub fn set(&self, sym: Symbol, val: MarlVal) -> MarlVal {
        self.inner.borrow_mut().bindings.insert(sym, val.clone());
        val
    }

    /// Check whether `sym` resolves anywhere in the chain, via bindings or
    /// primitives.
    #[must_use]
    pub fn has_symbol(&self, sym: &Symbol) -> bool {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(sym) || inner.primitives.contains_key(sym) {
                return true;
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    /// Strict lookup.
    ///
    /// A frame's binding returns its value. A frame's *primitive* returns
    /// the symbol itself: primitives are resolved at application time (see
    /// [`Env::apply`]), and returning the symbol lets the evaluator tell a
    /// callable name from a data value. An exhausted chain is an
    /// [`Error::UndefinedSymbol`].
    pub fn get_symbol(&self, sym: &Symbol) -> Result<MarlVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            if inner.primitives.contains_key(sym) {
                return Ok(MarlVal::Symbol(sym.clone()));
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Err(Error::UndefinedSymbol(sym.clone())),
            }
        }
    }

    /// Soft lookup over bindings only; primitives are invisible here.
    /// Returns `None` when no frame in the chain binds `sym`.
    #[must_use]
    pub fn get(&self, sym: &Symbol) -> Option<MarlVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Invoke the primitive named by `sym` on `args`, searching outward
    /// through the chain.
    ///
    /// Returns `None` when no frame has the primitive: this chain does not
    /// understand the application, and the caller decides what that means.
    pub fn apply(&self, sym: &Symbol, args: &[MarlVal]) -> Option<Result<MarlVal>> {
        let mut current = self.clone();
        loop {
            let f = {
                let inner = current.inner.borrow();
                inner.primitives.get(sym).copied()
            };
            if let Some(f) = f {
                return Some(f(args));
            }
            let parent = current.inner.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn answer(_args: &[MarlVal]) -> Result<MarlVal> {
        Ok(MarlVal::int(42))
    }

    #[test]
    fn test_set_and_get_symbol() {
        let env = Env::new();
        let returned = env.set(sym("x"), MarlVal::int(42));
        assert_eq!(returned, MarlVal::int(42));
        assert_eq!(env.get_symbol(&sym("x")).unwrap(), MarlVal::int(42));
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Env::new();
        assert!(matches!(
            env.get_symbol(&sym("x")),
            Err(Error::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn test_child_inherits_parent() {
        let parent = Env::new();
        parent.set(sym("x"), MarlVal::int(42));

        let child = parent.child();
        assert_eq!(child.get_symbol(&sym("x")).unwrap(), MarlVal::int(42));
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Env::new();
        parent.set(sym("x"), MarlVal::int(42));

        let child = parent.child();
        child.set(sym("x"), MarlVal::int(100));

        assert_eq!(child.get_symbol(&sym("x")).unwrap(), MarlVal::int(100));
        assert_eq!(parent.get_symbol(&sym("x")).unwrap(), MarlVal::int(42));
    }

    #[test]
    fn test_set_never_mutates_parent() {
        let parent = Env::new();
        let child = parent.child();
        child.set(sym("y"), MarlVal::int(1));

        assert!(parent.get(&sym("y")).is_none());
        assert!(!parent.has_symbol(&sym("y")));
    }

    #[test]
    fn test_has_symbol_sees_primitives() {
        let env = Env::new();
        assert!(!env.has_symbol(&sym("f")));

        env.define_primitive("f", answer);
        assert!(env.has_symbol(&sym("f")));

        // ...through the chain too
        let child = env.child();
        assert!(child.has_symbol(&sym("f")));
    }

    #[test]
    fn test_get_symbol_returns_symbol_for_primitive() {
        let env = Env::new();
        env.define_primitive("f", answer);

        assert_eq!(
            env.get_symbol(&sym("f")).unwrap(),
            MarlVal::Symbol(sym("f"))
        );
    }

    #[test]
    fn test_binding_shadows_primitive_in_strict_lookup() {
        let env = Env::new();
        env.define_primitive("f", answer);
        env.set(sym("f"), MarlVal::int(7));

        assert_eq!(env.get_symbol(&sym("f")).unwrap(), MarlVal::int(7));
    }

    #[test]
    fn test_soft_get_ignores_primitives() {
        let env = Env::new();
        env.define_primitive("f", answer);

        assert!(env.get(&sym("f")).is_none());
        env.set(sym("x"), MarlVal::int(3));
        assert_eq!(env.child().get(&sym("x")), Some(MarlVal::int(3)));
    }

    #[test]
    fn test_apply_delegates_outward() {
        let root = Env::new();
        root.define_primitive("f", answer);

        let child = root.child().child();
        let result = child.apply(&sym("f"), &[]).unwrap().unwrap();
        assert_eq!(result, MarlVal::int(42));
    }

    #[test]
    fn test_apply_unknown_is_none() {
        let env = Env::new();
        assert!(env.apply(&sym("nope"), &[]).is_none());
    }

    #[test]
    fn test_deep_chain_lookup() {
        let root = Env::new();
        root.set(sym("x"), MarlVal::int(1));

        let mut env = root.clone();
        for _ in 0..4096 {
            env = env.child();
        }
        assert_eq!(env.get_symbol(&sym("x")).unwrap(), MarlVal::int(1));
        assert!(env.has_symbol(&sym("x")));
        assert!(env.get(&sym("y")).is_none());
    }
}
