// marl-core - Tree-walking evaluator
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Tree-walking evaluator for Marl forms.
//!
//! Evaluation is a state-free recursive walk. Lists are classified once
//! before dispatch: the special forms `def!` and `let*` are reserved words
//! recognised on the head symbol, and win over generic application
//! unconditionally. Everything that is not a special form or an application
//! goes through the generic walk [`eval_ast`], which resolves symbols,
//! evaluates container children, and repackages containers into the same
//! concrete kind it consumed.

use marl_parser::{MarlVal, Vector};

use crate::env::Env;
use crate::error::{Error, Result};

/// How a list form is dispatched, decided once per list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    /// `(def! name expr)` - bind in the current scope
    Definition,
    /// `(let* bindings body)` - evaluate in a fresh child scope
    LocalBinding,
    /// Anything else non-empty - evaluate children, then apply
    Application,
    /// `()` - nothing to dispatch; falls through to the generic walk
    Empty,
}

fn classify(items: &Vector<MarlVal>) -> ListKind {
    let head = match items.front() {
        Some(head) => head,
        None => return ListKind::Empty,
    };
    match head {
        MarlVal::Symbol(sym) => match sym.name() {
            "def!" => ListKind::Definition,
            "let*" => ListKind::LocalBinding,
            _ => ListKind::Application,
        },
        _ => ListKind::Application,
    }
}

/// Evaluate a Marl form in the given environment.
pub fn eval(form: &MarlVal, env: &Env) -> Result<MarlVal> {
    if let MarlVal::List(items) = form {
        match classify(items) {
            ListKind::Definition => return eval_def(items, env),
            ListKind::LocalBinding => return eval_let(items, env),
            ListKind::Application => return eval_apply(items, env),
            ListKind::Empty => {}
        }
    }
    eval_ast(form, env)
}

/// Generic walk over a single form.
///
/// Symbols resolve through the environment when bound and *self-evaluate*
/// when unbound - an unresolved symbol is only ever an error in strict
/// lookup paths, not here. Containers evaluate their children and
/// repackage into the same concrete kind. Everything else is returned
/// unchanged.
fn eval_ast(form: &MarlVal, env: &Env) -> Result<MarlVal> {
    match form {
        MarlVal::Symbol(sym) => {
            if env.has_symbol(sym) {
                env.get_symbol(sym)
            } else {
                Ok(form.clone())
            }
        }
        MarlVal::Map(entries) => {
            let mut out = entries.clone();
            for (key, val) in entries.iter() {
                out.insert(key.clone(), eval(val, env)?);
            }
            Ok(MarlVal::Map(out))
        }
        MarlVal::List(items) | MarlVal::Vector(items) => {
            let evaluated: Vector<MarlVal> = items
                .iter()
                .map(|item| eval(item, env))
                .collect::<Result<_>>()?;
            Ok(form.repackage(evaluated))
        }
        _ => Ok(form.clone()),
    }
}

/// `(def! name expr)`: evaluate `expr` in the current scope, bind `name`
/// locally, return the bound value.
fn eval_def(items: &Vector<MarlVal>, env: &Env) -> Result<MarlVal> {
    if items.len() != 3 {
        return Err(Error::syntax(
            "def!",
            format!("expected (def! symbol expr), got {} elements", items.len()),
        ));
    }
    let sym = match &items[1] {
        MarlVal::Symbol(sym) => sym.clone(),
        other => return Err(Error::type_error("symbol", other.type_name())),
    };
    let val = eval(&items[2], env)?;
    Ok(env.set(sym, val))
}

/// `(let* bindings body)`: populate a fresh child scope from alternating
/// symbol/expression pairs, then evaluate `body` in it. Each pair's
/// expression is evaluated in the *growing* child scope, so later bindings
/// see earlier ones. The outer environment is never touched.
fn eval_let(items: &Vector<MarlVal>, env: &Env) -> Result<MarlVal> {
    if items.len() != 3 {
        return Err(Error::syntax(
            "let*",
            format!(
                "expected (let* bindings body), got {} elements",
                items.len()
            ),
        ));
    }
    let bindings = match &items[1] {
        MarlVal::List(pairs) | MarlVal::Vector(pairs) => pairs,
        other => return Err(Error::type_error("binding sequence", other.type_name())),
    };
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "bindings must hold an even number of forms",
        ));
    }

    let let_env = env.child();
    let mut iter = bindings.iter();
    while let (Some(key), Some(expr)) = (iter.next(), iter.next()) {
        let sym = match key {
            MarlVal::Symbol(sym) => sym.clone(),
            other => return Err(Error::type_error("symbol", other.type_name())),
        };
        let val = eval(expr, &let_env)?;
        let_env.set(sym, val);
    }

    eval(&items[2], &let_env)
}

/// Generic application: evaluate every element, then apply the primitive
/// named by the first evaluated element to the rest.
fn eval_apply(items: &Vector<MarlVal>, env: &Env) -> Result<MarlVal> {
    let evaluated: Vec<MarlVal> = items
        .iter()
        .map(|item| eval(item, env))
        .collect::<Result<_>>()?;

    let (head, args) = match evaluated.split_first() {
        Some(split) => split,
        None => return Err(Error::Internal("application of empty list".to_string())),
    };

    let sym = match head {
        MarlVal::Symbol(sym) => sym,
        other => return Err(Error::NotCallable(other.to_string())),
    };

    match env.apply(sym, args) {
        Some(result) => result,
        None => Err(Error::UnknownOperation(sym.clone())),
    }
}

// ============================================================================
// Tests
// ============================================================================
