// marl-parser - Value types for Marl
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Core value type for Marl.
//!
//! `MarlVal` is the central enum representing all Marl values. Values are
//! immutable once constructed; the collection variants use persistent
//! collections from `im`, so cloning a value is cheap.

use std::fmt;

use im::{OrdMap, Vector};

use crate::symbol::Symbol;

/// A Marl value.
///
/// `List` and `Vector` are structurally identical but nominally distinct:
/// they are never equal to one another, and a generic tree walk over a
/// `Vector` reproduces a `Vector` (see [`MarlVal::repackage`]).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MarlVal {
    /// Identifier; also a self-denoting atom when unresolved
    Symbol(Symbol),
    /// 64-bit signed integer
    Int(i64),
    /// Linked list, printed `(a b c)`
    List(Vector<MarlVal>),
    /// Indexed vector, printed `[a b c]`
    Vector(Vector<MarlVal>),
    /// Map from values to values, printed `{k v k v}`
    Map(OrdMap<MarlVal, MarlVal>),
    /// `'form`, printed `(quote form)`
    Quote(Box<MarlVal>),
    /// `` `form ``, printed `(quasiquote form)`
    QuasiQuote(Box<MarlVal>),
    /// `~form`, printed `(unquote form)`
    Unquote(Box<MarlVal>),
    /// `~@form`, printed `(splice-unquote form)`
    SpliceUnquote(Box<MarlVal>),
    /// `^meta form`, printed `(with-meta form meta)`
    WithMeta(Box<MarlVal>, Box<MarlVal>),
    /// `@form`, printed `(deref form)`
    Deref(Box<MarlVal>),
}

impl MarlVal {
    /// Create a symbol value.
    pub fn symbol(name: &str) -> Self {
        MarlVal::Symbol(Symbol::new(name))
    }

    /// Create an integer value.
    pub fn int(n: i64) -> Self {
        MarlVal::Int(n)
    }

    /// Create a list from a sequence of values.
    pub fn list(items: impl IntoIterator<Item = MarlVal>) -> Self {
        MarlVal::List(items.into_iter().collect())
    }

    /// Create a vector from a sequence of values.
    pub fn vector(items: impl IntoIterator<Item = MarlVal>) -> Self {
        MarlVal::Vector(items.into_iter().collect())
    }

    /// Create a map from key/value pairs. Later duplicates win.
    pub fn map(pairs: impl IntoIterator<Item = (MarlVal, MarlVal)>) -> Self {
        MarlVal::Map(pairs.into_iter().collect())
    }

    /// Create a quote wrapper.
    pub fn quote(form: MarlVal) -> Self {
        MarlVal::Quote(Box::new(form))
    }

    /// Create a quasiquote wrapper.
    pub fn quasiquote(form: MarlVal) -> Self {
        MarlVal::QuasiQuote(Box::new(form))
    }

    /// Create an unquote wrapper.
    pub fn unquote(form: MarlVal) -> Self {
        MarlVal::Unquote(Box::new(form))
    }

    /// Create a splice-unquote wrapper.
    pub fn splice_unquote(form: MarlVal) -> Self {
        MarlVal::SpliceUnquote(Box::new(form))
    }

    /// Attach metadata to a value.
    pub fn with_meta(form: MarlVal, meta: MarlVal) -> Self {
        MarlVal::WithMeta(Box::new(form), Box::new(meta))
    }

    /// Create a deref wrapper.
    pub fn deref(form: MarlVal) -> Self {
        MarlVal::Deref(Box::new(form))
    }

    /// Rebuild a sequence value of the *same concrete kind* as `self` from
    /// new children: a `Vector` repackages as a `Vector`, anything else as
    /// a `List`. Generic tree walks use this to preserve the List/Vector
    /// distinction.
    #[must_use]
    pub fn repackage(&self, items: Vector<MarlVal>) -> MarlVal {
        match self {
            MarlVal::Vector(_) => MarlVal::Vector(items),
            _ => MarlVal::List(items),
        }
    }

    /// Stable type name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            MarlVal::Symbol(_) => "symbol",
            MarlVal::Int(_) => "integer",
            MarlVal::List(_) => "list",
            MarlVal::Vector(_) => "vector",
            MarlVal::Map(_) => "map",
            MarlVal::Quote(_) => "quote",
            MarlVal::QuasiQuote(_) => "quasiquote",
            MarlVal::Unquote(_) => "unquote",
            MarlVal::SpliceUnquote(_) => "splice-unquote",
            MarlVal::WithMeta(_, _) => "with-meta",
            MarlVal::Deref(_) => "deref",
        }
    }
}

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: &Vector<MarlVal>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for MarlVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarlVal::Symbol(sym) => write!(f, "{}", sym),
            MarlVal::Int(n) => write!(f, "{}", n),
            MarlVal::List(items) => write_seq(f, "(", items, ")"),
            MarlVal::Vector(items) => write_seq(f, "[", items, "]"),
            MarlVal::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                write!(f, "}}")
            }
            MarlVal::Quote(v) => write!(f, "(quote {})", v),
            MarlVal::QuasiQuote(v) => write!(f, "(quasiquote {})", v),
            MarlVal::Unquote(v) => write!(f, "(unquote {})", v),
            MarlVal::SpliceUnquote(v) => write!(f, "(splice-unquote {})", v),
            MarlVal::WithMeta(v, meta) => write!(f, "(with-meta {} {})", v, meta),
            MarlVal::Deref(v) => write!(f, "(deref {})", v),
        }
    }
}

impl fmt::Debug for MarlVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_atoms() {
        assert_eq!(MarlVal::symbol("foo").to_string(), "foo");
        assert_eq!(MarlVal::int(42).to_string(), "42");
        assert_eq!(MarlVal::int(-7).to_string(), "-7");
    }

    #[test]
    fn test_display_sequences() {
        let list = MarlVal::list(vec![MarlVal::int(1), MarlVal::int(2), MarlVal::int(3)]);
        assert_eq!(list.to_string(), "(1 2 3)");

        let vector = MarlVal::vector(vec![MarlVal::int(1), MarlVal::int(2)]);
        assert_eq!(vector.to_string(), "[1 2]");

        assert_eq!(MarlVal::list(vec![]).to_string(), "()");
        assert_eq!(MarlVal::vector(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_display_map() {
        let map = MarlVal::map(vec![(MarlVal::symbol("a"), MarlVal::int(1))]);
        assert_eq!(map.to_string(), "{a 1}");
        assert_eq!(MarlVal::map(vec![]).to_string(), "{}");
    }

    #[test]
    fn test_display_wrappers() {
        let x = MarlVal::symbol("x");
        assert_eq!(MarlVal::quote(x.clone()).to_string(), "(quote x)");
        assert_eq!(MarlVal::quasiquote(x.clone()).to_string(), "(quasiquote x)");
        assert_eq!(MarlVal::unquote(x.clone()).to_string(), "(unquote x)");
        assert_eq!(
            MarlVal::splice_unquote(x.clone()).to_string(),
            "(splice-unquote x)"
        );
        assert_eq!(MarlVal::deref(x.clone()).to_string(), "(deref x)");
        assert_eq!(
            MarlVal::with_meta(x, MarlVal::int(1)).to_string(),
            "(with-meta x 1)"
        );
    }

    #[test]
    fn test_list_vector_never_equal() {
        let items = vec![MarlVal::int(1), MarlVal::int(2)];
        let list = MarlVal::list(items.clone());
        let vector = MarlVal::vector(items);
        assert_ne!(list, vector);
    }

    #[test]
    fn test_repackage_preserves_kind() {
        let items: Vector<MarlVal> = vec![MarlVal::int(1)].into_iter().collect();
        let vector = MarlVal::vector(vec![MarlVal::int(9)]);
        let list = MarlVal::list(vec![MarlVal::int(9)]);

        assert!(matches!(vector.repackage(items.clone()), MarlVal::Vector(_)));
        assert!(matches!(list.repackage(items), MarlVal::List(_)));
    }

    #[test]
    fn test_map_equality_ignores_insertion_order() {
        let a = MarlVal::map(vec![
            (MarlVal::symbol("a"), MarlVal::int(1)),
            (MarlVal::symbol("b"), MarlVal::int(2)),
        ]);
        let b = MarlVal::map(vec![
            (MarlVal::symbol("b"), MarlVal::int(2)),
            (MarlVal::symbol("a"), MarlVal::int(1)),
        ]);
        assert_eq!(a, b);
    }
}
