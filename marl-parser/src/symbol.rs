// marl-parser - Symbol type with interning
// Copyright (c) 2026 the Marl authors. MIT licensed.

//! Symbols are the identifiers of Marl.
//!
//! # Interning
//!
//! Symbols are interned using a global string interner, meaning that two
//! symbols with the same name share the same underlying storage. This gives:
//!
//! - **O(1) equality**: comparing symbols is a pointer comparison
//! - **O(1) hashing**: the hash is computed from the pointer address
//! - **Memory efficiency**: identical symbols share storage
//!
//! # Memory behaviour
//!
//! Interned symbols are never deallocated. The interner keeps strong `Arc`
//! references for the lifetime of the process, so memory grows monotonically
//! with the number of *unique* symbols. Typical programs use a bounded set
//! of symbols, so the overhead is modest.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned identifier.
///
/// Two symbols with the same name share the same underlying storage, so
/// equality and hashing are pointer operations.
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<str>,
}

/// Global symbol interner
static SYMBOL_INTERNER: OnceLock<Mutex<HashMap<String, Arc<str>>>> = OnceLock::new();

fn get_interner() -> &'static Mutex<HashMap<String, Arc<str>>> {
    SYMBOL_INTERNER.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Symbol {
    /// Create (or look up) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        let mut interner = get_interner()
            .lock()
            .expect("Symbol interner mutex poisoned: another thread panicked while holding the lock");
        if let Some(existing) = interner.get(name) {
            return Symbol {
                inner: Arc::clone(existing),
            };
        }
        let inner: Arc<str> = Arc::from(name);
        interner.insert(name.to_string(), Arc::clone(&inner));
        Symbol { inner }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned symbols
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
