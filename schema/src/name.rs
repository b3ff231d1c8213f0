//! Interned strings with O(1) equality.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

/// An interned string.
///
/// Equal strings intern to the same allocation, so equality is a pointer
/// comparison. The intern pool lives for the process; names are cheap to
/// clone and compare but are never reclaimed.
#[derive(Clone)]
pub struct Name(Arc<str>);

static POOL: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

fn pool() -> &'static Mutex<HashSet<Arc<str>>> {
    POOL.get_or_init(|| Mutex::new(HashSet::new()))
}

impl Name {
    /// Interns `text` and returns its canonical handle.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut guard = match pool().lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(existing) = guard.get(text) {
            return Self(Arc::clone(existing));
        }
        let interned: Arc<str> = Arc::from(text);
        guard.insert(Arc::clone(&interned));
        Self(interned)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        // The pool guarantees one allocation per distinct string.
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Name {}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
