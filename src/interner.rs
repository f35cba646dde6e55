use core::fmt::Debug;

use crate::gc::Collector;
use crate::gc::CollectorHooks;
use crate::string::StrRef;
use crate::string::hash_bytes;
use crate::table::Keys;
use crate::table::Table;

/// The string-intern table.
///
/// Owns one canonical [`StrRef`] per distinct content, so that the rest of
/// the runtime can compare strings by identity. The interner holds its
/// strings *weakly* as far as the collector is concerned: its
/// [`mark_reachable`](CollectorHooks::mark_reachable) reports nothing, and
/// [`remove_unmarked_weak`](CollectorHooks::remove_unmarked_weak) drops every
/// string the mark phase did not reach.
///
/// There is no process-wide instance; the runtime constructs one and hands it
/// to whatever needs to create strings.
///
/// # Examples
///
/// ```rust
/// use intern_table::Interner;
/// use intern_table::StrRef;
///
/// let mut strings = Interner::new();
/// let a = strings.intern_str("clock");
/// let b = strings.intern(b"clock");
/// assert!(StrRef::ptr_eq(&a, &b));
/// assert_eq!(strings.len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct Interner {
    strings: Table<StrRef, ()>,
}

impl Debug for Interner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interner with room for `capacity` strings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: Table::with_capacity(capacity),
        }
    }

    /// Returns the canonical string for `bytes`, allocating it on first use.
    pub fn intern(&mut self, bytes: &[u8]) -> StrRef {
        let hash = hash_bytes(bytes);
        if let Some(existing) = self.strings.find_interned(bytes, hash) {
            return existing.clone();
        }

        let string = StrRef::with_hash(bytes, hash);
        self.strings.set(string.clone(), ());
        string
    }

    /// Returns the canonical string for `s`, allocating it on first use.
    pub fn intern_str(&mut self, s: &str) -> StrRef {
        self.intern(s.as_bytes())
    }

    /// Returns the canonical string for `bytes` if one exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::Interner;
    /// #
    /// let mut strings = Interner::new();
    /// assert!(strings.lookup(b"init").is_none());
    /// let init = strings.intern(b"init");
    /// assert_eq!(strings.lookup(b"init"), Some(init));
    /// ```
    pub fn lookup(&self, bytes: &[u8]) -> Option<StrRef> {
        self.strings.find_interned(bytes, hash_bytes(bytes)).cloned()
    }

    /// Returns `true` if `string` is the canonical handle for its content.
    pub fn contains(&self, string: &StrRef) -> bool {
        self.strings.contains_key(string)
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if no strings are interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns an iterator over the interned strings in an arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.strings.keys(),
        }
    }

    /// Rebuilds the underlying table to fit the surviving strings, typically
    /// after a collection swept many of them.
    pub fn shrink_to_fit(&mut self) {
        self.strings.shrink_to_fit();
    }

    /// The underlying table, for statistics and inspection.
    pub fn table(&self) -> &Table<StrRef, ()> {
        &self.strings
    }
}

impl CollectorHooks for Interner {
    /// Reports nothing: interned strings are kept alive only by other roots.
    fn mark_reachable(&self, _collector: &mut dyn Collector) {}

    fn remove_unmarked_weak(&mut self) -> usize {
        self.strings.remove_unmarked_weak()
    }
}

impl<'a> IntoIterator for &'a Interner {
    type IntoIter = Iter<'a>;
    type Item = &'a StrRef;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the strings of an [`Interner`].
pub struct Iter<'a> {
    inner: Keys<'a, StrRef, ()>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a StrRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
