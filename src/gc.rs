//! Collector cooperation.
//!
//! The table never calls into a collector on its own. A mark-and-sweep
//! collector drives it through [`CollectorHooks`] at its safepoints:
//!
//! 1. [`CollectorHooks::mark_reachable`] on every strong table reachable from
//!    the root set, so the keys and values stored there survive.
//! 2. [`CollectorHooks::remove_unmarked_weak`] on weak tables (the intern
//!    table) after marking and before sweeping, so that they drop every key
//!    nothing else kept alive.
//!
//! Neither hook may run while another table operation is in progress. Every
//! type here is single-threaded, which the compiler enforces through
//! `!Send`/`!Sync` on the string handles.

/// A heap object with a mark bit.
pub trait GcObject {
    /// Whether the object was reached during the current mark phase.
    fn is_marked(&self) -> bool;

    /// Sets or clears the mark bit.
    fn set_marked(&self, marked: bool);
}

/// The collector's "mark reachable" operation.
pub trait Collector {
    /// Reports `object` as reachable.
    fn mark_object(&mut self, object: &dyn GcObject);
}

/// A value that may hold references to heap objects.
///
/// Leaf types implement this as a no-op.
pub trait Trace {
    /// Reports every heap object referenced by `self` to `collector`.
    fn trace(&self, collector: &mut dyn Collector);
}

/// The capability a table exposes to a collector.
pub trait CollectorHooks {
    /// Marks every live key and value as reachable.
    fn mark_reachable(&self, collector: &mut dyn Collector);

    /// Tombstones every entry whose key was not marked during the preceding
    /// mark phase, and returns how many were removed.
    fn remove_unmarked_weak(&mut self) -> usize;
}

/// A minimal mark-phase collector.
///
/// Sets the mark bit of every object reported to it and counts how many were
/// newly marked. Objects reachable only through other objects are the
/// caller's business: string objects, the only heap objects this crate knows
/// about, have no outgoing references.
///
/// # Examples
///
/// ```rust
/// use intern_table::gc::Collector;
/// use intern_table::gc::GcObject;
/// use intern_table::gc::MarkCollector;
/// use intern_table::StrRef;
///
/// let s = StrRef::new(b"root");
/// let mut collector = MarkCollector::new();
/// collector.mark_object(&*s);
/// collector.mark_object(&*s);
/// assert!(s.is_marked());
/// assert_eq!(collector.marked(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MarkCollector {
    marked: usize,
}

impl MarkCollector {
    /// Creates a collector with no objects marked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects this collector marked.
    pub fn marked(&self) -> usize {
        self.marked
    }

    /// Clears the mark bit of `object` for the next cycle.
    pub fn unmark(&mut self, object: &dyn GcObject) {
        if object.is_marked() {
            object.set_marked(false);
            self.marked = self.marked.saturating_sub(1);
        }
    }
}

impl Collector for MarkCollector {
    fn mark_object(&mut self, object: &dyn GcObject) {
        if !object.is_marked() {
            object.set_marked(true);
            self.marked += 1;
        }
    }
}

macro_rules! impl_leaf_trace {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Trace for $ty {
                #[inline(always)]
                fn trace(&self, _collector: &mut dyn Collector) {}
            }
        )*
    };
}

impl_leaf_trace!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
);

impl<T: Trace> Trace for Option<T> {
    #[inline]
    fn trace(&self, collector: &mut dyn Collector) {
        if let Some(value) = self {
            value.trace(collector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::StrRef;

    #[test]
    fn marks_each_object_once() {
        let a = StrRef::new(b"a");
        let b = StrRef::new(b"b");
        let mut collector = MarkCollector::new();

        a.trace(&mut collector);
        a.trace(&mut collector);
        b.trace(&mut collector);
        assert_eq!(collector.marked(), 2);
        assert!(a.is_marked());
        assert!(b.is_marked());

        collector.unmark(&*a);
        collector.unmark(&*a);
        assert_eq!(collector.marked(), 1);
        assert!(!a.is_marked());
    }

    #[test]
    fn option_traces_its_payload() {
        let s = StrRef::new(b"maybe");
        let mut collector = MarkCollector::new();

        None::<StrRef>.trace(&mut collector);
        assert_eq!(collector.marked(), 0);

        Some(s.clone()).trace(&mut collector);
        assert!(s.is_marked());
    }

    #[test]
    fn leaves_mark_nothing() {
        let mut collector = MarkCollector::new();
        ().trace(&mut collector);
        42i64.trace(&mut collector);
        1.5f64.trace(&mut collector);
        Some(true).trace(&mut collector);
        assert_eq!(collector.marked(), 0);
    }
}
