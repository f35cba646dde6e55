use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::Cell;
use core::fmt::Debug;
use core::fmt::Display;
use core::ops::Deref;

use crate::gc::Collector;
use crate::gc::GcObject;
use crate::gc::Trace;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        const HASH_SEED: u64 = 0x243f_6a88_85a3_08d3;

        /// Computes the hash a string object carries for its whole lifetime.
        ///
        /// The seed is fixed so equal content always hashes equally, which the
        /// intern lookup relies on. The 64-bit `foldhash` output is folded into
        /// 32 bits.
        #[inline]
        pub fn hash_bytes(bytes: &[u8]) -> u32 {
            use core::hash::BuildHasher;

            let hash = foldhash::fast::FixedState::with_seed(HASH_SEED).hash_one(bytes);
            (hash ^ (hash >> 32)) as u32
        }
    } else {
        /// Computes the hash a string object carries for its whole lifetime.
        ///
        /// 32-bit FNV-1a.
        #[inline]
        pub fn hash_bytes(bytes: &[u8]) -> u32 {
            let mut hash: u32 = 0x811c_9dc5;
            for &byte in bytes {
                hash ^= byte as u32;
                hash = hash.wrapping_mul(0x0100_0193);
            }
            hash
        }
    }
}

/// A key that can be stored in a [`Table`](crate::Table).
///
/// Keys carry a precomputed hash and compare by identity. Every key handed to
/// [`Table::set`](crate::Table::set) must already be interned: two keys with
/// equal content but different identities are different keys as far as the
/// table is concerned.
pub trait TableKey {
    /// The hash computed once when the key was created.
    fn key_hash(&self) -> u32;

    /// Returns `true` if both handles refer to the same object.
    fn same(&self, other: &Self) -> bool;
}

/// A key with byte content, usable with
/// [`Table::find_interned`](crate::Table::find_interned).
pub trait StringKey: TableKey {
    /// The immutable content of the string.
    fn as_bytes(&self) -> &[u8];
}

/// An immutable, garbage-collected string object.
///
/// The hash is computed once at construction and the content never changes
/// afterwards. The mark bit is owned by the collector.
pub struct ObjString {
    hash: u32,
    marked: Cell<bool>,
    bytes: Box<[u8]>,
}

impl ObjString {
    /// The precomputed hash of the content.
    #[inline]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Length of the content in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw content.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The content as `str`, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }
}

impl GcObject for ObjString {
    #[inline]
    fn is_marked(&self) -> bool {
        self.marked.get()
    }

    #[inline]
    fn set_marked(&self, marked: bool) {
        self.marked.set(marked);
    }
}

impl Debug for ObjString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjString")
            .field("hash", &format_args!("{:08x}", self.hash))
            .field("marked", &self.marked.get())
            .field("content", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}

/// A shared handle to an [`ObjString`].
///
/// Cloning a `StrRef` copies the handle, not the string. Equality is identity:
/// two handles are equal only if they point at the same object, regardless of
/// content. Use an [`Interner`](crate::Interner) to get one handle per
/// distinct content.
///
/// # Examples
///
/// ```rust
/// use intern_table::StrRef;
///
/// let a = StrRef::new(b"hello");
/// let b = StrRef::new(b"hello");
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
#[derive(Clone)]
pub struct StrRef(Rc<ObjString>);

impl StrRef {
    /// Allocates a new string object, computing its hash with
    /// [`hash_bytes`].
    pub fn new(bytes: &[u8]) -> Self {
        Self::with_hash(bytes, hash_bytes(bytes))
    }

    /// Allocates a new string object with a hash the caller already computed.
    ///
    /// The table trusts this value. Passing a hash that disagrees with
    /// [`hash_bytes`] makes the string invisible to content lookups that use
    /// the real hash, which is occasionally what a test wants (forcing
    /// collisions) and never what a runtime wants.
    pub fn with_hash(bytes: &[u8], hash: u32) -> Self {
        StrRef(Rc::new(ObjString {
            hash,
            marked: Cell::new(false),
            bytes: bytes.into(),
        }))
    }

    /// Returns `true` if both handles point at the same object.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
}

impl Deref for StrRef {
    type Target = ObjString;

    #[inline]
    fn deref(&self) -> &ObjString {
        &self.0
    }
}

impl PartialEq for StrRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        StrRef::ptr_eq(self, other)
    }
}

impl Eq for StrRef {}

impl From<&str> for StrRef {
    fn from(value: &str) -> Self {
        StrRef::new(value.as_bytes())
    }
}

impl Debug for StrRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for StrRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0.bytes))
    }
}

impl TableKey for StrRef {
    #[inline(always)]
    fn key_hash(&self) -> u32 {
        self.0.hash
    }

    #[inline(always)]
    fn same(&self, other: &Self) -> bool {
        StrRef::ptr_eq(self, other)
    }
}

impl StringKey for StrRef {
    #[inline(always)]
    fn as_bytes(&self) -> &[u8] {
        &self.0.bytes
    }
}

impl GcObject for StrRef {
    #[inline]
    fn is_marked(&self) -> bool {
        self.0.is_marked()
    }

    #[inline]
    fn set_marked(&self, marked: bool) {
        self.0.set_marked(marked);
    }
}

impl Trace for StrRef {
    #[inline]
    fn trace(&self, collector: &mut dyn Collector) {
        collector.mark_object(&*self.0);
    }
}
