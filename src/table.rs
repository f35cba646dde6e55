//! The open-addressing table.
//!
//! One flat array of slots, linear probing, tombstones for deletion and a
//! full rehash whenever the load factor would be crossed.

use alloc::alloc::handle_alloc_error;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;

use crate::gc::Collector;
use crate::gc::CollectorHooks;
use crate::gc::GcObject;
use crate::gc::Trace;
use crate::string::StringKey;
use crate::string::TableKey;

/// Capacity of the first slot array a table allocates.
pub const MIN_CAPACITY: usize = 8;

cfg_if::cfg_if! {
    if #[cfg(feature = "density-fifty")] {
        /// Numerator of the maximum load factor.
        pub const MAX_LOAD_NUMERATOR: usize = 1;
        /// Denominator of the maximum load factor.
        pub const MAX_LOAD_DENOMINATOR: usize = 2;
    } else {
        /// Numerator of the maximum load factor.
        pub const MAX_LOAD_NUMERATOR: usize = 3;
        /// Denominator of the maximum load factor.
        pub const MAX_LOAD_DENOMINATOR: usize = 4;
    }
}

#[inline(always)]
fn exceeds_max_load(count: usize, capacity: usize) -> bool {
    count as u128 * MAX_LOAD_DENOMINATOR as u128 > capacity as u128 * MAX_LOAD_NUMERATOR as u128
}

/// Smallest capacity holding `count` keys without crossing the maximum load.
#[inline]
fn capacity_for(count: usize) -> usize {
    if count == 0 {
        return 0;
    }

    let mut capacity = MIN_CAPACITY;
    while exceeds_max_load(count, capacity) {
        capacity = capacity.checked_mul(2).expect("capacity overflow");
    }
    capacity
}

/// Allocates `capacity` empty slots. Allocation failure is fatal.
fn allocate_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    debug_assert!(capacity == 0 || capacity.is_power_of_two());

    let mut slots: Vec<Slot<K, V>> = Vec::new();
    if slots.try_reserve_exact(capacity).is_err() {
        handle_alloc_error(
            Layout::array::<Slot<K, V>>(capacity).expect("allocation size overflow"),
        );
    }
    slots.resize_with(capacity, || Slot::Empty);
    slots.into_boxed_slice()
}

#[derive(Clone)]
enum Slot<K, V> {
    Empty,
    /// Held a key that was deleted. Probes continue through it.
    Tombstone,
    Occupied(K, V),
}

/// Debug statistics for hash table analysis.
///
/// Compiled under `cfg(test)` or with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live keys
    pub live: usize,
    /// Number of tombstoned slots
    pub tombstones: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// (live + tombstones) / capacity, the ratio growth is decided on
    pub load_factor: f64,
    /// live / capacity
    pub live_load_factor: f64,
    /// Longest distance from a key's home slot to where it is stored
    pub max_probe: usize,
    /// Mean distance from a key's home slot to where it is stored
    pub average_probe: f64,
    /// Total memory in bytes used by the slot array
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Table Debug Statistics ===");
        println!(
            "Population: {} live + {} tombstones / {} slots ({:.2}% load factor, {:.2}% live)",
            self.live,
            self.tombstones,
            self.capacity,
            self.load_factor * 100.0,
            self.live_load_factor * 100.0
        );
        println!(
            "Probe length: max {}, average {:.3}",
            self.max_probe, self.average_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Number of histogram bins; the last one collects every longer probe.
#[cfg(any(test, feature = "stats"))]
pub const PROBE_BINS: usize = 16;

/// Probe lengths of the live keys of a [`Table`].
///
/// `bins[d]` counts keys stored `d` slots after their home slot, for
/// `d < PROBE_BINS - 1`. The last bin collects everything further out.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Per-distance key counts.
    pub bins: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Total number of keys counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = *self.bins.iter().max().unwrap_or(&0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];
            if units % 8 > 0 {
                bar.push(partial[units % 8 - 1]);
            }
            bar
        };

        for (i, &count) in self.bins.iter().enumerate() {
            let label = if i + 1 == self.bins.len() {
                alloc::format!("{:>2}+", i)
            } else {
                alloc::format!("{:>3}", i)
            };
            println!("{} | {} ({})", label, make_bar(count), count);
        }
    }
}

/// An open-addressing hash table keyed by interned strings.
///
/// `Table<K, V>` maps identity-compared keys to values. Collisions are
/// resolved by linear probing over a single power-of-two sized slot array.
/// Deleted keys leave tombstones behind so that probes for other keys keep
/// going; tombstones are reclaimed when the array is next rebuilt.
///
/// Keys must be interned before they are inserted: lookups compare keys by
/// identity ([`TableKey::same`]), never by content. The only content-based
/// lookup is [`find_interned`](Table::find_interned), which is how an interner
/// discovers whether a string already exists.
///
/// ## Load factor
///
/// Growth is decided on occupied plus tombstoned slots, so the ratio of used
/// slots never exceeds [`MAX_LOAD_NUMERATOR`] / [`MAX_LOAD_DENOMINATOR`]
/// (3/4 by default) and every probe sequence meets an empty slot.
///
/// Growth always doubles, even when most of the used slots are tombstones.
/// Under heavy insert/delete churn the array therefore grows with the number
/// of operations rather than the number of live keys. Call
/// [`shrink_to_fit`](Table::shrink_to_fit) (for example after a collection)
/// to return to the smallest array that holds the live keys.
///
/// ## Example
///
/// ```rust
/// use intern_table::Interner;
/// use intern_table::Table;
///
/// let mut strings = Interner::new();
/// let mut globals = Table::new();
///
/// let answer = strings.intern_str("answer");
/// assert!(globals.set(answer.clone(), 41));
/// assert!(!globals.set(answer.clone(), 42));
///
/// // Interning the same content again yields the very same key.
/// let again = strings.intern_str("answer");
/// assert_eq!(globals.get(&again), Some(&42));
///
/// assert!(globals.delete(&answer));
/// assert_eq!(globals.get(&answer), None);
/// ```
pub struct Table<K, V> {
    slots: Box<[Slot<K, V>]>,

    /// Occupied plus tombstoned slots.
    count: usize,
    /// Occupied slots.
    live: usize,
}

impl<K, V> Clone for Table<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            count: self.count,
            live: self.live,
        }
    }
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            slots: allocate_slots(0),
            count: 0,
            live: 0,
        }
    }
}

impl<K, V> Debug for Table<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Entries<'a, K, V>(&'a Table<K, V>);

        impl<K: Debug, V: Debug> Debug for Entries<'_, K, V> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_map().entries(self.0.iter()).finish()
            }
        }

        let layout = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => '.',
                Slot::Tombstone => 'x',
                Slot::Occupied(..) => '#',
            })
            .collect::<alloc::string::String>();

        f.debug_struct("Table")
            .field("live", &self.live)
            .field("count", &self.count)
            .field("capacity", &self.capacity())
            .field("layout", &layout)
            .field("entries", &Entries(self))
            .finish()
    }
}

impl<K, V> Table<K, V> {
    /// Creates an empty table. Nothing is allocated until the first insert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let table: Table<StrRef, i32> = Table::new();
    /// assert_eq!(table.capacity(), 0);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table that can hold at least `capacity` keys without
    /// growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let table: Table<StrRef, i32> = Table::with_capacity(100);
    /// assert!(table.capacity().is_power_of_two());
    /// assert!(table.capacity() * 3 / 4 >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: allocate_slots(capacity_for(capacity)),
            count: 0,
            live: 0,
        }
    }

    /// Returns the number of live keys in the table.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the table holds no live keys.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of slots in the table. Always zero or a power of
    /// two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstoned slots awaiting the next rebuild.
    pub fn tombstones(&self) -> usize {
        self.count - self.live
    }

    /// Frees the slot array and returns the table to its freshly created
    /// state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let mut table = Table::new();
    /// table.set(StrRef::new(b"k"), 1);
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.slots = allocate_slots(0);
        self.count = 0;
        self.live = 0;
    }

    /// Returns an iterator over the live entries in an arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.live,
        }
    }

    /// Returns an iterator over the live keys in an arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of live keys in an arbitrary
    /// order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Computes a histogram of probe lengths for the current table state.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram
    where
        K: TableKey,
    {
        let mut bins = alloc::vec![0usize; PROBE_BINS];
        for distance in self.probe_distances() {
            bins[distance.min(PROBE_BINS - 1)] += 1;
        }
        ProbeHistogram { bins }
    }

    /// Returns detailed utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats
    where
        K: TableKey,
    {
        let capacity = self.capacity();
        let (max_probe, total_probe) = self
            .probe_distances()
            .fold((0, 0), |(max, total), d| (max.max(d), total + d));

        let ratio = |n: usize| {
            if capacity == 0 {
                0.0
            } else {
                n as f64 / capacity as f64
            }
        };

        DebugStats {
            live: self.live,
            tombstones: self.tombstones(),
            capacity,
            load_factor: ratio(self.count),
            live_load_factor: ratio(self.live),
            max_probe,
            average_probe: if self.live == 0 {
                0.0
            } else {
                total_probe as f64 / self.live as f64
            },
            total_bytes: capacity * core::mem::size_of::<Slot<K, V>>(),
        }
    }

    #[cfg(any(test, feature = "stats"))]
    fn probe_distances(&self) -> impl Iterator<Item = usize> + '_
    where
        K: TableKey,
    {
        let mask = self.capacity().wrapping_sub(1);
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| match slot {
                Slot::Occupied(key, _) => {
                    Some(index.wrapping_sub(key.key_hash() as usize) & mask)
                }
                _ => None,
            })
    }
}

impl<K, V> Table<K, V>
where
    K: TableKey,
{
    /// Resolves the slot holding `key`, or the slot `key` should be inserted
    /// into.
    ///
    /// The first tombstone passed is preferred over the terminating empty
    /// slot so that deleted slots get reused. `slots` must not be empty.
    #[inline]
    fn find_slot(slots: &[Slot<K, V>], key: &K) -> usize {
        debug_assert!(slots.len().is_power_of_two());

        let mask = slots.len() - 1;
        let mut index = key.key_hash() as usize & mask;
        let mut tombstone = None;

        for _ in 0..slots.len() {
            match &slots[index] {
                Slot::Empty => return tombstone.unwrap_or(index),
                Slot::Tombstone => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                Slot::Occupied(existing, _) if existing.same(key) => return index,
                Slot::Occupied(..) => {}
            }
            index = (index + 1) & mask;
        }

        match tombstone {
            Some(index) => index,
            None => panic!("probe wrapped a full table; the maximum load factor was not enforced"),
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let key = StrRef::new(b"x");
    /// let mut table = Table::new();
    /// assert_eq!(table.get(&key), None);
    /// table.set(key.clone(), 1.5);
    /// assert_eq!(table.get(&key), Some(&1.5));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.live == 0 {
            return None;
        }

        match &self.slots[Self::find_slot(&self.slots, key)] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.live == 0 {
            return None;
        }

        let index = Self::find_slot(&self.slots, key);
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning `true` if `key` was not present.
    ///
    /// An existing key keeps its slot and only has its value replaced. May
    /// grow and rehash the whole table first.
    ///
    /// `key` must be interned: a different handle to equal content is a
    /// different key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let key = StrRef::new(b"x");
    /// let mut table = Table::new();
    /// assert!(table.set(key.clone(), "a"));
    /// assert!(!table.set(key.clone(), "b"));
    /// assert_eq!(table.get(&key), Some(&"b"));
    /// ```
    pub fn set(&mut self, key: K, value: V) -> bool {
        if exceeds_max_load(self.count + 1, self.capacity()) {
            self.grow();
        }

        let index = Self::find_slot(&self.slots, &key);
        let slot = &mut self.slots[index];
        if let Slot::Occupied(_, existing) = &mut *slot {
            *existing = value;
            return false;
        }

        // A reused tombstone was already part of `count`.
        if matches!(*slot, Slot::Empty) {
            self.count += 1;
        }
        self.live += 1;
        *slot = Slot::Occupied(key, value);

        debug_assert!(!exceeds_max_load(self.count, self.capacity()));
        true
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// The slot becomes a tombstone and keeps counting towards the load
    /// factor until the next rebuild.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let key = StrRef::new(b"x");
    /// let mut table = Table::new();
    /// assert!(!table.delete(&key));
    /// table.set(key.clone(), ());
    /// assert!(table.delete(&key));
    /// assert_eq!(table.tombstones(), 1);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if self.live == 0 {
            return None;
        }

        let index = Self::find_slot(&self.slots, key);
        let slot = &mut self.slots[index];
        if !matches!(*slot, Slot::Occupied(..)) {
            return None;
        }

        self.live -= 1;
        match core::mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(_, value) => Some(value),
            _ => unreachable!(),
        }
    }

    /// Copies every live entry of `self` into `to`, overwriting values of
    /// keys `to` already holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let (a, b) = (StrRef::new(b"a"), StrRef::new(b"b"));
    /// let mut methods = Table::new();
    /// methods.set(a.clone(), 1);
    /// methods.set(b.clone(), 2);
    ///
    /// let mut subclass = Table::new();
    /// subclass.set(b.clone(), 20);
    /// methods.add_all(&mut subclass);
    /// assert_eq!(subclass.get(&a), Some(&1));
    /// assert_eq!(subclass.get(&b), Some(&2));
    /// ```
    pub fn add_all(&self, to: &mut Table<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in self.iter() {
            to.set(key.clone(), value.clone());
        }
    }

    /// Looks up a key by content rather than identity.
    ///
    /// Matches a stored key with the same hash, length and bytes. This is how
    /// an interner checks for an existing string before allocating a new one;
    /// it is the only content comparison the table performs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// # use intern_table::hash_bytes;
    /// #
    /// let key = StrRef::new(b"init");
    /// let mut table = Table::new();
    /// table.set(key.clone(), ());
    ///
    /// let found = table.find_interned(b"init", hash_bytes(b"init"));
    /// assert!(found.is_some_and(|k| StrRef::ptr_eq(k, &key)));
    /// assert!(table.find_interned(b"other", hash_bytes(b"other")).is_none());
    /// ```
    pub fn find_interned(&self, bytes: &[u8], hash: u32) -> Option<&K>
    where
        K: StringKey,
    {
        if self.live == 0 {
            return None;
        }

        let mask = self.capacity() - 1;
        let mut index = hash as usize & mask;
        for _ in 0..self.capacity() {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(key, _) => {
                    if key.key_hash() == hash && key.as_bytes() == bytes {
                        return Some(key);
                    }
                }
            }
            index = (index + 1) & mask;
        }

        None
    }

    /// Reserves room for at least `additional` more keys without growing.
    ///
    /// Rebuilds the table (dropping tombstones) when the current array would
    /// not fit them.
    pub fn reserve(&mut self, additional: usize) {
        if !exceeds_max_load(self.count.saturating_add(additional), self.capacity()) {
            return;
        }

        let required = self.live.checked_add(additional).expect("capacity overflow");
        let capacity = capacity_for(required).max(self.capacity());
        #[cfg(feature = "tracing")]
        tracing::trace!(additional, capacity, "reserving table capacity");
        self.adjust_capacity(capacity);
    }

    /// Rebuilds the table into the smallest array that holds its live keys,
    /// dropping every tombstone. An empty table releases its array entirely.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use intern_table::StrRef;
    /// # use intern_table::Table;
    /// #
    /// let keys: Vec<StrRef> = (0..100).map(|i| StrRef::from(&*i.to_string())).collect();
    /// let mut table = Table::new();
    /// for key in &keys {
    ///     table.set(key.clone(), ());
    /// }
    /// for key in &keys[2..] {
    ///     table.delete(key);
    /// }
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.tombstones(), 0);
    /// assert_eq!(table.capacity(), 8);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let capacity = capacity_for(self.live);
        if capacity < self.capacity() || self.tombstones() > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                from = self.capacity(),
                to = capacity,
                "shrinking table"
            );
            self.adjust_capacity(capacity);
        }
    }

    #[inline]
    #[cold]
    fn grow(&mut self) {
        let capacity = if self.capacity() < MIN_CAPACITY {
            MIN_CAPACITY
        } else {
            self.capacity().checked_mul(2).expect("capacity overflow")
        };

        self.adjust_capacity(capacity);
    }

    /// Moves every live entry into a fresh array of `capacity` slots.
    /// Tombstones are left behind.
    fn adjust_capacity(&mut self, capacity: usize) {
        debug_assert!(!exceeds_max_load(self.live, capacity));

        #[cfg(feature = "tracing")]
        let (old_capacity, dropped_tombstones) = (self.capacity(), self.tombstones());

        let old = core::mem::replace(&mut self.slots, allocate_slots(capacity));
        self.count = 0;
        for slot in old.into_vec() {
            if let Slot::Occupied(key, value) = slot {
                let index = Self::find_slot(&self.slots, &key);
                self.slots[index] = Slot::Occupied(key, value);
                self.count += 1;
            }
        }
        debug_assert_eq!(self.count, self.live);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_capacity,
            new_capacity = capacity,
            live = self.live,
            dropped_tombstones,
            "rehashed table"
        );
    }
}

impl<K, V> CollectorHooks for Table<K, V>
where
    K: TableKey + GcObject + Trace,
    V: Trace,
{
    fn mark_reachable(&self, collector: &mut dyn Collector) {
        for (key, value) in self.iter() {
            key.trace(collector);
            value.trace(collector);
        }
    }

    fn remove_unmarked_weak(&mut self) -> usize {
        let mut removed = 0;
        for slot in self.slots.iter_mut() {
            if matches!(&*slot, Slot::Occupied(key, _) if !key.is_marked()) {
                *slot = Slot::Tombstone;
                removed += 1;
            }
        }
        self.live -= removed;

        #[cfg(feature = "tracing")]
        tracing::debug!(removed, live = self.live, "removed unmarked weak keys");
        removed
    }
}

impl<'a, K, V> IntoIterator for &'a Table<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the live entries of a [`Table`].
///
/// This struct is created by the [`iter`] method on [`Table`].
///
/// [`iter`]: Table::iter
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a [`Table`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a [`Table`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
