//! Open-addressing hash table with linear probing.
//!
//! One generic table serves every registry in the engine: asset tables
//! keyed by name, the entity-type registry keyed by name, and the
//! per-type identity-to-slot index keyed by [`Identity`]. The key kind is
//! a trait bound instead of a runtime tag, so each instantiation is
//! checked at compile time.
//!
//! Capacity never drops below 17 and the load factor never exceeds 0.5
//! after an insertion: crossing it doubles the capacity and rehashes
//! every live entry before the new one is placed. Deletion compacts the
//! probe chain by backward-shifting, so lookups stay correct under
//! delete/insert churn.

use loam_foundation::{Error, Identity, Result};

use crate::array::GrowArray;

/// Smallest slot count a table ever has.
pub(crate) const MIN_CAPACITY: usize = 17;

/// A key kind the hash table can store.
///
/// Implemented for the three kinds in use: text ([`String`]), 64-bit
/// integers ([`u64`]), and 128-bit identities ([`Identity`]).
pub trait TableKey: Clone + Eq + std::fmt::Display {
    /// Hashes the key to a 64-bit value.
    ///
    /// Slot selection is `table_hash() % capacity` with linear probing;
    /// the hash itself must not depend on table state.
    fn table_hash(&self) -> u64;
}

impl TableKey for String {
    /// Multiplicative rolling hash over bytes (×33, seed 5381).
    fn table_hash(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }
}

impl TableKey for u64 {
    /// Fixed-round avalanche mixer: xor-shift plus two large-odd-constant
    /// multiplications.
    fn table_hash(&self) -> u64 {
        mix_u64(*self)
    }
}

impl TableKey for Identity {
    /// Mixes each 64-bit half independently and combines with bitwise OR.
    fn table_hash(&self) -> u64 {
        let (lo, hi) = self.halves();
        mix_u64(lo) | mix_u64(hi)
    }
}

fn mix_u64(x: u64) -> u64 {
    let mut x = x;
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 5381;
    for &byte in bytes {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u64::from(byte));
    }
    hash
}

/// A borrowed form that can probe a table keyed by `K`.
///
/// The lookup hash must agree with [`TableKey::table_hash`] on equal
/// keys; `str` hashes its bytes exactly as the owned `String` key does,
/// so name registries can be probed without allocating.
pub trait TableLookup<K>: std::fmt::Display {
    /// Hashes the borrowed key.
    fn lookup_hash(&self) -> u64;

    /// Tests the borrowed key against a stored key.
    fn matches(&self, key: &K) -> bool;
}

impl<K: TableKey> TableLookup<K> for K {
    fn lookup_hash(&self) -> u64 {
        self.table_hash()
    }

    fn matches(&self, key: &K) -> bool {
        self == key
    }
}

impl TableLookup<String> for str {
    fn lookup_hash(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }

    fn matches(&self, key: &String) -> bool {
        key.as_str() == self
    }
}

/// One occupied slot: the key and its value, stored side by side.
#[derive(Clone, Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
}

enum Probe {
    /// The key sits in this slot.
    Found(usize),
    /// The key is absent; probing ended at this free slot.
    Vacant(usize),
}

/// An associative map from one fixed key kind to fixed-size value slots.
///
/// See the module docs for the capacity, load-factor, and deletion
/// policies.
#[derive(Clone, Debug)]
pub struct HashTable<K: TableKey, V> {
    slots: GrowArray<Option<Slot<K, V>>>,
    live: usize,
}

impl<K: TableKey, V> HashTable<K, V> {
    /// Creates an empty table with the minimum capacity of 17 slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// The capacity is clamped up to the minimum of 17.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        let mut slots = GrowArray::new();
        slots.grow(capacity);
        Self { slots, live: 0 }
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the slot count.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Linear probe from the key's home slot.
    ///
    /// The table always has free slots (load factor <= 0.5), so probing
    /// terminates.
    fn probe<Q: TableLookup<K> + ?Sized>(&self, key: &Q) -> Probe {
        let capacity = self.slots.len();
        let mut index = (key.lookup_hash() % capacity as u64) as usize;
        loop {
            match &self.slots[index] {
                None => return Probe::Vacant(index),
                Some(slot) if key.matches(&slot.key) => return Probe::Found(index),
                Some(_) => index = (index + 1) % capacity,
            }
        }
    }

    /// Looks up the value for `key`. Read-only; never mutates the table.
    #[must_use]
    pub fn get<Q: TableLookup<K> + ?Sized>(&self, key: &Q) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(index) => self.slots[index].as_ref().map(|slot| &slot.value),
            Probe::Vacant(_) => None,
        }
    }

    /// Looks up the value for `key`, mutably.
    pub fn get_mut<Q: TableLookup<K> + ?Sized>(&mut self, key: &Q) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(index) => self.slots[index].as_mut().map(|slot| &mut slot.value),
            Probe::Vacant(_) => None,
        }
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains<Q: TableLookup<K> + ?Sized>(&self, key: &Q) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Inserts `value` under `key` and returns a reference to its slot.
    ///
    /// A duplicate key is an error and leaves the table untouched. If the
    /// insertion would push the load factor past 0.5, the capacity
    /// doubles and every live entry is rehashed before the new one is
    /// placed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if the key is already present.
    pub fn add(&mut self, key: K, value: V) -> Result<&mut V> {
        if (self.live + 1) * 2 > self.slots.len() {
            self.rehash(self.slots.len() * 2);
        }
        match self.probe(&key) {
            Probe::Found(_) => Err(Error::duplicate_key(key)),
            Probe::Vacant(index) => {
                self.live += 1;
                let slot = self.slots[index].insert(Slot { key, value });
                Ok(&mut slot.value)
            }
        }
    }

    /// Doubles into a fresh slot array, reinserting every live entry.
    fn rehash(&mut self, new_capacity: usize) {
        let mut new_slots: GrowArray<Option<Slot<K, V>>> = GrowArray::new();
        new_slots.grow(new_capacity);
        let old_slots = std::mem::replace(&mut self.slots, new_slots);
        for slot in old_slots {
            let Some(slot) = slot else { continue };
            let capacity = self.slots.len();
            let mut index = (slot.key.table_hash() % capacity as u64) as usize;
            while self.slots[index].is_some() {
                index = (index + 1) % capacity;
            }
            self.slots[index] = Some(slot);
        }
    }

    /// Removes the entry for `key`.
    ///
    /// The vacated slot is refilled by backward-shifting any later entry
    /// in the probe chain whose home slot precedes the hole, so no live
    /// key becomes unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent; the table is
    /// untouched.
    pub fn del<Q: TableLookup<K> + ?Sized>(&mut self, key: &Q) -> Result<()> {
        let mut hole = match self.probe(key) {
            Probe::Found(index) => index,
            Probe::Vacant(_) => return Err(Error::key_not_found(key)),
        };
        let capacity = self.slots.len();
        self.slots[hole] = None;
        self.live -= 1;

        // Backward-shift compaction: walk the chain after the hole and
        // pull back every entry whose home slot does not lie in (hole, i].
        let mut index = hole;
        loop {
            index = (index + 1) % capacity;
            let home = match &self.slots[index] {
                None => break,
                Some(slot) => (slot.key.table_hash() % capacity as u64) as usize,
            };
            let in_between = if hole < index {
                hole < home && home <= index
            } else {
                home > hole || home <= index
            };
            if !in_between {
                let moved = self.slots[index].take();
                self.slots[hole] = moved;
                hole = index;
            }
        }
        Ok(())
    }

    /// Recovers the key for a value reference previously returned by
    /// [`HashTable::get`] or [`HashTable::add`].
    ///
    /// Used for diagnostics ("which registry name does this value belong
    /// to"). A reference that does not point into this table's slot
    /// storage is a logged no-op returning `None`.
    #[must_use]
    pub fn key_of(&self, value: &V) -> Option<&K> {
        let base = self.slots.as_slice().as_ptr() as usize;
        let addr = std::ptr::from_ref(value) as usize;
        let slot_size = std::mem::size_of::<Option<Slot<K, V>>>();
        let span = self.slots.len() * slot_size;
        if addr < base || addr >= base + span {
            log::warn!("key_of: value reference is not into this table");
            return None;
        }
        let index = (addr - base) / slot_size;
        self.slots[index].as_ref().map(|slot| &slot.key)
    }

    /// Marks every slot free and resets the live count.
    ///
    /// Capacity is kept. Entries are dropped in place.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.live = 0;
    }

    /// Iterates over live `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|slot| (&slot.key, &slot.value)))
    }
}

impl<K: TableKey, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
