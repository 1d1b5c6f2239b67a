// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered, lock-aware key sequence.

use alloc::vec::Vec;

/// A committed structural change, recorded in the journal.
///
/// Changes are recorded when the live sequence actually mutates: immediately
/// for unlocked operations, at [`Collection::cleanup`] for deferred ones.
/// Owners drain the journal with [`Collection::take_changes`] once per pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change<K> {
    /// `key` was added at `index` in the live sequence.
    Added {
        /// The key that was added.
        key: K,
        /// Position the key landed at.
        index: usize,
    },
    /// `key` was removed from the live sequence.
    Removed {
        /// The key that was removed.
        key: K,
    },
    /// All entries were removed at once.
    Cleared,
    /// The sequence was reordered in place.
    Sorted,
}

/// An addition deferred while the collection was locked.
#[derive(Clone, Copy, Debug)]
struct Pending<K> {
    key: K,
    /// Requested position, or `None` to append.
    index: Option<usize>,
}

/// An ordered, duplicate-free sequence of keys with deferred mutation.
///
/// While unlocked, `add`/`insert`/`remove`/`remove_at`/`clear`/`sort_by`
/// mutate the live sequence immediately. While locked (see
/// [`Collection::lock`]), additions are buffered, removals flag the entry as
/// doomed, and the live sequence stays untouched until
/// [`Collection::cleanup`] runs. [`Collection::sort_by`] is refused while
/// locked because reordering cannot be deferred per entry.
///
/// Refused operations return `false` (or `None`) and change nothing; see the
/// per-method docs for the exact rules. Keys are small copyable handles, so
/// the sequence is scanned linearly; child lists in UI trees are short.
#[derive(Clone, Debug, Default)]
pub struct Collection<K> {
    /// The live sequence; doomed entries remain here until cleanup.
    items: Vec<K>,
    /// Keys flagged for removal while locked.
    doomed: Vec<K>,
    /// Additions deferred while locked, in call order.
    pending: Vec<Pending<K>>,
    /// Reentrant lock depth; the collection is locked while non-zero.
    locks: u32,
    /// Committed changes since the journal was last drained.
    journal: Vec<Change<K>>,
}

impl<K: Copy + PartialEq> Collection<K> {
    /// Create a new empty collection.
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            doomed: Vec::new(),
            pending: Vec::new(),
            locks: 0,
            journal: Vec::new(),
        }
    }

    /// Number of entries in the live sequence (doomed entries included).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the live sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The live sequence as a slice, in order.
    ///
    /// While locked this is exactly what a traversal in progress observes:
    /// doomed entries are still present and buffered additions are not.
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    /// Iterate the live sequence in order.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Returns the entry at `index` in the live sequence.
    pub fn get(&self, index: usize) -> Option<K> {
        self.items.get(index).copied()
    }

    /// Returns the position of `key` in the live sequence.
    pub fn index_of(&self, key: K) -> Option<usize> {
        self.items.iter().position(|&k| k == key)
    }

    /// Returns `true` if `key` is in the live sequence (doomed or not).
    pub fn contains(&self, key: K) -> bool {
        self.items.contains(&key)
    }

    /// Returns `true` if `key` is doomed or buffered, i.e. would appear or
    /// disappear at the next cleanup.
    pub fn is_deferred(&self, key: K) -> bool {
        self.doomed.contains(&key) || self.is_pending_add(key)
    }

    /// Returns `true` if `key` sits in the buffer of deferred additions.
    pub fn is_pending_add(&self, key: K) -> bool {
        self.pending.iter().any(|p| p.key == key)
    }

    /// Returns `true` if `key` is flagged for removal at the next cleanup.
    pub fn is_doomed(&self, key: K) -> bool {
        self.doomed.contains(&key)
    }

    /// Returns `true` if an [`Collection::add`] of `key` would be accepted
    /// right now. Owners use this to check feasibility before committing to
    /// a transfer.
    pub fn can_add(&self, key: K) -> bool {
        !self.is_pending_add(key) && (!self.contains(key) || self.is_doomed(key))
    }

    /// Iterate the keys buffered for addition, in call order.
    pub fn pending_adds(&self) -> impl Iterator<Item = K> + '_ {
        self.pending.iter().map(|p| p.key)
    }

    /// Begin a traversal: structural changes are deferred until the matching
    /// [`Collection::unlock`] and a subsequent [`Collection::cleanup`].
    ///
    /// Locks nest; the collection stays locked until every lock is released.
    pub fn lock(&mut self) {
        self.locks = self.locks.saturating_add(1);
    }

    /// End a traversal begun with [`Collection::lock`].
    ///
    /// Returns `true` once the last lock is released. Deferred operations
    /// stay parked until [`Collection::cleanup`] is called.
    pub fn unlock(&mut self) -> bool {
        self.locks = self.locks.saturating_sub(1);
        self.locks == 0
    }

    /// Returns `true` while at least one lock is held.
    pub fn is_locked(&self) -> bool {
        self.locks > 0
    }

    /// Append `key` to the sequence.
    ///
    /// Refused (returns `false`) if `key` is already present, unless it is
    /// flagged for removal: re-adding a doomed key while locked is accepted
    /// and lands at the end after cleanup, matching call order. While locked
    /// the addition is buffered.
    pub fn add(&mut self, key: K) -> bool {
        self.push_deferred(key, None)
    }

    /// Insert `key` at `index` (clamped to the sequence length).
    ///
    /// Same refusal rules as [`Collection::add`]. While locked, the index is
    /// applied at cleanup time against the sequence as it stands then.
    pub fn insert(&mut self, index: usize, key: K) -> bool {
        self.push_deferred(key, Some(index))
    }

    fn push_deferred(&mut self, key: K, index: Option<usize>) -> bool {
        if self.pending.iter().any(|p| p.key == key) {
            return false;
        }
        let doomed = self.doomed.contains(&key);
        if self.contains(key) && !doomed {
            return false;
        }
        if self.is_locked() || doomed {
            // A doomed key may be re-added: the purge commits first, so the
            // entry reappears per call order without ever duplicating.
            self.pending.push(Pending { key, index });
            return true;
        }
        let at = match index {
            Some(i) => i.min(self.items.len()),
            None => self.items.len(),
        };
        self.items.insert(at, key);
        self.journal.push(Change::Added { key, index: at });
        true
    }

    /// Remove `key` from the sequence.
    ///
    /// Refused (returns `false`) if `key` is neither present nor buffered.
    /// While locked, a present entry is flagged and stays visible to the
    /// traversal in progress; a buffered addition is cancelled outright.
    pub fn remove(&mut self, key: K) -> bool {
        if let Some(i) = self.pending.iter().position(|p| p.key == key) {
            self.pending.remove(i);
            return true;
        }
        let Some(at) = self.index_of(key) else {
            return false;
        };
        if self.doomed.contains(&key) {
            return false;
        }
        if self.is_locked() {
            self.doomed.push(key);
            return true;
        }
        self.items.remove(at);
        self.journal.push(Change::Removed { key });
        true
    }

    /// Remove the entry at `index` in the live sequence.
    ///
    /// Returns the removed key, or `None` if `index` is out of range or the
    /// entry is already doomed. While locked this flags rather than removes.
    pub fn remove_at(&mut self, index: usize) -> Option<K> {
        let key = self.get(index)?;
        if self.doomed.contains(&key) {
            return None;
        }
        if self.is_locked() {
            self.doomed.push(key);
            return Some(key);
        }
        self.items.remove(index);
        self.journal.push(Change::Removed { key });
        Some(key)
    }

    /// Remove every entry.
    ///
    /// While locked, all live entries are flagged and all buffered additions
    /// are dropped; the traversal in progress still sees the full sequence.
    pub fn clear(&mut self) {
        self.pending.clear();
        if self.is_locked() {
            for &key in &self.items {
                if !self.doomed.contains(&key) {
                    self.doomed.push(key);
                }
            }
            return;
        }
        self.doomed.clear();
        if !self.items.is_empty() {
            self.items.clear();
            self.journal.push(Change::Cleared);
        }
    }

    /// Reorder the live sequence in place.
    ///
    /// Refused (returns `false`) while locked: a reorder cannot be deferred
    /// entry by entry the way additions and removals can.
    pub fn sort_by<F>(&mut self, mut compare: F) -> bool
    where
        F: FnMut(&K, &K) -> core::cmp::Ordering,
    {
        if self.is_locked() {
            return false;
        }
        self.items.sort_by(&mut compare);
        self.journal.push(Change::Sorted);
        true
    }

    /// Commit deferred operations: purge doomed entries, then apply buffered
    /// additions in call order.
    ///
    /// Refused (returns `false`) while still locked. Safe to call when
    /// nothing is deferred.
    pub fn cleanup(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        if !self.doomed.is_empty() {
            let doomed = core::mem::take(&mut self.doomed);
            self.items.retain(|k| !doomed.contains(k));
            for key in doomed {
                self.journal.push(Change::Removed { key });
            }
        }
        for Pending { key, index } in core::mem::take(&mut self.pending) {
            if self.contains(key) {
                continue;
            }
            let at = match index {
                Some(i) => i.min(self.items.len()),
                None => self.items.len(),
            };
            self.items.insert(at, key);
            self.journal.push(Change::Added { key, index: at });
        }
        true
    }

    /// Returns `true` if a cleanup would change the live sequence.
    pub fn needs_cleanup(&self) -> bool {
        !self.doomed.is_empty() || !self.pending.is_empty()
    }

    /// Drain the journal of committed changes since the last drain.
    pub fn take_changes(&mut self) -> Vec<Change<K>> {
        core::mem::take(&mut self.journal)
    }
}
