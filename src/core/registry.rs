use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::core::value::Record;

/// Surrogate identifier for a rendered row or subtable. Position-independent
/// and never reused within one editor session, so a stale id cannot alias a
/// different record after deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Monotonic id source shared by every table level of one editor session.
#[derive(Debug, Clone, Default)]
pub struct IdMinter(Arc<AtomicU64>);

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self) -> RowId {
        RowId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a registry id stands for.
///
/// `Row` is a directly editable row and owns the record's stored values for
/// fields not currently visible in a control (nested collections above all).
/// `Subtable` marks a nested collection expanded beneath its owning row; its
/// content is a full table with its own registry, and on collapse or commit
/// its result is written into `parent`'s record at `field_index`.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEntry {
    Row { record: Record },
    Subtable { field_index: usize, parent: RowId },
}

/// Identity layer for one table level: surrogate id to registry entry.
/// Single source of truth when edits are routed back into the value tree.
pub struct RowRegistry {
    minter: IdMinter,
    entries: IndexMap<RowId, RegistryEntry>,
}

impl RowRegistry {
    pub fn new(minter: IdMinter) -> Self {
        Self {
            minter,
            entries: IndexMap::new(),
        }
    }

    pub fn minter(&self) -> &IdMinter {
        &self.minter
    }

    pub fn register(&mut self, entry: RegistryEntry) -> RowId {
        let id = self.minter.mint();
        self.entries.insert(id, entry);
        id
    }

    pub fn get(&self, id: RowId) -> Option<&RegistryEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut RegistryEntry> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: RowId) -> Option<RegistryEntry> {
        self.entries.shift_remove(&id)
    }

    pub fn record(&self, id: RowId) -> Option<&Record> {
        match self.get(id)? {
            RegistryEntry::Row { record } => Some(record),
            RegistryEntry::Subtable { .. } => None,
        }
    }

    pub fn record_mut(&mut self, id: RowId) -> Option<&mut Record> {
        match self.get_mut(id)? {
            RegistryEntry::Row { record } => Some(record),
            RegistryEntry::Subtable { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &RegistryEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}
