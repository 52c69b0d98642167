use crate::types::Score;

/// One cached search result. `present` is an explicit flag: a zeroed key is a
/// legitimate Zobrist value, so occupancy is never inferred from it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TtEntry {
    pub key: u64,
    pub depth: u8,
    pub score: Score,
    pub maximizing: bool,
    pub present: bool,
}

/// Fixed-capacity cache of node scores, indexed by Zobrist hash. Collisions
/// are resolved by unconditional overwrite: no aging, no chaining.
pub struct TranspositionTable {
    entries: Vec<TtEntry>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table from a memory budget in megabytes. Capacity is the
    /// budget divided by the entry size, rounded down to a power of two
    /// (minimum 1024 entries) so indexing is a mask.
    pub fn new(mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TtEntry>();
        let num_entries = (mb * 1024 * 1024) / entry_size;
        let size = (num_entries.next_power_of_two() / 2).max(1024);

        Self {
            entries: vec![TtEntry::default(); size],
            mask: size - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Look up `hash`. Misses unless the slot is occupied and its stored key
    /// matches exactly, which guards against aliasing from the masked index.
    pub fn probe(&self, hash: u64) -> Option<&TtEntry> {
        let entry = &self.entries[hash as usize & self.mask];

        if entry.present && entry.key == hash {
            Some(entry)
        } else {
            None
        }
    }

    /// Store a completed node, overwriting whatever occupied the slot.
    pub fn store(&mut self, hash: u64, depth: u8, score: Score, maximizing: bool) {
        self.entries[hash as usize & self.mask] = TtEntry {
            key: hash,
            depth,
            score,
            maximizing,
            present: true,
        };
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = TtEntry::default();
        }
    }
}


// The table stores only a raw score plus which side was maximizing, not
// whether the score was exact or the product of a cutoff at some other
// alpha/beta window. Replaying such a score as an exact cutoff is not
// generally sound; it is kept as-is to match the reference behavior and is
// called out in DESIGN.md.
