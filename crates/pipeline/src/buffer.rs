use chrono::{DateTime, Local};
use dewmon_core::{DerivedPoint, DewError, Reading, Result};

/// One flattened row of buffered history, oldest first in [`RollingBuffer::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub timestamp:         DateTime<Local>,
    pub temperature:       f64,
    pub moving_avg:        f64,
    pub relative_humidity: f64,
    pub absolute_humidity: f64,
    pub dew_point:         f64,
}

#[derive(Debug, Clone)]
struct Entry {
    reading: Reading,
    derived: DerivedPoint,
}

/// Fixed-capacity, time-ordered history of readings and their derived values.
///
/// Slots are allocated once; when full, `append` overwrites the oldest slot
/// and advances `head`, so eviction never shifts or reallocates.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    slots:    Vec<Entry>,
    capacity: usize,
    /// Index of the oldest entry once the ring has wrapped.
    head:     usize,
}

impl RollingBuffer {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DewError::Config("rolling buffer capacity must be at least 1".into()));
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        })
    }

    /// Push a new entry, evicting the oldest if at capacity.
    pub fn append(&mut self, reading: Reading, derived: DerivedPoint) {
        let entry = Entry { reading, derived };
        if self.slots.len() < self.capacity {
            self.slots.push(entry);
        } else {
            self.slots[self.head] = entry;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest → newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Reading, &DerivedPoint)> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older
            .iter()
            .chain(newer.iter())
            .map(|e| (&e.reading, &e.derived))
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<(&Reading, &DerivedPoint)> {
        self.iter().next_back()
    }

    /// Timestamps and temperatures of entries strictly newer than `since`,
    /// in insertion order.
    pub fn recent_temperatures(&self, since: DateTime<Local>) -> Vec<(DateTime<Local>, f64)> {
        // Timestamps are non-decreasing, so walk back from the newest entry.
        let mut recent: Vec<_> = self
            .iter()
            .rev()
            .take_while(|(r, _)| r.timestamp > since)
            .map(|(r, _)| (r.timestamp, r.temperature))
            .collect();
        recent.reverse();
        recent
    }

    /// Full current contents, oldest first.
    pub fn snapshot(&self) -> Vec<SnapshotRow> {
        self.iter()
            .map(|(r, d)| SnapshotRow {
                timestamp:         r.timestamp,
                temperature:       r.temperature,
                moving_avg:        d.moving_avg_temperature,
                relative_humidity: r.relative_humidity,
                absolute_humidity: d.absolute_humidity,
                dew_point:         d.dew_point,
            })
            .collect()
    }
}

/// Mean of the `recent` temperatures together with `current`.
///
/// With no recent history this is exactly `current`.
pub fn moving_average(recent: &[(DateTime<Local>, f64)], current: f64) -> f64 {
    if recent.is_empty() {
        return current;
    }
    let sum: f64 = recent.iter().map(|(_, t)| t).sum::<f64>() + current;
    sum / (recent.len() + 1) as f64
}
