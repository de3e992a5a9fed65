use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Bounded record of successfully executed command lines.
///
/// Entries are kept oldest first. Once the buffer is full, adding a line evicts the
/// oldest entry, so index `i` always names the `i`-th oldest surviving line and
/// indices shift by one on every eviction.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, evicting the oldest entry when full.
    pub fn add(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.capacity {
            let evicted = self.entries.pop_front();
            log::debug!("history full, evicting {evicted:?}");
        }
        self.entries.push_back(line.into());
    }

    /// Entry at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or(Error::HistoryOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
