// Router Dashboard - Rolling Log
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Bounded newest-first log of recent entries.

use std::collections::VecDeque;

/// Keeps the `capacity` most recent entries, newest first.
#[derive(Debug, Clone)]
pub struct RollingLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingLog<T> {
    /// Create an empty log. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert an entry at the front, evicting the oldest one when full.
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
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

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Most recently inserted entry.
    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> RollingLog<T> {
    /// Copy of the entries, newest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_bounded() {
        let mut log = RollingLog::new(3);
        for i in 1..=5 {
            log.push(i);
            assert!(log.len() <= 3);
            assert_eq!(log.newest(), Some(&i));
        }
        assert!(log.is_full());
        assert_eq!(log.snapshot(), vec![5, 4, 3]);
    }

    #[test]
    fn test_not_full_until_capacity() {
        let mut log = RollingLog::new(9);
        log.push("a");
        log.push("b");
        assert!(!log.is_full());
        assert_eq!(log.snapshot(), vec!["b", "a"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = RollingLog::new(0);
        log.push(1);
        log.push(2);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.snapshot(), vec![2]);
    }
}
