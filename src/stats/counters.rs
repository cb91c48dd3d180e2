// Router Dashboard - Rule Counters
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Per-rule hit counters for the firewall log.

use std::collections::HashMap;

/// Hit count and label of one firewall rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCount {
    pub rid: String,
    pub label: String,
    pub count: u64,
}

/// Counters keyed by rule id, kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    entries: Vec<RuleCount>,
    index: HashMap<String, usize>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hit for `rid` and return the updated entry.
    ///
    /// The stored label is only replaced by a non-empty one, so the most
    /// recent non-empty label sticks.
    pub fn record(&mut self, rid: &str, label: &str) -> &RuleCount {
        let idx = match self.index.get(rid) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                entry.count += 1;
                if !label.is_empty() {
                    entry.label = label.to_string();
                }
                idx
            }
            None => {
                self.entries.push(RuleCount {
                    rid: rid.to_string(),
                    label: label.to_string(),
                    count: 1,
                });
                let idx = self.entries.len() - 1;
                self.index.insert(rid.to_string(), idx);
                idx
            }
        };
        &self.entries[idx]
    }

    pub fn get(&self, rid: &str) -> Option<&RuleCount> {
        self.index.get(rid).map(|&idx| &self.entries[idx])
    }

    /// Number of distinct rules seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[RuleCount] {
        &self.entries
    }

    /// Entries ordered by count, highest first; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<&RuleCount> {
        rank(&self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Order counters by count, highest first; ties keep their input order.
pub fn rank(entries: &[RuleCount]) -> Vec<&RuleCount> {
    let mut ranked: Vec<&RuleCount> = entries.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_rule() {
        let mut table = CounterTable::new();
        for rid in ["a", "b", "a", "c", "a", "b"] {
            table.record(rid, "");
        }
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("a").map(|e| e.count), Some(3));
        assert_eq!(table.get("b").map(|e| e.count), Some(2));
        assert_eq!(table.get("c").map(|e| e.count), Some(1));
        assert_eq!(table.get("d"), None);
    }

    #[test]
    fn test_last_non_empty_label_wins() {
        let mut table = CounterTable::new();
        for label in ["", "A", "", "B"] {
            table.record("r1", label);
        }
        let entry = table.get("r1").unwrap();
        assert_eq!(entry.label, "B");
        assert_eq!(entry.count, 4);

        table.record("r1", "");
        assert_eq!(table.get("r1").unwrap().label, "B");
    }

    #[test]
    fn test_ranked_is_stable() {
        let mut table = CounterTable::new();
        for rid in ["x", "y", "z", "z"] {
            table.record(rid, "");
        }
        let ranked: Vec<&str> = table.ranked().iter().map(|e| e.rid.as_str()).collect();
        assert_eq!(ranked, vec!["z", "x", "y"]);

        let order: Vec<&str> = table.entries().iter().map(|e| e.rid.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }
}
