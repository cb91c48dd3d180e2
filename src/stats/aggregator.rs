// Router Dashboard - Rule Aggregator
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Aggregation of the firewall live log into the dashboard's views.
//!
//! One aggregator belongs to one open dashboard view. It is created empty when
//! the view subscribes to the log stream and dropped when the view closes.

use tracing::debug;

use super::counters::{CounterTable, RuleCount};
use super::rolling_log::RollingLog;
use crate::models::LogEvent;

/// Result of ingesting one event.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Recent events, newest first.
    pub log: Vec<LogEvent>,
    /// All rule counters in first-seen order.
    pub counters: Vec<RuleCount>,
    /// The counter touched by this event.
    pub rule: RuleCount,
    /// Whether the chart legend should be laid out again because new rules
    /// are still appearing.
    pub refresh_layout: bool,
}

/// Keeps the recent-events log and the per-rule counters in step.
#[derive(Debug)]
pub struct RuleAggregator {
    log: RollingLog<LogEvent>,
    counters: CounterTable,
    layout_threshold: usize,
}

impl RuleAggregator {
    /// `log_capacity` bounds the recent-events log; `layout_threshold` is the
    /// number of distinct rules after which the layout is considered stable.
    pub fn new(log_capacity: usize, layout_threshold: usize) -> Self {
        Self {
            log: RollingLog::new(log_capacity),
            counters: CounterTable::new(),
            layout_threshold,
        }
    }

    /// Record an event in both views.
    pub fn ingest(&mut self, event: LogEvent) -> IngestOutcome {
        let rule = self.counters.record(&event.rid, &event.label).clone();
        self.log.push(event);

        let refresh_layout = !self.layout_stable();
        if rule.count == 1 {
            debug!(rid = %rule.rid, rules = self.counters.len(), "New firewall rule seen");
        }

        IngestOutcome {
            log: self.log.snapshot(),
            counters: self.counters.entries().to_vec(),
            rule,
            refresh_layout,
        }
    }

    /// True once the number of distinct rules reached the threshold.
    pub fn layout_stable(&self) -> bool {
        self.counters.len() >= self.layout_threshold
    }

    pub fn log(&self) -> &RollingLog<LogEvent> {
        &self.log
    }

    pub fn counters(&self) -> &CounterTable {
        &self.counters
    }

    /// Forget everything, as on a fresh view.
    pub fn reset(&mut self) {
        self.log.clear();
        self.counters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(rid: &str, label: &str) -> LogEvent {
        LogEvent {
            rid: rid.to_string(),
            label: label.to_string(),
            src: format!("src-{}", rid),
            ..Default::default()
        }
    }

    #[test]
    fn test_log_is_bounded_and_newest_first() {
        let mut aggregator = RuleAggregator::new(9, 5);
        for i in 0..20 {
            let outcome = aggregator.ingest(event(&format!("r{}", i % 4), ""));
            assert!(outcome.log.len() <= 9);
            assert_eq!(outcome.log[0].rid, format!("r{}", i % 4));
        }
        assert_eq!(aggregator.log().len(), 9);
    }

    #[test]
    fn test_counts_match_ingested_events() {
        let mut aggregator = RuleAggregator::new(3, 5);
        let rids = ["a", "b", "a", "c", "a", "b", "d"];
        for rid in rids {
            aggregator.ingest(event(rid, ""));
        }
        for rid in ["a", "b", "c", "d"] {
            let expected = rids.iter().filter(|r| **r == rid).count() as u64;
            assert_eq!(aggregator.counters().get(rid).map(|e| e.count), Some(expected));
        }
    }

    #[test]
    fn test_label_policy() {
        let mut aggregator = RuleAggregator::new(9, 5);
        let mut last = None;
        for label in ["", "A", "", "B"] {
            last = Some(aggregator.ingest(event("r1", label)));
        }
        let outcome = last.unwrap();
        assert_eq!(outcome.rule.label, "B");
        assert_eq!(outcome.rule.count, 4);
    }

    #[test]
    fn test_refresh_layout_turns_off_once() {
        let mut aggregator = RuleAggregator::new(9, 3);
        let flags: Vec<bool> = ["a", "a", "b", "c", "a", "d", "b"]
            .iter()
            .map(|rid| aggregator.ingest(event(rid, "")).refresh_layout)
            .collect();
        // The third distinct rule ("c") reaches the threshold.
        assert_eq!(flags, vec![true, true, true, false, false, false, false]);
        assert!(aggregator.layout_stable());
    }

    #[test]
    fn test_outcome_snapshots() {
        let mut aggregator = RuleAggregator::new(2, 5);
        aggregator.ingest(event("x", "first"));
        aggregator.ingest(event("y", ""));
        let outcome = aggregator.ingest(event("x", ""));

        let log: Vec<&str> = outcome.log.iter().map(|e| e.rid.as_str()).collect();
        assert_eq!(log, vec!["x", "y"]);
        assert_eq!(outcome.counters.len(), 2);
        assert_eq!(outcome.counters[0].rid, "x");
        assert_eq!(outcome.counters[0].label, "first");
        assert_eq!(outcome.counters[0].count, 2);
    }

    #[test]
    fn test_reset() {
        let mut aggregator = RuleAggregator::new(2, 1);
        aggregator.ingest(event("x", ""));
        assert!(aggregator.layout_stable());
        aggregator.reset();
        assert!(aggregator.log().is_empty());
        assert!(aggregator.counters().is_empty());
        assert!(!aggregator.layout_stable());
    }
}
