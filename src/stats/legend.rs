// Router Dashboard - Chart Legend
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Legend selection for the per-rule chart.

use super::counters::RuleCount;

/// Maximum number of legend labels shown next to the rule chart.
pub const LEGEND_LIMIT: usize = 10;

/// Rule ids that get a legend label.
///
/// With more than `limit` rules only the `limit` highest counts are kept;
/// equal counts keep first-seen order. The result is in first-seen order,
/// matching the order of the chart's slices.
pub fn legend_keys(entries: &[RuleCount], limit: usize) -> Vec<&str> {
    if entries.len() <= limit {
        return entries.iter().map(|e| e.rid.as_str()).collect();
    }

    let mut positions: Vec<usize> = (0..entries.len()).collect();
    positions.sort_by(|&a, &b| entries[b].count.cmp(&entries[a].count));
    positions.truncate(limit);
    positions.sort_unstable();

    positions.into_iter().map(|i| entries[i].rid.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(counts: &[u64]) -> Vec<RuleCount> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| RuleCount {
                rid: format!("r{}", i),
                label: String::new(),
                count,
            })
            .collect()
    }

    #[test]
    fn test_top_ten_of_twelve() {
        let entries = rules(&[50, 40, 30, 25, 20, 15, 10, 8, 6, 4, 2, 1]);
        let keys = legend_keys(&entries, LEGEND_LIMIT);
        let expected: Vec<String> = (0..10).map(|i| format!("r{}", i)).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        // r0 and r3 have the smallest count; the earlier one makes the cut.
        let entries = rules(&[1, 5, 5, 1]);
        assert_eq!(legend_keys(&entries, 3), vec!["r0", "r1", "r2"]);
    }

    #[test]
    fn test_result_in_encounter_order() {
        let entries = rules(&[1, 9, 3, 7]);
        assert_eq!(legend_keys(&entries, 2), vec!["r1", "r3"]);
    }

    #[test]
    fn test_under_limit_shows_all() {
        let entries = rules(&[3, 2, 1]);
        assert_eq!(legend_keys(&entries, LEGEND_LIMIT), vec!["r0", "r1", "r2"]);
    }
}
