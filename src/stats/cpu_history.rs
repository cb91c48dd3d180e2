// Router Dashboard - CPU History
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Sliding window of CPU samples for the line charts.

use std::collections::VecDeque;

use crate::models::{CpuGraph, CpuSample};

/// Number of samples kept per graph (one per second from the stream).
pub const DEFAULT_CPU_SAMPLES: usize = 60;

/// Internal time series for the CPU graphs.
#[derive(Debug)]
pub struct CpuHistory {
    samples: VecDeque<CpuSample>,
    max_samples: usize,
}

impl Default for CpuHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_SAMPLES)
    }
}

impl CpuHistory {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    pub fn push(&mut self, sample: CpuSample) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Values of one graph, oldest first.
    pub fn series(&self, graph: CpuGraph) -> Vec<f64> {
        self.samples.iter().map(|s| s.value(graph)).collect()
    }

    pub fn latest(&self) -> Option<&CpuSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_slides() {
        let mut history = CpuHistory::new(3);
        for i in 0..5 {
            history.push(CpuSample { total: i as f64, user: 1.0, ..Default::default() });
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.series(CpuGraph::Total), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.series(CpuGraph::User), vec![1.0, 1.0, 1.0]);
        assert_eq!(history.latest().map(|s| s.total), Some(4.0));
    }
}
