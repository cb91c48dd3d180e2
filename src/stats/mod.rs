// Router Dashboard - Statistics Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Live statistics derived from the router's event streams.

mod aggregator;
mod counters;
mod cpu_history;
mod legend;
mod rolling_log;

pub use aggregator::{IngestOutcome, RuleAggregator};
pub use counters::{rank, CounterTable, RuleCount};
pub use cpu_history::CpuHistory;
pub use legend::{legend_keys, LEGEND_LIMIT};
pub use rolling_log::RollingLog;
