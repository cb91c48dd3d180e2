// Router Dashboard - Widgets Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Custom UI widgets.

mod bar_chart;
mod donut_chart;
mod line_chart;
mod usage_bar;

pub use bar_chart::BarChart;
pub use donut_chart::{DonutChart, DonutSlice};
pub use line_chart::LineChart;
pub use usage_bar::UsageBar;
