// Router Dashboard - UI Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! User interface components.

mod firewall_log_view;
mod gateways_section;
mod helpers;
mod interfaces_section;
mod live_view;
mod main_window;
mod overview_page;
mod services_section;
mod traffic_page;

pub mod widgets;

pub use helpers::apply_color_scheme;
pub use main_window::MainWindow;
pub use overview_page::OverviewPage;
pub use traffic_page::TrafficPage;
