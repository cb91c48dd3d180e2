// Router Dashboard - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Router Dashboard - A GTK4/Libadwaita dashboard for OPNsense routers.

use gtk4::glib;
use gtk4::prelude::*;
use tracing_subscriber::EnvFilter;

mod api;
mod application;
mod config;
mod models;
mod options;
mod stats;
mod ui;
mod units;

use application::Application;

/// Application ID for the router dashboard.
const APP_ID: &str = "com.chrisdaggas.router-dashboard";

fn main() -> glib::ExitCode {
    // Match StartupWMClass in the .desktop file so the shell finds the icon
    glib::set_prgname(Some(APP_ID));
    glib::set_application_name("Router Dashboard");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = Application::new(APP_ID);
    app.run()
}
