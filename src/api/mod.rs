// Router Dashboard - Router API Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Access to the router's REST endpoints and event streams.

mod client;
mod sse;
mod stream;

use std::future::Future;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

pub use client::ApiClient;
pub use stream::{EventSubscription, SubscriptionHandle};

/// Endpoint paths relative to the router's base URL.
pub mod paths {
    pub const SYSTEM_RESOURCES: &str = "/api/diagnostics/system/systemResources";
    pub const SYSTEM_DISK: &str = "/api/diagnostics/system/systemDisk";
    pub const CPU_TYPE: &str = "/api/diagnostics/cpu_usage/getcputype";
    pub const CPU_STREAM: &str = "/api/diagnostics/cpu_usage/stream";
    pub const INTERFACE_NAMES: &str = "/api/diagnostics/interface/getInterfaceNames";
    pub const FIREWALL_LOG_STREAM: &str = "/api/diagnostics/firewall/streamLog";
    pub const INTERFACES_INFO: &str = "/api/interfaces/overview/interfacesInfo";
    pub const SERVICES: &str = "/api/core/service/search";
    pub const SERVICE_COMMAND: &str = "/api/core/service";
    pub const GATEWAYS: &str = "/api/routes/gateway/status";
    pub const FIREWALL_LOG_PAGE: &str = "/ui/diagnostics/firewall/log";
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// The process-wide runtime for network I/O.
pub fn runtime() -> Result<&'static Runtime> {
    if let Some(rt) = RUNTIME.get() {
        return Ok(rt);
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("router-api")
        .enable_all()
        .build()
        .context("Failed to start network runtime")?;

    Ok(RUNTIME.get_or_init(|| rt))
}

/// Run a request on the network runtime and await its result from any
/// executor, including the GTK main loop.
pub async fn run<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    runtime()?
        .spawn(future)
        .await
        .context("Background request was cancelled")?
}
