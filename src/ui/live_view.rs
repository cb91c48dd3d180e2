// Router Dashboard - Live View Lifecycle
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Open/close lifecycle shared by the dashboard pages.
//!
//! A page is "open" while it is the visible page. Opening subscribes to the
//! event streams and starts the poll tick; closing tears both down. All state
//! derived from the streams lives only as long as one open session.

use std::time::Duration;

use anyhow::Result;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::debug;

use crate::api::{ApiClient, EventSubscription, SubscriptionHandle};
use crate::config::Settings;
use crate::models::CpuGraph;

/// Everything a page needs while open.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub client: ApiClient,
    pub tick_seconds: u32,
    pub rotation: usize,
    pub overview_log_size: usize,
    pub cpu_graphs: Vec<CpuGraph>,
    pub reconnect_delay: Option<Duration>,
}

impl ViewConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let connection = settings.connection();
        Ok(Self {
            client: ApiClient::new(&connection)?,
            tick_seconds: settings.tick_seconds(),
            rotation: settings.rotation(),
            overview_log_size: settings.overview_log_size(),
            cpu_graphs: settings.cpu_graphs().to_vec(),
            reconnect_delay: connection.reconnect_delay,
        })
    }
}

/// A dashboard page that streams data while visible.
pub trait LiveView {
    fn open(&self, config: &ViewConfig);
    fn close(&self);
    /// Poll the status endpoints now.
    fn tick(&self);
}

/// Resources held by one open session of a page.
#[derive(Debug, Default)]
pub struct LiveSession {
    subscriptions: Vec<SubscriptionHandle>,
    tick: Option<glib::SourceId>,
}

impl LiveSession {
    pub fn add_subscription(&mut self, handle: SubscriptionHandle) {
        self.subscriptions.push(handle);
    }

    pub fn set_tick(&mut self, source: glib::SourceId) {
        if let Some(old) = self.tick.replace(source) {
            old.remove();
        }
    }

    /// Close every stream and stop the tick. Safe to call twice.
    pub fn close(&mut self) {
        for handle in self.subscriptions.drain(..) {
            handle.close();
        }
        if let Some(source) = self.tick.take() {
            source.remove();
        }
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Drive a subscription on the GTK main loop.
///
/// `on_item` runs for each item while `owner` is alive. `on_end` runs once if
/// the stream ended by itself rather than being closed.
pub fn spawn_consumer<T, W, F, E>(
    mut subscription: EventSubscription<T>,
    owner: &W,
    on_item: F,
    on_end: E,
) -> SubscriptionHandle
where
    T: Send + 'static,
    W: IsA<glib::Object>,
    F: Fn(&W, T) + 'static,
    E: FnOnce(&W) + 'static,
{
    let handle = subscription.handle();
    let closed = handle.clone();
    let weak = owner.downgrade();

    glib::spawn_future_local(async move {
        while let Some(item) = subscription.next().await {
            let Some(owner) = weak.upgrade() else {
                return;
            };
            on_item(&owner, item);
        }

        if closed.is_closed() {
            return;
        }
        debug!("Event stream finished, ending session state");
        if let Some(owner) = weak.upgrade() {
            on_end(&owner);
        }
    });

    handle
}
