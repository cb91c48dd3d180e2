// Router Dashboard - Gateways Section
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Gateway health with latency and loss figures.

use std::cell::RefCell;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::warn;

use crate::api::{self, ApiClient};
use crate::models::{Gateway, GatewayHealth};

glib::wrapper! {
    pub struct GatewaysSection(ObjectSubclass<imp::GatewaysSection>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl GatewaysSection {
    pub fn new() -> Self {
        let section: Self = glib::Object::new();
        section.set_orientation(gtk4::Orientation::Vertical);

        let list = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .css_classes(vec!["boxed-list".to_string()])
            .build();
        section.append(&list);
        section.imp().list.replace(Some(list));
        section
    }

    pub fn refresh(&self, client: &ApiClient) {
        let client = client.clone();
        let section = self.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { client.gateways().await }).await {
                Ok(gateways) => section.display_gateways(&gateways),
                Err(e) => warn!("Failed to load gateways: {:#}", e),
            }
        });
    }

    fn display_gateways(&self, gateways: &[Gateway]) {
        let Some(list) = self.imp().list.borrow().clone() else {
            return;
        };
        list.remove_all();

        if gateways.is_empty() {
            let row = adw::ActionRow::builder()
                .title("No gateways")
                .css_classes(vec!["dim-label".to_string()])
                .build();
            list.append(&row);
            return;
        }

        for gateway in gateways {
            let row = adw::ActionRow::builder()
                .title(glib::markup_escape_text(&gateway.name))
                .subtitle(glib::markup_escape_text(&gateway.address))
                .build();

            let health = gateway.health();
            let icon = gtk4::Image::builder()
                .icon_name(match health {
                    GatewayHealth::Online => "emblem-ok-symbolic",
                    GatewayHealth::Degraded => "dialog-warning-symbolic",
                    GatewayHealth::Down => "dialog-error-symbolic",
                })
                .css_classes(vec![health.css_class().to_string()])
                .tooltip_text(gateway.status_text())
                .build();
            row.add_prefix(&icon);

            if gateway.has_metrics() {
                let metrics = gtk4::Label::builder()
                    .label(format!(
                        "RTT {}  RTTd {}  Loss {}",
                        gateway.delay, gateway.stddev, gateway.loss
                    ))
                    .css_classes(vec!["caption".to_string(), "dim-label".to_string()])
                    .valign(gtk4::Align::Center)
                    .build();
                row.add_suffix(&metrics);
            }

            list.append(&row);
        }
    }
}

impl Default for GatewaysSection {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct GatewaysSection {
        pub list: RefCell<Option<gtk4::ListBox>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for GatewaysSection {
        const NAME: &'static str = "RouterDashboardGatewaysSection";
        type Type = super::GatewaysSection;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for GatewaysSection {}
    impl WidgetImpl for GatewaysSection {}
    impl BoxImpl for GatewaysSection {}
}
