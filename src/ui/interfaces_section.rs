// Router Dashboard - Interfaces Section
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Status of the router's configured network interfaces.

use std::cell::RefCell;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::{debug, warn};

use crate::api::{self, ApiClient};
use crate::models::InterfaceInfo;

glib::wrapper! {
    pub struct InterfacesSection(ObjectSubclass<imp::InterfacesSection>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl InterfacesSection {
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
            match api::run(async move { client.interfaces().await }).await {
                Ok(interfaces) => section.display_interfaces(interfaces),
                Err(e) => warn!("Failed to load interfaces: {:#}", e),
            }
        });
    }

    /// Forget the last rendered list so the next refresh redraws.
    pub fn reset(&self) {
        self.imp().shown.replace(None);
    }

    fn display_interfaces(&self, interfaces: Vec<InterfaceInfo>) {
        let imp = self.imp();
        if imp.shown.borrow().as_ref() == Some(&interfaces) {
            debug!("Interfaces unchanged");
            return;
        }

        let Some(list) = imp.list.borrow().clone() else {
            return;
        };
        list.remove_all();

        if interfaces.is_empty() {
            let row = adw::ActionRow::builder()
                .title("No interfaces")
                .css_classes(vec!["dim-label".to_string()])
                .build();
            list.append(&row);
        }

        for interface in &interfaces {
            let addresses: Vec<&str> = [interface.ipv4.as_deref(), interface.ipv6.as_deref()]
                .into_iter()
                .flatten()
                .collect();

            let row = adw::ActionRow::builder()
                .title(glib::markup_escape_text(&interface.description))
                .subtitle(glib::markup_escape_text(&addresses.join("  ")))
                .build();

            let icon = gtk4::Image::builder()
                .icon_name("network-wired-symbolic")
                .css_classes(vec![interface.status_css_class().to_string()])
                .tooltip_text(interface.status.as_str())
                .build();
            row.add_prefix(&icon);

            let media = gtk4::Label::builder()
                .label(interface.media.as_str())
                .css_classes(vec!["caption".to_string(), "dim-label".to_string()])
                .valign(gtk4::Align::Center)
                .build();
            row.add_suffix(&media);

            list.append(&row);
        }

        imp.shown.replace(Some(interfaces));
    }
}

impl Default for InterfacesSection {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct InterfacesSection {
        pub list: RefCell<Option<gtk4::ListBox>>,
        pub shown: RefCell<Option<Vec<InterfaceInfo>>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for InterfacesSection {
        const NAME: &'static str = "RouterDashboardInterfacesSection";
        type Type = super::InterfacesSection;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for InterfacesSection {}
    impl WidgetImpl for InterfacesSection {}
    impl BoxImpl for InterfacesSection {}
}
