// Router Dashboard - Services Section
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Service tiles with start, stop and restart controls.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::{debug, info, warn};

use super::helpers::show_toast;
use crate::api::{self, ApiClient};
use crate::models::{ServiceAction, ServiceStatus};

glib::wrapper! {
    /// List of router services with action buttons.
    pub struct ServicesSection(ObjectSubclass<imp::ServicesSection>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl ServicesSection {
    pub fn new() -> Self {
        let section: Self = glib::Object::new();
        section.setup_ui();
        section
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        self.set_orientation(gtk4::Orientation::Vertical);
        self.set_spacing(0);

        let list = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .css_classes(vec!["boxed-list".to_string()])
            .build();
        self.append(&list);
        imp.list.replace(Some(list));
    }

    /// Use `client` for refreshes and commands, `None` detaches the section.
    pub fn set_client(&self, client: Option<ApiClient>) {
        let imp = self.imp();
        imp.client.replace(client);
        imp.locked.set(false);
    }

    /// Fetch the service list, skipped while a command is running.
    pub fn refresh(&self) {
        let imp = self.imp();
        if imp.locked.get() {
            debug!("Service command in flight, skipping refresh");
            return;
        }
        let Some(client) = imp.client.borrow().clone() else {
            return;
        };

        let section = self.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { client.services().await }).await {
                Ok(services) => {
                    if !section.imp().locked.get() {
                        section.display_services(&services);
                    }
                }
                Err(e) => warn!("Failed to load services: {:#}", e),
            }
        });
    }

    fn display_services(&self, services: &[ServiceStatus]) {
        let imp = self.imp();
        let Some(list) = imp.list.borrow().clone() else {
            return;
        };
        list.remove_all();

        if services.is_empty() {
            let row = adw::ActionRow::builder()
                .title("No services")
                .css_classes(vec!["dim-label".to_string()])
                .build();
            list.append(&row);
            return;
        }

        for service in services {
            list.append(&self.create_service_row(service));
        }
    }

    fn create_service_row(&self, service: &ServiceStatus) -> adw::ActionRow {
        let row = adw::ActionRow::builder()
            .title(glib::markup_escape_text(service.display_name()))
            .subtitle(glib::markup_escape_text(&service.name))
            .build();

        let state_icon = gtk4::Image::builder()
            .icon_name(if service.running {
                "media-playback-start-symbolic"
            } else {
                "media-playback-stop-symbolic"
            })
            .css_classes(vec![if service.running { "success" } else { "error" }.to_string()])
            .build();
        row.add_prefix(&state_icon);

        let actions_box = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .spacing(4)
            .valign(gtk4::Align::Center)
            .build();

        if !service.running {
            let badge = gtk4::Label::builder()
                .label("Stopped")
                .css_classes(vec!["caption".to_string(), "error".to_string()])
                .valign(gtk4::Align::Center)
                .margin_end(6)
                .build();
            actions_box.append(&badge);
        }

        for action in service.actions() {
            let button = gtk4::Button::builder()
                .icon_name(action.icon_name())
                .css_classes(vec!["flat".to_string()])
                .tooltip_text(format!("{} service", action.title()))
                .valign(gtk4::Align::Center)
                .build();

            let section = self.clone();
            let id = service.id.clone();
            let name = service.display_name().to_string();
            button.connect_clicked(move |_| {
                section.run_command(action, &id, &name);
            });
            actions_box.append(&button);
        }

        row.add_suffix(&actions_box);
        row
    }

    fn run_command(&self, action: ServiceAction, id: &str, name: &str) {
        let imp = self.imp();
        if imp.locked.get() {
            return;
        }
        let Some(client) = imp.client.borrow().clone() else {
            return;
        };

        imp.locked.set(true);
        if let Some(list) = imp.list.borrow().as_ref() {
            list.set_sensitive(false);
        }

        let section = self.clone();
        let id = id.to_string();
        let name = name.to_string();
        glib::spawn_future_local(async move {
            let result = api::run(async move { client.service_command(action, &id).await }).await;

            match result {
                Ok(()) => {
                    info!("{} service {}", action.done(), name);
                    show_toast(&section, &format!("{} {}", action.done(), name));
                }
                Err(e) => {
                    warn!("Service command failed: {:#}", e);
                    show_toast(
                        &section,
                        &format!("Failed to {} {}", action.command(), name),
                    );
                }
            }

            let imp = section.imp();
            imp.locked.set(false);
            if let Some(list) = imp.list.borrow().as_ref() {
                list.set_sensitive(true);
            }

            // Give the router a moment to settle before reading the state back
            glib::timeout_add_local_once(Duration::from_millis(500), move || {
                section.refresh();
            });
        });
    }
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ServicesSection {
        pub list: RefCell<Option<gtk4::ListBox>>,
        pub client: RefCell<Option<ApiClient>>,
        pub locked: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ServicesSection {
        const NAME: &'static str = "RouterDashboardServicesSection";
        type Type = super::ServicesSection;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for ServicesSection {}
    impl WidgetImpl for ServicesSection {}
    impl BoxImpl for ServicesSection {}
}
