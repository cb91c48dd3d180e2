// Router Dashboard - Application
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Main application struct and lifecycle management.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{gio, glib};
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::info;

use crate::config::Settings;
use crate::models::CpuGraph;
use crate::options::options_schema;
use crate::ui::{apply_color_scheme, MainWindow};

const STYLE: &str = r#"
.usage-bar {
    min-height: 10px;
}
.usage-bar.low {
    color: @error_color;
}
.theme-selector {
    border-radius: 22px;
    border: 1px solid alpha(@borders, 0.8);
}
.theme-system {
    background: linear-gradient(135deg, #ffffff 50%, #2e2e32 50%);
}
.theme-light {
    background: #ffffff;
}
.theme-dark {
    background: #2e2e32;
}
"#;

glib::wrapper! {
    /// The main application object.
    pub struct Application(ObjectSubclass<imp::Application>)
        @extends adw::Application, gtk4::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl Application {
    /// Create a new application instance.
    pub fn new(app_id: &str) -> Self {
        glib::Object::builder()
            .property("application-id", app_id)
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build()
    }

    fn setup_actions(&self) {
        let quit_action = gio::ActionEntry::builder("quit")
            .activate(|app: &Self, _, _| {
                if let Some(window) = app.main_window() {
                    window.close();
                }
                app.quit();
            })
            .build();

        let about_action = gio::ActionEntry::builder("about")
            .activate(|app: &Self, _, _| {
                app.show_about_dialog();
            })
            .build();

        let preferences_action = gio::ActionEntry::builder("preferences")
            .activate(|app: &Self, _, _| {
                app.show_preferences_dialog();
            })
            .build();

        self.add_action_entries([quit_action, about_action, preferences_action]);
    }

    fn setup_shortcuts(&self) {
        self.set_accels_for_action("app.quit", &["<Control>q"]);
        self.set_accels_for_action("app.preferences", &["<Control>comma"]);
        self.set_accels_for_action("win.refresh", &["<Control>r", "F5"]);
    }

    fn main_window(&self) -> Option<MainWindow> {
        self.imp().window.get().cloned()
    }

    fn settings(&self) -> Rc<RefCell<Settings>> {
        self.imp().settings.clone()
    }

    /// Preferences for the router connection, refresh and charts.
    ///
    /// Connection and refresh changes reopen the visible page when the dialog
    /// closes. CPU graph changes apply immediately.
    fn show_preferences_dialog(&self) {
        let settings = self.settings();
        let changed = Rc::new(Cell::new(false));

        let dialog = adw::PreferencesDialog::builder()
            .title("Preferences")
            .build();
        let page = adw::PreferencesPage::new();

        // Connection group
        let connection_group = adw::PreferencesGroup::builder()
            .title("Router")
            .description("Create an API key under System › Access › Users on the router")
            .build();

        let (url, key, secret, accept_invalid) = {
            let s = settings.borrow();
            let v = s.values();
            (v.api_url.clone(), v.api_key.clone(), v.api_secret.clone(), v.accept_invalid_certs)
        };

        let url_row = adw::EntryRow::builder()
            .title("Address")
            .show_apply_button(true)
            .build();
        let key_row = adw::EntryRow::builder()
            .title("API Key")
            .show_apply_button(true)
            .build();
        let secret_row = adw::PasswordEntryRow::builder()
            .title("API Secret")
            .show_apply_button(true)
            .build();

        url_row.set_text(&url);
        key_row.set_text(&key);
        secret_row.set_text(&secret);

        let save_connection = {
            let settings = settings.clone();
            let changed = changed.clone();
            let url_row = url_row.clone();
            let key_row = key_row.clone();
            let secret_row = secret_row.clone();
            move || {
                settings
                    .borrow_mut()
                    .set_connection(&url_row.text(), &key_row.text(), &secret_row.text());
                changed.set(true);
            }
        };
        let save = save_connection.clone();
        url_row.connect_apply(move |_| save());
        let save = save_connection.clone();
        key_row.connect_apply(move |_| save());
        secret_row.connect_apply(move |_| save_connection());

        let certs_row = adw::SwitchRow::builder()
            .title("Accept Self-Signed Certificates")
            .subtitle("Skip TLS verification for the router")
            .active(accept_invalid)
            .build();
        {
            let settings = settings.clone();
            let changed = changed.clone();
            certs_row.connect_active_notify(move |row| {
                settings.borrow_mut().set_accept_invalid_certs(row.is_active());
                changed.set(true);
            });
        }

        connection_group.add(&url_row);
        connection_group.add(&key_row);
        connection_group.add(&secret_row);
        connection_group.add(&certs_row);
        page.add(&connection_group);

        // Refresh group
        let refresh_group = adw::PreferencesGroup::builder()
            .title("Refresh")
            .build();

        let (tick, rotation) = {
            let s = settings.borrow();
            (f64::from(s.tick_seconds()), s.rotation() as f64)
        };

        let tick_row = adw::SpinRow::with_range(1.0, 300.0, 1.0);
        tick_row.set_title("Poll Interval");
        tick_row.set_subtitle("Seconds between status updates");
        tick_row.set_value(tick);
        {
            let settings = settings.clone();
            let changed = changed.clone();
            tick_row.connect_value_notify(move |row| {
                settings.borrow_mut().set_tick_seconds(row.value() as u32);
                changed.set(true);
            });
        }

        let rotation_row = adw::SpinRow::with_range(1.0, 100.0, 1.0);
        rotation_row.set_title("Log Rotation");
        rotation_row.set_subtitle("Events kept in the traffic log");
        rotation_row.set_value(rotation);
        {
            let settings = settings.clone();
            let changed = changed.clone();
            rotation_row.connect_value_notify(move |row| {
                settings.borrow_mut().set_rotation(row.value() as usize);
                changed.set(true);
            });
        }

        refresh_group.add(&tick_row);
        refresh_group.add(&rotation_row);
        page.add(&refresh_group);

        // CPU graphs group
        let schema = options_schema();
        let graphs_group = adw::PreferencesGroup::builder()
            .title(schema.cpu_graphs.title)
            .build();

        let selected = settings.borrow().cpu_graphs().to_vec();
        let mut graph_rows = Vec::new();
        for choice in &schema.cpu_graphs.choices {
            let Some(graph) = CpuGraph::from_key(choice.value) else {
                continue;
            };
            let row = adw::SwitchRow::builder()
                .title(choice.label)
                .active(selected.contains(&graph))
                .build();
            graphs_group.add(&row);
            graph_rows.push((graph, row));
        }

        let graph_rows = Rc::new(graph_rows);
        for (_, row) in graph_rows.iter() {
            let rows = graph_rows.clone();
            let settings = settings.clone();
            let app = self.clone();
            row.connect_active_notify(move |_| {
                let graphs: Vec<CpuGraph> = rows
                    .iter()
                    .filter(|(_, r)| r.is_active())
                    .map(|(g, _)| *g)
                    .collect();
                settings.borrow_mut().set_cpu_graphs(&graphs);
                if let Some(window) = app.main_window() {
                    window.apply_cpu_graphs();
                }
            });
        }
        page.add(&graphs_group);

        // Appearance group
        let appearance_group = adw::PreferencesGroup::builder()
            .title("Appearance")
            .build();

        let theme_row = adw::ComboRow::builder()
            .title("Theme")
            .subtitle("Choose the application color scheme")
            .model(&gtk4::StringList::new(&["System", "Light", "Dark"]))
            .build();
        let current = match settings.borrow().theme() {
            "light" => 1,
            "dark" => 2,
            _ => 0,
        };
        theme_row.set_selected(current);
        {
            let settings = settings.clone();
            theme_row.connect_selected_notify(move |row| {
                let theme = match row.selected() {
                    1 => "light",
                    2 => "dark",
                    _ => "system",
                };
                settings.borrow_mut().set_theme(theme);
                apply_color_scheme(theme);
            });
        }

        appearance_group.add(&theme_row);
        page.add(&appearance_group);

        dialog.add(&page);

        let app = self.clone();
        dialog.connect_closed(move |_| {
            if changed.get() {
                info!("Settings changed, reconnecting");
                if let Some(window) = app.main_window() {
                    window.reload();
                }
            }
        });

        if let Some(window) = self.active_window() {
            dialog.present(Some(&window));
        }
    }

    fn show_about_dialog(&self) {
        let dialog = adw::AboutDialog::builder()
            .application_name("Router Dashboard")
            .application_icon("com.chrisdaggas.router-dashboard")
            .developer_name("Christos A. Daggas")
            .version(env!("CARGO_PKG_VERSION"))
            .website("https://chrisdaggas.com")
            .issue_url("https://github.com/christosdaggas/router-dashboard/issues")
            .license_type(gtk4::License::MitX11)
            .copyright("© 2024-2026 Christos A. Daggas")
            .developers(vec!["Christos A. Daggas".to_string()])
            .comments("Live firewall, service and resource monitoring for OPNsense routers")
            .build();

        if let Some(window) = self.active_window() {
            dialog.present(Some(&window));
        }
    }

    fn load_css(&self) {
        let Some(display) = gtk4::gdk::Display::default() else {
            return;
        };
        let provider = gtk4::CssProvider::new();
        provider.load_from_string(STYLE);
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

mod imp {
    use super::*;
    use libadwaita::subclass::prelude::*;
    use std::cell::OnceCell;

    #[derive(Default)]
    pub struct Application {
        pub window: OnceCell<MainWindow>,
        pub settings: Rc<RefCell<Settings>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Application {
        const NAME: &'static str = "RouterDashboardApplication";
        type Type = super::Application;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for Application {}

    impl ApplicationImpl for Application {
        fn activate(&self) {
            let app = self.obj();

            if let Some(window) = self.window.get() {
                window.present();
                return;
            }

            app.load_css();
            apply_color_scheme(self.settings.borrow().theme());
            app.setup_actions();
            app.setup_shortcuts();

            let window = self
                .window
                .get_or_init(|| MainWindow::new(&*app, self.settings.clone()));
            window.present();
        }

        fn startup(&self) {
            self.parent_startup();
            info!("Application starting up");
            gtk4::Window::set_default_icon_name("com.chrisdaggas.router-dashboard");
        }
    }

    impl GtkApplicationImpl for Application {}
    impl AdwApplicationImpl for Application {}
}
