// Router Dashboard - Main Window
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Main application window with navigation.
//!
//! Only the visible dashboard page is open at any time: switching pages
//! closes the previous one before the next one subscribes.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{gio, glib};
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::{info, warn};

use super::helpers::apply_color_scheme;
use super::live_view::{LiveView, ViewConfig};
use super::{OverviewPage, TrafficPage};
use crate::config::Settings;

const SETUP_PAGE: &str = "setup";

/// Sidebar entries: stack name, title, icon.
const PAGES: [(&str, &str, &str); 2] = [
    ("overview", "Overview", "view-grid-symbolic"),
    ("traffic", "Traffic", "network-transmit-receive-symbolic"),
];

glib::wrapper! {
    /// The main application window.
    pub struct MainWindow(ObjectSubclass<imp::MainWindow>)
        @extends adw::ApplicationWindow, gtk4::ApplicationWindow, gtk4::Window, gtk4::Widget,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl MainWindow {
    /// Create a new main window.
    pub fn new(app: &impl IsA<gtk4::Application>, settings: Rc<RefCell<Settings>>) -> Self {
        let (width, height, maximized) = {
            let s = settings.borrow();
            (s.window_width(), s.window_height(), s.is_maximized())
        };

        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", "Router Dashboard")
            .property("default-width", width)
            .property("default-height", height)
            .property("icon-name", "com.chrisdaggas.router-dashboard")
            .build();

        if maximized {
            window.maximize();
        }

        window.imp().settings.replace(Some(settings));
        window.setup_ui();
        window.setup_actions();

        let nav_list = window.imp().nav_list.borrow().clone();
        if let Some(list) = nav_list {
            list.select_row(list.row_at_index(0).as_ref());
        }

        window
    }

    /// Show a toast notification.
    pub fn show_toast(&self, message: &str) {
        if let Some(toast_overlay) = self.imp().toast_overlay.borrow().as_ref() {
            toast_overlay.add_toast(adw::Toast::new(message));
        }
    }

    /// Reopen the visible page with the current settings.
    pub fn reload(&self) {
        let name = self.imp().active.borrow().clone();
        if let Some(name) = name {
            self.show_page(&name);
        }
    }

    /// Show or hide the CPU graphs without reopening the streams.
    pub fn apply_cpu_graphs(&self) {
        let imp = self.imp();
        let graphs = match imp.settings.borrow().as_ref() {
            Some(settings) => settings.borrow().cpu_graphs().to_vec(),
            None => return,
        };
        if let Some(page) = imp.traffic_page.borrow().as_ref() {
            page.apply_cpu_graphs(&graphs);
        }
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        let toast_overlay = adw::ToastOverlay::new();
        imp.toast_overlay.replace(Some(toast_overlay.clone()));

        let stack = gtk4::Stack::builder()
            .transition_type(gtk4::StackTransitionType::Crossfade)
            .hexpand(true)
            .vexpand(true)
            .build();

        let overview_page = OverviewPage::new();
        let traffic_page = TrafficPage::new();
        stack.add_named(&overview_page, Some("overview"));
        stack.add_named(&traffic_page, Some("traffic"));

        let setup_page = adw::StatusPage::builder()
            .icon_name("network-offline-symbolic")
            .title("Router Not Configured")
            .build();
        let setup_button = gtk4::Button::builder()
            .label("Open Preferences")
            .action_name("app.preferences")
            .halign(gtk4::Align::Center)
            .css_classes(vec!["pill".to_string(), "suggested-action".to_string()])
            .build();
        setup_page.set_child(Some(&setup_button));
        stack.add_named(&setup_page, Some(SETUP_PAGE));

        imp.overview_page.replace(Some(overview_page));
        imp.traffic_page.replace(Some(traffic_page));
        imp.setup_page.replace(Some(setup_page));
        imp.stack.replace(Some(stack.clone()));

        let main_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);

        // === SIDEBAR ===
        let sidebar_box = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Vertical)
            .width_request(220)
            .build();

        let sidebar_header = adw::HeaderBar::new();
        sidebar_header.set_show_end_title_buttons(false);
        sidebar_header.set_show_start_title_buttons(false);
        sidebar_header.set_title_widget(Some(&adw::WindowTitle::new("Router Dashboard", "")));
        sidebar_box.append(&sidebar_header);

        let nav_list = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::Single)
            .css_classes(vec!["navigation-sidebar".to_string()])
            .vexpand(true)
            .build();

        for (id, label_text, icon_name) in PAGES {
            let row = gtk4::ListBoxRow::new();
            row.set_tooltip_text(Some(label_text));

            let hbox = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
            hbox.set_margin_top(14);
            hbox.set_margin_bottom(14);
            hbox.set_margin_start(12);
            hbox.set_margin_end(12);

            let icon = gtk4::Image::from_icon_name(icon_name);
            icon.set_pixel_size(20);
            hbox.append(&icon);

            let label = gtk4::Label::new(Some(label_text));
            label.set_halign(gtk4::Align::Start);
            label.set_hexpand(true);
            hbox.append(&label);

            row.set_child(Some(&hbox));
            row.set_widget_name(id);
            nav_list.append(&row);
        }

        let window = self.downgrade();
        nav_list.connect_row_selected(move |_, row| {
            let (Some(window), Some(row)) = (window.upgrade(), row) else {
                return;
            };
            window.show_page(&row.widget_name());
        });
        imp.nav_list.replace(Some(nav_list.clone()));

        let sidebar_scroll = gtk4::ScrolledWindow::new();
        sidebar_scroll.set_vexpand(true);
        sidebar_scroll.set_child(Some(&nav_list));
        sidebar_box.append(&sidebar_scroll);

        let version_label = gtk4::Label::new(None);
        version_label.set_markup(&format!(
            "<span size=\"x-small\">Version {}</span>",
            env!("CARGO_PKG_VERSION")
        ));
        version_label.set_halign(gtk4::Align::Start);
        version_label.set_margin_start(12);
        version_label.set_margin_bottom(8);
        sidebar_box.append(&version_label);

        let separator = gtk4::Separator::new(gtk4::Orientation::Vertical);

        // === CONTENT AREA ===
        let content_box = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        content_box.set_hexpand(true);

        let header = adw::HeaderBar::new();
        let content_title = adw::WindowTitle::new("Overview", "");
        header.set_title_widget(Some(&content_title));
        imp.content_title.replace(Some(content_title));

        let menu_button = gtk4::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .build();
        menu_button.set_popover(Some(&self.create_menu_popover()));
        header.pack_end(&menu_button);

        let refresh_button = gtk4::Button::builder()
            .icon_name("view-refresh-symbolic")
            .action_name("win.refresh")
            .tooltip_text("Refresh (Ctrl+R)")
            .build();
        header.pack_end(&refresh_button);

        content_box.append(&header);

        let scrolled = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .vscrollbar_policy(gtk4::PolicyType::Automatic)
            .vexpand(true)
            .hexpand(true)
            .child(&stack)
            .build();
        content_box.append(&scrolled);

        main_box.append(&sidebar_box);
        main_box.append(&separator);
        main_box.append(&content_box);

        toast_overlay.set_child(Some(&main_box));
        self.set_content(Some(&toast_overlay));
    }

    /// Menu with theme selection and application actions.
    fn create_menu_popover(&self) -> gtk4::Popover {
        let popover = gtk4::Popover::new();
        popover.add_css_class("menu");

        let main_box = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Vertical)
            .width_request(260)
            .build();

        let theme_box = gtk4::Box::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .spacing(18)
            .halign(gtk4::Align::Center)
            .margin_top(18)
            .margin_bottom(18)
            .build();

        let current = self
            .imp()
            .settings
            .borrow()
            .as_ref()
            .map(|s| s.borrow().theme().to_string())
            .unwrap_or_else(|| "system".to_string());

        let mut group: Option<gtk4::ToggleButton> = None;
        for (theme, tooltip) in [("system", "System"), ("light", "Light"), ("dark", "Dark")] {
            let swatch = gtk4::Box::builder()
                .width_request(44)
                .height_request(44)
                .css_classes(vec!["theme-selector".to_string(), format!("theme-{theme}")])
                .build();
            let button = gtk4::ToggleButton::builder()
                .child(&swatch)
                .tooltip_text(tooltip)
                .css_classes(vec!["flat".to_string(), "circular".to_string()])
                .active(current == theme)
                .build();
            if let Some(first) = group.as_ref() {
                button.set_group(Some(first));
            } else {
                group = Some(button.clone());
            }

            let window = self.downgrade();
            button.connect_toggled(move |btn| {
                if !btn.is_active() {
                    return;
                }
                if let Some(window) = window.upgrade() {
                    window.set_theme(theme);
                }
            });
            theme_box.append(&button);
        }
        main_box.append(&theme_box);

        let separator = gtk4::Separator::new(gtk4::Orientation::Horizontal);
        separator.set_margin_start(12);
        separator.set_margin_end(12);
        main_box.append(&separator);

        let menu_list = gtk4::Box::new(gtk4::Orientation::Vertical, 2);
        menu_list.set_margin_top(6);
        menu_list.set_margin_bottom(6);
        menu_list.set_margin_start(6);
        menu_list.set_margin_end(6);

        for (label_text, icon_name, action) in [
            ("Preferences", "preferences-system-symbolic", "app.preferences"),
            ("About", "help-about-symbolic", "app.about"),
            ("Quit", "application-exit-symbolic", "app.quit"),
        ] {
            let item_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
            item_box.set_margin_start(6);
            item_box.set_margin_end(6);
            item_box.set_margin_top(8);
            item_box.set_margin_bottom(8);
            item_box.append(&gtk4::Image::from_icon_name(icon_name));
            let label = gtk4::Label::new(Some(label_text));
            label.set_halign(gtk4::Align::Start);
            label.set_hexpand(true);
            item_box.append(&label);

            let button = gtk4::Button::builder()
                .child(&item_box)
                .action_name(action)
                .css_classes(vec!["flat".to_string()])
                .build();
            menu_list.append(&button);
        }
        main_box.append(&menu_list);

        popover.set_child(Some(&main_box));
        popover
    }

    fn setup_actions(&self) {
        let refresh = gio::ActionEntry::builder("refresh")
            .activate(|window: &Self, _, _| {
                window.refresh_data();
            })
            .build();

        self.add_action_entries([refresh]);
    }

    fn set_theme(&self, theme: &str) {
        if let Some(settings) = self.imp().settings.borrow().as_ref() {
            settings.borrow_mut().set_theme(theme);
        }
        apply_color_scheme(theme);
    }

    /// Run `f` on the dashboard page registered under `name`.
    fn with_page(&self, name: &str, f: impl FnOnce(&dyn LiveView)) {
        let imp = self.imp();
        match name {
            "overview" => {
                if let Some(page) = imp.overview_page.borrow().as_ref() {
                    f(page);
                }
            }
            "traffic" => {
                if let Some(page) = imp.traffic_page.borrow().as_ref() {
                    f(page);
                }
            }
            _ => {}
        }
    }

    /// Close the visible page and open `name` in its place.
    fn show_page(&self, name: &str) {
        let imp = self.imp();

        let previous = imp.active.replace(Some(name.to_string()));
        if let Some(previous) = previous {
            self.with_page(&previous, |page| page.close());
        }

        let title = PAGES
            .iter()
            .find(|(id, _, _)| *id == name)
            .map_or("Overview", |(_, title, _)| *title);
        if let Some(content_title) = imp.content_title.borrow().as_ref() {
            content_title.set_title(title);
        }

        let config = match imp.settings.borrow().as_ref() {
            Some(settings) => ViewConfig::from_settings(&settings.borrow()),
            None => return,
        };

        let Some(stack) = imp.stack.borrow().clone() else {
            return;
        };

        match config {
            Ok(config) => {
                info!(page = name, "Showing dashboard page");
                stack.set_visible_child_name(name);
                self.with_page(name, |page| page.open(&config));
            }
            Err(e) => {
                warn!("Dashboard not connected: {:#}", e);
                if let Some(setup) = imp.setup_page.borrow().as_ref() {
                    setup.set_description(Some(&format!(
                        "{e}. Enter the router address and an API key in Preferences."
                    )));
                }
                stack.set_visible_child_name(SETUP_PAGE);
            }
        }
    }

    /// Poll the visible page now.
    pub fn refresh_data(&self) {
        let name = self.imp().active.borrow().clone();
        if let Some(name) = name {
            self.with_page(&name, |page| page.tick());
        }
    }

    /// Close every page and remember the window geometry.
    fn shutdown(&self) {
        let imp = self.imp();
        if let Some(name) = imp.active.take() {
            self.with_page(&name, |page| page.close());
        }

        let (width, height) = self.default_size();
        if let Some(settings) = imp.settings.borrow().as_ref() {
            settings
                .borrow_mut()
                .set_window_state(width, height, self.is_maximized());
        }
    }
}

mod imp {
    use super::*;
    use libadwaita::subclass::prelude::*;

    #[derive(Default)]
    pub struct MainWindow {
        pub settings: RefCell<Option<Rc<RefCell<Settings>>>>,
        pub stack: RefCell<Option<gtk4::Stack>>,
        pub nav_list: RefCell<Option<gtk4::ListBox>>,
        pub toast_overlay: RefCell<Option<adw::ToastOverlay>>,
        pub content_title: RefCell<Option<adw::WindowTitle>>,
        pub overview_page: RefCell<Option<OverviewPage>>,
        pub traffic_page: RefCell<Option<TrafficPage>>,
        pub setup_page: RefCell<Option<adw::StatusPage>>,
        /// Stack name of the page the user selected.
        pub active: RefCell<Option<String>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for MainWindow {
        const NAME: &'static str = "RouterDashboardMainWindow";
        type Type = super::MainWindow;
        type ParentType = adw::ApplicationWindow;
    }

    impl ObjectImpl for MainWindow {}
    impl WidgetImpl for MainWindow {}

    impl WindowImpl for MainWindow {
        fn close_request(&self) -> glib::Propagation {
            self.obj().shutdown();
            self.parent_close_request()
        }
    }

    impl ApplicationWindowImpl for MainWindow {}
    impl AdwApplicationWindowImpl for MainWindow {}
}
