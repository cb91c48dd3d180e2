// Router Dashboard - Overview Page
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Compact dashboard: resources, services, recent firewall events,
//! gateways and interfaces.

use std::cell::{Cell, RefCell};

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use tracing::{info, warn};

use super::firewall_log_view::FirewallLogView;
use super::gateways_section::GatewaysSection;
use super::helpers::{create_card, every_seconds, open_uri, show_toast};
use super::interfaces_section::InterfacesSection;
use super::live_view::{spawn_consumer, LiveSession, LiveView, ViewConfig};
use super::services_section::ServicesSection;
use super::widgets::UsageBar;
use crate::api::{self, paths, ApiClient, EventSubscription};
use crate::models::{CpuSample, InterfaceNames, LogEvent};
use crate::stats::RuleAggregator;

glib::wrapper! {
    /// Overview page showing the router at a glance.
    pub struct OverviewPage(ObjectSubclass<imp::OverviewPage>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl OverviewPage {
    /// Create a new overview page.
    pub fn new() -> Self {
        let page: Self = glib::Object::new();
        page.setup_ui();
        page
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        self.set_orientation(gtk4::Orientation::Vertical);
        self.set_spacing(0);

        let content = gtk4::Grid::builder()
            .column_spacing(24)
            .row_spacing(24)
            .column_homogeneous(true)
            .margin_top(24)
            .margin_bottom(24)
            .margin_start(24)
            .margin_end(24)
            .hexpand(true)
            .build();

        // === RESOURCES ===
        let (resources_card, resources) = create_card("System Resources", "computer-symbolic");
        let cpu_model = gtk4::Label::builder()
            .css_classes(vec!["caption".to_string(), "dim-label".to_string()])
            .halign(gtk4::Align::Start)
            .ellipsize(gtk4::pango::EllipsizeMode::End)
            .build();
        resources.append(&cpu_model);

        let (cpu_bar, cpu_text) = Self::usage_row(&resources, "CPU");
        let (memory_bar, memory_text) = Self::usage_row(&resources, "Memory");
        let (disk_bar, disk_text) = Self::usage_row(&resources, "Disk");
        content.attach(&resources_card, 0, 0, 1, 1);

        // === GATEWAYS ===
        let (gateways_card, gateways_box) = create_card("Gateways", "network-server-symbolic");
        let gateways = GatewaysSection::new();
        gateways_box.append(&gateways);
        content.attach(&gateways_card, 1, 0, 1, 1);

        // === FIREWALL LOG ===
        let (log_card, log_box) = create_card("Firewall Live Log", "security-high-symbolic");
        let log_view = FirewallLogView::new(false);
        let page = self.downgrade();
        log_view.set_rule_opener(move |rid| {
            if let Some(page) = page.upgrade() {
                page.open_rule_log(rid);
            }
        });
        log_box.append(&log_view);
        content.attach(&log_card, 0, 1, 2, 1);

        // === SERVICES ===
        let (services_card, services_box) = create_card("Services", "system-run-symbolic");
        let services = ServicesSection::new();
        services_box.append(&services);
        content.attach(&services_card, 0, 2, 1, 1);

        // === INTERFACES ===
        let (interfaces_card, interfaces_box) = create_card("Interfaces", "network-wired-symbolic");
        let interfaces = InterfacesSection::new();
        interfaces_box.append(&interfaces);
        content.attach(&interfaces_card, 1, 2, 1, 1);

        self.append(&content);

        imp.cpu_model.replace(Some(cpu_model));
        imp.cpu_bar.replace(Some(cpu_bar));
        imp.cpu_text.replace(Some(cpu_text));
        imp.memory_bar.replace(Some(memory_bar));
        imp.memory_text.replace(Some(memory_text));
        imp.disk_bar.replace(Some(disk_bar));
        imp.disk_text.replace(Some(disk_text));
        imp.gateways.replace(Some(gateways));
        imp.log_view.replace(Some(log_view));
        imp.services.replace(Some(services));
        imp.interfaces.replace(Some(interfaces));
    }

    /// Title, bar and detail line for one resource.
    fn usage_row(container: &gtk4::Box, title: &str) -> (UsageBar, gtk4::Label) {
        let title_label = gtk4::Label::builder()
            .label(title)
            .css_classes(vec!["caption-heading".to_string()])
            .halign(gtk4::Align::Start)
            .margin_top(6)
            .build();
        let bar = UsageBar::new();
        let detail = gtk4::Label::builder()
            .css_classes(vec!["caption".to_string(), "dim-label".to_string()])
            .halign(gtk4::Align::Start)
            .build();

        container.append(&title_label);
        container.append(&bar);
        container.append(&detail);
        (bar, detail)
    }

    fn client(&self) -> Option<ApiClient> {
        self.imp().client.borrow().clone()
    }

    fn open_rule_log(&self, rid: &str) {
        let Some(client) = self.client() else {
            return;
        };
        match client.rule_log_url(rid) {
            Ok(url) => open_uri(self, &url),
            Err(e) => warn!("{:#}", e),
        }
    }

    fn on_cpu_sample(&self, sample: CpuSample) {
        let imp = self.imp();
        if let Some(bar) = imp.cpu_bar.borrow().as_ref() {
            bar.set_usage(sample.total, sample.level());
        }
        if let Some(text) = imp.cpu_text.borrow().as_ref() {
            text.set_label(&format!(
                "User {:.0}%  System {:.0}%  Interrupt {:.0}%",
                sample.user, sample.sys, sample.intr
            ));
        }
    }

    fn on_log_event(&self, event: LogEvent) {
        let imp = self.imp();
        let outcome = match imp.aggregator.borrow_mut().as_mut() {
            Some(aggregator) => aggregator.ingest(event),
            None => return,
        };
        if let Some(view) = imp.log_view.borrow().as_ref() {
            view.set_events(&outcome.log, &imp.names.borrow());
        }
    }

    fn load_static_info(&self, client: &ApiClient) {
        let page = self.clone();
        let model_client = client.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { model_client.cpu_type().await }).await {
                Ok(model) => {
                    if let Some(label) = page.imp().cpu_model.borrow().as_ref() {
                        label.set_label(&model);
                    }
                }
                Err(e) => warn!("Failed to load CPU type: {:#}", e),
            }
        });

        let page = self.clone();
        let names_client = client.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { names_client.interface_names().await }).await {
                Ok(names) => {
                    page.imp().names.replace(names);
                }
                Err(e) => warn!("Failed to load interface names: {:#}", e),
            }
        });
    }

    fn refresh_resources(&self, client: &ApiClient) {
        let page = self.clone();
        let memory_client = client.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { memory_client.memory().await }).await {
                Ok(Some(memory)) => {
                    let imp = page.imp();
                    if let Some(bar) = imp.memory_bar.borrow().as_ref() {
                        bar.set_usage(memory.percent(), memory.level());
                    }
                    if let Some(text) = imp.memory_text.borrow().as_ref() {
                        text.set_label(&memory.summary());
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to load memory usage: {:#}", e),
            }
        });

        let page = self.clone();
        let disk_client = client.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { disk_client.disks().await }).await {
                Ok(Some(disks)) => {
                    let imp = page.imp();
                    if let Some(root) = disks.root() {
                        if let Some(bar) = imp.disk_bar.borrow().as_ref() {
                            bar.set_usage(root.percent(), root.level());
                        }
                        if let Some(text) = imp.disk_text.borrow().as_ref() {
                            text.set_label(&root.summary());
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to load disk usage: {:#}", e),
            }
        });
    }
}

impl LiveView for OverviewPage {
    fn open(&self, config: &ViewConfig) {
        self.close();
        let imp = self.imp();

        let runtime = match api::runtime() {
            Ok(rt) => rt,
            Err(e) => {
                warn!("{:#}", e);
                show_toast(self, "Could not start the network runtime");
                return;
            }
        };

        info!("Opening overview");
        let client = config.client.clone();
        let generation = imp.generation.get() + 1;
        imp.generation.set(generation);
        imp.client.replace(Some(client.clone()));
        imp.aggregator
            .replace(Some(RuleAggregator::new(config.overview_log_size, config.rotation)));
        if let Some(view) = imp.log_view.borrow().as_ref() {
            view.clear();
        }
        if let Some(services) = imp.services.borrow().as_ref() {
            services.set_client(Some(client.clone()));
        }
        if let Some(interfaces) = imp.interfaces.borrow().as_ref() {
            interfaces.reset();
        }

        let mut session = LiveSession::default();

        let cpu = EventSubscription::open(
            runtime.handle(),
            client.clone(),
            paths::CPU_STREAM,
            CpuSample::from_json,
            config.reconnect_delay,
        );
        session.add_subscription(spawn_consumer(
            cpu,
            self,
            |page, sample| page.on_cpu_sample(sample),
            |_| {},
        ));

        let log = EventSubscription::open(
            runtime.handle(),
            client.clone(),
            paths::FIREWALL_LOG_STREAM,
            LogEvent::from_json,
            config.reconnect_delay,
        );
        session.add_subscription(spawn_consumer(
            log,
            self,
            |page, event| page.on_log_event(event),
            move |page| {
                let imp = page.imp();
                if imp.generation.get() == generation {
                    imp.aggregator.replace(None);
                }
            },
        ));

        self.load_static_info(&client);
        self.tick();

        let page = self.downgrade();
        session.set_tick(every_seconds(config.tick_seconds, move || {
            if let Some(page) = page.upgrade() {
                page.tick();
            }
        }));

        imp.session.replace(Some(session));
    }

    fn close(&self) {
        let imp = self.imp();
        if let Some(mut session) = imp.session.take() {
            info!("Closing overview");
            session.close();
        }
        imp.aggregator.replace(None);
        imp.client.replace(None);
        if let Some(services) = imp.services.borrow().as_ref() {
            services.set_client(None);
        }
    }

    fn tick(&self) {
        let Some(client) = self.client() else {
            return;
        };
        let imp = self.imp();

        self.refresh_resources(&client);
        if let Some(services) = imp.services.borrow().as_ref() {
            services.refresh();
        }
        if let Some(gateways) = imp.gateways.borrow().as_ref() {
            gateways.refresh(&client);
        }
        if let Some(interfaces) = imp.interfaces.borrow().as_ref() {
            interfaces.refresh(&client);
        }
    }
}

impl Default for OverviewPage {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct OverviewPage {
        pub cpu_model: RefCell<Option<gtk4::Label>>,
        pub cpu_bar: RefCell<Option<UsageBar>>,
        pub cpu_text: RefCell<Option<gtk4::Label>>,
        pub memory_bar: RefCell<Option<UsageBar>>,
        pub memory_text: RefCell<Option<gtk4::Label>>,
        pub disk_bar: RefCell<Option<UsageBar>>,
        pub disk_text: RefCell<Option<gtk4::Label>>,
        pub gateways: RefCell<Option<GatewaysSection>>,
        pub log_view: RefCell<Option<FirewallLogView>>,
        pub services: RefCell<Option<ServicesSection>>,
        pub interfaces: RefCell<Option<InterfacesSection>>,

        pub client: RefCell<Option<ApiClient>>,
        pub session: RefCell<Option<LiveSession>>,
        pub aggregator: RefCell<Option<RuleAggregator>>,
        pub names: RefCell<InterfaceNames>,
        /// Bumped on every open so late callbacks can tell sessions apart.
        pub generation: Cell<u64>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for OverviewPage {
        const NAME: &'static str = "RouterDashboardOverviewPage";
        type Type = super::OverviewPage;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for OverviewPage {}
    impl WidgetImpl for OverviewPage {}
    impl BoxImpl for OverviewPage {}
}
