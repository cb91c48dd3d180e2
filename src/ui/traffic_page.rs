// Router Dashboard - Traffic Page
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Detailed dashboard: firewall rule statistics, CPU history and disks.

use std::cell::{Cell, RefCell};

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{gdk, glib};
use libadwaita as adw;
use libadwaita::prelude::*;
use tracing::{info, warn};

use super::firewall_log_view::FirewallLogView;
use super::helpers::{create_card, every_seconds, open_uri, placeholder_label, show_toast};
use super::interfaces_section::InterfacesSection;
use super::live_view::{spawn_consumer, LiveSession, LiveView, ViewConfig};
use super::services_section::ServicesSection;
use super::widgets::{BarChart, DonutChart, DonutSlice, LineChart};
use crate::api::{self, paths, ApiClient, EventSubscription};
use crate::models::{CpuGraph, CpuSample, InterfaceNames, LogEvent};
use crate::stats::{
    legend_keys, rank, CpuHistory, IngestOutcome, RuleAggregator, RuleCount, LEGEND_LIMIT,
};

fn graph_color(graph: CpuGraph) -> gdk::RGBA {
    match graph {
        CpuGraph::Total => gdk::RGBA::new(0.21, 0.52, 0.89, 1.0),
        CpuGraph::Intr => gdk::RGBA::new(0.96, 0.76, 0.07, 1.0),
        CpuGraph::User => gdk::RGBA::new(0.20, 0.82, 0.48, 1.0),
        CpuGraph::Sys => gdk::RGBA::new(0.88, 0.11, 0.14, 1.0),
    }
}

fn counter_title(counter: &RuleCount) -> &str {
    if counter.label.is_empty() {
        &counter.rid
    } else {
        &counter.label
    }
}

/// Donut slices for every counter, flagging the ones in the legend.
fn donut_slices(counters: &[RuleCount]) -> Vec<DonutSlice> {
    let legend = legend_keys(counters, LEGEND_LIMIT);
    counters
        .iter()
        .map(|c| DonutSlice {
            key: c.rid.clone(),
            label: if c.label.is_empty() { c.rid.clone() } else { c.label.clone() },
            value: c.count as f64,
            in_legend: legend.contains(&c.rid.as_str()),
        })
        .collect()
}

/// The `limit` busiest rules, highest count first; ties keep first-seen order.
fn ranked_counters(counters: &[RuleCount], limit: usize) -> Vec<&RuleCount> {
    let mut ranked = rank(counters);
    ranked.truncate(limit);
    ranked
}

/// One row of the rule counter table.
#[derive(Debug)]
pub struct CounterRow {
    rid: String,
    row: adw::ActionRow,
    count: gtk4::Label,
}

glib::wrapper! {
    /// Traffic page with per-rule statistics.
    pub struct TrafficPage(ObjectSubclass<imp::TrafficPage>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl TrafficPage {
    pub fn new() -> Self {
        let page: Self = glib::Object::new();
        page.setup_ui();
        page
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        self.set_orientation(gtk4::Orientation::Vertical);

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

        // Live log
        let (log_card, log_box) = create_card("Firewall Live Log", "security-high-symbolic");
        let log_view = FirewallLogView::new(true);
        let page = self.downgrade();
        log_view.set_rule_opener(move |rid| {
            if let Some(page) = page.upgrade() {
                page.open_rule_log(rid);
            }
        });
        log_box.append(&log_view);
        content.attach(&log_card, 0, 0, 2, 1);

        // Rule chart and counters
        let (chart_card, chart_box) = create_card("Events per Rule", "view-pie-symbolic");
        let donut = DonutChart::new();
        donut.set_size_request(-1, 260);
        donut.set_secondary_text("events");
        let page = self.downgrade();
        donut.connect_slice_activated(move |rid| {
            if let Some(page) = page.upgrade() {
                page.open_rule_log(rid);
            }
        });
        chart_box.append(&donut);
        content.attach(&chart_card, 0, 1, 1, 1);

        let (counters_card, counters_box) = create_card("Rule Counters", "view-list-symbolic");
        let counters = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::None)
            .css_classes(vec!["boxed-list".to_string()])
            .build();
        counters_box.append(&counters);
        content.attach(&counters_card, 1, 1, 1, 1);

        // CPU
        let (cpu_card, cpu_box) = create_card("CPU Usage", "utilities-system-monitor-symbolic");
        let mut cpu_charts = Vec::new();
        for graph in CpuGraph::ALL {
            let row = gtk4::Box::builder()
                .orientation(gtk4::Orientation::Vertical)
                .spacing(4)
                .build();
            let title = gtk4::Label::builder()
                .label(graph.label())
                .css_classes(vec!["caption-heading".to_string()])
                .halign(gtk4::Align::Start)
                .build();
            let chart = LineChart::with_color(graph_color(graph));
            chart.set_size_request(-1, 90);
            row.append(&title);
            row.append(&chart);
            cpu_box.append(&row);
            cpu_charts.push((graph, row, chart));
        }
        content.attach(&cpu_card, 0, 2, 1, 1);

        // Disks
        let (disk_card, disk_box) = create_card("Disk Usage", "drive-harddisk-symbolic");
        let disks = BarChart::new();
        disks.set_placeholder("Loading…");
        disk_box.append(&disks);
        content.attach(&disk_card, 1, 2, 1, 1);

        // Services and interfaces
        let (services_card, services_box) = create_card("Services", "system-run-symbolic");
        let services = ServicesSection::new();
        services_box.append(&services);
        content.attach(&services_card, 0, 3, 1, 1);

        let (interfaces_card, interfaces_box) = create_card("Interfaces", "network-wired-symbolic");
        let interfaces = InterfacesSection::new();
        interfaces_box.append(&interfaces);
        content.attach(&interfaces_card, 1, 3, 1, 1);

        self.append(&content);

        imp.log_view.replace(Some(log_view));
        imp.donut.replace(Some(donut));
        imp.counters.replace(Some(counters));
        imp.cpu_charts.replace(cpu_charts);
        imp.disks.replace(Some(disks));
        imp.services.replace(Some(services));
        imp.interfaces.replace(Some(interfaces));

        self.reset_counters();
        self.apply_cpu_graphs(&[CpuGraph::Total]);
    }

    /// Show only the selected CPU graphs.
    pub fn apply_cpu_graphs(&self, graphs: &[CpuGraph]) {
        for (graph, row, _) in self.imp().cpu_charts.borrow().iter() {
            row.set_visible(graphs.contains(graph));
        }
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

    fn reset_counters(&self) {
        let imp = self.imp();
        if let Some(donut) = imp.donut.borrow().as_ref() {
            donut.clear();
        }
        imp.counter_rows.borrow_mut().clear();
        if let Some(list) = imp.counters.borrow().as_ref() {
            list.remove_all();
            list.append(&placeholder_label("No events yet"));
        }
    }

    fn on_cpu_sample(&self, sample: CpuSample) {
        let imp = self.imp();
        let mut history = imp.cpu_history.borrow_mut();
        history.push(sample);
        for (graph, row, chart) in imp.cpu_charts.borrow().iter() {
            if row.is_visible() {
                chart.set_values(history.series(*graph));
            }
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
        self.display_counters(&outcome);
    }

    fn display_counters(&self, outcome: &IngestOutcome) {
        let imp = self.imp();

        if let Some(donut) = imp.donut.borrow().as_ref() {
            if outcome.refresh_layout {
                donut.clear();
            }
            donut.set_slices(donut_slices(&outcome.counters));
        }

        let Some(list) = imp.counters.borrow().clone() else {
            return;
        };
        let top = ranked_counters(&outcome.counters, imp.rotation.get());

        let mut rows = imp.counter_rows.borrow_mut();
        let same_order = rows.len() == top.len()
            && rows.iter().zip(&top).all(|(row, counter)| row.rid == counter.rid);
        if same_order {
            for (row, counter) in rows.iter().zip(&top) {
                row.row.set_title(&glib::markup_escape_text(counter_title(counter)));
                row.count.set_label(&counter.count.to_string());
            }
            return;
        }

        list.remove_all();
        rows.clear();
        for counter in top {
            let row = adw::ActionRow::builder()
                .title(glib::markup_escape_text(counter_title(counter)))
                .subtitle(glib::markup_escape_text(&counter.rid))
                .activatable(true)
                .build();

            let count = gtk4::Label::builder()
                .label(counter.count.to_string())
                .css_classes(vec!["numeric".to_string(), "dim-label".to_string()])
                .valign(gtk4::Align::Center)
                .build();
            row.add_suffix(&count);

            let page = self.downgrade();
            let rid = counter.rid.clone();
            row.connect_activated(move |_| {
                if let Some(page) = page.upgrade() {
                    page.open_rule_log(&rid);
                }
            });
            list.append(&row);
            rows.push(CounterRow { rid: counter.rid.clone(), row, count });
        }
    }

    fn load_interface_names(&self, client: &ApiClient) {
        let page = self.clone();
        let client = client.clone();
        glib::spawn_future_local(async move {
            match api::run(async move { client.interface_names().await }).await {
                Ok(names) => {
                    page.imp().names.replace(names);
                }
                Err(e) => warn!("Failed to load interface names: {:#}", e),
            }
        });
    }

    fn refresh_disks(&self, client: &ApiClient) {
        let page = self.clone();
        let client = client.clone();
        glib::spawn_future_local(async move {
            let result = api::run(async move { client.disks().await }).await;
            let imp = page.imp();
            let Some(chart) = imp.disks.borrow().clone() else {
                return;
            };
            match result {
                Ok(Some(disks)) if !disks.devices.is_empty() => chart.set_disks(&disks),
                Ok(_) => chart.set_placeholder("No disk information"),
                Err(e) => warn!("Failed to load disk usage: {:#}", e),
            }
        });
    }
}

impl LiveView for TrafficPage {
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

        info!(rotation = config.rotation, "Opening traffic view");
        let client = config.client.clone();
        let generation = imp.generation.get() + 1;
        imp.generation.set(generation);
        imp.client.replace(Some(client.clone()));
        imp.rotation.set(config.rotation);
        imp.aggregator
            .replace(Some(RuleAggregator::new(config.rotation, config.rotation)));
        imp.cpu_history.borrow_mut().clear();
        for (_, _, chart) in imp.cpu_charts.borrow().iter() {
            chart.clear();
        }
        self.apply_cpu_graphs(&config.cpu_graphs);
        self.reset_counters();
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

        self.load_interface_names(&client);
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
            info!("Closing traffic view");
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

        self.refresh_disks(&client);
        if let Some(services) = imp.services.borrow().as_ref() {
            services.refresh();
        }
        if let Some(interfaces) = imp.interfaces.borrow().as_ref() {
            interfaces.refresh(&client);
        }
    }
}

impl Default for TrafficPage {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct TrafficPage {
        pub log_view: RefCell<Option<FirewallLogView>>,
        pub donut: RefCell<Option<DonutChart>>,
        pub counters: RefCell<Option<gtk4::ListBox>>,
        pub cpu_charts: RefCell<Vec<(CpuGraph, gtk4::Box, LineChart)>>,
        pub disks: RefCell<Option<BarChart>>,
        pub services: RefCell<Option<ServicesSection>>,
        pub interfaces: RefCell<Option<InterfacesSection>>,

        pub client: RefCell<Option<ApiClient>>,
        pub session: RefCell<Option<LiveSession>>,
        pub aggregator: RefCell<Option<RuleAggregator>>,
        pub cpu_history: RefCell<CpuHistory>,
        pub names: RefCell<InterfaceNames>,
        pub generation: Cell<u64>,
        /// Rows kept in the log and the counter table.
        pub rotation: Cell<usize>,
        pub counter_rows: RefCell<Vec<CounterRow>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for TrafficPage {
        const NAME: &'static str = "RouterDashboardTrafficPage";
        type Type = super::TrafficPage;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for TrafficPage {}
    impl WidgetImpl for TrafficPage {}
    impl BoxImpl for TrafficPage {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(rid: &str, label: &str, count: u64) -> RuleCount {
        RuleCount { rid: rid.to_string(), label: label.to_string(), count }
    }

    #[test]
    fn test_donut_slices_follow_counters() {
        let counters = vec![count("a", "Allow LAN", 3), count("b", "", 1)];
        let slices = donut_slices(&counters);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Allow LAN");
        assert_eq!(slices[0].value, 3.0);
        assert_eq!(slices[1].label, "b");
        assert!(slices.iter().all(|s| s.in_legend));
    }

    #[test]
    fn test_counter_table_keeps_top_rotation() {
        let counts = [3, 9, 1, 9, 4, 7, 2, 7, 5, 1, 6, 8];
        let counters: Vec<RuleCount> = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| count(&format!("r{i}"), "", n))
            .collect();

        let top = ranked_counters(&counters, 5);
        let rids: Vec<&str> = top.iter().map(|c| c.rid.as_str()).collect();
        assert_eq!(rids, vec!["r1", "r3", "r11", "r5", "r7"]);
    }

    #[test]
    fn test_counter_table_shorter_than_rotation() {
        let counters = vec![count("a", "", 1), count("b", "", 2)];
        let top = ranked_counters(&counters, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rid, "b");
    }

    #[test]
    fn test_donut_legend_limited() {
        let counters: Vec<RuleCount> = (0..12)
            .map(|i| count(&format!("r{i}"), "", 50 - i as u64))
            .collect();
        let slices = donut_slices(&counters);

        assert_eq!(slices.len(), 12);
        assert_eq!(slices.iter().filter(|s| s.in_legend).count(), LEGEND_LIMIT);
        assert!(!slices[10].in_legend);
        assert!(!slices[11].in_legend);
    }
}
