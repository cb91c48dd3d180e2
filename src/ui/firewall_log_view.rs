// Router Dashboard - Firewall Log View
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Table of the most recent firewall log events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;

use super::helpers::placeholder_label;
use crate::models::{InterfaceNames, LogEvent};

type RuleOpener = Rc<dyn Fn(&str)>;

glib::wrapper! {
    /// Newest-first firewall log table.
    pub struct FirewallLogView(ObjectSubclass<imp::FirewallLogView>)
        @extends gtk4::Box, gtk4::Widget,
        @implements gtk4::Orientable;
}

impl FirewallLogView {
    /// `detailed` adds seconds and a rule column.
    pub fn new(detailed: bool) -> Self {
        let view: Self = glib::Object::new();
        view.set_orientation(gtk4::Orientation::Vertical);
        view.imp().detailed.set(detailed);
        view.clear();
        view
    }

    /// Called with the rule id when an action icon is clicked.
    pub fn set_rule_opener<F: Fn(&str) + 'static>(&self, f: F) {
        self.imp().opener.replace(Some(Rc::new(f)));
    }

    /// Show "Waiting for events" until the first event arrives.
    pub fn clear(&self) {
        self.remove_grid();
        if let Some(old) = self.imp().placeholder.take() {
            self.remove(&old);
        }
        let placeholder = placeholder_label("Waiting for firewall events…");
        self.append(&placeholder);
        self.imp().placeholder.replace(Some(placeholder));
    }

    pub fn set_events(&self, events: &[LogEvent], names: &InterfaceNames) {
        let imp = self.imp();
        if let Some(placeholder) = imp.placeholder.take() {
            self.remove(&placeholder);
        }
        self.remove_grid();

        let detailed = imp.detailed.get();
        let grid = gtk4::Grid::builder()
            .column_spacing(12)
            .row_spacing(4)
            .build();

        let mut headers = vec!["", "Time", "Interface", "Source", "Destination"];
        if detailed {
            headers.push("Rule");
        }
        for (col, title) in headers.iter().enumerate() {
            let label = gtk4::Label::builder()
                .label(*title)
                .css_classes(vec!["caption-heading".to_string(), "dim-label".to_string()])
                .halign(gtk4::Align::Start)
                .build();
            grid.attach(&label, col as i32, 0, 1, 1);
        }

        let opener = imp.opener.borrow().clone();
        for (i, event) in events.iter().enumerate() {
            let row = i as i32 + 1;
            grid.attach(&Self::action_cell(event, opener.clone()), 0, row, 1, 1);

            let destination = match event.dstport.as_deref() {
                Some(port) if !port.is_empty() => format!("{}:{}", event.dst, port),
                _ => event.dst.clone(),
            };
            let mut cells = vec![
                event.time_display(detailed),
                names.display(&event.interface).to_string(),
                event.src.clone(),
                destination,
            ];
            if detailed {
                cells.push(event.label.clone());
            }

            for (col, text) in cells.iter().enumerate() {
                let label = gtk4::Label::builder()
                    .label(text.as_str())
                    .halign(gtk4::Align::Start)
                    .ellipsize(gtk4::pango::EllipsizeMode::End)
                    .max_width_chars(28)
                    .build();
                if col == 0 {
                    label.add_css_class("numeric");
                }
                grid.attach(&label, col as i32 + 1, row, 1, 1);
            }
        }

        self.append(&grid);
        imp.grid.replace(Some(grid));
    }

    fn action_cell(event: &LogEvent, opener: Option<RuleOpener>) -> gtk4::Widget {
        let Some(icon_name) = event.action.icon_name() else {
            return gtk4::Box::builder().width_request(24).build().upcast();
        };

        let button = gtk4::Button::builder()
            .icon_name(icon_name)
            .css_classes(vec!["flat".to_string(), "circular".to_string(), event.action.css_class().to_string()])
            .tooltip_text(event.rule_summary())
            .valign(gtk4::Align::Center)
            .build();

        let rid = event.rid.clone();
        button.connect_clicked(move |_| {
            if let Some(open) = opener.as_ref() {
                open(&rid);
            }
        });
        button.upcast()
    }

    fn remove_grid(&self) {
        if let Some(grid) = self.imp().grid.take() {
            self.remove(&grid);
        }
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct FirewallLogView {
        pub detailed: Cell<bool>,
        pub grid: RefCell<Option<gtk4::Grid>>,
        pub placeholder: RefCell<Option<gtk4::Label>>,
        pub opener: RefCell<Option<RuleOpener>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for FirewallLogView {
        const NAME: &'static str = "RouterDashboardFirewallLogView";
        type Type = super::FirewallLogView;
        type ParentType = gtk4::Box;
    }

    impl ObjectImpl for FirewallLogView {}
    impl WidgetImpl for FirewallLogView {}
    impl BoxImpl for FirewallLogView {}
}
