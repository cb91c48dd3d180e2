// Router Dashboard - Usage Bar Widget
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Animated percentage bar that turns red when resources run low.

use std::cell::{Cell, RefCell};

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{glib, graphene};

use crate::models::UsageLevel;

glib::wrapper! {
    /// A horizontal bar showing one usage percentage.
    pub struct UsageBar(ObjectSubclass<imp::UsageBar>)
        @extends gtk4::Widget;
}

impl UsageBar {
    pub fn new() -> Self {
        glib::Object::new()
    }

    /// Show `percent` (0 to 100) with the given level.
    pub fn set_usage(&self, percent: f64, level: UsageLevel) {
        let imp = self.imp();
        imp.target.set(percent.clamp(0.0, 100.0));
        imp.low.set(level == UsageLevel::Low);
        imp.text.replace(format!("{:.0}%", percent));

        if level == UsageLevel::Low {
            self.add_css_class("low");
        } else {
            self.remove_css_class("low");
        }

        if !imp.animating.get() {
            self.start_animation();
        }
    }

    pub fn percent(&self) -> f64 {
        self.imp().target.get()
    }

    fn start_animation(&self) {
        let imp = self.imp();
        imp.animating.set(true);

        let widget = self.clone();
        self.add_tick_callback(move |_, _| {
            let imp = widget.imp();
            let diff = imp.target.get() - imp.current.get();

            if diff.abs() < 0.1 {
                imp.current.set(imp.target.get());
                imp.animating.set(false);
                widget.queue_draw();
                return glib::ControlFlow::Break;
            }

            imp.current.set(imp.current.get() + diff * 0.15);
            widget.queue_draw();
            glib::ControlFlow::Continue
        });
    }
}

impl Default for UsageBar {
    fn default() -> Self {
        Self::new()
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct UsageBar {
        pub current: Cell<f64>,
        pub target: Cell<f64>,
        pub low: Cell<bool>,
        pub animating: Cell<bool>,
        pub text: RefCell<String>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for UsageBar {
        const NAME: &'static str = "RouterDashboardUsageBar";
        type Type = super::UsageBar;
        type ParentType = gtk4::Widget;
    }

    impl ObjectImpl for UsageBar {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_height_request(18);
            obj.set_hexpand(true);
            obj.add_css_class("usage-bar");
        }
    }

    impl WidgetImpl for UsageBar {
        fn snapshot(&self, snapshot: &gtk4::Snapshot) {
            let widget = self.obj();
            let width = widget.width() as f64;
            let height = widget.height() as f64;
            let radius = (height / 2.0).min(6.0);

            let bounds = graphene::Rect::new(0.0, 0.0, width as f32, height as f32);
            let cr = snapshot.append_cairo(&bounds);

            cr.set_source_rgba(0.5, 0.5, 0.5, 0.2);
            rounded_rect(&cr, 0.0, 0.0, width, height, radius);
            let _ = cr.fill();

            let fill = self.current.get() / 100.0 * width;
            if fill > 0.5 {
                if self.low.get() {
                    cr.set_source_rgb(0.87, 0.18, 0.26);
                } else {
                    cr.set_source_rgb(0.2, 0.52, 0.89);
                }
                rounded_rect(&cr, 0.0, 0.0, fill.max(radius * 2.0), height, radius);
                let _ = cr.fill();
            }

            let text = self.text.borrow();
            let text_color = widget.color();
            cr.set_source_rgba(
                text_color.red() as f64,
                text_color.green() as f64,
                text_color.blue() as f64,
                0.9,
            );
            cr.select_font_face("Sans", gtk4::cairo::FontSlant::Normal, gtk4::cairo::FontWeight::Bold);
            cr.set_font_size(11.0);
            if let Ok(extents) = cr.text_extents(&text) {
                cr.move_to((width - extents.width()) / 2.0, height / 2.0 + extents.height() / 2.0);
                let _ = cr.show_text(&text);
            }
        }
    }

    fn rounded_rect(cr: &gtk4::cairo::Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
        use std::f64::consts::PI;
        let r = r.min(w / 2.0).min(h / 2.0);
        cr.new_path();
        cr.arc(x + r, y + r, r, PI, 1.5 * PI);
        cr.arc(x + w - r, y + r, r, 1.5 * PI, 2.0 * PI);
        cr.arc(x + w - r, y + h - r, r, 0.0, 0.5 * PI);
        cr.arc(x + r, y + h - r, r, 0.5 * PI, PI);
        cr.close_path();
    }
}
