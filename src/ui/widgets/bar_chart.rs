// Router Dashboard - Bar Chart Widget
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Animated horizontal stacked bar chart of used and free space.

use std::cell::{Cell, RefCell};

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{gdk, glib, graphene};

use crate::models::{DiskUsage, UsageLevel};
use crate::units::format_size;

/// One stacked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub label: String,
    pub used: u64,
    pub free: u64,
    pub low: bool,
}

impl BarEntry {
    /// Fractions of the common scale taken by the used and free parts.
    pub fn fractions(&self, scale_max: u64) -> (f64, f64) {
        if scale_max == 0 {
            return (0.0, 0.0);
        }
        let scale = scale_max as f64;
        let used = (self.used as f64 / scale).clamp(0.0, 1.0);
        let free = (self.free as f64 / scale).clamp(0.0, 1.0 - used);
        (used, free)
    }
}

glib::wrapper! {
    /// A horizontal bar chart with one used/free bar per entry.
    pub struct BarChart(ObjectSubclass<imp::BarChart>)
        @extends gtk4::Widget;
}

impl BarChart {
    /// Create a new bar chart.
    pub fn new() -> Self {
        glib::Object::new()
    }

    /// Show one bar per filesystem, scaled to the largest one.
    pub fn set_disks(&self, disks: &DiskUsage) {
        let entries = disks
            .devices
            .iter()
            .map(|d| BarEntry {
                label: d.mountpoint.clone(),
                used: d.used_bytes,
                free: d.free_bytes(),
                low: d.level() == UsageLevel::Low,
            })
            .collect();
        self.set_entries(entries, disks.scale_max());
    }

    /// Set the bar entries to display against a common scale.
    pub fn set_entries(&self, entries: Vec<BarEntry>, scale_max: u64) {
        let imp = self.imp();

        let target: Vec<(f64, f64)> = entries.iter().map(|e| e.fractions(scale_max)).collect();
        let mut current = imp.current_values.borrow().clone();
        current.resize(target.len(), (0.0, 0.0));

        let height = 10.0 + entries.len() as f64 * (BAR_HEIGHT + BAR_SPACING);
        self.set_height_request(height.max(60.0) as i32);

        imp.current_values.replace(current);
        imp.target_values.replace(target);
        imp.entries.replace(entries);

        if !imp.animating.get() {
            self.start_animation();
        }
    }

    /// Set the placeholder text when there's no data.
    pub fn set_placeholder(&self, text: &str) {
        let imp = self.imp();
        imp.placeholder.replace(text.to_string());
        imp.entries.replace(Vec::new());
        imp.current_values.replace(Vec::new());
        imp.target_values.replace(Vec::new());
        self.queue_draw();
    }

    /// Start the animation.
    fn start_animation(&self) {
        let imp = self.imp();
        imp.animating.set(true);

        let widget = self.clone();
        self.add_tick_callback(move |_, _| {
            let imp = widget.imp();

            let mut current = imp.current_values.borrow_mut();
            let target = imp.target_values.borrow();

            let mut all_done = true;
            for (curr, tgt) in current.iter_mut().zip(target.iter()) {
                for (c, t) in [(&mut curr.0, tgt.0), (&mut curr.1, tgt.1)] {
                    let diff = t - *c;
                    if diff.abs() > 0.001 {
                        *c += diff * 0.12;
                        all_done = false;
                    } else {
                        *c = t;
                    }
                }
            }

            drop(current);
            drop(target);

            widget.queue_draw();

            if all_done {
                imp.animating.set(false);
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new()
    }
}

const BAR_HEIGHT: f64 = 22.0;
const BAR_SPACING: f64 = 8.0;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct BarChart {
        pub entries: RefCell<Vec<BarEntry>>,
        pub current_values: RefCell<Vec<(f64, f64)>>,
        pub target_values: RefCell<Vec<(f64, f64)>>,
        pub animating: Cell<bool>,
        pub placeholder: RefCell<String>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for BarChart {
        const NAME: &'static str = "RouterDashboardBarChart";
        type Type = super::BarChart;
        type ParentType = gtk4::Widget;
    }

    impl ObjectImpl for BarChart {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_width_request(300);
            obj.set_height_request(60);

            self.placeholder.replace("No data available".to_string());
        }
    }

    impl WidgetImpl for BarChart {
        fn snapshot(&self, snapshot: &gtk4::Snapshot) {
            let widget = self.obj();
            let width = widget.width() as f64;
            let height = widget.height() as f64;

            let entries = self.entries.borrow();
            let current_values = self.current_values.borrow();

            let used_color = gdk::RGBA::new(0.2, 0.52, 0.89, 1.0);
            let low_color = gdk::RGBA::new(0.87, 0.18, 0.26, 1.0);
            let free_color = gdk::RGBA::new(0.2, 0.52, 0.89, 0.3);
            let dim_color = gdk::RGBA::new(0.5, 0.5, 0.5, 0.15);
            let text_color = widget.color();

            let bounds = graphene::Rect::new(0.0, 0.0, width as f32, height as f32);
            let cr = snapshot.append_cairo(&bounds);

            if entries.is_empty() {
                let placeholder = self.placeholder.borrow();
                cr.set_source_rgba(
                    text_color.red() as f64,
                    text_color.green() as f64,
                    text_color.blue() as f64,
                    0.5,
                );
                cr.select_font_face("Sans", gtk4::cairo::FontSlant::Normal, gtk4::cairo::FontWeight::Normal);
                cr.set_font_size(12.0);
                if let Ok(extents) = cr.text_extents(&placeholder) {
                    cr.move_to((width - extents.width()) / 2.0, height / 2.0);
                    let _ = cr.show_text(&placeholder);
                }
                return;
            }

            let label_width = 90.0;
            let value_width = 110.0;
            let bar_area_width = (width - label_width - value_width - 20.0).max(10.0);

            for (i, entry) in entries.iter().enumerate() {
                let y = 10.0 + (i as f64 * (BAR_HEIGHT + BAR_SPACING));
                let (used, free) = current_values.get(i).copied().unwrap_or((0.0, 0.0));

                cr.set_source_rgba(
                    text_color.red() as f64,
                    text_color.green() as f64,
                    text_color.blue() as f64,
                    0.9,
                );
                cr.select_font_face("Sans", gtk4::cairo::FontSlant::Normal, gtk4::cairo::FontWeight::Normal);
                cr.set_font_size(11.0);
                let label: String = if entry.label.chars().count() > 12 {
                    let head: String = entry.label.chars().take(11).collect();
                    format!("{}…", head)
                } else {
                    entry.label.clone()
                };
                cr.move_to(10.0, y + BAR_HEIGHT / 2.0 + 4.0);
                let _ = cr.show_text(&label);

                // Track
                cr.set_source_rgba(
                    dim_color.red() as f64,
                    dim_color.green() as f64,
                    dim_color.blue() as f64,
                    dim_color.alpha() as f64,
                );
                Self::rounded_rect(&cr, label_width, y, bar_area_width, BAR_HEIGHT, 4.0);
                let _ = cr.fill();

                // Free part, drawn first so the used part overlaps its start
                let total_width = (used + free) * bar_area_width;
                if total_width > 0.0 {
                    cr.set_source_rgba(
                        free_color.red() as f64,
                        free_color.green() as f64,
                        free_color.blue() as f64,
                        free_color.alpha() as f64,
                    );
                    Self::rounded_rect(&cr, label_width, y, total_width.max(8.0), BAR_HEIGHT, 4.0);
                    let _ = cr.fill();
                }

                let used_width = used * bar_area_width;
                if used_width > 0.0 {
                    let color = if entry.low { low_color } else { used_color };
                    cr.set_source_rgba(
                        color.red() as f64,
                        color.green() as f64,
                        color.blue() as f64,
                        color.alpha() as f64,
                    );
                    Self::rounded_rect(&cr, label_width, y, used_width.max(8.0), BAR_HEIGHT, 4.0);
                    let _ = cr.fill();
                }

                cr.set_source_rgba(
                    text_color.red() as f64,
                    text_color.green() as f64,
                    text_color.blue() as f64,
                    0.7,
                );
                cr.set_font_size(10.0);
                let value_str = format!(
                    "{} / {}",
                    format_size(entry.used),
                    format_size(entry.used + entry.free)
                );
                cr.move_to(width - value_width, y + BAR_HEIGHT / 2.0 + 4.0);
                let _ = cr.show_text(&value_str);
            }
        }
    }

    impl BarChart {
        /// Draw a rounded rectangle.
        fn rounded_rect(cr: &gtk4::cairo::Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
            let r = r.min(w / 2.0).min(h / 2.0);
            cr.new_path();
            cr.arc(x + r, y + r, r, std::f64::consts::PI, 1.5 * std::f64::consts::PI);
            cr.arc(x + w - r, y + r, r, 1.5 * std::f64::consts::PI, 2.0 * std::f64::consts::PI);
            cr.arc(x + w - r, y + h - r, r, 0.0, 0.5 * std::f64::consts::PI);
            cr.arc(x + r, y + h - r, r, 0.5 * std::f64::consts::PI, std::f64::consts::PI);
            cr.close_path();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_against_common_scale() {
        let entry = BarEntry { label: "/".into(), used: 30, free: 20, low: false };
        assert_eq!(entry.fractions(100), (0.3, 0.2));
        assert_eq!(entry.fractions(0), (0.0, 0.0));

        let overfull = BarEntry { label: "/tmp".into(), used: 90, free: 50, low: true };
        let (used, free) = overfull.fractions(100);
        assert_eq!(used, 0.9);
        assert!((free - 0.1).abs() < 1e-9);
    }
}
