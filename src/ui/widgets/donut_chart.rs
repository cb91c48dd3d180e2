// Router Dashboard - Donut Chart Widget
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Animated donut chart with one slice per firewall rule.

use std::cell::{Cell, RefCell};
use std::f64::consts::PI;

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{glib, graphene};

/// Slice colours, cycled in slice order.
const PALETTE: [(f64, f64, f64); 10] = [
    (0.21, 0.52, 0.89),
    (0.20, 0.82, 0.48),
    (0.96, 0.76, 0.07),
    (0.88, 0.11, 0.14),
    (0.57, 0.25, 0.67),
    (1.00, 0.47, 0.00),
    (0.15, 0.64, 0.65),
    (0.75, 0.38, 0.62),
    (0.39, 0.56, 0.19),
    (0.55, 0.45, 0.33),
];

const LEGEND_ROW_HEIGHT: f64 = 18.0;

/// One slice of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub in_legend: bool,
}

glib::wrapper! {
    /// A donut chart showing how events are spread over rules.
    pub struct DonutChart(ObjectSubclass<imp::DonutChart>)
        @extends gtk4::Widget;
}

impl DonutChart {
    /// Create a new donut chart.
    pub fn new() -> Self {
        glib::Object::new()
    }

    /// Replace the slices. Values of slices that keep their position animate
    /// towards the new value; new slices grow from zero.
    pub fn set_slices(&self, slices: Vec<DonutSlice>) {
        let imp = self.imp();

        {
            let mut current = imp.current_values.borrow_mut();
            current.resize(slices.len(), 0.0);
        }

        let total: f64 = slices.iter().map(|s| s.value).sum();
        imp.primary_text.replace(format!("{}", total.round() as u64));
        imp.slices.replace(slices);

        if !imp.animating.get() {
            self.start_animation();
        }
    }

    /// Remove all slices.
    pub fn clear(&self) {
        let imp = self.imp();
        imp.slices.borrow_mut().clear();
        imp.current_values.borrow_mut().clear();
        imp.primary_text.replace("0".to_string());
        self.queue_draw();
    }

    /// Set the text under the total.
    pub fn set_secondary_text(&self, secondary: &str) {
        self.imp().secondary_text.replace(secondary.to_string());
        self.queue_draw();
    }

    /// Call `f` with the slice key whenever a slice is clicked.
    pub fn connect_slice_activated<F: Fn(&str) + 'static>(&self, f: F) {
        self.imp().on_activate.replace(Some(Box::new(f)));
    }

    fn start_animation(&self) {
        let imp = self.imp();
        imp.animating.set(true);

        let widget = self.clone();
        self.add_tick_callback(move |_, _clock| {
            let imp = widget.imp();
            let slices = imp.slices.borrow();
            let mut current = imp.current_values.borrow_mut();

            let mut settled = true;
            for (value, slice) in current.iter_mut().zip(slices.iter()) {
                let diff = slice.value - *value;
                if diff.abs() < 0.01 {
                    *value = slice.value;
                } else {
                    *value += diff * 0.15;
                    settled = false;
                }
            }
            widget.queue_draw();

            if settled {
                imp.animating.set(false);
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }

    fn geometry(&self) -> (f64, f64, f64) {
        let height = self.height() as f64;
        let diameter = height.min(self.width() as f64 * 0.5);
        let radius = diameter / 2.0 - 8.0;
        (diameter / 2.0, height / 2.0, radius)
    }

    fn handle_click(&self, x: f64, y: f64) {
        let (cx, cy, radius) = self.geometry();
        let (dx, dy) = (x - cx, y - cy);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > radius || distance < radius * 0.4 {
            return;
        }

        // Fraction of the turn measured clockwise from twelve o'clock.
        let angle = dy.atan2(dx) + PI / 2.0;
        let fraction = angle.rem_euclid(2.0 * PI) / (2.0 * PI);

        let imp = self.imp();
        let key = {
            let values = imp.current_values.borrow();
            let slices = imp.slices.borrow();
            slice_at(&values, fraction).and_then(|i| slices.get(i).map(|s| s.key.clone()))
        };

        if let Some(key) = key {
            if let Some(callback) = imp.on_activate.borrow().as_ref() {
                callback(&key);
            }
        }
    }
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the slice covering `fraction` (0..1) of the full turn.
fn slice_at(values: &[f64], fraction: f64) -> Option<usize> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut end = 0.0;
    for (i, value) in values.iter().enumerate() {
        end += value / total;
        if fraction < end {
            return Some(i);
        }
    }
    values.iter().rposition(|v| *v > 0.0)
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct DonutChart {
        pub slices: RefCell<Vec<DonutSlice>>,
        pub current_values: RefCell<Vec<f64>>,
        pub animating: Cell<bool>,
        pub primary_text: RefCell<String>,
        pub secondary_text: RefCell<String>,
        pub on_activate: RefCell<Option<Box<dyn Fn(&str)>>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for DonutChart {
        const NAME: &'static str = "RouterDashboardDonutChart";
        type Type = super::DonutChart;
        type ParentType = gtk4::Widget;
    }

    impl ObjectImpl for DonutChart {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_width_request(360);
            obj.set_height_request(200);
            obj.set_cursor_from_name(Some("pointer"));

            self.primary_text.replace("0".to_string());
            self.secondary_text.replace("events".to_string());

            let click = gtk4::GestureClick::new();
            let widget = obj.downgrade();
            click.connect_released(move |_, _, x, y| {
                if let Some(widget) = widget.upgrade() {
                    widget.handle_click(x, y);
                }
            });
            obj.add_controller(click);
        }
    }

    impl WidgetImpl for DonutChart {
        fn snapshot(&self, snapshot: &gtk4::Snapshot) {
            let widget = self.obj();
            let width = widget.width() as f64;
            let height = widget.height() as f64;
            let (cx, cy, radius) = widget.geometry();
            let thickness = radius * 0.6;

            let bounds = graphene::Rect::new(0.0, 0.0, width as f32, height as f32);
            let cr = snapshot.append_cairo(&bounds);
            let text_color = widget.color();

            let values = self.current_values.borrow();
            let slices = self.slices.borrow();
            let total: f64 = values.iter().sum();

            // Background ring
            cr.set_source_rgba(0.5, 0.5, 0.5, 0.3);
            cr.set_line_width(thickness);
            cr.arc(cx, cy, radius - thickness / 2.0, 0.0, 2.0 * PI);
            let _ = cr.stroke();

            if total > 0.0 {
                let mut start = -PI / 2.0;
                for (i, value) in values.iter().enumerate() {
                    let sweep = value / total * 2.0 * PI;
                    if sweep <= 0.0 {
                        continue;
                    }
                    let (r, g, b) = PALETTE[i % PALETTE.len()];
                    cr.set_source_rgb(r, g, b);
                    cr.set_line_width(thickness);
                    cr.arc(cx, cy, radius - thickness / 2.0, start, start + sweep);
                    let _ = cr.stroke();
                    start += sweep;
                }
            }

            // Centre text
            cr.set_source_rgba(
                text_color.red() as f64,
                text_color.green() as f64,
                text_color.blue() as f64,
                text_color.alpha() as f64,
            );
            let primary = self.primary_text.borrow();
            cr.select_font_face("Sans", gtk4::cairo::FontSlant::Normal, gtk4::cairo::FontWeight::Bold);
            cr.set_font_size(18.0);
            if let Ok(extents) = cr.text_extents(&primary) {
                cr.move_to(cx - extents.width() / 2.0, cy + 2.0);
                let _ = cr.show_text(&primary);
            }

            let secondary = self.secondary_text.borrow();
            cr.select_font_face("Sans", gtk4::cairo::FontSlant::Normal, gtk4::cairo::FontWeight::Normal);
            cr.set_font_size(10.0);
            cr.set_source_rgba(
                text_color.red() as f64,
                text_color.green() as f64,
                text_color.blue() as f64,
                0.7,
            );
            if let Ok(extents) = cr.text_extents(&secondary) {
                cr.move_to(cx - extents.width() / 2.0, cy + 16.0);
                let _ = cr.show_text(&secondary);
            }

            // Legend
            let legend_x = cx * 2.0 + 12.0;
            let legend: Vec<(usize, &DonutSlice)> = slices
                .iter()
                .enumerate()
                .filter(|(_, s)| s.in_legend)
                .collect();
            let mut y = (height - legend.len() as f64 * LEGEND_ROW_HEIGHT) / 2.0;
            cr.set_font_size(11.0);

            for (i, slice) in legend {
                let (r, g, b) = PALETTE[i % PALETTE.len()];
                cr.set_source_rgb(r, g, b);
                cr.rectangle(legend_x, y + 3.0, 10.0, 10.0);
                let _ = cr.fill();

                cr.set_source_rgba(
                    text_color.red() as f64,
                    text_color.green() as f64,
                    text_color.blue() as f64,
                    0.85,
                );
                cr.move_to(legend_x + 16.0, y + 12.0);
                let text = format!("{} ({})", slice.label, slice.value as u64);
                let _ = cr.show_text(&text);
                y += LEGEND_ROW_HEIGHT;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_hit_testing() {
        let values = [1.0, 1.0, 2.0];
        assert_eq!(slice_at(&values, 0.0), Some(0));
        assert_eq!(slice_at(&values, 0.3), Some(1));
        assert_eq!(slice_at(&values, 0.5), Some(2));
        assert_eq!(slice_at(&values, 0.99), Some(2));
    }

    #[test]
    fn test_empty_chart_has_no_slice() {
        assert_eq!(slice_at(&[], 0.5), None);
        assert_eq!(slice_at(&[0.0, 0.0], 0.5), None);
    }
}
