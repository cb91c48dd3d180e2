// Router Dashboard - Line Chart Widget
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Scrolling line chart for percentage time series.

use std::cell::{Cell, RefCell};

use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{gdk, glib, graphene};

glib::wrapper! {
    /// A line chart widget showing one percentage series.
    pub struct LineChart(ObjectSubclass<imp::LineChart>)
        @extends gtk4::Widget;
}

impl LineChart {
    /// Create a new line chart.
    pub fn new() -> Self {
        glib::Object::new()
    }

    /// Create a chart drawing its series in `color`.
    pub fn with_color(color: gdk::RGBA) -> Self {
        let chart = Self::new();
        chart.imp().color.set(color);
        chart
    }

    /// Replace the plotted values, oldest first.
    pub fn set_values(&self, values: Vec<f64>) {
        let imp = self.imp();
        let max_points = imp.max_points.get();
        let skip = values.len().saturating_sub(max_points);
        imp.values.replace(values.into_iter().skip(skip).collect());
        self.queue_draw();
    }

    /// Set the number of points spanning the full width.
    pub fn set_max_points(&self, max: usize) {
        self.imp().max_points.set(max.max(2));
        self.queue_draw();
    }

    pub fn clear(&self) {
        self.imp().values.borrow_mut().clear();
        self.queue_draw();
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertical position of a percentage inside the plot area.
fn value_to_y(value: f64, top: f64, height: f64) -> f64 {
    top + height - (value.clamp(0.0, 100.0) / 100.0 * height)
}

mod imp {
    use super::*;

    pub struct LineChart {
        pub values: RefCell<Vec<f64>>,
        pub max_points: Cell<usize>,
        pub color: Cell<gdk::RGBA>,
    }

    impl Default for LineChart {
        fn default() -> Self {
            Self {
                values: RefCell::new(Vec::new()),
                max_points: Cell::new(60),
                color: Cell::new(gdk::RGBA::new(0.85, 0.31, 0.0, 1.0)),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for LineChart {
        const NAME: &'static str = "RouterDashboardLineChart";
        type Type = super::LineChart;
        type ParentType = gtk4::Widget;
    }

    impl ObjectImpl for LineChart {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_width_request(300);
            obj.set_height_request(70);
        }
    }

    impl WidgetImpl for LineChart {
        fn snapshot(&self, snapshot: &gtk4::Snapshot) {
            let widget = self.obj();
            let width = widget.width() as f64;
            let height = widget.height() as f64;

            let values = self.values.borrow();
            let color = self.color.get();
            let text_color = widget.color();

            let margin_left = 34.0;
            let margin_right = 6.0;
            let margin_top = 6.0;
            let margin_bottom = 6.0;
            let chart_width = width - margin_left - margin_right;
            let chart_height = height - margin_top - margin_bottom;

            let bounds = graphene::Rect::new(0.0, 0.0, width as f32, height as f32);
            let cr = snapshot.append_cairo(&bounds);

            // Grid, one line per 25 %
            cr.set_source_rgba(0.47, 0.47, 0.47, 0.12);
            cr.set_line_width(0.5);
            for i in 0..=4 {
                let y = margin_top + chart_height * i as f64 / 4.0;
                cr.move_to(margin_left, y);
                cr.line_to(width - margin_right, y);
                let _ = cr.stroke();
            }

            cr.set_source_rgba(
                text_color.red() as f64,
                text_color.green() as f64,
                text_color.blue() as f64,
                0.6,
            );
            cr.set_font_size(10.0);
            cr.move_to(2.0, margin_top + 8.0);
            let _ = cr.show_text("100%");
            cr.move_to(2.0, margin_top + chart_height);
            let _ = cr.show_text("0%");

            if values.is_empty() {
                return;
            }

            // Newest sample sits at the right edge.
            let x_step = chart_width / (self.max_points.get() - 1) as f64;
            let x_start = margin_left + chart_width - (values.len() - 1) as f64 * x_step;
            let point = |i: usize, v: f64| {
                (x_start + i as f64 * x_step, value_to_y(v, margin_top, chart_height))
            };

            cr.set_source_rgba(
                color.red() as f64,
                color.green() as f64,
                color.blue() as f64,
                color.alpha() as f64,
            );
            cr.set_line_width(2.0);
            cr.set_line_join(gtk4::cairo::LineJoin::Round);
            cr.set_line_cap(gtk4::cairo::LineCap::Round);
            for (i, value) in values.iter().enumerate() {
                let (x, y) = point(i, *value);
                if i == 0 {
                    cr.move_to(x, y);
                } else {
                    cr.line_to(x, y);
                }
            }
            let _ = cr.stroke();

            // Area fill
            cr.set_source_rgba(color.red() as f64, color.green() as f64, color.blue() as f64, 0.1);
            cr.move_to(x_start, margin_top + chart_height);
            for (i, value) in values.iter().enumerate() {
                let (x, y) = point(i, *value);
                cr.line_to(x, y);
            }
            cr.line_to(margin_left + chart_width, margin_top + chart_height);
            cr.close_path();
            let _ = cr.fill();

            // Current value
            if let Some(last) = values.last() {
                let text = format!("{:.0}%", last);
                cr.set_source_rgba(
                    text_color.red() as f64,
                    text_color.green() as f64,
                    text_color.blue() as f64,
                    0.85,
                );
                cr.set_font_size(11.0);
                if let Ok(extents) = cr.text_extents(&text) {
                    cr.move_to(width - margin_right - extents.width() - 2.0, margin_top + 11.0);
                    let _ = cr.show_text(&text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_y_clamps() {
        assert_eq!(value_to_y(0.0, 10.0, 100.0), 110.0);
        assert_eq!(value_to_y(100.0, 10.0, 100.0), 10.0);
        assert_eq!(value_to_y(150.0, 10.0, 100.0), 10.0);
        assert_eq!(value_to_y(-5.0, 10.0, 100.0), 110.0);
        assert_eq!(value_to_y(25.0, 0.0, 100.0), 75.0);
    }
}
