// Router Dashboard - UI Helpers
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Small widget builders shared by the dashboard pages.

use gtk4::prelude::*;
use gtk4::{gio, glib};
use libadwaita as adw;
use tracing::warn;

/// Create a card with a heading; returns the frame and its content box.
pub fn create_card(title: &str, icon_name: &str) -> (gtk4::Frame, gtk4::Box) {
    let frame = gtk4::Frame::builder().build();
    frame.add_css_class("card");

    let card_content = gtk4::Box::builder()
        .orientation(gtk4::Orientation::Vertical)
        .spacing(8)
        .margin_top(16)
        .margin_bottom(16)
        .margin_start(16)
        .margin_end(16)
        .build();

    let header = gtk4::Box::builder()
        .orientation(gtk4::Orientation::Horizontal)
        .spacing(8)
        .margin_bottom(4)
        .build();

    let icon = gtk4::Image::builder()
        .icon_name(icon_name)
        .css_classes(vec!["heading".to_string()])
        .build();

    let title_label = gtk4::Label::builder()
        .label(title)
        .css_classes(vec!["heading".to_string()])
        .halign(gtk4::Align::Start)
        .build();

    header.append(&icon);
    header.append(&title_label);
    card_content.append(&header);

    frame.set_child(Some(&card_content));
    (frame, card_content)
}

/// Dimmed label shown when a section has nothing to display.
pub fn placeholder_label(text: &str) -> gtk4::Label {
    gtk4::Label::builder()
        .label(text)
        .css_classes(vec!["dim-label".to_string()])
        .halign(gtk4::Align::Start)
        .margin_top(6)
        .margin_bottom(6)
        .build()
}

/// Remove every child of a box.
pub fn clear_box(container: &gtk4::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

/// Show a toast on the closest toast overlay above `widget`.
pub fn show_toast(widget: &impl IsA<gtk4::Widget>, message: &str) {
    let mut parent = widget.as_ref().parent();
    while let Some(p) = parent {
        if let Some(overlay) = p.downcast_ref::<adw::ToastOverlay>() {
            overlay.add_toast(adw::Toast::new(message));
            return;
        }
        parent = p.parent();
    }
}

/// Open a URL in the user's browser.
pub fn open_uri(widget: &impl IsA<gtk4::Widget>, uri: &str) {
    let window = widget.as_ref().root().and_downcast::<gtk4::Window>();
    let launcher = gtk4::UriLauncher::new(uri);
    let uri = uri.to_string();
    launcher.launch(window.as_ref(), gio::Cancellable::NONE, move |result| {
        if let Err(e) = result {
            warn!("Failed to open {}: {}", uri, e);
        }
    });
}

/// Run `f` every `seconds`, returning the source for later removal.
pub fn every_seconds<F: Fn() + 'static>(seconds: u32, f: F) -> glib::SourceId {
    glib::timeout_add_seconds_local(seconds.max(1), move || {
        f();
        glib::ControlFlow::Continue
    })
}

/// Apply a stored theme preference ("system", "light" or "dark").
pub fn apply_color_scheme(theme: &str) {
    let style_manager = adw::StyleManager::default();
    match theme {
        "light" => style_manager.set_color_scheme(adw::ColorScheme::ForceLight),
        "dark" => style_manager.set_color_scheme(adw::ColorScheme::ForceDark),
        _ => style_manager.set_color_scheme(adw::ColorScheme::Default),
    }
}
