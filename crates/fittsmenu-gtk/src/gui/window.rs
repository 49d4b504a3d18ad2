use fittsmenu::{Point, Surface};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

pub fn get_cursor_position(window: &gtk::ApplicationWindow) -> Option<Point> {
    gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(window.surface())
        .and_then(|(p, s)| s.device_position(&p))
        .map(|(x, y, _)| Point::new(x, y))
}

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("fittsmenu"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::None);
}

/// Full-screen overlay the menu is drawn on. Covering the whole output is what
/// lets it receive every pointer event while open.
pub struct OverlaySurface {
    window: gtk::ApplicationWindow,
    drawing_area: gtk::DrawingArea,
}

impl OverlaySurface {
    pub fn new(window: gtk::ApplicationWindow, drawing_area: gtk::DrawingArea) -> Self {
        Self {
            window,
            drawing_area,
        }
    }

    pub fn queue_draw(&self) {
        self.drawing_area.queue_draw();
    }

    /// Pointer position relative to the overlay, when the display reports one.
    pub fn cursor_position(&self) -> Option<Point> {
        get_cursor_position(&self.window)
    }

    /// Maps the overlay without opening the menu, so it starts receiving
    /// pointer events.
    pub fn map(&self) {
        self.window.set_visible(true);
    }

    pub fn unmap(&self) {
        self.window.set_visible(false);
    }
}

impl Surface for OverlaySurface {
    fn show(&mut self, origin: Point, size: f64) {
        log::debug!(
            "showing menu surface at ({:.0}, {:.0}), {:.0}px",
            origin.x,
            origin.y,
            size
        );
        self.window.set_visible(true);
        self.drawing_area.queue_draw();
    }

    fn hide(&mut self) {
        self.window.set_visible(false);
    }

    fn move_to(&mut self, _origin: Point, _size: f64) {
        // the overlay spans the output; the menu is redrawn around its centre
        self.drawing_area.queue_draw();
    }

    fn grab_input(&mut self) {
        self.window.set_keyboard_mode(KeyboardMode::Exclusive);
    }

    fn release_input(&mut self) {
        self.window.set_keyboard_mode(KeyboardMode::None);
    }
}
