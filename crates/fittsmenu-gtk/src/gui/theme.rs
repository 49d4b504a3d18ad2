use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub hub: Srgba<f64>,
    pub slice: Srgba<f64>,
    pub hovered: Srgba<f64>,
    pub border: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            hub: Srgba::new(0.0, 0.0, 0.0, 0.65),
            slice: Srgba::new(0.0, 0.0, 0.0, 0.7),
            hovered: Srgba::new(0.3, 0.3, 0.3, 0.5),
            border: Srgba::new(0.0, 0.0, 0.0, 0.1),
            text: Srgba::new(1.0, 1.0, 1.0, 0.9),
        }
    }
}

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.fittsmenu-window, .fittsmenu-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
