use crate::events::AppEvent;
use crate::gui::anchor::PopupAnchor;
use crate::gui::icons::PixbufRasterizer;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view;
use crate::gui::window::{self, OverlaySurface};
use fittsmenu::config::{self, MenuConfig, SETUP_LABEL};
use fittsmenu::{Menu, MenuEvent, MenuKey, Point, Selection};
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Menu plus the rasterizer its icon cache is filled from.
pub struct State {
    pub menu: Menu<Pixbuf>,
    pub rasterizer: PixbufRasterizer,
}

impl State {
    pub fn from_config(config: &MenuConfig) -> Self {
        let menu = Menu::from_config(config).unwrap_or_else(|e| {
            log::error!("Invalid menu configuration, using setup menu: {}", e);
            Menu::new(Default::default(), config.animation)
        });
        let menu = if menu.is_empty() {
            log::warn!("No slices configured, using setup menu");
            Menu::from_config(&MenuConfig::setup()).unwrap_or(menu)
        } else {
            menu
        };

        Self {
            menu,
            rasterizer: PixbufRasterizer::new(config.fallback_icon.clone()),
        }
    }
}

pub struct AppModel {
    state: Rc<RefCell<State>>,
    surface: OverlaySurface,
    anchor: PopupAnchor,
    pending_config: Option<MenuConfig>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Click(u32),
    Key(MenuKey),
    CursorMove(Point),
    Enter(Point),
    Leave,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fitts' menu"),
            add_css_class: "fittsmenu-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Key(MenuKey::Escape));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fittsmenu-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    },
                    connect_enter[sender] => move |_, x, y| {
                        sender.input(AppMsg::Enter(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::Leave);
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // all buttons
                    connect_released[sender] => move |gesture, _, _, _| {
                        sender.input(AppMsg::Click(gesture.current_button()));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let widgets = view_output!();

        let model = AppModel {
            state: Rc::new(RefCell::new(State::from_config(&config))),
            surface: OverlaySurface::new(root.clone(), widgets.drawing_area.clone()),
            anchor: PopupAnchor::default(),
            pending_config: None,
        };

        let state_draw = model.state.clone();
        let colors = ThemeColors::default();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let mut state = state_draw.borrow_mut();
                let State { menu, rasterizer } = &mut *state;

                for e in menu.ensure_icons(&*rasterizer) {
                    log::warn!("{}", e);
                }
                if let Err(e) = view::draw(cr, menu, &*rasterizer, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                if self.state.borrow().menu.is_open() {
                    return;
                }
                match self.anchor.request(self.surface.cursor_position()) {
                    Some(center) => self.popup(center),
                    None => {
                        log::debug!("pointer position unknown, waiting for it on the overlay");
                        self.surface.map();
                    }
                }
            }
            AppMsg::Hide => {
                if self.anchor.cancel() {
                    self.surface.unmap();
                    return;
                }
                let event = self.state.borrow_mut().menu.popdown(&mut self.surface);
                self.finish(event);
            }
            AppMsg::Click(button) => {
                if self.anchor.cancel() {
                    self.surface.unmap();
                    return;
                }
                let event = self
                    .state
                    .borrow_mut()
                    .menu
                    .on_button_release(button, &mut self.surface);
                self.finish(event);
            }
            AppMsg::Key(key) => {
                let event = self
                    .state
                    .borrow_mut()
                    .menu
                    .on_key_press(key, &mut self.surface);
                self.finish(event);
            }
            AppMsg::CursorMove(point) => {
                if let Some(center) = self.anchor.observe(point) {
                    self.popup(center);
                }
                let action = self.state.borrow_mut().menu.on_motion(point);
                if action.should_redraw {
                    self.surface.queue_draw();
                }
            }
            AppMsg::Enter(point) => {
                if let Some(center) = self.anchor.observe(point) {
                    self.popup(center);
                }
                if self.state.borrow_mut().menu.on_enter().should_redraw {
                    self.surface.queue_draw();
                }
            }
            AppMsg::Leave => {
                if self.state.borrow_mut().menu.on_leave().should_redraw {
                    self.surface.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => self.apply_config(new_config),
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn popup(&mut self, center: Point) {
        let opened = self
            .state
            .borrow_mut()
            .menu
            .popup(center, &mut self.surface);
        if let Err(e) = opened {
            log::warn!("Cannot open menu: {}", e);
            self.surface.unmap();
        }
    }

    fn finish(&mut self, event: Option<MenuEvent>) {
        match event {
            Some(MenuEvent::Selected(selection)) => self.on_selected(&selection),
            Some(MenuEvent::Cancelled) => log::info!("Menu cancelled"),
            None => return,
        }

        if let Some(pending) = self.pending_config.take() {
            self.apply_config(pending);
        }
    }

    fn on_selected(&self, selection: &Selection) {
        log::info!("Selected '{}' ({})", selection.label, selection.id);
        println!("{}", selection.label);

        if selection.label.as_str() == SETUP_LABEL {
            match config::write_default_config() {
                Ok(path) => {
                    if let Err(e) = std::process::Command::new("xdg-open").arg(&path).spawn() {
                        log::error!("Failed to open {}: {}", path.display(), e);
                    }
                }
                Err(e) => log::error!("Failed to write default config: {}", e),
            }
        }
    }

    fn apply_config(&mut self, config: MenuConfig) {
        if self.state.borrow().menu.is_open() {
            log::info!("Menu open, configuration reload deferred");
            self.pending_config = Some(config);
            return;
        }

        *self.state.borrow_mut() = State::from_config(&config);
        log::info!("Configuration reloaded");
    }
}
