use crate::animation::{AnimationMode, ScaleCurve, cosine_falloff};
use crate::clock::{Clock, MonotonicClock};
use crate::error::MenuError;
use crate::geometry::{Point, angular_distance, rad_to_deg};
use crate::icon::Rasterizer;
use crate::layout::{Layout, RingGeometry};
use crate::motion::{TrackState, Tracker};
use crate::slice::{IconPath, Selection, Slice, SliceId, SliceLabel};
use crate::surface::Surface;

pub const PRIMARY_BUTTON: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Escape,
    Other,
}

/// Outcome of closing an open menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Selected(Selection),
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorAction {
    pub should_redraw: bool,
    pub hover_changed: bool,
}

impl CursorAction {
    pub fn new(should_redraw: bool, hover_changed: bool) -> Self {
        Self {
            should_redraw,
            hover_changed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Session {
    Closed,
    Open { center: Point },
}

/// A radial popup menu.
///
/// `I` is the rendered icon type cached per slice by the host's [`Rasterizer`].
pub struct Menu<I = ()> {
    slices: Vec<Slice<I>>,
    next_id: u64,
    geometry: RingGeometry,
    tracker: Tracker,
    scale_curve: ScaleCurve,
    session: Session,
    hover: Option<usize>,
    active: Option<SliceId>,
    clock: Box<dyn Clock>,
}

impl<I> Menu<I> {
    pub fn new(geometry: RingGeometry, mode: AnimationMode) -> Self {
        Self {
            slices: Vec::new(),
            next_id: 0,
            geometry,
            tracker: Tracker::new(mode),
            scale_curve: cosine_falloff,
            session: Session::Closed,
            hover: None,
            active: None,
            clock: Box::new(MonotonicClock::default()),
        }
    }

    pub fn create(outer: f64, inner: f64, mode: AnimationMode) -> Result<Self, MenuError> {
        Ok(Self::new(RingGeometry::new(outer, inner)?, mode))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_scale_curve(mut self, curve: ScaleCurve) -> Self {
        self.scale_curve = curve;
        self
    }

    pub fn append(
        &mut self,
        label: impl Into<SliceLabel>,
        icon: impl Into<IconPath>,
    ) -> Result<SliceId, MenuError> {
        self.ensure_closed("append a slice")?;

        let id = SliceId(self.next_id);
        self.next_id += 1;
        let index = self.slices.len();
        self.slices
            .push(Slice::new(id, label.into(), icon.into(), index));
        Ok(id)
    }

    /// Removes a slice and drops its cached icon. Returns whether it existed.
    pub fn remove(&mut self, id: SliceId) -> Result<bool, MenuError> {
        self.ensure_closed("remove a slice")?;

        let Some(pos) = self.slices.iter().position(|s| s.id() == id) else {
            return Ok(false);
        };
        self.slices.remove(pos);
        self.slices
            .iter_mut()
            .enumerate()
            .skip(pos)
            .for_each(|(i, s)| s.set_index(i));

        if self.active == Some(id) {
            self.active = None;
        }
        Ok(true)
    }

    fn ensure_closed(&self, action: &'static str) -> Result<(), MenuError> {
        if self.is_open() {
            Err(MenuError::InvalidState(action))
        } else {
            Ok(())
        }
    }

    pub fn slices(&self) -> &[Slice<I>] {
        &self.slices
    }

    pub fn slice(&self, id: SliceId) -> Option<&Slice<I>> {
        self.slices.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.slices.len(), self.tracker.rotation(), self.geometry)
    }

    pub fn hit_test(&self, angle: f64, radius: f64) -> Option<usize> {
        self.layout().hit_test(angle, radius)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.session, Session::Open { .. })
    }

    /// Centre of the open menu in surface coordinates.
    pub fn center(&self) -> Option<Point> {
        match self.session {
            Session::Open { center } => Some(center),
            Session::Closed => None,
        }
    }

    /// Opens the menu centred on `pointer` and grabs input.
    pub fn popup(&mut self, pointer: Point, surface: &mut dyn Surface) -> Result<(), MenuError> {
        if self.is_open() {
            log::debug!("popup ignored, menu already open");
            return Ok(());
        }
        if self.slices.is_empty() {
            return Err(MenuError::EmptyMenu);
        }

        self.tracker.reset();
        self.hover = None;
        self.session = Session::Open { center: pointer };

        surface.show(
            self.geometry.origin_for(pointer),
            self.geometry.surface_size(),
        );
        surface.grab_input();

        log::debug!(
            "menu open at ({:.0}, {:.0}) with {} slices",
            pointer.x,
            pointer.y,
            self.slices.len()
        );
        Ok(())
    }

    /// Closes the menu without a selection.
    pub fn popdown(&mut self, surface: &mut dyn Surface) -> Option<MenuEvent> {
        if !self.is_open() {
            return None;
        }
        self.close(surface);
        log::debug!("menu cancelled");
        Some(MenuEvent::Cancelled)
    }

    fn close(&mut self, surface: &mut dyn Surface) {
        surface.release_input();
        surface.hide();
        self.session = Session::Closed;
        self.hover = None;
        self.tracker.on_leave();
    }

    pub fn on_motion(&mut self, pointer: Point) -> CursorAction {
        let Some(center) = self.center() else {
            return CursorAction::default();
        };

        let now = self.clock.now_micros();
        if !self
            .tracker
            .sample(pointer.bearing_from(center), &self.geometry, now)
        {
            return CursorAction::default();
        }

        CursorAction::new(true, self.update_hover())
    }

    pub fn on_enter(&mut self) -> CursorAction {
        if !self.is_open() {
            return CursorAction::default();
        }
        self.tracker.on_enter();
        let changed = self.set_hover(None);
        CursorAction::new(changed, changed)
    }

    pub fn on_leave(&mut self) -> CursorAction {
        if !self.is_open() {
            return CursorAction::default();
        }
        self.tracker.on_leave();
        let changed = self.set_hover(None);
        CursorAction::new(changed, changed)
    }

    fn set_hover(&mut self, hover: Option<usize>) -> bool {
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    /// Commits the hovered slice on a primary release, cancels otherwise.
    /// Other buttons are ignored.
    pub fn on_button_release(
        &mut self,
        button: u32,
        surface: &mut dyn Surface,
    ) -> Option<MenuEvent> {
        if !self.is_open() || button != PRIMARY_BUTTON {
            return None;
        }

        let Some(selection) = self.hovered().map(Selection::from) else {
            return self.popdown(surface);
        };

        self.active = Some(selection.id);
        self.close(surface);
        log::debug!("selected slice '{}'", selection.label);
        Some(MenuEvent::Selected(selection))
    }

    pub fn on_key_press(&mut self, key: MenuKey, surface: &mut dyn Surface) -> Option<MenuEvent> {
        match key {
            MenuKey::Escape => self.popdown(surface),
            MenuKey::Other => None,
        }
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover
    }

    pub fn hovered(&self) -> Option<&Slice<I>> {
        self.hover.and_then(|i| self.slices.get(i))
    }

    /// The slice committed by the most recent selection.
    pub fn active_slice(&self) -> Option<&Slice<I>> {
        self.active.and_then(|id| self.slice(id))
    }

    /// Marks a slice active without a popup. Returns `false` for unknown ids.
    pub fn set_active(&mut self, id: SliceId) -> bool {
        let known = self.slice(id).is_some();
        if known {
            self.active = Some(id);
        }
        known
    }

    /// Changes the outer radius, keeping an open menu centred where it is.
    pub fn set_outer_radius(
        &mut self,
        outer: f64,
        surface: &mut dyn Surface,
    ) -> Result<(), MenuError> {
        self.geometry = self.geometry.with_outer(outer)?;

        if let Some(center) = self.center() {
            surface.move_to(
                self.geometry.origin_for(center),
                self.geometry.surface_size(),
            );
        }
        self.refit();
        Ok(())
    }

    pub fn set_inner_radius(&mut self, inner: f64) -> Result<(), MenuError> {
        self.geometry = self.geometry.with_inner(inner)?;
        self.refit();
        Ok(())
    }

    /// Re-runs the last pointer sample against the current ring.
    fn refit(&mut self) {
        if !self.is_open() {
            return;
        }
        self.tracker.refit(&self.geometry);
        self.update_hover();
    }

    fn update_hover(&mut self) -> bool {
        let hover = if self.tracker.is_over() {
            self.hit_test(self.tracker.mouse_angle(), self.tracker.mouse_distance())
        } else {
            None
        };
        self.set_hover(hover)
    }

    pub fn animation(&self) -> AnimationMode {
        self.tracker.mode()
    }

    pub fn set_animation(&mut self, mode: AnimationMode) {
        self.tracker.set_mode(mode);
        self.hover = None;
    }

    pub fn track_state(&self) -> TrackState {
        self.tracker.state()
    }

    /// Whether the pointer is on the ring.
    pub fn is_over(&self) -> bool {
        self.tracker.is_over()
    }

    /// Ring rotation in degrees, `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.tracker.rotation()
    }

    pub fn mouse_angle(&self) -> f64 {
        self.tracker.mouse_angle()
    }

    pub fn mouse_distance(&self) -> f64 {
        self.tracker.mouse_distance()
    }

    /// Animation scale factor for the icon of slice `index`.
    pub fn slice_scale(&self, index: usize) -> f64 {
        let mode = self.tracker.mode();
        if !self.tracker.is_over() || !mode.scales() || index >= self.slices.len() {
            return 1.0;
        }
        if mode == AnimationMode::Pulse && self.hover != Some(index) {
            return 1.0;
        }

        let center = rad_to_deg(self.layout().span(index).center());
        (self.scale_curve)(angular_distance(center, self.tracker.mouse_angle()))
    }

    /// Loads every icon not cached yet. Failures leave the slice iconless.
    pub fn ensure_icons<R>(&mut self, rasterizer: &R) -> Vec<MenuError>
    where
        R: Rasterizer<Icon = I> + ?Sized,
    {
        self.slices
            .iter_mut()
            .filter_map(|s| s.ensure_icon(rasterizer).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::ManualClock;
    use crate::geometry::deg_to_rad;
    use crate::icon::tests::FakeRasterizer;
    use crate::surface::tests::{Call, RecordingSurface};

    const CENTER: Point = Point { x: 500.0, y: 400.0 };

    struct Fixture {
        menu: Menu<String>,
        surface: RecordingSurface,
        clock: ManualClock,
    }

    impl Fixture {
        fn new(mode: AnimationMode, labels: &[&str]) -> Self {
            let clock = ManualClock::default();
            let mut menu = Menu::create(150.0, 60.0, mode)
                .unwrap()
                .with_clock(clock.clone());
            for label in labels {
                menu.append(*label, format!("{label}.svg").as_str()).unwrap();
            }
            Self {
                menu,
                surface: RecordingSurface::default(),
                clock,
            }
        }

        fn open(&mut self) {
            self.menu.popup(CENTER, &mut self.surface).unwrap();
        }

        /// Pointer sample at a compass bearing, one throttle interval later.
        fn point(&mut self, distance: f64, degrees: f64) -> CursorAction {
            self.clock.advance_ms(40);
            let p = Point::at_bearing(CENTER, distance, deg_to_rad(degrees));
            self.menu.on_motion(p)
        }

        fn release(&mut self, button: u32) -> Option<MenuEvent> {
            self.menu.on_button_release(button, &mut self.surface)
        }

        fn hovered_label(&self) -> Option<&str> {
            self.menu.hovered().map(|s| s.label().as_str())
        }
    }

    #[test]
    fn test_select_after_reentry() {
        let mut f = Fixture::new(AnimationMode::CounterRotate, &["A", "B", "C", "D"]);
        f.open();

        f.point(100.0, 10.0);
        assert!(f.menu.is_over());
        assert_eq!(f.hovered_label(), Some("A"));
        let framing = f.menu.rotation();

        f.point(30.0, 10.0);
        assert!(!f.menu.is_over());
        assert_eq!(f.hovered_label(), None);

        f.point(100.0, 100.0);
        assert!(f.menu.is_over());
        assert_eq!(f.hovered_label(), Some("B"));
        assert!((f.menu.rotation() - framing).abs() < 1e-9);

        let event = f.release(PRIMARY_BUTTON);
        let Some(MenuEvent::Selected(sel)) = event else {
            panic!("expected a selection, got {event:?}");
        };
        assert_eq!(sel.label.as_str(), "B");
        assert_eq!(sel.index, 1);
        assert!(!f.menu.is_open());
        assert_eq!(
            f.menu.active_slice().map(|s| s.label().as_str()),
            Some("B")
        );
        assert_eq!(f.surface.count(&Call::Grab), 1);
        assert_eq!(f.surface.count(&Call::Release), 1);
    }

    #[test]
    fn test_popup_requires_slices() {
        let mut f = Fixture::new(AnimationMode::None, &[]);
        assert!(matches!(
            f.menu.popup(CENTER, &mut f.surface),
            Err(MenuError::EmptyMenu)
        ));
        assert!(!f.menu.is_open());
        assert!(f.surface.calls.is_empty());
    }

    #[test]
    fn test_popup_shows_centered_and_grabs() {
        let mut f = Fixture::new(AnimationMode::None, &["A"]);
        f.open();
        assert_eq!(
            f.surface.calls,
            vec![Call::Show(Point::new(350.0, 250.0), 300.0), Call::Grab]
        );
        assert_eq!(f.menu.center(), Some(CENTER));
    }

    #[test]
    fn test_grab_paired_once() {
        let mut f = Fixture::new(AnimationMode::None, &["A"]);
        f.open();
        f.open();
        assert_eq!(f.menu.popdown(&mut f.surface), Some(MenuEvent::Cancelled));
        assert_eq!(f.menu.popdown(&mut f.surface), None);

        assert_eq!(f.surface.count(&Call::Grab), 1);
        assert_eq!(f.surface.count(&Call::Release), 1);
        assert_eq!(f.surface.count(&Call::Hide), 1);
    }

    #[test]
    fn test_layout_frozen_while_open() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B"]);
        let b = f.menu.slices()[1].id();
        f.open();

        assert!(matches!(
            f.menu.append("C", "c.svg"),
            Err(MenuError::InvalidState(_))
        ));
        assert!(matches!(f.menu.remove(b), Err(MenuError::InvalidState(_))));
        assert_eq!(f.menu.len(), 2);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B", "C"]);
        let a = f.menu.slices()[0].id();
        f.menu.set_active(a);

        assert!(f.menu.remove(a).unwrap());
        assert!(!f.menu.remove(a).unwrap());

        let indices: Vec<_> = f.menu.slices().iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(f.menu.slices()[0].label().as_str(), "B");
        assert!(f.menu.active_slice().is_none());
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut f = Fixture::new(AnimationMode::CounterRotate, &["A", "B"]);
        let a = f.menu.slices()[0].id();
        f.menu.set_active(a);
        f.open();
        f.point(20.0, 45.0);

        assert_eq!(f.release(PRIMARY_BUTTON), Some(MenuEvent::Cancelled));
        assert!(!f.menu.is_open());
        assert_eq!(f.menu.active_slice().map(|s| s.id()), Some(a));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B"]);
        f.open();
        f.point(100.0, 45.0);

        assert_eq!(f.release(2), None);
        assert_eq!(f.release(3), None);
        assert!(f.menu.is_open());
        assert!(f.menu.active_slice().is_none());
    }

    #[test]
    fn test_escape_cancels() {
        let mut f = Fixture::new(AnimationMode::None, &["A"]);
        f.open();
        assert_eq!(f.menu.on_key_press(MenuKey::Other, &mut f.surface), None);
        assert_eq!(
            f.menu.on_key_press(MenuKey::Escape, &mut f.surface),
            Some(MenuEvent::Cancelled)
        );
    }

    #[test]
    fn test_events_ignored_while_closed() {
        let mut f = Fixture::new(AnimationMode::None, &["A"]);
        assert_eq!(f.point(100.0, 10.0), CursorAction::default());
        assert_eq!(f.release(PRIMARY_BUTTON), None);
        assert_eq!(f.menu.on_enter(), CursorAction::default());
        assert!(f.surface.calls.is_empty());
    }

    #[test]
    fn test_motion_throttled() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B", "C", "D"]);
        f.open();
        assert!(f.point(100.0, 10.0).should_redraw);

        f.clock.advance_ms(5);
        let p = Point::at_bearing(CENTER, 100.0, deg_to_rad(200.0));
        assert_eq!(f.menu.on_motion(p), CursorAction::default());
        assert_eq!(f.hovered_label(), Some("A"));

        f.clock.advance_ms(30);
        assert_eq!(f.menu.on_motion(p), CursorAction::new(true, true));
        assert_eq!(f.hovered_label(), Some("C"));
    }

    #[test]
    fn test_hover_follows_rotation() {
        let mut f = Fixture::new(AnimationMode::CounterRotate, &["A", "B", "C", "D"]);
        f.open();
        f.point(100.0, 80.0);
        assert_eq!(f.hovered_label(), Some("A"));

        // the ring turns back 20°, so A now spans [340, 70) and 100° is on B
        f.point(100.0, 100.0);
        assert!((f.menu.rotation() - 340.0).abs() < 1e-9);
        assert_eq!(f.hovered_label(), Some("B"));
    }

    #[test]
    fn test_leave_clears_hover() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B"]);
        f.open();
        f.point(100.0, 10.0);
        assert_eq!(f.menu.on_leave(), CursorAction::new(true, true));
        assert_eq!(f.hovered_label(), None);
        assert!(!f.menu.is_over());
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut f = Fixture::new(AnimationMode::None, &["A"]);
        f.menu
            .set_outer_radius(200.0, &mut f.surface)
            .unwrap();
        assert!(f.surface.calls.is_empty());

        f.open();
        f.menu
            .set_outer_radius(100.0, &mut f.surface)
            .unwrap();
        assert_eq!(
            f.surface.calls.last(),
            Some(&Call::Move(Point::new(400.0, 300.0), 200.0))
        );

        assert!(matches!(
            f.menu.set_inner_radius(120.0),
            Err(MenuError::Geometry(_))
        ));
        assert_eq!(f.menu.geometry().inner(), 60.0);
    }

    #[test]
    fn test_rotation_survives_surface_leave() {
        let mut f = Fixture::new(AnimationMode::CounterRotate, &["A", "B", "C", "D"]);
        f.open();
        f.point(100.0, 10.0);
        f.point(100.0, 70.0);
        let rotation = f.menu.rotation();

        f.menu.on_leave();
        f.point(100.0, 200.0);
        assert!(f.menu.is_over());
        assert!((f.menu.rotation() - rotation).abs() < 1e-9);
    }

    #[test]
    fn test_shrinking_ring_drops_hover() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B", "C", "D"]);
        f.open();
        f.point(140.0, 10.0);
        assert_eq!(f.hovered_label(), Some("A"));

        f.menu.set_outer_radius(120.0, &mut f.surface).unwrap();
        assert_eq!(f.hovered_label(), None);
        assert!(!f.menu.is_over());

        f.menu.set_outer_radius(150.0, &mut f.surface).unwrap();
        assert_eq!(f.hovered_label(), Some("A"));

        f.menu.set_outer_radius(120.0, &mut f.surface).unwrap();
        assert_eq!(f.release(PRIMARY_BUTTON), Some(MenuEvent::Cancelled));
        assert!(f.menu.active_slice().is_none());
    }

    #[test]
    fn test_growing_dead_zone_drops_hover() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B"]);
        f.open();
        f.point(70.0, 10.0);
        assert_eq!(f.hovered_label(), Some("A"));

        f.menu.set_inner_radius(100.0).unwrap();
        assert_eq!(f.hovered_label(), None);
    }

    #[test]
    fn test_set_animation_resets_tracking() {
        let mut f = Fixture::new(AnimationMode::CounterRotate, &["A", "B", "C", "D"]);
        f.open();
        f.point(100.0, 10.0);
        f.point(100.0, 40.0);
        assert_eq!(f.menu.track_state(), TrackState::Tracking);
        let rotation = f.menu.rotation();

        f.menu.set_animation(AnimationMode::Pulse);
        assert_eq!(f.menu.animation(), AnimationMode::Pulse);
        assert_eq!(f.menu.track_state(), TrackState::Idle);
        assert_eq!(f.hovered_label(), None);

        f.point(100.0, 200.0);
        assert_eq!(f.menu.track_state(), TrackState::Hovering);
        assert_eq!(f.menu.rotation(), rotation);
    }

    #[test]
    fn test_icon_scale_peaks_under_pointer() {
        let mut f = Fixture::new(AnimationMode::IconScale, &["A", "B", "C", "D"]);
        f.open();
        assert_eq!(f.menu.slice_scale(0), 1.0);

        f.point(100.0, 45.0);
        assert!((f.menu.slice_scale(0) - 1.5).abs() < 1e-9);
        assert!((f.menu.slice_scale(2) - 1.0).abs() < 1e-9);
        assert!(f.menu.slice_scale(1) > 1.0 && f.menu.slice_scale(1) < 1.5);
    }

    #[test]
    fn test_pulse_scales_hovered_only() {
        let mut f = Fixture::new(AnimationMode::Pulse, &["A", "B", "C", "D"]);
        f.open();
        f.point(100.0, 45.0);
        assert!((f.menu.slice_scale(0) - 1.5).abs() < 1e-9);
        assert_eq!(f.menu.slice_scale(1), 1.0);
    }

    #[test]
    fn test_custom_scale_curve() {
        fn double(_: f64) -> f64 {
            2.0
        }
        let clock = ManualClock::default();
        let mut menu: Menu = Menu::create(150.0, 60.0, AnimationMode::IconScale)
            .unwrap()
            .with_clock(clock)
            .with_scale_curve(double);
        menu.append("A", "a.svg").unwrap();
        let mut surface = RecordingSurface::default();
        menu.popup(CENTER, &mut surface).unwrap();
        menu.on_motion(Point::at_bearing(CENTER, 100.0, 1.0));
        assert_eq!(menu.slice_scale(0), 2.0);
    }

    #[test]
    fn test_ensure_icons_reports_failures() {
        let mut f = Fixture::new(AnimationMode::None, &["A", "B"]);
        let raster = FakeRasterizer::new(&["A.svg"], None);

        let errors = f.menu.ensure_icons(&raster);
        assert_eq!(errors.len(), 1);
        assert!(f.menu.slices()[0].icon().is_some());
        assert!(f.menu.slices()[1].icon().is_none());
        assert!(f.menu.ensure_icons(&raster).is_empty());
    }
}
