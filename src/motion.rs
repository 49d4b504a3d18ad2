//! Pointer tracking and counter-rotation.
//!
//! Every accepted pointer sample moves the tracker between three states:
//!
//! * `Idle`: the pointer is off the ring (dead zone or beyond the rim).
//! * `Hovering`: the pointer is on the ring and the menu does not rotate.
//! * `Tracking`: the pointer is on the ring and the ring counter-rotates.
//!
//! Leaving the ring records the current rotation as the offset, so that
//! re-entering continues from the same rotation instead of jumping.

use crate::animation::AnimationMode;
use crate::clock::Throttle;
use crate::geometry::{Polar, normalize_degrees};
use crate::layout::RingGeometry;

/// Minimum time between two accepted pointer samples (~30 Hz).
pub const SAMPLE_INTERVAL_MICROS: i64 = 33_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    #[default]
    Idle,
    Hovering,
    Tracking,
}

#[derive(Debug, Clone)]
pub struct Tracker {
    state: TrackState,
    mode: AnimationMode,
    mouse_angle: f64,
    mouse_distance: f64,
    rotation: f64,
    offset: f64,
    diff: f64,
    throttle: Throttle,
}

impl Tracker {
    pub fn new(mode: AnimationMode) -> Self {
        Self {
            state: TrackState::Idle,
            mode,
            mouse_angle: 0.0,
            mouse_distance: 0.0,
            rotation: 0.0,
            offset: 0.0,
            diff: 0.0,
            throttle: Throttle::new(SAMPLE_INTERVAL_MICROS),
        }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Whether the pointer is currently on the ring.
    pub fn is_over(&self) -> bool {
        self.state != TrackState::Idle
    }

    /// Current ring rotation in degrees, `[0, 360)`.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn mouse_angle(&self) -> f64 {
        self.mouse_angle
    }

    pub fn mouse_distance(&self) -> f64 {
        self.mouse_distance
    }

    pub fn set_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
        self.offset = self.rotation;
        self.diff = 0.0;
        self.state = TrackState::Idle;
    }

    /// Feeds one pointer sample taken at `now` (µs). Returns `false` when the
    /// sample was dropped by the throttle, in which case nothing changed.
    pub fn sample(&mut self, pointer: Polar, geometry: &RingGeometry, now: i64) -> bool {
        if !self.throttle.accept(now) {
            return false;
        }

        self.mouse_angle = pointer.angle_degrees();
        self.mouse_distance = pointer.radius;
        self.update(geometry);
        true
    }

    /// Re-evaluates the last accepted sample against a resized ring.
    pub fn refit(&mut self, geometry: &RingGeometry) {
        self.update(geometry);
    }

    fn update(&mut self, geometry: &RingGeometry) {
        if !geometry.on_ring(self.mouse_distance) {
            self.leave_ring();
            return;
        }

        if self.mode.rotates() {
            if self.state != TrackState::Tracking {
                self.diff = normalize_degrees(-(self.offset + self.mouse_angle));
                self.state = TrackState::Tracking;
            }
            self.rotation = normalize_degrees(-(self.mouse_angle + self.diff));
        } else if self.state == TrackState::Idle {
            self.state = TrackState::Hovering;
        }

        log::trace!(
            "pointer {:.1}° @ {:.1}, rotation {:.1}°, {:?}",
            self.mouse_angle,
            self.mouse_distance,
            self.rotation,
            self.state
        );
    }

    fn leave_ring(&mut self) {
        if self.mode.rotates() {
            self.offset = self.rotation;
            self.diff = 0.0;
        }
        self.state = TrackState::Idle;
    }

    /// The pointer crossed into the menu surface.
    pub fn on_enter(&mut self) {
        self.offset = self.rotation;
        self.state = TrackState::Idle;
    }

    /// The pointer crossed out of the menu surface.
    pub fn on_leave(&mut self) {
        self.leave_ring();
    }

    /// Back to the initial state for a fresh popup, keeping the rotation.
    pub fn reset(&mut self) {
        self.state = TrackState::Idle;
        self.offset = self.rotation;
        self.diff = 0.0;
        self.throttle.reset();
    }
}
