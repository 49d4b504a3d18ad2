//! Angular helpers shared by hit-testing and rendering.
//!
//! Two angle units are in play: radians for arc geometry and degrees for the
//! tracked pointer and rotation state. Conversions happen at the call site.

use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance and compass bearing of `self` as seen from `center`.
    ///
    /// The bearing is 0 at 12 o'clock and grows clockwise on screen, in radians.
    pub fn bearing_from(&self, center: Point) -> Polar {
        cartesian_to_polar(center.y - self.y, self.x - center.x)
    }

    /// Inverse of [`Point::bearing_from`].
    pub fn at_bearing(center: Point, radius: f64, angle: f64) -> Self {
        let (up, right) = polar_to_cartesian(radius, angle);
        Self::new(center.x + right, center.y - up)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    pub radius: f64,
    /// Radians in `[0, 2π)`.
    pub angle: f64,
}

impl Polar {
    pub fn angle_degrees(&self) -> f64 {
        rad_to_deg(self.angle)
    }
}

pub fn cartesian_to_polar(x: f64, y: f64) -> Polar {
    if x == 0.0 && y == 0.0 {
        return Polar::default();
    }

    let mut angle = y.atan2(x);
    if angle < 0.0 {
        angle += TAU;
    }
    // atan2 can hand back -0.0 or a value that rounds up to exactly 2π
    if angle >= TAU {
        angle = 0.0;
    }

    Polar {
        radius: x.hypot(y),
        angle,
    }
}

pub fn polar_to_cartesian(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Angles this close below a full turn are treated as a full turn.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to 360.0 and keeps the sign of -0.0
    if wrapped == 0.0 || wrapped >= 360.0 - FULL_TURN_EPSILON {
        0.0
    } else {
        wrapped
    }
}

/// Shortest way around the circle between two bearings, in `[0, 180]` degrees.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let delta = (normalize_degrees(a) - normalize_degrees(b)).abs();
    delta.min(360.0 - delta)
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Maps a compass bearing (0 at 12 o'clock) to the drawing-surface convention
/// (0 at 3 o'clock, clockwise), both in radians.
pub fn bearing_to_surface(angle: f64) -> f64 {
    angle - PI / 2.0
}
