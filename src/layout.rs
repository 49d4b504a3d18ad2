use crate::error::GeometryError;
use crate::geometry::{Point, deg_to_rad, normalize_degrees, rad_to_deg};
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

pub const DEFAULT_OUTER_RADIUS: f64 = 150.0;
pub const DEFAULT_INNER_RADIUS: f64 = 60.0;
pub const OUTER_RADIUS_RANGE: RangeInclusive<f64> = 80.0..=300.0;
pub const INNER_RADIUS_RANGE: RangeInclusive<f64> = 20.0..=260.0;
/// Hysteresis band below the inner radius that still counts as on the ring.
pub const DEAD_ZONE_MARGIN: f64 = 10.0;
/// Gap between the outer radius and the drawn outer edge of a slice.
pub const RIM_INSET: f64 = 3.0;
/// Icons are sized against this many slices filling the circle.
pub const REFERENCE_SLICE_COUNT: f64 = 13.0;
pub const ICON_BASE_SIZE: f64 = 32.0;
pub const ICON_RIM_GAP: f64 = 4.0;

/// Outer and inner (dead zone) radius of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    outer: f64,
    inner: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            outer: DEFAULT_OUTER_RADIUS,
            inner: DEFAULT_INNER_RADIUS,
        }
    }
}

impl RingGeometry {
    pub fn new(outer: f64, inner: f64) -> Result<Self, GeometryError> {
        check_range("outer radius", outer, &OUTER_RADIUS_RANGE)?;
        check_range("inner radius", inner, &INNER_RADIUS_RANGE)?;
        if inner >= outer {
            return Err(GeometryError::InnerNotBelowOuter { inner, outer });
        }
        Ok(Self { outer, inner })
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    pub fn inner(&self) -> f64 {
        self.inner
    }

    pub fn with_outer(&self, outer: f64) -> Result<Self, GeometryError> {
        Self::new(outer, self.inner)
    }

    pub fn with_inner(&self, inner: f64) -> Result<Self, GeometryError> {
        Self::new(self.outer, inner)
    }

    /// Whether a pointer at `radius` from the centre is on the active ring.
    pub fn on_ring(&self, radius: f64) -> bool {
        radius >= self.inner - DEAD_ZONE_MARGIN && radius <= self.outer
    }

    /// Radius of the centre disc, which is also the drawn inner edge of the slices.
    pub fn hub_radius(&self) -> f64 {
        self.inner - DEAD_ZONE_MARGIN
    }

    pub fn rim_radius(&self) -> f64 {
        self.outer - RIM_INSET
    }

    /// Side length of the square surface the menu occupies.
    pub fn surface_size(&self) -> f64 {
        self.outer * 2.0
    }

    /// Top-left corner of the surface for a menu centred on `center`.
    pub fn origin_for(&self, center: Point) -> Point {
        center.offset(-self.outer, -self.outer)
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), GeometryError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Angular interval `[start, end)` in compass radians. `end` may exceed 2π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub end: f64,
}

impl ArcSpan {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        self.start + self.width() / 2.0
    }

    /// `(start, end)` in degrees, with `start` in `[0, 360)` and `end > start`.
    pub fn to_degrees(&self) -> (f64, f64) {
        let start = normalize_degrees(rad_to_deg(self.start));
        (start, start + rad_to_deg(self.width()))
    }

    pub fn contains_degrees(&self, angle: f64) -> bool {
        let (start, end) = self.to_degrees();
        let mut angle = normalize_degrees(angle);
        // spans crossing 0° are compared one turn up
        if angle < start {
            angle += 360.0;
        }
        angle < end
    }
}

/// Slice arrangement for a given slice count and rotation.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    count: usize,
    rotation: f64,
    geometry: RingGeometry,
}

impl Layout {
    pub fn new(count: usize, rotation_degrees: f64, geometry: RingGeometry) -> Self {
        Self {
            count,
            rotation: normalize_degrees(rotation_degrees),
            geometry,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    /// Angular width of one slice in radians.
    pub fn step(&self) -> f64 {
        debug_assert!(self.count > 0, "layout of an empty menu");
        TAU / self.count as f64
    }

    pub fn span(&self, index: usize) -> ArcSpan {
        debug_assert!(index < self.count);
        let base = deg_to_rad(self.rotation);
        let step = self.step();
        ArcSpan {
            start: base + index as f64 * step,
            end: base + (index + 1) as f64 * step,
        }
    }

    pub fn spans(&self) -> impl Iterator<Item = ArcSpan> + '_ {
        (0..self.count).map(move |i| self.span(i))
    }

    /// Slice under a pointer at `angle` degrees and `radius` from the centre.
    pub fn hit_test(&self, angle: f64, radius: f64) -> Option<usize> {
        if self.count == 0 || !self.geometry.on_ring(radius) {
            return None;
        }

        let step = rad_to_deg(self.step());
        let relative = normalize_degrees(angle - self.rotation);
        let index = (relative / step).floor() as usize;
        Some(index.min(self.count - 1))
    }

    /// Where and how large to draw an icon of intrinsic `size` in slice `index`.
    pub fn icon_placement(
        &self,
        index: usize,
        center: Point,
        size: (f64, f64),
        animation_scale: f64,
    ) -> IconPlacement {
        let (w, h) = size;
        let longest = w.max(h);
        let fit = if longest > 0.0 {
            ICON_BASE_SIZE / longest
        } else {
            0.0
        };
        let arc_scale = self.step() / (TAU / REFERENCE_SLICE_COUNT);
        let scale = fit * arc_scale * animation_scale;

        let (width, height) = (w * scale, h * scale);
        let distance = self.geometry.outer() - width.hypot(height) / 2.0 - ICON_RIM_GAP;
        let icon_center = Point::at_bearing(center, distance, self.span(index).center());

        IconPlacement {
            origin: icon_center.offset(-width / 2.0, -height / 2.0),
            center: icon_center,
            scale,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconPlacement {
    pub origin: Point,
    pub center: Point,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}
