//! Radial popup menu model.
//!
//! A [`Menu`] is a ring of slices around the point where it popped up. Pointer
//! samples are mapped to a slice by angle, and in counter-rotate mode the whole
//! ring turns against the pointer so the next slice comes to meet it. Drawing,
//! windowing and icon decoding are left to the host through [`Surface`] and
//! [`Rasterizer`].

pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod icon;
pub mod layout;
pub mod macros;
pub mod menu;
pub mod motion;
pub mod slice;
pub mod surface;

pub use animation::{AnimationMode, ScaleCurve};
pub use clock::{Clock, MonotonicClock};
pub use error::{GeometryError, IconError, MenuError};
pub use geometry::{Point, Polar};
pub use icon::Rasterizer;
pub use layout::{ArcSpan, IconPlacement, Layout, RingGeometry};
pub use menu::{CursorAction, Menu, MenuEvent, MenuKey, PRIMARY_BUTTON};
pub use slice::{IconPath, Selection, Slice, SliceId, SliceLabel};
pub use surface::Surface;
