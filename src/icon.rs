use crate::error::IconError;
use crate::slice::IconPath;

/// Host capability that turns an icon reference into a drawable resource.
pub trait Rasterizer {
    type Icon;

    fn load(&self, path: &IconPath) -> Result<Self::Icon, IconError>;

    /// Icon substituted when a slice's own icon fails to load.
    fn fallback(&self) -> Option<IconPath>;

    /// Intrinsic pixel size `(width, height)` of a loaded icon.
    fn dimensions(&self, icon: &Self::Icon) -> (f64, f64);
}

/// Rasterizer for menus that draw labels only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl Rasterizer for NoIcons {
    type Icon = ();

    fn load(&self, path: &IconPath) -> Result<(), IconError> {
        Err(IconError::NotFound(path.clone()))
    }

    fn fallback(&self) -> Option<IconPath> {
        None
    }

    fn dimensions(&self, _icon: &()) -> (f64, f64) {
        (0.0, 0.0)
    }
}
