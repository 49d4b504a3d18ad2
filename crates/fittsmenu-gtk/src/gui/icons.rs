use fittsmenu::{IconError, IconPath, Rasterizer};
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const ICON_SIZE: i32 = 128;
pub const MISSING_ICON: &str = "image-missing";

static RESOLVED: OnceLock<RwLock<HashMap<IconPath, Option<PathBuf>>>> = OnceLock::new();

/// Resolves an icon reference to a file: absolute paths are used as they are,
/// anything else is looked up in the icon theme. Lookups are memoized.
pub fn find_icon_path(icon: &IconPath) -> Option<PathBuf> {
    if icon.is_empty() {
        return None;
    }

    let cache = RESOLVED.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(hit) = cache.read().get(icon) {
        return hit.clone();
    }

    let path = Path::new(icon.as_str());
    let resolved = if path.is_absolute() {
        path.exists().then(|| path.to_path_buf())
    } else {
        lookup(icon.as_str()).with_size(512).with_scale(1).find()
    };

    cache.write().insert(icon.clone(), resolved.clone());
    resolved
}

#[derive(Debug, Clone)]
pub struct PixbufRasterizer {
    fallback: IconPath,
}

impl PixbufRasterizer {
    pub fn new(fallback: Option<IconPath>) -> Self {
        Self {
            fallback: fallback.unwrap_or_else(|| IconPath::from(MISSING_ICON)),
        }
    }
}

impl Rasterizer for PixbufRasterizer {
    type Icon = Pixbuf;

    fn load(&self, icon: &IconPath) -> Result<Pixbuf, IconError> {
        let path = find_icon_path(icon).ok_or_else(|| IconError::NotFound(icon.clone()))?;
        Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true).map_err(|e| {
            IconError::Decode {
                path: icon.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn fallback(&self) -> Option<IconPath> {
        Some(self.fallback.clone())
    }

    fn dimensions(&self, icon: &Pixbuf) -> (f64, f64) {
        (icon.width() as f64, icon.height() as f64)
    }
}
