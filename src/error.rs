use crate::slice::IconPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Cannot pop up a menu without slices")]
    EmptyMenu,
    #[error("Cannot {0} while the menu is open")]
    InvalidState(&'static str),
    #[error("Failed to load icon '{path}' and its fallback: {source}")]
    IconLoad {
        path: IconPath,
        #[source]
        source: IconError,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Inner radius {inner} must be smaller than outer radius {outer}")]
    InnerNotBelowOuter { inner: f64, outer: f64 },
    #[error("{name} {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Error)]
pub enum IconError {
    #[error("No icon found at '{0}'")]
    NotFound(IconPath),
    #[error("Icon '{path}' could not be decoded: {reason}")]
    Decode { path: IconPath, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
