use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationMode {
    #[strum(to_string = "none", serialize = "off", serialize = "0")]
    None,
    /// The ring turns against the pointer so the nearest slice comes to it.
    #[default]
    #[strum(to_string = "counter-rotate", serialize = "crotate", serialize = "1")]
    CounterRotate,
    /// Every icon is scaled by its angular distance to the pointer.
    #[strum(to_string = "icon-scale", serialize = "iscale", serialize = "2")]
    IconScale,
    /// Only the hovered icon is scaled.
    #[strum(to_string = "pulse", serialize = "3")]
    Pulse,
}

impl AnimationMode {
    pub fn rotates(&self) -> bool {
        matches!(self, Self::CounterRotate)
    }

    pub fn scales(&self) -> bool {
        matches!(self, Self::IconScale | Self::Pulse)
    }
}

/// Maps the angular distance between the pointer and a slice centre
/// (degrees, `[0, 180]`) to an icon scale factor.
pub type ScaleCurve = fn(f64) -> f64;

/// 1.5 under the pointer, easing to 1.0 on the opposite side.
pub fn cosine_falloff(distance: f64) -> f64 {
    let half = (distance.clamp(0.0, 180.0) / 2.0).to_radians();
    1.0 + 0.5 * half.cos().powi(2)
}

/// Leaves every icon at its base size.
pub fn flat(_distance: f64) -> f64 {
    1.0
}
