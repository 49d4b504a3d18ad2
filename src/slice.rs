use crate::error::{IconError, MenuError};
use crate::icon::Rasterizer;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct SliceId(pub(crate) u64);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SliceLabel(String);

crate::impl_string_newtype!(SliceLabel);

/// Opaque icon reference, resolved by the host's [`Rasterizer`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconPath(String);

crate::impl_string_newtype!(IconPath);

/// Rendered-icon cache of a single slice.
#[derive(Debug, Default)]
pub enum IconSlot<I> {
    #[default]
    Pending,
    Ready(I),
    /// Both the icon and the fallback failed; the slice draws without one.
    Missing,
}

#[derive(Debug)]
pub struct Slice<I = ()> {
    id: SliceId,
    label: SliceLabel,
    icon: IconPath,
    index: usize,
    rendered: IconSlot<I>,
}

impl<I> Slice<I> {
    pub(crate) fn new(id: SliceId, label: SliceLabel, icon: IconPath, index: usize) -> Self {
        Self {
            id,
            label,
            icon,
            index,
            rendered: IconSlot::Pending,
        }
    }

    pub fn id(&self) -> SliceId {
        self.id
    }

    pub fn label(&self) -> &SliceLabel {
        &self.label
    }

    pub fn icon_path(&self) -> &IconPath {
        &self.icon
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn icon(&self) -> Option<&I> {
        match &self.rendered {
            IconSlot::Ready(icon) => Some(icon),
            _ => None,
        }
    }

    pub fn icon_slot(&self) -> &IconSlot<I> {
        &self.rendered
    }

    /// Populates the icon cache on first use, substituting the rasterizer's
    /// fallback when the slice's own icon cannot be loaded.
    ///
    /// The error is reported once; afterwards the slice stays iconless.
    pub fn ensure_icon<R>(&mut self, rasterizer: &R) -> Result<(), MenuError>
    where
        R: Rasterizer<Icon = I> + ?Sized,
    {
        if !matches!(self.rendered, IconSlot::Pending) {
            return Ok(());
        }

        match self.load_with_fallback(rasterizer) {
            Ok(icon) => {
                self.rendered = IconSlot::Ready(icon);
                Ok(())
            }
            Err(source) => {
                self.rendered = IconSlot::Missing;
                Err(MenuError::IconLoad {
                    path: self.icon.clone(),
                    source,
                })
            }
        }
    }

    fn load_with_fallback<R>(&self, rasterizer: &R) -> Result<I, IconError>
    where
        R: Rasterizer<Icon = I> + ?Sized,
    {
        let err = match rasterizer.load(&self.icon) {
            Ok(icon) => return Ok(icon),
            Err(e) => e,
        };

        let Some(fallback) = rasterizer.fallback() else {
            return Err(err);
        };

        log::warn!(
            "Slice '{}': icon '{}' unavailable ({}), using '{}'",
            self.label,
            self.icon,
            err,
            fallback
        );
        rasterizer.load(&fallback)
    }
}

/// Owned copy of a committed slice, handed to the caller on selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: SliceId,
    pub index: usize,
    pub label: SliceLabel,
    pub icon: IconPath,
}

impl<I> From<&Slice<I>> for Selection {
    fn from(slice: &Slice<I>) -> Self {
        Self {
            id: slice.id,
            index: slice.index,
            label: slice.label.clone(),
            icon: slice.icon.clone(),
        }
    }
}
