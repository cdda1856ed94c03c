//! Decoded image data.

use crate::{
    geometry::Extent,
    layout::Layout,
    shape::{ImageDimensions, ViewType},
    texels::Texels,
};

/// A decoded texture: typed texels for every level, layer and face, plus the
/// layout needed to upload them.
///
/// The texels hold the full mip chain in canonical order; the dimensions
/// describe the base level with layers and faces folded into the spare axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    dimensions: ImageDimensions,
    layout: Layout,
    texels: Texels,
    missing_images: u32,
}

impl ImageData {
    pub(crate) fn new(
        dimensions: ImageDimensions,
        layout: Layout,
        texels: Texels,
        missing_images: u32,
    ) -> Self {
        Self {
            dimensions,
            layout,
            texels,
            missing_images,
        }
    }

    /// Array shape of the base level.
    #[must_use]
    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Width, height and depth of the base level (absent axes are 1).
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.dimensions.extent()
    }

    /// Layout descriptor.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Shortcut for `layout().view_type`.
    #[must_use]
    pub fn view_type(&self) -> ViewType {
        self.layout.view_type
    }

    /// The texel storage.
    #[must_use]
    pub fn texels(&self) -> &Texels {
        &self.texels
    }

    /// Take ownership of the texel storage.
    #[must_use]
    pub fn into_texels(self) -> Texels {
        self.texels
    }

    /// Number of images the source container could not fully supply. Their
    /// regions are zero-filled.
    #[must_use]
    pub fn missing_images(&self) -> u32 {
        self.missing_images
    }

    /// Whether every image was copied from the source.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_images == 0
    }
}
