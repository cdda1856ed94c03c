//! The container seam between a format parser and the decoder.
//!
//! A container parser (for example a KTX2 reader) exposes its header metadata
//! as a [`ContainerInfo`] and answers image-offset queries. The decoder never
//! looks at container bytes beyond what these two entry points hand it.

use crate::format::VkFormat;

/// Per-axis reading direction of the stored texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Columns run left to right.
    pub x_right: bool,
    /// Rows run top to bottom.
    pub y_down: bool,
    /// Slices run towards the viewer.
    pub z_out: bool,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            x_right: true,
            y_down: true,
            z_out: true,
        }
    }
}

/// Header metadata reported by a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Base width in texels.
    pub width: u32,
    /// Base height in texels.
    pub height: u32,
    /// Base depth in texels.
    pub depth: u32,
    /// Number of mip levels stored.
    pub level_count: u32,
    /// Number of array layers (1 for non-array textures).
    pub layer_count: u32,
    /// Number of faces (6 for cubemaps, otherwise 1).
    pub face_count: u32,
    /// Logical dimensionality. Valid values are 1, 2 and 3.
    pub dimensions: u32,
    /// Whether the faces form a cubemap.
    pub is_cubemap: bool,
    /// Whether the texel data is block-compressed.
    pub is_compressed: bool,
    /// Bytes per texel, or per block for compressed formats.
    pub element_size: u32,
    /// Format of the texel data.
    pub format: VkFormat,
    /// Stored reading direction.
    pub orientation: Orientation,
}

impl ContainerInfo {
    /// Metadata for a single-level, single-layer texture of the given format.
    ///
    /// Element size and compression are taken from the format table; unknown
    /// formats report an element size of zero.
    #[must_use]
    pub fn new(format: VkFormat, dimensions: u32, width: u32, height: u32, depth: u32) -> Self {
        let size = format.format_size();
        Self {
            width,
            height,
            depth,
            level_count: 1,
            layer_count: 1,
            face_count: 1,
            dimensions,
            is_cubemap: false,
            is_compressed: format.is_block_compressed(),
            element_size: size.map_or(0, |size| size.block_bytes()),
            format,
            orientation: Orientation::default(),
        }
    }

    /// Set the number of mip levels.
    #[must_use]
    pub fn with_levels(mut self, level_count: u32) -> Self {
        self.level_count = level_count;
        self
    }

    /// Set the number of array layers.
    #[must_use]
    pub fn with_layers(mut self, layer_count: u32) -> Self {
        self.layer_count = layer_count;
        self
    }

    /// Mark the texture as a cubemap with six faces.
    #[must_use]
    pub fn cubemap(mut self) -> Self {
        self.is_cubemap = true;
        self.face_count = 6;
        self
    }

    /// Set the stored reading direction.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// A parsed texture container.
///
/// Implementations are read-only; the decoder borrows them for the duration
/// of a single decode.
pub trait TextureContainer {
    /// Header metadata.
    fn info(&self) -> &ContainerInfo;

    /// The raw image data that offsets index into.
    fn data(&self) -> &[u8];

    /// Byte offset into [`data`](Self::data) of the image for the given
    /// level, layer and face, or `None` if the container cannot locate it.
    fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize>;
}

impl<T: TextureContainer + ?Sized> TextureContainer for &T {
    fn info(&self) -> &ContainerInfo {
        (**self).info()
    }

    fn data(&self) -> &[u8] {
        (**self).data()
    }

    fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize> {
        (**self).image_offset(level, layer, face)
    }
}

impl<T: TextureContainer + ?Sized> TextureContainer for Box<T> {
    fn info(&self) -> &ContainerInfo {
        (**self).info()
    }

    fn data(&self) -> &[u8] {
        (**self).data()
    }

    fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize> {
        (**self).image_offset(level, layer, face)
    }
}
