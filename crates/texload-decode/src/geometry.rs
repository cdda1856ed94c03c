//! Mip chain geometry.
//!
//! All sizes are measured in blocks: the base extent is divided by the block
//! extent of the format before any level is computed. Every level occupies at
//! least one element, even when it is narrower than a block.

use crate::{
    error::{DecodeError, DecodeResult},
    format::FormatSize,
};

/// Width, height and depth of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent {
    /// Create a new extent.
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// The extent of the next mip level. Axes of 0 or 1 are left unchanged.
    #[must_use]
    pub fn halved(self) -> Self {
        fn half(value: u32) -> u32 {
            if value > 1 { value / 2 } else { value }
        }
        Self::new(half(self.width), half(self.height), half(self.depth))
    }

    /// Convert a texel extent into a block extent (integer division).
    #[must_use]
    pub fn in_blocks(self, size: &FormatSize) -> Self {
        Self::new(
            self.width / u32::from(size.block_width),
            self.height / u32::from(size.block_height),
            self.depth / u32::from(size.block_depth),
        )
    }

    fn element_count(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth as usize)
    }
}

/// One level of a mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevel {
    /// Level index, 0 being the base level.
    pub level: u32,
    /// Level extent in blocks.
    pub extent: Extent,
    /// Bytes occupied by one image (one layer, one face) of this level.
    pub face_size: usize,
}

/// The chain of mip levels derived from a base extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipChain {
    base: Extent,
    element_size: usize,
    level_count: u32,
    image_set_size: usize,
}

impl MipChain {
    /// Derive the chain for `level_count` levels starting at `base` (in
    /// blocks), with `element_size` bytes per block.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TooLarge`] if the chain's size overflows.
    pub fn new(base: Extent, element_size: u32, level_count: u32) -> DecodeResult<Self> {
        let element_size = element_size as usize;
        let mut image_set_size = 0usize;
        let mut extent = base;
        for _ in 0..level_count {
            let face_size = extent
                .element_count()
                .and_then(|count| count.checked_mul(element_size))
                .ok_or(DecodeError::TooLarge {
                    context: "mip level",
                })?
                .max(element_size);
            image_set_size =
                image_set_size
                    .checked_add(face_size)
                    .ok_or(DecodeError::TooLarge {
                        context: "mip chain",
                    })?;
            extent = extent.halved();
        }

        Ok(Self {
            base,
            element_size,
            level_count,
            image_set_size,
        })
    }

    /// Base extent in blocks.
    #[must_use]
    pub fn base(&self) -> Extent {
        self.base
    }

    /// Number of levels in the chain.
    #[must_use]
    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Bytes per block.
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Bytes for one full chain of a single layer and face.
    #[must_use]
    pub fn image_set_size(&self) -> usize {
        self.image_set_size
    }

    /// Bytes for the full chain across `layers × faces` images.
    pub fn total_size(&self, layers: u32, faces: u32) -> DecodeResult<usize> {
        (layers as usize)
            .checked_mul(faces as usize)
            .and_then(|images| images.checked_mul(self.image_set_size))
            .filter(|&total| isize::try_from(total).is_ok())
            .ok_or(DecodeError::TooLarge {
                context: "texture",
            })
    }

    /// Iterate over the levels, largest first.
    pub fn levels(&self) -> impl Iterator<Item = MipLevel> {
        let element_size = self.element_size;
        (0..self.level_count).scan(self.base, move |extent, level| {
            let current = *extent;
            *extent = current.halved();
            // Cannot overflow: bounded by the base level checked in `new`.
            let face_size = (current.width as usize
                * current.height as usize
                * current.depth as usize
                * element_size)
                .max(element_size);
            Some(MipLevel {
                level,
                extent: current,
                face_size,
            })
        })
    }
}
