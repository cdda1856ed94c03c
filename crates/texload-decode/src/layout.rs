//! Layout descriptor attached to decoded image data.

use crate::{container::Orientation, format::VkFormat, shape::ViewType};

/// Per-axis flip flags relative to the canonical origin (X right, Y down,
/// Z out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Origin(u8);

impl Origin {
    pub const FLIP_X: u8 = 1;
    pub const FLIP_Y: u8 = 2;
    pub const FLIP_Z: u8 = 4;

    /// Derive the flip flags from a stored orientation.
    #[must_use]
    pub fn from_orientation(orientation: Orientation) -> Self {
        let mut bits = 0;
        if !orientation.x_right {
            bits |= Self::FLIP_X;
        }
        if !orientation.y_down {
            bits |= Self::FLIP_Y;
        }
        if !orientation.z_out {
            bits |= Self::FLIP_Z;
        }
        Self(bits)
    }

    /// The 3-bit origin code.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn flips_x(self) -> bool {
        self.0 & Self::FLIP_X != 0
    }

    #[must_use]
    pub fn flips_y(self) -> bool {
        self.0 & Self::FLIP_Y != 0
    }

    #[must_use]
    pub fn flips_z(self) -> bool {
        self.0 & Self::FLIP_Z != 0
    }
}

/// Describes how image data is laid out for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Texel format.
    pub format: VkFormat,
    /// Block width in texels.
    pub block_width: u8,
    /// Block height in texels.
    pub block_height: u8,
    /// Block depth in texels.
    pub block_depth: u8,
    /// Number of mip levels present in the data.
    pub max_mip_levels: u32,
    /// Axis flips relative to the canonical origin.
    pub origin: Origin,
    /// How the image is meant to be bound.
    pub view_type: ViewType,
}
