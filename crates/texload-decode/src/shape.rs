//! Logical shape classification.
//!
//! Array layers and cube faces are folded into a spare axis so that image
//! data only ever needs a 1D, 2D or 3D array. This module is the one place
//! that decides which axis carries them.

use crate::{
    error::{DecodeError, DecodeResult},
    geometry::Extent,
};

/// How a consumer binds the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    D1,
    D1Array,
    D2,
    D2Array,
    D3,
    Cube,
    CubeArray,
}

/// Shape of the typed array holding the image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDimensions {
    D1 { width: u32 },
    D2 { width: u32, height: u32 },
    D3 { width: u32, height: u32, depth: u32 },
}

impl ImageDimensions {
    /// Number of array axes (1, 2 or 3).
    #[must_use]
    pub fn rank(&self) -> u32 {
        match self {
            Self::D1 { .. } => 1,
            Self::D2 { .. } => 2,
            Self::D3 { .. } => 3,
        }
    }

    /// Width, height and depth, with absent axes reported as 1.
    #[must_use]
    pub fn extent(&self) -> Extent {
        match *self {
            Self::D1 { width } => Extent::new(width, 1, 1),
            Self::D2 { width, height } => Extent::new(width, height, 1),
            Self::D3 {
                width,
                height,
                depth,
            } => Extent::new(width, height, depth),
        }
    }
}

/// Result of classifying a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub view_type: ViewType,
    pub dimensions: ImageDimensions,
}

/// Classify a texture by dimensionality, layer count and cubemap flag.
///
/// `extent` is the base extent in blocks; the returned dimensions carry the
/// layer (and face) count on the spare axis.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidDimensionality`] unless `dimensions` is 1, 2
/// or 3.
pub fn classify(
    dimensions: u32,
    layers: u32,
    is_cubemap: bool,
    extent: Extent,
) -> DecodeResult<Shape> {
    let Extent {
        width,
        height,
        depth,
    } = extent;
    let arrayed = layers != 1;

    let shape = match dimensions {
        1 if arrayed => Shape {
            view_type: ViewType::D1Array,
            dimensions: ImageDimensions::D2 {
                width,
                height: layers,
            },
        },
        1 => Shape {
            view_type: ViewType::D1,
            dimensions: ImageDimensions::D1 { width },
        },
        2 if is_cubemap => Shape {
            view_type: if arrayed {
                ViewType::CubeArray
            } else {
                ViewType::Cube
            },
            dimensions: ImageDimensions::D3 {
                width,
                height,
                depth: layers.saturating_mul(6),
            },
        },
        2 if arrayed => Shape {
            view_type: ViewType::D2Array,
            dimensions: ImageDimensions::D3 {
                width,
                height,
                depth: layers,
            },
        },
        2 => Shape {
            view_type: ViewType::D2,
            dimensions: ImageDimensions::D2 { width, height },
        },
        3 => Shape {
            view_type: ViewType::D3,
            dimensions: ImageDimensions::D3 {
                width,
                height,
                depth,
            },
        },
        other => return Err(DecodeError::InvalidDimensionality(other)),
    };

    Ok(shape)
}
