//! Container to image data.

use crate::{
    container::TextureContainer,
    error::{DecodeError, DecodeResult},
    geometry::{Extent, MipChain},
    image::ImageData,
    layout::{Layout, Origin},
    shape::classify,
    texels::{ElementKind, Texels},
};

/// Decode a container into typed image data.
///
/// Validation happens in this order: format lookup, block size against
/// element size, dimensionality, element size. The container is only
/// borrowed; releasing it is the caller's business.
///
/// # Errors
///
/// Returns a [`DecodeError`] if any validation step fails.
pub fn decode<C>(container: &C) -> DecodeResult<ImageData>
where
    C: TextureContainer + ?Sized,
{
    let info = container.info();

    let size = info
        .format
        .format_size()
        .ok_or(DecodeError::UnknownFormat(info.format.0))?;
    if u64::from(size.block_size_bits) != u64::from(info.element_size) * 8 {
        return Err(DecodeError::BlockSizeMismatch {
            block_size_bits: size.block_size_bits,
            element_size: info.element_size,
        });
    }

    let base = Extent::new(info.width, info.height, info.depth).in_blocks(&size);
    let chain = MipChain::new(base, info.element_size, info.level_count)?;
    let shape = classify(info.dimensions, info.layer_count, info.is_cubemap, base)?;
    let kind = ElementKind::select(info.is_compressed, info.element_size)?;
    let (texels, missing_images) = Texels::repacked(kind, container, &chain)?;

    let layout = Layout {
        format: info.format,
        block_width: size.block_width,
        block_height: size.block_height,
        block_depth: size.block_depth,
        max_mip_levels: info.level_count,
        origin: Origin::from_orientation(info.orientation),
        view_type: shape.view_type,
    };

    Ok(ImageData::new(
        shape.dimensions,
        layout,
        texels,
        missing_images,
    ))
}
