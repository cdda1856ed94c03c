//! Repacking container images into canonical order.
//!
//! The output holds every image of the texture back to back: level-major,
//! then layer, then face. Each image occupies exactly the face size of its
//! level, whatever stride or padding the container used.

use crate::{
    container::TextureContainer,
    error::DecodeResult,
    geometry::MipChain,
};

/// A repacked byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repacked {
    /// Image data in level, layer, face order.
    pub bytes: Vec<u8>,
    /// Images that could not be located, or were cut short, in the source.
    /// Their regions are zero-filled.
    pub missing_images: u32,
}

/// Repack a container into a freshly allocated buffer.
///
/// # Errors
///
/// Returns an error if the total size overflows.
pub fn repack<C>(container: &C, chain: &MipChain) -> DecodeResult<Repacked>
where
    C: TextureContainer + ?Sized,
{
    let info = container.info();
    let total = chain.total_size(info.layer_count, info.face_count)?;
    let mut bytes = vec![0u8; total];
    let missing_images = repack_into(container, chain, &mut bytes);
    Ok(Repacked {
        bytes,
        missing_images,
    })
}

/// Repack a container into `dst`, which must be zeroed and at least
/// `chain.total_size(layers, faces)` bytes long.
///
/// Returns the number of images that were missing or truncated in the source.
/// Lookup failures never abort the repack; the affected region is left as is
/// and the cursor still advances past it.
///
/// # Panics
///
/// Panics if `dst` is shorter than the repacked size.
pub fn repack_into<C>(container: &C, chain: &MipChain, dst: &mut [u8]) -> u32
where
    C: TextureContainer + ?Sized,
{
    let info = container.info();
    let data = container.data();

    let mut cursor = 0usize;
    let mut missing_images = 0u32;

    for level in chain.levels() {
        let face_size = level.face_size;
        for layer in 0..info.layer_count {
            for face in 0..info.face_count {
                let target = &mut dst[cursor..cursor + face_size];
                let source = container
                    .image_offset(level.level, layer, face)
                    .and_then(|offset| data.get(offset..));

                match source {
                    Some(source) if source.len() >= face_size => {
                        target.copy_from_slice(&source[..face_size]);
                    }
                    Some(source) => {
                        target[..source.len()].copy_from_slice(source);
                        missing_images += 1;
                    }
                    None => missing_images += 1,
                }

                cursor += face_size;
            }
        }
    }

    missing_images
}
