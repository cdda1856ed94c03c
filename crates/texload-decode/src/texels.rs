//! Typed texel storage.
//!
//! Texel data is reinterpreted purely by byte width. The channel semantics of
//! a format (sRGB, signed, float, ...) are left to whoever reads the format
//! identifier in the layout.

use bytemuck::{Pod, Zeroable};
use glam::{U8Vec3, U8Vec4, U16Vec4, Vec4};

use crate::{
    container::TextureContainer,
    error::{DecodeError, DecodeResult},
    geometry::MipChain,
    repack::repack_into,
};

/// An opaque 64-bit compressed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Block64(pub [u8; 8]);

/// An opaque 128-bit compressed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Block128(pub [u8; 16]);

/// Element representation selected from the element size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// One unsigned byte.
    U8,
    /// One unsigned 16-bit value.
    U16,
    /// Three bytes.
    U8x3,
    /// Four bytes.
    U8x4,
    /// Four unsigned 16-bit values.
    U16x4,
    /// Four 32-bit floats.
    F32x4,
    /// A 64-bit compressed block.
    Block64,
    /// A 128-bit compressed block.
    Block128,
}

impl ElementKind {
    /// Pick the representation for `element_size`-byte elements.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedCompressedFormat`] for compressed
    /// blocks other than 8 or 16 bytes, and
    /// [`DecodeError::UnsupportedValueSize`] for texels other than 1, 2, 3,
    /// 4, 8 or 16 bytes.
    pub fn select(compressed: bool, element_size: u32) -> DecodeResult<Self> {
        if compressed {
            return match element_size {
                8 => Ok(Self::Block64),
                16 => Ok(Self::Block128),
                _ => Err(DecodeError::UnsupportedCompressedFormat { element_size }),
            };
        }

        match element_size {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            3 => Ok(Self::U8x3),
            4 => Ok(Self::U8x4),
            8 => Ok(Self::U16x4),
            16 => Ok(Self::F32x4),
            _ => Err(DecodeError::UnsupportedValueSize { element_size }),
        }
    }

    /// Size of one element in bytes.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U8x3 => 3,
            Self::U8x4 => 4,
            Self::U16x4 | Self::Block64 => 8,
            Self::F32x4 | Self::Block128 => 16,
        }
    }

    /// Whether the elements are compressed blocks.
    #[must_use]
    pub fn is_block(self) -> bool {
        matches!(self, Self::Block64 | Self::Block128)
    }
}

/// Texel storage, one variant per [`ElementKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Texels {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U8x3(Vec<U8Vec3>),
    U8x4(Vec<U8Vec4>),
    U16x4(Vec<U16Vec4>),
    F32x4(Vec<Vec4>),
    Block64(Vec<Block64>),
    Block128(Vec<Block128>),
}

impl Texels {
    /// Repack `container` straight into typed storage of the given kind.
    ///
    /// Returns the texels and the number of images missing from the source.
    pub fn repacked<C>(
        kind: ElementKind,
        container: &C,
        chain: &MipChain,
    ) -> DecodeResult<(Self, u32)>
    where
        C: TextureContainer + ?Sized,
    {
        let info = container.info();
        let total = chain.total_size(info.layer_count, info.face_count)?;

        let (texels, missing) = match kind {
            ElementKind::U8 => wrap(repack_typed(container, chain, total)?, Self::U8),
            ElementKind::U16 => wrap(repack_typed(container, chain, total)?, Self::U16),
            ElementKind::U8x3 => wrap(repack_typed(container, chain, total)?, Self::U8x3),
            ElementKind::U8x4 => wrap(repack_typed(container, chain, total)?, Self::U8x4),
            ElementKind::U16x4 => wrap(repack_typed(container, chain, total)?, Self::U16x4),
            ElementKind::F32x4 => wrap(repack_typed(container, chain, total)?, Self::F32x4),
            ElementKind::Block64 => wrap(repack_typed(container, chain, total)?, Self::Block64),
            ElementKind::Block128 => {
                wrap(repack_typed(container, chain, total)?, Self::Block128)
            }
        };
        Ok((texels, missing))
    }

    /// The element representation.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::U8(_) => ElementKind::U8,
            Self::U16(_) => ElementKind::U16,
            Self::U8x3(_) => ElementKind::U8x3,
            Self::U8x4(_) => ElementKind::U8x4,
            Self::U16x4(_) => ElementKind::U16x4,
            Self::F32x4(_) => ElementKind::F32x4,
            Self::Block64(_) => ElementKind::Block64,
            Self::Block128(_) => ElementKind::Block128,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len() / self.kind().size()
    }

    /// Whether there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// The raw bytes, in canonical order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U8(v) => v.as_slice(),
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U8x3(v) => bytemuck::cast_slice(v),
            Self::U8x4(v) => bytemuck::cast_slice(v),
            Self::U16x4(v) => bytemuck::cast_slice(v),
            Self::F32x4(v) => bytemuck::cast_slice(v),
            Self::Block64(v) => bytemuck::cast_slice(v),
            Self::Block128(v) => bytemuck::cast_slice(v),
        }
    }
}

fn wrap<T>(repacked: (Vec<T>, u32), variant: fn(Vec<T>) -> Texels) -> (Texels, u32) {
    (variant(repacked.0), repacked.1)
}

/// Allocate zeroed elements covering `total` bytes and repack into them.
fn repack_typed<T, C>(container: &C, chain: &MipChain, total: usize) -> DecodeResult<(Vec<T>, u32)>
where
    T: Pod,
    C: TextureContainer + ?Sized,
{
    let count = total / size_of::<T>();
    let mut texels: Vec<T> = Vec::new();
    texels
        .try_reserve_exact(count)
        .map_err(|_| DecodeError::AllocationFailed { bytes: total })?;
    texels.resize(count, T::zeroed());
    let missing = repack_into(container, chain, bytemuck::cast_slice_mut(&mut texels));
    Ok((texels, missing))
}
