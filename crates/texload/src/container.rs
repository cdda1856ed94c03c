//! KTX2 container adapter.
//!
//! Parses a KTX 2.0 byte stream with the `ktx2` crate and exposes it to the
//! decoder through [`TextureContainer`]. Zstandard-supercompressed levels are
//! inflated on open so image offsets always index plain texel data.

use std::{ops::Range, path::Path};

use texload_decode::{ContainerInfo, Orientation, TextureContainer, VkFormat};

use crate::error::{Error, Result};

const KTX1_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Offset of `bytesPlane0` from the start of the data format descriptor:
/// the total size word, then 16 bytes into the basic descriptor block.
const DFD_BYTES_PLANE0: usize = 20;

const ORIENTATION_KEY: &str = "KTXorientation";

/// A parsed KTX2 texture.
#[derive(Debug, Clone)]
pub struct Ktx2Container {
    info: ContainerInfo,
    data: Vec<u8>,
    levels: Vec<Range<usize>>,
}

impl Ktx2Container {
    /// Parse a KTX2 file held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Container`] for KTX 1.x files, malformed headers or
    /// level indices, BasisLZ supercompression, and levels that fail to
    /// inflate.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.starts_with(&KTX1_IDENTIFIER) {
            return Err(Error::container(
                "ktx2 container",
                "KTX 1.x files are not supported, convert to KTX 2.0",
            ));
        }

        let reader = ktx2::Reader::new(bytes.as_slice())?;
        let header = reader.header();

        let format = VkFormat(header.format.map_or(0, |format| format.value()));
        let element_size = descriptor_element_size(&bytes, header.index.dfd_byte_offset)
            .or_else(|| format.format_size().map(|size| size.block_bytes()))
            .unwrap_or(0);

        let dimensions = if header.pixel_depth > 0 {
            3
        } else if header.pixel_height > 0 {
            2
        } else {
            1
        };

        let orientation = reader
            .key_value_data()
            .find(|(key, _)| *key == ORIENTATION_KEY)
            .map(|(_, value)| parse_orientation(value))
            .unwrap_or_default();

        let mut info = ContainerInfo::new(
            format,
            dimensions,
            header.pixel_width,
            header.pixel_height.max(1),
            header.pixel_depth.max(1),
        )
        .with_levels(header.level_count.max(1))
        .with_layers(header.layer_count.max(1))
        .with_orientation(orientation);
        if header.face_count == 6 {
            info = info.cubemap();
        }
        info.element_size = element_size;

        let scheme = header.supercompression_scheme;
        if scheme == Some(ktx2::SupercompressionScheme::BasisLZ) {
            return Err(Error::container(
                "ktx2 container",
                "BasisLZ supercompression is not supported",
            ));
        }

        let (data, levels) = match scheme {
            None => {
                let base = bytes.as_ptr() as usize;
                let levels = reader
                    .levels()
                    .map(|level| {
                        let start = level.data.as_ptr() as usize - base;
                        start..start + level.data.len()
                    })
                    .collect();
                drop(reader);
                (bytes, levels)
            }
            Some(scheme) => inflate_levels(&reader, scheme)?,
        };

        tracing::trace!(
            format = format.0,
            width = info.width,
            height = info.height,
            levels = levels.len(),
            "parsed ktx2 container"
        );

        Ok(Self { info, data, levels })
    }

    /// Read and parse a KTX2 file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or any error of
    /// [`Ktx2Container::from_bytes`].
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, &e))?;
        Self::from_bytes(bytes)
    }

    /// Number of level ranges located in the file.
    #[must_use]
    pub fn stored_levels(&self) -> usize {
        self.levels.len()
    }
}

impl TextureContainer for Ktx2Container {
    fn info(&self) -> &ContainerInfo {
        &self.info
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    /// Images within a level are stored layer-major with equal sizes, so the
    /// level is split evenly across its layers and faces.
    fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize> {
        let range = self.levels.get(level as usize)?;
        let layers = self.info.layer_count as usize;
        let faces = self.info.face_count as usize;
        let (layer, face) = (layer as usize, face as usize);
        if layer >= layers || face >= faces {
            return None;
        }

        let image_len = range.len() / (layers * faces);
        Some(range.start + (layer * faces + face) * image_len)
    }
}

/// Read `bytesPlane0` from the basic data format descriptor, if present and
/// non-zero.
fn descriptor_element_size(bytes: &[u8], dfd_offset: u32) -> Option<u32> {
    let at = (dfd_offset as usize).checked_add(DFD_BYTES_PLANE0)?;
    bytes
        .get(at)
        .copied()
        .filter(|&size| size != 0)
        .map(u32::from)
}

/// Parse a `KTXorientation` value such as `rd` or `ruo`.
///
/// Missing axes keep the default direction.
fn parse_orientation(value: &[u8]) -> Orientation {
    let mut orientation = Orientation::default();
    let value = value.split(|&b| b == 0).next().unwrap_or_default();
    for (axis, &c) in value.iter().enumerate() {
        match axis {
            0 => orientation.x_right = c != b'l',
            1 => orientation.y_down = c != b'u',
            2 => orientation.z_out = c != b'i',
            _ => break,
        }
    }
    orientation
}

#[cfg(feature = "zstd")]
fn inflate_levels(
    reader: &ktx2::Reader<&[u8]>,
    scheme: ktx2::SupercompressionScheme,
) -> Result<(Vec<u8>, Vec<Range<usize>>)> {
    if scheme != ktx2::SupercompressionScheme::Zstandard {
        return Err(Error::container(
            "ktx2 container",
            format!("unsupported supercompression scheme {scheme:?}"),
        ));
    }

    let mut data = Vec::new();
    let mut levels = Vec::new();
    for (index, level) in reader.levels().enumerate() {
        let inflated = zstd::decode_all(level.data).map_err(|e| {
            Error::container("zstd level", format!("level {index}: {e}"))
        })?;
        if inflated.len() as u64 != level.uncompressed_byte_length {
            tracing::debug!(
                level = index,
                expected = level.uncompressed_byte_length,
                actual = inflated.len(),
                "inflated level size differs from index"
            );
        }
        let start = data.len();
        data.extend_from_slice(&inflated);
        levels.push(start..data.len());
    }
    Ok((data, levels))
}

#[cfg(not(feature = "zstd"))]
fn inflate_levels(
    _reader: &ktx2::Reader<&[u8]>,
    scheme: ktx2::SupercompressionScheme,
) -> Result<(Vec<u8>, Vec<Range<usize>>)> {
    Err(Error::container(
        "ktx2 container",
        format!("supercompression scheme {scheme:?} needs the zstd feature"),
    ))
}
