//! The public reader boundary.
//!
//! Readers return `Option<ImageData>`: `None` means the input was not
//! recognized, not applicable, or failed. Failures are logged here and never
//! propagate past this module; use [`KtxReader::try_read_bytes`] to get the
//! structured error instead.

use std::{io::Read, path::Path};

use texload_decode::{ImageData, TextureContainer, decode};

use crate::{
    container::Ktx2Container,
    error::{Error, Result},
    options::{ReadOptions, file_extension},
};

/// File extensions the KTX reader accepts.
pub const KTX_EXTENSIONS: [&str; 2] = ["ktx", "ktx2"];

/// Something that can turn a byte stream into image data.
pub trait ContentReader: Send + Sync {
    /// Decode `bytes`, using the options' extension hint to decide whether
    /// the content is applicable.
    fn read_bytes(&self, bytes: Vec<u8>, options: &ReadOptions) -> Option<ImageData>;
}

/// Reader for KTX texture files.
#[derive(Debug, Clone, Copy, Default)]
pub struct KtxReader;

impl KtxReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `extension` (lower-case, without dot) is handled.
    #[must_use]
    pub fn accepts_extension(extension: &str) -> bool {
        KTX_EXTENSIONS.contains(&extension)
    }

    /// Read a texture file, resolving relative paths through the options'
    /// search paths.
    pub fn read_file(&self, path: impl AsRef<Path>, options: &ReadOptions) -> Option<ImageData> {
        let path = path.as_ref();
        let extension = file_extension(path);
        if !extension.as_deref().is_some_and(Self::accepts_extension) {
            tracing::debug!(path = %path.display(), "not a ktx file");
            return None;
        }

        let Some(found) = options.find_file(path) else {
            tracing::debug!(path = %path.display(), "ktx file not found");
            return None;
        };

        let source = found.display().to_string();
        let result = Ktx2Container::open_file(&found)
            .and_then(|container| decode_container(container, &source));
        log_outcome(result, &source)
    }

    /// Read a texture from a stream whose kind is given by the options'
    /// extension hint. Declines without reading when the hint is missing or
    /// not a KTX extension.
    pub fn read_stream(&self, mut stream: impl Read, options: &ReadOptions) -> Option<ImageData> {
        if !options.extension_hint().is_some_and(Self::accepts_extension) {
            tracing::debug!(hint = ?options.extension_hint(), "stream is not a ktx file");
            return None;
        }

        let mut bytes = Vec::new();
        if let Err(e) = stream.read_to_end(&mut bytes) {
            return log_outcome(Err(Error::io("<stream>", &e)), "<stream>");
        }
        self.read_bytes_from(bytes, "<stream>")
    }

    /// Decode an in-memory KTX2 file, returning the structured error on
    /// failure.
    pub fn try_read_bytes(&self, bytes: Vec<u8>) -> Result<ImageData> {
        let container = Ktx2Container::from_bytes(bytes)?;
        decode_container(container, "<memory>")
    }

    fn read_bytes_from(&self, bytes: Vec<u8>, source: &str) -> Option<ImageData> {
        let result =
            Ktx2Container::from_bytes(bytes).and_then(|container| decode_container(container, source));
        log_outcome(result, source)
    }
}

impl ContentReader for KtxReader {
    /// Decode `bytes` unless the options carry a non-KTX extension hint.
    fn read_bytes(&self, bytes: Vec<u8>, options: &ReadOptions) -> Option<ImageData> {
        if let Some(hint) = options.extension_hint()
            && !Self::accepts_extension(hint)
        {
            tracing::debug!(hint, "content is not a ktx file");
            return None;
        }
        self.read_bytes_from(bytes, "<memory>")
    }
}

/// Decode a container, consuming it so it is released on every path.
fn decode_container<C: TextureContainer>(container: C, source: &str) -> Result<ImageData> {
    let image = decode(&container)?;
    if !image.is_complete() {
        tracing::debug!(
            source,
            missing = image.missing_images(),
            "container is missing images, zero-filled"
        );
    }
    Ok(image)
}

fn log_outcome(result: Result<ImageData>, source: &str) -> Option<ImageData> {
    match result {
        Ok(image) => {
            tracing::debug!(source, view_type = ?image.view_type(), "decoded texture");
            Some(image)
        }
        Err(error) => {
            tracing::warn!(source, %error, "failed to read texture");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    };

    use super::*;
    use crate::testing::{TestTexture, init_tracing, ramp};
    use texload_decode::{
        ContainerInfo, ElementKind, MemoryContainer, Texels, ViewType, VkFormat,
    };

    fn rgba_texture() -> TestTexture {
        TestTexture::new_2d(
            VkFormat::R8G8B8A8_UNORM,
            4,
            4,
            vec![ramp(64, 0), ramp(16, 64), ramp(4, 128)],
        )
    }

    #[test]
    fn test_read_bytes_decodes_real_file() {
        let image = KtxReader
            .read_bytes(rgba_texture().to_bytes(), &ReadOptions::new())
            .unwrap();

        assert_eq!(image.view_type(), ViewType::D2);
        assert_eq!(image.layout().max_mip_levels, 3);
        assert_eq!(image.texels().kind(), ElementKind::U8x4);
        let mut expected = ramp(64, 0);
        expected.extend(ramp(16, 64));
        expected.extend(ramp(4, 128));
        assert_eq!(image.texels().as_bytes(), expected.as_slice());
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn test_read_bytes_zstd_matches_plain() {
        let mut compressed = rgba_texture();
        compressed.zstd = true;
        let plain = KtxReader.try_read_bytes(rgba_texture().to_bytes()).unwrap();
        let inflated = KtxReader.try_read_bytes(compressed.to_bytes()).unwrap();
        assert_eq!(plain, inflated);
    }

    #[test]
    fn test_read_bytes_declines_foreign_hint() {
        let options = ReadOptions::new().with_extension_hint("png");
        assert!(KtxReader.read_bytes(rgba_texture().to_bytes(), &options).is_none());
    }

    #[test]
    fn test_failures_become_none() {
        init_tracing();
        let options = ReadOptions::new();
        assert!(KtxReader.read_bytes(b"garbage".to_vec(), &options).is_none());

        let mut ktx1 = vec![0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A];
        ktx1.resize(96, 0);
        assert!(KtxReader.read_bytes(ktx1, &options).is_none());

        let mut truncated = rgba_texture().to_bytes();
        truncated.truncate(100);
        assert!(KtxReader.read_bytes(truncated, &options).is_none());
    }

    #[test]
    fn test_basislz_is_rejected() {
        let mut bytes = rgba_texture().to_bytes();
        // supercompressionScheme is the ninth header word.
        bytes[44..48].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            KtxReader.try_read_bytes(bytes),
            Err(Error::Container { .. })
        ));
    }

    #[test]
    fn test_block_size_mismatch_is_reported() {
        let mut texture = rgba_texture();
        texture.element_size = 2;
        assert!(matches!(
            KtxReader.try_read_bytes(texture.to_bytes()),
            Err(Error::Decode(
                texload_decode::DecodeError::BlockSizeMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_oversized_header_becomes_none() {
        init_tracing();
        let texture = TestTexture::new_2d(VkFormat::R8_UNORM, u32::MAX, u32::MAX, vec![ramp(16, 0)]);
        let bytes = texture.to_bytes();
        assert!(matches!(
            KtxReader.try_read_bytes(bytes.clone()),
            Err(Error::Decode(texload_decode::DecodeError::TooLarge { .. }))
        ));
        assert!(KtxReader.read_bytes(bytes, &ReadOptions::new()).is_none());
    }

    #[test]
    fn test_read_stream_checks_hint_first() {
        let bytes = rgba_texture().to_bytes();
        assert!(KtxReader.read_stream(Cursor::new(bytes.clone()), &ReadOptions::new()).is_none());

        let options = ReadOptions::new().with_extension_hint("KTX2");
        let image = KtxReader.read_stream(Cursor::new(bytes), &options).unwrap();
        assert_eq!(image.texels().len(), 16 + 4 + 1);
    }

    #[test]
    fn test_read_file() {
        let dir = std::env::temp_dir().join(format!("texload-reader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("wall.KTX2"), rgba_texture().to_bytes()).unwrap();
        std::fs::write(dir.join("wall.png"), rgba_texture().to_bytes()).unwrap();

        let options = ReadOptions::new().with_search_path(&dir);
        assert!(KtxReader.read_file("wall.KTX2", &options).is_some());
        assert!(KtxReader.read_file(dir.join("wall.KTX2"), &ReadOptions::new()).is_some());
        assert!(KtxReader.read_file("wall.png", &options).is_none());
        assert!(KtxReader.read_file("absent.ktx", &options).is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_cubemap_file() {
        let mut texture = TestTexture::new_2d(VkFormat::R8_UNORM, 2, 2, vec![ramp(24, 0)]);
        texture.faces = 6;
        let image = KtxReader.try_read_bytes(texture.to_bytes()).unwrap();
        assert_eq!(image.view_type(), ViewType::Cube);
        assert_eq!(image.texels(), &Texels::U8(ramp(24, 0)));
    }

    /// Container that records when it is dropped.
    struct DropFlag {
        inner: MemoryContainer,
        dropped: Arc<AtomicBool>,
    }

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    impl TextureContainer for DropFlag {
        fn info(&self) -> &ContainerInfo {
            self.inner.info()
        }

        fn data(&self) -> &[u8] {
            self.inner.data()
        }

        fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize> {
            self.inner.image_offset(level, layer, face)
        }
    }

    #[test]
    fn test_container_released_on_every_path() {
        let dropped = Arc::new(AtomicBool::new(false));
        let info = ContainerInfo::new(VkFormat::R8_UNORM, 2, 1, 1, 1);
        let container = DropFlag {
            inner: MemoryContainer::new(info).with_image(0, 0, 0, &[1]),
            dropped: dropped.clone(),
        };
        assert!(decode_container(container, "test").is_ok());
        assert!(dropped.load(Ordering::SeqCst));

        let dropped = Arc::new(AtomicBool::new(false));
        let info = ContainerInfo::new(VkFormat::R8_UNORM, 5, 1, 1, 1);
        let container = DropFlag {
            inner: MemoryContainer::new(info),
            dropped: dropped.clone(),
        };
        assert!(decode_container(container, "test").is_err());
        assert!(dropped.load(Ordering::SeqCst));

        let dropped = Arc::new(AtomicBool::new(false));
        let mut info = ContainerInfo::new(VkFormat::R8_UNORM, 2, 1, 1, 1);
        info.element_size = 2;
        let container = DropFlag {
            inner: MemoryContainer::new(info).with_image(0, 0, 0, &[1, 2]),
            dropped: dropped.clone(),
        };
        assert!(matches!(
            decode_container(container, "test"),
            Err(Error::Decode(
                texload_decode::DecodeError::BlockSizeMismatch { .. }
            ))
        ));
        assert!(dropped.load(Ordering::SeqCst));
    }
}
