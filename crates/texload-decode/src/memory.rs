//! An in-memory container assembled image by image.

use std::collections::HashMap;

use crate::container::{ContainerInfo, TextureContainer};

/// A container whose images are supplied directly by the caller.
///
/// Images are appended to one data buffer in the order they are added, so the
/// storage order is independent of the canonical level, layer, face order.
/// Images that are never added have no offset.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    info: ContainerInfo,
    data: Vec<u8>,
    offsets: HashMap<(u32, u32, u32), usize>,
}

impl MemoryContainer {
    /// Create an empty container with the given metadata.
    #[must_use]
    pub fn new(info: ContainerInfo) -> Self {
        Self {
            info,
            data: Vec::new(),
            offsets: HashMap::new(),
        }
    }

    /// Append the image for `(level, layer, face)`.
    ///
    /// Adding the same image twice replaces its offset; the old bytes stay in
    /// the buffer.
    pub fn push_image(&mut self, level: u32, layer: u32, face: u32, bytes: &[u8]) {
        self.offsets.insert((level, layer, face), self.data.len());
        self.data.extend_from_slice(bytes);
    }

    /// Builder form of [`push_image`](Self::push_image).
    #[must_use]
    pub fn with_image(mut self, level: u32, layer: u32, face: u32, bytes: &[u8]) -> Self {
        self.push_image(level, layer, face, bytes);
        self
    }

    /// Append padding bytes that no image refers to.
    pub fn push_padding(&mut self, len: usize) {
        self.data.resize(self.data.len() + len, 0);
    }
}

impl TextureContainer for MemoryContainer {
    fn info(&self) -> &ContainerInfo {
        &self.info
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn image_offset(&self, level: u32, layer: u32, face: u32) -> Option<usize> {
        self.offsets.get(&(level, layer, face)).copied()
    }
}
