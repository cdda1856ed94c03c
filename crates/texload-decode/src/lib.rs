//! Repack mip-mapped GPU texture containers into canonical typed image data.
//!
//! A container parser describes a texture through the [`TextureContainer`]
//! trait: header metadata plus a lookup from (level, layer, face) to a byte
//! offset. [`decode`] turns that into an [`ImageData`] whose texels hold every
//! image back to back in level, layer, face order, typed by element width.
//!
//! # Design principles
//!
//! - **Parser-agnostic**: No container format is baked in; anything that can
//!   answer offset queries can be decoded
//! - **No GPU calls**: The output is plain data plus a [`Layout`] describing
//!   how to upload it
//! - **Tolerant repacking**: Images the container cannot supply are zero-filled
//!   and counted rather than aborting the decode
//!
//! # Example
//!
//! ```
//! use texload_decode::{ContainerInfo, MemoryContainer, VkFormat, ViewType, decode};
//!
//! let info = ContainerInfo::new(VkFormat::R8G8B8A8_UNORM, 2, 2, 2, 1);
//! let container = MemoryContainer::new(info).with_image(0, 0, 0, &[0xff; 16]);
//!
//! let image = decode(&container)?;
//! assert_eq!(image.view_type(), ViewType::D2);
//! assert_eq!(image.texels().len(), 4);
//! # Ok::<(), texload_decode::DecodeError>(())
//! ```

mod container;
mod decode;
mod error;
mod format;
pub mod geometry;
mod image;
mod layout;
mod memory;
pub mod repack;
mod shape;
pub mod texels;

pub use container::{ContainerInfo, Orientation, TextureContainer};
pub use decode::decode;
pub use error::{DecodeError, DecodeResult};
pub use format::{FormatSize, VkFormat};
pub use geometry::{Extent, MipChain, MipLevel};
pub use image::ImageData;
pub use layout::{Layout, Origin};
pub use memory::MemoryContainer;
pub use shape::{ImageDimensions, Shape, ViewType, classify};
pub use texels::{Block64, Block128, ElementKind, Texels};
