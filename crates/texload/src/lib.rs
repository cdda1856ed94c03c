//! Read KTX2 textures from files, streams and HTTP into canonical image data.
//!
//! This crate wraps the pure decoder in `texload-decode` with a KTX2
//! container adapter, file lookup, and a blocking remote fetch adapter.
//!
//! # Design principles
//!
//! - **Absent, not fatal**: Readers return `Option`; failures are logged with
//!   `tracing` and never cross the reader boundary
//! - **Blocking**: No async runtime is needed; decoding is synchronous
//! - **Shared transport**: HTTP clients lease one process-wide client unless
//!   told otherwise
//!
//! # Example
//!
//! ```no_run
//! use texload::{KtxReader, ReadOptions, RemoteReader};
//!
//! let options = ReadOptions::from_env();
//! let local = KtxReader::new().read_file("brick.ktx2", &options);
//!
//! let remote = RemoteReader::new(KtxReader::new());
//! let fetched = remote.read("https://example.com/textures/brick.ktx2", &options);
//! ```

mod container;
mod error;
pub mod fetch;
pub mod options;
mod reader;
mod shared;

#[cfg(test)]
mod testing;

pub use container::Ktx2Container;
pub use error::{Error, Result};
pub use fetch::{HttpClient, RemoteReader, ReqwestClient};
pub use options::ReadOptions;
pub use reader::{ContentReader, KTX_EXTENSIONS, KtxReader};
pub use shared::{Lease, SharedResource, manages_shared_client, set_manage_shared_client};

// Re-export decode types for convenience.
pub use texload_decode::{
    DecodeError, ElementKind, ImageData, ImageDimensions, Layout, Origin, Texels, ViewType,
    VkFormat,
};
