//! Error types for decoding operations.

use std::fmt;

/// Validation failures raised while turning a container into image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The format's block size disagrees with the container's element size.
    BlockSizeMismatch {
        block_size_bits: u32,
        element_size: u32,
    },
    /// Dimensionality other than 1, 2 or 3.
    InvalidDimensionality(u32),
    /// Compressed data whose block size has no typed representation.
    UnsupportedCompressedFormat { element_size: u32 },
    /// Uncompressed data whose texel size has no typed representation.
    UnsupportedValueSize { element_size: u32 },
    /// Format number missing from the format table.
    UnknownFormat(u32),
    /// Repacked size does not fit in memory addressing.
    TooLarge { context: &'static str },
    /// The allocator could not provide the repacked buffer.
    AllocationFailed { bytes: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockSizeMismatch {
                block_size_bits,
                element_size,
            } => {
                write!(
                    f,
                    "mismatched block size: format declares {block_size_bits} bits, \
                     container reports {element_size} bytes per element"
                )
            }
            Self::InvalidDimensionality(dimensions) => {
                write!(f, "invalid number of dimensions: {dimensions}")
            }
            Self::UnsupportedCompressedFormat { element_size } => {
                write!(f, "unsupported compressed format: {element_size}-byte blocks")
            }
            Self::UnsupportedValueSize { element_size } => {
                write!(f, "unsupported value size: {element_size} bytes")
            }
            Self::UnknownFormat(format) => write!(f, "unknown format {format}"),
            Self::TooLarge { context } => write!(f, "{context} exceeds addressable size"),
            Self::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {bytes} bytes for texel data")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_block_size_mismatch() {
        let err = DecodeError::BlockSizeMismatch {
            block_size_bits: 64,
            element_size: 16,
        };
        assert_eq!(
            err.to_string(),
            "mismatched block size: format declares 64 bits, container reports 16 bytes per element"
        );
    }

    #[test]
    fn test_display_validation_messages() {
        assert_eq!(
            DecodeError::InvalidDimensionality(4).to_string(),
            "invalid number of dimensions: 4"
        );
        assert_eq!(
            DecodeError::UnsupportedCompressedFormat { element_size: 4 }.to_string(),
            "unsupported compressed format: 4-byte blocks"
        );
        assert_eq!(
            DecodeError::UnsupportedValueSize { element_size: 6 }.to_string(),
            "unsupported value size: 6 bytes"
        );
        assert_eq!(
            DecodeError::AllocationFailed { bytes: 64 }.to_string(),
            "failed to allocate 64 bytes for texel data"
        );
    }
}
