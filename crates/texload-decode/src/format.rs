//! Vulkan format numbers and their block metrics.
//!
//! Containers identify texel layouts by `VkFormat` number. The decoder only
//! needs the size of one block (a single texel for uncompressed formats) and
//! its extent in texels, which this table provides.

/// A Vulkan format number as stored in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VkFormat(pub u32);

/// Block extent and size for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSize {
    /// Block width in texels.
    pub block_width: u8,
    /// Block height in texels.
    pub block_height: u8,
    /// Block depth in texels.
    pub block_depth: u8,
    /// Size of one block in bits.
    pub block_size_bits: u32,
    /// Whether the format is block-compressed.
    pub compressed: bool,
}

impl FormatSize {
    const fn texel(bytes: u32) -> Self {
        Self {
            block_width: 1,
            block_height: 1,
            block_depth: 1,
            block_size_bits: bytes * 8,
            compressed: false,
        }
    }

    const fn block(width: u8, height: u8, bytes: u32) -> Self {
        Self {
            block_width: width,
            block_height: height,
            block_depth: 1,
            block_size_bits: bytes * 8,
            compressed: true,
        }
    }

    /// Size of one block in bytes.
    #[must_use]
    pub fn block_bytes(&self) -> u32 {
        self.block_size_bits / 8
    }
}

/// ASTC block footprints in format-number order (each has UNORM and SRGB).
const ASTC_FOOTPRINTS: [(u8, u8); 14] = [
    (4, 4),
    (5, 4),
    (5, 5),
    (6, 5),
    (6, 6),
    (8, 5),
    (8, 6),
    (8, 8),
    (10, 5),
    (10, 6),
    (10, 8),
    (10, 10),
    (12, 10),
    (12, 12),
];

const PVRTC_FIRST: u32 = 1_000_054_000;
const PVRTC_LAST: u32 = 1_000_054_007;
const ASTC_SFLOAT_FIRST: u32 = 1_000_066_000;
const ASTC_SFLOAT_LAST: u32 = 1_000_066_013;
const A4R4G4B4_UNORM_PACK16: u32 = 1_000_340_000;
const A4B4G4R4_UNORM_PACK16: u32 = 1_000_340_001;

impl VkFormat {
    pub const UNDEFINED: Self = Self(0);
    pub const R8_UNORM: Self = Self(9);
    pub const R8G8_UNORM: Self = Self(16);
    pub const R8G8B8_UNORM: Self = Self(23);
    pub const R8G8B8A8_UNORM: Self = Self(37);
    pub const R8G8B8A8_SRGB: Self = Self(43);
    pub const R16_UNORM: Self = Self(70);
    pub const R16G16B16_UNORM: Self = Self(84);
    pub const R16G16B16A16_UNORM: Self = Self(91);
    pub const R32_SFLOAT: Self = Self(100);
    pub const R32G32B32_SFLOAT: Self = Self(106);
    pub const R32G32B32A32_SFLOAT: Self = Self(109);
    pub const BC1_RGBA_UNORM_BLOCK: Self = Self(133);
    pub const BC3_UNORM_BLOCK: Self = Self(137);
    pub const BC4_UNORM_BLOCK: Self = Self(139);
    pub const BC7_UNORM_BLOCK: Self = Self(145);
    pub const ETC2_R8G8B8_UNORM_BLOCK: Self = Self(147);
    pub const ASTC_4X4_UNORM_BLOCK: Self = Self(157);
    pub const ASTC_8X5_UNORM_BLOCK: Self = Self(167);

    /// Block metrics for this format, or `None` if the format is not in the
    /// table (including `UNDEFINED`).
    #[must_use]
    pub fn format_size(self) -> Option<FormatSize> {
        let size = match self.0 {
            1 | 9..=15 | 127 => FormatSize::texel(1),
            2..=8 | 16..=22 | 70..=76 | 124 => FormatSize::texel(2),
            23..=36 | 128 => FormatSize::texel(3),
            37..=69 | 77..=83 | 98..=100 | 122 | 123 | 125 | 126 | 129 => FormatSize::texel(4),
            84..=90 => FormatSize::texel(6),
            91..=97 | 101..=103 | 110..=112 | 130 => FormatSize::texel(8),
            104..=106 => FormatSize::texel(12),
            107..=109 | 113..=115 => FormatSize::texel(16),
            116..=118 => FormatSize::texel(24),
            119..=121 => FormatSize::texel(32),
            // BC1, BC4.
            131..=134 | 139 | 140 => FormatSize::block(4, 4, 8),
            // BC2, BC3, BC5, BC6H, BC7.
            135..=138 | 141..=146 => FormatSize::block(4, 4, 16),
            // ETC2 RGB, ETC2 RGB A1, EAC R11.
            147..=150 | 153 | 154 => FormatSize::block(4, 4, 8),
            // ETC2 RGBA, EAC RG11.
            151 | 152 | 155 | 156 => FormatSize::block(4, 4, 16),
            157..=184 => {
                let (width, height) = ASTC_FOOTPRINTS[((self.0 - 157) / 2) as usize];
                FormatSize::block(width, height, 16)
            }
            PVRTC_FIRST..=PVRTC_LAST => {
                // Even entries are the 2 bits-per-pixel variants.
                let width = if (self.0 - PVRTC_FIRST) % 2 == 0 { 8 } else { 4 };
                FormatSize::block(width, 4, 8)
            }
            ASTC_SFLOAT_FIRST..=ASTC_SFLOAT_LAST => {
                let (width, height) = ASTC_FOOTPRINTS[(self.0 - ASTC_SFLOAT_FIRST) as usize];
                FormatSize::block(width, height, 16)
            }
            A4R4G4B4_UNORM_PACK16 | A4B4G4R4_UNORM_PACK16 => FormatSize::texel(2),
            _ => return None,
        };
        Some(size)
    }

    /// Whether this format is a block-compressed format.
    #[must_use]
    pub fn is_block_compressed(self) -> bool {
        self.format_size().is_some_and(|size| size.compressed)
    }
}
