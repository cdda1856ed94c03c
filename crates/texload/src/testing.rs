//! KTX2 file builder for tests.

use texload_decode::VkFormat;

const IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x32, 0x30, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];
const HEADER_LEN: usize = 80;
const LEVEL_INDEX_ENTRY_LEN: usize = 24;
const SUPERCOMPRESSION_ZSTD: u32 = 2;

/// Description of a texture to serialize.
#[derive(Debug, Clone)]
pub struct TestTexture {
    pub format: VkFormat,
    /// Bytes per texel or block, written to the descriptor's first plane.
    pub element_size: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub layers: u32,
    pub faces: u32,
    /// Raw image data per level, all layers and faces concatenated.
    pub levels: Vec<Vec<u8>>,
    pub orientation: Option<&'static str>,
    pub zstd: bool,
}

impl TestTexture {
    /// A 2D texture with no array layers.
    pub fn new_2d(format: VkFormat, width: u32, height: u32, levels: Vec<Vec<u8>>) -> Self {
        Self {
            format,
            element_size: format.format_size().map_or(0, |size| size.block_bytes()),
            width,
            height,
            depth: 0,
            layers: 0,
            faces: 1,
            levels,
            orientation: None,
            zstd: false,
        }
    }

    /// Serialize to a KTX2 byte stream.
    ///
    /// Levels are written smallest first, each aligned to the least common
    /// multiple of the element size and 4.
    pub fn to_bytes(&self) -> Vec<u8> {
        let level_count = self.levels.len();
        let dfd = self.dfd();
        let kvd = self.kvd();

        let dfd_offset = HEADER_LEN + LEVEL_INDEX_ENTRY_LEN * level_count;
        let kvd_offset = dfd_offset + dfd.len();
        let mut data_start = kvd_offset + kvd.len();

        let payloads: Vec<Vec<u8>> = self
            .levels
            .iter()
            .map(|raw| {
                if self.zstd {
                    zstd_encode(raw)
                } else {
                    raw.clone()
                }
            })
            .collect();

        let alignment = if self.zstd {
            1
        } else {
            lcm(self.element_size.max(1) as usize, 4)
        };
        let mut placements = vec![(0usize, 0usize); level_count];
        for (level, payload) in payloads.iter().enumerate().rev() {
            data_start = data_start.next_multiple_of(alignment);
            placements[level] = (data_start, payload.len());
            data_start += payload.len();
        }

        let mut out = Vec::with_capacity(data_start);
        out.extend_from_slice(&IDENTIFIER);
        for value in [
            self.format.0,
            1,
            self.width,
            self.height,
            self.depth,
            self.layers,
            self.faces,
            u32::try_from(level_count).unwrap(),
            if self.zstd { SUPERCOMPRESSION_ZSTD } else { 0 },
        ] {
            out.extend_from_slice(&value.to_le_bytes());
        }
        for value in [dfd_offset, dfd.len(), kvd_offset, kvd.len()] {
            out.extend_from_slice(&u32::try_from(value).unwrap().to_le_bytes());
        }
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());

        for (level, &(offset, len)) in placements.iter().enumerate() {
            out.extend_from_slice(&(offset as u64).to_le_bytes());
            out.extend_from_slice(&(len as u64).to_le_bytes());
            out.extend_from_slice(&(self.levels[level].len() as u64).to_le_bytes());
        }
        out.extend_from_slice(&dfd);
        out.extend_from_slice(&kvd);

        for (level, payload) in payloads.iter().enumerate().rev() {
            out.resize(placements[level].0, 0);
            out.extend_from_slice(payload);
        }
        out
    }

    /// A basic data format descriptor block without samples.
    fn dfd(&self) -> Vec<u8> {
        let size = self.format.format_size();
        let mut block = Vec::with_capacity(28);
        block.extend_from_slice(&28u32.to_le_bytes());
        block.extend_from_slice(&0u32.to_le_bytes());
        block.extend_from_slice(&2u16.to_le_bytes());
        block.extend_from_slice(&24u16.to_le_bytes());
        block.extend_from_slice(&[1, 1, 1, 0]);
        let (bw, bh, bd) = size.map_or((1, 1, 1), |s| {
            (s.block_width, s.block_height, s.block_depth)
        });
        block.extend_from_slice(&[bw - 1, bh - 1, bd - 1, 0]);
        block.push(u8::try_from(self.element_size).unwrap());
        block.extend_from_slice(&[0; 7]);
        block
    }

    fn kvd(&self) -> Vec<u8> {
        let Some(orientation) = self.orientation else {
            return Vec::new();
        };
        let mut entry = b"KTXorientation\0".to_vec();
        entry.extend_from_slice(orientation.as_bytes());
        entry.push(0);

        let mut out = u32::try_from(entry.len()).unwrap().to_le_bytes().to_vec();
        out.extend_from_slice(&entry);
        out.resize(out.len().next_multiple_of(4), 0);
        out
    }
}

fn lcm(a: usize, b: usize) -> usize {
    fn gcd(a: usize, b: usize) -> usize {
        if b == 0 { a } else { gcd(b, a % b) }
    }
    a / gcd(a, b) * b
}

#[cfg(feature = "zstd")]
fn zstd_encode(raw: &[u8]) -> Vec<u8> {
    zstd::encode_all(raw, 0).unwrap()
}

#[cfg(not(feature = "zstd"))]
fn zstd_encode(_raw: &[u8]) -> Vec<u8> {
    panic!("zstd test textures need the zstd feature");
}

/// Bytes `0, 1, 2, ...` wrapping at 256.
pub fn ramp(len: usize, start: u8) -> Vec<u8> {
    (0..len)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let i = i as u8;
            start.wrapping_add(i)
        })
        .collect()
}

/// Route log output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
