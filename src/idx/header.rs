use std::fmt;

/// Magic word of an IDX3 unsigned-byte file (images / features).
pub const FEATURE_MAGIC: u32 = 0x0000_0803;
/// Magic word of an IDX1 unsigned-byte file (labels).
pub const LABEL_MAGIC: u32 = 0x0000_0801;

/// Decodes one big-endian header word into a native `u32`.
pub fn decode_be_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Formats a raw header word as space-separated hex bytes, e.g. `00 00 08 03`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The magic word of an IDX file split into its parts.
///
/// ```text
/// byte 0-1: 0x00 0x00   (reserved)
/// byte 2:   data type   (0x08 = unsigned byte)
/// byte 3:   number of dimensions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdxMagic(pub u32);

impl IdxMagic {
    /// Data type code from byte 2.
    pub fn dtype(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Number of dimensions from byte 3.
    pub fn dimensions(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// True if the two reserved leading bytes are zero.
    pub fn reserved_ok(self) -> bool {
        self.0 >> 16 == 0
    }
}

impl fmt::Display for IdxMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#010x} (dtype {:#04x}, {} dims)",
            self.0,
            self.dtype(),
            self.dimensions()
        )
    }
}

/// Parsed header of a feature (IDX3) file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureHeader {
    pub magic: IdxMagic,
    pub samples: usize,
    pub rows: usize,
    pub cols: usize,
}

impl FeatureHeader {
    /// Number of bytes in one sample (`rows * cols`), or `None` on overflow.
    pub fn sample_size(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Bytes of sample data the header promises, or `None` on overflow.
    pub fn data_len(&self) -> Option<usize> {
        self.sample_size()?.checked_mul(self.samples)
    }
}

/// Parsed header of a label (IDX1) file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHeader {
    pub magic: IdxMagic,
    pub labels: usize,
}
