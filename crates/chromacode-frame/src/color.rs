use serde::{Deserialize, Serialize};

/// The eight colors a frame cell can take.
///
/// Each color carries 3 bits of information: one per RGB channel
/// (bit 2 = red, bit 1 = green, bit 0 = blue).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Aqua = 3,
    Red = 4,
    Magenta = 5,
    Yellow = 6,
    White = 7,
}

const BY_BITS: [CellColor; 8] = [
    CellColor::Black,
    CellColor::Blue,
    CellColor::Green,
    CellColor::Aqua,
    CellColor::Red,
    CellColor::Magenta,
    CellColor::Yellow,
    CellColor::White,
];

impl CellColor {
    /// The raw 3-bit channel code of this color.
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// The color for a raw 3-bit channel code. Only the low 3 bits are used.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        BY_BITS[(bits & 7) as usize]
    }

    /// Classify a sampled RGB value by thresholding each channel at
    /// half-intensity. Total over all inputs.
    #[inline]
    pub fn classify(rgb: [f64; 3]) -> Self {
        let code = u8::from(rgb[0] > 127.0) << 2
            | u8::from(rgb[1] > 127.0) << 1
            | u8::from(rgb[2] > 127.0);
        BY_BITS[code as usize]
    }

    /// The color paired with this one in the corner templates, if any.
    /// Green and aqua are paired, as are yellow and white.
    pub fn template_opposite(self) -> Option<Self> {
        match self {
            CellColor::Green => Some(CellColor::Aqua),
            CellColor::Aqua => Some(CellColor::Green),
            CellColor::Yellow => Some(CellColor::White),
            CellColor::White => Some(CellColor::Yellow),
            _ => None,
        }
    }

    /// Saturated RGB channel values of this color.
    pub fn rgb(self) -> [u8; 3] {
        let bits = self.bits();
        [
            if bits & 4 != 0 { 255 } else { 0 },
            if bits & 2 != 0 { 255 } else { 0 },
            if bits & 1 != 0 { 255 } else { 0 },
        ]
    }

    /// The data value this color represents at grid position `(x, y)`,
    /// with the positional mask removed.
    #[inline]
    pub fn data_bits(self, x: usize, y: usize) -> u8 {
        (self.bits() + 8 - mask(x, y)) % 8
    }

    /// The color that represents `bits` at grid position `(x, y)`.
    #[inline]
    pub fn from_data_bits(x: usize, y: usize, bits: u8) -> Self {
        Self::from_bits((bits + mask(x, y)) % 8)
    }
}

/// The positional mask value at `(x, y)`.
///
/// This scrambling is shared with the frame generator and must stay
/// bit-exact; a cell's displayed color is `data + mask` modulo 8.
#[inline]
pub fn mask(x: usize, y: usize) -> u8 {
    (((x * y) % (2 * x + y + 1) + y) % 8) as u8
}
