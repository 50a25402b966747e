use image::codecs::gif::Repeat;

/// An opaque 8-bit RGB color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal; bits above 24 are ignored.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Display time of one frame, in milliseconds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameDuration(pub u32);

impl FrameDuration {
    pub const DEFAULT_MS: u32 = 100;

    pub fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u32 {
        self.0
    }

    /// GIF delays are stored in hundredths of a second.
    pub fn to_centis(self) -> u16 {
        let cs = (u64::from(self.0) + 5) / 10;
        cs.min(u64::from(u16::MAX)) as u16
    }

    pub fn as_delay(self) -> image::Delay {
        image::Delay::from_numer_denom_ms(self.0, 1)
    }
}

impl Default for FrameDuration {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

/// How many times the animation plays. `0` on the wire means forever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCount {
    #[default]
    Infinite,
    Finite(u16),
}

impl LoopCount {
    pub fn from_wire(n: u16) -> Self {
        if n == 0 {
            Self::Infinite
        } else {
            Self::Finite(n)
        }
    }

    pub fn to_wire(self) -> u16 {
        match self {
            Self::Infinite => 0,
            Self::Finite(n) => n,
        }
    }

    pub(crate) fn to_repeat(self) -> Repeat {
        match self {
            Self::Infinite => Repeat::Infinite,
            Self::Finite(n) => Repeat::Finite(n),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
