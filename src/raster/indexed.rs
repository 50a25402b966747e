use std::collections::HashMap;

use image::RgbaImage;

use crate::{
    foundation::{
        core::Rgb8,
        error::{SeqgifError, SeqgifResult},
    },
    raster::palette::{self, ColorTable},
};

/// Indexed-color image: every pixel is an index into the raster's own [`ColorTable`].
///
/// Invariant: every stored index is a valid entry of `table`. Constructors validate it and
/// the mutating methods only ever write indices that came from the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    table: ColorTable,
}

impl Raster {
    /// A raster of a single solid color.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let mut table = ColorTable::new();
        let idx = palette::resolve(&mut table, color);
        Self {
            width,
            height,
            pixels: vec![idx; pixel_count(width, height)],
            table,
        }
    }

    pub fn from_parts(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        table: ColorTable,
    ) -> SeqgifResult<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(SeqgifError::validation(format!(
                "raster {width}x{height} needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        if let Some(&bad) = pixels.iter().find(|&&p| usize::from(p) >= table.len()) {
            return Err(SeqgifError::validation(format!(
                "pixel index {bad} is outside the {}-entry color table",
                table.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            table,
        })
    }

    /// Flatten `img` over `background` and index its colors.
    ///
    /// Images with at most 256 distinct colors keep them exactly, in first-seen order.
    /// Busier images lose low bits per channel until the colors fit.
    pub fn from_rgba8(img: &RgbaImage, background: Rgb8) -> Self {
        let (width, height) = img.dimensions();
        let flat: Vec<Rgb8> = img
            .pixels()
            .map(|p| flatten_over(p.0, background))
            .collect();

        for bits in (MIN_CHANNEL_BITS + 1..=8).rev() {
            if let Some((pixels, table)) = index_colors(&flat, bits) {
                if bits < 8 {
                    tracing::debug!(bits, colors = table.len(), "reduced color depth");
                }
                return Self {
                    width,
                    height,
                    pixels,
                    table,
                };
            }
        }

        // At the minimum depth there are at most 64 colors; resolve never has to fall back.
        let mut table = ColorTable::new();
        let pixels = flat
            .iter()
            .map(|&c| palette::resolve(&mut table, reduce_color(c, MIN_CHANNEL_BITS)))
            .collect();
        tracing::debug!(bits = MIN_CHANNEL_BITS, colors = table.len(), "reduced color depth");
        Self {
            width,
            height,
            pixels,
            table,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_parts(self) -> (u32, u32, Vec<u8>, ColorTable) {
        (self.width, self.height, self.pixels, self.table)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.pixel(x, y).and_then(|i| self.table.get(i))
    }

    /// Write a table index. Returns `false` (and leaves the raster untouched) when the
    /// coordinate is out of bounds or the index is not in the table.
    pub fn set_pixel(&mut self, x: u32, y: u32, index: u8) -> bool {
        if usize::from(index) >= self.table.len() {
            return false;
        }
        match self.offset(x, y) {
            Some(i) => {
                self.pixels[i] = index;
                true
            }
            None => false,
        }
    }

    /// Table index for `target` in this raster's own table (see [`palette::resolve`]).
    pub fn resolve_color(&mut self, target: Rgb8) -> u8 {
        palette::resolve(&mut self.table, target)
    }

    /// Fill the disc of `radius` around `(cx, cy)`. Parts outside the raster are clipped.
    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: u32, index: u8) {
        if usize::from(index) >= self.table.len() || self.pixels.is_empty() {
            return;
        }
        let r = i64::from(radius);
        let r2 = r * r;
        let y0 = (cy - r).max(0);
        let y1 = (cy + r).min(i64::from(self.height) - 1);
        let x0 = (cx - r).max(0);
        let x1 = (cx + r).min(i64::from(self.width) - 1);

        for y in y0..=y1 {
            let dy = y - cy;
            let row = y as usize * self.width as usize;
            for x in x0..=x1 {
                let dx = x - cx;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[row + x as usize] = index;
                }
            }
        }
    }

    /// Expand through the color table into an opaque RGBA image.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.color_at(x, y).unwrap_or_default();
            image::Rgba([c.r, c.g, c.b, 255])
        })
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

const MIN_CHANNEL_BITS: u32 = 2;

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn flatten_over(px: [u8; 4], bg: Rgb8) -> Rgb8 {
    let a = u16::from(px[3]);
    if a == 255 {
        return Rgb8::new(px[0], px[1], px[2]);
    }
    let mix = |c: u8, b: u8| ((u16::from(c) * a + u16::from(b) * (255 - a) + 127) / 255) as u8;
    Rgb8::new(mix(px[0], bg.r), mix(px[1], bg.g), mix(px[2], bg.b))
}

/// Keep the top `bits` of a channel and move it to the center of its bucket.
fn reduce_channel(c: u8, bits: u32) -> u8 {
    if bits >= 8 {
        return c;
    }
    let drop = 8 - bits;
    let base = (c >> drop) << drop;
    base | (1 << (drop - 1))
}

fn reduce_color(c: Rgb8, bits: u32) -> Rgb8 {
    Rgb8::new(
        reduce_channel(c.r, bits),
        reduce_channel(c.g, bits),
        reduce_channel(c.b, bits),
    )
}

fn index_colors(flat: &[Rgb8], bits: u32) -> Option<(Vec<u8>, ColorTable)> {
    let mut table = ColorTable::new();
    let mut lookup = HashMap::<Rgb8, u8>::new();
    let mut pixels = Vec::with_capacity(flat.len());

    for &c in flat {
        let c = reduce_color(c, bits);
        let idx = match lookup.get(&c) {
            Some(&i) => i,
            None => {
                let i = table.push_unique(c)?;
                lookup.insert(c, i);
                i
            }
        };
        pixels.push(idx);
    }
    Some((pixels, table))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/indexed.rs"]
mod tests;
