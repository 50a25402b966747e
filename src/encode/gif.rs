use image::{RgbaImage, codecs::gif::GifEncoder};

use crate::{
    foundation::{
        core::{FrameDuration, LoopCount, Rgb8},
        error::{SeqgifError, SeqgifResult},
    },
    raster::indexed::Raster,
};

/// One frame of the output sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub raster: Raster,
    pub duration: FrameDuration,
}

impl FrameDescriptor {
    pub fn new(raster: Raster, duration: FrameDuration) -> Self {
        Self { raster, duration }
    }
}

/// Turns an ordered frame list into one encoded animation.
///
/// Ordering contract: `frames` is already in display order. Assemblers only read the rasters.
pub trait SequenceAssembler: Send {
    fn assemble(
        &mut self,
        frames: &[FrameDescriptor],
        loop_count: LoopCount,
    ) -> SeqgifResult<Vec<u8>>;
}

/// Animated GIF output via the `image` crate's GIF encoder.
///
/// The logical screen takes the size of the first frame. Other frames are anchored at the
/// top-left, padded with `background` or cropped. Cropping drops whatever lies right of or
/// below the screen, including any overlay drawn there; [`build_frames`] plans indicator rows
/// inside the visible area for that reason.
///
/// [`build_frames`]: crate::build_frames
#[derive(Clone, Debug)]
pub struct GifAssembler {
    pub background: Rgb8,
}

impl Default for GifAssembler {
    fn default() -> Self {
        Self {
            background: Rgb8::WHITE,
        }
    }
}

impl GifAssembler {
    pub fn new(background: Rgb8) -> Self {
        Self { background }
    }
}

impl SequenceAssembler for GifAssembler {
    #[tracing::instrument(skip(self, frames), fields(frames = frames.len()))]
    fn assemble(
        &mut self,
        frames: &[FrameDescriptor],
        loop_count: LoopCount,
    ) -> SeqgifResult<Vec<u8>> {
        let first = frames
            .first()
            .ok_or_else(|| SeqgifError::validation("cannot assemble an empty sequence"))?;
        let (width, height) = first.raster.dimensions();
        if width == 0 || height == 0 {
            return Err(SeqgifError::validation(
                "first frame width/height must be non-zero",
            ));
        }

        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut buf);
            encoder
                .set_repeat(loop_count.to_repeat())
                .map_err(|e| SeqgifError::encode(format!("set gif repeat: {e}")))?;

            for (idx, f) in frames.iter().enumerate() {
                let canvas = fit_to_screen(&f.raster, width, height, self.background);
                let frame = image::Frame::from_parts(canvas, 0, 0, f.duration.as_delay());
                encoder
                    .encode_frame(frame)
                    .map_err(|e| SeqgifError::encode(format!("encode gif frame {idx}: {e}")))?;
            }
            // Dropping the encoder writes the GIF trailer.
        }

        tracing::debug!(bytes = buf.len(), "assembled gif");
        Ok(buf)
    }
}

fn fit_to_screen(raster: &Raster, width: u32, height: u32, background: Rgb8) -> RgbaImage {
    let img = raster.to_rgba8();
    if img.dimensions() == (width, height) {
        return img;
    }
    let bg = image::Rgba([background.r, background.g, background.b, 255]);
    let mut canvas = RgbaImage::from_pixel(width, height, bg);
    image::imageops::replace(&mut canvas, &img, 0, 0);
    canvas
}

/// What an [`InMemoryAssembler`] saw of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssembledFrame {
    pub width: u32,
    pub height: u32,
    pub duration: FrameDuration,
    pub colors: usize,
}

/// Recording assembler for tests and debugging. Produces no bytes.
#[derive(Debug, Default)]
pub struct InMemoryAssembler {
    loop_count: Option<LoopCount>,
    pub(crate) frames: Vec<AssembledFrame>,
}

impl InMemoryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loop_count(&self) -> Option<LoopCount> {
        self.loop_count
    }

    pub fn frames(&self) -> &[AssembledFrame] {
        &self.frames
    }
}

impl SequenceAssembler for InMemoryAssembler {
    fn assemble(
        &mut self,
        frames: &[FrameDescriptor],
        loop_count: LoopCount,
    ) -> SeqgifResult<Vec<u8>> {
        self.loop_count = Some(loop_count);
        self.frames = frames
            .iter()
            .map(|f| AssembledFrame {
                width: f.raster.width(),
                height: f.raster.height(),
                duration: f.duration,
                colors: f.raster.table().len(),
            })
            .collect();
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
