use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{
    assets::format::ImageFormatKind,
    foundation::{
        core::Rgb8,
        error::{SeqgifError, SeqgifResult},
    },
    raster::indexed::Raster,
};

/// Read and decode a still image into an indexed raster.
///
/// The decoder is picked from the extension (see [`ImageFormatKind`]), not by sniffing the
/// file contents. Transparent pixels are flattened over `background`.
pub fn decode_raster(path: &Path, background: Rgb8) -> SeqgifResult<Raster> {
    let kind = ImageFormatKind::from_path(path);
    if kind.is_fallback() {
        tracing::warn!(
            path = %path.display(),
            "unrecognized image extension, decoding as JPEG"
        );
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(|e| SeqgifError::decode(format!("{e:#}")))?;
    let rgba = decode_rgba(&bytes, kind).map_err(|e| {
        SeqgifError::decode(format!("decode {kind:?} image '{}': {e}", path.display()))
    })?;
    Ok(Raster::from_rgba8(&rgba, background))
}

/// Decode encoded image bytes of a known container into an indexed raster.
pub fn decode_raster_bytes(
    bytes: &[u8],
    kind: ImageFormatKind,
    background: Rgb8,
) -> SeqgifResult<Raster> {
    let rgba = decode_rgba(bytes, kind)
        .map_err(|e| SeqgifError::decode(format!("decode {kind:?} image: {e}")))?;
    Ok(Raster::from_rgba8(&rgba, background))
}

fn decode_rgba(bytes: &[u8], kind: ImageFormatKind) -> image::ImageResult<image::RgbaImage> {
    image::load_from_memory_with_format(bytes, kind.image_format()).map(|img| img.to_rgba8())
}

/// Re-encode a raster as a still image.
pub fn encode_still(raster: &Raster, kind: ImageFormatKind) -> SeqgifResult<Vec<u8>> {
    let rgba = image::DynamicImage::ImageRgba8(raster.to_rgba8());
    let img = match kind {
        ImageFormatKind::Gif => rgba,
        // Neither needs alpha; the JPEG encoder refuses it outright.
        ImageFormatKind::Png | ImageFormatKind::Jpeg | ImageFormatKind::UnknownAsJpeg => {
            image::DynamicImage::ImageRgb8(rgba.to_rgb8())
        }
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), kind.image_format())
        .with_context(|| format!("encode {kind:?} still"))
        .map_err(|e| SeqgifError::encode(format!("{e:#}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
