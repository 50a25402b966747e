use std::path::Path;

/// Still-image container, chosen from the file extension alone.
///
/// `UnknownAsJpeg` is the catch-all: any other extension (or none) is decoded as JPEG.
/// That silently mis-handles formats such as BMP or WebP; the variant exists so callers can
/// see and log the fallback instead of it happening implicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormatKind {
    Png,
    Jpeg,
    Gif,
    UnknownAsJpeg,
}

impl ImageFormatKind {
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::UnknownAsJpeg)
    }

    /// Case-insensitive, without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "gif" => Self::Gif,
            _ => Self::UnknownAsJpeg,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::UnknownAsJpeg)
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
            Self::Jpeg | Self::UnknownAsJpeg => image::ImageFormat::Jpeg,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/format.rs"]
mod tests;
