//! Image formats supported by the drawing backends.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::RenderError;

/// The format of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Portable Network Graphics, the default.
    #[default]
    Png,
    /// JPEG, accepted as `jpg` or `jpeg`.
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// Scalable Vector Graphics.
    Svg,
}

impl ImageFormat {
    /// The file extension for the format, without the leading dot.
    ///
    /// The bitmap backend picks the image encoder from the file
    /// extension, so it must be one the encoder recognizes.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("png".parse::<ImageFormat>().ok(), Some(ImageFormat::Png));
        assert_eq!("PNG".parse::<ImageFormat>().ok(), Some(ImageFormat::Png));
        assert_eq!("jpeg".parse::<ImageFormat>().ok(), Some(ImageFormat::Jpeg));
        assert_eq!("jpg".parse::<ImageFormat>().ok(), Some(ImageFormat::Jpeg));
        assert_eq!("svg".parse::<ImageFormat>().ok(), Some(ImageFormat::Svg));
    }

    #[test]
    fn parse_unknown_format_fails() {
        let error = "gif".parse::<ImageFormat>().unwrap_err();

        assert_eq!(error.to_string(), "render error: unsupported image format: gif");
    }
}
