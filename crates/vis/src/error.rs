//! Defines the `Error` and `Result` types that this crate uses.

use std::error::Error;
use std::fmt::Display;
use std::io::Error as IoError;

use plotters::drawing::DrawingAreaErrorKind;

/// The result type that uses [RenderError] as the error type.
pub type Result<T> = std::result::Result<T, RenderError>;

/// The error type for rendering a chart of range query results.
#[derive(Debug)]
#[non_exhaustive]
pub enum RenderError {
    /// A sample value that could not be parsed as a floating point number.
    InvalidValue {
        /// The metric of the series the sample belongs to.
        metric: String,
        /// The sample value as received from the server.
        value: String,
    },

    /// The requested image format is not supported by the drawing backends.
    UnsupportedFormat(String),

    /// A [std::io::Error] encountered while creating or reading the image file.
    Io(IoError),

    /// The embedded font could not be loaded.
    Font,

    /// An error reported by the drawing backend, including font
    /// loading and image encoding failures.
    Draw(String),
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Io(error) => Some(error),
            RenderError::InvalidValue { .. }
            | RenderError::UnsupportedFormat(_)
            | RenderError::Font
            | RenderError::Draw(_) => None,
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let render_error = "render error:";

        match self {
            RenderError::InvalidValue { metric, value } => {
                write!(f, "{render_error} sample value not float: {value} (series {metric})")
            }
            RenderError::UnsupportedFormat(format) => {
                write!(f, "{render_error} unsupported image format: {format}")
            }
            RenderError::Io(error) => write!(f, "{render_error} I/O error: {error}"),
            RenderError::Font => write!(f, "{render_error} the embedded font could not be loaded"),
            RenderError::Draw(error) => write!(f, "{render_error} drawing failed: {error}"),
        }
    }
}

impl From<IoError> for RenderError {
    fn from(error: IoError) -> Self {
        RenderError::Io(error)
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(error.to_string())
    }
}
