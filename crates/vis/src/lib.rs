//! promplot's visualization library.
//!
//! Turns the matrix of a Prometheus range query into a line chart image.
//!
//! **WARNING**: This library is promplot's internal visualization library and
//! there are no plans to stabilize it. The API may break at any time without notice.

#![warn(missing_docs)]

pub(crate) mod font;
pub(crate) mod legend;
pub(crate) mod palette;

pub mod chart;
pub mod error;
pub mod format;
pub mod line;
pub mod render;

pub use crate::chart::Chart;
pub use crate::format::ImageFormat;
pub use crate::render::Plotter;
pub use crate::render::Render;
