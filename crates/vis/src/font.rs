//! Fonts compiled into the library, so charts render on hosts without system fonts.

use std::sync::OnceLock;

use plotters::style::FontStyle;
use plotters::style::register_font;

use crate::error::RenderError;
use crate::error::Result;

/// The family name the embedded fonts are registered under.
pub(crate) const FAMILY: &str = "sans-serif";

static REGULAR: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Registers the embedded fonts with plotters; later calls are no-ops.
pub(crate) fn register() -> Result<()> {
    let registered = *REGISTERED.get_or_init(|| {
        register_font(FAMILY, FontStyle::Normal, REGULAR).is_ok()
            && register_font(FAMILY, FontStyle::Bold, BOLD).is_ok()
    });

    if registered {
        Ok(())
    } else {
        Err(RenderError::Font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fonts_register() -> Result<()> {
        register()?;
        register()?;

        Ok(())
    }
}
