use plotters::style::RGBColor;

/// The ColorBrewer "Dark2" qualitative palette.
const DARK2: [RGBColor; 8] = [
    RGBColor(0x1b, 0x9e, 0x77),
    RGBColor(0xd9, 0x5f, 0x02),
    RGBColor(0x75, 0x70, 0xb3),
    RGBColor(0xe7, 0x29, 0x8a),
    RGBColor(0x66, 0xa6, 0x1e),
    RGBColor(0xe6, 0xab, 0x02),
    RGBColor(0xa6, 0x76, 0x1d),
    RGBColor(0x66, 0x66, 0x66),
];

/// Returns the line color of the series at `index`, cycling through the palette.
pub(crate) fn color(index: usize) -> RGBColor {
    DARK2[index % DARK2.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_cycles_through_palette() {
        assert_eq!(color(0), DARK2[0]);
        assert_eq!(color(7), DARK2[7]);
        assert_eq!(color(8), DARK2[0]);
        assert_eq!(color(19), DARK2[3]);
    }
}
