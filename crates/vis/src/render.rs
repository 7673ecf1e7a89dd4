//! Draws lines on a canvas and encodes the canvas into an image.

use chrono::DateTime;
use chrono::Utc;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use promplot_query::Matrix;
use tracing::debug;

use crate::chart::Chart;
use crate::error::Result;
use crate::font;
use crate::format::ImageFormat;
use crate::line;
use crate::line::Bounds;
use crate::line::Line;

/// Renders a matrix into a chart image.
pub trait Render {
    /// Renders one line per series of `matrix` into an image of the given `format`.
    fn render(&self, matrix: &Matrix, title: &str, format: &str) -> Result<Chart>;
}

/// The plotters based renderer.
///
/// The canvas is 24cm by 20cm at 96 dpi with a 6mm margin.
#[derive(Debug, Clone)]
pub struct Plotter {
    size: (u32, u32),
    margin: u32,
}

impl Plotter {
    const TITLE_FONT_SIZE: f64 = 38.0;
    const TEXT_FONT_SIZE: f64 = 12.0;
    const LINE_WIDTH: u32 = 1;
    const TICK_FORMAT: &str = "%Y-%m-%d %H:%M";
    const X_LABELS: usize = 6;
    const X_LABEL_AREA_SIZE: u32 = 40;
    const Y_LABEL_AREA_SIZE: u32 = 70;
    const LEGEND_SAMPLE_LENGTH: i32 = 20;

    /// Creates a plotter for a canvas of `size` pixels with `margin` pixels on every side.
    pub fn new(size: (u32, u32), margin: u32) -> Plotter {
        Self { size, margin }
    }

    fn draw<DB>(&self, root: DrawingArea<DB, Shift>, lines: &[Line], title: &str) -> Result<()>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE)?;

        let bounds = Bounds::new(lines, Utc::now());
        let title_font = (font::FAMILY, Self::TITLE_FONT_SIZE)
            .into_font()
            .style(FontStyle::Bold);
        let text_font = (font::FAMILY, Self::TEXT_FONT_SIZE).into_font();

        let area = root.margin(self.margin, self.margin, self.margin, self.margin);
        let mut chart = ChartBuilder::on(&area)
            .caption(title, title_font)
            .x_label_area_size(Self::X_LABEL_AREA_SIZE)
            .y_label_area_size(Self::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(bounds.x, bounds.y)?;

        chart
            .configure_mesh()
            .x_labels(Self::X_LABELS)
            .x_label_formatter(&|timestamp: &DateTime<Utc>| {
                timestamp.format(Self::TICK_FORMAT).to_string()
            })
            .label_style(text_font.clone())
            .draw()?;

        for line in lines {
            let color = line.color;
            let mut label = line.label.as_deref();

            for segment in line.segments() {
                let series = chart.draw_series(LineSeries::new(
                    segment.iter().copied(),
                    color.stroke_width(Self::LINE_WIDTH),
                ))?;

                if let Some(text) = label.take() {
                    series.label(text).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + Self::LEGEND_SAMPLE_LENGTH, y)],
                            color.stroke_width(Self::LINE_WIDTH),
                        )
                    });
                }
            }
        }

        if lines.iter().any(|line| line.label.is_some()) {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font(text_font)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;

        Ok(())
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new((907, 756), 23)
    }
}

impl Render for Plotter {
    fn render(&self, matrix: &Matrix, title: &str, format: &str) -> Result<Chart> {
        let lines = line::lines(matrix)?;
        let format: ImageFormat = format.parse()?;
        font::register()?;
        let file = Chart::temp_file(format)?;

        debug!(
            lines = lines.len(),
            %format,
            path = %file.path().display(),
            "drawing chart"
        );

        match format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(file.path(), self.size).into_drawing_area();
                self.draw(root, &lines, title)?;
            }
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
                let root = BitMapBackend::new(file.path(), self.size).into_drawing_area();
                self.draw(root, &lines, title)?;
            }
        }

        Ok(Chart::new(file, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use promplot_query::Metric;
    use promplot_query::Sample;
    use promplot_query::Series;

    use crate::error::RenderError;

    fn svg_elements(chart: &Chart, element: &str) -> Result<usize> {
        let svg = String::from_utf8_lossy(&chart.to_bytes()?).into_owned();
        Ok(svg.matches(element).count())
    }

    fn matrix(values: &[&str]) -> Matrix {
        let samples = values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let timestamp = Utc.timestamp_opt(1_486_202_885 + idx as i64 * 60, 0).unwrap();
                Sample::new(timestamp, *value)
            })
            .collect();
        let metric: Metric = [("__name__", "up"), ("job", "node")].into_iter().collect();

        vec![Series::new(metric, samples)]
    }

    #[test]
    fn invalid_value_fails_before_canvas_is_created() {
        let error = Plotter::default()
            .render(&matrix(&["1", "x"]), "title", "unknown")
            .unwrap_err();

        assert!(matches!(error, RenderError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_format_fails_at_canvas_creation() {
        let error = Plotter::default()
            .render(&matrix(&["1", "2"]), "title", "gif")
            .unwrap_err();

        assert!(matches!(error, RenderError::UnsupportedFormat(ref format) if format == "gif"));
    }

    #[test]
    fn render_png() -> Result<()> {
        let chart = Plotter::default().render(&matrix(&["1", "3", "2"]), "Up", "png")?;

        assert_eq!(chart.format(), ImageFormat::Png);
        assert!(chart.to_bytes()?.starts_with(b"\x89PNG"));

        Ok(())
    }

    #[test]
    fn render_svg() -> Result<()> {
        let chart = Plotter::default().render(&matrix(&["1", "3", "2"]), "Up", "svg")?;

        let svg = String::from_utf8_lossy(&chart.to_bytes()?).into_owned();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Up"));

        Ok(())
    }

    #[test]
    fn render_extreme_values() -> Result<()> {
        let chart = Plotter::default().render(&matrix(&["1e308", "-1e308"]), "Up", "png")?;

        assert!(chart.to_bytes()?.starts_with(b"\x89PNG"));

        Ok(())
    }

    #[test]
    fn flat_large_values_keep_value_axis() -> Result<()> {
        let plotter = Plotter::default();
        let small = plotter.render(&matrix(&["5", "5", "5"]), "Up", "svg")?;
        let large = plotter.render(&matrix(&["1e17", "1e17", "1e17"]), "Up", "svg")?;

        // Title and time labels alone account for seven texts.
        assert!(svg_elements(&small, "<text")? > 7);
        assert!(svg_elements(&large, "<text")? > 7);

        Ok(())
    }
}
