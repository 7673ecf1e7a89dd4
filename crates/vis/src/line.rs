//! Converts the series of a matrix into plottable lines.

use std::ops::Range;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use plotters::style::RGBColor;
use promplot_query::Matrix;
use promplot_query::Series;

use crate::error::RenderError;
use crate::error::Result;
use crate::legend;
use crate::palette;

/// A point of a line: the sample timestamp and its numeric value.
pub type Point = (DateTime<Utc>, f64);

/// A series prepared for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The legend entry of the line, if it has one.
    pub label: Option<String>,
    /// The stroke color of the line.
    pub color: RGBColor,
    /// The points of the line in timestamp order.
    pub points: Vec<Point>,
}

impl Line {
    /// Splits the line into runs of finite points.
    ///
    /// `NaN` and infinite values cannot be drawn, so they break the line.
    pub fn segments(&self) -> impl Iterator<Item = &[Point]> {
        self.points
            .split(|(_, value)| !value.is_finite())
            .filter(|segment| !segment.is_empty())
    }

    fn finite_points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|(_, value)| value.is_finite())
    }
}

/// Builds one line per series.
///
/// Every sample value is parsed before anything is drawn, so a single
/// malformed value fails the whole chart.
pub fn lines(matrix: &Matrix) -> Result<Vec<Line>> {
    let with_legend = matrix.len() > 1;

    matrix
        .iter()
        .enumerate()
        .map(|(idx, series)| {
            let metric = series.metric.to_string();
            let label = if with_legend {
                legend::label(&metric).map(str::to_owned)
            } else {
                None
            };

            Ok(Line {
                label,
                color: palette::color(idx),
                points: points(series, &metric)?,
            })
        })
        .collect()
}

fn points(series: &Series, metric: &str) -> Result<Vec<Point>> {
    let mut points = series
        .samples
        .iter()
        .map(|sample| {
            sample
                .value
                .parse::<f64>()
                .map(|value| (sample.timestamp, value))
                .map_err(|_| RenderError::InvalidValue {
                    metric: metric.to_owned(),
                    value: sample.value.clone(),
                })
        })
        .collect::<Result<Vec<Point>>>()?;

    points.sort_by_key(|(timestamp, _)| *timestamp);

    Ok(points)
}

/// The axis ranges that fit all finite points of the lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// The time range of the X axis.
    pub x: Range<DateTime<Utc>>,
    /// The value range of the Y axis.
    pub y: Range<f64>,
}

impl Bounds {
    const EMPTY_TIME_RANGE_SECS: i64 = 3600;
    const VALUE_PADDING: f64 = 0.05;
    const MIN_FLAT_PADDING: f64 = 1.0;
    // Padded bounds within this limit keep the axis width finite.
    const VALUE_LIMIT: f64 = f64::MAX / 4.0;

    /// Computes the bounds of `lines`; `now` ends the time range of a chart without points.
    pub fn new(lines: &[Line], now: DateTime<Utc>) -> Bounds {
        let points = lines.iter().flat_map(Line::finite_points);

        let mut x: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        let mut y: Option<(f64, f64)> = None;
        for &(timestamp, value) in points {
            x = Some(match x {
                Some((min, max)) => (min.min(timestamp), max.max(timestamp)),
                None => (timestamp, timestamp),
            });
            y = Some(match y {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }

        let empty_time_range = TimeDelta::seconds(Self::EMPTY_TIME_RANGE_SECS);
        let x = match x {
            Some((min, max)) if min == max => {
                let half = empty_time_range / 2;
                (min - half)..(max + half)
            }
            Some((min, max)) => min..max,
            None => (now - empty_time_range)..now,
        };

        let y = match y {
            Some((min, max)) => Self::value_range(min, max),
            None => 0.0..1.0,
        };

        Bounds { x, y }
    }

    fn value_range(min: f64, max: f64) -> Range<f64> {
        let min = min.clamp(-Self::VALUE_LIMIT, Self::VALUE_LIMIT);
        let max = max.clamp(-Self::VALUE_LIMIT, Self::VALUE_LIMIT);

        let padding = if min == max {
            (min.abs() * Self::VALUE_PADDING).max(Self::MIN_FLAT_PADDING)
        } else {
            (max / 2.0 - min / 2.0) * 2.0 * Self::VALUE_PADDING
        };

        (min - padding)..(max + padding)
    }
}
