//! The range vector returned by a range query.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Utc;

const METRIC_NAME_LABEL: &str = "__name__";

/// An ordered collection of series, in the order returned by the server.
pub type Matrix = Vec<Series>;

/// One time series of a range vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub metric: Metric,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(metric: Metric, samples: Vec<Sample>) -> Series {
        Self { metric, samples }
    }
}

/// A single sample of a series.
///
/// The value is kept in its textual form, the way the Prometheus API
/// transfers it, so that special values such as `NaN` or `+Inf`
/// are not lost before they reach the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: String,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: impl Into<String>) -> Sample {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}

/// The label set that identifies a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metric(BTreeMap<String, String>);

impl Metric {
    pub fn new(labels: BTreeMap<String, String>) -> Metric {
        Self(labels)
    }

    /// Returns the metric name, i.e. the value of the `__name__` label.
    pub fn name(&self) -> Option<&str> {
        self.0.get(METRIC_NAME_LABEL).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Metric
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Formats the metric as `name{label="value", ...}`.
///
/// A metric that has only a name is printed without braces and
/// an empty label set is printed as `{}`.
impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = self.name().unwrap_or_default();
        let mut labels = self
            .0
            .iter()
            .filter(|(label, _)| *label != METRIC_NAME_LABEL)
            .peekable();

        if labels.peek().is_none() {
            return match self.name() {
                Some(name) => f.write_str(name),
                None => f.write_str("{}"),
            };
        }

        write!(f, "{name}{{")?;
        for (idx, (label, value)) in labels.enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{label}={value:?}")?;
        }
        f.write_str("}")
    }
}
