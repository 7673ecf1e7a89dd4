use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::TimeDelta;
use chrono::Utc;

/// A PromQL expression evaluated over the `range` that ends at `end`,
/// resolved into `samples` evenly spaced points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    /// The PromQL expression.
    pub query: String,
    /// The evaluation time of the last sample.
    pub end: DateTime<Utc>,
    /// How far the query looks back from `end`.
    pub range: TimeDelta,
    /// The number of steps the range is divided into.
    pub samples: u32,
}

impl RangeQuery {
    pub fn new(query: impl Into<String>, end: DateTime<Utc>, range: TimeDelta, samples: u32) -> Self {
        Self {
            query: query.into(),
            end,
            range,
            samples,
        }
    }

    /// The evaluation time of the first sample.
    pub fn start(&self) -> DateTime<Utc> {
        self.end - self.range
    }

    /// The resolution of the query, i.e. the range divided by the number of samples.
    pub fn step(&self) -> TimeDelta {
        let samples = i32::try_from(self.samples.max(1)).unwrap_or(i32::MAX);
        self.range / samples
    }

    pub(crate) fn params(&self) -> [(&'static str, String); 4] {
        [
            ("query", self.query.clone()),
            ("start", rfc3339(self.start())),
            ("end", rfc3339(self.end)),
            ("step", seconds(self.step())),
        ]
    }
}

fn rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Decimal seconds with up to nanosecond precision and no trailing zeros.
fn seconds(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();
    let secs = delta.num_seconds();
    let nanos = delta.subsec_nanos();

    if nanos == 0 {
        return format!("{sign}{secs}");
    }

    let fraction = format!("{nanos:09}");
    format!("{sign}{secs}.{}", fraction.trim_end_matches('0'))
}
