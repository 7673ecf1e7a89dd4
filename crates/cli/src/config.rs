use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use promplot_query::RangeQuery;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::flags::format_duration;
use crate::target::OutputTarget;

/// Number of data points of the plot.
pub(crate) const SAMPLES: u32 = 100;

/// The validated settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) url: String,
    pub(crate) query: RangeQuery,
    pub(crate) title: String,
    pub(crate) format: String,
    pub(crate) target: OutputTarget,
    pub(crate) silent: bool,
}

impl Config {
    /// Validates the parsed flags. `now` is the query time when `--time` is not set.
    pub(crate) fn new(cli: Cli, now: DateTime<Utc>) -> Result<Config, ConfigError> {
        let url = required(cli.url, "url")?;
        let query = required(cli.query, "query")?;
        let range = cli.range.ok_or(ConfigError::MissingFlag("range"))?;

        if range.is_zero() {
            return Err(ConfigError::ZeroRange);
        }
        if range < TimeDelta::zero() {
            return Err(ConfigError::NegativeRange(format_duration(range)));
        }

        let target = OutputTarget::from_flags(
            cli.file.as_deref(),
            cli.slack.as_deref(),
            cli.channel.as_deref(),
        )?;

        let end = cli.time.unwrap_or(now);

        Ok(Config {
            url,
            query: RangeQuery::new(query, end, range, SAMPLES),
            title: cli.title,
            format: cli.format,
            target,
            silent: cli.silent,
        })
    }

    /// The text announcing an uploaded plot.
    pub(crate) fn notice(&self) -> String {
        format!(
            "{title}: `{query}` over the last {range}",
            title = self.title,
            query = self.query.query,
            range = format_duration(self.query.range)
        )
    }
}

fn required(value: Option<String>, flag: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingFlag(flag))
}
