//! Value parsers for the flags that need more than `FromStr`.

mod duration;
mod unix_time;

pub(crate) use duration::format_duration;
pub(crate) use duration::parse_duration;
pub(crate) use unix_time::format_unix_time;
pub(crate) use unix_time::parse_unix_time;
