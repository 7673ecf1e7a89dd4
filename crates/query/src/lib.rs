//! A small blocking client for the Prometheus HTTP API range queries.
//!
//! The crate covers only what `promplot` needs: evaluating a PromQL
//! expression over a time range and returning the resulting matrix.

mod client;
mod range;
mod response;

pub mod error;
pub mod matrix;

pub use crate::client::PrometheusClient;
pub use crate::matrix::Matrix;
pub use crate::matrix::Metric;
pub use crate::matrix::Sample;
pub use crate::matrix::Series;
pub use crate::range::RangeQuery;
