//! Defines the `Error` and `Result` types that this crate uses.

use std::error::Error;
use std::fmt::Display;

use reqwest::StatusCode;

/// The result type that uses [FetchError] as the error type.
pub type Result<T> = std::result::Result<T, FetchError>;

/// The error type for fetching metrics from a Prometheus server.
#[derive(Debug)]
pub enum FetchError {
    /// The server address could not be parsed or used as a base URL.
    InvalidUrl(String),

    /// A [reqwest::Error] encountered while sending the request
    /// or reading the response.
    Http(reqwest::Error),

    /// The server answered with a non-success status code and a body
    /// that is not a Prometheus API response.
    Response {
        /// The HTTP status code of the response.
        status_code: StatusCode,
        /// The response body.
        message: String,
    },

    /// A [serde_json::Error] encountered while decoding the response body.
    Json(serde_json::Error),

    /// The Prometheus API reported that the query failed.
    Api {
        /// The Prometheus error type, e.g. `bad_data` or `timeout`.
        error_type: String,
        /// The error message.
        message: String,
    },

    /// The query evaluated to something other than a range vector.
    UnsupportedResult(String),

    /// A sample timestamp could not be represented as a date time.
    InvalidTimestamp(f64),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fetch_error = "fetch error:";

        match self {
            FetchError::InvalidUrl(url) => {
                write!(f, "{fetch_error} invalid Prometheus server URL: {url}")
            }
            FetchError::Http(error) => write!(f, "{fetch_error} HTTP request error: {error}"),
            FetchError::Response {
                status_code,
                message,
            } => write!(
                f,
                "{fetch_error} HTTP response error: status = {status_code}, message = {message}"
            ),
            FetchError::Json(error) => {
                write!(f, "{fetch_error} could not decode the response: {error}")
            }
            FetchError::Api {
                error_type,
                message,
            } => write!(f, "{fetch_error} query failed ({error_type}): {message}"),
            FetchError::UnsupportedResult(result_type) => {
                write!(f, "{fetch_error} unsupported result format: {result_type}")
            }
            FetchError::InvalidTimestamp(timestamp) => {
                write!(f, "{fetch_error} sample timestamp out of range: {timestamp}")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Http(error) => Some(error),
            FetchError::Json(error) => Some(error),
            FetchError::InvalidUrl(_)
            | FetchError::Response { .. }
            | FetchError::Api { .. }
            | FetchError::UnsupportedResult(_)
            | FetchError::InvalidTimestamp(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Http(error)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Json(error)
    }
}
