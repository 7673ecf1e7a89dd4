use std::error::Error;
use std::fmt::Display;

use reqwest::StatusCode;

pub(crate) type Result<T> = std::result::Result<T, SlackError>;

#[derive(Debug)]
pub(crate) enum SlackError {
    Http(reqwest::Error),
    Json(serde_json::Error),
    Api {
        method: &'static str,
        error: String,
    },
    Upload {
        status_code: StatusCode,
        message: String,
    },
}

impl Display for SlackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slack_error = "slack error:";

        match self {
            SlackError::Http(error) => write!(f, "{slack_error} HTTP request error: {error}"),
            SlackError::Json(error) => {
                write!(f, "{slack_error} decoding the response failed: {error}")
            }
            SlackError::Api { method, error } => {
                write!(f, "{slack_error} {method} returned \"{error}\"")
            }
            SlackError::Upload {
                status_code,
                message,
            } => write!(
                f,
                "{slack_error} upload error: status = {status_code}, message = {message}"
            ),
        }
    }
}

impl Error for SlackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SlackError::Http(error) => Some(error),
            SlackError::Json(error) => Some(error),
            SlackError::Api { .. } | SlackError::Upload { .. } => None,
        }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::Http(error)
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(error: serde_json::Error) -> Self {
        SlackError::Json(error)
    }
}
