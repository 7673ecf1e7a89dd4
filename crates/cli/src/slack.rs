//! Delivery of plots to Slack through the Web API.

mod client;
mod error;

use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

pub(crate) use client::SlackClient;
pub(crate) use error::Result;
pub(crate) use error::SlackError;

/// The id Slack assigns to a channel, e.g. `C024BE91L`.
///
/// Messages can be posted with a channel name, uploads need the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ChannelId(String);

impl ChannelId {
    #[cfg(test)]
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file to share in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Upload {
    pub(crate) filename: String,
    pub(crate) title: String,
    pub(crate) content: Vec<u8>,
}

/// The chat operations needed to deliver a plot.
pub(crate) trait Chat {
    /// Posts `text` to `channel` and returns the id of the channel.
    fn post_message(&self, channel: &str, text: &str) -> Result<ChannelId>;

    /// Shares `upload` in the channel.
    fn upload_file(&self, channel: &ChannelId, upload: Upload) -> Result<()>;
}
