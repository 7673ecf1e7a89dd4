use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ConfigError;

const STDOUT_PATH: &str = "-";

/// Where the rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    File(FileTarget),
    Slack { token: String, channel: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileTarget {
    Stdout,
    Path(PathBuf),
}

impl OutputTarget {
    /// Resolves the target from the `--file`, `--slack` and `--channel` flags.
    ///
    /// Exactly one target must be configured; empty values count as unset.
    pub(crate) fn from_flags(
        file: Option<&Path>,
        token: Option<&str>,
        channel: Option<&str>,
    ) -> Result<OutputTarget, ConfigError> {
        let file = file.filter(|path| !path.as_os_str().is_empty());
        let token = token.filter(|token| !token.is_empty());
        let channel = channel.filter(|channel| !channel.is_empty());

        match (file, token, channel) {
            (Some(path), None, None) => Ok(OutputTarget::File(FileTarget::from(path))),
            (None, Some(token), Some(channel)) => Ok(OutputTarget::Slack {
                token: token.to_owned(),
                channel: channel.to_owned(),
            }),
            (None, None, None) => Err(ConfigError::NoTarget),
            (Some(_), _, _) => Err(ConfigError::ConflictingTargets),
            (None, Some(_), None) => Err(ConfigError::MissingChannel),
            (None, None, Some(_)) => Err(ConfigError::MissingToken),
        }
    }
}

impl From<&Path> for FileTarget {
    fn from(path: &Path) -> Self {
        if path == Path::new(STDOUT_PATH) {
            FileTarget::Stdout
        } else {
            FileTarget::Path(path.to_path_buf())
        }
    }
}

impl Display for FileTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileTarget::Stdout => write!(f, "stdout"),
            FileTarget::Path(path) => write!(f, "'{}'", path.display()),
        }
    }
}
