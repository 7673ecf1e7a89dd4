use std::error::Error;
use std::fmt::Display;

use promplot_query::error::FetchError;
use promplot_vis::error::RenderError;

use crate::sink::SinkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigError {
    MissingFlag(&'static str),
    ZeroRange,
    NegativeRange(String),
    NoTarget,
    ConflictingTargets,
    MissingChannel,
    MissingToken,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingFlag(flag) => write!(f, "the --{flag} flag is required"),
            ConfigError::ZeroRange => write!(f, "the --range flag must not be zero"),
            ConfigError::NegativeRange(range) => {
                write!(f, "the --range flag must be positive, got {range}")
            }
            ConfigError::NoTarget => {
                write!(f, "either --file or both --slack and --channel must be set")
            }
            ConfigError::ConflictingTargets => {
                write!(f, "--file cannot be combined with --slack or --channel")
            }
            ConfigError::MissingChannel => write!(f, "--channel is required when --slack is set"),
            ConfigError::MissingToken => write!(f, "--slack is required when --channel is set"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug)]
pub(crate) enum CliError {
    Config(ConfigError),
    Fetch(FetchError),
    Render(RenderError),
    Sink(SinkError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(error) => write!(f, "invalid configuration: {error}"),
            CliError::Fetch(error) => write!(f, "failed getting metrics: {error}"),
            CliError::Render(error) => write!(f, "failed creating plot: {error}"),
            CliError::Sink(error) => write!(f, "{error}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Config(error) => Some(error),
            CliError::Fetch(error) => Some(error),
            CliError::Render(error) => Some(error),
            CliError::Sink(error) => Some(error),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error)
    }
}

impl From<FetchError> for CliError {
    fn from(error: FetchError) -> Self {
        CliError::Fetch(error)
    }
}

impl From<RenderError> for CliError {
    fn from(error: RenderError) -> Self {
        CliError::Render(error)
    }
}

impl From<SinkError> for CliError {
    fn from(error: SinkError) -> Self {
        CliError::Sink(error)
    }
}
