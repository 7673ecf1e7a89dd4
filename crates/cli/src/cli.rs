use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use clap::CommandFactory;
use clap::Parser;

use crate::flags::parse_duration;
use crate::flags::parse_unix_time;

#[derive(Debug, Default, Parser)]
#[command(author, about, long_about = None, disable_version_flag = true)]
#[command(
    after_help = "Either --file or both --slack and --channel must be set. Flags may also be written with a single dash."
)]
pub(crate) struct Cli {
    /// URL of the Prometheus server, e.g. `http://localhost:9090`.
    #[arg(long)]
    pub(crate) url: Option<String>,

    /// The PromQL query.
    #[arg(long)]
    pub(crate) query: Option<String>,

    /// Time to look back to, e.g. `5d12h34m56s`.
    #[arg(long, value_parser = parse_duration, allow_hyphen_values = true)]
    pub(crate) range: Option<TimeDelta>,

    /// Time of the query, formatted like the default output of the Unix
    /// `date` command, e.g. `Sat Feb  4 10:08:05 UTC 2017`. Defaults to now.
    #[arg(long, value_parser = parse_unix_time)]
    pub(crate) time: Option<DateTime<Utc>>,

    /// Title of the plot.
    #[arg(long, default_value = "Prometheus metrics")]
    pub(crate) title: String,

    /// Image format: png, jpg, bmp or svg.
    #[arg(long, default_value = "png")]
    pub(crate) format: String,

    /// File to save the image to. Should have the extension of --format.
    /// Use `-` to write to stdout.
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) file: Option<PathBuf>,

    /// Slack API token. Set to post the plot to Slack.
    #[arg(long)]
    pub(crate) slack: Option<String>,

    /// Slack channel to post to. Required when --slack is set.
    #[arg(long)]
    pub(crate) channel: Option<String>,

    /// Suppress all progress output.
    #[arg(long)]
    pub(crate) silent: bool,

    /// Print the binary version.
    #[arg(long)]
    pub(crate) version: bool,
}

impl Cli {
    /// Parses `args` like [Parser::try_parse_from], also accepting the
    /// single-dash long flags `-url x` and `-url=x`.
    pub(crate) fn try_parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(double_dash_flags(args))
    }
}

/// Rewrites single-dash long flags to `--flag`, leaving flag values and
/// everything after `--` untouched.
fn double_dash_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = Cli::command();
    command.build();
    let takes_value: HashMap<String, bool> = command
        .get_arguments()
        .filter_map(|arg| {
            let long = arg.get_long()?;
            Some((long.to_owned(), arg.get_action().takes_values()))
        })
        .collect();

    let mut args = args.into_iter().map(Into::into);
    let mut rewritten: Vec<OsString> = args.next().into_iter().collect();
    let mut value_expected = false;

    while let Some(arg) = args.next() {
        if value_expected {
            value_expected = false;
            rewritten.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            rewritten.push(arg);
            continue;
        };

        if text == "--" {
            rewritten.push(arg);
            rewritten.extend(args);
            break;
        }

        let (single_dash, flag) = match text.strip_prefix("--") {
            Some(flag) => (false, flag),
            None => match text.strip_prefix('-') {
                Some(flag) => (true, flag),
                None => {
                    rewritten.push(arg);
                    continue;
                }
            },
        };

        let (name, inline_value) = match flag.split_once('=') {
            Some((name, _)) => (name, true),
            None => (flag, false),
        };

        match takes_value.get(name) {
            Some(&takes) => {
                value_expected = takes && !inline_value;
                if single_dash {
                    rewritten.push(OsString::from(format!("--{flag}")));
                } else {
                    rewritten.push(arg);
                }
            }
            None => rewritten.push(arg),
        }
    }

    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn parse_all_flags() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "promplot",
            "--url",
            "http://localhost:9090",
            "--query",
            "up",
            "--range",
            "1d",
            "--time",
            "Sat Feb  4 10:08:05 UTC 2017",
            "--title",
            "Up",
            "--format",
            "svg",
            "--file",
            "-",
            "--silent",
        ])?;

        assert_eq!(cli.url.as_deref(), Some("http://localhost:9090"));
        assert_eq!(cli.query.as_deref(), Some("up"));
        assert_eq!(cli.range, Some(TimeDelta::hours(24)));
        assert_eq!(
            cli.time,
            Some(Utc.with_ymd_and_hms(2017, 2, 4, 10, 8, 5).unwrap())
        );
        assert_eq!(cli.title, "Up");
        assert_eq!(cli.format, "svg");
        assert_eq!(cli.file, Some(PathBuf::from("-")));
        assert!(cli.silent);
        assert!(!cli.version);

        Ok(())
    }

    #[test]
    fn defaults() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["promplot"])?;

        assert_eq!(cli.title, "Prometheus metrics");
        assert_eq!(cli.format, "png");
        assert_eq!(cli.time, None);
        assert!(!cli.silent);

        Ok(())
    }

    #[test]
    fn version_does_not_need_other_flags() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["promplot", "--version"])?;

        assert!(cli.version);

        Ok(())
    }

    #[test]
    fn parse_single_dash_flags() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_args([
            "promplot",
            "-url",
            "http://localhost:9090",
            "-query",
            "up",
            "-range=1d",
            "-title=Up",
            "-file",
            "-",
            "-silent",
        ])?;

        assert_eq!(cli.url.as_deref(), Some("http://localhost:9090"));
        assert_eq!(cli.query.as_deref(), Some("up"));
        assert_eq!(cli.range, Some(TimeDelta::hours(24)));
        assert_eq!(cli.title, "Up");
        assert_eq!(cli.file, Some(PathBuf::from("-")));
        assert!(cli.silent);

        Ok(())
    }

    #[test]
    fn single_dash_rewrite_keeps_values_and_operands() {
        let args = double_dash_flags([
            "promplot", "-range", "-5m", "--query", "-url", "-h", "--", "-file",
        ]);

        assert_eq!(
            args,
            ["promplot", "--range", "-5m", "--query", "-url", "-h", "--", "-file"]
                .map(OsString::from)
        );
    }

    #[test]
    fn single_dash_version() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_args(["promplot", "-version"])?;

        assert!(cli.version);

        Ok(())
    }

    #[test]
    fn invalid_range_is_a_syntax_error() {
        let error = Cli::try_parse_from(["promplot", "--range", "3w"]).unwrap_err();

        assert!(error.to_string().contains("unknown unit"));
    }

    #[test]
    fn invalid_time_is_a_syntax_error() {
        assert!(Cli::try_parse_from(["promplot", "--time", "yesterday"]).is_err());
    }
}
