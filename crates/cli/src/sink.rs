use std::error::Error;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use promplot_vis::Chart;
use tracing::info;

use crate::slack::Chat;
use crate::slack::SlackClient;
use crate::slack::SlackError;
use crate::slack::Upload;
use crate::target::FileTarget;
use crate::target::OutputTarget;

#[derive(Debug)]
pub(crate) enum SinkError {
    File { path: PathBuf, error: io::Error },
    Stdout(io::Error),
    ReadPlot(io::Error),
    PostMessage(SlackError),
    Upload(SlackError),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::File { path, error } => {
                write!(f, "failed writing plot to '{}': {error}", path.display())
            }
            SinkError::Stdout(error) => write!(f, "failed writing plot to stdout: {error}"),
            SinkError::ReadPlot(error) => {
                write!(f, "failed to upload plot: reading the image failed: {error}")
            }
            SinkError::PostMessage(error) => write!(f, "failed to post message: {error}"),
            SinkError::Upload(error) => write!(f, "failed to upload plot: {error}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SinkError::File { error, .. } => Some(error),
            SinkError::Stdout(error) | SinkError::ReadPlot(error) => Some(error),
            SinkError::PostMessage(error) | SinkError::Upload(error) => Some(error),
        }
    }
}

/// The destination of a chart.
pub(crate) enum Sink<C> {
    File(FileTarget),
    Chat { chat: C, channel: String },
}

impl Sink<SlackClient> {
    pub(crate) fn new(target: &OutputTarget) -> Self {
        match target {
            OutputTarget::File(file) => Sink::File(file.clone()),
            OutputTarget::Slack { token, channel } => Sink::Chat {
                chat: SlackClient::new(token.as_str()),
                channel: channel.clone(),
            },
        }
    }
}

impl<C: Chat> Sink<C> {
    /// Delivers `chart` to its destination.
    ///
    /// Uploads are announced with `notice` first; the image is titled `title`.
    pub(crate) fn deliver<W: Write + ?Sized>(
        &self,
        chart: &Chart,
        title: &str,
        notice: &str,
        stdout: &mut W,
    ) -> Result<(), SinkError> {
        match self {
            Sink::File(FileTarget::Stdout) => {
                info!("Writing to stdout");
                chart.write_to(stdout).map_err(SinkError::Stdout)?;
            }
            Sink::File(FileTarget::Path(path)) => {
                info!("Writing to '{}'", path.display());
                let file_error = |error| SinkError::File {
                    path: path.clone(),
                    error,
                };

                let mut file = File::create(path).map_err(file_error)?;
                chart.write_to(&mut file).map_err(file_error)?;
            }
            Sink::Chat { chat, channel } => {
                info!("Uploading to Slack channel \"{channel}\"");

                let channel_id = chat
                    .post_message(channel, notice)
                    .map_err(SinkError::PostMessage)?;

                let upload = Upload {
                    filename: format!("{title}.{}", chart.format().extension()),
                    title: title.to_owned(),
                    content: chart.to_bytes().map_err(SinkError::ReadPlot)?,
                };
                chat.upload_file(&channel_id, upload)
                    .map_err(SinkError::Upload)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::fs;

    use promplot_vis::ImageFormat;

    use crate::slack::ChannelId;

    /// A chat that records the calls and fails the upload when asked to.
    #[derive(Default)]
    pub(crate) struct FakeChat {
        pub(crate) messages: RefCell<Vec<(String, String)>>,
        pub(crate) uploads: RefCell<Vec<(ChannelId, Upload)>>,
        pub(crate) fail_upload: bool,
    }

    impl Chat for FakeChat {
        fn post_message(&self, channel: &str, text: &str) -> crate::slack::Result<ChannelId> {
            self.messages
                .borrow_mut()
                .push((channel.to_owned(), text.to_owned()));

            Ok(ChannelId::new("C024BE91L"))
        }

        fn upload_file(&self, channel: &ChannelId, upload: Upload) -> crate::slack::Result<()> {
            if self.fail_upload {
                return Err(SlackError::Api {
                    method: "files.completeUploadExternal",
                    error: String::from("invalid_auth"),
                });
            }

            self.uploads.borrow_mut().push((channel.clone(), upload));
            Ok(())
        }
    }

    fn chart() -> io::Result<Chart> {
        Chart::from_bytes(b"\x89PNG plot", ImageFormat::Png)
    }

    #[test]
    fn deliver_to_stdout() -> Result<(), Box<dyn Error>> {
        let sink: Sink<FakeChat> = Sink::File(FileTarget::Stdout);
        let mut stdout = Vec::new();

        sink.deliver(&chart()?, "Up", "notice", &mut stdout)?;

        assert_eq!(stdout, b"\x89PNG plot");

        Ok(())
    }

    #[test]
    fn deliver_to_file_truncates_it() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("plot.png");
        fs::write(&path, "a much longer previous content")?;
        let sink: Sink<FakeChat> = Sink::File(FileTarget::Path(path.clone()));

        sink.deliver(&chart()?, "Up", "notice", &mut io::sink())?;

        assert_eq!(fs::read(&path)?, b"\x89PNG plot");

        Ok(())
    }

    #[test]
    fn deliver_to_missing_directory_fails() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing").join("plot.png");
        let sink: Sink<FakeChat> = Sink::File(FileTarget::Path(path));

        let error = sink
            .deliver(&chart()?, "Up", "notice", &mut io::sink())
            .unwrap_err();

        assert!(matches!(error, SinkError::File { .. }));
        assert!(error.to_string().starts_with("failed writing plot to '"));

        Ok(())
    }

    #[test]
    fn deliver_to_chat_posts_then_uploads() -> Result<(), Box<dyn Error>> {
        let sink = Sink::Chat {
            chat: FakeChat::default(),
            channel: String::from("#ops"),
        };

        sink.deliver(&chart()?, "Up", "Up: `up` over the last 1h0m0s", &mut io::sink())?;

        let Sink::Chat { chat, .. } = sink else {
            unreachable!()
        };
        assert_eq!(
            *chat.messages.borrow(),
            [(
                String::from("#ops"),
                String::from("Up: `up` over the last 1h0m0s")
            )]
        );
        let uploads = chat.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, ChannelId::new("C024BE91L"));
        assert_eq!(
            uploads[0].1,
            Upload {
                filename: String::from("Up.png"),
                title: String::from("Up"),
                content: b"\x89PNG plot".to_vec(),
            }
        );

        Ok(())
    }

    #[test]
    fn failed_upload_is_reported() -> Result<(), Box<dyn Error>> {
        let sink = Sink::Chat {
            chat: FakeChat {
                fail_upload: true,
                ..FakeChat::default()
            },
            channel: String::from("#ops"),
        };

        let error = sink
            .deliver(&chart()?, "Up", "notice", &mut io::sink())
            .unwrap_err();

        assert!(error.to_string().starts_with("failed to upload plot: "));

        Ok(())
    }
}
