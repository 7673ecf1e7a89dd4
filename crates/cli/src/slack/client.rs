use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::slack::Chat;
use crate::slack::ChannelId;
use crate::slack::Upload;
use crate::slack::error::Result;
use crate::slack::error::SlackError;

const POST_MESSAGE: &str = "chat.postMessage";
const GET_UPLOAD_URL: &str = "files.getUploadURLExternal";
const COMPLETE_UPLOAD: &str = "files.completeUploadExternal";

pub(crate) struct SlackClient {
    client: Client,
    base_url: &'static str,
    token: String,
}

impl SlackClient {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        let base_url = "https://slack.com/api";
        let client = Client::new();

        Self {
            client,
            base_url,
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{base_url}/{method}", base_url = self.base_url)
    }

    fn call<T: DeserializeOwned>(&self, method: &'static str, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.token).send()?;
        debug!(method, status = %response.status(), "slack API call");

        let body = response.text()?;
        decode(method, &body)
    }

    fn get_upload_url(&self, upload: &Upload) -> Result<UploadUrl> {
        let length = upload.content.len().to_string();
        let request = self
            .client
            .post(self.method_url(GET_UPLOAD_URL))
            .form(&[("filename", upload.filename.as_str()), ("length", length.as_str())]);

        self.call(GET_UPLOAD_URL, request)
    }

    fn send_content(&self, upload_url: &str, content: Vec<u8>) -> Result<()> {
        let response = self.client.post(upload_url).body(content).send()?;

        let status_code = response.status();
        if status_code.is_success() {
            return Ok(());
        }

        let message = response.text()?;
        Err(SlackError::Upload {
            status_code,
            message,
        })
    }

    fn complete_upload(&self, channel: &ChannelId, file_id: String, title: String) -> Result<()> {
        let body = CompleteUploadBody {
            files: vec![UploadedFile { id: file_id, title }],
            channel_id: channel,
        };
        let request = self
            .client
            .post(self.method_url(COMPLETE_UPLOAD))
            .json(&body);

        let _: Acknowledged = self.call(COMPLETE_UPLOAD, request)?;
        Ok(())
    }
}

impl Chat for SlackClient {
    fn post_message(&self, channel: &str, text: &str) -> Result<ChannelId> {
        let request = self
            .client
            .post(self.method_url(POST_MESSAGE))
            .json(&PostMessageBody { channel, text });

        let posted: PostedMessage = self.call(POST_MESSAGE, request)?;
        Ok(posted.channel)
    }

    fn upload_file(&self, channel: &ChannelId, upload: Upload) -> Result<()> {
        let UploadUrl {
            upload_url,
            file_id,
        } = self.get_upload_url(&upload)?;

        debug!(%file_id, bytes = upload.content.len(), "uploading file content");
        self.send_content(&upload_url, upload.content)?;

        self.complete_upload(channel, file_id, upload.title)
    }
}

/// Decodes a Web API response, turning `ok: false` into an API error.
fn decode<T: DeserializeOwned>(method: &'static str, body: &str) -> Result<T> {
    let status: ApiStatus = serde_json::from_str(body)?;

    if !status.ok {
        let error = status
            .error
            .unwrap_or_else(|| String::from("unknown_error"));
        return Err(SlackError::Api { method, error });
    }

    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    ok: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Acknowledged {}

#[derive(Debug, Serialize)]
struct PostMessageBody<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    channel: ChannelId,
}

#[derive(Debug, Deserialize)]
struct UploadUrl {
    upload_url: String,
    file_id: String,
}

#[derive(Debug, Serialize)]
struct CompleteUploadBody<'a> {
    files: Vec<UploadedFile>,
    channel_id: &'a ChannelId,
}

#[derive(Debug, Serialize)]
struct UploadedFile {
    id: String,
    title: String,
}
