//! The `sendAudio` request and its multipart encoding.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::{Error, Result};

/// Filename sent when the path has no final component.
const FALLBACK_FILE_NAME: &str = "audio";

/// Parameters of a `sendAudio` call.
///
/// `protect_content` defaults to true. Optional fields are only encoded when set, so
/// a request built with [`SendAudio::new`] produces exactly the `chat_id`,
/// `protect_content` and `audio` parts, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAudio {
    pub chat_id: i64,
    pub path: PathBuf,
    pub protect_content: bool,
    pub caption: Option<String>,
    pub performer: Option<String>,
    pub title: Option<String>,
    /// Duration in seconds
    pub duration: Option<u32>,
}

impl SendAudio {
    pub fn new(chat_id: i64, path: impl Into<PathBuf>) -> Self {
        Self {
            chat_id,
            path: path.into(),
            protect_content: true,
            caption: None,
            performer: None,
            title: None,
            duration: None,
        }
    }

    pub fn protect_content(mut self, protect: bool) -> Self {
        self.protect_content = protect;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn performer(mut self, performer: impl Into<String>) -> Self {
        self.performer = Some(performer.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Read the file and encode the request as a multipart form.
    ///
    /// All local I/O happens here, so any file error surfaces before a request is made.
    pub(crate) async fn to_form(&self) -> Result<Form> {
        let audio = audio_part(&self.path).await?;

        let mut form = Form::new()
            .text("chat_id", self.chat_id.to_string())
            .text("protect_content", self.protect_content.to_string())
            .part("audio", audio);

        if let Some(caption) = &self.caption {
            form = form.text("caption", caption.clone());
        }
        if let Some(performer) = &self.performer {
            form = form.text("performer", performer.clone());
        }
        if let Some(title) = &self.title {
            form = form.text("title", title.clone());
        }
        if let Some(duration) = self.duration {
            form = form.text("duration", duration.to_string());
        }

        Ok(form)
    }
}

async fn audio_part(path: &Path) -> Result<Part> {
    let bytes = {
        let mut file = File::open(path).await.map_err(|source| Error::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = file.metadata().await.map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let mut bytes = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
        file.read_to_end(&mut bytes)
            .await
            .map_err(|source| Error::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        bytes
    };

    tracing::trace!(path = %path.display(), size = bytes.len(), "Read audio file");

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(Error::BuildPart)
}
