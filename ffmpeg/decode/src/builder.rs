/*!
    One-call construction of FFmpeg stream sessions.
*/

use std::path::PathBuf;

use tracing::debug;

use ffmpeg_engine::StreamSession;
use ffmpeg_transform::ScalerConfig;
use ffmpeg_types::{Error, Result};

use crate::backend::Ffmpeg;
use crate::config::DecoderConfig;
use crate::open::{alloc_buffers, open_container, open_decoder, open_scaler};

/**
    Builder for a [`StreamSession`] over a media file.

    Building opens the container, the decoder and the optional scaler, then
    decodes the first frame so the session always starts with a current
    frame.

    ```ignore
    let mut session = SessionBuilder::new()
        .path("video.mp4")
        .threads(4)
        .scaler(ScalerConfig::to_rgba())
        .build()?;
    ```
*/
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    path: Option<PathBuf>,
    stream_index: usize,
    decoder: DecoderConfig,
    scaler: Option<ScalerConfig>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn stream_index(mut self, stream_index: usize) -> Self {
        self.stream_index = stream_index;
        self
    }

    #[must_use]
    pub fn threads(mut self, thread_count: u32) -> Self {
        self.decoder.thread_count = thread_count;
        self
    }

    /// Let the decoder pick its own thread count.
    #[must_use]
    pub fn all_threads(self) -> Self {
        self.threads(0)
    }

    #[must_use]
    pub fn resolution(mut self, resolution: i32) -> Self {
        self.decoder.resolution = resolution;
        self
    }

    #[must_use]
    pub fn scaler(mut self, config: ScalerConfig) -> Self {
        self.scaler = Some(config);
        self
    }

    pub fn build(self) -> Result<StreamSession<Ffmpeg>> {
        let path = self.path.ok_or(Error::NullReference { what: "path" })?;

        let demuxer = open_container(&path)?;
        let decoder = open_decoder(&demuxer, self.stream_index, &self.decoder)?;
        let scaler = self
            .scaler
            .as_ref()
            .map(|config| open_scaler(&decoder, config))
            .transpose()?;

        let mut session = StreamSession::new(demuxer, decoder, self.stream_index, alloc_buffers())?;
        if let Some(scaler) = scaler {
            session = session.with_scaler(scaler);
        }

        session.decode_next_frame()?;
        debug!(
            path = %path.display(),
            stream = self.stream_index,
            "stream session ready"
        );

        Ok(session)
    }
}
