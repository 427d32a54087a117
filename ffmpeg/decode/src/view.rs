/*!
    Read-only access to the pixels of a session's frames.
*/

use ffmpeg_next::{format::Pixel, util::frame::video::Video as VideoFrameFFmpeg};

use ffmpeg_engine::{FrameBuffer, StreamSession};
use ffmpeg_transform::pixel_from_ffmpeg;
use ffmpeg_types::{PixelFormat, Timestamp};

use crate::backend::{Ffmpeg, Frame};

/**
    A borrowed view of a decoded or scaled frame.

    The view borrows the session, so it can not outlive the next decode or
    seek that overwrites the frame.
*/
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    frame: &'a Frame,
}

impl<'a> FrameView<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self { frame }
    }

    fn raw(&self) -> &'a VideoFrameFFmpeg {
        self.frame.as_ffmpeg()
    }

    pub fn width(&self) -> u32 {
        self.raw().width()
    }

    pub fn height(&self) -> u32 {
        self.raw().height()
    }

    /// The frame's pixel format, if it is one the crate knows by name.
    pub fn format(&self) -> Option<PixelFormat> {
        pixel_from_ffmpeg(self.pixel())
    }

    /// The FFmpeg pixel format.
    pub fn pixel(&self) -> Pixel {
        self.raw().format()
    }

    /// Number of data planes, zero for an empty frame.
    pub fn plane_count(&self) -> usize {
        self.raw().planes()
    }

    /**
        Pixel data of plane `index`, including row padding.

        Returns `None` past the last plane.
    */
    pub fn plane(&self, index: usize) -> Option<&'a [u8]> {
        (index < self.plane_count()).then(|| self.raw().data(index))
    }

    /// Bytes per row of plane `index`.
    pub fn stride(&self, index: usize) -> Option<usize> {
        (index < self.plane_count()).then(|| self.raw().stride(index))
    }

    pub fn pts(&self) -> Timestamp {
        self.frame.pts()
    }

    pub fn dts(&self) -> Timestamp {
        self.frame.dts()
    }

    pub fn duration(&self) -> Timestamp {
        self.frame.duration()
    }

    pub fn is_empty(&self) -> bool {
        self.plane_count() == 0
    }
}

impl std::fmt::Debug for FrameView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameView")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixel", &self.pixel())
            .field("pts", &self.pts())
            .finish_non_exhaustive()
    }
}

/**
    Frame views of an FFmpeg session.
*/
pub trait FrameViews {
    /// The current decoded frame.
    fn frame_view(&self) -> FrameView<'_>;

    /// The last scaled frame, empty until something was scaled.
    fn scaled_view(&self) -> FrameView<'_>;
}

impl FrameViews for StreamSession<Ffmpeg> {
    fn frame_view(&self) -> FrameView<'_> {
        FrameView::new(self.frame())
    }

    fn scaled_view(&self) -> FrameView<'_> {
        FrameView::new(self.scaled_frame())
    }
}
