/*!
    FFmpeg backend for the frame-accurate decode and seek engine.

    This crate opens media files with FFmpeg and plugs the container,
    decoder and scaler into [`ffmpeg_engine::StreamSession`]. All decoding
    and seeking logic lives in the engine, this crate only owns the FFmpeg
    resources.

    # Example

    ```ignore
    use ffmpeg_decode::{FrameViews, SessionBuilder, SeekFlags};
    use ffmpeg_transform::ScalerConfig;

    // Opening decodes the first frame
    let mut session = SessionBuilder::new()
        .path("video.mp4")
        .scaler(ScalerConfig::to_rgba().with_dimensions(640, -1))
        .build()?;

    // Land exactly on the frame showing second 12.5
    session.seek_seconds(12.5, SeekFlags::empty())?;

    let view = session.scaled_view();
    println!("{}x{} at pts {:?}", view.width(), view.height(), view.pts());

    // Step forward
    session.decode_next_frame()?;
    ```

    # Lower level

    The builder is a shortcut for [`open_container`], [`open_decoder`],
    [`open_scaler`] and [`alloc_buffers`], which can be used directly to
    assemble a session by hand.
*/

pub use ffmpeg_engine::{Buffers, StreamSession};
pub use ffmpeg_types::{Discard, Error, Rational, Result, SeekFlags, Timestamp};

mod backend;
mod builder;
mod config;
mod open;
mod view;

pub use backend::{Decoder, Demuxer, Ffmpeg, Frame, Packet, Scaler};
pub use builder::SessionBuilder;
pub use config::{DecoderConfig, lowres_level};
pub use open::{alloc_buffers, open_container, open_decoder, open_scaler};
pub use view::{FrameView, FrameViews};

/**
    A stream session backed by FFmpeg.
*/
pub type Session = StreamSession<Ffmpeg>;
