/*!
    Frame-accurate decode and seek engine.

    This crate drives the demux, decode and scale pipeline of a single
    stream. It does not link any media library itself: a backend plugs in
    through the traits in [`backend`], and the engine runs against those.

    # Example

    ```ignore
    use ffmpeg_engine::SeekFlags;

    // Any backend, e.g. `ffmpeg_decode::Session`
    let mut session = open_session("video.mp4")?;

    // Step through frames
    session.decode_next_frame()?;
    session.decode_frames(10)?;

    // Land exactly on the frame shown at 3.04 seconds
    session.seek_seconds(3.04, SeekFlags::empty())?;
    ```

    # Customizing the engine

    Counted decoding and seeking are both thin bindings over [`decode`].
    Other operations can be built the same way, by binding functions to
    [`Decision`] and [`Action`] points:

    ```ignore
    use ffmpeg_engine::{decode, Action, Actor, Decider, Decision, Hook, Rule};

    fn count(_: &mut Session, frames: &mut u32) {
        *frames += 1;
    }

    let decider = Decider::new().bind(Decision::DecodeFrame, Rule::Always);
    let actor = Actor::new().bind(Action::PostReceive, Hook::Call(count));
    let mut frames = 0;

    // Decodes every remaining frame, then reports end of stream
    let result = decode(&mut session, &decider, &actor, &mut frames);
    assert!(result.unwrap_err().is_eof());
    ```
*/

pub use ffmpeg_types::{Discard, Error, Rational, Result, SeekFlags, Timestamp};

pub mod backend;

mod engine;
mod hooks;
mod policy;
mod seek;
mod session;

#[cfg(test)]
mod mock;

pub use backend::{Backend, BackendError, Decoder, Demuxer, FrameBuffer, PacketBuffer, Scaler};
pub use engine::decode;
pub use hooks::{Action, Actor, Decider, Decision, Hook, Rule};
pub use session::{Buffers, StreamSession};
