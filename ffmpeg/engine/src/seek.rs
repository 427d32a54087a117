/*!
    Two-phase seeking.

    The coarse phase asks the container for a position at or before the
    target, usually a keyframe. The precise phase then decodes forward
    until the decoded frame covers the target timestamp.
*/

use ffmpeg_types::{Discard, Error, Result, SeekFlags, Timestamp};

use tracing::{debug, warn};

use crate::backend::{Backend, Decoder, Demuxer, FrameBuffer, PacketBuffer};
use crate::engine::decode;
use crate::hooks::{Action, Actor, Decider, Decision, Hook, Rule};
use crate::session::StreamSession;

/**
    Keep decoding while the current frame ends at or before the target.
    A frame without timestamps never covers it.
*/
fn before_target<B: Backend>(session: &StreamSession<B>, target: &mut i64) -> bool {
    let frame = session.frame();
    frame
        .pts()
        .checked_add(frame.duration())
        .is_none_or(|end| *target >= end)
}

/**
    Skip non-reference frames while the packet about to be fed is more
    than two packet durations away from the target.
*/
fn tune_discard<B: Backend>(session: &mut StreamSession<B>, target: &mut i64) {
    let packet = session.packet();
    let far = match (packet.pts().get(), packet.duration().get()) {
        (Some(pts), Some(duration)) => *target >= pts.saturating_add(duration.saturating_mul(2)),
        _ => false,
    };

    let wanted = if far { Discard::NonRef } else { Discard::Default };
    if session.decoder().discard() != wanted {
        session.decoder_mut().set_discard(wanted);
    }
}

impl<B: Backend> StreamSession<B> {
    /**
        Seek to `timestamp`, given in the stream's time base.

        Unless [`SeekFlags::NO_PRECISE`] is set, the session's frame covers
        the target on success: `pts <= timestamp < pts + duration`. Targets
        past the last frame fail with [`Error::TimestampOutOfBounds`]. So do
        targets before the current frame when [`SeekFlags::NO_COARSE`] is
        set, since decoding only moves forward.

        The decoder's discard policy is the same after the call as before
        it, whether the seek succeeded or not.
    */
    pub fn seek(&mut self, timestamp: i64, flags: SeekFlags) -> Result<()> {
        if flags.coarse() {
            let mut container_flags = flags.container_flags();
            if flags.precise() {
                container_flags |= SeekFlags::BACKWARD;
            }

            debug!(
                stream = self.stream_index,
                timestamp,
                flags = ?container_flags,
                "container seek"
            );
            self.demuxer
                .seek(self.stream_index, timestamp, container_flags)?;
            self.reset_decoding();
        }

        if !flags.precise() {
            return Ok(());
        }

        let original = self.decoder.discard();
        self.decoder.set_discard(Discard::Default);

        let decider = Decider::new()
            .bind(Decision::DecodeFrame, Rule::Call(before_target::<B>))
            .bind(Decision::ReadPacket, Rule::Call(before_target::<B>));
        let actor = Actor::new().bind(Action::PreFeed, Hook::Call(tune_discard::<B>));

        let mut target = timestamp;
        let result = decode(self, &decider, &actor, &mut target);
        self.decoder.set_discard(original);

        let reached_eof = match result {
            Ok(()) => false,
            Err(Error::Eof) => true,
            Err(e) => return Err(e),
        };

        let frame = &self.frame;
        let seconds = Timestamp(timestamp).to_seconds(self.time_base);
        match frame.pts().checked_add(frame.duration()) {
            // Without a container seek the decoder can only move forward
            Some(_) if !flags.coarse() && frame.pts().0 > timestamp => {
                warn!(
                    timestamp,
                    ?seconds,
                    pts = frame.pts().0,
                    "seek target before the current frame"
                );
                Err(Error::TimestampOutOfBounds)
            }
            Some(end) if timestamp < end => {
                debug!(timestamp, ?seconds, pts = frame.pts().0, "precise seek done");
                Ok(())
            }
            Some(end) => {
                warn!(timestamp, ?seconds, end, "seek target past the last frame");
                Err(Error::TimestampOutOfBounds)
            }
            None if reached_eof => {
                warn!(timestamp, ?seconds, "stream ended before the seek target");
                Err(Error::TimestampOutOfBounds)
            }
            None => {
                warn!(timestamp, "decoded frame has no timestamp");
                Err(Error::library(Error::INVALID_DATA))
            }
        }
    }

    /**
        Seek to a position given in seconds.

        The target is converted with the stream's time base and rounded to
        the nearest tick.
    */
    pub fn seek_seconds(&mut self, seconds: f64, flags: SeekFlags) -> Result<()> {
        let timestamp = Timestamp::from_seconds(seconds, self.time_base);
        self.seek(timestamp.0, flags)
    }
}
