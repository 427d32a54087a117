/*!
    The decode engine.

    One call runs the demux, feed, receive and scale steps for a single
    session, consulting a [`Decider`] at every branch and firing an
    [`Actor`] hook at every transition:

    ```text
    Enter
      └─ if DecodeFrame || frame is stale:
           loop {
             if must_read || ReadPacket:  PreRead → read → PostRead
             if packet pending:           PreFeed → send → PostFeed | FeedWouldBlock
                                          PreReceive → receive → PostReceive | ReceiveWouldBlock
           } while must_read || DecodeFrame
           FrameDone
      └─ if Scale && (IgnoreScaledPts || scaled frame is stale):
           PreScale → scale → PostScale
    ```
*/

use ffmpeg_types::{Error, Result};

use tracing::{debug, trace};

use crate::backend::{Backend, BackendError, Decoder, Demuxer, FrameBuffer, PacketBuffer, Scaler};
use crate::hooks::{Action, Actor, Decider, Decision};
use crate::session::StreamSession;

/**
    Outcome of the read step.
*/
enum Read {
    /// A packet of the session's stream is waiting to be fed
    Packet,
    /// The packet belongs to another stream
    Foreign,
    /// The container is exhausted and the decoder was switched to draining
    Drained,
}

/**
    Run the engine once over `session`.

    Returns `Ok(())` once the decisions no longer ask for more work.
    [`Error::Eof`] means the decoder delivered its last frame and nothing
    more can be decoded until the session is seeked.
*/
pub fn decode<B: Backend, S>(
    session: &mut StreamSession<B>,
    decider: &Decider<B, S>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<()> {
    actor.act(Action::Enter, session, state);

    if decider.decide(Decision::DecodeFrame, session, state) || !session.is_frame_fresh() {
        decode_until_done(session, decider, actor, state)?;
        actor.act(Action::FrameDone, session, state);
    }

    scale(session, decider, actor, state)
}

fn decode_until_done<B: Backend, S>(
    session: &mut StreamSession<B>,
    decider: &Decider<B, S>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<()> {
    let mut must_read = false;

    loop {
        if !session.draining && (must_read || decider.decide(Decision::ReadPacket, session, state))
        {
            if session.packet_pending {
                trace!("resubmitting packet rejected by the decoder");
            } else {
                match read_packet(session, actor, state)? {
                    Read::Packet | Read::Drained => {}
                    Read::Foreign => {
                        if must_read || decider.decide(Decision::DecodeFrame, session, state) {
                            continue;
                        }
                        break;
                    }
                }
            }
        }

        if session.packet_pending {
            feed_packet(session, actor, state)?;
        }

        must_read = !receive_frame(session, actor, state)?;

        if !(must_read || decider.decide(Decision::DecodeFrame, session, state)) {
            break;
        }
    }

    Ok(())
}

fn read_packet<B: Backend, S>(
    session: &mut StreamSession<B>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<Read> {
    actor.act(Action::PreRead, session, state);

    session.packet.unref();
    match session.demuxer.read(&mut session.packet) {
        Ok(()) => {}
        Err(BackendError::Eof) => {
            debug!(
                stream = session.stream_index,
                "end of container, draining decoder"
            );
            session.decoder.drain()?;
            session.draining = true;
            return Ok(Read::Drained);
        }
        Err(e) => return Err(e.into()),
    }

    actor.act(Action::PostRead, session, state);

    if session.packet.stream_index() != session.stream_index {
        trace!(
            stream = session.packet.stream_index(),
            "skipping packet of another stream"
        );
        return Ok(Read::Foreign);
    }

    session.packet_pending = true;
    Ok(Read::Packet)
}

fn feed_packet<B: Backend, S>(
    session: &mut StreamSession<B>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<()> {
    actor.act(Action::PreFeed, session, state);

    match session.decoder.send(&session.packet) {
        Ok(()) => {
            session.packet_pending = false;
            session.fed_dts = session.packet.dts();
            actor.act(Action::PostFeed, session, state);
        }
        Err(BackendError::Again(_)) => {
            trace!("decoder output pending, packet kept for resubmission");
            actor.act(Action::FeedWouldBlock, session, state);
        }
        Err(BackendError::InvalidInput(code)) => {
            return Err(if session.decoder.is_encoder() {
                Error::EncoderAsDecoder
            } else {
                Error::library(code)
            });
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/**
    Returns `Ok(false)` if the decoder needs more input first.
*/
fn receive_frame<B: Backend, S>(
    session: &mut StreamSession<B>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<bool> {
    actor.act(Action::PreReceive, session, state);

    session.frame.unref();
    match session.decoder.receive(&mut session.frame) {
        Ok(()) => {
            actor.act(Action::PostReceive, session, state);
            Ok(true)
        }
        // A draining decoder has no more input to wait for
        Err(BackendError::Again(_)) if session.draining => Err(Error::Eof),
        Err(BackendError::Again(_)) => {
            trace!("decoder needs more input");
            actor.act(Action::ReceiveWouldBlock, session, state);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn scale<B: Backend, S>(
    session: &mut StreamSession<B>,
    decider: &Decider<B, S>,
    actor: &Actor<B, S>,
    state: &mut S,
) -> Result<()> {
    if !decider.decide(Decision::Scale, session, state) {
        return Ok(());
    }
    if !decider.decide(Decision::IgnoreScaledPts, session, state) && session.is_scaled_current() {
        return Ok(());
    }
    if session.scaler.is_none() {
        return Err(Error::NullReference { what: "scaler" });
    }

    actor.act(Action::PreScale, session, state);

    session.scaled.unref();
    let scaler = session
        .scaler
        .as_mut()
        .ok_or(Error::NullReference { what: "scaler" })?;
    scaler.scale(&session.frame, &mut session.scaled)?;

    let frame = &session.frame;
    session
        .scaled
        .set_timing(frame.pts(), frame.dts(), frame.duration());

    actor.act(Action::PostScale, session, state);
    Ok(())
}
