/*!
    Counted decoding: advance a session by a fixed number of frames.
*/

use ffmpeg_types::Result;

use crate::backend::Backend;
use crate::engine::decode;
use crate::hooks::{Action, Actor, Decider, Decision, Hook, Rule};
use crate::session::StreamSession;

fn frames_left<B: Backend>(_: &StreamSession<B>, remaining: &mut u64) -> bool {
    *remaining > 0
}

fn frame_received<B: Backend>(_: &mut StreamSession<B>, remaining: &mut u64) {
    *remaining = remaining.saturating_sub(1);
}

fn has_scaler<B: Backend>(session: &StreamSession<B>, _: &mut u64) -> bool {
    session.has_scaler()
}

impl<B: Backend> StreamSession<B> {
    /**
        Decode `count` more frames, scaling the last one if the session
        has a scaler.

        With a count of zero this only makes sure the current frame (and
        scaled frame) match the last read packet, decoding nothing if they
        already do.
    */
    pub fn decode_frames(&mut self, count: u64) -> Result<()> {
        let decider = Decider::new()
            .bind(Decision::DecodeFrame, Rule::Call(frames_left::<B>))
            .bind(Decision::ReadPacket, Rule::Call(frames_left::<B>))
            .bind(Decision::Scale, Rule::Call(has_scaler::<B>));
        let actor = Actor::new().bind(Action::PostReceive, Hook::Call(frame_received::<B>));

        let mut remaining = count;
        decode(self, &decider, &actor, &mut remaining)
    }

    /**
        Make sure the current frame is decoded, without advancing.
    */
    pub fn decode_current_frame(&mut self) -> Result<()> {
        self.decode_frames(0)
    }

    /**
        Advance to the next frame.
    */
    pub fn decode_next_frame(&mut self) -> Result<()> {
        self.decode_frames(1)
    }
}
