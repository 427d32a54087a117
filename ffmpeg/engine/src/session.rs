/*!
    The stream session: everything one decode call needs, owned by the
    caller.
*/

use ffmpeg_types::{Error, Rational, Result, Timestamp};

use tracing::debug;

use crate::backend::{Backend, Decoder, Demuxer, FrameBuffer, PacketBuffer};

/**
    The reusable packet and frame buffers of a session.

    Allocated once and handed to [`StreamSession::new`]. Only their contents
    change while the session is alive.
*/
pub struct Buffers<B: Backend> {
    pub packet: B::Packet,
    pub frame: B::Frame,
    pub scaled: B::Frame,
}

/**
    A demuxer, a decoder for one of its streams, an optional scaler and the
    reusable buffers they share.

    The engine keeps no state of its own between calls. Everything it needs
    to resume, such as timestamps and the discard policy, lives here.
*/
pub struct StreamSession<B: Backend> {
    // Fields drop in declaration order: buffers first, containers last
    pub(crate) packet: B::Packet,
    pub(crate) frame: B::Frame,
    pub(crate) scaled: B::Frame,
    pub(crate) scaler: Option<B::Scaler>,
    pub(crate) decoder: B::Decoder,
    pub(crate) demuxer: B::Demuxer,
    pub(crate) stream_index: usize,
    pub(crate) time_base: Rational,
    /// The packet buffer holds data the decoder has not accepted yet
    pub(crate) packet_pending: bool,
    /// DTS of the last packet the decoder accepted
    pub(crate) fed_dts: Timestamp,
    /// The container is exhausted and the decoder was told so
    pub(crate) draining: bool,
}

impl<B: Backend> StreamSession<B> {
    /**
        Assemble a session decoding `stream_index` of `demuxer`.

        Fails with [`Error::IndexOutOfBounds`] if the container has no such
        stream.
    */
    pub fn new(
        demuxer: B::Demuxer,
        decoder: B::Decoder,
        stream_index: usize,
        buffers: Buffers<B>,
    ) -> Result<Self> {
        let count = demuxer.stream_count();
        if stream_index >= count {
            return Err(Error::IndexOutOfBounds {
                index: stream_index,
                count,
            });
        }

        let time_base = demuxer.time_base(stream_index);
        let Buffers {
            packet,
            frame,
            scaled,
        } = buffers;

        Ok(Self {
            packet,
            frame,
            scaled,
            scaler: None,
            decoder,
            demuxer,
            stream_index,
            time_base,
            packet_pending: false,
            fed_dts: Timestamp::NONE,
            draining: false,
        })
    }

    /**
        Attach a scaler, consuming and returning the session.
    */
    #[must_use]
    pub fn with_scaler(mut self, scaler: B::Scaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /**
        Replace the scaler, returning the previous one.

        Removing the scaler also forgets the scaled frame, so a new scaler
        never serves output of the old one.
    */
    pub fn set_scaler(&mut self, scaler: Option<B::Scaler>) -> Option<B::Scaler> {
        self.scaled.unref();
        std::mem::replace(&mut self.scaler, scaler)
    }

    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Time base of the decoded stream.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    pub fn demuxer(&self) -> &B::Demuxer {
        &self.demuxer
    }

    pub fn demuxer_mut(&mut self) -> &mut B::Demuxer {
        &mut self.demuxer
    }

    pub fn decoder(&self) -> &B::Decoder {
        &self.decoder
    }

    pub fn decoder_mut(&mut self) -> &mut B::Decoder {
        &mut self.decoder
    }

    pub fn scaler(&self) -> Option<&B::Scaler> {
        self.scaler.as_ref()
    }

    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    /// The most recently read packet.
    pub fn packet(&self) -> &B::Packet {
        &self.packet
    }

    /// The most recently decoded frame.
    pub fn frame(&self) -> &B::Frame {
        &self.frame
    }

    /// The most recently scaled frame.
    pub fn scaled_frame(&self) -> &B::Frame {
        &self.scaled
    }

    /**
        Returns true if the decoded frame is the newest one the decoder can
        offer without more input.

        The frame's DTS must not be the "no timestamp" sentinel, and must
        equal the DTS of the last packet the decoder accepted. A packet
        still waiting for resubmission does not count. Once the decoder is
        draining there is no more input, so any frame it delivered stays
        fresh.
    */
    pub fn is_frame_fresh(&self) -> bool {
        let dts = self.frame.dts();
        dts.is_some() && (self.draining || dts == self.fed_dts)
    }

    /**
        Returns true if the scaled frame was produced from the current
        decoded frame.
    */
    pub fn is_scaled_current(&self) -> bool {
        self.scaled.pts() == self.frame.pts()
    }

    /**
        Returns true once the container is exhausted. Decoding can only
        resume after a seek.
    */
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /**
        Forget everything decoded so far.

        Flushes the decoder and clears the packet and frame buffers. Called
        after the container position changed.
    */
    pub(crate) fn reset_decoding(&mut self) {
        self.decoder.flush();
        self.packet.unref();
        self.frame.unref();
        self.packet_pending = false;
        self.fed_dts = Timestamp::NONE;
        self.draining = false;
    }

    /**
        Release the session.

        Buffers go first, then the scaler, the decoder and the demuxer.
        Dropping the session has the same effect.
    */
    pub fn release(self) {
        debug!(stream = self.stream_index, "releasing stream session");
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, MockBackend, MockDecoder, MockDemuxer, MockScaler};

    #[test]
    fn rejects_unknown_stream() {
        let result = StreamSession::<MockBackend>::new(
            MockDemuxer::new(),
            MockDecoder::new(),
            5,
            mock::buffers(),
        );
        assert!(matches!(
            result,
            Err(Error::IndexOutOfBounds { index: 5, count: 2 })
        ));
    }

    #[test]
    fn new_session_is_empty() {
        let session = mock::session();
        assert_eq!(session.stream_index(), mock::VIDEO);
        assert_eq!(session.time_base(), mock::TIME_BASE);
        assert!(!session.is_frame_fresh());
        assert!(!session.has_scaler());
        assert!(!session.is_draining());
    }

    #[test]
    fn scaler_replacement() {
        let mut session = mock::session().with_scaler(MockScaler::new());
        assert!(session.has_scaler());

        let previous = session.set_scaler(None);
        assert!(previous.is_some());
        assert!(!session.has_scaler());
    }

    #[test]
    fn release_after_decoding() {
        let mut session = mock::session();
        session.decode_next_frame().unwrap();
        session.release();
    }
}
