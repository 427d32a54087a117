/*!
    FFmpeg implementations of the engine's backend traits.
*/

use std::os::raw::c_int;

use ffmpeg_next::{
    codec::{decoder::Video as VideoDecoderFFmpeg, discard::Discard as DiscardFFmpeg},
    ffi,
    format::{Pixel, context::Input},
    util::{
        error::{EAGAIN, EINVAL},
        frame::video::Video as VideoFrameFFmpeg,
    },
};

use ffmpeg_engine::backend::{self as engine, Backend, BackendError};
use ffmpeg_transform::SwsScaler;
use ffmpeg_types::{Discard, Rational, SeekFlags, Timestamp};

/**
    Time base used when a stream reports none.
*/
const FALLBACK_TIME_BASE: Rational = Rational::new(1, ffi::AV_TIME_BASE);

/**
    Classify an FFmpeg error for the engine.
*/
pub(crate) fn backend_error(e: ffmpeg_next::Error) -> BackendError {
    let code = c_int::from(e);
    match e {
        ffmpeg_next::Error::Eof => BackendError::Eof,
        ffmpeg_next::Error::Other { errno } if errno == EAGAIN => BackendError::Again(code),
        ffmpeg_next::Error::Other { errno } if errno == EINVAL => BackendError::InvalidInput(code),
        _ => BackendError::Other(code),
    }
}

/**
    A reusable packet buffer.
*/
pub struct Packet(pub(crate) ffmpeg_next::Packet);

impl Packet {
    pub fn empty() -> Self {
        Self(ffmpeg_next::Packet::empty())
    }

    /// The packet's payload, empty if nothing was read.
    pub fn data(&self) -> &[u8] {
        self.0.data().unwrap_or_default()
    }

    pub fn is_key(&self) -> bool {
        self.0.is_key()
    }
}

impl engine::PacketBuffer for Packet {
    fn stream_index(&self) -> usize {
        self.0.stream()
    }

    fn pts(&self) -> Timestamp {
        self.0.pts().into()
    }

    fn dts(&self) -> Timestamp {
        self.0.dts().into()
    }

    fn duration(&self) -> Timestamp {
        Timestamp(self.0.duration())
    }

    fn unref(&mut self) {
        unsafe {
            ffi::av_packet_unref(self.0.as_mut_ptr());
        }
    }
}

/**
    A reusable video frame buffer, used for both decoded and scaled frames.
*/
pub struct Frame(pub(crate) VideoFrameFFmpeg);

impl Frame {
    pub fn empty() -> Self {
        Self(VideoFrameFFmpeg::empty())
    }

    /// The underlying FFmpeg frame.
    pub fn as_ffmpeg(&self) -> &VideoFrameFFmpeg {
        &self.0
    }
}

impl engine::FrameBuffer for Frame {
    fn pts(&self) -> Timestamp {
        self.0.pts().into()
    }

    fn dts(&self) -> Timestamp {
        Timestamp(unsafe { (*self.0.as_ptr()).pkt_dts })
    }

    fn duration(&self) -> Timestamp {
        Timestamp(unsafe { (*self.0.as_ptr()).duration })
    }

    fn set_timing(&mut self, pts: Timestamp, dts: Timestamp, duration: Timestamp) {
        unsafe {
            let ptr = self.0.as_mut_ptr();
            (*ptr).pts = pts.0;
            (*ptr).best_effort_timestamp = pts.0;
            (*ptr).pkt_dts = dts.0;
            (*ptr).duration = duration.0;
        }
    }

    fn unref(&mut self) {
        unsafe {
            ffi::av_frame_unref(self.0.as_mut_ptr());
        }
    }
}

/**
    An opened media container.
*/
pub struct Demuxer {
    pub(crate) input: Input,
}

impl Demuxer {
    /// The underlying FFmpeg input context.
    pub fn input(&self) -> &Input {
        &self.input
    }
}

impl engine::Demuxer for Demuxer {
    type Packet = Packet;

    fn stream_count(&self) -> usize {
        self.input.nb_streams() as usize
    }

    fn time_base(&self, stream: usize) -> Rational {
        self.input
            .stream(stream)
            .map(|s| s.time_base())
            .and_then(|tb| Rational::try_new(tb.numerator(), tb.denominator()))
            .unwrap_or(FALLBACK_TIME_BASE)
    }

    fn read(&mut self, packet: &mut Packet) -> Result<(), BackendError> {
        packet.0.read(&mut self.input).map_err(backend_error)
    }

    fn seek(
        &mut self,
        stream: usize,
        timestamp: i64,
        flags: SeekFlags,
    ) -> Result<(), BackendError> {
        let stream = c_int::try_from(stream).map_err(|_| BackendError::Other(ffi::AVERROR(EINVAL)))?;
        // Container flags share their bit values with AVSEEK_FLAG_*
        let flags = flags.container_flags().bits() as c_int;

        let ret = unsafe { ffi::av_seek_frame(self.input.as_mut_ptr(), stream, timestamp, flags) };
        if ret < 0 {
            // Failed seeks are never end of file for the engine
            return Err(BackendError::Other(ret));
        }
        Ok(())
    }
}

/**
    An opened video decoder.
*/
pub struct Decoder {
    pub(crate) inner: VideoDecoderFFmpeg,
}

impl Decoder {
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn format(&self) -> Pixel {
        self.inner.format()
    }

    /// Reduced-resolution level the decoder was opened with.
    pub fn lowres(&self) -> i32 {
        unsafe { (*self.inner.as_ptr()).lowres }
    }
}

impl engine::Decoder for Decoder {
    type Packet = Packet;
    type Frame = Frame;

    fn send(&mut self, packet: &Packet) -> Result<(), BackendError> {
        self.inner.send_packet(&packet.0).map_err(backend_error)
    }

    fn receive(&mut self, frame: &mut Frame) -> Result<(), BackendError> {
        self.inner.receive_frame(&mut frame.0).map_err(backend_error)
    }

    fn drain(&mut self) -> Result<(), BackendError> {
        self.inner.send_eof().map_err(backend_error)
    }

    fn flush(&mut self) {
        self.inner.flush();
    }

    fn discard(&self) -> Discard {
        let raw = unsafe { (*self.inner.as_ptr()).skip_frame };
        discard_from_ffmpeg(DiscardFFmpeg::from(raw))
    }

    fn set_discard(&mut self, discard: Discard) {
        let raw = ffi::AVDiscard::from(discard_to_ffmpeg(discard));
        unsafe {
            (*self.inner.as_mut_ptr()).skip_frame = raw;
        }
    }

    fn is_encoder(&self) -> bool {
        unsafe {
            let codec = (*self.inner.as_ptr()).codec;
            !codec.is_null() && ffi::av_codec_is_encoder(codec) != 0
        }
    }
}

/**
    A scaler converting decoded frames into the session's scaled frame.
*/
pub struct Scaler(pub(crate) SwsScaler);

impl Scaler {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn format(&self) -> Pixel {
        self.0.format()
    }
}

impl engine::Scaler for Scaler {
    type Frame = Frame;

    fn scale(&mut self, src: &Frame, dst: &mut Frame) -> Result<(), BackendError> {
        self.0
            .run(&src.0, &mut dst.0)
            .map_err(|e| BackendError::Other(e.code().unwrap_or(ffi::AVERROR(EINVAL))))
    }
}

/**
    The FFmpeg backend.
*/
pub struct Ffmpeg;

impl Backend for Ffmpeg {
    type Packet = Packet;
    type Frame = Frame;
    type Demuxer = Demuxer;
    type Decoder = Decoder;
    type Scaler = Scaler;
}

pub(crate) fn discard_to_ffmpeg(discard: Discard) -> DiscardFFmpeg {
    match discard {
        Discard::None => DiscardFFmpeg::None,
        Discard::Default => DiscardFFmpeg::Default,
        Discard::NonRef => DiscardFFmpeg::NonReference,
        Discard::Bidir => DiscardFFmpeg::Bidirectional,
        Discard::NonIntra => DiscardFFmpeg::NonIntra,
        Discard::NonKey => DiscardFFmpeg::NonKey,
        Discard::All => DiscardFFmpeg::All,
    }
}

pub(crate) fn discard_from_ffmpeg(discard: DiscardFFmpeg) -> Discard {
    match discard {
        DiscardFFmpeg::None => Discard::None,
        DiscardFFmpeg::Default => Discard::Default,
        DiscardFFmpeg::NonReference => Discard::NonRef,
        DiscardFFmpeg::Bidirectional => Discard::Bidir,
        DiscardFFmpeg::NonIntra => Discard::NonIntra,
        DiscardFFmpeg::NonKey => Discard::NonKey,
        DiscardFFmpeg::All => Discard::All,
    }
}
