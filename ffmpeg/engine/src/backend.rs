/*!
    The seams between the engine and a media library.

    The engine never talks to a media library directly. Instead it drives
    these traits, which a backend implements for its own demuxer, decoder,
    scaler and buffer types.
*/

use ffmpeg_types::{Discard, Error, Rational, SeekFlags, Timestamp};

/**
    Non-success outcomes of a single library call.

    `Again` and `Eof` are control flow for the engine. The other variants
    become [`Error::Library`] with the carried code.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendError {
    /// Not ready: output must be drained, or input must be supplied, first
    Again(i32),
    /// End of file, or the decoder has been fully flushed
    Eof,
    /// The call was rejected as invalid for the given context
    InvalidInput(i32),
    /// Any other failure
    Other(i32),
}

impl BackendError {
    /**
        The raw library code, if the failure carries one.
    */
    pub fn code(self) -> Option<i32> {
        match self {
            Self::Again(code) | Self::InvalidInput(code) | Self::Other(code) => Some(code),
            Self::Eof => None,
        }
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        match e.code() {
            Some(code) => Error::library(code),
            None => Error::Eof,
        }
    }
}

/**
    A reusable buffer holding one compressed packet.
*/
pub trait PacketBuffer {
    /// Index of the stream this packet belongs to.
    fn stream_index(&self) -> usize;
    fn pts(&self) -> Timestamp;
    fn dts(&self) -> Timestamp;
    fn duration(&self) -> Timestamp;
    /// Release the packet's payload, keeping the buffer itself.
    fn unref(&mut self);
}

/**
    A reusable buffer holding one decoded or converted picture.
*/
pub trait FrameBuffer {
    fn pts(&self) -> Timestamp;
    fn dts(&self) -> Timestamp;
    fn duration(&self) -> Timestamp;
    /// Overwrite all three timestamps at once.
    fn set_timing(&mut self, pts: Timestamp, dts: Timestamp, duration: Timestamp);
    /// Release the picture data, keeping the buffer itself.
    fn unref(&mut self);
}

/**
    Reads packets out of a container.
*/
pub trait Demuxer {
    type Packet: PacketBuffer;

    fn stream_count(&self) -> usize;

    /**
        Time base of a stream. Only called with indices below
        [`Demuxer::stream_count`].
    */
    fn time_base(&self, stream: usize) -> Rational;

    /**
        Read the next packet of any stream into `packet`.

        Returns [`BackendError::Eof`] once the container is exhausted, and
        keeps doing so until the next seek.
    */
    fn read(&mut self, packet: &mut Self::Packet) -> Result<(), BackendError>;

    /**
        Reposition the container near `timestamp`, given in the time base
        of `stream`. Only the container flags of `flags` are meaningful.
    */
    fn seek(&mut self, stream: usize, timestamp: i64, flags: SeekFlags)
    -> Result<(), BackendError>;
}

/**
    Turns the packets of one stream into frames.

    Input and output are decoupled: a packet may produce no frame, a frame
    may need several packets, and buffered frames may come out without new
    input.
*/
pub trait Decoder {
    type Packet: PacketBuffer;
    type Frame: FrameBuffer;

    /**
        Submit a packet. [`BackendError::Again`] means the packet was not
        accepted and must be sent again once output has been received.
    */
    fn send(&mut self, packet: &Self::Packet) -> Result<(), BackendError>;

    /**
        Take the next decoded frame. [`BackendError::Again`] means more
        input is needed first.
    */
    fn receive(&mut self, frame: &mut Self::Frame) -> Result<(), BackendError>;

    /**
        Signal end of input. Buffered frames can still be received, after
        which [`Decoder::receive`] reports [`BackendError::Eof`].
    */
    fn drain(&mut self) -> Result<(), BackendError>;

    /// Drop all buffered input and output, e.g. after a container seek.
    fn flush(&mut self);

    fn discard(&self) -> Discard;
    fn set_discard(&mut self, discard: Discard);

    /// True if the underlying codec context is an encoder.
    fn is_encoder(&self) -> bool;
}

/**
    Converts frames between sizes and pixel formats.
*/
pub trait Scaler {
    type Frame: FrameBuffer;

    /**
        Convert `src` into `dst`. Timestamps are handled by the engine.
    */
    fn scale(&mut self, src: &Self::Frame, dst: &mut Self::Frame) -> Result<(), BackendError>;
}

/**
    Ties together the types of one media library.
*/
pub trait Backend: Sized {
    type Packet: PacketBuffer;
    type Frame: FrameBuffer;
    type Demuxer: Demuxer<Packet = Self::Packet>;
    type Decoder: Decoder<Packet = Self::Packet, Frame = Self::Frame>;
    type Scaler: Scaler<Frame = Self::Frame>;
}
