/*!
    In-memory backend for tests.

    Models a 10 second, 25 fps video stream (stream 0) interleaved with an
    audio stream (stream 1). Every 25th video frame is a keyframe and every
    third frame in between is a non-reference frame. The decoder holds one
    packet back before producing output.
*/

use std::collections::VecDeque;

use ffmpeg_types::{Discard, Rational, SeekFlags, Timestamp};

use crate::backend::{
    Backend, BackendError, Decoder, Demuxer, FrameBuffer, PacketBuffer, Scaler,
};
use crate::session::{Buffers, StreamSession};

pub const TIME_BASE: Rational = Rational::new(1, 12800);
pub const FRAME_COUNT: usize = 250;
pub const FRAME_DURATION: i64 = 512;
pub const KEYFRAME_INTERVAL: usize = 25;
pub const VIDEO: usize = 0;
pub const AUDIO: usize = 1;

const EAGAIN: i32 = -11;
const EINVAL: i32 = -22;

pub fn is_keyframe(index: usize) -> bool {
    index % KEYFRAME_INTERVAL == 0
}

pub fn is_reference(index: usize) -> bool {
    is_keyframe(index) || index % 3 != 2
}

#[derive(Clone, Debug, Default)]
pub struct MockPacket {
    pub stream: usize,
    pub index: Option<usize>,
    pub pts: Timestamp,
    pub dts: Timestamp,
    pub duration: Timestamp,
}

impl PacketBuffer for MockPacket {
    fn stream_index(&self) -> usize {
        self.stream
    }

    fn pts(&self) -> Timestamp {
        self.pts
    }

    fn dts(&self) -> Timestamp {
        self.dts
    }

    fn duration(&self) -> Timestamp {
        self.duration
    }

    fn unref(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockFrame {
    pub source: Option<usize>,
    pub pts: Timestamp,
    pub dts: Timestamp,
    pub duration: Timestamp,
}

impl FrameBuffer for MockFrame {
    fn pts(&self) -> Timestamp {
        self.pts
    }

    fn dts(&self) -> Timestamp {
        self.dts
    }

    fn duration(&self) -> Timestamp {
        self.duration
    }

    fn set_timing(&mut self, pts: Timestamp, dts: Timestamp, duration: Timestamp) {
        self.pts = pts;
        self.dts = dts;
        self.duration = duration;
    }

    fn unref(&mut self) {
        *self = Self::default();
    }
}

pub struct MockDemuxer {
    packets: Vec<MockPacket>,
    position: usize,
    pub reads: usize,
    pub seeks: Vec<(usize, i64, SeekFlags)>,
    pub fail_read: bool,
    pub fail_seek: bool,
}

impl MockDemuxer {
    pub fn new() -> Self {
        let mut packets = Vec::with_capacity(FRAME_COUNT * 2);
        for i in 0..FRAME_COUNT {
            let ts = Timestamp(i as i64 * FRAME_DURATION);
            for stream in [VIDEO, AUDIO] {
                packets.push(MockPacket {
                    stream,
                    index: Some(i),
                    pts: ts,
                    dts: ts,
                    duration: Timestamp(FRAME_DURATION),
                });
            }
        }

        Self {
            packets,
            position: 0,
            reads: 0,
            seeks: Vec::new(),
            fail_read: false,
            fail_seek: false,
        }
    }

    fn video_position(index: usize) -> usize {
        index * 2
    }
}

impl Demuxer for MockDemuxer {
    type Packet = MockPacket;

    fn stream_count(&self) -> usize {
        2
    }

    fn time_base(&self, _stream: usize) -> Rational {
        TIME_BASE
    }

    fn read(&mut self, packet: &mut MockPacket) -> Result<(), BackendError> {
        if self.fail_read {
            return Err(BackendError::Other(-5));
        }
        let Some(next) = self.packets.get(self.position) else {
            return Err(BackendError::Eof);
        };
        *packet = next.clone();
        self.position += 1;
        self.reads += 1;
        Ok(())
    }

    fn seek(&mut self, stream: usize, timestamp: i64, flags: SeekFlags) -> Result<(), BackendError> {
        self.seeks.push((stream, timestamp, flags));
        if self.fail_seek {
            return Err(BackendError::Other(-1));
        }

        let mut candidates =
            (0..FRAME_COUNT).filter(|i| flags.contains(SeekFlags::ANY) || is_keyframe(*i));
        let pts = |i: usize| i as i64 * FRAME_DURATION;

        self.position = if flags.contains(SeekFlags::BACKWARD) {
            let index = candidates
                .filter(|i| pts(*i) <= timestamp)
                .last()
                .unwrap_or(0);
            Self::video_position(index)
        } else {
            match candidates.find(|i| pts(*i) >= timestamp) {
                Some(index) => Self::video_position(index),
                None => self.packets.len(),
            }
        };
        Ok(())
    }
}

pub struct MockDecoder {
    pub frames_per_packet: i64,
    pub delay: usize,
    pub encoder: bool,
    pub reject_input: bool,
    /// Indices of the packets accepted, in order
    pub sent: Vec<usize>,
    /// Indices of the packets whose frames were discarded
    pub dropped: Vec<usize>,
    queue: VecDeque<MockFrame>,
    last_dts: Timestamp,
    discard: Discard,
    draining: bool,
}

impl MockDecoder {
    pub fn new() -> Self {
        Self {
            frames_per_packet: 1,
            delay: 1,
            encoder: false,
            reject_input: false,
            sent: Vec::new(),
            dropped: Vec::new(),
            queue: VecDeque::new(),
            last_dts: Timestamp::NONE,
            discard: Discard::Default,
            draining: false,
        }
    }
}

impl Decoder for MockDecoder {
    type Packet = MockPacket;
    type Frame = MockFrame;

    fn send(&mut self, packet: &MockPacket) -> Result<(), BackendError> {
        if self.encoder || self.reject_input {
            return Err(BackendError::InvalidInput(EINVAL));
        }
        if self.draining {
            return Err(BackendError::Eof);
        }
        if self.queue.len() > self.delay {
            return Err(BackendError::Again(EAGAIN));
        }
        let Some(index) = packet.index else {
            return Err(BackendError::InvalidInput(EINVAL));
        };

        self.sent.push(index);
        self.last_dts = packet.dts;
        if self.discard.drops(is_keyframe(index), is_reference(index)) {
            self.dropped.push(index);
            return Ok(());
        }

        let duration = packet.duration.0 / self.frames_per_packet;
        for part in 0..self.frames_per_packet {
            self.queue.push_back(MockFrame {
                source: Some(index),
                pts: Timestamp(packet.pts.0 + part * duration),
                dts: Timestamp::NONE,
                duration: Timestamp(duration),
            });
        }
        Ok(())
    }

    fn receive(&mut self, frame: &mut MockFrame) -> Result<(), BackendError> {
        let ready = self.queue.len() > self.delay || (self.draining && !self.queue.is_empty());
        if !ready {
            return Err(if self.draining {
                BackendError::Eof
            } else {
                BackendError::Again(EAGAIN)
            });
        }

        if let Some(mut next) = self.queue.pop_front() {
            next.dts = self.last_dts;
            *frame = next;
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<(), BackendError> {
        if self.draining {
            return Err(BackendError::Eof);
        }
        self.draining = true;
        Ok(())
    }

    fn flush(&mut self) {
        self.queue.clear();
        self.last_dts = Timestamp::NONE;
        self.draining = false;
    }

    fn discard(&self) -> Discard {
        self.discard
    }

    fn set_discard(&mut self, discard: Discard) {
        self.discard = discard;
    }

    fn is_encoder(&self) -> bool {
        self.encoder
    }
}

pub struct MockScaler {
    pub calls: usize,
    pub fail: bool,
}

impl MockScaler {
    pub fn new() -> Self {
        Self {
            calls: 0,
            fail: false,
        }
    }
}

impl Scaler for MockScaler {
    type Frame = MockFrame;

    fn scale(&mut self, src: &MockFrame, dst: &mut MockFrame) -> Result<(), BackendError> {
        if self.fail {
            return Err(BackendError::Other(-1));
        }
        self.calls += 1;
        dst.source = src.source;
        Ok(())
    }
}

pub struct MockBackend;

impl Backend for MockBackend {
    type Packet = MockPacket;
    type Frame = MockFrame;
    type Demuxer = MockDemuxer;
    type Decoder = MockDecoder;
    type Scaler = MockScaler;
}

pub fn buffers() -> Buffers<MockBackend> {
    Buffers {
        packet: MockPacket::default(),
        frame: MockFrame::default(),
        scaled: MockFrame::default(),
    }
}

pub fn session() -> StreamSession<MockBackend> {
    session_with(MockDecoder::new())
}

pub fn session_with(decoder: MockDecoder) -> StreamSession<MockBackend> {
    StreamSession::new(MockDemuxer::new(), decoder, VIDEO, buffers())
        .expect("mock container has a video stream")
}
