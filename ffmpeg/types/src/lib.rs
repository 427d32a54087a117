/*!
    Shared types for the frame-accurate decode and seek engine.

    This crate defines the vocabulary that crosses crate boundaries. It has
    no dependency on FFmpeg, so the engine and its tests can be built and
    exercised without linking the media libraries.

    # Core Types

    - [`Rational`] - Stream time bases
    - [`Timestamp`] - PTS, DTS and durations in time base units, including
      the "no timestamp" sentinel
    - [`PixelFormat`] - Video pixel formats

    # Decoding Control

    - [`Discard`] - Decoder discard policy
    - [`SeekFlags`] - Flags for the two-phase seek

    # Error Handling

    - [`Error`] and [`Result`] - The result codes of every operation
*/

mod discard;
mod error;
mod format;
mod rational;
mod seek;
mod timestamp;

pub use discard::Discard;
pub use error::{Error, Result};
pub use format::PixelFormat;
pub use rational::Rational;
pub use seek::SeekFlags;
pub use timestamp::Timestamp;

// Result codes and timestamps travel between threads together with sessions
static_assertions::assert_impl_all!(Error: Send, Sync, Copy);
static_assertions::assert_impl_all!(Timestamp: Send, Sync, Copy);
