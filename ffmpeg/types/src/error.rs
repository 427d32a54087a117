/*!
    Error types for the ffmpeg crate ecosystem.
*/

use thiserror::Error;

/**
    Result codes for every engine operation.

    Success is `Ok`; everything else is one of these variants. Failures that
    originate inside the media library carry the library's numeric error code
    so callers can log or inspect it.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// End of stream (not really an error, but part of control flow)
    #[error("end of stream")]
    Eof,
    /// The media library reported a failure
    #[error("library error (code {code})")]
    Library { code: i32 },
    /// A precise seek could not reach the requested timestamp
    #[error("timestamp out of bounds")]
    TimestampOutOfBounds,
    /// The container could not be read from the file system
    #[error("I/O error (code {code})")]
    Io { code: i32 },
    /// An encoder context was handed to an operation requiring a decoder
    #[error("encoder used where a decoder is required")]
    EncoderAsDecoder,
    /// No suitable stream could be selected
    #[error("stream not found")]
    StreamNotFound,
    /// The stream exists but no decoder is available for it
    #[error("decoder not found")]
    DecoderNotFound,
    /// A stream index outside of the container's stream list
    #[error("index {index} out of bounds (stream count {count})")]
    IndexOutOfBounds { index: usize, count: usize },
    /// A required input was never provided
    #[error("null reference: {what}")]
    NullReference { what: &'static str },
}

impl Error {
    /**
        The media library's code for invalid data found while processing
        input (`AVERROR_INVALIDDATA`).
    */
    pub const INVALID_DATA: i32 = -0x4144_4E49;

    /**
        Create a library error from a raw library error code.
    */
    pub const fn library(code: i32) -> Self {
        Self::Library { code }
    }

    /**
        Returns true if this is an EOF error.
    */
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /**
        Returns true if this error is caused by wrong usage of the API
        rather than by the media or the environment.
    */
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::EncoderAsDecoder
                | Self::StreamNotFound
                | Self::DecoderNotFound
                | Self::IndexOutOfBounds { .. }
                | Self::NullReference { .. }
        )
    }

    /**
        The out-of-band numeric code from the media library, if any.
    */
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Library { code } | Self::Io { code } => Some(*code),
            _ => None,
        }
    }
}

/**
    Result type alias for the ffmpeg crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = Error::library(-22);
        assert_eq!(format!("{e}"), "library error (code -22)");

        let e = Error::IndexOutOfBounds { index: 3, count: 2 };
        assert_eq!(format!("{e}"), "index 3 out of bounds (stream count 2)");

        let e = Error::Eof;
        assert_eq!(format!("{e}"), "end of stream");
    }

    #[test]
    fn error_is_eof() {
        assert!(Error::Eof.is_eof());
        assert!(!Error::library(-1).is_eof());
        assert!(!Error::TimestampOutOfBounds.is_eof());
    }

    #[test]
    fn error_code_is_out_of_band() {
        assert_eq!(Error::library(-11).code(), Some(-11));
        assert_eq!(Error::Io { code: -2 }.code(), Some(-2));
        assert_eq!(Error::Eof.code(), None);
        assert_eq!(Error::StreamNotFound.code(), None);
    }

    #[test]
    fn invalid_data_code_is_a_failure() {
        assert!(Error::INVALID_DATA < 0);
        assert_eq!(
            Error::library(Error::INVALID_DATA).code(),
            Some(-1_094_995_529)
        );
    }

    #[test]
    fn misuse_is_separated_from_environment() {
        assert!(Error::EncoderAsDecoder.is_misuse());
        assert!(Error::NullReference { what: "path" }.is_misuse());
        assert!(Error::IndexOutOfBounds { index: 0, count: 0 }.is_misuse());
        assert!(!Error::Io { code: -5 }.is_misuse());
        assert!(!Error::library(-1).is_misuse());
        assert!(!Error::Eof.is_misuse());
    }
}
