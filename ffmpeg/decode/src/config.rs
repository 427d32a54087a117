/*!
    Decoder configuration types.
*/

/**
    Configuration for opening a video decoder.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Decoder threads (0 = let FFmpeg decide).
    pub thread_count: u32,
    /// Reduced-resolution decoding level, see [`lowres_level`].
    pub resolution: i32,
}

impl DecoderConfig {
    /**
        Create a new config with default settings (full resolution,
        automatic threading).
    */
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threads(mut self, thread_count: u32) -> Self {
        self.thread_count = thread_count;
        self
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: i32) -> Self {
        self.resolution = resolution;
        self
    }
}

/**
    The `lowres` value to request from a decoder supporting `max_lowres`.

    Non-negative levels count down from full resolution and are clamped to
    what the decoder supports. Negative levels count up from the lowest
    resolution, so `-1` is the smallest picture the decoder can produce.
    Negative levels beyond the supported range mean full resolution.
*/
pub fn lowres_level(resolution: i32, max_lowres: i32) -> i32 {
    if resolution >= 0 {
        resolution.min(max_lowres)
    } else if resolution.checked_neg().is_none_or(|r| r > max_lowres) {
        0
    } else {
        max_lowres + 1 + resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowres_counts_down_from_full_resolution() {
        assert_eq!(lowres_level(0, 3), 0);
        assert_eq!(lowres_level(2, 3), 2);
        assert_eq!(lowres_level(7, 3), 3);
        assert_eq!(lowres_level(1, 0), 0);
    }

    #[test]
    fn negative_lowres_counts_up_from_lowest_resolution() {
        assert_eq!(lowres_level(-1, 3), 3);
        assert_eq!(lowres_level(-2, 3), 2);
        assert_eq!(lowres_level(-4, 3), 0);
        assert_eq!(lowres_level(-5, 3), 0);
        assert_eq!(lowres_level(i32::MIN, 3), 0);
        assert_eq!(lowres_level(-1, 0), 0);
    }

    #[test]
    fn builder_methods() {
        let config = DecoderConfig::new().with_threads(4).with_resolution(-1);
        assert_eq!(config.thread_count, 4);
        assert_eq!(config.resolution, -1);
        assert_eq!(DecoderConfig::default().thread_count, 0);
    }
}
