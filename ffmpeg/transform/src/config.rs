/*!
    Scaler configuration types.
*/

use ffmpeg_next::software::scaling::Flags;

use ffmpeg_types::PixelFormat;

/**
    Value swscale treats as "use the built-in default" for a parameter.
*/
const PARAM_DEFAULT: f64 = 123456.0;

/**
    Scaling algorithm, with the tuning parameters the algorithm accepts.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum ScalingAlgorithm {
    FastBilinear,
    #[default]
    Bilinear,
    /// Bicubic with the `B` and `C` parameters of the Mitchell-Netravali filter
    Bicubic { b: f64, c: f64 },
    /// Experimental
    X,
    /// Nearest neighbor
    Point,
    Area,
    /// Bicubic for luma, bilinear for chroma
    Bicublin,
    Gauss { sharpness: f64 },
    Sinc,
    Lanczos { taps: f64 },
    Spline,
}

impl ScalingAlgorithm {
    /**
        Bicubic with the library's default parameters.
    */
    pub const fn bicubic() -> Self {
        Self::Bicubic { b: 0.0, c: 0.6 }
    }

    /**
        Gauss with the library's default sharpness.
    */
    pub const fn gauss() -> Self {
        Self::Gauss { sharpness: 3.0 }
    }

    /**
        Lanczos with the library's default number of taps.
    */
    pub const fn lanczos() -> Self {
        Self::Lanczos { taps: 3.0 }
    }

    /**
        The swscale flags and parameter array for this algorithm.
    */
    pub(crate) fn to_sws(self) -> (Flags, [f64; 2]) {
        let unset = [PARAM_DEFAULT, PARAM_DEFAULT];
        match self {
            Self::FastBilinear => (Flags::FAST_BILINEAR, unset),
            Self::Bilinear => (Flags::BILINEAR, unset),
            Self::Bicubic { b, c } => (Flags::BICUBIC, [b, c]),
            Self::X => (Flags::X, unset),
            Self::Point => (Flags::POINT, unset),
            Self::Area => (Flags::AREA, unset),
            Self::Bicublin => (Flags::BICUBLIN, unset),
            Self::Gauss { sharpness } => (Flags::GAUSS, [sharpness, PARAM_DEFAULT]),
            Self::Sinc => (Flags::SINC, unset),
            Self::Lanczos { taps } => (Flags::LANCZOS, [taps, PARAM_DEFAULT]),
            Self::Spline => (Flags::SPLINE, unset),
        }
    }
}

/**
    Configuration for a scaler.

    Dimensions left as `None` keep the corresponding source dimension.
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalerConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: PixelFormat,
    pub algorithm: ScalingAlgorithm,
}

impl ScalerConfig {
    /**
        Convert to `format`, keeping the source dimensions.
    */
    pub fn new(format: PixelFormat) -> Self {
        Self {
            width: None,
            height: None,
            format,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Convert to RGBA, keeping the source dimensions.
    */
    pub fn to_rgba() -> Self {
        Self::new(PixelFormat::Rgba)
    }

    /**
        Set the target size. Negative values keep the source dimension.
    */
    #[must_use]
    pub fn with_dimensions(mut self, width: i32, height: i32) -> Self {
        self.width = u32::try_from(width).ok();
        self.height = u32::try_from(height).ok();
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /**
        The output size for a source of the given size.
    */
    pub fn output_size(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        (
            self.width.unwrap_or(source_width),
            self.height.unwrap_or(source_height),
        )
    }
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self::to_rgba()
    }
}
