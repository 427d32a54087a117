/*!
    Frame scaling and pixel format conversion for the decode engine.

    Decoders output frames in whatever size and format the codec produces.
    This crate converts them to the size and format a consumer asks for,
    using swscale.

    # Example

    ```ignore
    use ffmpeg_transform::{ScalerConfig, ScalingAlgorithm, SwsScaler};
    use ffmpeg_types::PixelFormat;

    // 960 pixels wide BGRA, keeping the source height
    let config = ScalerConfig::new(PixelFormat::Bgra)
        .with_dimensions(960, -1)
        .with_algorithm(ScalingAlgorithm::bicubic());

    let mut scaler = SwsScaler::new(1920, 1080, decoded.format(), &config)?;
    scaler.run(&decoded, &mut converted)?;
    ```

    The scaler has fixed input geometry. Create a new one if the decoder's
    output size or format changes.
*/

pub use ffmpeg_types::{Error, PixelFormat, Result};

mod config;
mod pixel;
mod scaler;

pub use config::{ScalerConfig, ScalingAlgorithm};
pub use pixel::{from_ffmpeg as pixel_from_ffmpeg, to_ffmpeg as pixel_to_ffmpeg};
pub use scaler::SwsScaler;
