/*!
    Owned swscale context.
*/

use std::{os::raw::c_int, ptr};

use ffmpeg_next::{ffi, format::Pixel, util::frame::video::Video as VideoFrameFFmpeg};
use tracing::debug;

use ffmpeg_types::{Error, Result};

use crate::{config::ScalerConfig, pixel};

/**
    A scaling and pixel format conversion context with fixed input and
    output geometry.
*/
pub struct SwsScaler {
    ctx: *mut ffi::SwsContext,
    width: u32,
    height: u32,
    format: Pixel,
}

impl SwsScaler {
    /**
        Create a scaler for `width`x`height` frames in `source` format.

        Fails with [`Error::Library`] if the target format has no FFmpeg
        counterpart or the context cannot be created, e.g. for zero sizes.
    */
    pub fn new(width: u32, height: u32, source: Pixel, config: &ScalerConfig) -> Result<Self> {
        let invalid = Error::library(ffi::AVERROR(ffi::EINVAL));

        let format = pixel::to_ffmpeg(config.format).ok_or(invalid)?;
        let (out_width, out_height) = config.output_size(width, height);
        let (flags, params) = config.algorithm.to_sws();

        let dims = [width, height, out_width, out_height].map(c_int::try_from);
        let [Ok(src_w), Ok(src_h), Ok(dst_w), Ok(dst_h)] = dims else {
            return Err(invalid);
        };

        let ctx = unsafe {
            ffi::sws_getContext(
                src_w,
                src_h,
                source.into(),
                dst_w,
                dst_h,
                format.into(),
                flags.bits(),
                ptr::null_mut(),
                ptr::null_mut(),
                params.as_ptr(),
            )
        };
        if ctx.is_null() {
            return Err(invalid);
        }

        debug!(
            from = ?(width, height, source),
            to = ?(out_width, out_height, format),
            algorithm = ?config.algorithm,
            "created scaler"
        );

        Ok(Self {
            ctx,
            width: out_width,
            height: out_height,
            format,
        })
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Output pixel format.
    pub fn format(&self) -> Pixel {
        self.format
    }

    /**
        Scale `src` into `dst`.

        `dst` should be empty, its buffers are allocated to fit the output.
        Timestamps are not copied.
    */
    pub fn run(&mut self, src: &VideoFrameFFmpeg, dst: &mut VideoFrameFFmpeg) -> Result<()> {
        let ret = unsafe { ffi::sws_scale_frame(self.ctx, dst.as_mut_ptr(), src.as_ptr()) };
        if ret < 0 {
            return Err(Error::library(ret));
        }
        Ok(())
    }
}

impl Drop for SwsScaler {
    fn drop(&mut self) {
        if !self.ctx.is_null() {
            unsafe {
                ffi::sws_freeContext(self.ctx);
            }
            self.ctx = ptr::null_mut();
        }
    }
}

// SAFETY: The context is exclusively owned and only used through &mut self.
unsafe impl Send for SwsScaler {}

impl std::fmt::Debug for SwsScaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwsScaler")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_types::PixelFormat;

    use super::*;
    use crate::ScalingAlgorithm;

    #[test]
    fn output_geometry_follows_config() {
        let config = ScalerConfig::new(PixelFormat::Bgra)
            .with_dimensions(320, -1)
            .with_algorithm(ScalingAlgorithm::Point);
        let scaler = SwsScaler::new(640, 480, Pixel::YUV420P, &config).unwrap();

        assert_eq!(scaler.width(), 320);
        assert_eq!(scaler.height(), 480);
        assert_eq!(scaler.format(), Pixel::BGRA);
    }

    #[test]
    fn converts_a_frame() {
        let config = ScalerConfig::to_rgba().with_dimensions(32, 16);
        let mut scaler = SwsScaler::new(64, 32, Pixel::YUV420P, &config).unwrap();

        let src = VideoFrameFFmpeg::new(Pixel::YUV420P, 64, 32);
        let mut dst = VideoFrameFFmpeg::empty();
        scaler.run(&src, &mut dst).unwrap();

        assert_eq!(dst.width(), 32);
        assert_eq!(dst.height(), 16);
        assert_eq!(dst.format(), Pixel::RGBA);
    }

    #[test]
    fn zero_sized_source_is_rejected() {
        let config = ScalerConfig::to_rgba();
        let result = SwsScaler::new(0, 0, Pixel::YUV420P, &config);
        assert!(matches!(result, Err(Error::Library { .. })));
    }
}
