/*!
    Mapping between our pixel formats and FFmpeg's.
*/

use ffmpeg_next::format::Pixel;

use ffmpeg_types::PixelFormat;

/**
    Convert our pixel format to FFmpeg's.
*/
pub fn to_ffmpeg(format: PixelFormat) -> Option<Pixel> {
    Some(match format {
        PixelFormat::Yuv420p => Pixel::YUV420P,
        PixelFormat::Nv12 => Pixel::NV12,
        PixelFormat::Yuv422p => Pixel::YUV422P,
        PixelFormat::Yuv444p => Pixel::YUV444P,
        PixelFormat::Yuv420p10 => Pixel::YUV420P10LE,
        PixelFormat::Gray8 => Pixel::GRAY8,
        PixelFormat::Rgb24 => Pixel::RGB24,
        PixelFormat::Bgr24 => Pixel::BGR24,
        PixelFormat::Rgba => Pixel::RGBA,
        PixelFormat::Bgra => Pixel::BGRA,
        _ => return None,
    })
}

/**
    Convert FFmpeg's pixel format to ours, if we have a counterpart.
*/
pub fn from_ffmpeg(format: Pixel) -> Option<PixelFormat> {
    Some(match format {
        Pixel::YUV420P | Pixel::YUVJ420P => PixelFormat::Yuv420p,
        Pixel::NV12 => PixelFormat::Nv12,
        Pixel::YUV422P | Pixel::YUVJ422P => PixelFormat::Yuv422p,
        Pixel::YUV444P | Pixel::YUVJ444P => PixelFormat::Yuv444p,
        Pixel::YUV420P10LE => PixelFormat::Yuv420p10,
        Pixel::GRAY8 => PixelFormat::Gray8,
        Pixel::RGB24 => PixelFormat::Rgb24,
        Pixel::BGR24 => PixelFormat::Bgr24,
        Pixel::RGBA => PixelFormat::Rgba,
        Pixel::BGRA => PixelFormat::Bgra,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_reversible() {
        for format in [
            PixelFormat::Yuv420p,
            PixelFormat::Nv12,
            PixelFormat::Yuv422p,
            PixelFormat::Yuv444p,
            PixelFormat::Yuv420p10,
            PixelFormat::Gray8,
            PixelFormat::Rgb24,
            PixelFormat::Bgr24,
            PixelFormat::Rgba,
            PixelFormat::Bgra,
        ] {
            assert_eq!(to_ffmpeg(format).and_then(from_ffmpeg), Some(format));
        }
    }

    #[test]
    fn full_range_yuv_maps_to_planar_yuv() {
        assert_eq!(from_ffmpeg(Pixel::YUVJ420P), Some(PixelFormat::Yuv420p));
        assert_eq!(from_ffmpeg(Pixel::YUYV422), None);
    }
}
