/*!
    Pixel format types.
*/

/**
    Video pixel formats.

    This is a subset of formats commonly encountered when decoding and
    converting video. Formats the media library reports that are not in
    this list surface as `None` wherever a `PixelFormat` is optional.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little-endian (HDR content)
    Yuv420p10,
    /// Single 8-bit luma plane
    Gray8,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Packed RGBA, 32bpp (common for display)
    Rgba,
    /// Packed BGRA, 32bpp (common for display on macOS/Windows)
    Bgra,
}

impl PixelFormat {
    /**
        Returns the number of data planes a frame of this format uses.
    */
    pub const fn plane_count(self) -> usize {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => 3,
            Self::Nv12 => 2,
            Self::Gray8 | Self::Rgb24 | Self::Bgr24 | Self::Rgba | Self::Bgra => 1,
        }
    }

    /**
        Returns true if the pixel data is split across several planes.
    */
    pub const fn is_planar(self) -> bool {
        self.plane_count() > 1
    }

    /**
        Returns the number of bytes per pixel for packed formats.

        Planar formats return `None`, their row size differs per plane.
    */
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Gray8 => Some(1),
            Self::Rgb24 | Self::Bgr24 => Some(3),
            Self::Rgba | Self::Bgra => Some(4),
            _ => None,
        }
    }
}
