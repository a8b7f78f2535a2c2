/*!
    Video format descriptors and the checks used to decide whether
    two clips can be mixed frame for frame.
*/

use crate::{Rational, ScaleFactor, error::Result};

/**
    Color family of a video format.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ColorFamily {
    /// Single luma plane
    Gray,
    /// Planar R, G, B
    Rgb,
    /// Planar Y, U, V (possibly subsampled chroma)
    Yuv,
}

impl ColorFamily {
    /**
        Returns the number of planes a format of this family carries.
    */
    pub const fn num_planes(self) -> u32 {
        match self {
            Self::Gray => 1,
            Self::Rgb | Self::Yuv => 3,
        }
    }
}

/**
    How samples are stored.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleType {
    Integer,
    Float,
}

/**
    A concrete video format.

    The `id` identifies the format within a pipeline; the remaining
    fields describe its sample layout. Formats are compared by value.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoFormat {
    pub id: u32,
    pub color_family: ColorFamily,
    pub sample_type: SampleType,
    pub bits_per_sample: u8,
    /// log2 horizontal chroma subsampling
    pub sub_sampling_w: u8,
    /// log2 vertical chroma subsampling
    pub sub_sampling_h: u8,
}

impl VideoFormat {
    pub const GRAY8: Self = Self::integer(1000010, ColorFamily::Gray, 8, 0, 0);
    pub const GRAY16: Self = Self::integer(1000012, ColorFamily::Gray, 16, 0, 0);
    pub const YUV420P8: Self = Self::integer(3000010, ColorFamily::Yuv, 8, 1, 1);
    pub const YUV422P8: Self = Self::integer(3000011, ColorFamily::Yuv, 8, 1, 0);
    pub const YUV444P8: Self = Self::integer(3000012, ColorFamily::Yuv, 8, 0, 0);
    pub const YUV420P10: Self = Self::integer(3000016, ColorFamily::Yuv, 10, 1, 1);
    pub const RGB24: Self = Self::integer(2000010, ColorFamily::Rgb, 8, 0, 0);
    pub const RGBS: Self = Self {
        id: 2000021,
        color_family: ColorFamily::Rgb,
        sample_type: SampleType::Float,
        bits_per_sample: 32,
        sub_sampling_w: 0,
        sub_sampling_h: 0,
    };

    const fn integer(
        id: u32,
        color_family: ColorFamily,
        bits_per_sample: u8,
        sub_sampling_w: u8,
        sub_sampling_h: u8,
    ) -> Self {
        Self {
            id,
            color_family,
            sample_type: SampleType::Integer,
            bits_per_sample,
            sub_sampling_w,
            sub_sampling_h,
        }
    }

    /**
        Returns the number of bytes used to store one sample.
    */
    pub const fn bytes_per_sample(self) -> u32 {
        (self.bits_per_sample as u32).div_ceil(8)
    }

    pub const fn num_planes(self) -> u32 {
        self.color_family.num_planes()
    }
}

/**
    Clip-level video metadata.

    A `format` of `None` or a zero `width`/`height` means the value may
    change from frame to frame.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoInfo {
    pub format: Option<VideoFormat>,
    pub fps: Option<Rational>,
    pub width: i32,
    pub height: i32,
    pub num_frames: i32,
}

impl VideoInfo {
    pub fn new(format: Option<VideoFormat>, width: i32, height: i32) -> Self {
        Self {
            format,
            width,
            height,
            ..Self::default()
        }
    }

    /**
        Set the frame rate, returning the updated info.
    */
    pub fn with_fps(mut self, fps: Rational) -> Self {
        self.fps = Some(fps);
        self
    }

    /**
        See [`is_constant_format`].
    */
    pub fn is_constant_format(&self) -> bool {
        is_constant_format(self)
    }

    /**
        Duration of a single frame (the inverse of the frame rate),
        or `None` for variable frame rate clips.
    */
    pub fn frame_duration(&self) -> Option<Result<Rational>> {
        self.fps.map(Rational::checked_invert)
    }

    /**
        Frame rate scaled by `scale`, as needed when a filter changes
        the number of frames per second (e.g. doubling for a bob
        deinterlacer). Returns `None` for variable frame rate clips.
    */
    pub fn scaled_fps(&self, scale: ScaleFactor) -> Option<Result<Rational>> {
        self.fps.map(|fps| fps.muldiv(scale))
    }
}

/**
    Returns true if the format never changes between frames: both
    dimensions are known and positive and the format is set.
*/
pub fn is_constant_format(info: &VideoInfo) -> bool {
    info.height > 0 && info.width > 0 && info.format.is_some()
}

/**
    Returns true if two clips have the same dimensions and format.

    Unknown (changeable) dimensions and formats are considered the same
    as each other.
*/
pub fn is_same_format(a: &VideoInfo, b: &VideoInfo) -> bool {
    a.height == b.height && a.width == b.width && a.format == b.format
}

static_assertions::assert_impl_all!(VideoInfo: Send, Sync, Copy);
