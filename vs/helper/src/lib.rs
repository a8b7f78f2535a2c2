/*!
    Helpers for video pipeline metadata.

    The centerpiece is [`muldiv`], which scales a frame rate or frame
    duration by an integer ratio and reduces the result, reporting any
    64-bit overflow instead of wrapping.

    # Rationals

    - [`Rational`] - Frame rates and frame durations
    - [`ScaleFactor`] - A `mul / div` ratio applied to a rational
    - [`muldiv`] and [`gcd`] - Overflow-checked scaling and reduction

    # Formats

    - [`VideoFormat`] and [`VideoInfo`] - Format and clip descriptors
    - [`is_same_format`] and [`is_constant_format`] - Compatibility checks

    # Utilities

    - [`int64_to_int_saturating`] - Clamping `i64` to `i32` conversion
    - [`AlignedBuffer`] - Heap buffers with a chosen alignment

    # Error Handling

    - [`Error`] and [`Result`] - Common error types

    Enable the `serde` feature to serialize the descriptor types.
*/

mod aligned;
mod error;
mod format;
mod rational;
mod saturate;

pub use aligned::AlignedBuffer;
pub use error::{Error, OverflowStep, Result};
pub use format::{
    ColorFamily, SampleType, VideoFormat, VideoInfo, is_constant_format, is_same_format,
};
pub use rational::{Rational, ScaleFactor, gcd, muldiv};
pub use saturate::int64_to_int_saturating;
