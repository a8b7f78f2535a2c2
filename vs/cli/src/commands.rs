use std::fmt;

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use vs_helper::{
    AlignedBuffer, Rational, ScaleFactor, VideoInfo, int64_to_int_saturating, is_constant_format,
    is_same_format,
};

use crate::descriptor::Descriptor;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Multiply a rational by MUL/DIV and reduce the result
    Muldiv {
        /// Rational as NUM/DEN (e.g. 24000/1001) or a bare integer
        #[arg(allow_hyphen_values = true)]
        rational: Rational,
        /// Multiplier applied to the numerator
        #[arg(allow_hyphen_values = true)]
        mul: i64,
        /// Divisor applied to the denominator
        #[arg(allow_hyphen_values = true)]
        div: i64,
    },
    /// Reduce a rational to lowest terms with a positive denominator
    Reduce {
        #[arg(allow_hyphen_values = true)]
        rational: Rational,
    },
    /// Clamp a 64-bit integer into the 32-bit range
    Saturate {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Check whether two clips have the same dimensions and format
    SameFormat {
        /// Clip as WIDTHxHEIGHT:FORMAT (e.g. 1920x1080:yuv420p8)
        a: Descriptor,
        b: Descriptor,
    },
    /// Check whether a clip's format is fixed for every frame
    ConstantFormat { clip: Descriptor },
    /// Allocate an aligned buffer and report its address
    Alloc { size: usize, alignment: usize },
}

/**
    The result of a single command, printed as text or JSON.
*/
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Output {
    Muldiv {
        input: Rational,
        scale: ScaleFactor,
        result: Rational,
    },
    Reduce {
        input: Rational,
        result: Rational,
    },
    Saturate {
        input: i64,
        result: i32,
    },
    SameFormat {
        a: VideoInfo,
        b: VideoInfo,
        same: bool,
    },
    ConstantFormat {
        clip: VideoInfo,
        constant: bool,
    },
    Alloc {
        size: usize,
        alignment: usize,
        address: usize,
    },
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Muldiv { result, .. } | Self::Reduce { result, .. } => write!(f, "{result}"),
            Self::Saturate { result, .. } => write!(f, "{result}"),
            Self::SameFormat { same, .. } => write!(f, "{same}"),
            Self::ConstantFormat { constant, .. } => write!(f, "{constant}"),
            Self::Alloc {
                size,
                alignment,
                address,
            } => write!(f, "{size} bytes at {address:#x} (aligned to {alignment})"),
        }
    }
}

impl Command {
    pub fn run(&self) -> anyhow::Result<Output> {
        match *self {
            Self::Muldiv { rational, mul, div } => {
                let scale = ScaleFactor::new(mul, div);
                let result = rational
                    .muldiv(scale)
                    .with_context(|| format!("failed to scale {rational} by {mul}/{div}"))?;
                Ok(Output::Muldiv {
                    input: rational,
                    scale,
                    result,
                })
            }
            Self::Reduce { rational } => {
                let result = rational
                    .reduced()
                    .with_context(|| format!("failed to reduce {rational}"))?;
                Ok(Output::Reduce {
                    input: rational,
                    result,
                })
            }
            Self::Saturate { value } => Ok(Output::Saturate {
                input: value,
                result: int64_to_int_saturating(value),
            }),
            Self::SameFormat {
                a: Descriptor(a),
                b: Descriptor(b),
            } => Ok(Output::SameFormat {
                a,
                b,
                same: is_same_format(&a, &b),
            }),
            Self::ConstantFormat {
                clip: Descriptor(clip),
            } => Ok(Output::ConstantFormat {
                clip,
                constant: is_constant_format(&clip),
            }),
            Self::Alloc { size, alignment } => {
                let buffer = AlignedBuffer::new(size, alignment).with_context(|| {
                    format!("failed to allocate {size} bytes aligned to {alignment}")
                })?;
                log::debug!("allocated {buffer:?}");
                Ok(Output::Alloc {
                    size: buffer.len(),
                    alignment: buffer.alignment(),
                    address: buffer.as_ptr() as usize,
                })
            }
        }
    }
}
