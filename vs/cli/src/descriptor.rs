use std::str::FromStr;

use anyhow::{Context, bail};
use vs_helper::{VideoFormat, VideoInfo};

/**
    A clip descriptor given on the command line, as `WIDTHxHEIGHT:FORMAT`.

    `FORMAT` is one of the names in [`FORMAT_NAMES`] or `unknown`, and
    dimensions of `0` mean variable. The format part may be omitted,
    meaning `unknown`.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor(pub VideoInfo);

pub const FORMAT_NAMES: &[(&str, VideoFormat)] = &[
    ("gray8", VideoFormat::GRAY8),
    ("gray16", VideoFormat::GRAY16),
    ("yuv420p8", VideoFormat::YUV420P8),
    ("yuv422p8", VideoFormat::YUV422P8),
    ("yuv444p8", VideoFormat::YUV444P8),
    ("yuv420p10", VideoFormat::YUV420P10),
    ("rgb24", VideoFormat::RGB24),
    ("rgbs", VideoFormat::RGBS),
];

fn parse_format(name: &str) -> anyhow::Result<Option<VideoFormat>> {
    if name.eq_ignore_ascii_case("unknown") {
        return Ok(None);
    }
    match FORMAT_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
    {
        Some((_, format)) => Ok(Some(*format)),
        None => {
            let known = FORMAT_NAMES
                .iter()
                .map(|(known, _)| *known)
                .collect::<Vec<_>>()
                .join(", ");
            bail!("unknown format {name:?} (expected unknown, {known})")
        }
    }
}

impl FromStr for Descriptor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (dims, format) = s.split_once(':').unwrap_or((s, "unknown"));
        let (width, height) = dims
            .split_once(['x', 'X'])
            .with_context(|| format!("expected WIDTHxHEIGHT, got {dims:?}"))?;
        let width = width
            .trim()
            .parse::<i32>()
            .with_context(|| format!("invalid width {width:?}"))?;
        let height = height
            .trim()
            .parse::<i32>()
            .with_context(|| format!("invalid height {height:?}"))?;
        let format = parse_format(format.trim())?;
        Ok(Self(VideoInfo::new(format, width, height)))
    }
}
