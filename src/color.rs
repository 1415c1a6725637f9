//! Color parsing and channel interpolation for the gradient.

use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Parse a CSS color (`#2196f3`, `rgb(33, 150, 243)`, `teal`, ...) into an
/// opaque RGBA pixel. The alpha of the CSS value is ignored.
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {color:?} (expected CSS color syntax)"))?;

    Ok(Rgba([
        to_channel(srgb.red),
        to_channel(srgb.green),
        to_channel(srgb.blue),
        255,
    ]))
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear interpolation of a single channel, truncated toward zero.
pub fn lerp_channel(start: u8, end: u8, ratio: f64) -> u8 {
    let start = f64::from(start);
    let end = f64::from(end);
    (start + (end - start) * ratio).clamp(0.0, 255.0) as u8
}

/// Interpolate the RGB channels between `start` and `end`. The result is
/// always fully opaque.
pub fn lerp_color(start: Rgba<u8>, end: Rgba<u8>, ratio: f64) -> Rgba<u8> {
    Rgba([
        lerp_channel(start[0], end[0], ratio),
        lerp_channel(start[1], end[1], ratio),
        lerp_channel(start[2], end[2], ratio),
        255,
    ])
}
