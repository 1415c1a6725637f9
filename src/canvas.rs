//! Pixel-level drawing on an RGBA canvas.
//!
//! Shapes follow the inclusive-corner convention: a rectangle `[x0, y0, x1, y1]`
//! covers both corner pixels, and a circle of radius `r` centered at `(cx, cy)`
//! covers every pixel whose offset satisfies `dx² + dy² <= r²`.

use crate::color::{lerp_color, TRANSPARENT};
use anyhow::{Context, Result};
use image::{ImageFormat, Pixel, Rgba, RgbaImage};
use std::{fs::create_dir_all, path::Path};

/// Allocate a fully transparent square canvas.
pub fn new_canvas(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, TRANSPARENT)
}

/// Center pixel of a square canvas.
pub fn center(canvas: &RgbaImage) -> (i64, i64) {
    (i64::from(canvas.width() / 2), i64::from(canvas.height() / 2))
}

/// Radius of the smallest circle `i >= 1` that contains the offset `(dx, dy)`.
pub fn ring_radius(dx: i64, dy: i64) -> u32 {
    let dist_sq = (dx * dx + dy * dy) as u64;
    let mut radius = (dist_sq as f64).sqrt() as u64;

    // Correct float error around perfect squares
    while radius * radius > dist_sq {
        radius -= 1;
    }
    while radius * radius < dist_sq {
        radius += 1;
    }

    radius.max(1) as u32
}

/// Paint a radial gradient of radius `radius` centered on the canvas.
///
/// The result is identical to filling circles of radius `radius` down to `1`
/// back-to-front, circle `i` taking the color at ratio `(radius - i) / radius`:
/// every pixel keeps the color of the smallest circle that covers it, so each
/// pixel is written once with that color.
pub fn draw_radial_gradient(
    canvas: &mut RgbaImage,
    radius: u32,
    start: Rgba<u8>,
    end: Rgba<u8>,
) {
    if radius == 0 {
        return;
    }

    let (cx, cy) = center(canvas);
    let r = i64::from(radius);

    for_each_in_circle(canvas, cx, cy, r, |pixel, dx, dy| {
        let ring = ring_radius(dx, dy);
        let ratio = f64::from(radius - ring) / f64::from(radius);
        *pixel = lerp_color(start, end, ratio);
    });
}

/// Fill a circle, replacing the covered pixels.
pub fn fill_circle(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: u32, color: Rgba<u8>) {
    for_each_in_circle(canvas, cx, cy, i64::from(radius), |pixel, _, _| {
        *pixel = color;
    });
}

/// Fill a circle, alpha-blending `color` over the covered pixels.
pub fn blend_circle(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: u32, color: Rgba<u8>) {
    for_each_in_circle(canvas, cx, cy, i64::from(radius), |pixel, _, _| {
        pixel.blend(&color);
    });
}

fn for_each_in_circle<F>(canvas: &mut RgbaImage, cx: i64, cy: i64, r: i64, mut f: F)
where
    F: FnMut(&mut Rgba<u8>, i64, i64),
{
    let width = i64::from(canvas.width());
    let height = i64::from(canvas.height());
    let r_sq = r * r;

    for y in (cy - r).max(0)..=(cy + r).min(height - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(width - 1) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r_sq {
                f(canvas.get_pixel_mut(x as u32, y as u32), dx, dy);
            }
        }
    }
}

/// Fill the rectangle spanning `(x0, y0)` to `(x1, y1)`, both corners included.
/// Parts outside the canvas are clipped.
pub fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let width = i64::from(canvas.width());
    let height = i64::from(canvas.height());

    for y in y0.max(0)..=y1.min(height - 1) {
        for x in x0.max(0)..=x1.min(width - 1) {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Write the canvas as an RGBA PNG, creating missing parent directories.
pub fn save_png(canvas: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)
            .with_context(|| format!("Can't create output directory {}", parent.display()))?;
    }

    canvas
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    Ok(())
}
