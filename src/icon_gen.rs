//! Icon styles, option resolution and the render/write pipeline.

use crate::{
    canvas::{blend_circle, center, draw_radial_gradient, fill_circle, new_canvas, save_png},
    color::{parse_color, WHITE},
    contents_json::write_icon_contents_json,
    glyphs::{draw_letterforms, draw_text_with_first_font, GlyphSource, LABEL, SYSTEM_FONTS},
};
use anyhow::{bail, Result};
use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use std::path::PathBuf;

/// Alpha of the inner disc of the layered style.
const LAYERED_INNER_ALPHA: u8 = 200;

/// The icon recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IconStyle {
    /// Gradient disc with blocky geometric "RD"
    Letters,
    /// Gradient disc with "RD" set in a font
    Text,
    /// Solid disc under a translucent inner disc, with "RD" set in a font
    Layered,
}

impl IconStyle {
    pub fn default_size(self) -> u32 {
        match self {
            IconStyle::Letters | IconStyle::Text => 512,
            IconStyle::Layered => 1024,
        }
    }

    /// Gradient radius for gradient styles, outer disc radius for `Layered`.
    pub fn default_radius(self, size: u32) -> u32 {
        match self {
            // 240 px on a 512 canvas
            IconStyle::Letters | IconStyle::Text => (u64::from(size) * 15 / 32) as u32,
            IconStyle::Layered => (size as f32 * 0.45) as u32,
        }
    }

    pub fn default_colors(self) -> (Rgba<u8>, Rgba<u8>) {
        match self {
            IconStyle::Letters | IconStyle::Text => {
                (Rgba([33, 150, 243, 255]), Rgba([0, 188, 212, 255]))
            }
            IconStyle::Layered => (Rgba([30, 58, 138, 255]), Rgba([6, 182, 212, 255])),
        }
    }

    pub fn default_output(self) -> PathBuf {
        match self {
            IconStyle::Letters => PathBuf::from("assets/icons/app_icon_rd.png"),
            IconStyle::Text | IconStyle::Layered => PathBuf::from("assets/icons/app_icon.png"),
        }
    }
}

/// Fully resolved settings for one render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub style: IconStyle,
    pub size: u32,
    pub radius: u32,
    pub start: Rgba<u8>,
    pub end: Rgba<u8>,
    /// Fonts to try, in order. Ignored by `Letters`.
    pub fonts: Vec<PathBuf>,
    pub output: PathBuf,
    pub contents_json: bool,
}

/// Optional overrides, as they come from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub size: Option<u32>,
    pub radius: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub font: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub contents_json: bool,
}

impl RenderOptions {
    /// Defaults of `style` with nothing overridden.
    pub fn for_style(style: IconStyle) -> Self {
        let size = style.default_size();
        let (start, end) = style.default_colors();
        Self {
            style,
            size,
            radius: style.default_radius(size),
            start,
            end,
            fonts: SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
            output: style.default_output(),
            contents_json: false,
        }
    }

    /// Apply `overrides` on top of the defaults of `style` and validate.
    pub fn resolve(style: IconStyle, overrides: Overrides) -> Result<Self> {
        let mut options = Self::for_style(style);

        if let Some(size) = overrides.size {
            options.size = size;
            options.radius = style.default_radius(size);
        }
        if let Some(radius) = overrides.radius {
            options.radius = radius;
        }
        if let Some(start) = overrides.start {
            options.start = parse_color(&start)?;
        }
        if let Some(end) = overrides.end {
            options.end = parse_color(&end)?;
        }
        if let Some(font) = overrides.font {
            options.fonts.insert(0, font);
        }
        if let Some(output) = overrides.output {
            options.output = output;
        }
        options.contents_json = overrides.contents_json;

        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            bail!("Icon size must be greater than zero");
        }
        if self.radius == 0 || self.radius > self.size / 2 {
            bail!(
                "Radius must be between 1 and {} for a {}x{} icon, got {}",
                self.size / 2,
                self.size,
                self.size,
                self.radius
            );
        }
        Ok(())
    }
}

/// Render the icon in memory.
pub fn render_icon(options: &RenderOptions) -> Result<(RgbaImage, GlyphSource)> {
    options.validate()?;

    let mut canvas = new_canvas(options.size);
    draw_background(&mut canvas, options);

    let size = options.size as f32;
    let source = match options.style {
        IconStyle::Letters => {
            draw_letterforms(&mut canvas, WHITE);
            GlyphSource::Builtin
        }
        // 200 px on a 512 canvas
        IconStyle::Text => draw_label(&mut canvas, &options.fonts, size * 200.0 / 512.0, 0),
        IconStyle::Layered => {
            draw_label(&mut canvas, &options.fonts, size * 0.3, layered_lift(options.size))
        }
    };

    Ok((canvas, source))
}

/// Paint everything below the lettering.
pub fn draw_background(canvas: &mut RgbaImage, options: &RenderOptions) {
    match options.style {
        IconStyle::Letters | IconStyle::Text => {
            draw_radial_gradient(canvas, options.radius, options.start, options.end);
        }
        IconStyle::Layered => {
            let (cx, cy) = center(canvas);
            let inner_radius = (options.radius as f32 * 0.8) as u32;
            let inner = Rgba([options.end[0], options.end[1], options.end[2], LAYERED_INNER_ALPHA]);

            fill_circle(canvas, cx, cy, options.radius, options.start);
            blend_circle(canvas, cx, cy, inner_radius, inner);
        }
    }
}

/// Upward shift of the layered lettering: 20 px on a 1024 canvas.
pub fn layered_lift(size: u32) -> i32 {
    (20.0 * size as f32 / 1024.0).round() as i32
}

/// Set "RD" with the first usable font, or fall back to the letterforms.
fn draw_label(canvas: &mut RgbaImage, fonts: &[PathBuf], px: f32, lift: i32) -> GlyphSource {
    let (used, skipped) = draw_text_with_first_font(canvas, fonts, LABEL, px, lift, WHITE);

    if !skipped.is_empty() {
        match &used {
            Some(path) => eprintln!("Warning: skipped fonts, using {}", path.display()),
            None => eprintln!("Warning: no usable font found, using built-in letterforms"),
        }
        for note in &skipped {
            eprintln!("  - {note}");
        }
    }

    match used {
        Some(path) => GlyphSource::Font(path),
        None => {
            draw_letterforms(canvas, WHITE);
            GlyphSource::Builtin
        }
    }
}

/// Render the icon and write it to disk, plus `Contents.json` when asked.
pub fn generate_icon(options: &RenderOptions) -> Result<GlyphSource> {
    let (canvas, source) = render_icon(options)?;

    save_png(&canvas, &options.output)?;
    println!(
        "✓ Generated {} ({}x{}, {})",
        options.output.display(),
        options.size,
        options.size,
        source
    );

    if options.contents_json {
        let contents_path = write_icon_contents_json(&options.output, options.size)?;
        println!("✓ Generated {}", contents_path.display());
    }

    Ok(source)
}
