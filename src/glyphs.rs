//! The "RD" lettering: geometric letterforms and font-rendered text.

use crate::canvas::fill_rect;
use image::{Pixel, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub const LABEL: &str = "RD";

/// Size of the grid the geometric letterforms are laid out on.
const REFERENCE_SIZE: f32 = 512.0;

/// Rectangles `[x0, y0, x1, y1]` on the reference grid, corners included.
const LETTER_RECTS: [[i64; 4]; 8] = [
    // R: stem, top bar, middle bar
    [120, 120, 140, 380],
    [120, 120, 200, 140],
    [120, 200, 200, 220],
    // D: stem, then top, middle, lower middle and bottom bars
    [320, 120, 340, 380],
    [340, 120, 420, 140],
    [340, 200, 420, 220],
    [340, 280, 420, 300],
    [340, 360, 420, 380],
];

/// Leg of the R: stepped diagonal of small squares.
const DIAGONAL_ORIGIN: (i64, i64) = (200, 220);
const DIAGONAL_STEPS: i64 = 60;
const DIAGONAL_SQUARE: i64 = 2;

/// Font files tried after the preferred one, in order.
pub const SYSTEM_FONTS: &[&str] = &[
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// What was actually used to draw the lettering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSource {
    Font(PathBuf),
    Builtin,
}

impl fmt::Display for GlyphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphSource::Font(path) => write!(f, "font {}", path.display()),
            GlyphSource::Builtin => write!(f, "built-in letterforms"),
        }
    }
}

/// Draw the geometric "RD", scaled from the 512 px reference grid.
pub fn draw_letterforms(canvas: &mut RgbaImage, color: Rgba<u8>) {
    let k = canvas.width() as f32 / REFERENCE_SIZE;
    let scale = |v: i64| (v as f32 * k).round() as i64;

    for [x0, y0, x1, y1] in LETTER_RECTS {
        fill_rect(canvas, scale(x0), scale(y0), scale(x1), scale(y1), color);
    }

    let (ox, oy) = DIAGONAL_ORIGIN;
    for step in 0..DIAGONAL_STEPS {
        let x = ox - step;
        let y = oy + step;
        fill_rect(
            canvas,
            scale(x),
            scale(y),
            scale(x + DIAGONAL_SQUARE),
            scale(y + DIAGONAL_SQUARE),
            color,
        );
    }
}

/// Read and parse a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> Result<Font<'static>, String> {
    let data = std::fs::read(path).map_err(|e| e.to_string())?;
    Font::try_from_vec(data).ok_or_else(|| "not a TrueType/OpenType font".to_string())
}

/// Set `text` with the first candidate that loads and has ink for it.
///
/// Candidates that fail are not fatal. Returns the font used, if any, and
/// one note per skipped candidate so the caller can report them.
pub fn draw_text_with_first_font(
    canvas: &mut RgbaImage,
    candidates: &[PathBuf],
    text: &str,
    px: f32,
    lift: i32,
    color: Rgba<u8>,
) -> (Option<PathBuf>, Vec<String>) {
    let mut skipped = Vec::new();

    for path in candidates {
        match load_font(path) {
            Ok(font) => {
                if draw_centered_text(canvas, &font, text, px, lift, color) {
                    return (Some(path.clone()), skipped);
                }
                skipped.push(format!("{}: no glyphs for {text:?}", path.display()));
            }
            Err(reason) => skipped.push(format!("{}: {reason}", path.display())),
        }
    }

    (None, skipped)
}

#[cfg(test)]
pub(crate) fn first_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| load_font(path).is_ok())
}

/// Ink bounding box of a line of text, relative to the layout origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

/// Measure the ink of `text` at `px` pixels. `None` when no glyph has any ink.
pub fn measure_text(font: &Font<'_>, text: &str, px: f32) -> Option<TextBounds> {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;

    font.layout(text, scale, point(0.0, ascent))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .fold(None, |acc: Option<TextBounds>, bb| {
            Some(match acc {
                None => TextBounds {
                    min_x: bb.min.x,
                    min_y: bb.min.y,
                    max_x: bb.max.x,
                    max_y: bb.max.y,
                },
                Some(b) => TextBounds {
                    min_x: b.min_x.min(bb.min.x),
                    min_y: b.min_y.min(bb.min.y),
                    max_x: b.max_x.max(bb.max.x),
                    max_y: b.max_y.max(bb.max.y),
                },
            })
        })
}

/// Draw `text` with its ink box centered on the canvas, shifted up by `lift`
/// pixels. Coverage is alpha-blended over what is already there.
///
/// Returns `false` without drawing when the font has no ink for `text`.
pub fn draw_centered_text(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    text: &str,
    px: f32,
    lift: i32,
    color: Rgba<u8>,
) -> bool {
    let Some(bounds) = measure_text(font, text, px) else {
        return false;
    };

    let size = canvas.width() as i32;
    let offset_x = (size - bounds.width()) / 2 - bounds.min_x;
    let offset_y = (size - bounds.height()) / 2 - bounds.min_y - lift;

    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for glyph in font.layout(text, scale, point(0.0, ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };

        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32 + offset_x;
            let y = bb.min.y + gy as i32 + offset_y;
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }

            let alpha = (coverage.clamp(0.0, 1.0) * f32::from(color[3])).round() as u8;
            if alpha > 0 {
                let ink = Rgba([color[0], color[1], color[2], alpha]);
                canvas.get_pixel_mut(x as u32, y as u32).blend(&ink);
            }
        });
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::new_canvas,
        color::{TRANSPARENT, WHITE},
    };

    #[test]
    fn test_letterforms_at_reference_size() {
        let mut canvas = new_canvas(512);
        draw_letterforms(&mut canvas, WHITE);

        // R stem corners
        assert_eq!(*canvas.get_pixel(120, 120), WHITE);
        assert_eq!(*canvas.get_pixel(140, 380), WHITE);
        // Diagonal first and last squares
        assert_eq!(*canvas.get_pixel(200, 220), WHITE);
        assert_eq!(*canvas.get_pixel(141, 279), WHITE);
        assert_eq!(*canvas.get_pixel(143, 281), WHITE);
        // D bars
        assert_eq!(*canvas.get_pixel(420, 290), WHITE);
        assert_eq!(*canvas.get_pixel(420, 370), WHITE);

        // Gap between the D bars
        assert_eq!(*canvas.get_pixel(400, 250), TRANSPARENT);
        // Between the letters
        assert_eq!(*canvas.get_pixel(260, 250), TRANSPARENT);
        // Outside the lettering
        assert_eq!(*canvas.get_pixel(119, 120), TRANSPARENT);
        assert_eq!(*canvas.get_pixel(421, 120), TRANSPARENT);
    }

    #[test]
    fn test_letterforms_scale_with_canvas() {
        let mut canvas = new_canvas(1024);
        draw_letterforms(&mut canvas, WHITE);

        assert_eq!(*canvas.get_pixel(240, 240), WHITE);
        assert_eq!(*canvas.get_pixel(280, 760), WHITE);
        assert_eq!(*canvas.get_pixel(239, 240), TRANSPARENT);
        assert_eq!(*canvas.get_pixel(840, 740), WHITE);
    }

    #[test]
    fn test_letterforms_on_small_canvas_are_clipped() {
        let mut canvas = new_canvas(16);
        draw_letterforms(&mut canvas, WHITE);
        assert!(canvas.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn test_unusable_fonts_are_skipped_and_reported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let garbage = temp_dir.path().join("garbage.ttf");
        std::fs::write(&garbage, b"definitely not a font").unwrap();
        let missing = temp_dir.path().join("missing.ttf");

        let mut canvas = new_canvas(64);
        let (used, skipped) = draw_text_with_first_font(
            &mut canvas,
            &[missing.clone(), garbage.clone()],
            LABEL,
            20.0,
            0,
            WHITE,
        );

        assert!(used.is_none());
        assert_eq!(skipped.len(), 2);
        assert!(skipped[0].starts_with(&missing.display().to_string()));
        assert!(skipped[1].contains("not a TrueType/OpenType font"));
        assert!(canvas.pixels().all(|p| *p == TRANSPARENT));

        // A usable font after the bad ones is still reached, and the bad ones
        // are still reported
        let Some(font_path) = first_system_font() else {
            eprintln!("no system font available, skipping the rest of the test");
            return;
        };
        let (used, skipped) = draw_text_with_first_font(
            &mut canvas,
            &[missing, garbage, font_path.clone()],
            LABEL,
            20.0,
            0,
            WHITE,
        );
        assert_eq!(used, Some(font_path));
        assert_eq!(skipped.len(), 2);
        assert!(canvas.pixels().any(|p| *p != TRANSPARENT));
    }

    #[test]
    fn test_font_without_ink_moves_to_next_candidate() {
        let Some(font_path) = first_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };

        let mut canvas = new_canvas(64);
        let (used, skipped) = draw_text_with_first_font(
            &mut canvas,
            &[font_path.clone(), font_path],
            "",
            20.0,
            0,
            WHITE,
        );

        assert!(used.is_none());
        assert_eq!(skipped.len(), 2);
        assert!(skipped.iter().all(|note| note.contains("no glyphs")));
    }

    #[test]
    fn test_measure_text() {
        let Some(font_path) = first_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let font = load_font(&font_path).unwrap();

        assert_eq!(measure_text(&font, "", 200.0), None);
        assert_eq!(measure_text(&font, "   ", 200.0), None);

        let bounds = measure_text(&font, LABEL, 200.0).unwrap();
        assert!(bounds.width() > 0 && bounds.height() > 0);
        // Two capitals are wider than tall at this size
        assert!(bounds.width() > bounds.height(), "{bounds:?}");
        assert!(bounds.height() <= 200);
    }

    #[test]
    fn test_glyph_source_display() {
        assert_eq!(GlyphSource::Builtin.to_string(), "built-in letterforms");
        assert_eq!(
            GlyphSource::Font(PathBuf::from("arial.ttf")).to_string(),
            "font arial.ttf"
        );
    }

    #[test]
    fn test_text_bounds_dimensions() {
        let bounds = TextBounds {
            min_x: 3,
            min_y: -2,
            max_x: 103,
            max_y: 48,
        };
        assert_eq!(bounds.width(), 100);
        assert_eq!(bounds.height(), 50);
    }
}
