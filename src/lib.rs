//! Draws the RD app icon: a radial gradient disc with "RD" lettering, written
//! as an RGBA PNG.

pub mod canvas;
pub mod color;
pub mod contents_json;
pub mod glyphs;
pub mod icon_gen;
