//! Contents.json sidecar for the generated icon
//!
//! Mirrors the subset of Apple's asset catalog `Contents.json` schema needed to
//! describe a single universal app icon, so the PNG can be dropped into an
//! `.appiconset` folder as-is.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const AUTHOR: &str = "rd-icon";

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContentsFile {
    /// Image entries, one per rendered file
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// File name relative to the catalog folder
    pub filename: String,

    /// The device type for the image ("universal", "iphone", "mac", ...)
    pub idiom: String,

    /// The scale factor ("1x", "2x", "3x")
    pub scale: String,

    /// The size of the image in points ("512x512")
    pub size: String,
}

/// Versioning and authorship information
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Info {
    pub version: u32,
    pub author: String,
}

impl ContentsFile {
    pub fn new(author: &str) -> Self {
        Self {
            images: Vec::new(),
            info: Info {
                version: 1,
                author: author.to_string(),
            },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Universal 1x entry for a square icon of `size` pixels.
    pub fn universal(filename: &str, size: u32) -> Self {
        Self {
            filename: filename.to_string(),
            idiom: "universal".to_string(),
            scale: "1x".to_string(),
            size: format!("{size}x{size}"),
        }
    }
}

/// Write a Contents.json describing `png_path` next to it. Returns the path
/// of the written file.
pub fn write_icon_contents_json(png_path: &Path, size: u32) -> Result<PathBuf> {
    let filename = png_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Output path has no usable file name: {}", png_path.display()))?;

    let mut contents = ContentsFile::new(AUTHOR);
    contents.add_image(ImageEntry::universal(filename, size));

    let dir = png_path.parent().unwrap_or_else(|| Path::new(""));
    let contents_path = dir.join("Contents.json");
    let json =
        serde_json::to_string_pretty(&contents).context("Failed to serialize Contents.json")?;
    std::fs::write(&contents_path, json).context("Failed to write Contents.json file")?;

    Ok(contents_path)
}
