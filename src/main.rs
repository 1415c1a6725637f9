use anyhow::Result;
use clap::Parser;
use rd_icon::icon_gen::{self, IconStyle, Overrides, RenderOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "rd-icon",
    about = "Draw the RD app icon: a gradient disc with RD lettering, saved as PNG"
)]
struct Args {
    /// Which icon to draw.
    #[clap(short, long, value_enum, default_value = "text")]
    style: IconStyle,

    /// Canvas size in pixels (512 for letters/text, 1024 for layered).
    #[clap(long, value_name = "PX")]
    size: Option<u32>,

    /// Gradient radius, or outer disc radius for the layered style.
    #[clap(long, value_name = "PX")]
    radius: Option<u32>,

    /// Outer color (CSS color format).
    #[clap(long, value_name = "COLOR")]
    start: Option<String>,

    /// Inner color (CSS color format).
    #[clap(long, value_name = "COLOR")]
    end: Option<String>,

    /// Preferred TrueType font, tried before the system fonts.
    #[clap(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Output PNG path. Missing directories are created.
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write an asset catalog Contents.json next to the PNG.
    #[clap(long)]
    contents_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = RenderOptions::resolve(
        args.style,
        Overrides {
            size: args.size,
            radius: args.radius,
            start: args.start,
            end: args.end,
            font: args.font,
            output: args.output,
            contents_json: args.contents_json,
        },
    )?;

    icon_gen::generate_icon(&options)?;
    Ok(())
}
