use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use banner_theme::{BannerTheme, MagickCanvas, RenderInput, Settings, Theme};
use clap::Parser;
use log::info;

/// Render the banner theme onto an image
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON request with jobTitle, jobDescription and avatar
    #[arg(short, long)]
    input: PathBuf,

    /// Base image; a blank white canvas is used when omitted
    #[arg(short, long)]
    base: Option<PathBuf>,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 630)]
    height: u32,

    #[arg(short, long)]
    output: PathBuf,

    /// ImageMagick output format
    #[arg(short, long, default_value = "PNG")]
    format: String,

    /// Config file, defaults to ./config.yaml when present
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("Failed to load configuration")?;
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let input = RenderInput::from_json(&json)?;

    let cache_dir = settings.assets.cache_dir();
    let canvas = match &args.base {
        Some(base) => MagickCanvas::open(base, cache_dir)?,
        None => MagickCanvas::blank(args.width, args.height, "white", cache_dir)?,
    };
    let (width, height) = (canvas.width(), canvas.height());

    let theme = BannerTheme::new(settings.layout, settings.assets);
    if let Some(position) = theme.position() {
        info!("Applying {} theme, anchored {position}, to {width}x{height} canvas", theme.name());
    }
    let canvas = theme.apply(canvas, width, height, &input)?;

    let blob = canvas.encode(&args.format)?;
    fs::write(&args.output, blob)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
