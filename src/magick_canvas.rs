use std::path::{Path, PathBuf};
use std::sync::Once;

use log::debug;
use magick_rust::{
    magick_wand_genesis,
    AlignType,
    CompositeOperator,
    DrawingWand,
    FilterType,
    MagickWand,
    PixelWand,
};

use crate::assets::get_image_info;
use crate::canvas::{Align, Canvas, ImageInfo, Rect, Rgba, TextStyle};
use crate::error::{Result, ThemeError};

static START: Once = Once::new();

pub fn init() {
    START.call_once(magick_wand_genesis);
}

pub(crate) fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| ThemeError::AssetNotFound(path.display().to_string()))
}

/// Reads an image from disk, mapping any failure to `AssetNotFound`.
pub(crate) fn read_wand(path: &Path) -> Result<MagickWand> {
    init();
    let wand = MagickWand::new();
    wand.read_image(path_str(path)?)
        .map_err(|e| ThemeError::AssetNotFound(format!("{}: {e}", path.display())))?;
    Ok(wand)
}

fn solid(width: usize, height: usize, color: &str) -> Result<MagickWand> {
    let mut pixel = PixelWand::new();
    pixel.set_color(color)?;

    let wand = MagickWand::new();
    wand.new_image(width, height, &pixel)?;
    Ok(wand)
}

/// ImageMagick-backed canvas.
pub struct MagickCanvas {
    wand: MagickWand,
    cache_dir: PathBuf,
}

impl MagickCanvas {
    pub fn open(path: &Path, cache_dir: PathBuf) -> Result<Self> {
        Ok(MagickCanvas { wand: read_wand(path)?, cache_dir })
    }

    pub fn blank(width: u32, height: u32, background_color: &str, cache_dir: PathBuf) -> Result<Self> {
        init();
        let wand = solid(width as usize, height as usize, background_color)?;
        Ok(MagickCanvas { wand, cache_dir })
    }

    pub fn width(&self) -> u32 {
        self.wand.get_image_width() as u32
    }

    pub fn height(&self) -> u32 {
        self.wand.get_image_height() as u32
    }

    /// Encodes the canvas, e.g. as `PNG` or `JPEG`.
    pub fn encode(&self, format: &str) -> Result<Vec<u8>> {
        Ok(self.wand.write_image_blob(format)?)
    }

    fn composite(&mut self, overlay: &MagickWand, x: i64, y: i64) -> Result<()> {
        self.wand
            .compose_images(overlay, CompositeOperator::Over, true, x as isize, y as isize)?;
        Ok(())
    }
}

impl Canvas for MagickCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        // Corners are inclusive, like a drawn rectangle primitive
        let rect = rect.normalized();
        let width = (rect.x2 - rect.x1 + 1) as usize;
        let height = (rect.y2 - rect.y1 + 1) as usize;
        let overlay = solid(width, height, &color.to_magick())?;
        self.composite(&overlay, rect.x1, rect.y1)
    }

    fn stroke_rect(&mut self, rect: Rect, stroke_width: f64, color: Rgba) -> Result<()> {
        let rect = rect.normalized();
        let total = stroke_width.round().max(1.0) as i64;
        let inner = total / 2;
        let outer = total - inner - 1;
        let Rect { x1, y1, x2, y2 } = rect;
        for band in [
            Rect::new(x1 - inner, y1 - inner, x2 + inner, y1 + outer),
            Rect::new(x1 - inner, y2 - outer, x2 + inner, y2 + inner),
            Rect::new(x1 - inner, y1 - inner, x1 + outer, y2 + inner),
            Rect::new(x2 - outer, y1 - inner, x2 + inner, y2 + inner),
        ] {
            self.fill_rect(band, color)?;
        }
        Ok(())
    }

    fn insert_image(&mut self, image: &ImageInfo, x: i64, y: i64, size: Option<(u32, u32)>) -> Result<()> {
        let overlay = read_wand(&image.path)?;
        if let Some((width, height)) = size {
            overlay.resize_image(width as usize, height as usize, FilterType::Lanczos)?;
        }
        debug!("Inserting {} at {x},{y}", image.path.display());
        self.composite(&overlay, x, y)
    }

    fn draw_text(&mut self, text: &str, x: i64, y: i64, style: &TextStyle) -> Result<()> {
        if !style.font.is_file() {
            return Err(ThemeError::AssetNotFound(style.font.display().to_string()));
        }

        let mut fill = PixelWand::new();
        fill.set_color(&style.color.to_magick())?;

        let mut foreground = DrawingWand::new();
        foreground.set_fill_color(&fill);
        foreground.set_font(path_str(&style.font)?)?;
        foreground.set_font_size(style.size);
        foreground.set_text_alignment(match style.align {
            Align::Left => AlignType::Left,
            Align::Center => AlignType::Center,
        });
        // Annotations are anchored at the baseline; shift down one em so `y` is the top
        foreground.draw_annotation(x as f64, y as f64 + style.size, text)?;
        self.wand.draw_image(&foreground)?;
        Ok(())
    }

    fn load_image_info(&mut self, reference: &str) -> Result<ImageInfo> {
        get_image_info(reference, &self.cache_dir)
    }
}
