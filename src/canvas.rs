use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Rgba { r, g, b, a }
    }

    /// ImageMagick color string, e.g. `rgba(27, 179, 219, 0.8)`
    pub fn to_magick(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Text is always top-aligned: `y` names the top of the first line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: PathBuf,
    pub size: f64,
    pub color: Rgba,
    pub align: Align,
}

/// Axis-aligned rectangle given by two opposite corners, in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    pub fn normalized(&self) -> Self {
        Rect {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }
}

/// A decodable image on local disk together with its natural size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Drawing surface a theme renders onto.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()>;

    fn stroke_rect(&mut self, rect: Rect, stroke_width: f64, color: Rgba) -> Result<()>;

    /// Composites `image` with its top-left corner at (`x`, `y`), resized to
    /// `size` first when one is given.
    fn insert_image(&mut self, image: &ImageInfo, x: i64, y: i64, size: Option<(u32, u32)>) -> Result<()>;

    fn draw_text(&mut self, text: &str, x: i64, y: i64, style: &TextStyle) -> Result<()>;

    /// Resolves a path or URL to a local image, failing with `AssetNotFound`.
    fn load_image_info(&mut self, reference: &str) -> Result<ImageInfo>;
}

#[cfg(test)]
pub mod recording {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ThemeError;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawOp {
        Fill { rect: Rect, color: Rgba },
        Stroke { rect: Rect, width: f64, color: Rgba },
        Insert { path: PathBuf, x: i64, y: i64, size: Option<(u32, u32)> },
        Text { text: String, x: i64, y: i64, style: TextStyle },
    }

    /// Records operations instead of rasterizing them.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub ops: Vec<DrawOp>,
        images: HashMap<String, (u32, u32)>,
    }

    impl RecordingCanvas {
        pub fn with_image(mut self, reference: &str, width: u32, height: u32) -> Self {
            self.images.insert(reference.to_string(), (width, height));
            self
        }

        pub fn texts(&self) -> Vec<(&str, i64, i64)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
            self.ops.push(DrawOp::Fill { rect, color });
            Ok(())
        }

        fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba) -> Result<()> {
            self.ops.push(DrawOp::Stroke { rect, width, color });
            Ok(())
        }

        fn insert_image(&mut self, image: &ImageInfo, x: i64, y: i64, size: Option<(u32, u32)>) -> Result<()> {
            self.ops.push(DrawOp::Insert { path: image.path.clone(), x, y, size });
            Ok(())
        }

        fn draw_text(&mut self, text: &str, x: i64, y: i64, style: &TextStyle) -> Result<()> {
            self.ops.push(DrawOp::Text { text: text.to_string(), x, y, style: style.clone() });
            Ok(())
        }

        fn load_image_info(&mut self, reference: &str) -> Result<ImageInfo> {
            let (width, height) = self
                .images
                .get(reference)
                .copied()
                .ok_or_else(|| ThemeError::AssetNotFound(reference.to_string()))?;
            Ok(ImageInfo { path: PathBuf::from(reference), width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalizes_swapped_corners() {
        let rect = Rect::new(320, 1000, 0, 600).normalized();
        assert_eq!(rect, Rect::new(0, 600, 320, 1000));
    }

    #[test]
    fn magick_color_string() {
        assert_eq!(Rgba::rgba(27, 179, 219, 0.8).to_magick(), "rgba(27, 179, 219, 0.8)");
        assert_eq!(Rgba::rgb(43, 57, 132).to_magick(), "rgba(43, 57, 132, 1)");
    }
}
