use std::fmt;

use log::debug;
use serde::Serialize;

use crate::canvas::{Align, Canvas, Rect, Rgba, TextStyle};
use crate::error::Result;
use crate::input::{Contact, RenderInput};
use crate::settings::{AssetPaths, Layout};
use crate::text::{truncate, wordwrap};

/// Side of a larger composition a theme anchors to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Left => f.write_str("left"),
        }
    }
}

/// A named layout strategy applied to a base image.
pub trait Theme {
    fn name(&self) -> &'static str;

    /// Draws onto `canvas`, which is `width` x `height` pixels, and hands it back.
    fn apply<C: Canvas>(&self, canvas: C, width: u32, height: u32, input: &RenderInput) -> Result<C>;

    fn supports_randomization(&self) -> bool {
        true
    }

    fn position(&self) -> Option<Position> {
        None
    }
}

pub fn panel_width(width: u32, layout: &Layout) -> i64 {
    i64::from(width) / layout.panel_divisor
}

pub fn panel_height(height: u32, uses_avatar: bool, layout: &Layout) -> i64 {
    if uses_avatar {
        (f64::from(height) * layout.avatar_panel_ratio).floor() as i64
    } else {
        i64::from(height)
    }
}

/// Far edge of the avatar band. Computed as `|floor(h * 1.6) - h|` and kept in
/// that form, which does not always agree with the panel height.
pub fn band_bottom(height: u32, layout: &Layout) -> i64 {
    let height = i64::from(height);
    ((height as f64 * layout.band_ratio).floor() as i64 - height).abs()
}

pub fn title_top(logo_height: u32, layout: &Layout) -> i64 {
    layout.padding * 3 + i64::from(logo_height) / 2
}

/// Top-left corner of the avatar, centered in the panel below the band.
pub fn avatar_origin(panel_width: i64, band_bottom: i64, layout: &Layout) -> (i64, i64) {
    let x = (panel_width - i64::from(layout.avatar_size)).div_euclid(2);
    (x, band_bottom + layout.avatar_gap)
}

/// Contact lines with their tops, in drawing order. Absent fields leave no gap.
pub fn contact_lines(contact: &Contact, name_top: i64, layout: &Layout) -> Vec<(String, i64)> {
    let mut top = name_top + i64::from(layout.name_size) + layout.avatar_gap;
    let skype = contact.skype().map(|s| format!("{}{s}", layout.skype_prefix));
    let mut lines = Vec::new();
    for line in [contact.email(), contact.phone(), skype]
        .into_iter()
        .flatten()
    {
        lines.push((line, top));
        top += i64::from(layout.contact_size) + layout.contact_spacing;
    }
    lines
}

/// Translucent panel down the left third with logo, job text and an optional
/// avatar card.
#[derive(Clone, Debug, Default)]
pub struct BannerTheme {
    pub layout: Layout,
    pub assets: AssetPaths,
}

impl BannerTheme {
    pub fn new(layout: Layout, assets: AssetPaths) -> Self {
        BannerTheme { layout, assets }
    }

    fn style(&self, bold: bool, size: u32, color: Rgba, align: Align) -> TextStyle {
        let font = if bold { &self.assets.bold_font } else { &self.assets.regular_font };
        TextStyle { font: font.clone(), size: f64::from(size), color, align }
    }
}

impl Theme for BannerTheme {
    fn name(&self) -> &'static str {
        "banner"
    }

    fn apply<C: Canvas>(&self, mut canvas: C, width: u32, height: u32, input: &RenderInput) -> Result<C> {
        let layout = &self.layout;
        let avatar = input.avatar_block();

        let rect_w = panel_width(width, layout);
        let rect_h = panel_height(height, avatar.is_some(), layout);
        debug!("Panel {rect_w}x{rect_h} on {width}x{height}, avatar={}", avatar.is_some());
        canvas.fill_rect(Rect::new(0, 0, rect_w, rect_h), layout.panel_color)?;

        let logo = canvas.load_image_info(&self.assets.logo.to_string_lossy())?;
        canvas.insert_image(&logo, layout.padding, layout.padding, None)?;

        let text_left = layout.padding;
        let title_y = title_top(logo.height, layout);
        if let Some(title) = input.job_title.as_deref() {
            let text = wordwrap(title, layout.title_wrap).into_text();
            let style = self.style(true, layout.title_size, layout.title_color, Align::Left);
            canvas.draw_text(&text, text_left, title_y, &style)?;
        }

        if let Some(description) = input.job_description.as_deref() {
            let short = truncate(description, layout.description_max_len);
            let text = wordwrap(&short, layout.description_wrap).into_text();
            let style = self.style(false, layout.description_size, layout.description_color, Align::Left);
            canvas.draw_text(&text, text_left, title_y - layout.description_lift, &style)?;
        }

        let Some(avatar) = avatar else {
            return Ok(canvas);
        };

        let band_y = band_bottom(height, layout);
        canvas.fill_rect(Rect::new(0, i64::from(height), rect_w, band_y), layout.band_color)?;

        let size = i64::from(layout.avatar_size);
        let (avatar_x, avatar_y) = avatar_origin(rect_w, band_y, layout);
        debug!("Avatar {} at {avatar_x},{avatar_y}", avatar.image);
        let image = canvas.load_image_info(avatar.image)?;
        canvas.insert_image(&image, avatar_x, avatar_y, Some((layout.avatar_size, layout.avatar_size)))?;
        canvas.stroke_rect(
            Rect::new(avatar_x, avatar_y, avatar_x + size, avatar_y + size),
            layout.avatar_border_width,
            layout.avatar_border_color,
        )?;

        let center_x = avatar_x + size / 2;
        let name_y = avatar_y + size + layout.avatar_gap;
        let style = self.style(true, layout.name_size, layout.avatar_text_color, Align::Center);
        canvas.draw_text(avatar.name, center_x, name_y, &style)?;

        let style = self.style(false, layout.contact_size, layout.avatar_text_color, Align::Center);
        for (line, top) in contact_lines(avatar.contact, name_y, layout) {
            canvas.draw_text(&line, center_x, top, &style)?;
        }

        Ok(canvas)
    }

    fn supports_randomization(&self) -> bool {
        false
    }

    fn position(&self) -> Option<Position> {
        Some(Position::Left)
    }
}
