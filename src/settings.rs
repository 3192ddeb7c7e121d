use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::canvas::Rgba;
use crate::text::{DEFAULT_TRUNCATE_LENGTH, DEFAULT_WRAP_WIDTH};

pub const NAVY: Rgba = Rgba::rgb(43, 57, 132);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

/// Pixel offsets, sizes and colors of the banner layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Layout {
    pub padding: i64,
    /// The panel covers `width / panel_divisor` pixels.
    pub panel_divisor: i64,
    pub panel_color: Rgba,
    /// Share of the height the panel keeps when an avatar is shown.
    pub avatar_panel_ratio: f64,
    pub band_ratio: f64,
    pub band_color: Rgba,

    pub title_size: u32,
    pub title_color: Rgba,
    pub title_wrap: usize,
    /// Description is drawn this many pixels above the title top.
    pub description_lift: i64,
    pub description_size: u32,
    pub description_color: Rgba,
    pub description_wrap: usize,
    pub description_max_len: usize,

    pub avatar_size: u32,
    pub avatar_gap: i64,
    pub avatar_border_width: f64,
    pub avatar_border_color: Rgba,
    pub name_size: u32,
    pub contact_size: u32,
    pub contact_spacing: i64,
    pub avatar_text_color: Rgba,
    pub skype_prefix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            padding: 30,
            panel_divisor: 3,
            panel_color: Rgba::rgba(255, 255, 255, 0.8),
            avatar_panel_ratio: 0.6,
            band_ratio: 1.6,
            band_color: Rgba::rgba(27, 179, 219, 0.8),

            title_size: 24,
            title_color: NAVY,
            title_wrap: 25,
            description_lift: 10,
            description_size: 16,
            description_color: BLACK,
            description_wrap: DEFAULT_WRAP_WIDTH,
            description_max_len: DEFAULT_TRUNCATE_LENGTH,

            avatar_size: 120,
            avatar_gap: 20,
            avatar_border_width: 2.0,
            avatar_border_color: NAVY,
            name_size: 20,
            contact_size: 18,
            contact_spacing: 5,
            avatar_text_color: WHITE,
            skype_prefix: "Skype: ".to_string(),
        }
    }
}

/// Font and image files the theme reads at render time.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub bold_font: PathBuf,
    pub regular_font: PathBuf,
    pub logo: PathBuf,
    pub cache_dir: Option<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths {
            bold_font: PathBuf::from("fonts/SourceSansPro-Bold.otf"),
            regular_font: PathBuf::from("fonts/SourceSansPro-Regular.otf"),
            logo: PathBuf::from("images/hd-horizontal-watermark-300w.png"),
            cache_dir: None,
        }
    }
}

impl AssetPaths {
    /// Where downloaded avatars are kept.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("banner-theme")))
            .unwrap_or_else(|| std::env::temp_dir().join("banner-theme"))
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub layout: Layout,
    pub assets: AssetPaths,
}

impl Settings {
    /// Loads `config.yaml` (or `path`) with `THEME_` environment overrides on top,
    /// e.g. `THEME_LAYOUT__PADDING=40`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config.yaml").required(false),
        };
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("THEME")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.layout.panel_divisor <= 0 {
            return Err(ConfigError::Message(format!(
                "layout.panel_divisor must be positive, got {}",
                self.layout.panel_divisor
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_banner_layout() {
        let layout = Layout::default();
        assert_eq!(layout.padding, 30);
        assert_eq!(layout.avatar_size, 120);
        assert_eq!(
            (layout.title_size, layout.description_size, layout.name_size, layout.contact_size),
            (24, 16, 20, 18)
        );
        assert_eq!(layout.title_color, NAVY);
    }

    #[test]
    fn file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.yaml");
        std::fs::write(
            &path,
            "layout:\n  padding: 40\n  band_color: { r: 1, g: 2, b: 3, a: 0.5 }\nassets:\n  logo: art/logo.png\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.layout.padding, 40);
        assert_eq!(settings.layout.band_color, Rgba::rgba(1, 2, 3, 0.5));
        assert_eq!(settings.layout.avatar_size, 120);
        assert_eq!(settings.assets.logo, PathBuf::from("art/logo.png"));
        assert_eq!(settings.assets.bold_font, AssetPaths::default().bold_font);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.yaml"))).is_err());
    }

    #[test]
    fn rejects_non_positive_panel_divisor() {
        let dir = tempfile::tempdir().unwrap();
        for divisor in ["0", "-3"] {
            let path = dir.path().join("theme.yaml");
            std::fs::write(&path, format!("layout:\n  panel_divisor: {divisor}\n")).unwrap();
            let err = Settings::load(Some(&path)).unwrap_err();
            assert!(err.to_string().contains("panel_divisor"));
        }
    }

    #[test]
    fn explicit_cache_dir_wins() {
        let assets = AssetPaths { cache_dir: Some(PathBuf::from("/tmp/x")), ..AssetPaths::default() };
        assert_eq!(assets.cache_dir(), PathBuf::from("/tmp/x"));
    }
}
