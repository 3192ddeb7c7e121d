pub mod assets;
pub mod canvas;
pub mod error;
pub mod input;
pub mod magick_canvas;
pub mod settings;
pub mod text;
pub mod theme;

pub use canvas::Canvas;
pub use error::{Result, ThemeError};
pub use input::RenderInput;
pub use magick_canvas::MagickCanvas;
pub use settings::Settings;
pub use theme::{BannerTheme, Position, Theme};
