//! Party colors and entity rankings for the election results dashboard.

pub mod api;
pub mod chart;
pub mod color;
pub mod config;
pub mod hash;
pub mod palette;
pub mod ranking;

pub use color::{contrast_ratio, hsl_to_rgb, relative_luminance, Hsl, Rgb};
pub use config::PaletteConfig;
pub use hash::{hash_name, hue_for_name};
pub use palette::{color_for, simple_color_for, ColorAssigner, ColorScheme};
pub use ranking::{sort_by_name, sort_by_votes, RankError, Rankable};
