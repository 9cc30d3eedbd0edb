//! Configuration section definitions.

mod build;
mod content;
mod languages;
mod render;

pub use build::{BuildSectionConfig, SlugConfig};
pub use content::ContentConfig;
pub use languages::LanguagesConfig;
pub use render::RenderConfig;
