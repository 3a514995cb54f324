//! Core library for packing images into CSS sprite sheets.
//!
//! - Mappers: Horizontal (single row), Vertical (single column), Optimal (first-fit scan over an occupancy grid)
//! - Generator: `SpriteSheetGenerator` collects sheets and sprites, arranges the sheets and emits the composite image plus the stylesheet
//! - Data model is serde-serializable; projects save as JSON and reload with pixels re-read from disk.
//!
//! Quick example:
//! ```ignore
//! use css_sprite_core::prelude::*;
//! # fn main() -> css_sprite_core::Result<()> {
//! let cfg = GeneratorConfig::builder().arrange(Arrange::Optimal).build();
//! let mut generator = SpriteSheetGenerator::new(cfg);
//! generator.add_sheet_from_file("icons.png", 0, 0)?;
//! generator.add_sheet_from_file("buttons.png", 0, 0)?;
//! let mapping = generator.build();
//! println!("{}", mapping.stats().summary());
//! generator.save_image("sprites.png")?;
//! generator.save_css("sprites.css")?;
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod css;
pub mod error;
pub mod generator;
pub mod mapper;
pub mod model;

pub use config::*;
pub use css::*;
pub use error::*;
pub use generator::*;
pub use mapper::*;
pub use model::*;

/// Convenience prelude for common types and functions.
/// Importing `css_sprite_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{Arrange, GeneratorConfig, GeneratorConfigBuilder};
    pub use crate::css::{CssRule, stylesheet};
    pub use crate::generator::SpriteSheetGenerator;
    pub use crate::mapper::{Mapper, mapper_for};
    pub use crate::model::{
        Mapping, MappingStats, Placement, Rect, SheetId, Size, Sprite, SpriteSheet,
    };
}
