use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How sprite sheets are arranged on the composite sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Arrange {
    /// Sheets are laid out left to right on a single row.
    Horizontal,
    /// Sheets are stacked top to bottom in a single column.
    Vertical,
    /// Sheets are placed by a first-fit scan over an occupancy grid
    /// (tighter sheets at higher arrange cost).
    Optimal,
}

impl FromStr for Arrange {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            "optimal" | "o" => Ok(Self::Optimal),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Arrangement used when the generator builds.
    #[serde(default = "default_arrange")]
    pub arrange: Arrange,
    /// Pixels separating sheets on the horizontal axis.
    #[serde(default)]
    pub horizontal_offset: u32,
    /// Pixels separating sheets on the vertical axis.
    #[serde(default)]
    pub vertical_offset: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            arrange: default_arrange(),
            horizontal_offset: 0,
            vertical_offset: 0,
        }
    }
}

fn default_arrange() -> Arrange {
    Arrange::Horizontal
}

/// Builder for `GeneratorConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct GeneratorConfigBuilder {
    cfg: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: GeneratorConfig::default(),
        }
    }
    pub fn arrange(mut self, v: Arrange) -> Self {
        self.cfg.arrange = v;
        self
    }
    pub fn horizontal_offset(mut self, v: u32) -> Self {
        self.cfg.horizontal_offset = v;
        self
    }
    pub fn vertical_offset(mut self, v: u32) -> Self {
        self.cfg.vertical_offset = v;
        self
    }
    pub fn build(self) -> GeneratorConfig {
        self.cfg
    }
}

impl GeneratorConfig {
    /// Create a fluent builder for `GeneratorConfig`.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}
