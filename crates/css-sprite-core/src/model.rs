use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
}

/// Width/height of an item to arrange. Zero-area sizes are allowed; they
/// occupy no space and never widen the sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// A placed item within a mapping.
///
/// `index` refers back into the slice the mapper was given; callers use it
/// to copy positions onto their own records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    /// Placed rectangle. Width/height equal the input item's size.
    pub rect: Rect,
}

/// The result of arranging items: placements in placement order plus the
/// tight bounding box over everything placed so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mapping {
    pub placements: Vec<Placement>,
    /// Bounding-box width; never decreases as placements are added.
    pub width: u32,
    /// Bounding-box height; never decreases as placements are added.
    pub height: u32,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a placement and widens the bounding box to cover it.
    pub fn push(&mut self, placement: Placement) {
        self.width = self.width.max(placement.rect.x + placement.rect.w);
        self.height = self.height.max(placement.rect.y + placement.rect.h);
        self.placements.push(placement);
    }

    /// Bounding-box area in pixels. Zero for an empty mapping.
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Computes packing statistics for this mapping.
    pub fn stats(&self) -> MappingStats {
        let used_area: u64 = self
            .placements
            .iter()
            .map(|p| (p.rect.w as u64) * (p.rect.h as u64))
            .sum();
        let sheet_area = self.area();
        let occupancy = if sheet_area > 0 {
            used_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        MappingStats {
            items: self.placements.len(),
            width: self.width,
            height: self.height,
            sheet_area,
            used_area,
            occupancy,
        }
    }
}

/// Statistics about mapping efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MappingStats {
    /// Number of items placed.
    pub items: usize,
    /// Sheet bounding-box dimensions.
    pub width: u32,
    pub height: u32,
    /// Bounding-box area (width * height).
    pub sheet_area: u64,
    /// Total area covered by placed items.
    pub used_area: u64,
    /// used_area / sheet_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl MappingStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Items: {}, Sheet: {}x{}, Occupancy: {:.2}%, Sheet Area: {} px², Used Area: {} px²",
            self.items,
            self.width,
            self.height,
            self.occupancy * 100.0,
            self.sheet_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.sheet_area.saturating_sub(self.used_area)
    }
}

/// Stable identifier of a sprite sheet within one generator. Never reused,
/// not meaningful across generators or saved projects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SheetId(pub u32);

/// A background image to be arranged into the composite sheet, plus its
/// current position. `width`/`height` are the image's pixel dimensions;
/// `x`/`y` are assigned when the generator builds.
///
/// Pixel data is kept by the generator, keyed by `id`, so the record itself
/// serializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub id: SheetId,
    /// CSS class representing this sheet. Unique across sheets and sprites.
    pub class_name: String,
    /// Path the image was loaded from, if any.
    pub image_file: Option<PathBuf>,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    /// The image-sized rectangle at the sheet's current position.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A named sub-rectangle of a sprite sheet. Coordinates are relative to the
/// parent sheet's origin; the parent is referenced by id and resolved
/// through the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    /// CSS class representing this sprite. Unique across sheets and sprites.
    pub class_name: String,
    pub sheet: SheetId,
    pub x: u32,
    pub y: u32,
    /// Width of the sprite. Value of the CSS width property.
    pub width: u32,
    /// Height of the sprite. Value of the CSS height property.
    pub height: u32,
}
