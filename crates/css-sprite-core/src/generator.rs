use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::compositing::blit_rgba;
use crate::config::GeneratorConfig;
use crate::css::{CssRule, stylesheet};
use crate::error::{Result, SpriteError};
use crate::mapper::mapper_for;
use crate::model::{Mapping, Rect, SheetId, Size, Sprite, SpriteSheet};

/// The main container for generating a sprite sheet. Arranges the background
/// images with the configured mapper, composites the final image and emits
/// the CSS rules. The model can be saved to disk for later modification or
/// reuse.
///
/// Class names of sheets and sprites share one namespace; inserting a taken
/// name appends `-2`, `-3`, ... until it is free, and the adjusted name is
/// returned to the caller.
pub struct SpriteSheetGenerator {
    config: GeneratorConfig,
    sheets: Vec<SpriteSheet>,
    sprites: Vec<Sprite>,
    images: HashMap<SheetId, RgbaImage>,
    next_id: u32,
    generated_names: u32,
}

impl Default for SpriteSheetGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl SpriteSheetGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            sheets: Vec::new(),
            sprites: Vec::new(),
            images: HashMap::new(),
            next_id: 0,
            generated_names: 0,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// Sheets in insertion order. Build arranges them in this order.
    pub fn sheets(&self) -> &[SpriteSheet] {
        &self.sheets
    }

    /// The flattened collection of all sprites across sheets.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Looks up a sheet by id.
    pub fn sheet(&self, id: SheetId) -> Option<&SpriteSheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    /// The decoded pixels backing a sheet.
    pub fn sheet_image(&self, id: SheetId) -> Option<&RgbaImage> {
        self.images.get(&id)
    }

    /// Returns the sheet with the given class name, if any.
    pub fn find_sheet(&self, class_name: &str) -> Option<&SpriteSheet> {
        self.sheets.iter().find(|s| s.class_name == class_name)
    }

    /// Returns the sprite with the given class name, if any.
    pub fn find_sprite(&self, class_name: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.class_name == class_name)
    }

    /// Adds a sheet backed by an image file at position (x, y). The class
    /// name is taken from the file name.
    pub fn add_sheet_from_file(
        &mut self,
        path: impl AsRef<Path>,
        x: u32,
        y: u32,
    ) -> Result<SheetId> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        let class_name = match path.file_name().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => self.generated_name(),
        };
        Ok(self.insert_sheet(class_name, Some(path.to_path_buf()), image, x, y))
    }

    /// Adds a sheet backed by an in-memory image at position (x, y), under a
    /// generated `cssg-` class name.
    pub fn add_sheet_from_image(&mut self, image: RgbaImage, x: u32, y: u32) -> SheetId {
        let class_name = self.generated_name();
        self.insert_sheet(class_name, None, image, x, y)
    }

    /// Removes the sheet with the given class name. Its sprites are removed
    /// with it and their class names become free again.
    pub fn remove_sheet(&mut self, class_name: &str) -> Result<()> {
        match self.sheets.iter().position(|s| s.class_name == class_name) {
            Some(pos) => {
                let sheet = self.sheets.remove(pos);
                self.images.remove(&sheet.id);
                self.sprites.retain(|sp| sp.sheet != sheet.id);
                Ok(())
            }
            None if self.sprites.iter().any(|s| s.class_name == class_name) => {
                Err(SpriteError::NotASpriteSheet(class_name.to_string()))
            }
            None => Err(SpriteError::UnknownClassName(class_name.to_string())),
        }
    }

    /// Adds a sprite covering `bounds` (absolute coordinates) to the first
    /// sheet that fully contains it. Returns the registered class name,
    /// adjusted if the requested one was taken.
    pub fn add_sprite(&mut self, class_name: impl Into<String>, bounds: Rect) -> Result<String> {
        let parent = self
            .sheets
            .iter()
            .find(|s| s.bounds().contains(&bounds))
            .map(|s| (s.id, s.x, s.y));
        match parent {
            Some((id, px, py)) => {
                let name = self.uniquify(class_name.into());
                self.sprites.push(Sprite {
                    class_name: name.clone(),
                    sheet: id,
                    x: bounds.x - px,
                    y: bounds.y - py,
                    width: bounds.w,
                    height: bounds.h,
                });
                Ok(name)
            }
            None => Err(SpriteError::InvalidInput(
                "the sprite is not fully enclosed by any sprite sheet".into(),
            )),
        }
    }

    /// Adds a sprite to a specific sheet. Coordinates are absolute and must
    /// fall inside the sheet's bounds. Returns the registered class name.
    pub fn add_sprite_in(
        &mut self,
        sheet: SheetId,
        class_name: impl Into<String>,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<String> {
        let bounds = Rect::new(x, y, width, height);
        let parent = match self.sheet(sheet) {
            Some(s) => s,
            None => {
                return Err(SpriteError::InvalidInput(format!(
                    "no sprite sheet with id {}",
                    sheet.0
                )));
            }
        };
        if !parent.bounds().contains(&bounds) {
            return Err(SpriteError::InvalidInput(format!(
                "sprite bounds {}x{} at ({}, {}) fall outside sheet '{}'",
                width, height, x, y, parent.class_name
            )));
        }
        let (px, py) = (parent.x, parent.y);
        let name = self.uniquify(class_name.into());
        self.sprites.push(Sprite {
            class_name: name.clone(),
            sheet,
            x: x - px,
            y: y - py,
            width,
            height,
        });
        Ok(name)
    }

    /// Removes the sprite with the given class name.
    pub fn remove_sprite(&mut self, class_name: &str) -> Result<()> {
        match self.sprites.iter().position(|s| s.class_name == class_name) {
            Some(pos) => {
                self.sprites.remove(pos);
                Ok(())
            }
            None if self.sheets.iter().any(|s| s.class_name == class_name) => {
                Err(SpriteError::NotASprite(class_name.to_string()))
            }
            None => Err(SpriteError::UnknownClassName(class_name.to_string())),
        }
    }

    /// Arranges the sheets and moves them to their new positions.
    ///
    /// Each sheet's image size is inflated by the configured offsets before
    /// mapping, then the placements are copied back onto the sheets. The
    /// returned mapping covers the inflated sizes. An empty generator builds
    /// an empty mapping.
    #[instrument(skip_all)]
    pub fn build(&mut self) -> Mapping {
        let items: Vec<Size> = self
            .sheets
            .iter()
            .map(|s| Size {
                w: s.width + self.config.horizontal_offset,
                h: s.height + self.config.vertical_offset,
            })
            .collect();
        let mapper = mapper_for(self.config.arrange);
        let mapping = mapper.pack(&items);
        for placement in &mapping.placements {
            let sheet = &mut self.sheets[placement.index];
            sheet.x = placement.rect.x;
            sheet.y = placement.rect.y;
        }
        mapping
    }

    /// Composites every sheet at its current position onto one RGBA canvas
    /// sized to the tight bounds of the images (offsets excluded).
    pub fn flattened_image(&self) -> Result<RgbaImage> {
        let mut width = 0u32;
        let mut height = 0u32;
        for sheet in &self.sheets {
            width = width.max(sheet.x + sheet.width);
            height = height.max(sheet.y + sheet.height);
        }
        if width == 0 || height == 0 {
            return Err(SpriteError::Empty);
        }
        let mut canvas = RgbaImage::new(width, height);
        for sheet in &self.sheets {
            if let Some(image) = self.images.get(&sheet.id) {
                blit_rgba(image, &mut canvas, sheet.x, sheet.y);
            }
        }
        Ok(canvas)
    }

    /// Writes the composite image as PNG, whatever the file extension says.
    pub fn save_image(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.flattened_image()?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// The stylesheet for the current layout: one rule per sprite, in sheet
    /// order then sprite insertion order. Positions are absolute
    /// (sheet position plus sprite offset). No sprites give an empty string.
    pub fn css(&self) -> String {
        let mut rules = Vec::new();
        for sheet in &self.sheets {
            for sprite in self.sprites.iter().filter(|s| s.sheet == sheet.id) {
                let mut rule = CssRule::new();
                rule.selectors.push(sprite.class_name.clone());
                rule.declarations.push((
                    "background-position".into(),
                    format!("{}px {}px", sheet.x + sprite.x, sheet.y + sprite.y),
                ));
                rule.declarations
                    .push(("width".into(), format!("{}px", sprite.width)));
                rule.declarations
                    .push(("height".into(), format!("{}px", sprite.height)));
                rules.push(rule);
            }
        }
        stylesheet(&rules)
    }

    /// Writes the stylesheet to disk.
    pub fn save_css(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.css())?;
        Ok(())
    }

    /// Serializes the sheet/sprite model as pretty JSON. Pixel data is not
    /// embedded; sheets remember their source path and are re-opened on load.
    pub fn save_project(&self, path: impl AsRef<Path>) -> Result<()> {
        let sheets = self
            .sheets
            .iter()
            .map(|sheet| ProjectSheet {
                class_name: sheet.class_name.clone(),
                image_file: sheet.image_file.clone(),
                x: sheet.x,
                y: sheet.y,
                width: sheet.width,
                height: sheet.height,
                sprites: self
                    .sprites
                    .iter()
                    .filter(|s| s.sheet == sheet.id)
                    .map(|s| ProjectSprite {
                        class_name: s.class_name.clone(),
                        x: s.x,
                        y: s.y,
                        width: s.width,
                        height: s.height,
                    })
                    .collect(),
            })
            .collect();
        let project = ProjectFile {
            config: self.config.clone(),
            sheets,
        };
        fs::write(path, serde_json::to_string_pretty(&project)?)?;
        Ok(())
    }

    /// Loads a project saved with [`save_project`](Self::save_project).
    ///
    /// Each sheet's image file is re-opened to restore pixel data; sheets
    /// saved without one get a 1x1 transparent placeholder. Dimensions are
    /// re-derived from the decoded image, and a mismatch against the stored
    /// values is logged and the image trusted.
    pub fn load_project(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let project: ProjectFile = serde_json::from_str(&text)?;
        let mut generator = SpriteSheetGenerator::new(project.config);
        for sheet in project.sheets {
            let image = match &sheet.image_file {
                Some(file) => image::open(file)?.to_rgba8(),
                None => RgbaImage::new(1, 1),
            };
            let (width, height) = image.dimensions();
            if (width, height) != (sheet.width, sheet.height) {
                warn!(
                    class_name = %sheet.class_name,
                    stored_width = sheet.width,
                    stored_height = sheet.height,
                    width,
                    height,
                    "image dimensions changed since the project was saved"
                );
            }
            let id = SheetId(generator.next_id);
            generator.next_id += 1;
            generator.sheets.push(SpriteSheet {
                id,
                class_name: sheet.class_name,
                image_file: sheet.image_file,
                x: sheet.x,
                y: sheet.y,
                width,
                height,
            });
            generator.images.insert(id, image);
            for sprite in sheet.sprites {
                generator.sprites.push(Sprite {
                    class_name: sprite.class_name,
                    sheet: id,
                    x: sprite.x,
                    y: sprite.y,
                    width: sprite.width,
                    height: sprite.height,
                });
            }
        }
        Ok(generator)
    }

    fn insert_sheet(
        &mut self,
        class_name: String,
        image_file: Option<PathBuf>,
        image: RgbaImage,
        x: u32,
        y: u32,
    ) -> SheetId {
        let (width, height) = image.dimensions();
        let class_name = self.uniquify(class_name);
        let id = SheetId(self.next_id);
        self.next_id += 1;
        self.sheets.push(SpriteSheet {
            id,
            class_name,
            image_file,
            x,
            y,
            width,
            height,
        });
        self.images.insert(id, image);
        id
    }

    fn generated_name(&mut self) -> String {
        self.generated_names += 1;
        format!("cssg-{}", self.generated_names)
    }

    fn is_class_name_taken(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.class_name == name)
            || self.sprites.iter().any(|s| s.class_name == name)
    }

    fn uniquify(&self, name: String) -> String {
        if !self.is_class_name_taken(&name) {
            return name;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}", name, n);
            if !self.is_class_name_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ProjectSprite {
    class_name: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Serialize, Deserialize)]
struct ProjectSheet {
    class_name: String,
    image_file: Option<PathBuf>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    sprites: Vec<ProjectSprite>,
}

#[derive(Serialize, Deserialize)]
struct ProjectFile {
    config: GeneratorConfig,
    sheets: Vec<ProjectSheet>,
}
