use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No sprite or sprite sheet with the class name '{0}'")]
    UnknownClassName(String),
    #[error("'{0}' is not a sprite sheet")]
    NotASpriteSheet(String),
    #[error("'{0}' is not a sprite")]
    NotASprite(String),
    #[error("Nothing to composite")]
    Empty,
}

pub type Result<T> = std::result::Result<T, SpriteError>;
