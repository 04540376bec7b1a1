use std::path::Path;

use crate::error::TextureError;
use crate::render::TextureId;
use image::RgbaImage;
use log::error;

/// Bilddatei lesen und nach RGBA8 wandeln; braucht keine GPU.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, TextureError> {
    let img = image::open(path).map_err(|source| TextureError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Nicht fatal: Fehler loggen und mit Einheit 0 weiterzeichnen.
pub fn or_placeholder(loaded: Result<TextureId, TextureError>) -> TextureId {
    loaded.unwrap_or_else(|e| {
        error!("{}", e);
        TextureId::PLACEHOLDER
    })
}
