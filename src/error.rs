use std::path::PathBuf;
use thiserror::Error;

/// Nicht fatal: wird geloggt, gerendert wird mit der Textur, die schon da ist.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
