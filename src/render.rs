use crate::error::RenderError;
use glam::Mat4;

/// Handle auf eine hochgeladene Textur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

impl TextureId {
    /// 1×1 Textur, die der Renderer beim Start anlegt (Textureinheit 0).
    pub const PLACEHOLDER: TextureId = TextureId(0);
}

/// Schnittstelle zum Renderer: ein Einheitswürfel pro Aufruf, dann präsentieren.
pub trait CubeRenderer {
    /// `transform` ist schon projection · view · model.
    fn draw_unit_cube(&mut self, transform: Mat4, texture: TextureId);

    fn present(&mut self) -> Result<(), RenderError>;
}
