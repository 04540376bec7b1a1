use glam::Vec3;

/// Einheitswürfel, nur über seinen Mittelpunkt definiert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub pos: Vec3,
}

impl Block {
    pub const HALF: f32 = 0.5;

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }

    /// Höhe der Oberseite
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + Self::HALF
    }
}
