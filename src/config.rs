use glam::Vec3;

/// Which horizontal test decides whether a block can catch the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    /// Four-quadrant "strictly beyond on both axes" test, width/depth used as raw offsets.
    #[default]
    Literal,
    /// Conventional footprint overlap (half extents against the unit block).
    /// Only reachable by setting `Settings::collision` in code; no flag selects it.
    #[allow(dead_code)]
    Overlap,
}

/// How the projection matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Fixed fov and aspect, ignores zoom and window size.
    #[default]
    Fixed,
    /// Uses the live zoom value and viewport aspect.
    /// Only reachable by setting `Settings::projection` in code; no flag selects it.
    #[allow(dead_code)]
    Live,
}

/// Alle Stellschrauben an einem Ort.
#[derive(Debug, Clone)]
pub struct Settings {
    // --- Fenster ---
    pub window_title: &'static str,
    pub window_width: u32,
    pub window_height: u32,
    pub texture_path: &'static str,

    // --- Physik ---
    /// Einheiten/s^2
    pub gravity: f32,
    /// pro Frame gesetzt, nicht dt-skaliert
    pub ascend_velocity: f32,
    /// Einheiten/s
    pub move_speed: f32,
    pub sprint_factor: f32,
    pub collision: CollisionMode,

    // --- Spieler ---
    pub spawn: Vec3,
    pub eye_offset: Vec3,
    pub player_width: f32,
    pub player_depth: f32,
    pub player_height: f32,

    // --- Kamera ---
    pub mouse_sensitivity: f32,
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    pub initial_zoom: f32,
    pub fixed_fov_deg: f32,
    pub fixed_aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub projection: ProjectionMode,
}

pub const PITCH_LIMIT: f32 = 89.0;
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 90.0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "Block Game",
            window_width: 800,
            window_height: 600,
            texture_path: "assets/block.png",

            gravity: 0.5,
            ascend_velocity: 0.05,
            move_speed: 2.0,
            sprint_factor: 2.0,
            collision: CollisionMode::Literal,

            spawn: Vec3::new(0.0, 3.0, 0.0),
            eye_offset: Vec3::new(0.0, 1.6, 0.0),
            player_width: 0.5,
            player_depth: 0.5,
            player_height: 1.8,

            mouse_sensitivity: 0.1,
            initial_yaw: -90.0,
            initial_pitch: 0.0,
            initial_zoom: 45.0,
            fixed_fov_deg: 45.0,
            fixed_aspect: 800.0 / 600.0,
            z_near: 0.1,
            z_far: 100.0,
            projection: ProjectionMode::Fixed,
        }
    }
}
