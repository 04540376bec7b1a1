// src/camera.rs
use crate::block::Block;
use crate::config::{PITCH_LIMIT, ProjectionMode, Settings, ZOOM_MAX, ZOOM_MIN};
use crate::player::Player;
use glam::{Mat4, Vec3};

/// Forward- und Up-Vektor aus Yaw/Pitch (Grad).
pub fn orientation(yaw_deg: f32, pitch_deg: f32) -> (Vec3, Vec3) {
    let (sy, cy) = yaw_deg.to_radians().sin_cos();
    let (sp, cp) = pitch_deg.to_radians().sin_cos();

    let forward = Vec3::new(cy * cp, sp, sy * cp).normalize();
    // world_up × forward, zeigt bei Blick nach -Z nach -X
    let side = Vec3::Y.cross(forward).normalize();
    let up = forward.cross(side).normalize();

    (forward, up)
}

impl Player {
    pub fn update_vectors(&mut self) {
        let (forward, up) = orientation(self.yaw, self.pitch);
        self.forward = forward;
        self.up = up;
    }

    pub fn add_look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        // nicht über Kopf drehen
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn add_zoom(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub mode: ProjectionMode,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: settings.projection,
            fov_y_deg: settings.fixed_fov_deg,
            aspect: settings.fixed_aspect,
            z_near: settings.z_near,
            z_far: settings.z_far,
        }
    }

    pub fn view(&self, player: &Player) -> Mat4 {
        let eye = player.eye_pos();
        Mat4::look_at_rh(eye, eye + player.forward, player.up)
    }

    pub fn projection(&self, player: &Player, width: u32, height: u32) -> Mat4 {
        let (fov_deg, aspect) = match self.mode {
            ProjectionMode::Fixed => (self.fov_y_deg, self.aspect),
            ProjectionMode::Live => {
                let aspect = if width == 0 || height == 0 {
                    self.aspect
                } else {
                    width as f32 / height as f32
                };
                (player.zoom, aspect)
            }
        };

        // Right-handed, clip-space Z 0..1 (wgpu)
        Mat4::perspective_rh(fov_deg.to_radians(), aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self, player: &Player, width: u32, height: u32) -> Mat4 {
        self.projection(player, width, height) * self.view(player)
    }
}

/// projection · view · model für einen Block
#[inline]
pub fn block_transform(view_proj: Mat4, block: &Block) -> Mat4 {
    view_proj * Mat4::from_translation(block.pos)
}
