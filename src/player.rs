use crate::config::Settings;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct Player {
    /// Unterseite, Mitte der Hitbox
    pub position: Vec3,
    pub eye_offset: Vec3,

    pub forward: Vec3,
    pub up: Vec3,

    /// x/z-Verschiebung dieses Frames, schon mit dt skaliert; wird jeden Frame ersetzt.
    pub horizontal_displacement: Vec3,
    /// Echte Geschwindigkeit, von der Schwerkraft akkumuliert.
    pub vertical_velocity: f32,

    // Hitbox
    pub width: f32,
    pub depth: f32,
    pub height: f32,

    // Blickwinkel in Grad
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,

    pub grounded: bool,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        let mut player = Self {
            position: settings.spawn,
            eye_offset: settings.eye_offset,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            horizontal_displacement: Vec3::ZERO,
            vertical_velocity: 0.0,
            width: settings.player_width,
            depth: settings.player_depth,
            height: settings.player_height,
            yaw: settings.initial_yaw,
            pitch: settings.initial_pitch,
            zoom: settings.initial_zoom,
            grounded: false,
        };
        player.update_vectors();
        player
    }

    pub fn eye_pos(&self) -> Vec3 {
        self.position + self.eye_offset
    }

    /// Beide Anteile zusammen, so wie sie auf die Position addiert werden.
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.horizontal_displacement.x,
            self.vertical_velocity,
            self.horizontal_displacement.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_new_player_looks_down_negative_z() {
        let player = Player::new(&Settings::default());
        assert_abs_diff_eq!(player.forward.z, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(player.up.y, 1.0, epsilon = 1e-6);
        assert_eq!(player.position, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(player.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_velocity_merges_both_parts() {
        let mut player = Player::new(&Settings::default());
        player.horizontal_displacement = Vec3::new(0.1, 0.0, -0.2);
        player.vertical_velocity = -0.3;
        assert_eq!(player.velocity(), Vec3::new(0.1, -0.3, -0.2));
    }

    #[test]
    fn test_eye_pos_adds_offset() {
        let player = Player::new(&Settings::default());
        let eye = player.eye_pos();
        assert_eq!(eye.x, 0.0);
        assert_abs_diff_eq!(eye.y, 4.6, epsilon = 1e-6);
    }
}
