use crate::player::Player;
use glam::Vec3;

/// Schwerkraft anwenden und die vorläufige Position liefern (noch nicht übernommen).
///
/// Die vertikale Geschwindigkeit wird mit dt beschleunigt, aber ohne dt auf die
/// Position addiert; die horizontale Verschiebung ist bereits mit dt skaliert.
pub fn integrate(player: &mut Player, gravity: f32, dt: f32) -> Vec3 {
    player.vertical_velocity -= gravity * dt;
    player.position + player.velocity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gravity_accumulates_per_frame() {
        let mut player = Player::new(&Settings::default());
        let dt = 0.1;

        let p1 = integrate(&mut player, 0.5, dt);
        assert_abs_diff_eq!(player.vertical_velocity, -0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(p1.y, 3.0 - 0.05, epsilon = 1e-6);

        // Position wurde noch nicht übernommen
        assert_eq!(player.position.y, 3.0);

        let p2 = integrate(&mut player, 0.5, dt);
        assert_abs_diff_eq!(player.vertical_velocity, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(p2.y, 3.0 - 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_horizontal_displacement_added_as_is() {
        let mut player = Player::new(&Settings::default());
        player.horizontal_displacement = Vec3::new(0.25, 0.0, -0.5);

        let predicted = integrate(&mut player, 0.0, 1.0);
        assert_eq!(predicted, Vec3::new(0.25, 3.0, -0.5));
    }
}
