use crate::block::Block;
use crate::config::CollisionMode;
use crate::player::Player;
use glam::Vec3;

/// Vier Quadranten: Hitbox (Breite/Tiefe als volle Offsets) liegt auf beiden Achsen
/// strikt jenseits des Blockmittelpunkts.
#[inline]
fn literal_hit(p: Vec3, width: f32, depth: f32, b: Vec3) -> bool {
    (p.x - width > b.x && p.z - depth > b.z)
        || (p.x + width < b.x && p.z - depth > b.z)
        || (p.x - width > b.x && p.z + depth < b.z)
        || (p.x + width < b.x && p.z + depth < b.z)
}

/// Übliche Überlappung der Grundflächen (halbe Ausdehnung gegen den Einheitsblock).
#[inline]
fn overlap_hit(p: Vec3, width: f32, depth: f32, b: Vec3) -> bool {
    let reach_x = width * 0.5 + Block::HALF;
    let reach_z = depth * 0.5 + Block::HALF;
    // Berühren zählt nicht
    (p.x - b.x).abs() < reach_x && (p.z - b.z).abs() < reach_z
}

pub fn footprint_hits(
    mode: CollisionMode,
    p: Vec3,
    width: f32,
    depth: f32,
    block: &Block,
) -> bool {
    match mode {
        CollisionMode::Literal => literal_hit(p, width, depth, block.pos),
        CollisionMode::Overlap => overlap_hit(p, width, depth, block.pos),
    }
}

/// Nur Y wird korrigiert. Alle Blöcke werden geprüft (kein early exit), der letzte
/// passende bestimmt die Höhe. Das Ergebnis wird als neue Position übernommen.
pub fn resolve(
    player: &mut Player,
    mut predicted: Vec3,
    blocks: &[Block],
    mode: CollisionMode,
) -> Vec3 {
    player.grounded = false;

    for block in blocks {
        if !footprint_hits(mode, predicted, player.width, player.depth, block) {
            continue;
        }
        if predicted.y < block.top() {
            predicted.y = block.top();
            player.vertical_velocity = 0.0;
            player.grounded = true;
        }
    }

    player.position = predicted;
    predicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::physics::integrate;
    use crate::world::World;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    const DT: f32 = 1.0 / 60.0;

    fn player_at(pos: Vec3) -> Player {
        let mut player = Player::new(&Settings::default());
        player.position = pos;
        player
    }

    #[rstest]
    #[case::directly_below(0.0, 0.0, false)]
    #[case::behind_left(-1.0, -1.0, true)]
    #[case::front_right(1.0, 1.0, true)]
    #[case::front_left(-1.0, 1.0, true)]
    #[case::behind_right(1.0, -1.0, true)]
    #[case::same_row(1.0, 0.0, false)]
    #[case::too_close_diagonal(0.4, 0.4, false)]
    fn test_literal_predicate(#[case] bx: f32, #[case] bz: f32, #[case] expected: bool) {
        let block = Block::new(bx, 0.0, bz);
        let hit = footprint_hits(CollisionMode::Literal, Vec3::ZERO, 0.5, 0.5, &block);
        assert_eq!(hit, expected);
    }

    #[rstest]
    #[case::directly_below(0.0, 0.0, true)]
    #[case::edge_overlap(0.7, -0.7, true)]
    #[case::touching_is_not_overlap(0.75, 0.0, false)]
    #[case::far_diagonal(-1.0, -1.0, false)]
    fn test_overlap_predicate(#[case] bx: f32, #[case] bz: f32, #[case] expected: bool) {
        let block = Block::new(bx, 0.0, bz);
        let hit = footprint_hits(CollisionMode::Overlap, Vec3::ZERO, 0.5, 0.5, &block);
        assert_eq!(hit, expected);
    }

    #[test]
    fn test_snaps_onto_block_top() {
        let mut player = player_at(Vec3::new(0.0, 0.6, 0.0));
        player.vertical_velocity = -0.3;
        let blocks = [Block::new(-1.0, 0.0, -1.0)];

        let predicted = Vec3::new(0.0, 0.3, 0.0);
        let pos = resolve(&mut player, predicted, &blocks, CollisionMode::Literal);
        assert_eq!(pos.y, 0.5);
        assert_eq!(player.position, pos);
        assert_eq!(player.vertical_velocity, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_above_top_stays_airborne() {
        let mut player = player_at(Vec3::new(0.0, 2.0, 0.0));
        player.vertical_velocity = -0.1;
        player.grounded = true;
        let blocks = [Block::new(-1.0, 0.0, -1.0)];

        let predicted = Vec3::new(0.0, 1.9, 0.0);
        let pos = resolve(&mut player, predicted, &blocks, CollisionMode::Literal);
        assert_eq!(pos.y, 1.9);
        assert_eq!(player.vertical_velocity, -0.1);
        assert!(!player.grounded);
    }

    #[test]
    fn test_lone_block_below_does_not_catch_in_literal_mode() {
        let blocks = [Block::new(0.0, 0.0, 0.0)];

        let mut player = player_at(Vec3::new(0.0, 0.4, 0.0));
        let predicted = Vec3::new(0.0, 0.3, 0.0);
        let pos = resolve(&mut player, predicted, &blocks, CollisionMode::Literal);
        assert_eq!(pos.y, 0.3);

        let mut player = player_at(Vec3::new(0.0, 0.4, 0.0));
        let predicted = Vec3::new(0.0, 0.3, 0.0);
        let pos = resolve(&mut player, predicted, &blocks, CollisionMode::Overlap);
        assert_eq!(pos.y, 0.5);
    }

    #[rstest]
    #[case::low_first(vec![Block::new(-1.0, 0.0, -1.0), Block::new(1.0, 1.0, 1.0)])]
    #[case::high_first(vec![Block::new(1.0, 1.0, 1.0), Block::new(-1.0, 0.0, -1.0)])]
    fn test_every_block_is_checked(#[case] blocks: Vec<Block>) {
        let mut player = player_at(Vec3::new(0.0, 0.2, 0.0));
        let predicted = Vec3::new(0.0, 0.1, 0.0);
        let pos = resolve(&mut player, predicted, &blocks, CollisionMode::Literal);
        assert_eq!(pos.y, 1.5);
        assert!(player.grounded);
    }

    #[test]
    fn test_falls_onto_reference_platform() {
        let world = World::new();
        let blocks = world.blocks();
        let mut player = player_at(Vec3::new(0.0, 3.0, 0.0));
        let gravity = Settings::default().gravity;

        let mut last_vy = 0.0;
        let mut landed_at = None;
        for frame in 0..600 {
            let predicted = integrate(&mut player, gravity, DT);
            resolve(&mut player, predicted, blocks, CollisionMode::Literal);

            if landed_at.is_none() {
                if player.grounded {
                    landed_at = Some(frame);
                } else {
                    // freier Fall: jeden Frame um gravity*dt schneller
                    let expected = last_vy - gravity * DT;
                    assert_abs_diff_eq!(player.vertical_velocity, expected, epsilon = 1e-5);
                    last_vy = player.vertical_velocity;
                }
            } else {
                assert!(player.grounded);
            }
        }

        assert!(landed_at.is_some());
        assert_eq!(player.position.y, 0.5);
        assert_eq!(player.vertical_velocity, 0.0);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.position.z, 0.0);
    }
}
