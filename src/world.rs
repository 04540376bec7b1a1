use crate::block::Block;

/// Statische Welt: feste, geordnete Liste von Blöcken.
pub struct World {
    blocks: Vec<Block>,
}

impl World {
    pub fn new() -> Self {
        // Plattform 5×5 bei y=0, um den Ursprung zentriert. Als "Plus" beschrieben,
        // gebaut wird aber das volle Quadrat: die Diagonalblöcke tragen den Spieler
        let mut blocks = Vec::with_capacity(25);
        for z in -2..=2 {
            for x in -2..=2 {
                blocks.push(Block::new(x as f32, 0.0, z as f32));
            }
        }

        Self::from_blocks(blocks)
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scene_is_flat_platform() {
        let world = World::new();
        assert_eq!(world.len(), 25);
        assert!(world.blocks().iter().all(|b| b.pos.y == 0.0));
        assert!(world.blocks().contains(&Block::new(0.0, 0.0, 0.0)));
        assert!(world.blocks().contains(&Block::new(-2.0, 0.0, 2.0)));
    }

    #[test]
    fn test_order_is_preserved() {
        let blocks = vec![Block::new(1.0, 0.0, 0.0), Block::new(0.0, 2.0, 0.0)];
        let world = World::from_blocks(blocks.clone());
        assert_eq!(world.blocks(), blocks.as_slice());
    }
}
