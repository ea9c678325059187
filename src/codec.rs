//! Plant-position bit codec used by the search layer.
//!
//! The search explores many states and needs cheap state equality and
//! hashing, so watered plants are tracked as a bitmask rather than a set.
//! [`PlantIndex`] fixes the bijection between plant cells and mask bits at
//! load time and never recomputes it mid-search.

use crate::world::{GridWorld, Position};
use std::collections::HashMap;

/// Fixed enumeration of a world's plant cells and their mask bits.
///
/// Plant cells are scanned in row-major order; each gets the next free bit
/// starting at 0. The ordering is deterministic, so two indices built from
/// equal worlds assign identical bits.
///
/// # Examples
///
/// ```
/// use gardener_rs::{GridWorld, PlantIndex};
///
/// let world = GridWorld::parse("2 2 5\n1 0\n0 1\n1 4\n").unwrap();
/// let index = PlantIndex::new(&world);
///
/// assert_eq!(index.plant_count(), 2);
/// assert_eq!(index.bit((0, 0)), Some(0));
/// assert_eq!(index.bit((1, 1)), Some(1));
/// assert_eq!(index.bit((0, 1)), None);
/// assert_eq!(index.full_mask(), 0b11);
/// ```
#[derive(Clone, Debug)]
pub struct PlantIndex {
    positions: Vec<Position>,
    bits: HashMap<Position, u8>,
    full_mask: u64,
}

impl PlantIndex {
    /// Builds the index by scanning the world's cells in row-major order.
    pub fn new(world: &GridWorld) -> Self {
        let positions: Vec<Position> = world.plant_cells().map(|(position, _)| position).collect();
        let bits = positions
            .iter()
            .enumerate()
            .map(|(bit, &position)| (position, bit as u8))
            .collect();
        // Shift instead of (1 << P) - 1 so a full 64-plant world stays in range.
        let full_mask = if positions.is_empty() {
            0
        } else {
            u64::MAX >> (64 - positions.len())
        };
        Self {
            positions,
            bits,
            full_mask,
        }
    }

    /// The mask bit assigned to a plant position, if any.
    pub fn bit(&self, position: Position) -> Option<u8> {
        self.bits.get(&position).copied()
    }

    /// The plant position owning a mask bit.
    pub fn position(&self, bit: u8) -> Option<Position> {
        self.positions.get(bit as usize).copied()
    }

    /// All plant positions in bit order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of plant cells in the world.
    pub fn plant_count(&self) -> usize {
        self.positions.len()
    }

    /// Mask with every plant bit set; the goal condition.
    pub fn full_mask(&self) -> u64 {
        self.full_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_bit_assignment() {
        let world = GridWorld::parse("2 3 4\n0 1 0\n2 0 1\n1 2\n2 6\n").unwrap();
        let index = PlantIndex::new(&world);
        assert_eq!(index.plant_count(), 3);
        assert_eq!(index.bit((0, 1)), Some(0));
        assert_eq!(index.bit((1, 0)), Some(1));
        assert_eq!(index.bit((1, 2)), Some(2));
        assert_eq!(index.position(1), Some((1, 0)));
        assert_eq!(index.position(3), None);
        assert_eq!(index.full_mask(), 0b111);
    }

    #[test]
    fn test_empty_world_has_zero_mask() {
        let world = GridWorld::parse("1 2 3\n0 0\n").unwrap();
        let index = PlantIndex::new(&world);
        assert_eq!(index.plant_count(), 0);
        assert_eq!(index.full_mask(), 0);
    }

    #[test]
    fn test_equal_worlds_assign_equal_bits() {
        let text = "2 2 5\n1 1\n0 1\n1 9\n";
        let a = PlantIndex::new(&GridWorld::parse(text).unwrap());
        let b = PlantIndex::new(&GridWorld::parse(text).unwrap());
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.full_mask(), b.full_mask());
    }
}
