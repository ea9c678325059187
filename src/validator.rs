//! # Plan Validation
//!
//! Replays a literal action plan against the world rules. Validation is a
//! single pass, so watered plants are tracked in a plain visited set; the
//! bitmask codec is only needed by the search layer, which revisits states.
//!
//! ## Basic Usage
//!
//! ```
//! use gardener_rs::{GridWorld, PlanValidator};
//!
//! let world = GridWorld::parse("2 2 5\n0 1\n-1 0\n2 5\n").unwrap();
//! let validator = PlanValidator::new(&world);
//!
//! assert!(validator.validate_str("RW"));
//! assert!(!validator.validate_str("DW")); // Down walks into the obstacle
//! ```

use crate::action::{Action, Plan};
use crate::world::{Cell, GridWorld, Position};
use log::debug;
use std::collections::HashSet;
use thiserror::Error;

/// The first rule a plan breaks, with enough context to explain it.
///
/// Violations are diagnostics for a normal negative result, not faults:
/// [`PlanValidator::validate`] collapses them to `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanViolation {
    /// A symbol outside the `{U, D, L, R, W}` alphabet.
    #[error("unknown action symbol '{0}'")]
    UnknownSymbol(char),

    /// The gardener left the grid.
    #[error("position {position:?} is outside the grid after step {time}")]
    OutOfBounds { position: Position, time: u32 },

    /// The gardener stepped onto an obstacle cell.
    #[error("moved into the obstacle at {position:?} after step {time}")]
    IntoObstacle { position: Position, time: u32 },

    /// Watering attempted on a cell without a plant.
    #[error("no plant to water at {position:?}")]
    NotAPlant { position: Position },

    /// The tank holds less water than the plant needs.
    #[error("not enough water at {position:?}: have {available}, need {required}")]
    InsufficientWater {
        position: Position,
        available: u32,
        required: u32,
    },

    /// Watering attempted after the plant's deadline passed.
    #[error("deadline missed at {position:?}: time {time} > deadline {deadline}")]
    DeadlineMissed {
        position: Position,
        time: u32,
        deadline: u32,
    },

    /// The plant was already watered earlier in the plan.
    #[error("plant at {position:?} already watered")]
    AlreadyWatered { position: Position },

    /// The plan finished with this plant still dry.
    #[error("plant at {position:?} never watered")]
    UnwateredPlant { position: Position },
}

/// Validates literal action plans against a world.
///
/// Holds only a shared borrow; the world is never mutated, so validation is
/// a pure function of `(world, plan)` and can run any number of times.
pub struct PlanValidator<'a> {
    world: &'a GridWorld,
}

impl<'a> PlanValidator<'a> {
    pub fn new(world: &'a GridWorld) -> Self {
        Self { world }
    }

    /// Checks a plan, reporting the first rule it breaks.
    ///
    /// The replay starts at the home cell with a full tank at time 0. Each
    /// action advances time by one; after every action the position must be
    /// on the grid and off any obstacle, and arriving at the home cell
    /// refills the tank (watering while standing at home refills too).
    /// After the last action every plant cell must have been watered.
    pub fn check(&self, plan: &Plan) -> std::result::Result<(), PlanViolation> {
        let (mut row, mut col) = GridWorld::HOME;
        let mut water = self.world.tank_capacity();
        let mut time: u32 = 0;
        let mut watered: HashSet<Position> = HashSet::new();

        for &action in plan {
            match action {
                Action::Water => {
                    let position = (row, col);
                    // The post-action check already guarantees an on-grid,
                    // obstacle-free position here; re-checked to keep the
                    // watering rules self-contained.
                    if !self.world.in_bounds(position) {
                        return Err(PlanViolation::OutOfBounds { position, time });
                    }
                    let plant = match self.world.cell(position) {
                        Some(Cell::Obstacle) => {
                            return Err(PlanViolation::IntoObstacle { position, time })
                        }
                        Some(Cell::Plant(id)) => id,
                        _ => return Err(PlanViolation::NotAPlant { position }),
                    };
                    // Spec presence for every plant cell is a world invariant.
                    let spec = match self.world.plant_spec(plant) {
                        Some(spec) => spec,
                        None => return Err(PlanViolation::NotAPlant { position }),
                    };
                    if water < spec.water_cost {
                        return Err(PlanViolation::InsufficientWater {
                            position,
                            available: water,
                            required: spec.water_cost,
                        });
                    }
                    if time > spec.deadline {
                        return Err(PlanViolation::DeadlineMissed {
                            position,
                            time,
                            deadline: spec.deadline,
                        });
                    }
                    if !watered.insert(position) {
                        return Err(PlanViolation::AlreadyWatered { position });
                    }
                    water -= spec.water_cost;
                }
                movement => {
                    let (dr, dc) = movement.offset();
                    row += dr;
                    col += dc;
                }
            }

            time += 1;

            let position = (row, col);
            if !self.world.in_bounds(position) {
                return Err(PlanViolation::OutOfBounds { position, time });
            }
            if self.world.cell(position) == Some(Cell::Obstacle) {
                return Err(PlanViolation::IntoObstacle { position, time });
            }
            if position == GridWorld::HOME {
                water = self.world.tank_capacity();
            }
        }

        for (position, _) in self.world.plant_cells() {
            if !watered.contains(&position) {
                return Err(PlanViolation::UnwateredPlant { position });
            }
        }

        Ok(())
    }

    /// Checks a plan string; symbols outside the alphabet are a violation,
    /// never a fault.
    pub fn check_str(&self, plan: &str) -> std::result::Result<(), PlanViolation> {
        let actions = plan
            .trim()
            .chars()
            .map(|symbol| Action::from_symbol(symbol).ok_or(PlanViolation::UnknownSymbol(symbol)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.check(&Plan::new(actions))
    }

    /// True if the plan waters every plant without breaking a rule.
    pub fn validate(&self, plan: &Plan) -> bool {
        match self.check(plan) {
            Ok(()) => true,
            Err(violation) => {
                debug!("plan rejected: {violation}");
                false
            }
        }
    }

    /// String-level variant of [`PlanValidator::validate`].
    pub fn validate_str(&self, plan: &str) -> bool {
        match self.check_str(plan) {
            Ok(()) => true,
            Err(violation) => {
                debug!("plan rejected: {violation}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2 2 5\n0 1\n-1 0\n2 5\n";

    fn world(text: &str) -> GridWorld {
        GridWorld::parse(text).unwrap()
    }

    #[test]
    fn test_example_plans() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert!(validator.validate_str("RW"));
        assert!(!validator.validate_str("DW"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        let plan: Plan = "RW".parse().unwrap();
        assert!(validator.validate(&plan));
        assert!(validator.validate(&plan));
    }

    #[test]
    fn test_rejects_unknown_symbol() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("RX"),
            Err(PlanViolation::UnknownSymbol('X'))
        );
        assert!(!validator.validate_str("RX"));
    }

    #[test]
    fn test_rejects_leaving_the_grid() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("U"),
            Err(PlanViolation::OutOfBounds {
                position: (-1, 0),
                time: 1
            })
        );
    }

    #[test]
    fn test_rejects_moving_into_obstacle() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("D"),
            Err(PlanViolation::IntoObstacle {
                position: (1, 0),
                time: 1
            })
        );
    }

    #[test]
    fn test_rejects_watering_off_a_plant() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("W"),
            Err(PlanViolation::NotAPlant { position: (0, 0) })
        );
    }

    #[test]
    fn test_rejects_unwatered_plant() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("R"),
            Err(PlanViolation::UnwateredPlant { position: (0, 1) })
        );
        // The empty plan fails the final sweep as well.
        assert_eq!(
            validator.check_str(""),
            Err(PlanViolation::UnwateredPlant { position: (0, 1) })
        );
    }

    #[test]
    fn test_empty_plan_on_plantless_world() {
        let world = world("2 2 9\n0 0\n0 -1\n");
        let validator = PlanValidator::new(&world);
        assert!(validator.validate_str(""));
    }

    #[test]
    fn test_deadline_is_inclusive() {
        // Plant next to home with deadline 1: watering lands exactly on it.
        let world = world("1 2 5\n0 1\n1 1\n");
        let validator = PlanValidator::new(&world);
        assert!(validator.validate_str("RW"));

        // Detour first, so the watering happens at time 3 > 1.
        assert_eq!(
            validator.check_str("RLRW"),
            Err(PlanViolation::DeadlineMissed {
                position: (0, 1),
                time: 3,
                deadline: 1
            })
        );
    }

    #[test]
    fn test_rejects_insufficient_water() {
        // Two plants costing 3 each against a 4-unit tank.
        let world = world("2 3 4\n0 1 1\n0 0 0\n3 9\n");
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("RWRW"),
            Err(PlanViolation::InsufficientWater {
                position: (0, 2),
                available: 1,
                required: 3
            })
        );
        // A detour through home refills the tank in between.
        assert!(validator.validate_str("RWLRRW"));
    }

    #[test]
    fn test_rejects_double_watering() {
        let world = world(EXAMPLE);
        let validator = PlanValidator::new(&world);
        assert_eq!(
            validator.check_str("RWW"),
            Err(PlanViolation::AlreadyWatered { position: (0, 1) })
        );
    }

    #[test]
    fn test_refill_after_watering_at_home() {
        // Plant on the home cell and another two steps away, each costing 3
        // against a 4-unit tank. Only the refill triggered by watering at
        // home makes the second watering affordable.
        let world = world("1 3 4\n1 0 1\n3 9\n");
        let validator = PlanValidator::new(&world);
        assert!(validator.validate_str("WRRW"));
    }
}
