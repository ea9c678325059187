//! # State-Space Problem Formulation
//!
//! [`SearchProblem`] is the contract a search strategy consumes: an initial
//! state, a legal-action generator, a transition function, a goal test, and
//! a step-cost accumulator. Any state-space problem implements it, which
//! keeps the search algorithms substitutable without touching the problem
//! logic.
//!
//! [`GardenerProblem`] is the gardener instance: it wraps an immutable
//! [`GridWorld`] plus its [`PlantIndex`] and encodes watered plants as a
//! bitmask, because the search explores many states and needs cheap state
//! equality and hashing.
//!
//! ## Basic Usage
//!
//! ```
//! use gardener_rs::{Action, GardenerProblem, SearchProblem};
//!
//! let problem = GardenerProblem::parse("2 2 5\n0 1\n-1 0\n2 5\n").unwrap();
//! let initial = problem.initial_state();
//!
//! // Home corner: only Right is legal (Down is an obstacle).
//! assert_eq!(problem.actions(&initial), vec![Action::Right]);
//! assert!(!problem.goal_test(&initial));
//!
//! let at_plant = problem.result(&initial, &Action::Right).unwrap();
//! let done = problem.result(&at_plant, &Action::Water).unwrap();
//! assert!(problem.goal_test(&done));
//! ```

use crate::action::Action;
use crate::codec::PlantIndex;
use crate::error::{GardenerError, Result};
use crate::state::SearchState;
use crate::world::{Cell, GridWorld, PlantSpec, Position};
use std::hash::Hash;

/// The five-operation contract between a state-space problem and an
/// uninformed search strategy.
///
/// `result` is fallible so an implementation can flag a strategy that
/// applies an action `actions` never offered — a defensive condition that
/// correct wiring never triggers.
pub trait SearchProblem {
    /// Immutable state value with structural equality and hashing, as
    /// required for duplicate detection in graph search.
    type State: Clone + Eq + Hash;
    /// Action symbol type.
    type Action: Clone;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Legal actions in the given state, in a fixed, deterministic order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state produced by applying one action.
    ///
    /// # Errors
    ///
    /// [`GardenerError::InvariantViolation`] if the action was not offered
    /// by [`SearchProblem::actions`] for this state.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State>;

    /// True if the state satisfies the goal.
    fn goal_test(&self, state: &Self::State) -> bool;

    /// Accumulated path cost after taking `action` from `state` to `next`.
    fn path_cost(
        &self,
        accumulated: u32,
        state: &Self::State,
        action: &Self::Action,
        next: &Self::State,
    ) -> u32;
}

/// The gardener's state-space formulation over a grid world.
#[derive(Clone, Debug)]
pub struct GardenerProblem {
    world: GridWorld,
    index: PlantIndex,
    /// One tick past the latest plant deadline. `time` saturates here: past
    /// every deadline the exact value can no longer change any legality
    /// decision, and collapsing those states into one equivalence class is
    /// what lets duplicate detection close an otherwise unbounded space.
    time_horizon: u32,
}

impl GardenerProblem {
    /// Wraps a world, building its plant index.
    pub fn new(world: GridWorld) -> Self {
        let index = PlantIndex::new(&world);
        let time_horizon = world
            .plant_cells()
            .filter_map(|(_, id)| world.plant_spec(id))
            .map(|spec| spec.deadline)
            .max()
            .map_or(0, |deadline| deadline.saturating_add(1));
        Self {
            world,
            index,
            time_horizon,
        }
    }

    /// Parses a world description and wraps it.
    pub fn parse(text: &str) -> Result<Self> {
        GridWorld::parse(text).map(Self::new)
    }

    /// The underlying world.
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// The plant-position bit codec.
    pub fn plant_index(&self) -> &PlantIndex {
        &self.index
    }

    fn plant_at(&self, position: Position) -> Option<(PlantSpec, u8)> {
        match self.world.cell(position) {
            Some(Cell::Plant(id)) => {
                let spec = self.world.plant_spec(id)?;
                let bit = self.index.bit(position)?;
                Some((spec, bit))
            }
            _ => None,
        }
    }

    /// Watering is legal iff the current cell carries an unwatered plant,
    /// the tank covers its cost, and its deadline has not passed.
    fn water_applicable(&self, state: &SearchState) -> bool {
        match self.plant_at(state.position()) {
            Some((spec, bit)) => {
                state.watered & (1u64 << bit) == 0
                    && state.water >= spec.water_cost
                    && state.time <= spec.deadline
            }
            None => false,
        }
    }
}

impl SearchProblem for GardenerProblem {
    type State = SearchState;
    type Action = Action;

    fn initial_state(&self) -> SearchState {
        let (row, col) = GridWorld::HOME;
        SearchState {
            row,
            col,
            water: self.world.tank_capacity(),
            watered: 0,
            time: 0,
        }
    }

    /// Emission order is fixed as Up, Down, Left, Right, Water; it decides
    /// which of several shortest plans a deterministic search returns.
    fn actions(&self, state: &SearchState) -> Vec<Action> {
        let mut actions = Vec::with_capacity(5);
        for action in Action::MOVES {
            let (dr, dc) = action.offset();
            if self.world.traversable((state.row + dr, state.col + dc)) {
                actions.push(action);
            }
        }
        if self.water_applicable(state) {
            actions.push(Action::Water);
        }
        actions
    }

    fn result(&self, state: &SearchState, action: &Action) -> Result<SearchState> {
        let mut next = *state;
        match action {
            Action::Water => {
                if !self.water_applicable(state) {
                    return Err(GardenerError::InvariantViolation(format!(
                        "water applied at {:?} where it was never offered",
                        state.position()
                    )));
                }
                let (spec, bit) = self.plant_at(state.position()).ok_or_else(|| {
                    GardenerError::InvariantViolation(format!(
                        "water applied on a plantless cell {:?}",
                        state.position()
                    ))
                })?;
                next.water -= spec.water_cost;
                next.watered |= 1u64 << bit;
            }
            movement => {
                let (dr, dc) = movement.offset();
                next.row += dr;
                next.col += dc;
                if !self.world.traversable(next.position()) {
                    return Err(GardenerError::InvariantViolation(format!(
                        "move {movement} into {:?} was never offered",
                        next.position()
                    )));
                }
            }
        }

        // Saturates at the horizon; see the field note on `time_horizon`.
        next.time = state.time.saturating_add(1).min(self.time_horizon);

        // The tank refills whenever the gardener ends an action at home,
        // watering included.
        if next.position() == GridWorld::HOME {
            next.water = self.world.tank_capacity();
        }

        Ok(next)
    }

    fn goal_test(&self, state: &SearchState) -> bool {
        state.watered == self.index.full_mask()
    }

    fn path_cost(
        &self,
        accumulated: u32,
        _state: &SearchState,
        _action: &Action,
        _next: &SearchState,
    ) -> u32 {
        accumulated + 1
    }
}
