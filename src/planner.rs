//! # Planner
//!
//! The planner ties a [`GardenerProblem`] to an uninformed search strategy
//! and turns the strategy's raw action sequence into a [`Plan`]. It is the
//! one place that invokes a search, and by construction every plan it
//! returns passes the validator: the search only ever chains legal actions.
//!
//! ## Basic Usage
//!
//! ```
//! use gardener_rs::{GardenerProblem, Planner};
//!
//! let problem = GardenerProblem::parse("2 2 5\n0 1\n-1 0\n2 5\n").unwrap();
//! let planner = Planner::new(problem);
//!
//! let plan = planner.solve().unwrap().expect("a plan exists");
//! assert_eq!(plan.to_string(), "RW");
//! ```
//!
//! A world whose plants cannot all be watered yields `Ok(None)` rather than
//! an error:
//!
//! ```
//! use gardener_rs::{GardenerProblem, Planner};
//!
//! // The plant sits two moves away but its deadline is 1.
//! let problem = GardenerProblem::parse("1 3 5\n0 0 1\n1 1\n").unwrap();
//! let planner = Planner::new(problem);
//! assert!(planner.solve().unwrap().is_none());
//! ```

use crate::action::Plan;
use crate::error::{GardenerError, Result};
use crate::problem::GardenerProblem;
use crate::search::{BreadthFirstSearch, SearchStrategy};
use log::info;

/// Finds watering plans for a grid world.
///
/// Owns the problem formulation and a boxed search strategy. The default
/// strategy is breadth-first graph search, which returns a plan with the
/// fewest actions when one exists; [`Planner::with_search_strategy`] swaps
/// in any other [`SearchStrategy`] implementation.
pub struct Planner {
    problem: GardenerProblem,
    strategy: Box<dyn SearchStrategy<GardenerProblem>>,
}

impl Planner {
    /// Creates a planner using breadth-first search.
    pub fn new(problem: GardenerProblem) -> Self {
        Self {
            problem,
            strategy: Box::new(BreadthFirstSearch),
        }
    }

    /// Creates a planner with a custom search strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use gardener_rs::{GardenerProblem, Planner, UniformCostSearch};
    ///
    /// let problem = GardenerProblem::parse("2 2 5\n0 1\n-1 0\n2 5\n").unwrap();
    /// let planner = Planner::with_search_strategy(problem, Box::new(UniformCostSearch));
    /// assert!(planner.solve().unwrap().is_some());
    /// ```
    pub fn with_search_strategy(
        problem: GardenerProblem,
        strategy: Box<dyn SearchStrategy<GardenerProblem>>,
    ) -> Self {
        Self { problem, strategy }
    }

    /// The problem this planner searches over.
    pub fn problem(&self) -> &GardenerProblem {
        &self.problem
    }

    /// Searches for a plan that waters every plant.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(plan))` — a plan reaching the goal; empty when the world
    ///   has no plants
    /// * `Ok(None)` — the reachable state space holds no goal state
    ///
    /// # Errors
    ///
    /// Only [`GardenerError::InvariantViolation`] escapes, and only if the
    /// configured strategy misuses the problem contract.
    pub fn solve(&self) -> Result<Option<Plan>> {
        match self.strategy.search(&self.problem) {
            Ok(actions) => {
                let plan: Plan = actions.into_iter().collect();
                info!("found a plan with {} actions", plan.len());
                Ok(Some(plan))
            }
            Err(GardenerError::NoPlanFound) => {
                info!("no plan waters every plant");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
