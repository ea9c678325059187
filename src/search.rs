//! # Uninformed Search Strategies
//!
//! Generic graph-search routines over any [`SearchProblem`]. The trait seam
//! keeps the problem formulation and the algorithm independent, so a
//! strategy can be swapped without touching the state-space logic.
//!
//! [`BreadthFirstSearch`] is the default: with the gardener's uniform step
//! cost it returns a plan with the fewest actions. [`UniformCostSearch`]
//! orders expansion by accumulated [`SearchProblem::path_cost`] instead and
//! finds minimal-cost plans for problems where steps are not uniform.

use crate::error::{GardenerError, Result};
use crate::problem::SearchProblem;
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// Interface for the uninformed search algorithms consumed by the planner.
///
/// # Returns
///
/// * `Ok(Vec<Action>)` — the action sequence from the initial state to a
///   goal state (empty when the initial state already satisfies the goal)
/// * `Err(GardenerError::NoPlanFound)` — the reachable state space holds no
///   goal state
pub trait SearchStrategy<P: SearchProblem> {
    fn search(&self, problem: &P) -> Result<Vec<P::Action>>;
}

/// A node in the search tree.
struct Node<S, A> {
    /// The state at this node.
    state: S,
    /// Index of the parent node in the arena.
    parent: Option<usize>,
    /// Action that led here from the parent.
    action: Option<A>,
    /// Accumulated path cost from the root.
    cost: u32,
}

/// Arena of search nodes with parent links for path reconstruction.
struct SearchContext<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S: Clone, A: Clone> SearchContext<S, A> {
    fn new(initial: S) -> Self {
        Self {
            nodes: vec![Node {
                state: initial,
                parent: None,
                action: None,
                cost: 0,
            }],
        }
    }

    fn push_child(&mut self, parent: usize, action: A, state: S, cost: u32) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            cost,
        });
        index
    }

    fn state(&self, index: usize) -> &S {
        &self.nodes[index].state
    }

    /// Walks the parent links from a node back to the root and returns the
    /// actions in root-to-node order.
    fn reconstruct_path(&self, node_index: usize) -> Vec<A> {
        let mut path = Vec::new();
        let mut current = node_index;

        while let Some(node) = self.nodes.get(current) {
            if let Some(action) = &node.action {
                path.push(action.clone());
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Breadth-first graph search.
///
/// Explores states in FIFO order with a seen-set over full states, so equal
/// states reached along different path shapes are expanded once. The goal
/// test runs at generation time; with uniform step costs the first goal
/// found has the fewest actions.
pub struct BreadthFirstSearch;

impl<P: SearchProblem> SearchStrategy<P> for BreadthFirstSearch {
    fn search(&self, problem: &P) -> Result<Vec<P::Action>> {
        let initial = problem.initial_state();
        if problem.goal_test(&initial) {
            return Ok(Vec::new());
        }

        let mut context = SearchContext::new(initial.clone());
        let mut frontier: VecDeque<usize> = VecDeque::from([0]);
        let mut seen: HashSet<P::State> = HashSet::from([initial]);
        let mut expanded = 0usize;

        while let Some(node_index) = frontier.pop_front() {
            let state = context.state(node_index).clone();
            let cost = context.nodes[node_index].cost;
            expanded += 1;

            for action in problem.actions(&state) {
                let successor = problem.result(&state, &action)?;
                if !seen.insert(successor.clone()) {
                    continue;
                }
                let successor_cost = problem.path_cost(cost, &state, &action, &successor);
                let child = context.push_child(node_index, action, successor, successor_cost);
                if problem.goal_test(context.state(child)) {
                    debug!("goal reached after expanding {expanded} nodes");
                    return Ok(context.reconstruct_path(child));
                }
                frontier.push_back(child);
            }
            trace!(
                "expanded {expanded} nodes, frontier holds {}",
                frontier.len()
            );
        }

        debug!("state space exhausted after expanding {expanded} nodes");
        Err(GardenerError::NoPlanFound)
    }
}

/// Uniform-cost (Dijkstra) graph search.
///
/// Pops the cheapest open node first, keyed by accumulated
/// [`SearchProblem::path_cost`], with node index as the tie-break so equal
/// costs expand in insertion order. The goal test runs when a node is
/// popped, which keeps the result minimal even for non-uniform costs.
pub struct UniformCostSearch;

impl<P: SearchProblem> SearchStrategy<P> for UniformCostSearch {
    fn search(&self, problem: &P) -> Result<Vec<P::Action>> {
        let initial = problem.initial_state();
        let mut context = SearchContext::new(initial.clone());
        let mut best: HashMap<P::State, u32> = HashMap::from([(initial, 0)]);
        let mut open: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::from([Reverse((0, 0))]);
        let mut expanded = 0usize;

        while let Some(Reverse((cost, node_index))) = open.pop() {
            let state = context.state(node_index).clone();
            // A cheaper route to this state was queued after this entry.
            if best.get(&state).is_some_and(|&known| cost > known) {
                continue;
            }
            if problem.goal_test(&state) {
                debug!("goal reached after expanding {expanded} nodes");
                return Ok(context.reconstruct_path(node_index));
            }
            expanded += 1;

            for action in problem.actions(&state) {
                let successor = problem.result(&state, &action)?;
                let successor_cost = problem.path_cost(cost, &state, &action, &successor);
                let improved = best
                    .get(&successor)
                    .map_or(true, |&known| successor_cost < known);
                if !improved {
                    continue;
                }
                best.insert(successor.clone(), successor_cost);
                let child = context.push_child(node_index, action, successor, successor_cost);
                open.push(Reverse((successor_cost, child)));
            }
        }

        debug!("state space exhausted after expanding {expanded} nodes");
        Err(GardenerError::NoPlanFound)
    }
}
