//! Graphviz DOT rendering of a plan's walk over a world.

use crate::action::{Action, Plan};
use crate::error::Result;
use crate::world::{Cell, GridWorld, Position};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;

/// Renders worlds and plans as Graphviz DOT files.
///
/// The output is a left-to-right chain of the gardener's states, one node
/// per time tick with the position and remaining water, edges labelled with
/// the action symbol, plus one summary node per plant cell colored by
/// whether the plan watered it. Rendering follows the plan literally and
/// does not judge its validity; run the validator for that.
pub struct GardenVisualizer;

impl GardenVisualizer {
    /// Create a new garden visualizer
    pub fn new() -> Self {
        Self
    }

    /// Generate a DOT file visualization of a plan walking a world
    pub fn visualize_plan(&self, world: &GridWorld, plan: &Plan, filename: &str) -> Result<()> {
        let mut file = File::create(filename)?;

        writeln!(file, "digraph garden {{")?;
        writeln!(file, "    rankdir=LR;")?;
        writeln!(
            file,
            "    node [shape=box, style=filled, fillcolor=lightblue];"
        )?;
        writeln!(file, "    edge [fontsize=10];")?;

        let (mut row, mut col) = GridWorld::HOME;
        let mut water = world.tank_capacity();
        let mut watered: HashSet<Position> = HashSet::new();

        writeln!(
            file,
            "    step_0 [label=\"t=0\\n(0, 0)\\nwater={water}\", fillcolor=lightgreen];"
        )?;

        for (step, &action) in plan.iter().enumerate() {
            if action == Action::Water {
                if let Some(Cell::Plant(id)) = world.cell((row, col)) {
                    if let Some(spec) = world.plant_spec(id) {
                        water = water.saturating_sub(spec.water_cost);
                        watered.insert((row, col));
                    }
                }
            } else {
                let (dr, dc) = action.offset();
                row += dr;
                col += dc;
            }
            if (row, col) == GridWorld::HOME {
                water = world.tank_capacity();
            }

            writeln!(
                file,
                "    step_{} [label=\"t={}\\n({row}, {col})\\nwater={water}\"];",
                step + 1,
                step + 1
            )?;
            writeln!(
                file,
                "    step_{step} -> step_{} [label=\"{action}\"];",
                step + 1
            )?;
        }

        for (index, (position, id)) in world.plant_cells().enumerate() {
            let fillcolor = if watered.contains(&position) {
                "lightcoral"
            } else {
                "lightpink"
            };
            writeln!(
                file,
                "    plant_{index} [label=\"plant {id}\\n{position:?}\", fillcolor={fillcolor}];"
            )?;
        }

        writeln!(file, "}}")?;

        Ok(())
    }
}

impl Default for GardenVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualize_plan() {
        let world = GridWorld::parse("2 2 5\n0 1\n-1 0\n2 5\n").unwrap();
        let plan: Plan = "RW".parse().unwrap();

        let visualizer = GardenVisualizer::new();
        visualizer
            .visualize_plan(&world, &plan, "test_garden_plan.dot")
            .unwrap();

        let content = std::fs::read_to_string("test_garden_plan.dot").unwrap();
        assert!(content.contains("digraph garden"));
        assert!(content.contains("step_0 -> step_1 [label=\"R\"]"));
        assert!(content.contains("step_1 -> step_2 [label=\"W\"]"));
        assert!(content.contains("plant_0"));
        assert!(content.contains("lightcoral"));

        std::fs::remove_file("test_garden_plan.dot").unwrap();
    }
}
