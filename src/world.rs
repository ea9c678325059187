//! # Grid World
//!
//! The immutable world model: a rectangular grid of cells (empty, obstacle,
//! or plant), a requirement table per plant type, and the gardener's tank
//! capacity. A world is parsed once from its textual description and never
//! mutated afterwards; every other component borrows it read-only.
//!
//! ## Input format
//!
//! ```text
//! N M W0
//! <N grid rows, each M integers: -1=obstacle, 0=empty, k>0=plant type k>
//! <one line per plant type 1..K, in order, each "water_cost deadline">
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.
//!
//! ## Basic Usage
//!
//! ```
//! use gardener_rs::{Cell, GridWorld};
//!
//! let world = GridWorld::parse(
//!     "2 2 5\n\
//!      0 1\n\
//!      -1 0\n\
//!      2 5\n",
//! )
//! .unwrap();
//!
//! assert_eq!(world.tank_capacity(), 5);
//! assert_eq!(world.cell((0, 1)), Some(Cell::Plant(1)));
//! assert_eq!(world.cell((1, 0)), Some(Cell::Obstacle));
//! assert_eq!(world.cell((5, 5)), None);
//! ```

use crate::error::{GardenerError, Result};
use std::collections::HashMap;
use std::io::Read;

/// Identifier of a plant type, `1..=K` as declared in the world description.
pub type PlantId = u8;

/// A grid coordinate as `(row, col)`.
///
/// Signed so that a move off the top or left edge stays representable until
/// the bounds check rejects it.
pub type Position = (i32, i32);

/// Kind of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Traversable cell with nothing to do on it.
    Empty,
    /// Impassable cell; entering it invalidates a plan.
    Obstacle,
    /// Traversable cell carrying a plant of the given type.
    Plant(PlantId),
}

/// Watering requirements for one plant type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantSpec {
    /// Units of water a single watering consumes.
    pub water_cost: u32,
    /// Latest time tick (inclusive) at which watering is still legal.
    pub deadline: u32,
}

/// The immutable grid world.
///
/// Built atomically by [`GridWorld::parse`]; construction either fully
/// succeeds or fails with [`GardenerError::MalformedInput`] and retains
/// nothing. Invariant: every [`Cell::Plant`] cell's type has an entry in the
/// spec table, and the grid carries at most 64 plant cells so the search
/// layer can track them in a single `u64` mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    rows: i32,
    cols: i32,
    tank_capacity: u32,
    cells: Vec<Cell>,
    plant_specs: HashMap<PlantId, PlantSpec>,
}

/// Hard cap on plant cells per world, imposed by the `u64` watered mask.
pub const MAX_PLANTS: usize = 64;

impl GridWorld {
    /// The fixed home cell where the tank refills to capacity.
    pub const HOME: Position = (0, 0);

    /// Parses a world description, skipping blank lines and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns [`GardenerError::MalformedInput`] if the header does not have
    /// exactly three fields, a grid row has the wrong length, any field is
    /// not an integer in range, a plant cell references a type with no spec
    /// line, or the grid carries more than [`MAX_PLANTS`] plant cells.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let header = lines
            .first()
            .ok_or_else(|| malformed("empty world description"))?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(malformed(format!(
                "header must be 'N M W0', got {} fields",
                fields.len()
            )));
        }
        let rows: i32 = parse_field(fields[0], "row count")?;
        let cols: i32 = parse_field(fields[1], "column count")?;
        let tank_capacity: u32 = parse_field(fields[2], "tank capacity")?;
        if rows < 1 || cols < 1 {
            return Err(malformed(format!("grid dimensions must be positive, got {rows}x{cols}")));
        }

        let row_count = rows as usize;
        if lines.len() < 1 + row_count {
            return Err(malformed(format!(
                "expected {row_count} grid rows, got {}",
                lines.len() - 1
            )));
        }

        let mut cells = Vec::with_capacity(row_count * cols as usize);
        let mut max_plant_type: u8 = 0;
        let mut plant_cells = 0usize;
        for line in &lines[1..=row_count] {
            let row: Vec<&str> = line.split_whitespace().collect();
            if row.len() != cols as usize {
                return Err(malformed(format!(
                    "grid row has {} cells, expected {cols}",
                    row.len()
                )));
            }
            for field in row {
                let value: i32 = parse_field(field, "grid cell")?;
                let cell = match value {
                    -1 => Cell::Obstacle,
                    0 => Cell::Empty,
                    1..=255 => {
                        let id = value as PlantId;
                        max_plant_type = max_plant_type.max(id);
                        plant_cells += 1;
                        Cell::Plant(id)
                    }
                    _ => return Err(malformed(format!("invalid grid cell value {value}"))),
                };
                cells.push(cell);
            }
        }
        if plant_cells > MAX_PLANTS {
            return Err(malformed(format!(
                "{plant_cells} plant cells exceed the supported maximum of {MAX_PLANTS}"
            )));
        }

        let mut plant_specs = HashMap::new();
        for (offset, line) in lines[1 + row_count..].iter().enumerate() {
            let id = offset + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 2 {
                return Err(malformed(format!(
                    "plant spec {id} must be 'water_cost deadline', got {} fields",
                    fields.len()
                )));
            }
            let id = PlantId::try_from(id)
                .map_err(|_| malformed(format!("too many plant spec lines ({id})")))?;
            let water_cost: u32 = parse_field(fields[0], "water cost")?;
            let deadline: u32 = parse_field(fields[1], "deadline")?;
            plant_specs.insert(
                id,
                PlantSpec {
                    water_cost,
                    deadline,
                },
            );
        }

        for id in 1..=max_plant_type {
            if cells.contains(&Cell::Plant(id)) && !plant_specs.contains_key(&id) {
                return Err(malformed(format!("plant type {id} has no spec line")));
            }
        }

        Ok(Self {
            rows,
            cols,
            tank_capacity,
            cells,
            plant_specs,
        })
    }

    /// Reads a world description to end and parses it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Number of grid rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of grid columns.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Water the tank holds when full.
    pub fn tank_capacity(&self) -> u32 {
        self.tank_capacity
    }

    /// True if the position lies on the grid.
    pub fn in_bounds(&self, (row, col): Position) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    /// The cell at the position, or `None` when out of bounds.
    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !self.in_bounds(position) {
            return None;
        }
        let (row, col) = position;
        self.cells
            .get((row * self.cols + col) as usize)
            .copied()
    }

    /// True if the position is on the grid and not an obstacle.
    pub fn traversable(&self, position: Position) -> bool {
        matches!(self.cell(position), Some(cell) if cell != Cell::Obstacle)
    }

    /// The watering requirements for a plant type.
    pub fn plant_spec(&self, id: PlantId) -> Option<PlantSpec> {
        self.plant_specs.get(&id).copied()
    }

    /// All plant cells with their type, in row-major scan order.
    ///
    /// This ordering is a visible contract: the state codec assigns mask
    /// bits by it, and two equal worlds enumerate identically.
    pub fn plant_cells(&self) -> impl Iterator<Item = (Position, PlantId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| match cell {
                Cell::Plant(id) => {
                    let index = index as i32;
                    Some(((index / self.cols, index % self.cols), *id))
                }
                _ => None,
            })
    }
}

fn malformed(message: impl Into<String>) -> GardenerError {
    GardenerError::MalformedInput(message.into())
}

fn parse_field<T: std::str::FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| malformed(format!("invalid {what} '{field}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2 2 5\n0 1\n-1 0\n2 5\n";

    #[test]
    fn test_parse_example_world() {
        let world = GridWorld::parse(EXAMPLE).unwrap();
        assert_eq!(world.rows(), 2);
        assert_eq!(world.cols(), 2);
        assert_eq!(world.tank_capacity(), 5);
        assert_eq!(world.cell((0, 0)), Some(Cell::Empty));
        assert_eq!(world.cell((0, 1)), Some(Cell::Plant(1)));
        assert_eq!(world.cell((1, 0)), Some(Cell::Obstacle));
        assert_eq!(
            world.plant_spec(1),
            Some(PlantSpec {
                water_cost: 2,
                deadline: 5
            })
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# gardener world\n\n2 2 5\n0 1\n\n# grid done\n-1 0\n2 5\n";
        let world = GridWorld::parse(text).unwrap();
        assert_eq!(world.cell((0, 1)), Some(Cell::Plant(1)));
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let err = GridWorld::parse("2 2\n0 0\n0 0\n").unwrap_err();
        assert!(matches!(err, GardenerError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_rejects_row_length_mismatch() {
        let err = GridWorld::parse("2 2 5\n0 1 0\n-1 0\n2 5\n").unwrap_err();
        assert!(matches!(err, GardenerError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_rows() {
        let err = GridWorld::parse("2 2 5\n0 1\n").unwrap_err();
        assert!(matches!(err, GardenerError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_plant_spec() {
        let err = GridWorld::parse("2 2 5\n0 2\n-1 0\n2 5\n").unwrap_err();
        assert!(matches!(err, GardenerError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_rejects_non_integer_cell() {
        let err = GridWorld::parse("1 2 5\n0 x\n").unwrap_err();
        assert!(matches!(err, GardenerError::MalformedInput(_)));
    }

    #[test]
    fn test_world_without_plants_is_valid() {
        let world = GridWorld::parse("2 2 9\n0 0\n0 -1\n").unwrap();
        assert_eq!(world.plant_cells().count(), 0);
    }

    #[test]
    fn test_in_bounds_and_traversable() {
        let world = GridWorld::parse(EXAMPLE).unwrap();
        assert!(world.in_bounds((0, 0)));
        assert!(!world.in_bounds((-1, 0)));
        assert!(!world.in_bounds((0, 2)));
        assert!(world.traversable((0, 1)));
        assert!(!world.traversable((1, 0)));
        assert!(!world.traversable((2, 0)));
    }

    #[test]
    fn test_plant_cells_row_major_order() {
        let world = GridWorld::parse("2 3 4\n1 0 2\n2 0 1\n1 3\n2 7\n").unwrap();
        let plants: Vec<_> = world.plant_cells().collect();
        assert_eq!(
            plants,
            [((0, 0), 1), ((0, 2), 2), ((1, 0), 2), ((1, 2), 1)]
        );
    }

    #[test]
    fn test_from_reader() {
        let world = GridWorld::from_reader(EXAMPLE.as_bytes()).unwrap();
        assert_eq!(world.tank_capacity(), 5);
    }
}
