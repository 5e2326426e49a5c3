//! The circuit grid: cell classification, the char-grid loader, and
//! the collision / sand predicates built on top of it.

use crate::geometry::{out_of_bounds, rasterize, Vector};
use crate::error::PilotError;

/// One cell of the circuit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainCell {
    Track,
    Wall,
    Sand,
    Finish,
    /// Starting grid cell for pilot `1`, `2`, or `3`, per the §6 char
    /// table. Only pilot 1's start is consumed by the core; the
    /// others are retained so the loader round-trips the full grid.
    Start(u8),
}

/// The terrain grid plus its dimensions. Immutable for the lifetime of
/// a turn.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub width: usize,
    pub height: usize,
    cells: Vec<TerrainCell>,
    /// Cached at load time so the destination picker doesn't rescan
    /// the whole grid every turn.
    pub finish_cells: Vec<Vector>,
}

impl Circuit {
    pub fn new(width: usize, height: usize, cells: Vec<TerrainCell>) -> Self {
        assert_eq!(cells.len(), width * height, "cell buffer size mismatch");
        let finish_cells = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, TerrainCell::Finish))
            .map(|(i, _)| Vector::new((i % width) as i32, (i / width) as i32))
            .collect();
        Circuit {
            width,
            height,
            cells,
            finish_cells,
        }
    }

    pub fn get(&self, pos: Vector) -> Option<TerrainCell> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        Some(self.cells[pos.y as usize * self.width + pos.x as usize])
    }

    /// Parses the §6 char-grid encoding (`.` track, `#` wall, `~`
    /// sand, `=` finish, `1`/`2`/`3` per-pilot start). Off-grid cells
    /// and unrecognized characters are rejected rather than silently
    /// treated as wall, so malformed fixtures fail loudly.
    pub fn parse(text: &str) -> Result<Circuit, PilotError> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(PilotError::InvalidObservation("empty circuit".into()));
        }
        let height = lines.len();
        let width = lines[0].chars().count();
        if width == 0 || lines.iter().any(|l| l.chars().count() != width) {
            return Err(PilotError::InvalidObservation(
                "circuit rows must be non-empty and equal width".into(),
            ));
        }

        let mut cells = Vec::with_capacity(width * height);
        for line in &lines {
            for ch in line.chars() {
                let cell = match ch {
                    '.' => TerrainCell::Track,
                    '#' => TerrainCell::Wall,
                    '~' => TerrainCell::Sand,
                    '=' => TerrainCell::Finish,
                    '1' => TerrainCell::Start(1),
                    '2' => TerrainCell::Start(2),
                    '3' => TerrainCell::Start(3),
                    other => {
                        return Err(PilotError::InvalidObservation(format!(
                            "unrecognized circuit character '{other}'"
                        )))
                    }
                };
                cells.push(cell);
            }
        }

        Ok(Circuit::new(width, height, cells))
    }

    /// The grid position of the `n`th pilot's start cell, if present.
    pub fn start_for(&self, pilot: u8) -> Option<Vector> {
        self.cells.iter().enumerate().find_map(|(i, c)| {
            if *c == TerrainCell::Start(pilot) {
                Some(Vector::new((i % self.width) as i32, (i / self.width) as i32))
            } else {
                None
            }
        })
    }
}

/// True iff `pos` is outside the circuit or a `Sand` cell.
pub fn in_sand(pos: Vector, circuit: &Circuit) -> bool {
    matches!(circuit.get(pos), Some(TerrainCell::Sand))
}

/// True iff moving from `a` to `b` crosses a `Wall`, or — when
/// supplied — lands on or crosses either opponent's cell. A segment
/// that leaves the circuit is also treated as a collision (the caller
/// is expected to have already rejected out-of-bounds successors, but
/// this keeps the predicate total).
pub fn collision(
    a: Vector,
    b: Vector,
    circuit: &Circuit,
    opponents: Option<(Vector, Vector)>,
) -> bool {
    if out_of_bounds(a, circuit) || out_of_bounds(b, circuit) {
        return true;
    }
    for cell in rasterize(a, b) {
        match circuit.get(cell) {
            Some(TerrainCell::Wall) | None => return true,
            _ => {}
        }
        if let Some((opp1, opp2)) = opponents {
            if cell == opp1 || cell == opp2 {
                return true;
            }
        }
    }
    false
}
