//! Random fleet placement.
//!
//! Ships are placed largest first. For each ship every legal placement is
//! enumerated (all anchors times all distinct orientations) and one is drawn
//! uniformly at random. Ships may neither overlap nor touch, diagonals
//! included. If some ship has no legal placement left the grid is cleared and
//! the whole fleet is laid out again, up to a bounded number of attempts.

use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;

use crate::common::{Coordinate, PlacementError, ShapeError};
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::grid::Grid;
use crate::shape::Shape;

/// A ship type to be placed: its label and its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipDefinition {
    ship_type: String,
    shape: Shape,
}

impl ShipDefinition {
    pub fn new(ship_type: impl Into<String>, shape: Shape) -> Self {
        Self {
            ship_type: ship_type.into(),
            shape,
        }
    }

    /// Convenience constructor for a straight ship of `length` cells.
    pub fn line(ship_type: impl Into<String>, length: usize) -> Result<Self, ShapeError> {
        Ok(Self::new(ship_type, Shape::line(length)?))
    }

    pub fn ship_type(&self) -> &str {
        &self.ship_type
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Places whole fleets onto grids with bounded retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetPlacer {
    max_attempts: usize,
}

impl Default for FleetPlacer {
    fn default() -> Self {
        Self::new(MAX_PLACEMENT_ATTEMPTS)
    }
}

impl FleetPlacer {
    /// Create a placer that gives up after `max_attempts` full layouts.
    /// At least one attempt is always made.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Place every ship of `definitions` onto `grid`.
    ///
    /// Any ships already on the grid are cleared first. On failure the grid is
    /// left empty.
    pub fn place<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        definitions: &[ShipDefinition],
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        if definitions.is_empty() {
            return Err(PlacementError::EmptyFleet);
        }
        let mut ordered: Vec<&ShipDefinition> = definitions.iter().collect();
        // stable: equal-sized ships keep their given order
        ordered.sort_by(|a, b| b.shape.cell_count().cmp(&a.shape.cell_count()));

        for attempt in 1..=self.max_attempts {
            grid.clear();
            if place_attempt(grid, &ordered, rng) {
                log::trace!(
                    "placed {} ships on {} grid in {} attempt(s)",
                    ordered.len(),
                    grid.dimensions(),
                    attempt
                );
                return Ok(());
            }
            log::debug!(
                "fleet placement attempt {}/{} on {} grid failed",
                attempt,
                self.max_attempts,
                grid.dimensions()
            );
        }
        grid.clear();
        let d = grid.dimensions();
        Err(PlacementError::FleetDoesNotFit {
            x: d.x,
            y: d.y,
            attempts: self.max_attempts,
        })
    }
}

/// One full layout pass. Returns `false` as soon as a ship has nowhere to go.
fn place_attempt<R: Rng + ?Sized>(grid: &mut Grid, ordered: &[&ShipDefinition], rng: &mut R) -> bool {
    for def in ordered {
        let mut candidates = legal_placements(grid, &def.shape);
        if candidates.is_empty() {
            return false;
        }
        let choice = rng.random_range(0..candidates.len());
        let position = candidates.swap_remove(choice);
        grid.add_ship(def.ship_type.clone(), def.shape.clone(), position);
    }
    true
}

/// Every legal absolute placement of `shape` on `grid` in its current state.
///
/// A placement is legal when all of its cells are inside the grid, are water,
/// and have only water among their eight neighbours. Each placement is listed
/// once per distinct orientation, anchors scanned row-major.
pub fn legal_placements(grid: &Grid, shape: &Shape) -> Vec<Vec<Coordinate>> {
    let d = grid.dimensions();
    let mut placements = Vec::new();
    for orientation in shape.orientations() {
        if orientation.width() > d.x || orientation.height() > d.y {
            continue;
        }
        let offsets: Vec<Coordinate> = orientation.occupied_offsets().collect();
        for ay in 0..=(d.y - orientation.height()) {
            for ax in 0..=(d.x - orientation.width()) {
                let position: Vec<Coordinate> = offsets
                    .iter()
                    .map(|o| Coordinate::new(ax + o.x, ay + o.y))
                    .collect();
                if position.iter().all(|c| grid.is_open_water(*c)) {
                    placements.push(position);
                }
            }
        }
    }
    placements
}
