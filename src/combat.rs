//! Shot resolution against a single grid.

use alloc::string::String;

use crate::common::{GridError, HitState};
use crate::grid::{Cell, CellState, Grid};

/// Outcome of a resolved shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireOutcome {
    /// Cell after the shot.
    pub cell: Cell,
    pub hit_state: HitState,
    /// Type label of the ship that was hit, if any.
    pub ship_type: Option<String>,
    /// Set when the shot sank the last floating ship of the grid.
    pub fleet_destroyed: bool,
}

/// Fire at `(x, y)` on `grid` and classify the result.
///
/// Out-of-bounds and already-fired errors from [`Grid::fire`] are returned
/// unchanged.
pub fn resolve_fire(grid: &mut Grid, x: isize, y: isize) -> Result<FireOutcome, GridError> {
    let cell = grid.fire(x, y)?;
    if cell.state != CellState::Hit {
        return Ok(FireOutcome {
            cell,
            hit_state: HitState::Water,
            ship_type: None,
            fleet_destroyed: false,
        });
    }

    let (ship_type, sunk) = match grid.ship_containing(&cell) {
        Some(ship) => (Some(String::from(ship.ship_type())), grid.is_ship_fully_sunk(ship)),
        None => (None, false),
    };
    if !sunk {
        return Ok(FireOutcome {
            cell,
            hit_state: HitState::Hit,
            ship_type,
            fleet_destroyed: false,
        });
    }
    Ok(FireOutcome {
        cell,
        hit_state: HitState::WholeShipDestroyed,
        ship_type,
        fleet_destroyed: grid.is_fleet_annihilated(),
    })
}
