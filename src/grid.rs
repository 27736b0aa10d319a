//! Playing field: cell states, the placed fleet and shot bookkeeping.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coordinate, Dimensions, GridError};
use crate::shape::Shape;

/// State of a single cell. `Hit` and `Miss` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Water,
    Ship,
    Hit,
    Miss,
}

impl CellState {
    /// Glyph used by the diagnostic grid rendering.
    pub fn glyph(self) -> char {
        match self {
            CellState::Water => ' ',
            CellState::Ship => 'O',
            CellState::Hit => 'X',
            CellState::Miss => '-',
        }
    }

    /// Returns `true` once the cell has been fired at.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// A grid cell: its position plus its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub state: CellState,
}

impl Cell {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// A ship placed on a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    ship_type: String,
    shape: Shape,
    position: Vec<Coordinate>,
}

impl Ship {
    /// Ship's type label, e.g. `"Carrier"`.
    pub fn ship_type(&self) -> &str {
        &self.ship_type
    }

    /// Shape this ship was placed from.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Absolute cells occupied by this ship, in placement order.
    pub fn position(&self) -> &[Coordinate] {
        &self.position
    }

    /// Returns `true` if the ship occupies `coord`.
    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.position.contains(&coord)
    }
}

/// A player's playing field.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawGrid"))]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    fleet: Vec<Ship>,
}

impl Grid {
    /// Create a grid of open water.
    pub fn new(dimensions: Dimensions) -> Result<Self, GridError> {
        if dimensions.x == 0 || dimensions.y == 0 {
            return Err(GridError::InvalidDimensions(dimensions));
        }
        let cells = (0..dimensions.y)
            .flat_map(|y| {
                (0..dimensions.x).map(move |x| Cell {
                    x,
                    y,
                    state: CellState::Water,
                })
            })
            .collect();
        Ok(Self {
            dimensions,
            cells,
            fleet: Vec::new(),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Ships placed on this grid, in placement order.
    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Bounds-checked cell lookup.
    pub fn cell_at(&self, x: isize, y: isize) -> Result<&Cell, GridError> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    /// Resolve a shot at `(x, y)`, returning the updated cell.
    ///
    /// Water becomes `Miss` and ship becomes `Hit`. Firing at a resolved cell
    /// fails without touching the grid.
    pub fn fire(&mut self, x: isize, y: isize) -> Result<Cell, GridError> {
        let idx = self.index(x, y)?;
        let cell = &mut self.cells[idx];
        cell.state = match cell.state {
            CellState::Water => CellState::Miss,
            CellState::Ship => CellState::Hit,
            CellState::Hit | CellState::Miss => {
                return Err(GridError::AlreadyFired {
                    x: cell.x,
                    y: cell.y,
                })
            }
        };
        Ok(*cell)
    }

    /// The fleet member occupying `cell`, if any.
    pub fn ship_containing(&self, cell: &Cell) -> Option<&Ship> {
        let coord = cell.coordinate();
        self.fleet.iter().find(|ship| ship.occupies(coord))
    }

    /// Returns `true` when every cell of `ship` has been hit.
    pub fn is_ship_fully_sunk(&self, ship: &Ship) -> bool {
        ship.position
            .iter()
            .all(|c| self.state_at(*c) == Some(CellState::Hit))
    }

    /// Returns `true` when every ship of the fleet is sunk.
    pub fn is_fleet_annihilated(&self) -> bool {
        self.fleet.iter().all(|ship| self.is_ship_fully_sunk(ship))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Diagnostic view with every ship revealed.
    pub fn render(&self) -> GridView<'_> {
        GridView {
            grid: self,
            reveal_ships: true,
        }
    }

    /// Opponent-facing view; intact ship cells are drawn as water.
    pub fn render_hidden(&self) -> GridView<'_> {
        GridView {
            grid: self,
            reveal_ships: false,
        }
    }

    /// Returns `true` if `coord` is water and none of its eight neighbours
    /// holds anything but water.
    pub(crate) fn is_open_water(&self, coord: Coordinate) -> bool {
        let d = self.dimensions;
        let x_range = coord.x.saturating_sub(1)..=(coord.x + 1).min(d.x - 1);
        x_range.into_iter().all(|x| {
            let y_range = coord.y.saturating_sub(1)..=(coord.y + 1).min(d.y - 1);
            y_range
                .into_iter()
                .all(|y| self.cells[y * d.x + x].state == CellState::Water)
        })
    }

    /// Mark `position` as ship cells and record the ship in the fleet.
    pub(crate) fn add_ship(&mut self, ship_type: String, shape: Shape, position: Vec<Coordinate>) {
        for c in &position {
            let idx = c.y * self.dimensions.x + c.x;
            self.cells[idx].state = CellState::Ship;
        }
        self.fleet.push(Ship {
            ship_type,
            shape,
            position,
        });
    }

    /// Return every cell to water and empty the fleet.
    pub(crate) fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Water;
        }
        self.fleet.clear();
    }

    fn state_at(&self, coord: Coordinate) -> Option<CellState> {
        if coord.x < self.dimensions.x && coord.y < self.dimensions.y {
            Some(self.cells[coord.y * self.dimensions.x + coord.x].state)
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Result<usize, GridError> {
        if self.dimensions.contains(x, y) {
            Ok(y as usize * self.dimensions.x + x as usize)
        } else {
            Err(GridError::OutOfBounds { x, y })
        }
    }
}

/// Unvalidated serialized form of a [`Grid`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGrid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    fleet: Vec<Ship>,
}

#[cfg(feature = "std")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    /// Cells must be listed row-major, one per coordinate, and every ship cell
    /// must lie inside the grid on a `Ship` or `Hit` cell.
    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let d = raw.dimensions;
        if d.x == 0 || d.y == 0 {
            return Err(GridError::InvalidDimensions(d));
        }
        let expected = d.x.checked_mul(d.y).unwrap_or(usize::MAX);
        if raw.cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: raw.cells.len(),
            });
        }
        for (index, cell) in raw.cells.iter().enumerate() {
            if cell.x != index % d.x || cell.y != index / d.x {
                return Err(GridError::MisplacedCell { index });
            }
        }
        for c in raw.fleet.iter().flat_map(|ship| ship.position.iter()) {
            if c.x >= d.x || c.y >= d.y {
                return Err(GridError::OutOfBounds {
                    x: c.x as isize,
                    y: c.y as isize,
                });
            }
            match raw.cells[c.y * d.x + c.x].state {
                CellState::Ship | CellState::Hit => {}
                CellState::Water | CellState::Miss => {
                    return Err(GridError::UnmarkedShipCell { x: c.x, y: c.y })
                }
            }
        }
        Ok(Self {
            dimensions: d,
            cells: raw.cells,
            fleet: raw.fleet,
        })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {{\n  dimensions: {},\n  fleet: {:?}\n}}",
            self.dimensions, self.fleet
        )?;
        write!(f, "{}", self.render())
    }
}

/// Row-major text rendering of a [`Grid`]: one glyph per cell, each followed
/// by `|`, one line per row.
pub struct GridView<'a> {
    grid: &'a Grid,
    reveal_ships: bool,
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.cells.chunks(self.grid.dimensions.x) {
            for cell in row {
                let state = match cell.state {
                    CellState::Ship if !self.reveal_ships => CellState::Water,
                    state => state,
                };
                write!(f, "{}|", state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
