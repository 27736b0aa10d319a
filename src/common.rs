//! Common types for Battleships: coordinates, shot classifications and the
//! error enums returned by every layer of the engine.

use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Integer pair used for grid sizes. `x` is the number of columns and `y` the
/// number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
}

impl Dimensions {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Total number of cells covered by these dimensions.
    pub fn area(&self) -> usize {
        self.x * self.y
    }

    /// Returns `true` if `(x, y)` lies inside these dimensions.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.x && (y as usize) < self.y
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Absolute position of a cell within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance between two coordinates.
    pub fn distance(&self, other: &Coordinate) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// Semantic result of a shot as seen by the player who fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum HitState {
    /// The shot landed in open water.
    Water,
    /// The shot damaged a ship that is still afloat.
    Hit,
    /// The shot sank the last intact cell of a ship.
    WholeShipDestroyed,
}

impl fmt::Display for HitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitState::Water => write!(f, "Water"),
            HitState::Hit => write!(f, "Hit"),
            HitState::WholeShipDestroyed => write!(f, "WholeShipDestroyed"),
        }
    }
}

/// Errors returned when building a [`Shape`](crate::Shape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Width or height of the mask is zero.
    #[error("shape mask must have a non-zero width and height")]
    ZeroSize,
    /// The flat mask does not hold `width * height` flags.
    #[error("shape mask holds {actual} cells, expected {expected}")]
    MaskSizeMismatch { expected: usize, actual: usize },
    /// Every flag in the mask is empty.
    #[error("shape mask has no occupied cells")]
    NoOccupiedCells,
    /// `width * height` does not fit in `usize`.
    #[error("shape mask of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
}

/// Errors returned by [`Grid`](crate::Grid) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid dimensions must be positive on both axes.
    #[error("grid dimensions {0} must be positive on both axes")]
    InvalidDimensions(Dimensions),
    /// Coordinates fall outside the grid.
    #[error("cell ({x}, {y}) is outside of the playing field")]
    OutOfBounds { x: isize, y: isize },
    /// The cell was already resolved as a hit or a miss.
    #[error("cell ({x}, {y}) was already fired at")]
    AlreadyFired { x: usize, y: usize },
    /// A restored grid does not hold one cell per coordinate.
    #[error("grid holds {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
    /// A restored grid lists a cell out of row-major order.
    #[error("cell at index {index} does not match its coordinate")]
    MisplacedCell { index: usize },
    /// A restored fleet occupies a cell not marked as a ship.
    #[error("ship cell ({x}, {y}) is not marked as a ship")]
    UnmarkedShipCell { x: usize, y: usize },
}

/// Errors returned by the fleet placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// No ship definitions were supplied.
    #[error("fleet definition contains no ships")]
    EmptyFleet,
    /// The fleet could not be laid out within the bounded number of attempts.
    #[error("unable to fit all ships to the playing field with dimensions {x}x{y} after {attempts} attempts")]
    FleetDoesNotFit { x: usize, y: usize, attempts: usize },
}

/// Errors returned by the match state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A player was registered without a name.
    #[error("player name must not be empty")]
    EmptyPlayerName,
    /// Both players carry the same name.
    #[error("players must be distinct, both are named '{0}'")]
    DuplicatePlayers(String),
    /// Playing fields have not been populated yet.
    #[error("match was not initialized")]
    NotInitialized,
    /// The next mover is neither of the registered players.
    #[error("player '{0}' is not a registered player of this match")]
    UnknownMover(String),
    /// The match already has a winner.
    #[error("match already ended")]
    AlreadyEnded,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Errors returned by ship definition sources.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// A ship block carried a type label but no mask rows.
    #[error("ship '{ship_type}' has no shape rows")]
    MissingShape { ship_type: String },
    /// The mask rows of a ship block do not form a valid shape.
    #[error("ship '{ship_type}' has an invalid shape")]
    InvalidShape {
        ship_type: String,
        #[source]
        source: ShapeError,
    },
    /// The source did not define a single ship.
    #[error("no ship definitions found")]
    NoShips,
    #[cfg(feature = "std")]
    #[error("unable to read ship definitions")]
    Io(#[from] std::io::Error),
}

/// Errors returned by match stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No match is stored under the identifier.
    #[error("match with id '{0}' not found")]
    NotFound(String),
    /// A live match already uses the identifier.
    #[error("match with id '{0}' already exists")]
    DuplicateId(String),
}
