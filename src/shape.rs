//! Polyomino ship shapes and their distinct orientations.
//!
//! A [`Shape`] is a rectangular mask of occupied flags stored row-major. Shapes
//! are plain values: two shapes are equal when their masks are equal, which is
//! what orientation de-duplication relies on.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coordinate, ShapeError};

/// Immutable rectangular mask describing a ship's footprint.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawShape"))]
pub struct Shape {
    width: usize,
    height: usize,
    mask: Vec<bool>,
}

impl Shape {
    /// Build a shape from a row-major mask of `width * height` flags.
    ///
    /// Empty border rows and columns are trimmed so that equal footprints
    /// always compare equal.
    pub fn new(width: usize, height: usize, mask: Vec<bool>) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::ZeroSize);
        }
        let area = width
            .checked_mul(height)
            .ok_or(ShapeError::TooLarge { width, height })?;
        if mask.len() != area {
            return Err(ShapeError::MaskSizeMismatch {
                expected: area,
                actual: mask.len(),
            });
        }
        if !mask.iter().any(|&occupied| occupied) {
            return Err(ShapeError::NoOccupiedCells);
        }
        Ok(Self {
            width,
            height,
            mask,
        }
        .trimmed())
    }

    /// Build a shape from rows of flags. Short rows are padded with empty cells.
    pub fn from_rows<R, I>(rows: R) -> Result<Self, ShapeError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = bool>,
    {
        let rows: Vec<Vec<bool>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let area = width
            .checked_mul(height)
            .ok_or(ShapeError::TooLarge { width, height })?;
        let mut mask = Vec::with_capacity(area);
        for row in &rows {
            mask.extend_from_slice(row);
            mask.extend(core::iter::repeat(false).take(width - row.len()));
        }
        Self::new(width, height, mask)
    }

    /// A straight ship of `length` cells laid out horizontally.
    pub fn line(length: usize) -> Result<Self, ShapeError> {
        Self::new(length, 1, alloc::vec![true; length])
    }

    /// Number of mask columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of mask rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the mask cell at `(x, y)` is occupied.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.mask[y * self.width + x]
    }

    /// Number of occupied cells, i.e. the hit points of a ship with this shape.
    pub fn cell_count(&self) -> usize {
        self.mask.iter().filter(|&&occupied| occupied).count()
    }

    /// Offsets of the occupied cells relative to the top-left anchor, row-major.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.mask[y * self.width + x])
                .map(move |x| Coordinate::new(x, y))
        })
    }

    /// Mirror left to right.
    pub fn flip_horizontal(&self) -> Self {
        self.remap(self.width, self.height, |x, y| (self.width - 1 - x, y))
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&self) -> Self {
        self.remap(self.width, self.height, |x, y| (x, self.height - 1 - y))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        self.remap(self.height, self.width, |x, y| (y, x))
    }

    /// Every distinct rotation and reflection of this shape.
    ///
    /// The eight transforms of the square's symmetry group are produced as
    /// flip and transpose compositions, and any mask already produced is
    /// skipped. The identity always comes first.
    pub fn orientations(&self) -> Vec<Shape> {
        let transposed = self.transpose();
        let candidates = [
            self.clone(),
            self.flip_horizontal(),
            self.flip_vertical(),
            self.flip_horizontal().flip_vertical(),
            transposed.flip_horizontal(),
            transposed.flip_vertical(),
            transposed.flip_horizontal().flip_vertical(),
            transposed,
        ];
        let mut distinct: Vec<Shape> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !distinct.contains(&candidate) {
                distinct.push(candidate);
            }
        }
        distinct
    }

    /// Build a `width` x `height` shape whose cell `(x, y)` copies this shape's
    /// cell at `source(x, y)`. Only called with dimensions no larger than the
    /// already validated area of `self`.
    fn remap<F>(&self, width: usize, height: usize, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let mut mask = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = source(x, y);
                mask.push(self.mask[sy * self.width + sx]);
            }
        }
        Self {
            width,
            height,
            mask,
        }
    }

    /// Drop empty border rows and columns. Requires at least one occupied cell.
    fn trimmed(self) -> Self {
        let occupied: Vec<Coordinate> = self.occupied_offsets().collect();
        let min_x = occupied.iter().map(|c| c.x).min().unwrap_or(0);
        let max_x = occupied.iter().map(|c| c.x).max().unwrap_or(0);
        let min_y = occupied.iter().map(|c| c.y).min().unwrap_or(0);
        let max_y = occupied.iter().map(|c| c.y).max().unwrap_or(0);
        if min_x == 0 && min_y == 0 && max_x + 1 == self.width && max_y + 1 == self.height {
            return self;
        }
        self.remap(max_x - min_x + 1, max_y - min_y + 1, |x, y| {
            (x + min_x, y + min_y)
        })
    }
}

/// Unvalidated serialized form; deserialization goes through [`Shape::new`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawShape {
    width: usize,
    height: usize,
    mask: Vec<bool>,
}

#[cfg(feature = "std")]
impl TryFrom<RawShape> for Shape {
    type Error = ShapeError;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        Shape::new(raw.width, raw.height, raw.mask)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape<{}x{}>:", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let glyph = if self.mask[y * self.width + x] { 'X' } else { '.' };
                write!(f, "{}", glyph)?;
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
