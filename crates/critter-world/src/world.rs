//! Dense cell-state grid with food quantities.
//!
//! The ASCII form used by [`World::from_ascii`] and [`World::render`]:
//!
//! | Glyph | Cell |
//! |---|---|
//! | `.` | empty |
//! | `#` | terrain |
//! | `~` | liquid |
//! | `1`–`9` | food of that quantity |
//! | `*` | food of [`World::DEFAULT_FOOD`] (or any non-digit quantity) |
//! | `p` | passive critter |
//! | `h` | hostile critter |

use std::fmt;

use critter_core::{Point, Range};
use critter_paths::{CellState, GridWorld};

use crate::WorldError;

/// A rectangular world of classified cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    bounds: Range,
    cells: Vec<CellState>,
    /// Food per cell; zero wherever the cell is not [`CellState::Resource`].
    food: Vec<f64>,
}

impl World {
    /// Quantity given to `*` cells.
    pub const DEFAULT_FOOD: f64 = 10.0;

    /// An all-empty world.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidSize { width, height });
        }
        let bounds = Range::sized(width, height);
        Ok(Self {
            bounds,
            cells: vec![CellState::Empty; bounds.len()],
            food: vec![0.0; bounds.len()],
        })
    }

    /// Parse a world from ASCII rows (see the module docs for glyphs).
    ///
    /// Surrounding blank lines are ignored; every remaining line must have
    /// the same width.
    pub fn from_ascii(s: &str) -> Result<Self, WorldError> {
        let lines: Vec<&str> = s.trim_matches('\n').lines().map(str::trim_end).collect();
        let height = lines.len();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut world = Self::new(width as i32, height as i32)?;

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(WorldError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let state = match ch {
                    '.' => CellState::Empty,
                    '#' => CellState::Terrain,
                    '~' => CellState::Liquid,
                    'p' => CellState::Passive,
                    'h' => CellState::Hostile,
                    '*' => {
                        world.place_resource(p, Self::DEFAULT_FOOD)?;
                        continue;
                    }
                    '1'..='9' => {
                        let qty = ch.to_digit(10).map_or(0.0, f64::from);
                        world.place_resource(p, qty)?;
                        continue;
                    }
                    _ => return Err(WorldError::InvalidGlyph { ch, pos: p }),
                };
                world.set(p, state)?;
            }
        }
        Ok(world)
    }

    /// The world rectangle.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// State of the cell at `p`, or `None` out of bounds.
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `p`. Any food there is discarded; use
    /// [`place_resource`](Self::place_resource) to put food down.
    pub fn set(&mut self, p: Point, state: CellState) -> Result<(), WorldError> {
        let i = self.idx(p).ok_or(WorldError::OutOfBounds(p))?;
        self.cells[i] = state;
        if state != CellState::Resource {
            self.food[i] = 0.0;
        }
        Ok(())
    }

    /// Turn `p` into a food cell holding `qty`, or add `qty` to the food
    /// already there.
    pub fn place_resource(&mut self, p: Point, qty: f64) -> Result<(), WorldError> {
        if !qty.is_finite() || qty <= 0.0 {
            return Err(WorldError::InvalidQuantity(qty));
        }
        let i = self.idx(p).ok_or(WorldError::OutOfBounds(p))?;
        if self.cells[i] != CellState::Resource {
            self.cells[i] = CellState::Resource;
            self.food[i] = 0.0;
        }
        self.food[i] += qty;
        Ok(())
    }

    /// Eat up to `amount` from the food at `p` and return what was taken.
    /// An emptied cell reverts to [`CellState::Empty`].
    pub fn take_resource(&mut self, p: Point, amount: f64) -> Result<f64, WorldError> {
        let i = self.idx(p).ok_or(WorldError::OutOfBounds(p))?;
        if self.cells[i] != CellState::Resource {
            return Err(WorldError::NotFood(p));
        }
        let taken = amount.max(0.0).min(self.food[i]);
        self.food[i] -= taken;
        if self.food[i] <= 0.0 {
            self.food[i] = 0.0;
            self.cells[i] = CellState::Empty;
        }
        Ok(taken)
    }

    /// All food cells with their quantities, in row-major order.
    pub fn resources(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.bounds
            .iter()
            .zip(self.cells.iter().zip(self.food.iter()))
            .filter(|(_, (state, _))| **state == CellState::Resource)
            .map(|(p, (_, &qty))| (p, qty))
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Positions of every cell in `state`, in row-major order.
    pub fn positions(&self, state: CellState) -> Vec<Point> {
        self.bounds
            .iter()
            .zip(self.cells.iter())
            .filter(|&(_, &s)| s == state)
            .map(|(p, _)| p)
            .collect()
    }

    fn glyph(&self, i: usize) -> char {
        match self.cells[i] {
            CellState::Empty => '.',
            CellState::Terrain => '#',
            CellState::Liquid => '~',
            CellState::Passive => 'p',
            CellState::Hostile => 'h',
            CellState::Resource => {
                let qty = self.food[i];
                if qty.fract() == 0.0 && (1.0..=9.0).contains(&qty) {
                    char::from_digit(qty as u32, 10).unwrap_or('*')
                } else {
                    '*'
                }
            }
        }
    }

    /// ASCII rendering, one line per row.
    pub fn render(&self) -> String {
        self.render_path(&[])
    }

    /// ASCII rendering with `path` drawn over it: `@` at the first cell,
    /// `X` at the last and `o` in between.
    pub fn render_path(&self, path: &[Point]) -> String {
        let w = self.bounds.width() as usize;
        let mut glyphs: Vec<char> = (0..self.cells.len()).map(|i| self.glyph(i)).collect();
        let last = path.len().saturating_sub(1);
        for (n, &p) in path.iter().enumerate() {
            if let Some(i) = self.idx(p) {
                glyphs[i] = match n {
                    0 => '@',
                    n if n == last => 'X',
                    _ => 'o',
                };
            }
        }
        let mut out = String::with_capacity(glyphs.len() + self.bounds.height() as usize);
        for row in glyphs.chunks(w) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl GridWorld for World {
    fn width(&self) -> i32 {
        self.bounds.width()
    }

    fn height(&self) -> i32 {
        self.bounds.height()
    }

    fn cell_state(&self, p: Point) -> CellState {
        self.at(p).unwrap_or(CellState::Terrain)
    }

    fn resource_quantity_at(&self, p: Point) -> Option<f64> {
        let i = self.idx(p)?;
        (self.cells[i] == CellState::Resource).then_some(self.food[i])
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
