use std::fmt;
use std::ops::Index;
use std::ops::IndexMut;

use crate::Dimensions;

/// State of a single cell.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// `0` for a dead cell, `1` for a live one.
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A fixed size, row-major 2D array.
///
/// Grids never change shape once built. Rows are indexed first, so `grid[(r, c)]` is the cell on
/// row `r` and column `c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Number of entries in a `rows` x `cols` grid.
///
/// # Panics
///
/// If the count does not fit in a `usize`.
fn area(rows: usize, cols: usize) -> usize {
    let Some(n) = rows.checked_mul(cols) else {
        panic!("A {rows}x{cols} grid has too many cells");
    };

    n
}

impl<T: Clone> Grid<T> {
    /// Create a `rows` x `cols` grid with every entry set to `value`.
    ///
    /// # Panics
    ///
    /// If `rows * cols` overflows.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; area(rows, cols)],
        }
    }

    /// Build a grid from ragged rows, right-padding each row with `pad` up to the longest one.
    pub fn from_rows(rows: Vec<Vec<T>>, pad: T) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let n = rows.len();

        let mut data = Vec::with_capacity(n * cols);
        for mut row in rows {
            row.resize(cols, pad.clone());
            data.extend(row);
        }

        Self {
            rows: n,
            cols,
            data,
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid where the entry at `(r, c)` is `f(r, c)`.
    ///
    /// # Panics
    ///
    /// If `rows * cols` overflows.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(area(rows, cols));
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }

        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Dimensions {
        (self.rows, self.cols)
    }

    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        if r < self.rows && c < self.cols {
            self.data.get(self.at(r, c))
        } else {
            None
        }
    }

    pub fn row(&self, r: usize) -> &[T] {
        assert!(r < self.rows, "row is out of bounds");

        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over every entry in row-major order, along with its `(r, c)` position.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;

        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }

    /// Build a same-shaped grid by applying `f` to every entry.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut((usize, usize), &T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.iter().map(|(pos, v)| f(pos, v)).collect(),
        }
    }

    fn at(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        assert!(r < self.rows && c < self.cols, "index is out of bounds");

        &self.data[self.at(r, c)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        assert!(r < self.rows && c < self.cols, "index is out of bounds");

        let i = self.at(r, c);
        &mut self.data[i]
    }
}

impl Grid<Cell> {
    /// An all-dead grid.
    pub fn dead(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, Cell::Dead)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| c.is_alive()).count()
    }
}

/// Live cells are drawn as `o`, dead ones as `.`, one line per row.
impl fmt::Display for Grid<Cell> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }

            for cell in self.row(r) {
                let ch = if cell.is_alive() { 'o' } else { '.' };
                write!(f, "{ch}")?;
            }
        }

        Ok(())
    }
}
