use crate::color;
use crate::color::Rgb;
use crate::grid::Cell;
use crate::grid::Grid;
use crate::rule_set::B3S23;

/// Number of live cells in the Moore neighborhood of `(r, c)`, not counting the cell itself.
///
/// The grid is bounded: positions past any edge are absent and count as dead.
pub fn live_neighbors(grid: &Grid<Cell>, r: usize, c: usize) -> u8 {
    assert!(r < grid.rows() && c < grid.cols(), "cell is out of bounds");

    let (r0, r1) = (r.saturating_sub(1), (r + 1).min(grid.rows() - 1));
    let (c0, c1) = (c.saturating_sub(1), (c + 1).min(grid.cols() - 1));

    let mut n = 0;
    for nr in r0..=r1 {
        for nc in c0..=c1 {
            if (nr, nc) != (r, c) && grid[(nr, nc)].is_alive() {
                n += 1;
            }
        }
    }

    n
}

/// Display color of a cell. Only its current state matters.
pub fn color_of(cell: Cell) -> Rgb {
    if cell.is_alive() {
        color::ALIVE
    } else {
        color::BACKGROUND
    }
}

/// Compute the next generation of `current` under B3/S23.
pub fn next_generation(current: &Grid<Cell>) -> Grid<Cell> {
    current.map(|(r, c), &cell| B3S23.next(cell, live_neighbors(current, r, c)))
}

/// Advance `current` by one generation.
///
/// Returns the next grid along with the colors to draw this frame with. Colors describe
/// `current`, not the returned grid. `current` is left untouched.
pub fn step(current: &Grid<Cell>) -> (Grid<Cell>, Grid<Rgb>) {
    let next = next_generation(current);
    let colors = current.map(|_, &cell| color_of(cell));

    (next, colors)
}
