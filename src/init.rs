use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::Dimensions;
use crate::catalog;
use crate::grid::Cell;
use crate::grid::Grid;
use crate::rle;
use crate::rle::MalformedPatternError;
use crate::rle::Pattern;

/// Pattern name that asks for a grid of random noise instead of a catalog pattern.
pub const RANDOM: &str = "random";

/// Most cells a grid may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Where a pattern is anchored inside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Centered in both dimensions, rounding towards the top left.
    #[default]
    Center,

    /// Anchored at `(0, 0)`.
    TopLeft,

    /// Top left corner of the pattern goes on `(row, col)`.
    At { row: usize, col: usize },
}

impl Placement {
    /// Top left `(row, col)` of a `pattern` sized pattern inside a `grid` sized grid.
    pub fn anchor(self, pattern: Dimensions, grid: Dimensions) -> Dimensions {
        match self {
            Placement::Center => (
                grid.0.saturating_sub(pattern.0) / 2,
                grid.1.saturating_sub(pattern.1) / 2,
            ),
            Placement::TopLeft => (0, 0),
            Placement::At { row, col } => (row, col),
        }
    }
}

/// Accepts `center`, `top-left` or `ROW,COL`.
impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "center" => Ok(Placement::Center),
            "top-left" => Ok(Placement::TopLeft),
            s => {
                let (row, col) = s
                    .split_once(',')
                    .ok_or_else(|| "expected 'center', 'top-left' or ROW,COL".to_string())?;

                let row = row
                    .trim()
                    .parse()
                    .map_err(|e| format!("invalid row: {e}"))?;
                let col = col
                    .trim()
                    .parse()
                    .map_err(|e| format!("invalid column: {e}"))?;

                Ok(Placement::At { row, col })
            }
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Center => write!(f, "center"),
            Placement::TopLeft => write!(f, "top-left"),
            Placement::At { row, col } => write!(f, "{row},{col}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("Pattern '{name}' not found")]
    PatternNotFound { name: String },

    #[error("Pattern '{name}' is reserved but not implemented")]
    PatternNotImplemented { name: String },

    #[error("Grid of size {grid:?} is too large")]
    GridTooLarge { grid: Dimensions },

    #[error("Pattern of size {pattern:?} does not fit in a {grid:?} grid at {anchor:?}")]
    PatternTooLarge {
        pattern: Dimensions,
        grid: Dimensions,
        anchor: Dimensions,
    },

    #[error("Pattern '{name}' is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: MalformedPatternError,
    },
}

/// Build generation 0 for `name`, which is either a catalog pattern or [`RANDOM`].
///
/// `grid_size` is `(rows, cols)`.
pub fn initialize(
    name: &str,
    grid_size: Dimensions,
    placement: Placement,
) -> Result<Grid<Cell>, InitError> {
    initialize_with_rng(name, grid_size, placement, &mut rand::rng())
}

/// Like [`initialize`], with the random source for [`RANDOM`] supplied by the caller.
pub fn initialize_with_rng<R>(
    name: &str,
    grid_size: Dimensions,
    placement: Placement,
    rng: &mut R,
) -> Result<Grid<Cell>, InitError>
where
    R: Rng + ?Sized,
{
    check_grid_size(grid_size)?;

    if name == RANDOM {
        info!(rows = grid_size.0, cols = grid_size.1, "seeding random grid");
        return Ok(random(grid_size, rng));
    }

    let Some(entry) = catalog::lookup(name) else {
        return Err(InitError::PatternNotFound {
            name: name.to_string(),
        });
    };

    if entry.is_reserved() {
        return Err(InitError::PatternNotImplemented {
            name: name.to_string(),
        });
    }

    debug!(
        name,
        category = entry.category,
        rle = entry.rle,
        "found catalog pattern"
    );

    let pattern = rle::decode(entry.rle).map_err(|source| InitError::Malformed {
        name: name.to_string(),
        source,
    })?;

    place(&pattern, grid_size, placement)
}

/// Grids must have at most [`MAX_CELLS`] cells.
pub fn check_grid_size(grid_size: Dimensions) -> Result<(), InitError> {
    match grid_size.0.checked_mul(grid_size.1) {
        Some(n) if n <= MAX_CELLS => Ok(()),
        _ => Err(InitError::GridTooLarge { grid: grid_size }),
    }
}

/// A grid where every cell is independently alive with probability one half.
pub fn random<R>(grid_size: Dimensions, rng: &mut R) -> Grid<Cell>
where
    R: Rng + ?Sized,
{
    let (rows, cols) = grid_size;

    Grid::from_fn(rows, cols, |_, _| Cell::from(rng.random_bool(0.5)))
}

/// Copy `pattern` into an otherwise dead grid. The pattern must fit entirely at the anchor given
/// by `placement`.
pub fn place(
    pattern: &Pattern,
    grid_size: Dimensions,
    placement: Placement,
) -> Result<Grid<Cell>, InitError> {
    check_grid_size(grid_size)?;

    let (rows, cols) = grid_size;
    let anchor = placement.anchor(pattern.size(), grid_size);

    let fits = |start: usize, len: usize, bound: usize| {
        start.checked_add(len).is_some_and(|end| end <= bound)
    };

    if !fits(anchor.0, pattern.rows(), rows) || !fits(anchor.1, pattern.cols(), cols) {
        return Err(InitError::PatternTooLarge {
            pattern: pattern.size(),
            grid: grid_size,
            anchor,
        });
    }

    let mut grid = Grid::dead(rows, cols);
    for ((r, c), &cell) in pattern.iter() {
        grid[(anchor.0 + r, anchor.1 + c)] = cell;
    }

    debug!(
        anchor_row = anchor.0,
        anchor_col = anchor.1,
        %placement,
        "placed pattern"
    );

    Ok(grid)
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::InitError;
    use super::MAX_CELLS;
    use super::Placement;
    use super::initialize;
    use super::initialize_with_rng;
    use super::place;
    use crate::grid::Cell;
    use crate::rle::decode;

    #[test]
    fn center_anchor() {
        assert_eq!(Placement::Center.anchor((2, 2), (10, 10)), (4, 4));
        assert_eq!(Placement::Center.anchor((1, 3), (5, 6)), (2, 1));
        assert_eq!(Placement::Center.anchor((5, 5), (3, 3)), (0, 0));
    }

    #[test]
    fn block_is_centered() {
        let grid = initialize("block", (4, 6), Placement::Center).unwrap();

        insta::assert_snapshot!(grid.to_string(), @r"
        ......
        ..oo..
        ..oo..
        ......
        ");
    }

    #[test]
    fn glider_top_left() {
        let grid = initialize("glider", (4, 4), Placement::TopLeft).unwrap();

        insta::assert_snapshot!(grid.to_string(), @r"
        .o..
        ..o.
        ooo.
        ....
        ");
    }

    #[test]
    fn explicit_anchor() {
        let pattern = decode("o!").unwrap();
        let grid = place(&pattern, (3, 3), Placement::At { row: 2, col: 1 }).unwrap();

        assert_eq!(grid[(2, 1)], Cell::Alive);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn pattern_too_large() {
        let res = initialize("toad", (2, 5), Placement::Center);

        assert_eq!(
            res,
            Err(InitError::PatternTooLarge {
                pattern: (2, 8),
                grid: (2, 5),
                anchor: (0, 0),
            })
        );
    }

    #[test]
    fn anchor_past_the_edge() {
        let pattern = decode("2o$2o!").unwrap();
        let res = place(&pattern, (4, 4), Placement::At { row: 3, col: 0 });

        assert!(matches!(res, Err(InitError::PatternTooLarge { .. })));

        let res = place(&pattern, (4, 4), Placement::At { row: 0, col: usize::MAX });
        assert!(matches!(res, Err(InitError::PatternTooLarge { .. })));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        for size in [(usize::MAX, 2), (100_000, 100_000), (MAX_CELLS, 2)] {
            assert_eq!(
                initialize("block", size, Placement::Center),
                Err(InitError::GridTooLarge { grid: size })
            );
            assert_eq!(
                initialize("random", size, Placement::Center),
                Err(InitError::GridTooLarge { grid: size })
            );
        }

        let pattern = decode("o!").unwrap();
        assert!(matches!(
            place(&pattern, (2, usize::MAX), Placement::TopLeft),
            Err(InitError::GridTooLarge { .. })
        ));

        assert!(initialize("block", (1 << 12, 1 << 12), Placement::TopLeft).is_ok());
    }

    #[test]
    fn unknown_pattern() {
        assert_eq!(
            initialize("Glider", (10, 10), Placement::Center),
            Err(InitError::PatternNotFound {
                name: "Glider".to_string()
            })
        );
    }

    #[test]
    fn reserved_pattern() {
        assert_eq!(
            initialize("lwss", (10, 10), Placement::Center),
            Err(InitError::PatternNotImplemented {
                name: "lwss".to_string()
            })
        );
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = initialize_with_rng("random", (8, 9), Placement::Center, &mut rng);

        let mut rng = StdRng::seed_from_u64(7);
        let b = initialize_with_rng("random", (8, 9), Placement::Center, &mut rng);

        assert_eq!(a, b);
        assert_eq!(a.unwrap().size(), (8, 9));
    }

    #[test]
    fn parse_placement() {
        assert_eq!("center".parse(), Ok(Placement::Center));
        assert_eq!("top-left".parse(), Ok(Placement::TopLeft));
        assert_eq!(" 3, 4 ".parse(), Ok(Placement::At { row: 3, col: 4 }));
        assert!("middle".parse::<Placement>().is_err());
        assert!("3,x".parse::<Placement>().is_err());
    }

    #[test]
    fn placement_display_round_trips() {
        for placement in [
            Placement::Center,
            Placement::TopLeft,
            Placement::At { row: 12, col: 0 },
        ] {
            assert_eq!(placement.to_string().parse(), Ok(placement));
        }
    }
}
