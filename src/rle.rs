use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::grid::Cell;
use crate::grid::Grid;
use crate::parse_util;
use crate::parse_util::ConvertError;

/// A decoded pattern. Always rectangular.
pub type Pattern = Grid<Cell>;

/// Longest run a single repeat count may describe.
pub const MAX_RUN: usize = 1 << 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedPatternError {
    #[error("Row {row} contains no cells")]
    EmptyRow { row: usize },

    #[error("Unrecognized byte on row {row}: 0x{got:0X}")]
    UnrecognizedByte { row: usize, got: u8 },

    #[error("Repeat count of zero on row {row}")]
    ZeroRepeat { row: usize },

    #[error("Repeat count on row {row} is not followed by 'o', 'b' or '$'")]
    DanglingRepeat { row: usize },

    #[error("Run of {len} on row {row} is too long")]
    RunTooLong { row: usize, len: usize },

    #[error("Failed to convert run length: {0}")]
    RunLength(#[from] ConvertError),
}

/// Decode a run length encoded pattern body, such as `bo$2bo$3o!`.
///
/// * `o` is a live cell, `b` a dead one, each optionally prefixed by a repeat count.
/// * `$` ends a row. `n$` ends the row and leaves `n - 1` blank rows after it.
/// * `!` ends the pattern. Anything after it is ignored.
///
/// Whitespace between tokens is skipped. Rows are right-padded with dead cells up to the widest
/// row. A row without any cells, a stray byte or a repeat count not attached to a token is an
/// error.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn decode(rle: &str) -> Result<Pattern, MalformedPatternError> {
    let mut bytes = rle.as_bytes();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row: Vec<Cell> = Vec::new();

    // Tokens seen on the current row
    let mut tokens = 0;
    let mut rep: Option<usize> = None;
    let mut terminated = false;

    while let Some(b) = parse_util::peek_1(bytes) {
        match b {
            w if w.is_ascii_whitespace() => {
                bytes = parse_util::take_ws(bytes);
            }

            // End of pattern
            b'!' => {
                terminated = true;
                break;
            }

            // Live or dead cells
            b'o' | b'b' => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;

                let cell = Cell::from(b == b'o');
                let n = rep.take().unwrap_or(1);
                row.resize(row.len() + n, cell);

                tokens += 1;
            }

            // End of row
            b'$' => {
                let (_, rest) = parse_util::take_1(bytes);
                bytes = rest;

                if tokens == 0 {
                    return Err(MalformedPatternError::EmptyRow { row: rows.len() });
                }

                let n = rep.take().unwrap_or(1);
                rows.push(std::mem::take(&mut row));
                rows.extend((1..n).map(|_| Vec::new()));

                tokens = 0;
            }

            n if n.is_ascii_digit() => {
                if rep.is_some() {
                    return Err(MalformedPatternError::DanglingRepeat { row: rows.len() });
                }

                let (Some(n), rest) = parse_util::take_digits(bytes) else {
                    unreachable!("We peeked and found a digit")
                };
                bytes = rest;

                let n: usize = parse_util::convert(n)?;
                if n == 0 {
                    return Err(MalformedPatternError::ZeroRepeat { row: rows.len() });
                }
                if n > MAX_RUN {
                    return Err(MalformedPatternError::RunTooLong {
                        row: rows.len(),
                        len: n,
                    });
                }

                rep = Some(n);
            }

            b => {
                return Err(MalformedPatternError::UnrecognizedByte {
                    row: rows.len(),
                    got: b,
                });
            }
        }
    }

    if rep.is_some() {
        return Err(MalformedPatternError::DanglingRepeat { row: rows.len() });
    }

    if tokens == 0 {
        return Err(MalformedPatternError::EmptyRow { row: rows.len() });
    }
    rows.push(row);

    if !terminated {
        warn!("RLE pattern has no '!' terminator");
    }

    let pattern = Grid::from_rows(rows, Cell::Dead);
    debug!(
        rows = pattern.rows(),
        cols = pattern.cols(),
        "decoded RLE pattern"
    );

    Ok(pattern)
}
