use std::fmt;

use crate::grid::Cell;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// A life-like birth/survival rule.
///
/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// Only [`B3S23`] is ever built.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// For both `b` and `s`, bit `i` being on means `i` neighbors are included in the set of
    /// births (resp. survivals). Any bit past the 8th is ignored.
    const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given its current state and how many of its
    /// neighbors are alive.
    pub fn next(&self, cell: Cell, live_neighbors: u8) -> Cell {
        // 9 or more neighbors never happens in a Moore neighborhood
        if live_neighbors > 8 {
            return Cell::Dead;
        }

        let n = 1u16 << live_neighbors;
        let set = if cell.is_alive() {
            self.survivals()
        } else {
            self.births()
        };

        Cell::from(set & n == n)
    }
}

/// Formats as `B3/S23`.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|&i| set & (1u16 << i) != 0)
                .map(|i| char::from(b'0' + i))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[cfg(test)]
mod test {
    use super::B3S23;
    use crate::grid::Cell;

    #[test]
    fn b3s23_masks() {
        assert_eq!(B3S23.births(), 0b1000);
        assert_eq!(B3S23.survivals(), 0b1100);
        assert_eq!(B3S23.to_string(), "B3/S23");
    }

    #[test]
    fn survival() {
        for n in 0..=8 {
            let expected = Cell::from(n == 2 || n == 3);
            assert_eq!(B3S23.next(Cell::Alive, n), expected, "{n} neighbors");
        }
    }

    #[test]
    fn birth() {
        for n in 0..=8 {
            let expected = Cell::from(n == 3);
            assert_eq!(B3S23.next(Cell::Dead, n), expected, "{n} neighbors");
        }
    }
}
