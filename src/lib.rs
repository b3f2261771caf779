pub mod catalog;
pub mod color;
pub mod engine;
pub mod events;
pub mod grid;
pub mod init;
pub mod rle;
pub mod rule_set;
pub mod sim;
pub mod surface;
pub mod term;

mod parse_util;

/// `(rows, cols)`
pub type Dimensions = (usize, usize);
