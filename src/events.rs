/// Input the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Exit the application
    Quit,

    /// The terminal now has `cols` columns and `rows` rows
    Resize { cols: u16, rows: u16 },
}
