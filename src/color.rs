/// A 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Live cells
pub const ALIVE: Rgb = Rgb::new(255, 255, 215);

/// Dead cells
pub const BACKGROUND: Rgb = Rgb::new(10, 10, 40);

/// The gutter between cells, painted when a frame is cleared
pub const GRID: Rgb = Rgb::new(30, 30, 60);
