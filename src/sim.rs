use std::io;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::info;
use tracing::trace;

use crate::color;
use crate::engine;
use crate::grid::Cell;
use crate::grid::Grid;
use crate::surface::Surface;

/// Most pixels a canvas may hold.
pub const MAX_PIXELS: u64 = 1 << 25;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("A {rows}x{cols} grid at {cell_size} px per cell does not fit on a canvas")]
pub struct CanvasTooLarge {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Pause between frames
    pub frame_delay: Option<Duration>,

    /// Stop after this many generations
    pub max_generations: Option<u64>,
}

impl RunOptions {
    /// Pace the loop at `fps` frames per second. `0` means as fast as possible.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.frame_delay = (fps > 0).then(|| Duration::from_secs(1) / fps);
        self
    }
}

/// The simulation loop. Owns the current generation and paints it, one cell per `cell_size`
/// square.
pub struct Simulation {
    cells: Grid<Cell>,
    cell_size: u32,
    generation: u64,
}

impl Simulation {
    pub fn new(cells: Grid<Cell>, cell_size: u32) -> Self {
        Self {
            cells,
            cell_size,
            generation: 0,
        }
    }

    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `(width, height)` of the surface needed to draw the whole grid. Fails when either side
    /// overflows a `u32` or the canvas would hold more than [`MAX_PIXELS`].
    pub fn pixel_size(&self) -> Result<(u32, u32), CanvasTooLarge> {
        let (rows, cols) = self.cells.size();
        let err = CanvasTooLarge {
            rows,
            cols,
            cell_size: self.cell_size,
        };

        let px = |n: usize| {
            u32::try_from(n)
                .ok()
                .and_then(|n| n.checked_mul(self.cell_size))
        };
        let (Some(w), Some(h)) = (px(cols), px(rows)) else {
            return Err(err);
        };

        if u64::from(w) * u64::from(h) > MAX_PIXELS {
            return Err(err);
        }

        Ok((w, h))
    }

    /// Paint the current generation on `surface` and move on to the next one.
    ///
    /// Every cell leaves a one pixel gutter, unless cells are a single pixel wide.
    pub fn tick<S>(&mut self, surface: &mut S) -> io::Result<()>
    where
        S: Surface + ?Sized,
    {
        surface.clear(color::GRID);

        let (next, colors) = engine::step(&self.cells);

        let size = self.cell_size;
        let side = size.saturating_sub(1).max(1);
        let px = |n: usize| u32::try_from(n).unwrap_or(u32::MAX).saturating_mul(size);
        for ((r, c), &color) in colors.iter() {
            surface.draw_cell(px(c), px(r), side, color);
        }

        surface.present()?;

        self.cells = next;
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.cells.population(),
            "tick"
        );

        Ok(())
    }

    /// Tick until the surface reports a quit, or the generation limit is reached. Returns the
    /// number of generations computed.
    pub fn run<S>(&mut self, surface: &mut S, opts: RunOptions) -> io::Result<u64>
    where
        S: Surface + ?Sized,
    {
        info!(
            rows = self.cells.rows(),
            cols = self.cells.cols(),
            population = self.cells.population(),
            "starting simulation"
        );

        loop {
            if surface.poll_quit()? {
                info!(generation = self.generation, "quit requested");
                break;
            }

            if opts
                .max_generations
                .is_some_and(|max| self.generation >= max)
            {
                info!(generation = self.generation, "generation limit reached");
                break;
            }

            self.tick(surface)?;

            if let Some(delay) = opts.frame_delay {
                thread::sleep(delay);
            }
        }

        Ok(self.generation)
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::CanvasTooLarge;
    use super::RunOptions;
    use super::Simulation;
    use crate::color;
    use crate::color::Rgb;
    use crate::init;
    use crate::init::Placement;
    use crate::surface::Framebuffer;
    use crate::surface::Surface;

    /// A framebuffer that asks to quit after a fixed number of frames.
    struct QuitAfter {
        fb: Framebuffer,
        frames: u64,
    }

    impl Surface for QuitAfter {
        fn clear(&mut self, color: Rgb) {
            self.fb.clear(color);
        }

        fn draw_cell(&mut self, x: u32, y: u32, size: u32, color: Rgb) {
            self.fb.draw_cell(x, y, size, color);
        }

        fn present(&mut self) -> io::Result<()> {
            self.fb.present()
        }

        fn poll_quit(&mut self) -> io::Result<bool> {
            Ok(self.fb.frames() >= self.frames)
        }
    }

    #[test]
    fn tick_paints_current_generation() {
        let cells = init::initialize("blinkers", (3, 3), Placement::Center).unwrap();
        let mut sim = Simulation::new(cells, 4);
        assert_eq!(sim.pixel_size(), Ok((12, 12)));

        let mut fb = Framebuffer::new(12, 12);
        sim.tick(&mut fb).unwrap();

        // horizontal blinker on the middle row was drawn
        assert_eq!(fb.pixel(0, 4), Some(color::ALIVE));
        assert_eq!(fb.pixel(10, 6), Some(color::ALIVE));
        assert_eq!(fb.pixel(4, 0), Some(color::BACKGROUND));

        // gutters
        assert_eq!(fb.pixel(3, 4), Some(color::GRID));
        assert_eq!(fb.pixel(0, 7), Some(color::GRID));

        // the grid moved on to the vertical phase
        assert_eq!(sim.cells().to_string(), ".o.\n.o.\n.o.");
        assert_eq!(sim.generation(), 1);
        assert_eq!(fb.frames(), 1);
    }

    #[test]
    fn canvas_size_is_bounded() {
        let cells = init::initialize("block", (120, 120), Placement::Center).unwrap();
        assert_eq!(Simulation::new(cells.clone(), 8).pixel_size(), Ok((960, 960)));

        assert_eq!(
            Simulation::new(cells, u32::MAX).pixel_size(),
            Err(CanvasTooLarge {
                rows: 120,
                cols: 120,
                cell_size: u32::MAX,
            })
        );

        // 4096 x 4096 cells at 8 px would need a 32768 x 32768 canvas
        let cells = init::initialize("block", (4096, 4096), Placement::Center).unwrap();
        assert!(Simulation::new(cells, 8).pixel_size().is_err());
    }

    #[test]
    fn single_pixel_cells_have_no_gutter() {
        let cells = init::initialize("block", (2, 2), Placement::Center).unwrap();
        let mut sim = Simulation::new(cells, 1);

        let mut fb = Framebuffer::new(2, 2);
        sim.tick(&mut fb).unwrap();

        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(fb.pixel(x, y), Some(color::ALIVE));
        }
    }

    #[test]
    fn run_stops_on_quit() {
        let cells = init::initialize("glider", (8, 8), Placement::Center).unwrap();
        let mut sim = Simulation::new(cells, 2);

        let mut surface = QuitAfter {
            fb: Framebuffer::new(16, 16),
            frames: 5,
        };
        let generations = sim.run(&mut surface, RunOptions::default()).unwrap();

        assert_eq!(generations, 5);
        assert_eq!(surface.fb.frames(), 5);
    }

    #[test]
    fn run_stops_at_generation_limit() {
        let cells = init::initialize("toad", (6, 10), Placement::Center).unwrap();
        let before = cells.clone();
        let mut sim = Simulation::new(cells, 1);

        let mut fb = Framebuffer::new(10, 6);
        let opts = RunOptions {
            max_generations: Some(2),
            ..RunOptions::default()
        };

        assert_eq!(sim.run(&mut fb, opts).unwrap(), 2);
        assert_eq!(fb.frames(), 2);
        assert_ne!(sim.cells(), &before);
    }

    #[test]
    fn run_with_quit_requested_up_front() {
        let cells = init::initialize("block", (4, 4), Placement::Center).unwrap();
        let mut sim = Simulation::new(cells, 1);

        let mut fb = Framebuffer::new(4, 4);
        fb.request_quit();

        assert_eq!(sim.run(&mut fb, RunOptions::default()).unwrap(), 0);
        assert_eq!(fb.frames(), 0);
    }

    #[test]
    fn fps_to_delay() {
        let opts = RunOptions::default().with_fps(50);
        assert_eq!(opts.frame_delay, Some(std::time::Duration::from_millis(20)));

        let opts = RunOptions::default().with_fps(0);
        assert_eq!(opts.frame_delay, None);
    }
}
