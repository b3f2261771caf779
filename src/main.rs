use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use life::catalog;
use life::init;
use life::init::Placement;
use life::rule_set::B3S23;
use life::sim::RunOptions;
use life::sim::Simulation;
use life::term::TerminalSurface;

/// Conway's Game of Life with starting pattern.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Config {
    /// Enter the starting pattern, e.g. 'glider', or 'random' for noise
    #[arg(required_unless_present = "list")]
    startingpattern: Option<String>,

    /// Grid dimensions expressed as ROWSxCOLS, or a single number for a square grid.
    #[arg(long, value_name = "ROWSxCOLS", default_value_t = GridSize::default())]
    grid_size: GridSize,

    /// Side of a cell in pixels.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    cell_size: u32,

    /// Where to put the pattern: 'center', 'top-left' or ROW,COL.
    #[arg(long, default_value_t = Placement::Center)]
    placement: Placement,

    /// Seed for 'random', to get the same grid on every run.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second. 0 runs as fast as possible.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Quit on its own after this many generations.
    #[arg(long, value_name = "COUNT")]
    generations: Option<u64>,

    /// Print the known patterns and exit.
    #[arg(long)]
    list: bool,
}

/// Grid dimensions parsed from a ROWSxCOLS command-line argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GridSize {
    rows: usize,
    cols: usize,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            rows: 120,
            cols: 120,
        }
    }
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse = |s: &str, what: &str| {
            s.trim()
                .parse::<usize>()
                .map_err(|error| format!("invalid {what}: {error}"))
        };

        let (rows, cols) = match value.split_once(['x', 'X']) {
            Some((rows, cols)) => (parse(rows, "rows")?, parse(cols, "columns")?),
            None => {
                let n = parse(value, "size")?;
                (n, n)
            }
        };

        if rows == 0 || cols == 0 {
            return Err("grid dimensions must be positive".to_string());
        }

        if rows.checked_mul(cols).is_none_or(|n| n > init::MAX_CELLS) {
            return Err(format!(
                "a {rows}x{cols} grid has more than {} cells",
                init::MAX_CELLS
            ));
        }

        Ok(Self { rows, cols })
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn print_catalog() {
    for category in catalog::categories() {
        println!("{category}:");

        for entry in catalog::in_category(category) {
            if entry.is_reserved() {
                println!("  {} (not implemented)", entry.name);
            } else {
                println!("  {}  {}", entry.name, entry.rle);
            }
        }
    }

    println!("{}", init::RANDOM);
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    if config.list {
        print_catalog();
        return Ok(());
    }

    let name = config
        .startingpattern
        .as_deref()
        .context("A starting pattern is required")?;

    let size = (config.grid_size.rows, config.grid_size.cols);
    let cells = match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            init::initialize_with_rng(name, size, config.placement, &mut rng)
        }
        None => init::initialize(name, size, config.placement),
    }
    .with_context(|| format!("Failed to set up starting pattern '{name}'"))?;

    info!(pattern = name, rule = %B3S23, grid = %config.grid_size, "initialized");

    let mut sim = Simulation::new(cells, config.cell_size);
    let (w, h) = sim
        .pixel_size()
        .context("Try a smaller --grid-size or --cell-size")?;

    let opts = RunOptions {
        max_generations: config.generations,
        ..RunOptions::default()
    }
    .with_fps(config.fps);

    let generations = {
        let mut surface = TerminalSurface::create(w, h).context("Failed to set up the terminal")?;
        sim.run(&mut surface, opts).context("Failed to render")?
    };

    info!(generations, "done");

    Ok(())
}
