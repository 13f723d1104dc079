mod display;
mod driver;

use std::{io, time::Duration};

use anyhow::{Context, bail, ensure};
use clap::Parser;
use itertools::Itertools;
use life::{CancelToken, Simulation, patterns};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    display::{Console, Style},
    driver::Driver,
};

/// Conway's Game of Life in the terminal.
///
/// Without `--auto` a menu lets you step, run, edit and resize the board.
/// Ctrl+C stops a running simulation between two generations.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Width of the grid.
    #[arg(long, default_value_t = 50)]
    width: usize,
    /// Height of the grid.
    #[arg(long, default_value_t = 25)]
    height: usize,
    /// Seconds to wait between generations.
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    delay: f64,
    #[arg(long, value_enum, default_value_t = Style::Console)]
    display: Style,
    /// Draw the grid without the surrounding frame.
    #[arg(long)]
    no_border: bool,
    /// Label rows and columns with their coordinates.
    #[arg(long)]
    coordinates: bool,
    /// Start from a named pattern (glider, blinker, block, lwss, gun, ...).
    #[arg(long, conflicts_with = "random")]
    pattern: Option<String>,
    /// Column of the pattern's top-left corner; defaults to the centre.
    #[arg(long, requires = "pattern", allow_hyphen_values = true)]
    x: Option<isize>,
    /// Row of the pattern's top-left corner; defaults to the centre.
    #[arg(long, requires = "pattern", allow_hyphen_values = true)]
    y: Option<isize>,
    /// Start from a random board.
    #[arg(long)]
    random: bool,
    /// Chance of each cell being alive with --random.
    #[arg(long, default_value_t = 0.3)]
    probability: f64,
    /// Seed for --random, for repeatable boards.
    #[arg(long, requires = "random")]
    seed: Option<u64>,
    /// Run without the menu.
    #[arg(long)]
    auto: bool,
    /// Stop --auto after this many generations.
    #[arg(long, requires = "auto")]
    generations: Option<u64>,
}

impl Args {
    fn delay(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.delay).with_context(|| {
            format!("delay must be a non-negative number of seconds, got {}", self.delay)
        })
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "width and height must be positive integers"
        );
        ensure!(
            (0.0..=1.0).contains(&self.probability),
            "probability must be between 0.0 and 1.0"
        );
        self.delay()?;
        Ok(())
    }

    fn simulation(&self) -> anyhow::Result<Simulation> {
        let mut simulation = Simulation::with_size(self.width, self.height)?;
        if self.random {
            match self.seed {
                Some(seed) => simulation
                    .randomize_with(self.probability, &mut StdRng::seed_from_u64(seed))?,
                None => simulation.randomize(self.probability)?,
            }
        } else if let Some(name) = &self.pattern {
            let x = self.x.unwrap_or(self.width as isize / 2);
            let y = self.y.unwrap_or(self.height as isize / 2);
            if let Err(err) = simulation.load_pattern(name, x, y) {
                bail!(
                    "{err}; available patterns: {}",
                    patterns::names().join(", ")
                );
            }
        }
        Ok(simulation)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    args.validate()?;
    let simulation = args.simulation()?;

    let cancel = CancelToken::new();
    let handler = cancel.clone();
    ctrlc::set_handler(move || handler.cancel()).context("installing the Ctrl+C handler")?;

    let console = Console {
        style: args.display,
        border: !args.no_border,
        coordinates: args.coordinates,
        ..Console::default()
    };
    let delay = args.delay()?;
    let mut driver = Driver::new(simulation, console, delay, cancel, io::stdout().lock());
    if args.auto {
        driver.run_automatic(args.generations)?;
    } else {
        driver.run_interactive(&mut io::stdin().lock())?;
    }
    log::info!("finished at {:?}", driver.simulation().snapshot());
    Ok(())
}
