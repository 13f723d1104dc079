use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use log::{debug, info, trace};
use rand::Rng;

use crate::{Error, Grid, patterns};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
    Stopped,
}

/// Counters after a generation has been computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub generation: u64,
    pub live_cells: usize,
}

/// A flag shared with whoever may want a run to end early, such as a Ctrl+C
/// handler. It is only ever looked at between two generations.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns the grid for one session and keeps the generation counter in step
/// with it.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    grid: Option<Grid>,
    generation: u64,
    live_cells: usize,
    stopped: bool,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: usize, height: usize) -> Result<Self, Error> {
        let mut simulation = Self::new();
        simulation.reset(width, height)?;
        Ok(simulation)
    }

    /// Starts over on a fresh, empty grid. On failure nothing changes.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<(), Error> {
        let grid = Grid::new(width, height)?;
        debug!("reset to an empty {width}x{height} grid");
        *self = Self {
            grid: Some(grid),
            ..Self::default()
        };
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        match (&self.grid, self.stopped) {
            (None, _) => Phase::Uninitialized,
            (Some(_), false) => Phase::Ready,
            (Some(_), true) => Phase::Stopped,
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            live_cells: self.live_cells,
        }
    }

    pub fn randomize(&mut self, probability: f64) -> Result<(), Error> {
        self.randomize_with(probability, &mut rand::thread_rng())
    }

    /// Fills every cell independently, alive with the given probability. The
    /// result is a new starting point, so the generation counter goes back to
    /// zero.
    pub fn randomize_with<R: Rng + ?Sized>(
        &mut self,
        probability: f64,
        rng: &mut R,
    ) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidProbability(probability));
        }
        let grid = self.grid_mut()?;
        grid.fill_with(|| rng.gen_bool(probability));
        self.live_cells = grid.live_cell_count();
        self.generation = 0;
        debug!(
            "randomized with p={probability}, {} cells alive",
            self.live_cells
        );
        Ok(())
    }

    /// Adds a catalog pattern on top of whatever is already on the grid.
    /// Returns how many of its cells fit.
    pub fn load_pattern(
        &mut self,
        name: &str,
        anchor_x: isize,
        anchor_y: isize,
    ) -> Result<usize, Error> {
        let pattern = patterns::lookup(name)?;
        let grid = self.grid_mut()?;
        let placed = pattern.place(grid, anchor_x, anchor_y);
        self.live_cells = grid.live_cell_count();
        debug!(
            "placed {placed}/{} cells of {} at ({anchor_x}, {anchor_y})",
            pattern.cells.len(),
            pattern.name
        );
        Ok(placed)
    }

    pub fn toggle(&mut self, x: isize, y: isize) -> Result<bool, Error> {
        let grid = self.grid_mut()?;
        let alive = grid.toggle(x, y)?;
        self.live_cells = grid.live_cell_count();
        Ok(alive)
    }

    /// Kills every cell and starts counting generations from zero again.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.grid_mut()?.clear();
        self.generation = 0;
        self.live_cells = 0;
        Ok(())
    }

    pub fn step(&mut self) -> Result<Snapshot, Error> {
        if self.stopped {
            return Err(Error::Stopped);
        }
        self.live_cells = self.grid_mut()?.advance();
        self.generation += 1;
        trace!(
            "generation {}: {} cells alive",
            self.generation,
            self.live_cells
        );
        Ok(self.snapshot())
    }

    /// Steps up to `n` times, lazily, one generation per item.
    pub fn run(&mut self, n: u64) -> Result<Run<'_>, Error> {
        match self.phase() {
            Phase::Uninitialized => Err(Error::Uninitialized),
            Phase::Stopped => Err(Error::Stopped),
            Phase::Ready => Ok(Run {
                simulation: self,
                remaining: n,
                cancel: None,
            }),
        }
    }

    pub fn stop(&mut self) {
        if self.grid.is_some() {
            self.stopped = true;
        }
    }

    pub fn resume(&mut self) -> Result<(), Error> {
        if self.grid.is_none() {
            return Err(Error::Uninitialized);
        }
        self.stopped = false;
        Ok(())
    }
}

impl Simulation {
    fn grid_mut(&mut self) -> Result<&mut Grid, Error> {
        self.grid.as_mut().ok_or(Error::Uninitialized)
    }
}

/// Iterator returned by [`Simulation::run`].
pub struct Run<'a> {
    simulation: &'a mut Simulation,
    remaining: u64,
    cancel: Option<CancelToken>,
}

impl Run<'_> {
    /// Ends the run before the next generation once `token` is cancelled.
    /// The simulation is left stopped.
    pub fn cancel_on(self, token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
            ..self
        }
    }

    pub fn simulation(&self) -> &Simulation {
        self.simulation
    }
}

impl Iterator for Run<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            info!(
                "run cancelled after generation {}",
                self.simulation.generation
            );
            self.simulation.stop();
            self.remaining = 0;
            return None;
        }
        let snapshot = self.simulation.step().ok()?;
        self.remaining -= 1;
        Some(snapshot)
    }
}
