use std::{
    io::{BufRead, Write},
    thread,
    time::Duration,
};

use anyhow::Result;
use itertools::Itertools;
use life::{CancelToken, Phase, Simulation, patterns};
use log::{info, warn};

use crate::display::{CLEAR_SCREEN, Console, Style};

/// How a timed run came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed(u64),
    Extinct(u64),
    Cancelled(u64),
}

/// Drives a [`Simulation`] from the terminal: renders frames, waits between
/// generations and answers the menu.
pub struct Driver<W> {
    simulation: Simulation,
    console: Console,
    delay: Duration,
    cancel: CancelToken,
    out: W,
    status: Option<String>,
}

impl<W: Write> Driver<W> {
    pub fn new(
        simulation: Simulation,
        console: Console,
        delay: Duration,
        cancel: CancelToken,
        out: W,
    ) -> Self {
        Self {
            simulation,
            console,
            delay,
            cancel,
            out,
            status: None,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs without asking anything, for `generations` steps or forever.
    pub fn run_automatic(&mut self, generations: Option<u64>) -> Result<Outcome> {
        self.render()?;
        let outcome = self.run(generations)?;
        let message = match outcome {
            Outcome::Completed(n) => format!("Completed {n} generations."),
            Outcome::Extinct(n) => {
                format!("Simulation ended after {n} generations - no living cells.")
            }
            Outcome::Cancelled(n) => format!("Simulation stopped after {n} generations."),
        };
        writeln!(self.out, "\n{message}")?;
        Ok(outcome)
    }

    /// Shows the menu until the user quits or the input runs out.
    pub fn run_interactive(&mut self, input: &mut impl BufRead) -> Result<()> {
        loop {
            self.render()?;
            writeln!(self.out)?;
            if let Some(status) = self.status.take() {
                writeln!(self.out, "{status}\n")?;
            }
            writeln!(self.out, "Options:")?;
            writeln!(self.out, "  1. Start simulation")?;
            writeln!(self.out, "  2. Step once")?;
            writeln!(self.out, "  3. Clear grid")?;
            writeln!(self.out, "  4. Randomize grid")?;
            writeln!(self.out, "  5. Load pattern")?;
            writeln!(self.out, "  6. Settings")?;
            writeln!(self.out, "  q. Quit")?;
            let Some(choice) = self.prompt(input, "\nEnter your choice: ")? else {
                return Ok(());
            };
            match choice.to_lowercase().as_str() {
                "q" | "quit" => return Ok(()),
                "1" => {
                    let outcome = self.run(None)?;
                    self.status = Some(match outcome {
                        Outcome::Extinct(_) => "Simulation ended - no living cells remaining.",
                        _ => "Simulation stopped by user.",
                    }
                    .to_owned());
                }
                "2" => {
                    self.simulation.resume()?;
                    self.report(|sim| sim.step().map(drop));
                }
                "3" => self.report(Simulation::clear),
                "4" => self.randomize(input)?,
                "5" => self.load_pattern(input)?,
                "6" => self.settings(input)?,
                _ => self.status = Some(format!("Invalid choice {choice:?}.")),
            }
        }
    }
}

impl<W: Write> Driver<W> {
    /// Steps until `generations` is reached, the board dies out or the
    /// cancel token fires, rendering every generation.
    fn run(&mut self, generations: Option<u64>) -> Result<Outcome> {
        self.cancel.reset();
        self.simulation.resume()?;
        let Self {
            simulation,
            console,
            delay,
            cancel,
            out,
            ..
        } = self;
        let mut run = simulation
            .run(generations.unwrap_or(u64::MAX))?
            .cancel_on(cancel.clone());
        let mut steps = 0;
        loop {
            if run.simulation().snapshot().live_cells == 0 {
                return Ok(Outcome::Extinct(steps));
            }
            let Some(snapshot) = run.next() else {
                break;
            };
            steps += 1;
            if let Some(grid) = run.simulation().grid() {
                write!(out, "{CLEAR_SCREEN}{}", console.frame(grid, snapshot))?;
                out.flush()?;
            }
            thread::sleep(*delay);
        }
        if simulation.phase() == Phase::Stopped {
            info!("stopped by user after {steps} generations");
            return Ok(Outcome::Cancelled(steps));
        }
        Ok(Outcome::Completed(steps))
    }

    fn render(&mut self) -> Result<()> {
        if let Some(grid) = self.simulation.grid() {
            let frame = self.console.frame(grid, self.simulation.snapshot());
            write!(self.out, "{CLEAR_SCREEN}{frame}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, input: &mut impl BufRead, question: &str) -> Result<Option<String>> {
        write!(self.out, "{question}")?;
        self.out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Applies an edit and keeps its error, if any, for the next menu.
    fn report(&mut self, edit: impl FnOnce(&mut Simulation) -> Result<(), life::Error>) {
        if let Err(err) = edit(&mut self.simulation) {
            warn!("{err}");
            self.status = Some(format!("Error: {err}"));
        }
    }

    fn randomize(&mut self, input: &mut impl BufRead) -> Result<()> {
        let answer = self.prompt(input, "Enter probability (0.0-1.0, default 0.3): ")?;
        let probability = match answer.as_deref() {
            None | Some("") => 0.3,
            Some(text) => match text.parse() {
                Ok(p) => p,
                Err(_) => {
                    self.status = Some(format!("Invalid probability {text:?}."));
                    return Ok(());
                }
            },
        };
        self.report(|sim| sim.randomize(probability));
        Ok(())
    }

    fn load_pattern(&mut self, input: &mut impl BufRead) -> Result<()> {
        writeln!(self.out, "\nAvailable patterns:")?;
        for (i, pattern) in patterns::all().iter().enumerate() {
            writeln!(
                self.out,
                "{:>2}. {} ({})",
                i + 1,
                pattern.name,
                pattern.category
            )?;
        }
        let Some(choice) = self.prompt(input, "\nSelect pattern (number or name): ")? else {
            return Ok(());
        };
        let name = match choice.parse::<usize>() {
            Ok(i) if (1..=patterns::all().len()).contains(&i) => patterns::all()[i - 1].name,
            _ => choice.as_str(),
        };
        let Some(grid) = self.simulation.grid() else {
            return Ok(());
        };
        let (cx, cy) = (grid.width() as isize / 2, grid.height() as isize / 2);
        let question = format!("Enter X position (default {cx}): ");
        let Some(x) = self.prompt_number(input, &question, cx)? else {
            return Ok(());
        };
        let question = format!("Enter Y position (default {cy}): ");
        let Some(y) = self.prompt_number(input, &question, cy)? else {
            return Ok(());
        };
        match self.simulation.load_pattern(name, x, y) {
            Ok(placed) => {
                self.status = Some(format!("Pattern '{name}' placed at ({x}, {y}), {placed} cells."));
            }
            Err(err) => {
                warn!("{err}");
                self.status = Some(format!(
                    "Error: {err}. Available patterns: {}",
                    patterns::names().join(", ")
                ));
            }
        }
        Ok(())
    }

    fn settings(&mut self, input: &mut impl BufRead) -> Result<()> {
        loop {
            let (width, height) = self
                .simulation
                .grid()
                .map_or((0, 0), |grid| (grid.width(), grid.height()));
            writeln!(self.out, "\nSettings")?;
            writeln!(self.out, "Current delay: {} seconds", self.delay.as_secs_f64())?;
            writeln!(self.out, "Grid size: {width}x{height}")?;
            writeln!(self.out, "Display: {:?}", self.console.style)?;
            writeln!(self.out, "\n1. Change delay")?;
            writeln!(self.out, "2. Change grid size")?;
            writeln!(self.out, "3. Toggle color display")?;
            writeln!(self.out, "4. Toggle coordinates")?;
            writeln!(self.out, "b. Back to main menu")?;
            let Some(choice) = self.prompt(input, "\nEnter your choice: ")? else {
                return Ok(());
            };
            match choice.to_lowercase().as_str() {
                "b" | "back" => return Ok(()),
                "1" => {
                    let answer = self.prompt(input, "Enter new delay in seconds: ")?;
                    let delay = answer
                        .as_deref()
                        .and_then(|answer| answer.parse().ok())
                        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
                    match delay {
                        Some(delay) => self.delay = delay,
                        None => writeln!(self.out, "Delay must be a non-negative number.")?,
                    }
                }
                "2" => {
                    let Some(width) = self.prompt_number(input, "Enter new width: ", width)? else {
                        return Ok(());
                    };
                    let Some(height) = self.prompt_number(input, "Enter new height: ", height)?
                    else {
                        return Ok(());
                    };
                    if let Err(err) = self.simulation.reset(width, height) {
                        writeln!(self.out, "Error: {err}")?;
                    }
                }
                "3" => {
                    self.console.style = match self.console.style {
                        Style::Console => Style::Color,
                        Style::Color => Style::Console,
                    };
                }
                "4" => self.console.coordinates = !self.console.coordinates,
                _ => writeln!(self.out, "Invalid choice {choice:?}.")?,
            }
        }
    }

    /// Reads a number, falling back to `default` on an empty answer and
    /// asking again on garbage. `None` means the input ran out.
    fn prompt_number<T: std::str::FromStr + Copy>(
        &mut self,
        input: &mut impl BufRead,
        question: &str,
        default: T,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(input, question)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Invalid number {answer:?}.")?,
            }
        }
    }
}
