use std::fmt::{self, Display, Formatter, Write};

use life::{Grid, Snapshot};

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const RESET: &str = "\x1b[0m";
const BLACK: &str = "\x1b[30m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Style {
    /// Plain glyphs.
    Console,
    /// ANSI colors.
    Color,
}

#[derive(Clone, Copy, Debug)]
pub struct Console {
    pub style: Style,
    pub border: bool,
    /// Label rows on both sides and columns along the top.
    pub coordinates: bool,
    pub alive: char,
    pub dead: char,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            style: Style::Console,
            border: true,
            coordinates: false,
            alive: '█',
            dead: ' ',
        }
    }
}

impl Console {
    pub fn frame<'a>(&'a self, grid: &'a Grid, snapshot: Snapshot) -> Frame<'a> {
        Frame {
            console: self,
            grid,
            snapshot,
        }
    }

    fn paint(&self, f: &mut Formatter<'_>, color: &str, text: impl Display) -> fmt::Result {
        match self.style {
            Style::Console => write!(f, "{text}"),
            Style::Color => write!(f, "{color}{text}{RESET}"),
        }
    }
}

/// Stats header followed by the board, ready to be printed.
pub struct Frame<'a> {
    console: &'a Console,
    grid: &'a Grid,
    snapshot: Snapshot,
}

impl Display for Frame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Frame {
            console,
            grid,
            snapshot,
        } = self;
        console.paint(f, CYAN, format_args!("Generation: {}", snapshot.generation))?;
        f.write_char('\n')?;
        console.paint(f, YELLOW, format_args!("Living cells: {}", snapshot.live_cells))?;
        f.write_char('\n')?;
        console.paint(
            f,
            BLUE,
            format_args!("Grid size: {}x{}", grid.width(), grid.height()),
        )?;
        f.write_str("\n\n")?;

        // Row labels are right-aligned in a gutter at least two digits wide.
        let label = match console.coordinates {
            true => grid.height().saturating_sub(1).to_string().len().max(2),
            false => 0,
        };
        let gutter = " ".repeat(if console.coordinates { label + 1 } else { 0 });
        if console.coordinates {
            f.write_str(&gutter)?;
            if console.border {
                f.write_char(' ')?;
            }
            for x in 0..grid.width() {
                write!(f, "{}", x % 10)?;
            }
            f.write_char('\n')?;
        }
        let edge = format!("+{}+", "-".repeat(grid.width()));
        if console.border {
            f.write_str(&gutter)?;
            console.paint(f, WHITE, &edge)?;
            f.write_char('\n')?;
        }
        for (y, row) in grid.rows().enumerate() {
            if console.coordinates {
                write!(f, "{y:>label$} ")?;
            }
            if console.border {
                console.paint(f, WHITE, '|')?;
            }
            for &alive in row {
                match alive {
                    true => console.paint(f, GREEN, console.alive)?,
                    false => console.paint(f, BLACK, console.dead)?,
                }
            }
            if console.border {
                console.paint(f, WHITE, '|')?;
            }
            if console.coordinates {
                write!(f, " {y}")?;
            }
            f.write_char('\n')?;
        }
        if console.border {
            f.write_str(&gutter)?;
            console.paint(f, WHITE, &edge)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}
