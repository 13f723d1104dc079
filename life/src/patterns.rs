//! The built-in pattern catalog.
//!
//! Every pattern is stored as `(dx, dy)` offsets with its bounding box
//! starting at `(0, 0)`, so placing it at an anchor puts its top-left corner
//! there.

use std::fmt::Display;

use crate::{Error, Grid};

use Category::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    StillLife,
    Oscillator,
    Spaceship,
    Generator,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::StillLife => "still life",
            Category::Oscillator => "oscillator",
            Category::Spaceship => "spaceship",
            Category::Generator => "generator",
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub category: Category,
    pub cells: &'static [(isize, isize)],
}

impl Pattern {
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(dx, _)| dx + 1).max().unwrap_or_default() as usize
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(_, dy)| dy + 1).max().unwrap_or_default() as usize
    }

    /// Sets the pattern's cells alive with its top-left corner at the anchor.
    /// Cells that land outside the grid are dropped. Returns how many cells
    /// made it onto the grid.
    pub fn place(&self, grid: &mut Grid, anchor_x: isize, anchor_y: isize) -> usize {
        self.cells
            .iter()
            .filter_map(|&(dx, dy)| {
                Some((anchor_x.checked_add(dx)?, anchor_y.checked_add(dy)?))
            })
            .filter(|&(x, y)| grid.set_alive(x, y, true).is_ok())
            .count()
    }
}

// Ordered by category, then by name.
#[rustfmt::skip]
static CATALOG: [Pattern; 11] = [
    Pattern {
        name: "beehive",
        category: StillLife,
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
    },
    Pattern {
        name: "block",
        category: StillLife,
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "boat",
        category: StillLife,
        cells: &[(0, 0), (1, 0), (0, 1), (2, 1), (1, 2)],
    },
    Pattern {
        name: "loaf",
        category: StillLife,
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (3, 2), (2, 3)],
    },
    Pattern {
        name: "beacon",
        category: Oscillator,
        cells: &[(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "blinker",
        category: Oscillator,
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "pulsar",
        category: Oscillator,
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "toad",
        category: Oscillator,
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "glider",
        category: Spaceship,
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "lightweight-spaceship",
        category: Spaceship,
        cells: &[
            (1, 0), (4, 0),
            (0, 1),
            (0, 2), (4, 2),
            (0, 3), (1, 3), (2, 3), (3, 3),
        ],
    },
    Pattern {
        name: "glider-gun",
        category: Generator,
        cells: &[
            // Left block
            (0, 4), (1, 4), (0, 5), (1, 5),
            // Left ship
            (10, 4), (10, 5), (10, 6),
            (11, 3), (11, 7),
            (12, 2), (12, 8),
            (13, 2), (13, 8),
            (14, 5),
            (15, 3), (15, 7),
            (16, 4), (16, 5), (16, 6),
            (17, 5),
            // Right ship
            (20, 2), (20, 3), (20, 4),
            (21, 2), (21, 3), (21, 4),
            (22, 1), (22, 5),
            (24, 0), (24, 1), (24, 5), (24, 6),
            // Right block
            (34, 2), (35, 2), (34, 3), (35, 3),
        ],
    },
];

static ALIASES: [(&str, &str); 4] = [
    ("lwss", "lightweight-spaceship"),
    ("gun", "glider-gun"),
    ("gosper-glider-gun", "glider-gun"),
    ("gosper-gun", "glider-gun"),
];

pub fn all() -> &'static [Pattern] {
    &CATALOG
}

pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|pattern| pattern.name)
}

/// Finds a pattern by name, ignoring case. Spaces and underscores count as
/// hyphens, and a few short aliases (`lwss`, `gun`) are accepted.
pub fn lookup(name: &str) -> Result<&'static Pattern, Error> {
    let key: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    let key = ALIASES
        .iter()
        .find(|&&(alias, _)| alias == key)
        .map_or(key.as_str(), |&(_, name)| name);
    CATALOG
        .iter()
        .find(|pattern| pattern.name == key)
        .ok_or_else(|| Error::NotFound(name.to_owned()))
}

pub fn place(pattern: &Pattern, grid: &mut Grid, anchor_x: isize, anchor_y: isize) -> usize {
    pattern.place(grid, anchor_x, anchor_y)
}
