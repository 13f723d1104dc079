use std::{
    fmt::{Display, Write},
    slice::Chunks,
    str::FromStr,
};

use itertools::Itertools;

use crate::Error;

/// A bounded board of cells. Everything outside `[0, width) x [0, height)` is
/// permanently dead.
///
/// Two buffers are kept so that a generation is always computed from the
/// previous one in full: `cells` is the current state, `next` is scratch space
/// that becomes current when [`Grid::advance`] swaps them.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    next: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            next: vec![false; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_alive(&self, x: isize, y: isize) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    pub fn set_alive(&mut self, x: isize, y: isize, alive: bool) -> Result<(), Error> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Flips a single cell and returns its new state.
    pub fn toggle(&mut self, x: isize, y: isize) -> Result<bool, Error> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    pub fn count_live_neighbors(&self, x: isize, y: isize) -> u8 {
        neighbours((x, y))
            .filter(|&(x, y)| self.is_alive(x, y))
            .count() as u8
    }

    /// Moves the board on by one generation and returns the new population.
    pub fn advance(&mut self) -> usize {
        let mut population = 0;
        for (y, x) in (0..self.height).cartesian_product(0..self.width) {
            let i = y * self.width + x;
            let alive = rule(self.cells[i], self.count_live_neighbors(x as isize, y as isize));
            self.next[i] = alive;
            population += usize::from(alive);
        }
        std::mem::swap(&mut self.cells, &mut self.next);
        population
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub(crate) fn fill_with(&mut self, alive: impl FnMut() -> bool) {
        self.cells.fill_with(alive);
    }

    pub fn live_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Live cells as `(x, y)`, in row-major order.
    pub fn living_cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.cells
            .iter()
            .positions(|&alive| alive)
            .map(|i| ((i % self.width) as isize, (i / self.width) as isize))
    }

    pub fn rows(&self) -> Chunks<'_, bool> {
        self.cells.chunks(self.width)
    }
}

impl Grid {
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    fn out_of_bounds(&self, x: isize, y: isize) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

fn rule(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2 | 3) | (false, 3))
}

fn neighbours((x, y): (isize, isize)) -> impl Iterator<Item = (isize, isize)> {
    (-1..=1)
        .cartesian_product(-1..=1)
        .filter(|&d| d != (0, 0))
        .filter_map(move |(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        // The scratch buffer is not part of the state.
        (self.width, self.height) == (other.width, other.height) && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect_vec();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or_default();
        let mut grid = Grid::new(width, rows.len())?;
        for (y, row) in rows.into_iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                match c {
                    '.' => (),
                    'o' | 'O' => grid.set_alive(x as isize, y as isize, true)?,
                    _ => return Err(Error::Parse(format!("Unexpected character {c}"))),
                }
            }
        }
        Ok(grid)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for &alive in row {
                f.write_char(if alive { 'o' } else { '.' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule() {
        for n in 0..=8 {
            assert_eq!(rule(true, n), n == 2 || n == 3, "live cell with {n}");
            assert_eq!(rule(false, n), n == 3, "dead cell with {n}");
        }
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, 0).is_err());
        let grid = Grid::new(7, 3).unwrap();
        assert_eq!((grid.width(), grid.height()), (7, 3));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_out_of_range_is_dead() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (y, x) in (0..3).cartesian_product(0..3) {
            grid.set_alive(x, y, true).unwrap();
        }
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (isize::MIN, isize::MAX)] {
            assert!(!grid.is_alive(x, y));
        }
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(4, 2).unwrap();
        assert_eq!(
            grid.set_alive(4, 0, true),
            Err(Error::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 2
            })
        );
        assert!(grid.set_alive(-1, 1, true).is_err());
        assert!(grid.toggle(0, 2).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.toggle(1, 1), Ok(true));
        assert!(grid.is_alive(1, 1));
        assert_eq!(grid.toggle(1, 1), Ok(false));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_neighbours_at_edges() {
        let grid = Grid::from_str(
            "
            ooo
            ooo
            ooo
            ",
        )
        .unwrap();
        assert_eq!(grid.count_live_neighbors(1, 1), 8);
        assert_eq!(grid.count_live_neighbors(0, 0), 3);
        assert_eq!(grid.count_live_neighbors(1, 0), 5);
        assert_eq!(grid.count_live_neighbors(-1, -1), 1);
        assert_eq!(grid.count_live_neighbors(10, 10), 0);
        assert_eq!(grid.count_live_neighbors(isize::MAX, 0), 0);
        assert_eq!(grid.count_live_neighbors(isize::MIN, isize::MAX), 0);
        assert_eq!(grid.count_live_neighbors(isize::MAX, isize::MIN), 0);
    }

    #[test]
    fn test_birth_and_survival() {
        let mut grid = Grid::from_str(
            "
            o.o
            ...
            .o.
            ",
        )
        .unwrap();
        // Only the centre has three neighbours; the corners starve.
        assert_eq!(grid.advance(), 1);
        assert_eq!(grid.to_string(), "...\n.o.\n...");
    }

    #[test]
    fn test_blinker_uses_previous_generation() {
        // Updating in place would let the first row's births feed the rest.
        let mut grid = Grid::from_str(
            "
            .....
            .....
            .ooo.
            .....
            .....
            ",
        )
        .unwrap();
        let start = grid.clone();
        assert_eq!(grid.advance(), 3);
        assert_eq!(grid.to_string(), ".....\n..o..\n..o..\n..o..\n.....");
        grid.advance();
        assert_eq!(grid, start);
    }

    #[test]
    fn test_advance_counts_population() {
        let mut grid = Grid::from_str(
            "
            oo..
            oo..
            ..oo
            ..oo
            ",
        )
        .unwrap();
        let population = grid.advance();
        assert_eq!(population, grid.live_cell_count());
        assert_eq!(population, 6);
        grid.clear();
        assert_eq!(grid.live_cell_count(), 0);
        assert_eq!((grid.width(), grid.height()), (4, 4));
    }

    #[test]
    fn test_living_cells_row_major() {
        let grid = Grid::from_str(
            "
            .o.
            o..
            ..o
            ",
        )
        .unwrap();
        assert_eq!(grid.living_cells().collect_vec(), [(1, 0), (0, 1), (2, 2)]);
    }

    #[test]
    fn test_text_round_trip() {
        let text = "o..\n.o.\n...";
        assert_eq!(Grid::from_str(text).unwrap().to_string(), text);
        // Short rows are padded with dead cells.
        assert_eq!(Grid::from_str("o\n.o.").unwrap().to_string(), "o..\n.o.");
        assert!(matches!(Grid::from_str("ox"), Err(Error::Parse(_))));
        assert!(matches!(
            Grid::from_str("\n  \n"),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}
