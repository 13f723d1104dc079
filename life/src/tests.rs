use std::{collections::HashSet, str::FromStr};

use itertools::Itertools;

use crate::{Category, Grid, Simulation, patterns};

const GLIDER: [&'static str; 5] = [
    "
    .o....
    ..o...
    ooo...
    ......
    ......
    ......",
    "
    ......
    o.o...
    .oo...
    .o....
    ......
    ......",
    "
    ......
    ..o...
    o.o...
    .oo...
    ......
    ......",
    "
    ......
    .o....
    ..oo..
    .oo...
    ......
    ......",
    "
    ......
    ..o...
    ...o..
    .ooo..
    ......
    ......",
];

fn dedent(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("\n")
}

fn cells(grid: &Grid) -> HashSet<(isize, isize)> {
    grid.living_cells().collect()
}

fn shifted(cells: &HashSet<(isize, isize)>, (dx, dy): (isize, isize)) -> HashSet<(isize, isize)> {
    cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
}

fn with_pattern(width: usize, height: usize, name: &str, at: (isize, isize)) -> Simulation {
    let mut sim = Simulation::with_size(width, height).unwrap();
    sim.load_pattern(name, at.0, at.1).unwrap();
    sim
}

mod grid {
    use super::*;

    #[test]
    fn test_glider_phases() {
        for (a, b) in GLIDER.into_iter().tuple_windows() {
            let mut grid = Grid::from_str(a).unwrap();
            grid.advance();
            assert_eq!(grid.to_string(), dedent(b));
        }
    }

    #[test]
    fn test_blinker_round_trip() {
        let start = Grid::from_str(
            "
            .....
            .....
            .ooo.
            .....
            .....",
        )
        .unwrap();
        let mut grid = start.clone();
        grid.advance();
        assert_ne!(grid, start);
        assert_eq!(
            grid.living_cells().collect_vec(),
            [(2, 1), (2, 2), (2, 3)]
        );
        grid.advance();
        assert_eq!(grid, start);
    }

    #[test]
    fn test_blinker_against_the_wall() {
        // Half of the horizontal phase would be off the board.
        let mut grid = Grid::from_str(
            "
            o..
            o..
            o..",
        )
        .unwrap();
        assert_eq!(grid.advance(), 2);
        assert_eq!(grid.to_string(), "...\noo.\n...");
        assert_eq!(grid.advance(), 0);
    }

    #[test]
    fn test_glider_crashes_into_corner() {
        let mut grid = Grid::new(8, 8).unwrap();
        patterns::place(patterns::lookup("glider").unwrap(), &mut grid, 2, 2);
        for _ in 0..40 {
            grid.advance();
        }
        assert_eq!(grid.living_cells().collect_vec(), [(6, 6), (7, 6), (6, 7), (7, 7)]);
    }
}

mod catalog {
    use super::*;

    #[test]
    fn test_block_anywhere_is_still() {
        for at in [(0, 0), (3, 7), (8, 8)] {
            let mut sim = with_pattern(10, 10, "block", at);
            let start = sim.grid().unwrap().clone();
            for _ in 0..20 {
                assert_eq!(sim.step().unwrap().live_cells, 4);
            }
            assert_eq!(sim.grid(), Some(&start));
        }
    }

    #[test]
    fn test_still_lifes() {
        for pattern in patterns::all().iter().filter(|p| p.category == Category::StillLife) {
            let mut sim = with_pattern(10, 10, pattern.name, (3, 3));
            let start = sim.grid().unwrap().clone();
            sim.run(5).unwrap().for_each(drop);
            assert_eq!(sim.grid(), Some(&start), "{}", pattern.name);
        }
    }

    #[test]
    fn test_oscillator_periods() {
        for (name, period) in [("blinker", 2), ("toad", 2), ("beacon", 2), ("pulsar", 3)] {
            let mut sim = with_pattern(20, 20, name, (3, 3));
            let start = sim.grid().unwrap().clone();
            sim.step().unwrap();
            assert_ne!(sim.grid(), Some(&start), "{name}");
            sim.run(period - 1).unwrap().for_each(drop);
            assert_eq!(sim.grid(), Some(&start), "{name}");
        }
    }

    #[test]
    fn test_glider_moves_diagonally() {
        let mut sim = with_pattern(20, 20, "glider", (5, 5));
        let start = cells(sim.grid().unwrap());
        let last = sim.run(4).unwrap().last().unwrap();
        assert_eq!(last.generation, 4);
        assert_eq!(last.live_cells, 5);
        assert_eq!(cells(sim.grid().unwrap()), shifted(&start, (1, 1)));
    }

    #[test]
    fn test_lightweight_spaceship_moves_left() {
        let mut sim = with_pattern(40, 15, "lwss", (20, 5));
        let start = cells(sim.grid().unwrap());
        sim.run(4).unwrap().for_each(drop);
        assert_eq!(cells(sim.grid().unwrap()), shifted(&start, (-2, 0)));
    }

    #[test]
    fn test_glider_gun_fires_every_30_generations() {
        let mut sim = with_pattern(80, 60, "glider-gun", (1, 1));
        let gun = cells(sim.grid().unwrap());
        let populations = (0..3)
            .map(|_| sim.run(30).unwrap().last().unwrap().live_cells)
            .collect_vec();
        assert_eq!(populations, [41, 46, 51]);
        assert!(gun.is_subset(&cells(sim.grid().unwrap())));
    }
}
