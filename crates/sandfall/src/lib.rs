//! Falling sand cave simulation.
//!
//! Rock scans are rasterized into a grid, then sand units are dropped one at
//! a time from a fixed source until one falls out of the cave (open floor) or
//! the source itself is buried (closed floor).

pub mod api;
pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod parse;
pub mod render;
pub mod rock;
pub mod settle;
pub mod sim;


pub use cell::Cell;
pub use config::SimConfig;
pub use coord::Coordinate;
pub use error::SimError;
pub use settle::Outcome;
pub use sim::{RunReport, Simulation, Termination, Variant};

use log::debug;

/// Largest grid `Grid::build` will allocate.
pub const MAX_CELLS: usize = 1 << 28;

/// Dense 2D grid of cells, addressed by `Coordinate`.
///
/// Storage is row-major and offset by `min_horizontal`, so column 0 holds the
/// leftmost provisioned horizontal. Out-of-bounds access is an error.
#[derive(Clone, Debug)]
pub struct Grid {
    min_horizontal: i32,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    source: Coordinate,
    max_depth: i32,
    floor_gap: i32,
    floor_depth: Option<i32>,
}

impl Grid {
    /// All-air grid covering `width` columns from `min_horizontal` and depths `0..height`.
    /// The source cell is marked if it falls inside.
    #[must_use]
    pub fn with_bounds(
        min_horizontal: i32,
        width: usize,
        height: usize,
        source: Coordinate,
    ) -> Self {
        let mut grid = Self {
            min_horizontal,
            width,
            height,
            cells: vec![Cell::Air; width * height],
            source,
            max_depth: 0,
            floor_gap: config::DEFAULT_FLOOR_GAP,
            floor_depth: None,
        };
        if let Some(i) = grid.index(source) {
            grid.cells[i] = Cell::Source;
        }
        grid
    }

    /// Provision a grid for `paths` and place their rock.
    ///
    /// The grid is tall enough for a floor `config.floor_gap` rows below the
    /// deepest rock, and wide enough for every cell a unit dropped from the
    /// source could reach before hitting that floor, plus all rock.
    ///
    /// # Errors
    ///
    /// `SimError::Config` for a rejected configuration or a source on rock,
    /// `SimError::TooLarge` past `MAX_CELLS`, `SimError::InvalidPath` for a
    /// diagonal segment, `SimError::OutOfBounds` for rock above row 0.
    pub fn build(paths: &[rock::RockPath], config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let max_depth = rock::max_depth(paths);
        let source = config.source;

        // Sized in i64 from the vertices alone, before any segment is expanded.
        let gap = i64::from(config.floor_gap.max(2));
        let deepest_row = i64::from(max_depth.max(source.depth)) + gap;
        let reach = deepest_row - i64::from(source.depth);
        let (min_h, max_h) = paths.iter().flatten().fold(
            (i64::from(source.horizontal) - reach, i64::from(source.horizontal) + reach),
            |(lo, hi), c| (lo.min(i64::from(c.horizontal)), hi.max(i64::from(c.horizontal))),
        );
        let (width, height) = (max_h - min_h + 1, deepest_row + 1);
        if width.saturating_mul(height) > MAX_CELLS as i64 {
            return Err(SimError::TooLarge { width, height });
        }
        // Neighbours of every provisioned cell must stay representable.
        let representable = |v: i64| v > i64::from(i32::MIN) && v < i64::from(i32::MAX);
        if ![min_h, max_h, deepest_row].into_iter().all(representable) {
            return Err(SimError::Config {
                reason: "cave extends past the coordinate range",
            });
        }

        let rock_cells = rock::rasterize_paths(paths)?;
        if rock_cells.contains(&source) {
            return Err(SimError::Config {
                reason: "source lies on rock",
            });
        }

        let mut grid = Self::with_bounds(min_h as i32, width as usize, height as usize, source);
        grid.max_depth = max_depth;
        grid.floor_gap = config.floor_gap;
        for &at in &rock_cells {
            grid.place_rock(at)?;
        }

        debug!(
            "built {}x{} grid from {} rock cells: horizontals {}..={}, max depth {}",
            grid.width,
            grid.height,
            rock_cells.len(),
            grid.min_horizontal(),
            grid.max_horizontal(),
            max_depth,
        );
        Ok(grid)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn min_horizontal(&self) -> i32 {
        self.min_horizontal
    }

    #[must_use]
    pub fn max_horizontal(&self) -> i32 {
        self.min_horizontal + self.width as i32 - 1
    }

    /// Deepest rock row at construction time.
    #[must_use]
    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Depth of the closed floor: `floor_gap` rows below the deepest rock.
    #[must_use]
    pub fn closed_floor_depth(&self) -> i32 {
        self.max_depth + self.floor_gap
    }

    #[must_use]
    pub fn floor_depth(&self) -> Option<i32> {
        self.floor_depth
    }

    #[must_use]
    pub fn source(&self) -> Coordinate {
        self.source
    }

    #[must_use]
    pub fn in_bounds(&self, at: Coordinate) -> bool {
        self.index(at).is_some()
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        let column = i64::from(at.horizontal) - i64::from(self.min_horizontal);
        if at.depth < 0 || column < 0 {
            return None;
        }
        let (row, column) = (at.depth as usize, column as usize);
        (row < self.height && column < self.width).then_some(row * self.width + column)
    }

    /// # Errors
    ///
    /// `SimError::OutOfBounds` outside the provisioned area.
    pub fn get(&self, at: Coordinate) -> Result<Cell, SimError> {
        self.index(at)
            .map(|i| self.cells[i])
            .ok_or(SimError::OutOfBounds(at))
    }

    /// Write a cell. Rock is permanent: writes over it are ignored.
    ///
    /// # Errors
    ///
    /// `SimError::OutOfBounds` outside the provisioned area.
    pub fn set(&mut self, at: Coordinate, cell: Cell) -> Result<(), SimError> {
        let i = self.index(at).ok_or(SimError::OutOfBounds(at))?;
        if self.cells[i] != Cell::Rock {
            self.cells[i] = cell;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `SimError::OutOfBounds` outside the provisioned area.
    pub fn place_rock(&mut self, at: Coordinate) -> Result<(), SimError> {
        self.set(at, Cell::Rock)
    }

    /// Turn the whole row at `depth` into rock.
    ///
    /// # Errors
    ///
    /// `SimError::OutOfBounds` if the row was not provisioned.
    pub fn add_floor(&mut self, depth: i32) -> Result<(), SimError> {
        let first = Coordinate::new(depth, self.min_horizontal);
        let start = self.index(first).ok_or(SimError::OutOfBounds(first))?;
        self.cells[start..start + self.width].fill(Cell::Rock);
        self.floor_depth = Some(depth);
        debug!("added floor at depth {depth}");
        Ok(())
    }

    /// Rows from depth 0 downward.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The grid as printable rows of cell glyphs.
    #[must_use]
    pub fn glyph_rows(&self) -> Vec<Vec<char>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.glyph()).collect())
            .collect()
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![Just(Cell::Air), Just(Cell::Sand), Just(Cell::Source)]
    }

    fn example_paths() -> Vec<rock::RockPath> {
        parse::parse_scan("498,4 -> 498,6 -> 496,6\n503,4 -> 502,4 -> 502,9 -> 494,9").unwrap()
    }

    #[test]
    fn with_bounds_marks_only_source() {
        let source = Coordinate::new(0, 10);
        let grid = Grid::with_bounds(5, 11, 4, source);
        assert_eq!(grid.cells().len(), 44);
        assert_eq!(grid.get(source), Ok(Cell::Source));
        assert_eq!(grid.count(Cell::Source), 1);
        assert_eq!(grid.count(Cell::Air), 43);
        assert_eq!(grid.max_horizontal(), 15);
    }

    #[test]
    fn grid_get_out_of_bounds_is_error() {
        let grid = Grid::with_bounds(-3, 7, 5, Coordinate::new(0, 0));
        for at in [
            Coordinate::new(-1, 0),
            Coordinate::new(5, 0),
            Coordinate::new(0, -4),
            Coordinate::new(0, 4),
        ] {
            assert_eq!(grid.get(at), Err(SimError::OutOfBounds(at)));
            assert!(!grid.in_bounds(at));
        }
        assert!(grid.in_bounds(Coordinate::new(4, -3)));
        assert!(grid.in_bounds(Coordinate::new(4, 3)));
    }

    #[test]
    fn rock_is_never_overwritten() {
        let mut grid = Grid::with_bounds(0, 4, 4, Coordinate::new(0, 1));
        let at = Coordinate::new(2, 2);
        grid.place_rock(at).unwrap();
        grid.place_rock(at).unwrap();
        grid.set(at, Cell::Sand).unwrap();
        grid.set(at, Cell::Air).unwrap();
        assert_eq!(grid.get(at), Ok(Cell::Rock));
        assert_eq!(grid.count(Cell::Rock), 1);
    }

    #[test]
    fn build_provisions_example_cave() {
        let grid = Grid::build(&example_paths(), &SimConfig::default()).unwrap();
        assert_eq!(grid.max_depth(), 9);
        assert_eq!(grid.height(), 12);
        assert_eq!(grid.min_horizontal(), 489);
        assert_eq!(grid.max_horizontal(), 511);
        assert_eq!(grid.get(Coordinate::from_scan(500, 0)), Ok(Cell::Source));
        assert_eq!(grid.get(Coordinate::from_scan(497, 6)), Ok(Cell::Rock));
        assert_eq!(grid.get(Coordinate::from_scan(502, 7)), Ok(Cell::Rock));
        assert_eq!(grid.get(Coordinate::from_scan(499, 8)), Ok(Cell::Air));
        // 5 cells in the first path, 15 in the second
        assert_eq!(grid.count(Cell::Rock), 20);
        assert_eq!(grid.floor_depth(), None);
    }

    #[test]
    fn build_widens_for_far_rock() {
        let paths = vec![vec![Coordinate::from_scan(100, 3), Coordinate::from_scan(102, 3)]];
        let grid = Grid::build(&paths, &SimConfig::default()).unwrap();
        assert_eq!(grid.min_horizontal(), 100);
        assert_eq!(grid.max_horizontal(), 505);
        assert_eq!(grid.height(), 6);
    }

    #[test]
    fn build_without_rock_still_has_room_below_source() {
        let grid = Grid::build(&[], &SimConfig::default()).unwrap();
        assert_eq!(grid.max_depth(), 0);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 5);
    }

    #[test]
    fn build_rejects_rock_above_grid() {
        let paths = vec![vec![Coordinate::new(-1, 500)]];
        assert_eq!(
            Grid::build(&paths, &SimConfig::default()).unwrap_err(),
            SimError::OutOfBounds(Coordinate::new(-1, 500))
        );
    }

    #[test]
    fn build_rejects_diagonal_path() {
        let paths = vec![vec![Coordinate::new(1, 1), Coordinate::new(2, 2)]];
        assert!(matches!(
            Grid::build(&paths, &SimConfig::default()),
            Err(SimError::InvalidPath { .. })
        ));
    }

    #[test]
    fn build_rejects_columns_too_far_apart() {
        let paths = parse::parse_scan("-2000000000,1\n2000000000,1").unwrap();
        assert!(matches!(
            Grid::build(&paths, &SimConfig::default()),
            Err(SimError::TooLarge { .. })
        ));
    }

    #[test]
    fn build_rejects_huge_depth_before_rasterizing() {
        let paths = parse::parse_scan("500,1 -> 500,1000000000").unwrap();
        assert_eq!(
            Grid::build(&paths, &SimConfig::default()).unwrap_err(),
            SimError::TooLarge {
                width: 2_000_000_005,
                height: 1_000_000_003,
            }
        );
    }

    #[test]
    fn build_rejects_source_at_edge_of_coordinate_range() {
        let config = SimConfig {
            source: Coordinate::new(0, i32::MAX - 1),
            ..SimConfig::default()
        };
        assert!(matches!(
            Grid::build(&[], &config),
            Err(SimError::Config { .. })
        ));
    }

    #[test]
    fn build_rejects_source_on_rock() {
        let config = SimConfig {
            source: Coordinate::from_scan(498, 4),
            ..SimConfig::default()
        };
        assert_eq!(
            Grid::build(&example_paths(), &config).unwrap_err(),
            SimError::Config {
                reason: "source lies on rock",
            }
        );
    }

    #[test]
    fn closed_floor_depth_follows_build_config() {
        let config = SimConfig {
            floor_gap: 4,
            ..SimConfig::default()
        };
        let grid = Grid::build(&example_paths(), &config).unwrap();
        assert_eq!(grid.closed_floor_depth(), 13);
        assert_eq!(grid.height(), 14);
        let plain = Grid::with_bounds(0, 3, 3, Coordinate::new(0, 1));
        assert_eq!(plain.closed_floor_depth(), 2);
    }

    #[test]
    fn add_floor_fills_row() {
        let mut grid = Grid::build(&example_paths(), &SimConfig::default()).unwrap();
        grid.add_floor(11).unwrap();
        assert_eq!(grid.floor_depth(), Some(11));
        assert!(grid.rows().nth(11).unwrap().iter().all(|&c| c == Cell::Rock));
        assert_eq!(
            grid.add_floor(12),
            Err(SimError::OutOfBounds(Coordinate::new(12, 489)))
        );
    }

    #[test]
    fn glyph_rows_match_cells() {
        let grid = Grid::with_bounds(0, 3, 2, Coordinate::new(0, 1));
        assert_eq!(grid.glyph_rows(), vec![vec!['.', '+', '.'], vec!['.', '.', '.']]);
    }

    proptest! {
        #[test]
        fn prop_grid_in_bounds_get_set_round_trip(
            min_h in -500i32..500,
            dh in 0i32..32,
            depth in 0i32..32,
            cell in arb_cell(),
        ) {
            let mut grid = Grid::with_bounds(min_h, 32, 32, Coordinate::new(0, min_h));
            let at = Coordinate::new(depth, min_h + dh);
            grid.set(at, cell).unwrap();
            prop_assert_eq!(grid.get(at), Ok(cell));
        }
    }

    proptest! {
        #[test]
        fn prop_grid_out_of_bounds_leaves_cells_unchanged(
            depth in prop_oneof![(-1000i32..0), (16i32..1000)],
            horizontal in -1000i32..1000,
            cell in arb_cell(),
        ) {
            let mut grid = Grid::with_bounds(0, 16, 16, Coordinate::new(0, 8));
            let before = grid.cells().to_vec();
            let at = Coordinate::new(depth, horizontal);
            prop_assert_eq!(grid.set(at, cell), Err(SimError::OutOfBounds(at)));
            prop_assert_eq!(grid.cells(), before.as_slice());
        }
    }
}
