use crate::error::{PathError, Result};
use crate::{NEIGHBOUR_OFFSETS, N_SMALLVEC_SIZE, OPEN};
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [TerrainGrid] stores one [u8] terrain marker per cell in a [SimpleGrid]. A cell is walkable
/// iff its marker equals [OPEN]. Points address cells with `x` as the row and `y` as the column,
/// so the rows run along the width of the underlying grid.
///
/// Connected components of walkable cells are tracked in a [UnionFind] structure so that queries
/// between disconnected regions can be answered without flood filling the grid.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub grid: SimpleGrid<u8>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl TerrainGrid {
    /// Creates a fully walkable grid.
    pub fn new(rows: usize, cols: usize) -> Result<TerrainGrid> {
        if rows == 0 || cols == 0 {
            return Err(PathError::EmptyGrid { rows, cols });
        }
        Ok(TerrainGrid::from_grid(SimpleGrid::new(rows, cols, OPEN)))
    }

    /// Builds a grid from rows of terrain markers, which must all have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<TerrainGrid> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        if n_rows == 0 || n_cols == 0 {
            return Err(PathError::EmptyGrid {
                rows: n_rows,
                cols: n_cols,
            });
        }
        let mut grid = SimpleGrid::new(n_rows, n_cols, OPEN);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n_cols {
                return Err(PathError::RaggedGrid {
                    row,
                    len: values.len(),
                    expected: n_cols,
                });
            }
            for (col, &marker) in values.iter().enumerate() {
                grid.set(row, col, marker);
            }
        }
        Ok(TerrainGrid::from_grid(grid))
    }

    fn from_grid(grid: SimpleGrid<u8>) -> TerrainGrid {
        let mut terrain = TerrainGrid {
            components: UnionFind::new(grid.width() * grid.height()),
            components_dirty: false,
            grid,
        };
        terrain.generate_components();
        terrain
    }

    pub fn rows(&self) -> usize {
        self.grid.width()
    }

    pub fn cols(&self) -> usize {
        self.grid.height()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        self.grid.point_in_bounds(*point)
    }

    /// The terrain marker at `point`, or [None] if it lies outside the grid.
    pub fn marker(&self, point: &Point) -> Option<u8> {
        if self.in_bounds(point) {
            Some(self.grid.get_point(*point))
        } else {
            None
        }
    }

    /// Out-of-bounds points are never walkable.
    pub fn is_walkable(&self, point: &Point) -> bool {
        self.marker(point) == Some(OPEN)
    }

    /// In-bounds walkable neighbours of `point` in the fixed 8-connected expansion order.
    pub fn walkable_neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dr, dc)| *point + Point::new(dr, dc))
            .filter(|p| self.is_walkable(p))
            .collect()
    }

    /// Updates the marker of an in-bounds cell. Joins newly connected components and flags the
    /// components as dirty if a walkable cell becomes blocked, since that may split a component.
    /// Returns `false` if the point lies outside the grid.
    pub fn set_marker(&mut self, point: &Point, marker: u8) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        let was_open = self.grid.get_point(*point) == OPEN;
        self.grid.set_point(*point, marker);
        if marker == OPEN {
            let ix = self.grid.get_ix_point(point);
            for n in self.walkable_neighbours(point) {
                let n_ix = self.grid.get_ix_point(&n);
                self.components.union(ix, n_ix);
            }
        } else if was_open {
            self.components_dirty = true;
        }
        true
    }

    pub fn set_blocked(&mut self, point: &Point, blocked: bool) -> bool {
        self.set_marker(point, if blocked { 1 } else { OPEN })
    }

    /// Checks if start and goal are walkable cells on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked or out-of-bounds endpoints
    /// are unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_walkable(start) && self.is_walkable(goal) {
            !self.components.equiv(
                self.grid.get_ix_point(start),
                self.grid.get_ix_point(goal),
            )
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components. Only the forward half of the neighbourhood is visited per cell since the
    /// relation is symmetric.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.grid.width() * self.grid.height());
        self.components_dirty = false;
        for row in 0..self.rows() as i32 {
            for col in 0..self.cols() as i32 {
                let point = Point::new(row, col);
                if !self.is_walkable(&point) {
                    continue;
                }
                let parent_ix = self.grid.get_ix_point(&point);
                for n in [
                    Point::new(row, col + 1),
                    Point::new(row + 1, col - 1),
                    Point::new(row + 1, col),
                    Point::new(row + 1, col + 1),
                ] {
                    if self.is_walkable(&n) {
                        let ix = self.grid.get_ix_point(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| if self.grid.get(row, col) == OPEN { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
