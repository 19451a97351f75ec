//! # grid_astar
//!
//! Point-to-point [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a
//! static obstacle grid with 8-connected movement and uniform move cost. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! Cells are addressed by [Point] with `x` as the row and `y` as the column. A query has three
//! distinct outcomes: `Ok(Some(path))`, `Ok(None)` when no path exists and `Err(_)` for invalid
//! input.
pub mod astar;
pub mod error;
pub mod finder;
pub mod grid;
pub mod heuristic;

pub use error::{Endpoint, PathError, Result};
pub use finder::{path_cost, PathFinder, PathFinderConfig};
pub use grid::TerrainGrid;
pub use heuristic::Heuristic;

use grid_util::point::Point;

/// Terrain marker of a walkable cell. Every other marker is impassable.
pub const OPEN: u8 = 0;
/// Cost of a single move, straight or diagonal.
pub const STEP_COST: i32 = 1;
pub const N_SMALLVEC_SIZE: usize = 8;
/// Neighbour offsets as (row, column) deltas, in the order in which neighbours are expanded.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Computes a path with the default [PathFinderConfig]. See [PathFinder::find_path].
pub fn find_path(grid: &TerrainGrid, start: Point, end: Point) -> Result<Option<Vec<Point>>> {
    PathFinder::default().find_path(grid, start, end)
}

/// Turns waypoints into a path on the grid which can be followed step by step. Each segment is
/// walked diagonally first and straight after, so the waypoints need not be aligned.
pub fn waypoints_to_path(waypoints: &[Point]) -> Vec<Point> {
    let mut waypoints = waypoints.iter();
    let Some(&first) = waypoints.next() else {
        return Vec::new();
    };
    let mut path = vec![first];
    let mut current = first;
    for next in waypoints {
        while current.move_distance(next) >= 1 {
            current = current + current.dir(next);
            path.push(current);
        }
    }
    path
}

/// Reduces a step-by-step path to its endpoints and the points at which the direction of
/// movement changes. Inverse of [waypoints_to_path] for paths made of unit steps.
pub fn path_to_waypoints(path: &[Point]) -> Vec<Point> {
    let mut waypoints = Vec::new();
    for (i, point) in path.iter().enumerate() {
        let keep = i == 0
            || i + 1 == path.len()
            || path[i - 1].dir_obj(point) != point.dir_obj(&path[i + 1]);
        if keep {
            waypoints.push(*point);
        }
    }
    waypoints
}
