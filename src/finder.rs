use crate::astar::{astar, SearchOutcome};
use crate::error::{Endpoint, PathError, Result};
use crate::grid::TerrainGrid;
use crate::heuristic::Heuristic;
use crate::{N_SMALLVEC_SIZE, STEP_COST};
use grid_util::point::Point;
use log::{info, warn};
use smallvec::SmallVec;

/// Configuration for [PathFinder].
#[derive(Clone, Debug)]
pub struct PathFinderConfig {
    /// Estimate of the remaining cost used to order the frontier
    pub heuristic: Heuristic,
    /// Maximum number of expanded nodes before the search gives up
    pub max_expansions: Option<usize>,
    /// Answer queries between disconnected regions from the grid's connected components
    /// instead of exhausting the search
    pub use_components: bool,
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            max_expansions: None,
            use_components: true,
        }
    }
}

/// A* path finder over a [TerrainGrid] with uniform move cost and 8-connected movement.
///
/// Every call owns its search state, so one finder can serve any number of concurrent queries
/// against a grid that is not being modified.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    pub config: PathFinderConfig,
}

impl PathFinder {
    pub fn new(config: PathFinderConfig) -> PathFinder {
        PathFinder { config }
    }

    pub fn with_heuristic(heuristic: Heuristic) -> PathFinder {
        PathFinder::new(PathFinderConfig {
            heuristic,
            ..Default::default()
        })
    }

    fn check_bounds(grid: &TerrainGrid, point: &Point, endpoint: Endpoint) -> Result<()> {
        if grid.in_bounds(point) {
            Ok(())
        } else {
            Err(PathError::OutOfBounds {
                endpoint,
                point: *point,
                rows: grid.rows(),
                cols: grid.cols(),
            })
        }
    }

    fn successors(grid: &TerrainGrid, node: &Point) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        grid.walkable_neighbours(node)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }

    fn run<FH, FS>(
        &self,
        start: &Point,
        grid: &TerrainGrid,
        heuristic: FH,
        success: FS,
    ) -> Result<Option<Vec<Point>>>
    where
        FH: FnMut(&Point) -> i32,
        FS: FnMut(&Point) -> bool,
    {
        match astar(
            start,
            |node| Self::successors(grid, node),
            heuristic,
            success,
            self.config.max_expansions,
        ) {
            SearchOutcome::Found { path, .. } => Ok(Some(path)),
            SearchOutcome::NoPath => Ok(None),
            SearchOutcome::LimitReached { expanded } => {
                warn!("Search from {} gave up after {} expansions", start, expanded);
                Err(PathError::SearchLimitReached { expanded })
            }
        }
    }

    /// Computes a path from `start` to `end`, both inclusive, in which consecutive points are
    /// 8-connected neighbours and every point is walkable.
    ///
    /// Returns `Ok(None)` if no path exists. A blocked start or end cell counts as no path, also
    /// when `start == end`. Out-of-bounds endpoints are rejected before any search work is done.
    pub fn find_path(
        &self,
        grid: &TerrainGrid,
        start: Point,
        end: Point,
    ) -> Result<Option<Vec<Point>>> {
        Self::check_bounds(grid, &start, Endpoint::Start)?;
        Self::check_bounds(grid, &end, Endpoint::End)?;
        if !grid.is_walkable(&start) || !grid.is_walkable(&end) {
            info!("{} or {} is blocked, no path", start, end);
            return Ok(None);
        }
        let precheck = self.config.use_components && !grid.components_dirty;
        if precheck && grid.unreachable(&start, &end) {
            info!("{} is not reachable from {}", end, start);
            return Ok(None);
        }
        let heuristic = self.config.heuristic;
        let path = self.run(
            &start,
            grid,
            |point| heuristic.estimate(point, &end),
            |point| *point == end,
        )?;
        if path.is_none() && precheck {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        Ok(path)
    }

    /// Computes a path from `start` to whichever of `goals` is finalized first and returns that
    /// goal along with the path. The heuristic is the estimate to the closest goal. Blocked goals
    /// are skipped, and an empty or fully blocked goal list yields `Ok(None)`.
    pub fn find_path_multiple_goals(
        &self,
        grid: &TerrainGrid,
        start: Point,
        goals: &[Point],
    ) -> Result<Option<(Point, Vec<Point>)>> {
        Self::check_bounds(grid, &start, Endpoint::Start)?;
        for goal in goals {
            Self::check_bounds(grid, goal, Endpoint::Goal)?;
        }
        if !grid.is_walkable(&start) {
            info!("Start {} is blocked, no path", start);
            return Ok(None);
        }
        let precheck = self.config.use_components && !grid.components_dirty;
        let goals = goals
            .iter()
            .copied()
            .filter(|g| grid.is_walkable(g) && !(precheck && grid.unreachable(&start, g)))
            .collect::<Vec<Point>>();
        if goals.is_empty() {
            info!("None of the goals are reachable from {}", start);
            return Ok(None);
        }
        let heuristic = self.config.heuristic;
        let path = self.run(
            &start,
            grid,
            |point| {
                goals
                    .iter()
                    .map(|g| heuristic.estimate(point, g))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
        )?;
        Ok(path.and_then(|p| p.last().copied().map(|goal| (goal, p))))
    }
}

/// The number of steps taken along a path, saturating at [i32::MAX].
pub fn path_cost(path: &[Point]) -> i32 {
    i32::try_from(path.len().saturating_sub(1))
        .map_or(i32::MAX, |steps| steps.saturating_mul(STEP_COST))
}
