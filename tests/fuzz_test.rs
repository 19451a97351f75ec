/// Fuzzes the path finder by checking for many random grids that a path is found exactly when the
/// goal is reachable, that every returned path is a valid walk, and that with an admissible
/// heuristic its length matches the breadth-first distance.
use grid_astar::{path_cost, Heuristic, PathFinder, PathFinderConfig, TerrainGrid};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> TerrainGrid {
    let cells = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| if rng.gen_bool(0.4) { 1 } else { 0 })
                .collect::<Vec<u8>>()
        })
        .collect::<Vec<_>>();
    TerrainGrid::from_rows(&cells).unwrap()
}

fn visualize_grid(grid: &TerrainGrid, start: &Point, end: &Point) {
    for x in 0..grid.rows() as i32 {
        for y in 0..grid.cols() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_walkable(&p) {
                print!(".");
            } else {
                print!("#");
            }
        }
        println!();
    }
}

/// Breadth-first step distance, used as ground truth.
fn bfs_distance(grid: &TerrainGrid, start: Point, end: Point) -> Option<i32> {
    let mut dist = vec![vec![-1; grid.cols()]; grid.rows()];
    let mut queue = VecDeque::from([start]);
    dist[start.x as usize][start.y as usize] = 0;
    while let Some(p) = queue.pop_front() {
        let d = dist[p.x as usize][p.y as usize];
        if p == end {
            return Some(d);
        }
        for n in grid.walkable_neighbours(&p) {
            if dist[n.x as usize][n.y as usize] < 0 {
                dist[n.x as usize][n.y as usize] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn assert_walk(grid: &TerrainGrid, path: &[Point]) {
    assert!(path.iter().all(|p| grid.is_walkable(p)));
    assert!(path
        .windows(2)
        .all(|w| (w[0].x - w[1].x).abs() <= 1 && (w[0].y - w[1].y).abs() <= 1 && w[0] != w[1]));
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for heuristic in [Heuristic::Chebyshev, Heuristic::SquaredEuclidean, Heuristic::Zero] {
        for use_components in [false, true] {
            let finder = PathFinder::new(PathFinderConfig {
                heuristic,
                use_components,
                ..Default::default()
            });
            for _ in 0..N_GRIDS {
                let mut grid = random_grid(N, N, &mut rng);
                grid.set_blocked(&start, false);
                grid.set_blocked(&end, false);
                grid.update();
                let distance = bfs_distance(&grid, start, end);
                let path = finder.find_path(&grid, start, end).unwrap();
                // Show the grid if the outcome is wrong
                if path.is_some() != distance.is_some() {
                    visualize_grid(&grid, &start, &end);
                }
                assert_eq!(path.is_some(), distance.is_some());
                assert_eq!(grid.reachable(&start, &end), distance.is_some());
                if let (Some(path), Some(distance)) = (path, distance) {
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    assert_walk(&grid, &path);
                    if heuristic.admissible() {
                        assert_eq!(path_cost(&path), distance);
                    } else {
                        assert!(path_cost(&path) >= distance);
                    }
                }
            }
        }
    }
}

#[test]
fn fuzz_random_endpoints() {
    const N: usize = 12;
    const N_QUERIES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(7);
    let finder = PathFinder::default();
    for _ in 0..N_QUERIES {
        let grid = random_grid(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let path = finder.find_path(&grid, start, end).unwrap();
        let expected = if grid.is_walkable(&start) && grid.is_walkable(&end) {
            bfs_distance(&grid, start, end)
        } else {
            None
        };
        assert_eq!(path.as_ref().map(|p| path_cost(p)), expected);
        if let Some(path) = path {
            assert_walk(&grid, &path);
        }
    }
}
