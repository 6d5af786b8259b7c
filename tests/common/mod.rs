#![allow(dead_code)]

use grid_dijkstra::{MovementTable, ObstacleMap, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn p(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Random map with roughly `density` of its cells blocked.
pub fn random_map(width: usize, height: usize, density: f64, seed: u64) -> ObstacleMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = ObstacleMap::new(width, height).unwrap();
    for x in 0..width {
        for y in 0..height {
            if rng.gen_bool(density) {
                map.set_blocked(p(x, y), true).unwrap();
            }
        }
    }
    map
}

pub fn random_cell(width: usize, height: usize, rng: &mut StdRng) -> Position {
    p(rng.gen_range(0..width), rng.gen_range(0..height))
}

/// Shortest costs by relaxing every edge until nothing changes.
///
/// Independent of any priority ordering, so it serves as ground truth for
/// small grids. Index is `y * width + x`.
pub fn brute_force_costs(
    map: &ObstacleMap,
    movement: &MovementTable,
    start: Position,
) -> Vec<Option<f64>> {
    let (width, height) = (map.width(), map.height());
    let mut dist: Vec<Option<f64>> = vec![None; width * height];
    dist[start.y * width + start.x] = Some(0.0);

    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..height {
            for x in 0..width {
                let Some(here) = dist[y * width + x] else {
                    continue;
                };
                if map.is_blocked(p(x, y)).unwrap() {
                    continue;
                }
                for m in movement.moves() {
                    let Some(next) = p(x, y).offset(m.dx, m.dy, width, height) else {
                        continue;
                    };
                    if map.is_blocked(next).unwrap() {
                        continue;
                    }
                    let candidate = here + m.cost;
                    let slot = &mut dist[next.y * width + next.x];
                    if slot.map_or(true, |d| candidate < d - 1e-12) {
                        *slot = Some(candidate);
                        changed = true;
                    }
                }
            }
        }
    }
    dist
}

/// Sums step costs along `path`, failing if a step is not a table move onto
/// a free in-bounds cell.
pub fn path_cost(map: &ObstacleMap, movement: &MovementTable, path: &[Position]) -> f64 {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        let cost = movement
            .step_cost(dx, dy)
            .unwrap_or_else(|| panic!("{from} -> {to} is not a legal move"));
        assert!(!map.is_blocked(to).unwrap(), "path enters blocked cell {to}");
        total += cost;
    }
    total
}
