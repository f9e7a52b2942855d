//! Region capture by breadth-first flood fill.
//!
//! Starting from a point, the region is every cell reachable without stepping
//! onto the attacker's stones. The region is enclosed when that walk never
//! reaches an empty cell; the board edge counts as a wall.

use std::collections::VecDeque;

use crate::Point;
use crate::grid::Grid;
use crate::stone::{Owner, Stone};

/// Whether the region at `point` is fully enclosed by `attacker` and the edge.
///
/// Off-board points and the attacker's own stones are never capturable.
pub fn can_capture(grid: &Grid, attacker: Stone, point: Point) -> bool {
    match grid.get(point) {
        None => return false,
        Some(Owner::Stone(s)) if s == attacker => return false,
        Some(_) => {}
    }

    let mut visited = vec![false; grid.area()];
    let mut queue = VecDeque::from([point]);

    while let Some(p) = queue.pop_front() {
        let Some(i) = grid.index(p) else {
            continue;
        };
        if visited[i] {
            continue;
        }
        visited[i] = true;

        match grid.get(p) {
            Some(Owner::Empty) => return false,
            Some(Owner::Stone(s)) if s != attacker => {
                for &n in grid.neighbors(p) {
                    if grid.index(n).is_some_and(|ni| !visited[ni]) {
                        queue.push_back(n);
                    }
                }
            }
            _ => {}
        }
    }

    true
}

/// Clear the defending region at `point`, returning how many stones were
/// removed.
///
/// No enclosure check happens here: only call this after [`can_capture`]
/// returned true, or an open group will be wiped.
pub fn capture(grid: &mut Grid, attacker: Stone, point: Point) -> usize {
    if !grid.on_board(point) {
        return 0;
    }

    let mut visited = vec![false; grid.area()];
    let mut queue = VecDeque::from([point]);
    let mut removed = 0;

    while let Some(p) = queue.pop_front() {
        let Some(i) = grid.index(p) else {
            continue;
        };
        if visited[i] {
            continue;
        }
        visited[i] = true;

        if let Some(Owner::Stone(s)) = grid.get(p)
            && s != attacker
        {
            grid.set(p, Owner::Empty);
            removed += 1;
            for &n in grid.neighbors(p) {
                if grid.index(n).is_some_and(|ni| !visited[ni]) {
                    queue.push_back(n);
                }
            }
        }
    }

    removed
}
