//! Shortest-path search over the grid's 4-neighbourhood.

use std::collections::VecDeque;

use meadow_core::Position;

use crate::Grid;

/// Computes a shortest walkable path from `start` to `goal`, both inclusive.
///
/// The search is a breadth-first expansion with uniform step cost. Occupied
/// cells are impassable except for `goal` itself, so a creature can route to
/// the grass or prey standing on it. Returns `None` when either endpoint lies
/// outside the grid or the goal cannot be reached. The path is recomputed on
/// every call; nothing is cached between turns.
#[must_use]
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    let width = usize::try_from(grid.width()).ok()?;
    let start_index = index(width, grid, start)?;
    let _ = index(width, grid, goal)?;

    let cell_count = width.checked_mul(usize::try_from(grid.height()).ok()?)?;
    let mut came_from: Vec<Option<Position>> = vec![None; cell_count];
    let mut visited = vec![false; cell_count];
    visited[start_index] = true;

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct_path(width, grid, &came_from, current));
        }

        for neighbor in grid.neighbors(current) {
            let Some(neighbor_index) = index(width, grid, neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }
            if neighbor != goal && !grid.is_empty(neighbor) {
                continue;
            }

            visited[neighbor_index] = true;
            came_from[neighbor_index] = Some(current);
            queue.push_back(neighbor);
        }
    }

    None
}

fn reconstruct_path(
    width: usize,
    grid: &Grid,
    came_from: &[Option<Position>],
    end: Position,
) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(previous) = index(width, grid, current).and_then(|offset| came_from[offset]) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

fn index(width: usize, grid: &Grid, position: Position) -> Option<usize> {
    if !grid.is_inside(position) {
        return None;
    }
    let column = usize::try_from(position.x()).ok()?;
    let row = usize::try_from(position.y()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn assert_contiguous(path: &[Position]) {
        for pair in path.windows(2) {
            assert_eq!(
                pair[0].manhattan_distance(pair[1]),
                1,
                "path jumps between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn open_board_path_has_manhattan_length() {
        let grid = Grid::new(5, 5);

        let path = find_path(&grid, pos(0, 0), pos(4, 4)).expect("open board is connected");

        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&pos(0, 0)));
        assert_eq!(path.last(), Some(&pos(4, 4)));
        assert_contiguous(&path);
    }

    #[test]
    fn start_equal_to_goal_yields_single_cell() {
        let grid = Grid::new(3, 3);
        assert_eq!(find_path(&grid, pos(1, 1), pos(1, 1)), Some(vec![pos(1, 1)]));
    }

    #[test]
    fn endpoints_outside_grid_yield_no_path() {
        let grid = Grid::new(3, 3);
        assert!(find_path(&grid, pos(-1, 0), pos(2, 2)).is_none());
        assert!(find_path(&grid, pos(0, 0), pos(3, 2)).is_none());
    }

    #[test]
    fn walls_force_route_through_single_gap() {
        let mut grid = Grid::new(5, 5);
        for x in [0, 1, 3, 4] {
            let _ = grid.add(Entity::rock(pos(x, 2))).expect("free cell");
        }

        let path = find_path(&grid, pos(0, 0), pos(4, 4)).expect("gap keeps board connected");

        assert_contiguous(&path);
        assert_eq!(path.len(), 9);
        for step in path.iter().filter(|step| step.y() == 2) {
            assert_eq!(step.x(), 2, "path crossed row 2 through a wall at {step}");
        }
    }

    #[test]
    fn occupied_goal_inside_wall_is_reachable() {
        let mut grid = Grid::new(5, 5);
        for x in [0, 1, 3, 4] {
            let _ = grid.add(Entity::rock(pos(x, 2))).expect("free cell");
        }
        let _ = grid.add(Entity::grass(pos(2, 2))).expect("free cell");

        let path = find_path(&grid, pos(0, 0), pos(2, 2)).expect("goal may be occupied");

        assert_contiguous(&path);
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&pos(2, 2)));
    }

    #[test]
    fn occupied_goal_does_not_open_a_route_beyond_it() {
        let mut grid = Grid::new(5, 5);
        for x in [0, 1, 3, 4] {
            let _ = grid.add(Entity::rock(pos(x, 2))).expect("free cell");
        }
        let _ = grid.add(Entity::grass(pos(2, 2))).expect("free cell");

        assert!(find_path(&grid, pos(0, 0), pos(4, 4)).is_none());
    }

    #[test]
    fn fully_blocked_row_yields_no_path() {
        let mut grid = Grid::new(5, 5);
        for x in 0..5 {
            let _ = grid.add(Entity::tree(pos(x, 2))).expect("free cell");
        }

        assert!(find_path(&grid, pos(0, 0), pos(4, 4)).is_none());
    }
}
