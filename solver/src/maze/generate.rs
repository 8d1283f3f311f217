use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{bounded::Maze, cell::Cell, position::Position};

/// carves a `rows x cols` room maze with a recursive backtracker, then knocks out
/// `loops` extra interior walls so the result contains cycles.
///
/// the grid is `(2 * rows + 1) x (2 * cols + 1)`; start is the top-left room and
/// the exit is the bottom-right room.
pub fn generate(rows: usize, cols: usize, seed: u64, loops: usize) -> eyre::Result<Maze> {
    if rows == 0 || cols == 0 {
        eyre::bail!("maze needs at least one row and one column of rooms");
    }
    if rows * cols < 2 {
        eyre::bail!("maze needs at least two rooms to separate start and exit");
    }

    let height = rows * 2 + 1;
    let width = cols * 2 + 1;
    let mut grid = vec![Cell::Blocked; height * width];
    let mut rng = StdRng::seed_from_u64(seed);

    let room = |r: usize, c: usize| Position::new(r * 2 + 1, c * 2 + 1).to_index(width);

    let mut visited = vec![false; rows * cols];
    let mut stack = vec![(0, 0)];
    visited[0] = true;
    grid[room(0, 0)] = Cell::Free;

    while let Some(&(r, c)) = stack.last() {
        let mut options = Vec::with_capacity(4);
        if r > 0 {
            options.push((r - 1, c));
        }
        if r + 1 < rows {
            options.push((r + 1, c));
        }
        if c > 0 {
            options.push((r, c - 1));
        }
        if c + 1 < cols {
            options.push((r, c + 1));
        }
        options.retain(|&(nr, nc)| !visited[nr * cols + nc]);

        if options.is_empty() {
            stack.pop();
            continue;
        }

        let (nr, nc) = options[rng.random_range(0..options.len())];
        visited[nr * cols + nc] = true;
        grid[Position::new(r + nr + 1, c + nc + 1).to_index(width)] = Cell::Free;
        grid[room(nr, nc)] = Cell::Free;
        stack.push((nr, nc));
    }

    if loops > 0 {
        // walls sitting between two rooms; removing any of them closes a cycle
        let mut walls: Vec<usize> = (1..height - 1)
            .flat_map(|row| (1..width - 1).map(move |col| Position::new(row, col)))
            .filter(|pos| (pos.row % 2 == 1) != (pos.col % 2 == 1))
            .map(|pos| pos.to_index(width))
            .filter(|&idx| grid[idx] == Cell::Blocked)
            .collect();
        walls.shuffle(&mut rng);
        for idx in walls.into_iter().take(loops) {
            grid[idx] = Cell::Free;
        }
    }

    grid[room(0, 0)] = Cell::Robot;
    grid[room(rows - 1, cols - 1)] = Cell::Target;

    log::debug!(
        "generated {}x{} maze (seed {}, {} loops)",
        height,
        width,
        seed,
        loops
    );

    Maze::from_grid(grid, height, width)
}
