use crate::error::{Error, Result};
use crate::grid::{self, Grid};

/// Advances one step and returns how many octopuses flashed.
fn step(levels: &mut Grid) -> usize {
    let (rows, cols) = (levels.len(), levels[0].len());
    let mut pending = vec![];
    for (ri, row) in levels.iter_mut().enumerate() {
        for (ci, level) in row.iter_mut().enumerate() {
            *level += 1;
            if *level == 10 {pending.push((ri, ci))};
        }
    }

    let mut flashes = 0;
    while let Some((ri, ci)) = pending.pop() {
        flashes += 1;
        for (nr, nc) in grid::neighbours8(ri, ci, rows, cols) {
            levels[nr][nc] += 1;
            // each octopus is queued exactly once, on reaching 10
            if levels[nr][nc] == 10 {pending.push((nr, nc))};
        }
    }

    for level in levels.iter_mut().flatten() {
        if *level > 9 {*level = 0};
    }
    flashes
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut levels = grid::digits(input)?;
    if part == 1 {
        Ok((0 .. 100).map(|_| step(&mut levels)).sum::<usize>().to_string())
    } else {
        let everyone = levels.len() * levels[0].len();
        (1 ..= 1_000_000usize).find(|_| step(&mut levels) == everyone)
            .map(|n| n.to_string())
            .ok_or_else(|| Error::NoAnswer("octopuses never synchronise".into()))
    }
}
