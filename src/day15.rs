use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::grid::{self, Grid};

/// Lowest total risk from the top left to the bottom right corner.
fn lowest_risk(risk: &Grid) -> Option<u32> {
    let (rows, cols) = (risk.len(), risk[0].len());
    let goal = (rows - 1, cols - 1);
    let mut best = vec![vec![u32::MAX; cols]; rows];
    best[0][0] = 0;
    let mut queue = BinaryHeap::from([Reverse((0, (0, 0)))]);
    while let Some(Reverse((cost, (ri, ci)))) = queue.pop() {
        if (ri, ci) == goal {return Some(cost)};
        if cost > best[ri][ci] {continue};
        for (nr, nc) in grid::neighbours4(ri, ci, rows, cols) {
            let next = cost + risk[nr][nc] as u32;
            if next < best[nr][nc] {
                best[nr][nc] = next;
                queue.push(Reverse((next, (nr, nc))));
            }
        }
    }
    None
}

/// The cave tiled five times in each direction, each tile one riskier, wrapping 9 to 1.
fn tiled(risk: &Grid) -> Grid {
    let (rows, cols) = (risk.len(), risk[0].len());
    (0 .. 5 * rows).map(|ri|
        (0 .. 5 * cols).map(|ci| {
            let bump = (ri / rows + ci / cols) as u8;
            (risk[ri % rows][ci % cols] + bump + 8) % 9 + 1
        }).collect()
    ).collect()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let risk = grid::digits(input)?;
    let risk = if part == 1 {risk} else {tiled(&risk)};
    lowest_risk(&risk).map(|r| r.to_string()).ok_or_else(|| Error::NoAnswer("exit unreachable".into()))
}
