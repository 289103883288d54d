use crate::error::Result;
use crate::grid::{self, Grid};

fn low_points(heights: &Grid) -> Vec<(usize, usize)> {
    let (rows, cols) = (heights.len(), heights[0].len());
    (0 .. rows).flat_map(|ri| (0 .. cols).map(move |ci| (ri, ci)))
        .filter(|&(ri, ci)|
            grid::neighbours4(ri, ci, rows, cols).all(|(nr, nc)| heights[nr][nc] > heights[ri][ci])
        ).collect()
}

fn basin_size(heights: &Grid, seed: (usize, usize), seen: &mut [Vec<bool>]) -> usize {
    let (rows, cols) = (heights.len(), heights[0].len());
    let mut stack = vec![seed];
    let mut size = 0;
    while let Some((ri, ci)) = stack.pop() {
        if seen[ri][ci] || heights[ri][ci] == 9 {continue};
        seen[ri][ci] = true;
        size += 1;
        stack.extend(grid::neighbours4(ri, ci, rows, cols));
    }
    size
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let heights = grid::digits(input)?;
    let lows = low_points(&heights);
    if part == 1 {
        Ok(lows.iter().map(|&(ri, ci)| heights[ri][ci] as u32 + 1).sum::<u32>().to_string())
    } else {
        let mut seen = vec![vec![false; heights[0].len()]; heights.len()];
        let mut sizes = lows.iter().map(|&low| basin_size(&heights, low, &mut seen)).collect::<Vec<_>>();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Ok(sizes.iter().take(3).product::<usize>().to_string())
    }
}
