use itertools::Itertools;

use crate::error::Result;
use crate::parse;

fn increases(depths: impl Iterator<Item = u32>) -> usize {
    depths.tuple_windows().filter(|(a, b)| b > a).count()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let depths = parse::lines(input)
        .map(|(ln, line)| parse::number::<u32>(line, ln))
        .collect::<Result<Vec<_>>>()?;
    let count = if part == 1 {
        increases(depths.into_iter())
    } else {
        increases(depths.into_iter().tuple_windows().map(|(a, b, c)| a + b + c))
    };
    Ok(count.to_string())
}
