use crate::error::{Error, Result};
use crate::parse;

fn triangular(d: i64) -> i64 {d * (d + 1) / 2}

fn fuel(crabs: &[i64], target: i64, cost: impl Fn(i64) -> i64) -> i64 {
    crabs.iter().map(|&c| cost((c - target).abs())).sum()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut crabs = parse::separated::<i64>(input, ',', 1)?;
    if crabs.is_empty() {return Err(Error::Input("no crabs".into()))};
    crabs.sort_unstable();
    if part == 1 {
        let median = crabs[crabs.len() / 2];
        Ok(fuel(&crabs, median, |d| d).to_string())
    } else {
        // the triangular cost is minimised within half a step of the real mean
        let mean = crabs.iter().sum::<i64>().div_euclid(crabs.len() as i64);
        (mean - 1 ..= mean + 2).map(|target| fuel(&crabs, target, triangular)).min()
            .map(|f| f.to_string()).ok_or_else(|| Error::NoAnswer("no candidate position".into()))
    }
}
