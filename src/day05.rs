use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::parse;

pub fn solve(part: u8, input: &str) -> Result<String> {
    let re = Regex::new(r"^(\d+),(\d+) -> (\d+),(\d+)$").expect("valid pattern");
    let mut covered: FxHashMap<(i32, i32), u32> = FxHashMap::default();
    for (ln, line) in parse::lines(input) {
        let caps = parse::captures(&re, line, ln)?;
        let [x1, y1, x2, y2] = [1, 2, 3, 4].map(|i| parse::number::<i32>(&caps[i], ln));
        let (x1, y1, x2, y2) = (x1?, y1?, x2?, y2?);
        let (dx, dy) = ((x2 - x1).signum(), (y2 - y1).signum());
        let diagonal = dx != 0 && dy != 0;
        if diagonal && (part == 1 || (x2 - x1).abs() != (y2 - y1).abs()) {continue};

        let steps = (x2 - x1).abs().max((y2 - y1).abs());
        for i in 0 ..= steps {
            *covered.entry((x1 + i * dx, y1 + i * dy)).or_insert(0) += 1;
        }
    }
    Ok(covered.values().filter(|&&n| n > 1).count().to_string())
}
