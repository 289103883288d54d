use itertools::{Itertools, MinMaxResult};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parse;

struct Polymer {
    rules: FxHashMap<[u8; 2], u8>,
    pairs: FxHashMap<[u8; 2], u64>,
    last: u8,
}

fn parse_polymer(input: &str) -> Result<Polymer> {
    let (template, rules) = parse::sections(input)?;
    let template = template.trim().as_bytes();
    let &last = template.last().ok_or_else(|| Error::Input("empty template".into()))?;
    let mut pairs = FxHashMap::default();
    for (&a, &b) in template.iter().tuple_windows() {
        *pairs.entry([a, b]).or_insert(0) += 1;
    }
    let rules = parse::lines(rules).map(|(ln, line)| {
        match line.as_bytes() {
            &[a, b, b' ', b'-', b'>', b' ', c] => Ok(([a, b], c)),
            _ => Err(Error::parse(ln, format!("bad rule {:?}", line)))
        }
    }).collect::<Result<_>>()?;
    Ok(Polymer {rules, pairs, last})
}

impl Polymer {
    fn step(&mut self) {
        let mut next = FxHashMap::default();
        for (&[a, b], &n) in &self.pairs {
            match self.rules.get(&[a, b]) {
                Some(&c) => {
                    *next.entry([a, c]).or_insert(0) += n;
                    *next.entry([c, b]).or_insert(0) += n;
                }
                None => *next.entry([a, b]).or_insert(0) += n,
            }
        }
        self.pairs = next;
    }

    /// Most common minus least common element count.
    fn spread(&self) -> u64 {
        let mut counts: FxHashMap<u8, u64> = FxHashMap::default();
        // every element but the last starts exactly one pair
        for (&[a, _], &n) in &self.pairs {
            *counts.entry(a).or_insert(0) += n;
        }
        *counts.entry(self.last).or_insert(0) += 1;
        match counts.values().minmax() {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0
        }
    }
}

fn spread_after(input: &str, steps: usize) -> Result<u64> {
    let mut polymer = parse_polymer(input)?;
    for _ in 0 .. steps {polymer.step()};
    Ok(polymer.spread())
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    Ok(spread_after(input, if part == 1 {10} else {40})?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
NNCB

CH -> B
HH -> N
CB -> H
NH -> C
HB -> C
HC -> B
HN -> C
NN -> C
BH -> H
NC -> B
NB -> B
BN -> B
BB -> N
BC -> B
CC -> N
CN -> C
";

    #[test]
    fn example() {
        assert_eq!(spread_after(EXAMPLE, 0).unwrap(), 1);
        assert_eq!(spread_after(EXAMPLE, 1).unwrap(), 1);
        assert_eq!(spread_after(EXAMPLE, 2).unwrap(), 5);
        assert_eq!(spread_after(EXAMPLE, 3).unwrap(), 7);
        assert_eq!(solve(1, EXAMPLE).unwrap(), "1588");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "2188189693529");
    }

    #[test]
    fn bad_rule() {
        assert!(solve(1, "NN\n\nNN => C").is_err());
    }
}
