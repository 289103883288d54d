use arrayvec::ArrayVec;

use crate::error::{Error, Result};
use crate::parse;

/// Lit segments (a..g) of each digit.
const DIGIT_SEGMENTS: [&str; 10] = [
    "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg"
];

/// How many of the ten digits light each segment a..g.
const SEGMENT_COUNTS: [usize; 7] = [8, 6, 8, 7, 4, 9, 7];

/// Wires or segments a..g as bits 0..7.
type Mask = u8;

fn mask(s: &str, ln: usize) -> Result<Mask> {
    s.bytes().try_fold(0, |acc, b| match b {
        b'a' ..= b'g' => Ok(acc | 1 << (b - b'a')),
        _ => Err(Error::parse(ln, format!("unexpected wire '{}'", b as char)))
    })
}

fn digit_of(segments: Mask) -> Option<usize> {
    DIGIT_SEGMENTS.iter().position(|s| s.bytes().fold(0, |acc, b| acc | 1 << (b - b'a')) == segments)
}

/// `wiring[s]` is the wire that drives segment `s`.
struct Wiring(ArrayVec<u8, 7>);

impl Wiring {
    fn segments(&self, wires: Mask) -> Mask {
        (0 .. 7).filter(|&s| wires >> self.0[s] & 1 == 1).fold(0, |acc, s| acc | 1 << s)
    }

    fn decode(&self, wires: Mask) -> Option<usize> {
        digit_of(self.segments(wires))
    }

    /// Backtracks over segments in order, only trying wires that appear in as
    /// many patterns as the segment appears in digits.
    fn fit(patterns: &[Mask]) -> Option<Wiring> {
        fn extend(partial: &mut ArrayVec<u8, 7>, patterns: &[Mask]) -> bool {
            let segment = partial.len();
            if partial.is_full() {
                let wiring = Wiring(partial.clone());
                return patterns.iter().all(|&p| wiring.decode(p).is_some());
            }
            for wire in 0 .. 7u8 {
                if partial.contains(&wire) {continue};
                let count = patterns.iter().filter(|&&p| p >> wire & 1 == 1).count();
                if count != SEGMENT_COUNTS[segment] {continue};
                partial.push(wire);
                if extend(partial, patterns) {return true};
                partial.pop();
            }
            false
        }

        let mut partial = ArrayVec::new();
        if extend(&mut partial, patterns) {Some(Wiring(partial))} else {None}
    }
}

struct Entry {
    patterns: Vec<Mask>,
    outputs: Vec<Mask>,
}

fn parse_entries(input: &str) -> Result<Vec<Entry>> {
    parse::lines(input).map(|(ln, line)| {
        let (patterns, outputs) = line.split_once(" | ")
            .ok_or_else(|| Error::parse(ln, "expected patterns | outputs"))?;
        let patterns = patterns.split_whitespace().map(|p| mask(p, ln)).collect::<Result<Vec<_>>>()?;
        let outputs = outputs.split_whitespace().map(|p| mask(p, ln)).collect::<Result<Vec<_>>>()?;
        if patterns.len() != 10 {return Err(Error::parse(ln, "expected ten patterns"))};
        Ok(Entry {patterns, outputs})
    }).collect()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let entries = parse_entries(input)?;
    if part == 1 {
        Ok(entries.iter().flat_map(|e| &e.outputs)
            .filter(|o| matches!(o.count_ones(), 2 | 3 | 4 | 7)).count().to_string())
    } else {
        let mut total = 0;
        for (ix, entry) in entries.iter().enumerate() {
            let wiring = Wiring::fit(&entry.patterns)
                .ok_or_else(|| Error::NoAnswer(format!("entry {} has no consistent wiring", ix + 1)))?;
            total += entry.outputs.iter().try_fold(0, |acc, &o|
                wiring.decode(o).map(|d| 10 * acc + d)
            ).ok_or_else(|| Error::NoAnswer(format!("entry {} has an undecodable output", ix + 1)))?;
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "26");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "61229");
    }

    #[test]
    fn single_entry() {
        let line = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";
        assert_eq!(solve(2, line).unwrap(), "5353");
    }

    #[test]
    fn segment_counts_match_digits() {
        for (segment, &count) in SEGMENT_COUNTS.iter().enumerate() {
            let lit = DIGIT_SEGMENTS.iter().filter(|d| d.bytes().any(|b| (b - b'a') as usize == segment)).count();
            assert_eq!(lit, count);
        }
    }
}
