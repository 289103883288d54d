use crate::error::{Error, Result};
use crate::parse;

fn parse_report(input: &str) -> Result<(Vec<u32>, usize)> {
    let mut width = None;
    let numbers = parse::lines(input).map(|(ln, line)| {
        if *width.get_or_insert(line.len()) != line.len() {
            return Err(Error::parse(ln, "line length differs from the first line"));
        }
        u32::from_str_radix(line, 2).map_err(|_| Error::parse(ln, format!("not a binary number: {:?}", line)))
    }).collect::<Result<Vec<_>>>()?;
    match width {
        Some(width @ 1 ..= 32) => Ok((numbers, width)),
        _ => Err(Error::Input("expected binary numbers of 1 to 32 bits".into()))
    }
}

/// Whether 1 is at least as common as 0 at `bit` among `numbers`.
fn ones_dominate(numbers: &[u32], bit: usize) -> bool {
    let ones = numbers.iter().filter(|&&n| n >> bit & 1 == 1).count();
    2 * ones >= numbers.len()
}

fn rating(mut numbers: Vec<u32>, width: usize, keep_common: bool) -> u32 {
    for bit in (0 .. width).rev() {
        if numbers.len() <= 1 {break};
        let ones = numbers.iter().filter(|&&n| n >> bit & 1 == 1).count();
        // a column where every survivor agrees cannot filter anything out
        if ones == 0 || ones == numbers.len() {continue};
        let wanted = ones_dominate(&numbers, bit) == keep_common;
        numbers.retain(|&n| (n >> bit & 1 == 1) == wanted);
    }
    numbers[0]
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (numbers, width) = parse_report(input)?;
    if part == 1 {
        let gamma = (0 .. width).filter(|&bit| ones_dominate(&numbers, bit))
                                .fold(0u64, |acc, bit| acc | 1 << bit);
        let epsilon = !gamma & ((1u64 << width) - 1);
        Ok((gamma * epsilon).to_string())
    } else {
        let oxygen = rating(numbers.clone(), width, true) as u64;
        let co2 = rating(numbers, width, false) as u64;
        Ok((oxygen * co2).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "00100\n11110\n10110\n10111\n10101\n01111\n00111\n11100\n10000\n11001\n00010\n01010\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "198");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "230");
    }

    #[test]
    fn ratings() {
        let (numbers, width) = parse_report(EXAMPLE).unwrap();
        assert_eq!(rating(numbers.clone(), width, true), 23);
        assert_eq!(rating(numbers, width, false), 10);
    }

    #[test]
    fn ragged_report_is_rejected() {
        assert!(solve(1, "0101\n011").is_err());
        assert!(solve(1, "0102").is_err());
    }
}
