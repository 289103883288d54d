use std::str::FromStr;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Lines of the trimmed input, numbered from 1. Blank lines are kept.
pub fn lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input.trim().lines().enumerate().map(|(ix, line)| (ix + 1, line.trim_end()))
}

pub fn number<T: FromStr>(s: &str, line: usize) -> Result<T> {
    s.trim().parse().map_err(|_| Error::parse(line, format!("expected a number, found {:?}", s)))
}

pub fn separated<T: FromStr>(s: &str, sep: char, line: usize) -> Result<Vec<T>> {
    s.trim().split(sep).map(|item| number(item, line)).collect()
}

pub fn captures<'h>(re: &Regex, s: &'h str, line: usize) -> Result<Captures<'h>> {
    re.captures(s).ok_or_else(|| Error::parse(line, format!("cannot parse {:?}", s)))
}

/// Splits the input at the first blank line.
pub fn sections(input: &str) -> Result<(&str, &str)> {
    let input = input.trim();
    input.split_once("\n\n")
        .or_else(|| input.split_once("\r\n\r\n"))
        .ok_or_else(|| Error::Input("expected two sections separated by a blank line".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_carry_their_line() {
        assert_eq!(separated::<u32>("3,4,3,1,2", ',', 1).unwrap(), vec![3, 4, 3, 1, 2]);
        match number::<i64>("12a", 7) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn sections_split_on_blank_line() {
        let (head, tail) = sections("NNCB\n\nCH -> B\n").unwrap();
        assert_eq!(head, "NNCB");
        assert_eq!(tail, "CH -> B");
        assert!(sections("no blank line").is_err());
    }
}
