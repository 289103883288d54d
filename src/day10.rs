use crate::error::{Error, Result};
use crate::parse;

enum Line {
    Corrupted(u8),
    /// Closers still needed, innermost first.
    Incomplete(Vec<u8>),
}

fn closer(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'), b'[' => Some(b']'), b'{' => Some(b'}'), b'<' => Some(b'>'),
        _ => None
    }
}

fn check(line: &str, ln: usize) -> Result<Line> {
    let mut stack = vec![];
    for b in line.bytes() {
        match b {
            b'(' | b'[' | b'{' | b'<' => stack.extend(closer(b)),
            b')' | b']' | b'}' | b'>' => if stack.pop() != Some(b) {return Ok(Line::Corrupted(b))},
            _ => return Err(Error::parse(ln, format!("unexpected character '{}'", b as char)))
        }
    }
    stack.reverse();
    Ok(Line::Incomplete(stack))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let lines = parse::lines(input).map(|(ln, line)| check(line, ln)).collect::<Result<Vec<_>>>()?;
    if part == 1 {
        Ok(lines.iter().map(|line| match line {
            Line::Corrupted(b')') => 3,
            Line::Corrupted(b']') => 57,
            Line::Corrupted(b'}') => 1197,
            Line::Corrupted(_) => 25137,
            Line::Incomplete(_) => 0,
        }).sum::<u64>().to_string())
    } else {
        let mut scores = lines.iter().filter_map(|line| match line {
            Line::Incomplete(missing) if !missing.is_empty() => Some(
                missing.iter().fold(0u64, |acc, &b| 5 * acc + match b {b')' => 1, b']' => 2, b'}' => 3, _ => 4})
            ),
            _ => None
        }).collect::<Vec<_>>();
        if scores.is_empty() {return Err(Error::NoAnswer("no incomplete lines".into()))};
        scores.sort_unstable();
        Ok(scores[scores.len() / 2].to_string())
    }
}
