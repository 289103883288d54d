use crate::error::{Error, Result};
use crate::parse;

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut x = 0i64;
    let mut depth = 0i64;
    let mut aim = 0i64;
    for (ln, line) in parse::lines(input) {
        let (word, num) = line.split_once(' ')
            .ok_or_else(|| Error::parse(ln, "expected a command and a distance"))?;
        let num: i64 = parse::number(num, ln)?;
        match (part, word) {
            (1, "forward") => x += num,
            (1, "down") => depth += num,
            (1, "up") => depth -= num,
            (_, "forward") => {x += num; depth += num * aim},
            (_, "down") => aim += num,
            (_, "up") => aim -= num,
            _ => return Err(Error::parse(ln, format!("unknown command {:?}", word)))
        }
    }
    Ok((x * depth).to_string())
}
