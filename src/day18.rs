use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::parse;

#[derive(Clone, Debug, PartialEq)]
enum Number {
    Regular(u32),
    Pair(Box<Number>, Box<Number>),
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl Parser<'_> {
    fn expect(&mut self, b: u8) -> Result<()> {
        if self.bytes.get(self.pos) == Some(&b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::parse(self.line, format!("expected '{}' at column {}", b as char, self.pos + 1)))
        }
    }

    fn number(&mut self) -> Result<Number> {
        if self.bytes.get(self.pos) == Some(&b'[') {
            self.pos += 1;
            let left = self.number()?;
            self.expect(b',')?;
            let right = self.number()?;
            self.expect(b']')?;
            return Ok(Number::Pair(Box::new(left), Box::new(right)));
        }
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(Error::parse(self.line, format!("expected a number at column {}", start + 1)));
        }
        Ok(Number::Regular(parse::number(&self.text[start .. self.pos], self.line)?))
    }
}

fn parse_number(line: &str, ln: usize) -> Result<Number> {
    let mut parser = Parser {text: line, bytes: line.as_bytes(), pos: 0, line: ln};
    let number = parser.number()?;
    if parser.pos != line.len() {
        return Err(Error::parse(ln, format!("trailing input at column {}", parser.pos + 1)));
    }
    Ok(number)
}

impl Number {
    fn add_leftmost(&mut self, n: u32) {
        match self {
            Number::Regular(v) => *v += n,
            Number::Pair(left, _) => left.add_leftmost(n),
        }
    }

    fn add_rightmost(&mut self, n: u32) {
        match self {
            Number::Regular(v) => *v += n,
            Number::Pair(_, right) => right.add_rightmost(n),
        }
    }

    /// Explodes the leftmost pair nested inside four pairs. Returns the values
    /// still to be added to the left and right neighbours.
    fn explode(&mut self, depth: usize) -> Option<(u32, u32)> {
        let Number::Pair(left, right) = self else {return None};
        if depth >= 4 {
            if let (Number::Regular(a), Number::Regular(b)) = (left.as_ref(), right.as_ref()) {
                let carry = (*a, *b);
                *self = Number::Regular(0);
                return Some(carry);
            }
        }
        if let Some((a, b)) = left.explode(depth + 1) {
            right.add_leftmost(b);
            return Some((a, 0));
        }
        if let Some((a, b)) = right.explode(depth + 1) {
            left.add_rightmost(a);
            return Some((0, b));
        }
        None
    }

    fn split(&mut self) -> bool {
        match self {
            Number::Regular(v) if *v >= 10 => {
                let v = *v;
                *self = Number::Pair(Box::new(Number::Regular(v / 2)), Box::new(Number::Regular(v - v / 2)));
                true
            }
            Number::Regular(_) => false,
            Number::Pair(left, right) => left.split() || right.split(),
        }
    }

    fn reduce(&mut self) {
        while self.explode(0).is_some() || self.split() {}
    }

    fn add(self, other: Number) -> Number {
        let mut sum = Number::Pair(Box::new(self), Box::new(other));
        sum.reduce();
        sum
    }

    fn magnitude(&self) -> u64 {
        match self {
            Number::Regular(v) => *v as u64,
            Number::Pair(left, right) => 3 * left.magnitude() + 2 * right.magnitude(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Regular(v) => write!(f, "{}", v),
            Number::Pair(left, right) => write!(f, "[{},{}]", left, right),
        }
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let numbers = parse::lines(input).map(|(ln, line)| parse_number(line, ln)).collect::<Result<Vec<_>>>()?;
    if part == 1 {
        let sum = numbers.into_iter().reduce(Number::add)
            .ok_or_else(|| Error::Input("no numbers".into()))?;
        debug!("final sum: {}", sum);
        Ok(sum.magnitude().to_string())
    } else {
        let mut best = None;
        for (i, a) in numbers.iter().enumerate() {
            for (j, b) in numbers.iter().enumerate() {
                if i == j {continue};
                let magnitude = a.clone().add(b.clone()).magnitude();
                best = best.max(Some(magnitude));
            }
        }
        best.map(|m| m.to_string()).ok_or_else(|| Error::Input("need at least two numbers".into()))
    }
}
