use std::fmt;

use bitvec::prelude::*;

use crate::error::{Error, Result};

struct BitReader {
    bits: BitVec<u8, Msb0>,
    pos: usize,
}

impl BitReader {
    fn from_hex(hex: &str) -> Result<BitReader> {
        let mut bits = BitVec::with_capacity(4 * hex.len());
        for (ix, c) in hex.chars().enumerate() {
            let nibble = c.to_digit(16)
                .ok_or_else(|| Error::parse(1, format!("bad hex digit {:?} at offset {}", c, ix)))?;
            for shift in (0 .. 4).rev() {
                bits.push(nibble >> shift & 1 == 1);
            }
        }
        Ok(BitReader {bits, pos: 0})
    }

    /// Reads `n` bits as an unsigned big-endian number.
    fn read(&mut self, n: usize) -> Result<u64> {
        let field = self.bits.get(self.pos .. self.pos + n)
            .ok_or_else(|| Error::Input(format!("packet stream ends early at bit {}", self.pos)))?;
        self.pos += n;
        Ok(field.iter().by_vals().fold(0, |acc, bit| acc << 1 | bit as u64))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {Sum, Product, Min, Max, Greater, Less, Equal}

#[derive(Debug)]
enum Packet {
    Literal {version: u8, value: u64},
    Operator {version: u8, op: Op, args: Vec<Packet>},
}

fn parse_packet(r: &mut BitReader) -> Result<Packet> {
    let version = r.read(3)? as u8;
    let op = match r.read(3)? {
        4 => {
            let mut value = 0u64;
            loop {
                let more = r.read(1)? == 1;
                if value >> 60 != 0 {return Err(Error::Input("literal does not fit in 64 bits".into()))};
                value = value << 4 | r.read(4)?;
                if !more {break};
            }
            return Ok(Packet::Literal {version, value});
        }
        0 => Op::Sum, 1 => Op::Product, 2 => Op::Min, 3 => Op::Max,
        5 => Op::Greater, 6 => Op::Less, 7 => Op::Equal,
        id => return Err(Error::Input(format!("unknown packet type {}", id)))
    };

    let mut args = vec![];
    if r.read(1)? == 0 {
        let end = r.read(15)? as usize + r.pos;
        while r.pos < end {
            args.push(parse_packet(r)?);
        }
        if r.pos != end {
            return Err(Error::Input(format!("sub-packets overrun their length at bit {}", r.pos)));
        }
    } else {
        for _ in 0 .. r.read(11)? {
            args.push(parse_packet(r)?);
        }
    }

    let arity_ok = match op {
        Op::Greater | Op::Less | Op::Equal => args.len() == 2,
        _ => !args.is_empty()
    };
    if !arity_ok {
        return Err(Error::Input(format!("{:?} packet with {} operands", op, args.len())));
    }
    Ok(Packet::Operator {version, op, args})
}

impl Packet {
    fn version_sum(&self) -> u64 {
        match self {
            Packet::Literal {version, ..} => *version as u64,
            Packet::Operator {version, args, ..} =>
                *version as u64 + args.iter().map(Packet::version_sum).sum::<u64>(),
        }
    }

    fn eval(&self) -> Result<u64> {
        let overflow = || Error::NoAnswer("expression overflows 64 bits".into());
        let (op, args) = match self {
            Packet::Literal {value, ..} => return Ok(*value),
            Packet::Operator {op, args, ..} => (*op, args),
        };
        let values = args.iter().map(Packet::eval).collect::<Result<Vec<_>>>()?;
        Ok(match op {
            Op::Sum => values.iter().try_fold(0u64, |a, &v| a.checked_add(v)).ok_or_else(overflow)?,
            Op::Product => values.iter().try_fold(1u64, |a, &v| a.checked_mul(v)).ok_or_else(overflow)?,
            Op::Min => values.iter().copied().min().unwrap_or(0),
            Op::Max => values.iter().copied().max().unwrap_or(0),
            Op::Greater => (values[0] > values[1]) as u64,
            Op::Less => (values[0] < values[1]) as u64,
            Op::Equal => (values[0] == values[1]) as u64,
        })
    }
}

/// Renders the packet as an S-expression, e.g. `(+ 1 (* 2 3))`.
impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (op, args) = match self {
            Packet::Literal {value, ..} => return write!(f, "{}", value),
            Packet::Operator {op, args, ..} => (op, args),
        };
        let symbol = match op {
            Op::Sum => "+", Op::Product => "*", Op::Min => "min", Op::Max => "max",
            Op::Greater => ">", Op::Less => "<", Op::Equal => "=",
        };
        write!(f, "({}", symbol)?;
        for arg in args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

fn decode(input: &str) -> Result<Packet> {
    let mut reader = BitReader::from_hex(input.trim())?;
    parse_packet(&mut reader)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let packet = decode(input)?;
    log::debug!("decoded {}", packet);
    if part == 1 {
        Ok(packet.version_sum().to_string())
    } else {
        Ok(packet.eval()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal() {
        match decode("D2FE28").unwrap() {
            Packet::Literal {version, value} => assert_eq!((version, value), (6, 2021)),
            other => panic!("expected a literal, got {}", other),
        }
    }

    #[test]
    fn version_sums() {
        assert_eq!(solve(1, "8A004A801A8002F478").unwrap(), "16");
        assert_eq!(solve(1, "620080001611562C8802118E34").unwrap(), "12");
        assert_eq!(solve(1, "C0015000016115A2E0802F182340").unwrap(), "23");
        assert_eq!(solve(1, "A0016C880162017C3686B18A3D4780").unwrap(), "31");
    }

    #[test]
    fn values() {
        assert_eq!(solve(2, "C200B40A82").unwrap(), "3");
        assert_eq!(solve(2, "04005AC33890").unwrap(), "54");
        assert_eq!(solve(2, "880086C3E88112").unwrap(), "7");
        assert_eq!(solve(2, "CE00C43D881120").unwrap(), "9");
        assert_eq!(solve(2, "D8005AC2A8F0").unwrap(), "1");
        assert_eq!(solve(2, "F600BC2D8F").unwrap(), "0");
        assert_eq!(solve(2, "9C005AC2F8F0").unwrap(), "0");
        assert_eq!(solve(2, "9C0141080250320F1802104A08").unwrap(), "1");
    }

    #[test]
    fn renders_s_expressions() {
        assert_eq!(decode("C200B40A82").unwrap().to_string(), "(+ 1 2)");
        assert_eq!(decode("9C0141080250320F1802104A08").unwrap().to_string(), "(= (+ 1 3) (* 2 2))");
    }

    #[test]
    fn truncated_stream() {
        assert!(solve(1, "C200B4").is_err());
        assert!(solve(1, "XYZ").is_err());
    }
}
