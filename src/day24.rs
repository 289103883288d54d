use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::parse;

const W: usize = 0;
const X: usize = 1;
const Y: usize = 2;
const Z: usize = 3;

const BLOCKS: usize = 14;
const BLOCK_LEN: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {Add, Mul, Div, Mod, Eql, Neq}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arg {Reg(usize), Lit(i64)}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Instr {
    Inp(usize),
    Op(Op, usize, Arg),
}

fn register(s: &str, ln: usize) -> Result<usize> {
    match s {
        "w" => Ok(W),
        "x" => Ok(X),
        "y" => Ok(Y),
        "z" => Ok(Z),
        _ => Err(Error::parse(ln, format!("unknown register {:?}", s))),
    }
}

fn parse_program(input: &str) -> Result<Vec<Instr>> {
    parse::lines(input).filter(|(_, line)| !line.trim().is_empty()).map(|(ln, line)| {
        let words = line.split_whitespace().collect::<Vec<_>>();
        let op = match words[0] {
            "inp" if words.len() == 2 => return Ok(Instr::Inp(register(words[1], ln)?)),
            "add" => Op::Add,
            "mul" => Op::Mul,
            "div" => Op::Div,
            "mod" => Op::Mod,
            "eql" => Op::Eql,
            _ => return Err(Error::parse(ln, format!("unknown instruction {:?}", line))),
        };
        if words.len() != 3 {
            return Err(Error::parse(ln, format!("expected two operands in {:?}", line)));
        }
        let arg = match words[2].parse() {
            Ok(n) => Arg::Lit(n),
            Err(_) => Arg::Reg(register(words[2], ln)?),
        };
        Ok(Instr::Op(op, register(words[1], ln)?, arg))
    }).collect()
}

/// Applies one ALU operation. Division truncates toward zero.
fn apply(op: Op, a: i64, b: i64) -> Result<i64> {
    let value = match op {
        Op::Add => a.checked_add(b),
        Op::Mul => a.checked_mul(b),
        Op::Div if b == 0 => return Err(Error::Input(format!("division of {} by zero", a))),
        Op::Div => a.checked_div(b),
        Op::Mod if a < 0 || b <= 0 => return Err(Error::Input(format!("{} mod {} is undefined", a, b))),
        Op::Mod => Some(a % b),
        Op::Eql => Some((a == b) as i64),
        Op::Neq => Some((a != b) as i64),
    };
    value.ok_or_else(|| Error::Input(format!("overflow in {:?} of {} and {}", op, a, b)))
}

fn run(program: &[Instr], digits: &[i64]) -> Result<[i64; 4]> {
    let mut regs = [0; 4];
    let mut input = digits.iter();
    for instr in program {
        match *instr {
            Instr::Inp(r) => {
                regs[r] = *input.next().ok_or_else(|| Error::Input("program reads past the end of its input".into()))?;
            }
            Instr::Op(op, r, arg) => {
                let b = match arg {
                    Arg::Reg(s) => regs[s],
                    Arg::Lit(n) => n,
                };
                regs[r] = apply(op, regs[r], b)?;
            }
        }
    }
    Ok(regs)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operand {Const(i64), Var(usize)}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expr {
    /// The n-th input digit, 1 through 9.
    Input(usize),
    Binary(Op, Operand, Operand),
}

type Range = (i128, i128);

/// The program in single-assignment form. Every assignment carries the range of values it can take.
#[derive(Clone, Debug)]
struct Ssa {
    exprs: Vec<Expr>,
    ranges: Vec<Range>,
    regs: [Operand; 4],
}

impl Ssa {
    fn build(program: &[Instr]) -> Ssa {
        let mut ssa = Ssa {exprs: Vec::new(), ranges: Vec::new(), regs: [Operand::Const(0); 4]};
        let mut inputs = 0;
        for instr in program {
            match *instr {
                Instr::Inp(r) => {
                    ssa.regs[r] = ssa.push(Expr::Input(inputs), (1, 9));
                    inputs += 1;
                }
                Instr::Op(op, r, arg) => {
                    let b = match arg {
                        Arg::Reg(s) => ssa.regs[s],
                        Arg::Lit(n) => Operand::Const(n),
                    };
                    ssa.regs[r] = ssa.binary(op, ssa.regs[r], b);
                }
            }
        }
        ssa
    }

    fn push(&mut self, expr: Expr, range: Range) -> Operand {
        self.exprs.push(expr);
        self.ranges.push(range);
        Operand::Var(self.exprs.len() - 1)
    }

    fn range(&self, o: Operand) -> Range {
        match o {
            Operand::Const(c) => (c as i128, c as i128),
            Operand::Var(v) => self.ranges[v],
        }
    }

    fn within(&self, o: Operand, lo: i128, hi: i128) -> bool {
        let (a, b) = self.range(o);
        lo <= a && b <= hi
    }

    /// Emits `op(a, b)`, folded to something cheaper where the operands allow it.
    fn binary(&mut self, op: Op, a: Operand, b: Operand) -> Operand {
        use Operand::*;

        if let (Const(x), Const(y)) = (a, b) {
            if let Ok(v) = apply(op, x, y) {
                return Const(v);
            }
        }
        let (a, b) = match (op, a) {
            (Op::Add | Op::Mul | Op::Eql | Op::Neq, Const(_)) => (b, a),
            _ => (a, b),
        };
        let (ra, rb) = (self.range(a), self.range(b));

        match (op, b) {
            (Op::Add, Const(0)) | (Op::Mul, Const(1)) | (Op::Div, Const(1)) => return a,
            (Op::Mul, Const(0)) | (Op::Mod, Const(1)) => return Const(0),
            (Op::Add, Const(c)) => {
                if let Var(v) = a {
                    let expr = self.exprs[v];
                    if let Expr::Binary(Op::Add, inner, Const(d)) = expr {
                        if let Some(sum) = c.checked_add(d) {
                            return self.binary(Op::Add, inner, Const(sum));
                        }
                    }
                }
            }
            (Op::Div, Const(c)) if c > 0 && self.within(a, 0, c as i128 - 1) => return Const(0),
            (Op::Mod, Const(c)) if c > 0 && self.within(a, 0, c as i128 - 1) => return a,
            (Op::Eql | Op::Neq, _) if a == b => return Const((op == Op::Eql) as i64),
            (Op::Eql | Op::Neq, _) if ra.1 < rb.0 || rb.1 < ra.0 => return Const((op == Op::Neq) as i64),
            (Op::Eql, Const(flag @ (0 | 1))) => {
                if let Var(v) = a {
                    let expr = self.exprs[v];
                    match expr {
                        Expr::Binary(Op::Eql, x, y) if flag == 0 => return self.binary(Op::Neq, x, y),
                        Expr::Binary(Op::Neq, x, y) if flag == 0 => return self.binary(Op::Eql, x, y),
                        Expr::Binary(Op::Eql | Op::Neq, _, _) => return a,
                        _ => {}
                    }
                }
            }
            _ => {}
        }

        let range = match op {
            Op::Add => (ra.0.saturating_add(rb.0), ra.1.saturating_add(rb.1)),
            Op::Mul => {
                let products = [ra.0.saturating_mul(rb.0), ra.0.saturating_mul(rb.1),
                                ra.1.saturating_mul(rb.0), ra.1.saturating_mul(rb.1)];
                (products.into_iter().min().unwrap_or(0), products.into_iter().max().unwrap_or(0))
            }
            Op::Div => match b {
                Const(c) if c > 0 => (ra.0 / c as i128, ra.1 / c as i128),
                Const(c) if c < 0 => (ra.1 / c as i128, ra.0 / c as i128),
                _ => {
                    let m = ra.0.abs().max(ra.1.abs());
                    (-m, m)
                }
            },
            Op::Mod => (0, rb.1.saturating_sub(1).clamp(0, ra.1.max(0))),
            Op::Eql | Op::Neq => (0, 1),
        };
        self.push(Expr::Binary(op, a, b), range)
    }

    /// Drops every assignment `z` does not depend on.
    fn prune(&self) -> Ssa {
        let mut live = vec![false; self.exprs.len()];
        if let Operand::Var(v) = self.regs[Z] {
            live[v] = true;
        }
        for v in (0 .. self.exprs.len()).rev() {
            if !live[v] {
                continue;
            }
            if let Expr::Binary(_, a, b) = self.exprs[v] {
                for o in [a, b] {
                    if let Operand::Var(u) = o {
                        live[u] = true;
                    }
                }
            }
        }

        let mut renamed = vec![0; self.exprs.len()];
        let rename = |renamed: &[usize], o: Operand| match o {
            Operand::Var(v) => Operand::Var(renamed[v]),
            c => c,
        };
        let mut pruned = Ssa {exprs: Vec::new(), ranges: Vec::new(), regs: [Operand::Const(0); 4]};
        for v in (0 .. self.exprs.len()).filter(|&v| live[v]) {
            let expr = match self.exprs[v] {
                Expr::Binary(op, a, b) => Expr::Binary(op, rename(&renamed, a), rename(&renamed, b)),
                input => input,
            };
            renamed[v] = pruned.exprs.len();
            pruned.push(expr, self.ranges[v]);
        }
        pruned.regs[Z] = rename(&renamed, self.regs[Z]);
        pruned
    }

    fn eval(&self, digits: &[i64]) -> Result<i64> {
        let mut values = Vec::with_capacity(self.exprs.len());
        let value = |values: &[i64], o: Operand| match o {
            Operand::Const(c) => c,
            Operand::Var(v) => values[v],
        };
        for expr in &self.exprs {
            let v = match *expr {
                Expr::Input(n) => *digits.get(n).ok_or_else(|| Error::Input(format!("missing input digit {}", n)))?,
                Expr::Binary(op, a, b) => apply(op, value(&values, a), value(&values, b))?,
            };
            values.push(v);
        }
        Ok(value(&values, self.regs[Z]))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(c) => write!(f, "{}", c),
            Operand::Var(v) => write!(f, "v{}", v),
        }
    }
}

impl fmt::Display for Ssa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (v, expr) in self.exprs.iter().enumerate() {
            match expr {
                Expr::Input(n) => writeln!(f, "v{} = input[{}]", v, n)?,
                Expr::Binary(op, a, b) => {
                    let sym = match op {
                        Op::Add => "+", Op::Mul => "*", Op::Div => "/", Op::Mod => "%", Op::Eql => "==", Op::Neq => "!=",
                    };
                    writeln!(f, "v{} = {} {} {}", v, a, sym, b)?
                }
            }
        }
        write!(f, "z = {}", self.regs[Z])
    }
}

/// The 18 instructions every MONAD block consists of.
fn monad_block(div: i64, add_x: i64, add_y: i64) -> String {
    format!("inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {}\nadd x {}\neql x w\neql x 0\nmul y 0\n\
             add y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {}\nmul y x\nadd z y\n",
            div, add_x, add_y)
}

/// Pairs each popping block with the pushing block it cancels: `w[pop] = w[push] + offset`.
fn digit_pairs(program: &[Instr]) -> Result<Vec<(usize, usize, i64)>> {
    if program.len() != BLOCKS * BLOCK_LEN {
        return Err(Error::Input(format!("expected {} instructions, found {}", BLOCKS * BLOCK_LEN, program.len())));
    }
    let mut pairs = Vec::new();
    let mut pushed = Vec::new();
    for (ix, block) in program.chunks(BLOCK_LEN).enumerate() {
        let (div, add_x, add_y) = match (block[4], block[5], block[15]) {
            (Instr::Op(Op::Div, Z, Arg::Lit(a)), Instr::Op(Op::Add, X, Arg::Lit(b)), Instr::Op(Op::Add, Y, Arg::Lit(c))) => (a, b, c),
            _ => return Err(Error::Input(format!("block {} does not have the expected shape", ix + 1))),
        };
        if parse_program(&monad_block(div, add_x, add_y))? != block {
            return Err(Error::Input(format!("block {} does not have the expected shape", ix + 1)));
        }
        match div {
            1 => pushed.push((ix, add_y)),
            26 => {
                let (push, add_y) = pushed.pop()
                    .ok_or_else(|| Error::Input(format!("block {} pops an empty stack", ix + 1)))?;
                pairs.push((push, ix, add_y + add_x));
            }
            _ => return Err(Error::Input(format!("block {} divides z by {}", ix + 1, div))),
        }
    }
    if !pushed.is_empty() {
        return Err(Error::Input(format!("{} blocks are never popped", pushed.len())));
    }
    Ok(pairs)
}

fn model_number(pairs: &[(usize, usize, i64)], largest: bool) -> Result<[i64; BLOCKS]> {
    let mut digits = [0; BLOCKS];
    for &(push, pop, offset) in pairs {
        if offset.abs() > 8 {
            return Err(Error::NoAnswer(format!("digits {} and {} cannot differ by {}", push + 1, pop + 1, offset)));
        }
        let base = if largest {9 - offset.max(0)} else {1 - offset.min(0)};
        digits[push] = base;
        digits[pop] = base + offset;
    }
    Ok(digits)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let program = parse_program(input)?;
    let pairs = digit_pairs(&program)?;
    let digits = model_number(&pairs, part == 1)?;

    let ssa = Ssa::build(&program).prune();
    debug!("{} instructions, {} live assignments", program.len(), ssa.exprs.len());
    debug!("optimized program:\n{}", ssa);
    let z = run(&program, &digits)?[Z];
    if z != 0 || ssa.eval(&digits)? != 0 {
        return Err(Error::NoAnswer(format!("derived model number leaves z = {}", z)));
    }
    Ok(digits.iter().map(|d| d.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: [(i64, i64, i64); BLOCKS] = [
        (1, 11, 6), (1, 13, 8), (26, -3, 0), (1, 15, 2), (26, -7, 0), (1, 10, 12), (1, 14, 1),
        (26, -1, 0), (26, -12, 0), (1, 12, 4), (26, -8, 0), (1, 11, 5), (26, -2, 0), (26, -6, 0),
    ];

    fn monad(params: &[(i64, i64, i64)]) -> String {
        params.iter().map(|&(a, b, c)| monad_block(a, b, c)).collect()
    }

    fn digits(s: &str) -> Vec<i64> {
        s.bytes().map(|b| (b - b'0') as i64).collect()
    }

    #[test]
    fn negate() {
        let program = parse_program("inp x\nmul x -1").unwrap();
        assert_eq!(run(&program, &[7]).unwrap()[X], -7);
    }

    #[test]
    fn binary_digits() {
        let program = parse_program("\
inp w
add z w
mod z 2
div w 2
add y w
mod y 2
div w 2
add x w
mod x 2
div w 2
mod w 2").unwrap();
        assert_eq!(run(&program, &[13]).unwrap(), [1, 1, 0, 1]);
    }

    #[test]
    fn arithmetic_errors() {
        assert!(run(&parse_program("inp x\ndiv x 0").unwrap(), &[5]).is_err());
        assert!(run(&parse_program("inp x\nmul x -1\nmod x 3").unwrap(), &[5]).is_err());
        assert!(run(&parse_program("inp x\nmod x 0").unwrap(), &[5]).is_err());
        assert!(run(&parse_program("inp x\ninp y").unwrap(), &[5]).is_err());
        assert_eq!(run(&parse_program("inp x\ndiv x -2").unwrap(), &[7]).unwrap()[X], -3);
    }

    #[test]
    fn malformed_programs() {
        assert!(parse_program("inp q").is_err());
        assert!(parse_program("sub x 1").is_err());
        assert!(parse_program("add x").is_err());
    }

    #[test]
    fn constant_chains_merge() {
        let ssa = Ssa::build(&parse_program("inp w\nadd z w\nadd z 2\nadd z 3\nmul z 1").unwrap()).prune();
        assert_eq!(ssa.exprs, vec![Expr::Input(0), Expr::Binary(Op::Add, Operand::Var(0), Operand::Const(5))]);
        assert_eq!(ssa.ranges[1], (6, 14));
        assert_eq!(ssa.eval(&[4]).unwrap(), 9);
    }

    #[test]
    fn disjoint_comparison_folds() {
        let ssa = Ssa::build(&parse_program("inp w\nadd x 10\neql x w\neql x 0\nmul z x").unwrap()).prune();
        assert_eq!(ssa.regs[Z], Operand::Const(0));
        assert!(ssa.exprs.is_empty());
    }

    #[test]
    fn negated_comparison() {
        let ssa = Ssa::build(&parse_program("inp w\ninp x\neql x w\neql x 0\nadd z x").unwrap()).prune();
        assert!(matches!(ssa.exprs.last(), Some(Expr::Binary(Op::Neq, _, _))));
        assert_eq!(ssa.eval(&[3, 3]).unwrap(), 0);
        assert_eq!(ssa.eval(&[3, 4]).unwrap(), 1);
    }

    #[test]
    fn small_values_survive_mod() {
        let ssa = Ssa::build(&parse_program("inp z\nmod z 26\ninp x\ndiv x 10\nadd z x").unwrap()).prune();
        assert_eq!(ssa.regs[Z], Operand::Var(0));
        assert_eq!(ssa.exprs, vec![Expr::Input(0)]);
    }

    #[test]
    fn optimized_monad_agrees_with_interpreter() {
        let program = parse_program(&monad(&PARAMS)).unwrap();
        let full = Ssa::build(&program);
        let ssa = full.prune();
        assert!(ssa.exprs.len() < program.len());
        for input in ["13579246899999", "11111111111111", "94994999995699", "98765432198765"] {
            let digits = digits(input);
            assert_eq!(ssa.eval(&digits).unwrap(), run(&program, &digits).unwrap()[Z], "{}", input);
        }
        assert!(ssa.to_string().starts_with("v0 = input[0]"));
    }

    #[test]
    fn model_numbers() {
        let input = monad(&PARAMS);
        assert_eq!(solve(1, &input).unwrap(), "94994999995699");
        assert_eq!(solve(2, &input).unwrap(), "11661111151141");
    }

    #[test]
    fn pop_offsets_do_not_matter() {
        let mut params = PARAMS;
        params[2].2 = 16;
        params[13].2 = 7;
        assert_eq!(solve(1, &monad(&params)).unwrap(), "94994999995699");
    }

    #[test]
    fn unsolvable_and_misshapen() {
        let mut params = PARAMS;
        params[2].1 = 5;
        assert!(matches!(solve(1, &monad(&params)), Err(Error::NoAnswer(_))));
        assert!(matches!(solve(1, &monad(&PARAMS[.. 13])), Err(Error::Input(_))));
        let tampered = monad(&PARAMS).replacen("mod x 26", "mod x 25", 1);
        assert!(matches!(solve(1, &tampered), Err(Error::Input(_))));
    }
}
