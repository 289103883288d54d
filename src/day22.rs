use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::parse;

/// Inclusive lower and exclusive upper bound of the initialization region, per axis.
const INIT_REGION: (i64, i64) = (-50, 51);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Instruction {
    turn_on: bool,
    min: [i64; 3],
    max: [i64; 3],
}

impl Instruction {
    fn clip(&self, lo: i64, hi: i64) -> Option<Instruction> {
        let min = self.min.map(|m| m.max(lo));
        let max = self.max.map(|m| m.min(hi));
        (0 .. 3).all(|axis| min[axis] < max[axis]).then_some(Instruction {min, max, ..*self})
    }

    /// The largest absolute bound, or `None` if one is `i64::MIN`.
    fn extent(&self) -> Option<i64> {
        self.min.iter().chain(&self.max).map(|b| b.checked_abs()).try_fold(0, |acc, b| Some(acc.max(b?)))
    }
}

fn parse_instructions(input: &str) -> Result<Vec<Instruction>> {
    let re = Regex::new(r"^(on|off) x=(-?\d+)\.\.(-?\d+),y=(-?\d+)\.\.(-?\d+),z=(-?\d+)\.\.(-?\d+)$")
        .expect("valid pattern");
    parse::lines(input).map(|(ln, line)| {
        let caps = parse::captures(&re, line, ln)?;
        let mut min = [0; 3];
        let mut max = [0; 3];
        for axis in 0 .. 3 {
            let lo: i64 = parse::number(&caps[2 + 2 * axis], ln)?;
            let hi: i64 = parse::number(&caps[3 + 2 * axis], ln)?;
            if lo > hi {
                return Err(Error::parse(ln, format!("empty range {}..{} on axis {}", lo, hi, "xyz".as_bytes()[axis] as char)));
            }
            min[axis] = lo;
            max[axis] = hi.checked_add(1)
                .ok_or_else(|| Error::parse(ln, format!("upper bound {} is too large", hi)))?;
        }
        Ok(Instruction {turn_on: &caps[1] == "on", min, max})
    }).collect()
}

#[derive(Debug)]
enum NodeKind {
    Leaf(bool),
    /// The two halves of the box, lower half first.
    Split(Box<[Node; 2]>),
}

/// A half-open box `[min, max)` that is either uniformly on/off or split in two along one axis.
#[derive(Debug)]
struct Node {
    min: [i64; 3],
    max: [i64; 3],
    kind: NodeKind,
}

impl Node {
    fn empty(extent: i64) -> Node {
        Node {min: [-extent; 3], max: [extent; 3], kind: NodeKind::Leaf(false)}
    }

    fn covered_by(&self, min: &[i64; 3], max: &[i64; 3]) -> bool {
        (0 .. 3).all(|axis| min[axis] <= self.min[axis] && self.max[axis] <= max[axis])
    }

    fn disjoint_from(&self, min: &[i64; 3], max: &[i64; 3]) -> bool {
        (0 .. 3).any(|axis| max[axis] <= self.min[axis] || self.max[axis] <= min[axis])
    }

    /// The first axis, in x, y, z order, on which a bound of `[min, max)` cuts this box strictly
    /// inside. The lower bound is preferred over the upper one.
    fn split_plane(&self, min: &[i64; 3], max: &[i64; 3]) -> Option<(usize, i64)> {
        (0 .. 3).find_map(|axis| {
            let inside = |at: i64| self.min[axis] < at && at < self.max[axis];
            if inside(min[axis]) {
                Some((axis, min[axis]))
            } else if inside(max[axis]) {
                Some((axis, max[axis]))
            } else {
                None
            }
        })
    }

    fn split(&mut self, axis: usize, at: i64, state: bool) {
        let mut low_max = self.max;
        low_max[axis] = at;
        let mut high_min = self.min;
        high_min[axis] = at;
        self.kind = NodeKind::Split(Box::new([
            Node {min: self.min, max: low_max, kind: NodeKind::Leaf(state)},
            Node {min: high_min, max: self.max, kind: NodeKind::Leaf(state)},
        ]));
    }

    fn apply(&mut self, min: &[i64; 3], max: &[i64; 3], state: bool) {
        if self.covered_by(min, max) {
            self.kind = NodeKind::Leaf(state);
            return;
        }
        if self.disjoint_from(min, max) {
            return;
        }
        if let NodeKind::Leaf(current) = self.kind {
            // partial overlap always leaves a bound strictly inside
            let Some((axis, at)) = self.split_plane(min, max) else {return};
            self.split(axis, at, current);
        }
        if let NodeKind::Split(children) = &mut self.kind {
            for child in children.iter_mut() {
                child.apply(min, max, state);
            }
        }
    }

    /// Number of lit cells, or `None` if it does not fit in a `u128`.
    fn volume(&self) -> Option<u128> {
        match &self.kind {
            NodeKind::Leaf(false) => Some(0),
            NodeKind::Leaf(true) => (0 .. 3)
                .map(|axis| (self.max[axis] as i128 - self.min[axis] as i128) as u128)
                .try_fold(1u128, |acc, side| acc.checked_mul(side)),
            NodeKind::Split(children) => children.iter()
                .try_fold(0u128, |acc, child| acc.checked_add(child.volume()?)),
        }
    }

    fn count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Split(children) => 1 + children.iter().map(Node::count).sum::<usize>(),
        }
    }
}

fn reboot(instructions: &[Instruction]) -> Result<u128> {
    let extent = instructions.iter().try_fold(0, |acc, ins| Some(acc.max(ins.extent()?)))
        .ok_or_else(|| Error::Input("coordinates must lie above i64::MIN".into()))?;
    let mut root = Node::empty(extent);
    for ins in instructions {
        root.apply(&ins.min, &ins.max, ins.turn_on);
    }
    debug!("{} instructions, {} tree nodes", instructions.len(), root.count());
    root.volume().ok_or_else(|| Error::NoAnswer("lit volume overflows u128".into()))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut instructions = parse_instructions(input)?;
    if part == 1 {
        let (lo, hi) = INIT_REGION;
        instructions = instructions.iter().filter_map(|ins| ins.clip(lo, hi)).collect();
    }
    Ok(reboot(&instructions)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10
";

    const LARGER: &str = "\
on x=-20..26,y=-36..17,z=-47..7
on x=-20..33,y=-21..23,z=-26..28
on x=-22..28,y=-29..23,z=-38..16
on x=-46..7,y=-6..46,z=-50..-1
on x=-49..1,y=-3..46,z=-24..28
on x=2..47,y=-22..22,z=-23..27
on x=-27..23,y=-28..26,z=-21..29
on x=-39..5,y=-6..47,z=-3..44
on x=-30..21,y=-8..43,z=-13..34
on x=-22..26,y=-27..20,z=-29..19
off x=-48..-32,y=26..41,z=-47..-37
on x=-12..35,y=6..50,z=-50..-2
off x=-48..-32,y=-32..-16,z=-15..-5
on x=-18..26,y=-33..15,z=-7..46
off x=-40..-22,y=-38..-28,z=23..41
on x=-16..35,y=-41..10,z=-47..6
off x=-32..-23,y=11..30,z=-14..3
on x=-49..-5,y=-3..45,z=-29..18
off x=18..30,y=-20..-8,z=-3..13
on x=-41..9,y=-7..43,z=-33..15
on x=-54112..-39298,y=-85059..-49293,z=-27449..7877
on x=967..23432,y=45373..81175,z=27513..53682
";

    fn volume(input: &str) -> u128 {
        reboot(&parse_instructions(input).unwrap()).unwrap()
    }

    #[test]
    fn small_example() {
        assert_eq!(solve(1, SMALL).unwrap(), "39");
        assert_eq!(solve(2, SMALL).unwrap(), "39");
    }

    #[test]
    fn larger_example() {
        assert_eq!(solve(1, LARGER).unwrap(), "590784");
        assert_eq!(solve(2, LARGER).unwrap(), "39769202357779");
    }

    #[test]
    fn touching_boxes_overlap_in_three_cells() {
        let input = "on x=-1..1,y=-1..1,z=-1..1\non x=-100000..-1,y=-50000..50000,z=-100000..-1";
        assert_eq!(volume(input), 100000 * 100001 * 100000 + 24);
    }

    #[test]
    fn on_then_off_is_empty() {
        assert_eq!(volume("on x=-5..5,y=0..3,z=7..9\noff x=-5..5,y=0..3,z=7..9"), 0);
    }

    #[test]
    fn reapplying_last_instruction_is_idempotent() {
        let twice = format!("{}off x=9..11,y=9..11,z=9..11\n", SMALL);
        assert_eq!(volume(&twice), 38);
        let again = format!("{}off x=9..11,y=9..11,z=9..11\n", twice);
        assert_eq!(volume(&again), 38);
        assert_eq!(volume(&format!("{}on x=10..10,y=10..10,z=10..10\n", SMALL)), 39);
    }

    #[test]
    fn disjoint_boxes_add_up() {
        let input = "on x=0..1,y=0..1,z=0..1\non x=5..7,y=5..7,z=5..7\non x=-9..-9,y=0..9,z=0..0";
        assert_eq!(volume(input), 8 + 27 + 10);
    }

    #[test]
    fn init_region_clips() {
        assert_eq!(solve(1, "on x=-100..100,y=0..0,z=0..0").unwrap(), "101");
        assert_eq!(solve(1, "on x=51..60,y=0..0,z=0..0").unwrap(), "0");
        assert_eq!(solve(1, "").unwrap(), "0");
    }

    #[test]
    fn split_prefers_x_then_lower_bound() {
        let node = Node::empty(10);
        assert_eq!(node.split_plane(&[-3, -3, -3], &[3, 3, 3]), Some((0, -3)));
        assert_eq!(node.split_plane(&[-20, -3, -20], &[3, 3, 20]), Some((0, 3)));
        assert_eq!(node.split_plane(&[-20, -20, 2], &[20, 20, 20]), Some((2, 2)));
    }

    #[test]
    fn same_state_leaf_is_still_split() {
        let mut root = Node::empty(4);
        root.apply(&[0; 3], &[2; 3], false);
        assert!(root.count() > 1);
        assert_eq!(root.volume(), Some(0));
    }

    #[test]
    fn huge_boxes() {
        let side = 4_000_001u128;
        assert_eq!(solve(2, "on x=-2000000..2000000,y=-2000000..2000000,z=-2000000..2000000").unwrap(),
                   (side * side * side).to_string());
        let full = "on x=-9223372036854775807..9223372036854775806,y=0..0,z=0..0";
        assert_eq!(solve(2, full).unwrap(), (u64::MAX as u128 - 1).to_string());
        assert!(matches!(solve(2, "on x=0..9223372036854775807,y=0..0,z=0..0"), Err(Error::Parse {line: 1, ..})));
        assert!(matches!(solve(2, "on x=-9223372036854775808..0,y=0..0,z=0..0"), Err(Error::Input(_))));
        let cube = "on x=-9223372036854775807..9223372036854775806,\
                    y=-9223372036854775807..9223372036854775806,\
                    z=-9223372036854775807..9223372036854775806";
        assert!(matches!(solve(2, cube), Err(Error::NoAnswer(_))));
    }

    #[test]
    fn reversed_range_is_rejected() {
        match parse_instructions("on x=3..1,y=0..0,z=0..0") {
            Err(Error::Parse {line, ..}) => assert_eq!(line, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_instructions("toggle x=0..1,y=0..0,z=0..0").is_err());
    }
}
