use std::cmp::Reverse;
use std::collections::BinaryHeap;

use arrayvec::ArrayVec;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parse;

const ROOM_X: [usize; 4] = [2, 4, 6, 8];
const ENERGY: [u32; 4] = [1, 10, 100, 1000];
const UNFOLDED: [&str; 2] = ["  #D#C#B#A#", "  #D#B#A#C#"];
const MAX_DEPTH: usize = 4;

type Room = ArrayVec<u8, MAX_DEPTH>;

/// Amphipod kinds are 0..4 for A..D. Rooms are stacks, bottom first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Burrow {
    hallway: [Option<u8>; 11],
    rooms: [Room; 4],
}

impl Burrow {
    fn parse(input: &str, unfold: bool) -> Result<(Burrow, usize)> {
        let mut rows = parse::lines(input)
            .filter(|(_, line)| line.bytes().any(|b| b.is_ascii_uppercase()))
            .collect::<Vec<_>>();
        if rows.len() != 2 {
            return Err(Error::Input(format!("expected 2 room rows, found {}", rows.len())));
        }
        if unfold {
            let ln = rows[0].0;
            for (ix, &row) in UNFOLDED.iter().enumerate() {
                rows.insert(1 + ix, (ln, row));
            }
        }
        let depth = rows.len();

        let mut rooms: [Room; 4] = Default::default();
        for &(ln, row) in rows.iter().rev() {
            for (room, &x) in rooms.iter_mut().zip(&ROOM_X) {
                let kind = match row.as_bytes().get(x + 1) {
                    Some(&b @ b'A' ..= b'D') => b - b'A',
                    _ => return Err(Error::parse(ln, format!("expected an amphipod in column {}", x + 2))),
                };
                room.push(kind);
            }
        }
        for kind in 0 .. 4 {
            let count = rooms.iter().flatten().filter(|&&k| k == kind).count();
            if count != depth {
                return Err(Error::Input(format!("{} amphipods of kind {}, expected {}", count, (b'A' + kind) as char, depth)));
            }
        }
        Ok((Burrow {hallway: [None; 11], rooms}, depth))
    }

    fn done(&self, depth: usize) -> bool {
        self.rooms.iter().enumerate().all(|(kind, room)| room.len() == depth && room.iter().all(|&k| k as usize == kind))
    }

    fn settled(&self, room: usize) -> bool {
        self.rooms[room].iter().all(|&k| k as usize == room)
    }

    fn moves(&self, depth: usize) -> Vec<(u32, Burrow)> {
        let mut moves = Vec::new();

        for (room, &x) in ROOM_X.iter().enumerate() {
            if self.settled(room) {
                continue;
            }
            let mut next = self.clone();
            let Some(kind) = next.rooms[room].pop() else {continue};
            let exit = 1 + depth - self.rooms[room].len();
            let left = (0 ..= x).rev();
            let right = x .. self.hallway.len();
            for path in [left.collect::<Vec<_>>(), right.collect()] {
                for p in path {
                    if self.hallway[p].is_some() {
                        break;
                    }
                    if ROOM_X.contains(&p) {
                        continue;
                    }
                    let mut moved = next.clone();
                    moved.hallway[p] = Some(kind);
                    moves.push(((exit + p.abs_diff(x)) as u32 * ENERGY[kind as usize], moved));
                }
            }
        }

        for (p, cell) in self.hallway.iter().enumerate() {
            let Some(kind) = *cell else {continue};
            let room = kind as usize;
            if !self.settled(room) {
                continue;
            }
            let x = ROOM_X[room];
            let (a, b) = if p < x {(p + 1, x)} else {(x, p - 1)};
            if self.hallway[a ..= b].iter().any(Option::is_some) {
                continue;
            }
            let mut moved = self.clone();
            moved.hallway[p] = None;
            moved.rooms[room].push(kind);
            let steps = p.abs_diff(x) + depth - self.rooms[room].len();
            moves.push((steps as u32 * ENERGY[room], moved));
        }

        moves
    }
}

fn organize(start: Burrow, depth: usize) -> Result<u32> {
    let mut best = FxHashMap::default();
    best.insert(start.clone(), 0);
    let mut queue = BinaryHeap::from([Reverse((0, start))]);
    while let Some(Reverse((cost, burrow))) = queue.pop() {
        if burrow.done(depth) {
            debug!("{} states reached", best.len());
            return Ok(cost);
        }
        if best.get(&burrow).is_some_and(|&c| c < cost) {
            continue;
        }
        for (step, next) in burrow.moves(depth) {
            let total = cost + step;
            if best.get(&next).map_or(true, |&c| total < c) {
                best.insert(next.clone(), total);
                queue.push(Reverse((total, next)));
            }
        }
    }
    Err(Error::NoAnswer("the amphipods cannot be organized".into()))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (burrow, depth) = Burrow::parse(input, part == 2)?;
    Ok(organize(burrow, depth)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "12521");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "44169");
    }

    #[test]
    fn rooms_are_stacked_bottom_first() {
        let (burrow, depth) = Burrow::parse(EXAMPLE, true).unwrap();
        assert_eq!(depth, 4);
        assert_eq!(burrow.rooms[0].as_slice(), &[0, 3, 3, 1]);
        assert_eq!(burrow.rooms[3].as_slice(), &[0, 2, 0, 3]);
    }

    #[test]
    fn sorted_burrow_costs_nothing() {
        let sorted = "#############\n#...........#\n###A#B#C#D###\n  #A#B#C#D#\n  #########";
        assert_eq!(solve(1, sorted).unwrap(), "0");
    }

    #[test]
    fn single_swap() {
        let input = "#############\n#...........#\n###B#A#C#D###\n  #A#B#C#D#\n  #########";
        // B waits at x=3 for 2 + 2 steps, A waits at x=5 for 2 + 4 steps
        assert_eq!(solve(1, input).unwrap(), "46");
    }

    #[test]
    fn wrong_counts_are_rejected() {
        let input = "#############\n#...........#\n###A#A#C#D###\n  #A#B#C#D#\n  #########";
        assert!(solve(1, input).is_err());
    }
}
