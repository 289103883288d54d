use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parse;

/// How many of the 27 Dirac roll outcomes sum to 3, 4, ..., 9.
const DIRAC_SUMS: [(u32, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];

fn advance(pos: u32, by: u32) -> u32 {
    (pos + by - 1) % 10 + 1
}

fn parse_positions(input: &str) -> Result<[u32; 2]> {
    let re = Regex::new(r"^Player (\d) starting position: (\d+)$").expect("valid pattern");
    let mut positions = [None; 2];
    for (ln, line) in parse::lines(input) {
        let caps = parse::captures(&re, line, ln)?;
        let player: usize = parse::number(&caps[1], ln)?;
        let pos: u32 = parse::number(&caps[2], ln)?;
        if !(1 ..= 10).contains(&pos) {
            return Err(Error::parse(ln, format!("position {} is off the board", pos)));
        }
        match positions.get_mut(player.wrapping_sub(1)) {
            Some(slot @ None) => *slot = Some(pos),
            Some(Some(_)) => return Err(Error::parse(ln, format!("player {} listed twice", player))),
            None => return Err(Error::parse(ln, format!("unknown player {}", player))),
        }
    }
    match positions {
        [Some(a), Some(b)] => Ok([a, b]),
        _ => Err(Error::Input("expected starting positions for players 1 and 2".into())),
    }
}

fn deterministic(mut positions: [u32; 2]) -> u64 {
    let mut scores = [0u64; 2];
    let mut rolls = 0u64;
    let mut die = (1 ..= 100).cycle();
    for player in [0, 1].into_iter().cycle() {
        let moved = die.by_ref().take(3).sum::<u32>();
        rolls += 3;
        positions[player] = advance(positions[player], moved);
        scores[player] += positions[player] as u64;
        if scores[player] >= 1000 {
            return scores[1 - player] * rolls;
        }
    }
    unreachable!()
}

type Universe = (u32, u32, u32, u32);

/// Wins of the player to move and of the other player, from this universe.
fn dirac(state: Universe, memo: &mut FxHashMap<Universe, (u64, u64)>) -> (u64, u64) {
    if let Some(&wins) = memo.get(&state) {
        return wins;
    }
    let (pos, score, other_pos, other_score) = state;
    let mut wins = (0, 0);
    for (roll, ways) in DIRAC_SUMS {
        let pos = advance(pos, roll);
        let score = score + pos;
        if score >= 21 {
            wins.0 += ways;
        } else {
            let (theirs, mine) = dirac((other_pos, other_score, pos, score), memo);
            wins.0 += ways * mine;
            wins.1 += ways * theirs;
        }
    }
    memo.insert(state, wins);
    wins
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let positions = parse_positions(input)?;
    if part == 1 {
        Ok(deterministic(positions).to_string())
    } else {
        let mut memo = FxHashMap::default();
        let (a, b) = dirac((positions[0], 0, positions[1], 0), &mut memo);
        Ok(a.max(b).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Player 1 starting position: 4
Player 2 starting position: 8
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "739785");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "444356092776315");
    }

    #[test]
    fn board_wraps() {
        assert_eq!(advance(7, 3), 10);
        assert_eq!(advance(7, 4), 1);
        assert_eq!(advance(10, 100), 10);
    }

    #[test]
    fn bad_positions() {
        assert!(solve(1, "Player 1 starting position: 4").is_err());
        assert!(solve(1, "Player 1 starting position: 11\nPlayer 2 starting position: 8").is_err());
        assert!(solve(1, "Player 1 starting position: 4\nPlayer 1 starting position: 8").is_err());
    }
}
