use log::debug;

use crate::error::{Error, Result};
use crate::grid;
use crate::parse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {Empty, East, South}

fn parse_floor(input: &str) -> Result<Vec<Vec<Cell>>> {
    let floor = parse::lines(input).map(|(ln, line)|
        line.bytes().map(|b| match b {
            b'.' => Ok(Cell::Empty),
            b'>' => Ok(Cell::East),
            b'v' => Ok(Cell::South),
            _ => Err(Error::parse(ln, format!("unexpected character '{}'", b as char))),
        }).collect::<Result<Vec<_>>>()
    ).collect::<Result<Vec<_>>>()?;
    grid::ensure_rectangular(&floor)?;
    Ok(floor)
}

/// Moves every member of `herd` one cell on, all at once. Returns how many moved.
fn step_herd(floor: &mut [Vec<Cell>], herd: Cell) -> usize {
    let (rows, cols) = (floor.len(), floor[0].len());
    let target = |r: usize, c: usize| match herd {
        Cell::East => (r, (c + 1) % cols),
        _ => ((r + 1) % rows, c),
    };
    let moving = (0 .. rows).flat_map(|r| (0 .. cols).map(move |c| (r, c)))
        .filter(|&(r, c)| floor[r][c] == herd && {
            let (tr, tc) = target(r, c);
            floor[tr][tc] == Cell::Empty
        })
        .collect::<Vec<_>>();
    for &(r, c) in &moving {
        let (tr, tc) = target(r, c);
        floor[r][c] = Cell::Empty;
        floor[tr][tc] = herd;
    }
    moving.len()
}

const MAX_STEPS: usize = 1_000_000;

/// First step on which nothing moves, if it comes within `limit` steps.
fn settle(floor: &mut [Vec<Cell>], limit: usize) -> Option<usize> {
    (1 ..= limit).find(|step| {
        let moved = step_herd(floor, Cell::East) + step_herd(floor, Cell::South);
        debug!("step {}: {} moved", step, moved);
        moved == 0
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    if part == 2 {
        return Err(Error::NoAnswer("day 25 has a single part".into()));
    }
    let mut floor = parse_floor(input)?;
    settle(&mut floor, MAX_STEPS).map(|step| step.to_string())
        .ok_or_else(|| Error::NoAnswer(format!("the herds still move after {} steps", MAX_STEPS)))
}
