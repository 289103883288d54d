use crate::error::{Error, Result};
use crate::parse;

pub type Grid = Vec<Vec<u8>>;

/// Parses a rectangular grid of decimal digits.
pub fn digits(input: &str) -> Result<Grid> {
    let grid = parse::lines(input).map(|(ln, line)|
        line.bytes().map(|b| match b {
            b'0' ..= b'9' => Ok(b - b'0'),
            _ => Err(Error::parse(ln, format!("unexpected character '{}'", b as char)))
        }).collect::<Result<Vec<_>>>()
    ).collect::<Result<Grid>>()?;
    ensure_rectangular(&grid)?;
    Ok(grid)
}

pub fn ensure_rectangular<T>(grid: &[Vec<T>]) -> Result<()> {
    match grid.first() {
        None => Err(Error::Input("empty grid".into())),
        Some(first) if first.is_empty() => Err(Error::Input("empty grid".into())),
        Some(first) => match grid.iter().position(|row| row.len() != first.len()) {
            Some(ri) => Err(Error::parse(ri + 1, format!("expected {} cells", first.len()))),
            None => Ok(())
        }
    }
}

/// Orthogonal neighbours of (ri, ci) that lie inside a rows x cols grid.
pub fn neighbours4(ri: usize, ci: usize, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
    [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)].into_iter().filter_map(move |(rd, cd)| {
        let nr = ri.checked_add_signed(rd)?;
        let nc = ci.checked_add_signed(cd)?;
        (nr < rows && nc < cols).then_some((nr, nc))
    })
}

/// All eight surrounding cells of (ri, ci) that lie inside the grid.
pub fn neighbours8(ri: usize, ci: usize, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1isize ..= 1).flat_map(|rd| (-1isize ..= 1).map(move |cd| (rd, cd)))
        .filter(|&d| d != (0, 0))
        .filter_map(move |(rd, cd)| {
            let nr = ri.checked_add_signed(rd)?;
            let nc = ci.checked_add_signed(cd)?;
            (nr < rows && nc < cols).then_some((nr, nc))
        })
}
