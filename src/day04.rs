use crate::error::{Error, Result};
use crate::parse;

const SIZE: usize = 5;

struct Board {
    cells: [[u32; SIZE]; SIZE],
    marked: [[bool; SIZE]; SIZE],
}

impl Board {
    fn mark(&mut self, n: u32) {
        for (row, marks) in self.cells.iter().zip(self.marked.iter_mut()) {
            for (&cell, mark) in row.iter().zip(marks.iter_mut()) {
                if cell == n {*mark = true};
            }
        }
    }

    fn wins(&self) -> bool {
        (0 .. SIZE).any(|i|
            self.marked[i].iter().all(|&m| m) || self.marked.iter().all(|row| row[i])
        )
    }

    fn unmarked_sum(&self) -> u32 {
        self.cells.iter().flatten().zip(self.marked.iter().flatten())
            .filter(|(_, &m)| !m).map(|(&c, _)| c).sum()
    }
}

fn parse_game(input: &str) -> Result<(Vec<u32>, Vec<Board>)> {
    let mut lines = parse::lines(input);
    let (ln, draws) = lines.next().ok_or_else(|| Error::Input("empty input".into()))?;
    let draws = parse::separated(draws, ',', ln)?;

    let mut boards = vec![];
    let mut rows: Vec<[u32; SIZE]> = vec![];
    for (ln, line) in lines {
        if line.trim().is_empty() {continue};
        let nums = line.split_whitespace().map(|s| parse::number(s, ln)).collect::<Result<Vec<u32>>>()?;
        let row: [u32; SIZE] = nums.try_into()
            .map_err(|_| Error::parse(ln, format!("a board row has {} numbers", SIZE)))?;
        rows.push(row);
        if rows.len() == SIZE {
            let mut cells = [[0; SIZE]; SIZE];
            cells.copy_from_slice(&rows);
            boards.push(Board {cells, marked: [[false; SIZE]; SIZE]});
            rows.clear();
        }
    }
    if !rows.is_empty() || boards.is_empty() {
        return Err(Error::Input("boards must be complete 5x5 grids".into()));
    }
    Ok((draws, boards))
}

/// Scores of the boards in the order they win.
fn winning_scores(draws: &[u32], boards: &mut [Board]) -> Vec<u32> {
    let mut won = vec![false; boards.len()];
    let mut scores = vec![];
    for &n in draws {
        for (board, won) in boards.iter_mut().zip(won.iter_mut()) {
            if *won {continue};
            board.mark(n);
            if board.wins() {
                *won = true;
                scores.push(board.unmarked_sum() * n);
            }
        }
    }
    scores
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (draws, mut boards) = parse_game(input)?;
    let scores = winning_scores(&draws, &mut boards);
    let score = if part == 1 {scores.first()} else {scores.last()};
    score.map(|s| s.to_string()).ok_or_else(|| Error::NoAnswer("no board ever wins".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
7,4,9,5,11,17,23,2,0,14,21,24,10,16,13,6,15,25,12,22,18,20,8,19,3,26,1

22 13 17 11  0
 8  2 23  4 24
21  9 14 16  7
 6 10  3 18  5
 1 12 20 15 19

 3 15  0  2 22
 9 18 13 17  5
19  8  7 25 23
20 11 10 24  4
14 21 16 12  6

14 21 17 24  4
10 16 15  9 19
18  8 23 26 20
22 11 13  6  5
 2  0 12  3  7
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "4512");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "1924");
    }

    #[test]
    fn column_wins() {
        let mut board = Board {cells: [[0; SIZE]; SIZE], marked: [[false; SIZE]; SIZE]};
        for (ri, row) in board.cells.iter_mut().enumerate() {
            row[2] = 100 + ri as u32;
        }
        for n in 100 .. 104 {board.mark(n)};
        assert!(!board.wins());
        board.mark(104);
        assert!(board.wins());
    }

    #[test]
    fn short_board_is_rejected() {
        assert!(solve(1, "1,2\n\n1 2 3 4 5\n").is_err());
    }
}
