use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::parse;

#[derive(Clone, Copy)]
enum Fold {
    X(i32),
    Y(i32),
}

impl Fold {
    fn apply(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Fold::X(at) if x > at => (2 * at - x, y),
            Fold::Y(at) if y > at => (x, 2 * at - y),
            _ => (x, y)
        }
    }
}

fn parse_manual(input: &str) -> Result<(FxHashSet<(i32, i32)>, Vec<Fold>)> {
    let mut dots = FxHashSet::default();
    let mut folds = vec![];
    for (ln, line) in parse::lines(input) {
        if line.is_empty() {continue};
        if let Some(fold) = line.strip_prefix("fold along ") {
            folds.push(match fold.split_once('=') {
                Some(("x", at)) => Fold::X(parse::number(at, ln)?),
                Some(("y", at)) => Fold::Y(parse::number(at, ln)?),
                _ => return Err(Error::parse(ln, format!("bad fold {:?}", fold)))
            });
        } else {
            let (x, y) = line.split_once(',').ok_or_else(|| Error::parse(ln, "expected x,y"))?;
            dots.insert((parse::number(x, ln)?, parse::number(y, ln)?));
        }
    }
    if folds.is_empty() {return Err(Error::Input("no fold instructions".into()))};
    Ok((dots, folds))
}

fn render(dots: &FxHashSet<(i32, i32)>) -> String {
    let (Some(&max_x), Some(&max_y)) = (dots.iter().map(|(x, _)| x).max(), dots.iter().map(|(_, y)| y).max())
        else {return String::new()};
    let rows = (0 ..= max_y).map(|y|
        (0 ..= max_x).map(|x| if dots.contains(&(x, y)) {'#'} else {'.'}).collect::<String>()
    );
    format!("\n{}", rows.format("\n"))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (mut dots, folds) = parse_manual(input)?;
    let folds = if part == 1 {&folds[.. 1]} else {&folds[..]};
    for &fold in folds {
        dots = dots.into_iter().map(|dot| fold.apply(dot)).collect();
    }
    Ok(if part == 1 {dots.len().to_string()} else {render(&dots)})
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
6,10
0,14
9,10
0,3
10,4
4,11
6,0
6,12
4,1
0,13
10,12
3,4
3,0
8,4
1,10
2,14
8,10
9,0

fold along y=7
fold along x=5
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "17");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "\n#####\n#...#\n#...#\n#...#\n#####");
    }

    #[test]
    fn bad_fold_axis() {
        assert!(solve(1, "1,1\n\nfold along z=3").is_err());
    }
}
