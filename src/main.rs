use log::info;

mod error;
mod grid;
mod parse;

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

use error::{Error, Result};

type Solver = fn(u8, &str) -> Result<String>;

const DAYS: [Option<Solver>; 25] = [
    Some(day01::solve), Some(day02::solve), Some(day03::solve), Some(day04::solve), Some(day05::solve),
    Some(day06::solve), Some(day07::solve), Some(day08::solve), Some(day09::solve), Some(day10::solve),
    Some(day11::solve), Some(day12::solve), Some(day13::solve), Some(day14::solve), Some(day15::solve),
    Some(day16::solve), Some(day17::solve), Some(day18::solve), None, Some(day20::solve),
    Some(day21::solve), Some(day22::solve), Some(day23::solve), Some(day24::solve), Some(day25::solve),
];

fn solver(day: usize) -> Result<Solver> {
    day.checked_sub(1).and_then(|ix| DAYS.get(ix).copied().flatten()).ok_or(Error::UnknownDay(day))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = std::env::args().collect::<Vec<_>>();
    let (day_arg, part_arg, fname) = match &args[..] {
        [_, day_arg, part_arg] => (day_arg, part_arg, format!("day{}.in", day_arg)),
        [_, day_arg, test_arg, part_arg] => (day_arg, part_arg, format!("day{}test{}.in", day_arg, test_arg)),
        _ => {
            println!("exactly two or three arguments expected - day number, optionally test number and 1/2 for part");
            std::process::exit(1);
        }
    };
    if part_arg != "1" && part_arg != "2" {
        println!("part must be 1 or 2, got {}", part_arg);
        std::process::exit(1);
    }

    let solve = solver(day_arg.parse()?)?;
    info!("reading {}", fname);
    let input = std::fs::read_to_string(&fname).map_err(Error::from)?;
    let time = std::time::Instant::now();
    println!("{}", solve(part_arg.parse()?, &input)?);
    info!("{} seconds elapsed", time.elapsed().as_secs_f32());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_table_covers_every_day_but_19() {
        assert!(solver(1).is_ok());
        assert!(solver(25).is_ok());
        assert!(matches!(solver(19), Err(Error::UnknownDay(19))));
        assert!(matches!(solver(0), Err(Error::UnknownDay(0))));
        assert!(matches!(solver(26), Err(Error::UnknownDay(26))));
    }
}
