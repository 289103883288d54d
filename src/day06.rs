use crate::error::{Error, Result};
use crate::parse;

/// Fish counts indexed by timer value.
type School = [u64; 9];

fn parse_school(input: &str) -> Result<School> {
    let mut school = [0; 9];
    for timer in parse::separated::<usize>(input, ',', 1)? {
        *school.get_mut(timer)
            .ok_or_else(|| Error::parse(1, format!("timer {} out of range", timer)))? += 1;
    }
    Ok(school)
}

fn simulate(mut school: School, days: usize) -> u64 {
    for _ in 0 .. days {
        school.rotate_left(1);
        school[6] += school[8];
    }
    school.iter().sum()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let school = parse_school(input)?;
    Ok(simulate(school, if part == 1 {80} else {256}).to_string())
}
