use regex::Regex;

use crate::error::{Error, Result};
use crate::parse;

struct Target {
    x: (i64, i64),
    y: (i64, i64),
}

fn parse_target(input: &str) -> Result<Target> {
    let re = Regex::new(r"^target area: x=(-?\d+)\.\.(-?\d+), y=(-?\d+)\.\.(-?\d+)$").expect("valid pattern");
    let caps = parse::captures(&re, input.trim(), 1)?;
    let [x0, x1, y0, y1] = [1, 2, 3, 4].map(|i| parse::number::<i64>(&caps[i], 1));
    let target = Target {x: (x0?, x1?), y: (y0?, y1?)};
    if target.x.0 <= 0 || target.x.0 > target.x.1 || target.y.1 >= 0 || target.y.0 > target.y.1 {
        return Err(Error::Input("target must lie right of and below the launcher".into()));
    }
    Ok(target)
}

impl Target {
    fn hit_by(&self, mut vx: i64, mut vy: i64) -> bool {
        let (mut x, mut y) = (0, 0);
        while x <= self.x.1 && y >= self.y.0 {
            if x >= self.x.0 && y <= self.y.1 {return true};
            x += vx;
            y += vy;
            vx -= vx.signum();
            vy -= 1;
        }
        false
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let target = parse_target(input)?;
    // a probe launched upwards at v comes back down through y=0 at -(v+1)
    let vy_max = -target.y.0 - 1;
    if part == 1 {
        Ok((vy_max * (vy_max + 1) / 2).to_string())
    } else {
        let hits = (0 ..= target.x.1)
            .flat_map(|vx| (target.y.0 ..= vy_max).map(move |vy| (vx, vy)))
            .filter(|&(vx, vy)| target.hit_by(vx, vy))
            .count();
        Ok(hits.to_string())
    }
}
