use bitvec::prelude::*;
use log::debug;

use crate::error::{Error, Result};
use crate::parse;

fn pixel(b: u8, ln: usize) -> Result<bool> {
    match b {
        b'#' => Ok(true),
        b'.' => Ok(false),
        _ => Err(Error::parse(ln, format!("unexpected character '{}'", b as char))),
    }
}

#[derive(Clone, Debug)]
struct Image {
    width: usize,
    height: usize,
    pixels: BitVec,
    /// State of every pixel outside the stored rectangle.
    background: bool,
}

impl Image {
    fn get(&self, r: isize, c: isize) -> bool {
        if r < 0 || c < 0 || r as usize >= self.height || c as usize >= self.width {
            self.background
        } else {
            self.pixels[r as usize * self.width + c as usize]
        }
    }

    fn enhance(&self, algorithm: &BitSlice) -> Image {
        let (width, height) = (self.width + 2, self.height + 2);
        let mut pixels = BitVec::with_capacity(width * height);
        for r in -1 .. self.height as isize + 1 {
            for c in -1 .. self.width as isize + 1 {
                let mut index = 0;
                for dr in -1 ..= 1 {
                    for dc in -1 ..= 1 {
                        index = index << 1 | self.get(r + dr, c + dc) as usize;
                    }
                }
                pixels.push(algorithm[index]);
            }
        }
        let background = algorithm[if self.background {511} else {0}];
        Image {width, height, pixels, background}
    }

    fn lit(&self) -> Result<usize> {
        if self.background {
            return Err(Error::NoAnswer("infinitely many pixels are lit".into()));
        }
        Ok(self.pixels.count_ones())
    }
}

fn parse_input(input: &str) -> Result<(BitVec, Image)> {
    let (head, body) = parse::sections(input)?;
    let algorithm = head.lines().flat_map(|line| line.trim().bytes())
        .map(|b| pixel(b, 1))
        .collect::<Result<BitVec>>()?;
    if algorithm.len() != 512 {
        return Err(Error::parse(1, format!("enhancement algorithm has {} entries, expected 512", algorithm.len())));
    }

    let first_line = head.lines().count() + 2;
    let rows = body.lines().map(str::trim_end).collect::<Vec<_>>();
    let width = rows.first().map_or(0, |row| row.len());
    if width == 0 {
        return Err(Error::Input("empty image".into()));
    }
    let mut pixels = BitVec::with_capacity(width * rows.len());
    for (ix, row) in rows.iter().enumerate() {
        let ln = first_line + ix;
        if row.len() != width {
            return Err(Error::parse(ln, format!("expected {} pixels", width)));
        }
        for b in row.bytes() {
            pixels.push(pixel(b, ln)?);
        }
    }
    Ok((algorithm, Image {width, height: rows.len(), pixels, background: false}))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (algorithm, mut image) = parse_input(input)?;
    let steps = if part == 1 {2} else {50};
    for step in 0 .. steps {
        image = image.enhance(&algorithm);
        debug!("step {}: {}x{}, background lit: {}", step + 1, image.width, image.height, image.background);
    }
    Ok(image.lit()?.to_string())
}
