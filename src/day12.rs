use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::parse;

struct Caves {
    small: Vec<bool>,
    edges: Vec<Vec<usize>>,
    start: usize,
    end: usize,
}

fn parse_caves(input: &str) -> Result<Caves> {
    let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
    let mut small = vec![];
    let mut edges: Vec<Vec<usize>> = vec![];
    for (ln, line) in parse::lines(input) {
        let names = line.split_once('-').ok_or_else(|| Error::parse(ln, "expected cave-cave"))?;
        let [a, b] = [names.0, names.1].map(|name| *ids.entry(name).or_insert_with(|| {
            small.push(name.bytes().all(|b| b.is_ascii_lowercase()));
            edges.push(vec![]);
            small.len() - 1
        }));
        if !small[a] && !small[b] {
            return Err(Error::Input(format!("big caves {} and {} are connected, paths are unbounded", names.0, names.1)));
        }
        edges[a].push(b);
        edges[b].push(a);
    }
    let start = *ids.get("start").ok_or_else(|| Error::Input("no start cave".into()))?;
    let end = *ids.get("end").ok_or_else(|| Error::Input("no end cave".into()))?;
    Ok(Caves {small, edges, start, end})
}

impl Caves {
    fn count_paths(&self, at: usize, visits: &mut [u8], may_revisit: bool) -> usize {
        if at == self.end {return 1};
        let mut paths = 0;
        for &next in &self.edges[at] {
            if next == self.start {continue};
            if !self.small[next] || visits[next] == 0 {
                visits[next] += 1;
                paths += self.count_paths(next, visits, may_revisit);
                visits[next] -= 1;
            } else if may_revisit && next != self.end {
                visits[next] += 1;
                paths += self.count_paths(next, visits, false);
                visits[next] -= 1;
            }
        }
        paths
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let caves = parse_caves(input)?;
    let mut visits = vec![0; caves.small.len()];
    visits[caves.start] = 1;
    Ok(caves.count_paths(caves.start, &mut visits, part == 2).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "start-A\nstart-b\nA-c\nA-b\nb-d\nA-end\nb-end\n";
    const MEDIUM: &str = "dc-end\nHN-start\nstart-kj\ndc-start\ndc-HN\nLN-dc\nHN-end\nkj-sa\nkj-HN\nkj-dc\n";
    const LARGE: &str = "\
fs-end
he-DX
fs-he
start-DX
pj-DX
end-zg
zg-sl
zg-pj
pj-he
RW-he
fs-DX
pj-RW
zg-RW
start-pj
he-WI
zg-he
pj-fs
start-RW
";

    #[test]
    fn examples() {
        assert_eq!(solve(1, SMALL).unwrap(), "10");
        assert_eq!(solve(1, MEDIUM).unwrap(), "19");
        assert_eq!(solve(1, LARGE).unwrap(), "226");
        assert_eq!(solve(2, SMALL).unwrap(), "36");
        assert_eq!(solve(2, MEDIUM).unwrap(), "103");
        assert_eq!(solve(2, LARGE).unwrap(), "3509");
    }

    #[test]
    fn adjacent_big_caves_are_rejected() {
        assert!(matches!(solve(1, "start-A\nA-B\nB-end"), Err(Error::Input(_))));
    }

    #[test]
    fn missing_end() {
        assert!(solve(1, "start-a\na-b").is_err());
    }
}
