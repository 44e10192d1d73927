//! Reader for rock scans: one path per line, `h,d -> h,d -> ...`.

use crate::coord::Coordinate;
use crate::error::SimError;
use crate::rock::RockPath;

/// Parse every non-blank line of `input` into a rock path.
///
/// # Errors
///
/// `SimError::Parse` naming the first offending line.
pub fn parse_scan(input: &str) -> Result<Vec<RockPath>, SimError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_path(line).map_err(|reason| SimError::Parse {
                line: index + 1,
                reason,
            })
        })
        .collect()
}

fn parse_path(line: &str) -> Result<RockPath, String> {
    line.split("->").map(parse_vertex).collect()
}

fn parse_vertex(pair: &str) -> Result<Coordinate, String> {
    let pair = pair.trim();
    let (h, d) = pair
        .split_once(',')
        .ok_or_else(|| format!("expected `horizontal,depth`, found `{pair}`"))?;
    let horizontal = parse_axis(h, "horizontal")?;
    let depth = parse_axis(d, "depth")?;
    Ok(Coordinate::from_scan(horizontal, depth))
}

fn parse_axis(text: &str, axis: &str) -> Result<i32, String> {
    let text = text.trim();
    text.parse()
        .map_err(|e| format!("bad {axis} `{text}`: {e}"))
}
