//! Rock paths and their rasterization into cells.

use crate::coord::Coordinate;
use crate::error::SimError;

/// Ordered polyline vertices. Consecutive vertices must be axis-aligned.
pub type RockPath = Vec<Coordinate>;

/// Every cell covered by `path`: its vertices and all cells between consecutive pairs.
///
/// Joints shared by two segments appear twice; placing rock is idempotent so
/// callers need not deduplicate.
///
/// # Errors
///
/// `SimError::InvalidPath` on the first diagonal segment. Nothing is returned
/// for the path in that case.
pub fn rasterize_path(path: &[Coordinate]) -> Result<Vec<Coordinate>, SimError> {
    if let [only] = path {
        return Ok(vec![*only]);
    }

    let mut cells = Vec::new();
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if from.horizontal == to.horizontal {
            let (top, bottom) = span(from.depth, to.depth);
            cells.extend((top..=bottom).map(|d| Coordinate::new(d, from.horizontal)));
        } else if from.depth == to.depth {
            let (left, right) = span(from.horizontal, to.horizontal);
            cells.extend((left..=right).map(|h| Coordinate::new(from.depth, h)));
        } else {
            return Err(SimError::InvalidPath { from, to });
        }
    }
    Ok(cells)
}

/// Rasterize several paths. Fails without output if any one path is malformed.
///
/// # Errors
///
/// The first `SimError::InvalidPath` encountered.
pub fn rasterize_paths(paths: &[RockPath]) -> Result<Vec<Coordinate>, SimError> {
    let mut cells = Vec::new();
    for path in paths {
        cells.extend(rasterize_path(path)?);
    }
    Ok(cells)
}

/// Deepest depth named by any vertex, 0 for no rock.
#[must_use]
pub fn max_depth(paths: &[RockPath]) -> i32 {
    paths
        .iter()
        .flatten()
        .map(|c| c.depth)
        .max()
        .unwrap_or(0)
}

fn span(a: i32, b: i32) -> (i32, i32) {
    (a.min(b), a.max(b))
}
