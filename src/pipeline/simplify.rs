//! Douglas-Peucker track simplification that remembers which input points it kept.
//!
//! Distances are measured in the lon/lat plane only; the third coordinate rides
//! along untouched. Runs in "highest quality" mode: there is no radial-distance
//! pre-pass, so the result depends on the tolerance alone.

use crate::types::analysis::Simplified;

pub fn simplify_with_indices(points: &[[f64; 3]], tolerance: f64) -> Simplified {
    if points.len() <= 1 {
        return Simplified {
            points: points.to_vec(),
            indices: (0..points.len()).collect(),
        };
    }

    let sq_tolerance = tolerance * tolerance;
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    // Explicit stack instead of recursion: long rides can be deep.
    let mut ranges = vec![(0, last)];
    while let Some((first, last)) = ranges.pop() {
        let mut max_sq_dist = sq_tolerance;
        let mut split = None;

        for i in first + 1..last {
            let sq_dist = sq_segment_distance(&points[i], &points[first], &points[last]);
            if sq_dist > max_sq_dist {
                split = Some(i);
                max_sq_dist = sq_dist;
            }
        }

        if let Some(index) = split {
            keep[index] = true;
            if index - first > 1 {
                ranges.push((first, index));
            }
            if last - index > 1 {
                ranges.push((index, last));
            }
        }
    }

    let indices: Vec<usize> = keep
        .iter()
        .enumerate()
        .filter_map(|(i, &kept)| kept.then_some(i))
        .collect();
    let points = indices.iter().map(|&i| points[i]).collect();

    Simplified { points, indices }
}

/// Squared planar distance from `p` to the segment `a`-`b`.
fn sq_segment_distance(p: &[f64; 3], a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let (mut x, mut y) = (a[0], a[1]);
    let dx = b[0] - x;
    let dy = b[1] - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p[0] - x) * dx + (p[1] - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b[0];
            y = b[1];
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    let dx = p[0] - x;
    let dy = p[1] - y;
    dx * dx + dy * dy
}
