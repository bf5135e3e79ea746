use super::distance::{Metric, PerceptualHsl};
use super::generator::Swatch;

/// Greedy farthest-next ordering: starting from the first candidate, keep
/// appending whichever remaining candidate is farthest from the one placed
/// last. Ties go to the earliest remaining candidate in input order.
///
/// This is a heuristic, O(n²) in the number of candidates. The output is
/// always a permutation of the input.
pub fn optimize<T, M: Metric<T>>(candidates: Vec<T>, metric: &M) -> Vec<T> {
    let mut remaining = candidates;
    if remaining.is_empty() {
        return vec![];
    }
    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let best_idx = {
            let last = &ordered[ordered.len() - 1];
            let mut best_idx = 0;
            let mut best_distance = f64::NEG_INFINITY;
            for (idx, candidate) in remaining.iter().enumerate() {
                let distance = metric.distance(last, candidate);
                if distance > best_distance {
                    best_distance = distance;
                    best_idx = idx;
                }
            }
            best_idx
        };
        ordered.push(remaining.remove(best_idx));
    }
    ordered
}

pub fn optimize_swatches(swatches: Vec<Swatch>) -> Vec<Swatch> {
    optimize(swatches, &PerceptualHsl)
}
