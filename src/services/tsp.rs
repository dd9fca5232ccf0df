//! Exact traveling-salesman search over all visiting orders
//!
//! Every permutation of the delivery indices `1..=M` is scored, so the
//! cost is `O(M! · M)`: 8 points take about 40 thousand candidates, 10 points
//! about 3.6 million and 12 points about 479 million. Callers must keep
//! instances small; see [`EXACT_SOLVER_STOP_LIMIT`].

use tracing::debug;

use crate::error::{PlannerError, PlannerResult};
use crate::services::matrix::DistanceMatrix;
use crate::types::{Measure, SolvedRoute};

/// Practical ceiling on delivery points for the exhaustive search
pub const EXACT_SOLVER_STOP_LIMIT: usize = crate::defaults::DEFAULT_MAX_EXACT_STOPS;

/// Algorithm name reported in plans
pub const ALGORITHM_NAME: &str = "exact-permutation";

/// Find the shortest route visiting every delivery index exactly once.
///
/// The route starts at `start_index` and ends at `end_index`, or returns to
/// `start_index` when `end_index` is `None`. The matrix side length must be
/// `delivery_count + 1` for a closed loop and `delivery_count + 2` for an
/// open path.
///
/// Permutations are generated in lexicographic order and compared with a
/// strict less-than, so among equal totals the first one found wins. When
/// no permutation avoids an unreachable segment, the first candidate is
/// returned with an unreachable total.
///
/// An absent matrix or zero delivery points yields [`SolvedRoute::empty`].
pub fn solve(
    matrix: Option<&DistanceMatrix>,
    delivery_count: usize,
    start_index: usize,
    end_index: Option<usize>,
) -> PlannerResult<SolvedRoute> {
    let matrix = match matrix {
        Some(matrix) if delivery_count > 0 => matrix,
        _ => return Ok(SolvedRoute::empty()),
    };

    validate_anchors(matrix, delivery_count, start_index, end_index)?;

    let end = end_index.unwrap_or(start_index);

    // Candidate route buffer: start, permutation of 1..=M, end
    let mut candidate = Vec::with_capacity(delivery_count + 2);
    candidate.push(start_index);
    candidate.extend(1..=delivery_count);
    candidate.push(end);

    let mut best: Option<(Vec<usize>, Measure)> = None;
    let mut candidates_evaluated = 0u64;

    loop {
        candidates_evaluated += 1;
        let distance = matrix.path_distance(&candidate);

        let improves = match &best {
            None => true,
            Some((_, best_distance)) => distance.is_shorter_than(*best_distance),
        };
        if improves {
            best = Some((candidate.clone(), distance));
        }

        if !next_permutation(&mut candidate[1..=delivery_count]) {
            break;
        }
    }

    // At least one permutation is always scored
    let (route, total_distance) = best.unwrap_or((candidate, Measure::Unreachable));

    debug!(
        "Exact search scored {} candidates for {} points, best total {}",
        candidates_evaluated, delivery_count, total_distance
    );

    Ok(SolvedRoute {
        route,
        total_distance,
        candidates_evaluated,
    })
}

fn validate_anchors(
    matrix: &DistanceMatrix,
    delivery_count: usize,
    start_index: usize,
    end_index: Option<usize>,
) -> PlannerResult<()> {
    let expected = delivery_count + 1 + usize::from(end_index.is_some());
    if matrix.size() != expected {
        return Err(PlannerError::InvalidInput(format!(
            "matrix side {} does not match {} delivery points ({})",
            matrix.size(),
            delivery_count,
            if end_index.is_some() { "open path" } else { "closed loop" }
        )));
    }

    let is_delivery = |index: usize| (1..=delivery_count).contains(&index);
    let anchors = std::iter::once(("start", start_index)).chain(end_index.map(|end| ("end", end)));
    for (label, index) in anchors {
        if index >= expected || is_delivery(index) {
            return Err(PlannerError::InvalidInput(format!(
                "{} index {} must be an anchor outside 1..={} and below {}",
                label, index, delivery_count, expected
            )));
        }
    }

    if end_index == Some(start_index) {
        return Err(PlannerError::InvalidInput(
            "end index must differ from start index; omit it for a closed loop".to_string(),
        ));
    }

    Ok(())
}

/// Rearrange into the next lexicographic permutation.
/// Returns `false` once the last permutation has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };

    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot] {
        successor -= 1;
    }

    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
