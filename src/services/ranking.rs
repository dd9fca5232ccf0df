//! Visiting ranks from a solved route
//!
//! Interior route index `i` (0-based, anchors excluded) holding matrix
//! index `idx` with `1 <= idx <= M` gives the point at list position
//! `idx - 1` rank `i + 1`.

use crate::types::{DeliveryPoint, RankAssignment, SolvedRoute};

/// Ranks for the points of `points`, in visiting order
pub fn visiting_ranks(solved: &SolvedRoute, points: &[DeliveryPoint]) -> Vec<RankAssignment> {
    let delivery_count = points.len();
    solved
        .interior()
        .iter()
        .enumerate()
        .filter(|&(_, &matrix_index)| (1..=delivery_count).contains(&matrix_index))
        .map(|(i, &matrix_index)| RankAssignment {
            list_position: matrix_index - 1,
            point_id: points[matrix_index - 1].id,
            rank: (i + 1) as u32,
        })
        .collect()
}

/// Write ranks into `points`, replacing any previous ranks.
///
/// An empty route leaves the points untouched.
pub fn apply_visiting_ranks(points: &mut [DeliveryPoint], solved: &SolvedRoute) {
    if solved.is_empty() {
        return;
    }

    let ranks = visiting_ranks(solved, points);
    write_ranks(points, &ranks);
}

/// Clear every rank in `points`, then set the given assignments
pub fn write_ranks(points: &mut [DeliveryPoint], ranks: &[RankAssignment]) {
    for point in points.iter_mut() {
        point.visiting_rank = None;
    }
    for assignment in ranks {
        if let Some(point) = points.get_mut(assignment.list_position) {
            point.visiting_rank = Some(assignment.rank);
        }
    }
}
