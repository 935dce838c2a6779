//! Matching utilities for multi-object tracking.

use crate::tracker::rect::Point;
use ndarray::Array2;

/// Compute the Euclidean distance matrix between track and detection centroids.
///
/// Returns a matrix of shape (M, N) where M is the length of `track_points`
/// (the tracker's registration order) and N is the length of `det_points`
/// (input order).
pub fn centroid_distance(track_points: &[Point], det_points: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_points.len(), det_points.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, d) in det_points.iter().enumerate() {
            dists[[i, j]] = t.distance(*d);
        }
    }
    dists
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedily assign rows (tracks) to columns (detections) by smallest distance.
///
/// Repeatedly commits the globally smallest remaining entry among
/// unassigned rows and columns, stopping as soon as that minimum exceeds
/// `max_distance`. Equal minima are resolved by first occurrence in
/// row-major scan order. This is an O(R*C) approximation per pick, not an
/// optimal bipartite assignment; the selection and tie-break order are part
/// of the tracker's observable behavior and must stay as they are.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, max_distance: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    let mut row_assigned = vec![false; num_rows];
    let mut col_assigned = vec![false; num_cols];
    let mut matches = vec![];

    for _ in 0..num_rows.min(num_cols) {
        let mut best: Option<(usize, usize, f32)> = None;
        for i in 0..num_rows {
            if row_assigned[i] {
                continue;
            }
            for j in 0..num_cols {
                if col_assigned[j] {
                    continue;
                }
                let dist = cost_matrix[[i, j]];
                // Strict comparison keeps the first row-major occurrence on ties.
                if best.is_none_or(|(_, _, d)| dist < d) {
                    best = Some((i, j, dist));
                }
            }
        }

        let Some((i, j, dist)) = best else { break };
        if dist > max_distance {
            break;
        }
        row_assigned[i] = true;
        col_assigned[j] = true;
        matches.push((i, j));
    }

    let unmatched_tracks = row_assigned
        .iter()
        .enumerate()
        .filter_map(|(i, &a)| if a { None } else { Some(i) })
        .collect();
    let unmatched_detections = col_assigned
        .iter()
        .enumerate()
        .filter_map(|(j, &a)| if a { None } else { Some(j) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centroid_distance_matrix() {
        let tracks = vec![Point::new(0, 0), Point::new(10, 0)];
        let dets = vec![Point::new(3, 4), Point::new(10, 0)];

        let dists = centroid_distance(&tracks, &dets);
        assert_eq!(dists.dim(), (2, 2));
        assert_relative_eq!(dists[[0, 0]], 5.0);
        assert_relative_eq!(dists[[0, 1]], 10.0);
        assert_relative_eq!(dists[[1, 1]], 0.0);
    }

    #[test]
    fn test_greedy_prefers_global_minimum() {
        // Row 0 is closest to col 1, row 1 is closest to col 0; the global
        // minimum (1, 0) must be committed first.
        let tracks = vec![Point::new(0, 0), Point::new(100, 0)];
        let dets = vec![Point::new(90, 0), Point::new(20, 0)];
        let dists = centroid_distance(&tracks, &dets);

        let result = greedy_assignment(&dists, 1000.0);
        assert_eq!(result.matches, vec![(1, 0), (0, 1)]);
        assert!(result.unmatched_tracks.is_empty());
        assert!(result.unmatched_detections.is_empty());
    }

    #[test]
    fn test_greedy_stops_at_max_distance() {
        let tracks = vec![Point::new(0, 0)];
        let dets = vec![Point::new(50, 50)];
        let dists = centroid_distance(&tracks, &dets);

        let result = greedy_assignment(&dists, 10.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0]);
        assert_eq!(result.unmatched_detections, vec![0]);
    }

    #[test]
    fn test_greedy_exact_threshold_matches() {
        // A distance exactly equal to max_distance is still a match.
        let tracks = vec![Point::new(0, 0)];
        let dets = vec![Point::new(10, 0)];
        let dists = centroid_distance(&tracks, &dets);

        let result = greedy_assignment(&dists, 10.0);
        assert_eq!(result.matches, vec![(0, 0)]);
    }

    #[test]
    fn test_greedy_tie_break_row_major() {
        // All four pairs are equidistant; (0, 0) must win, then (1, 1).
        let tracks = vec![Point::new(0, 0), Point::new(0, 10)];
        let dets = vec![Point::new(5, 0), Point::new(5, 10)];
        let mut dists = centroid_distance(&tracks, &dets);
        for v in dists.iter_mut() {
            *v = 5.0;
        }

        let result = greedy_assignment(&dists, 50.0);
        assert_eq!(result.matches, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_greedy_empty_inputs() {
        let empty = Array2::<f32>::zeros((0, 3));
        let result = greedy_assignment(&empty, 10.0);
        assert!(result.matches.is_empty());
        assert!(result.unmatched_tracks.is_empty());
        assert_eq!(result.unmatched_detections, vec![0, 1, 2]);

        let empty = Array2::<f32>::zeros((2, 0));
        let result = greedy_assignment(&empty, 10.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0, 1]);
        assert!(result.unmatched_detections.is_empty());
    }

    #[test]
    fn test_greedy_surplus_detections() {
        let tracks = vec![Point::new(0, 0)];
        let dets = vec![Point::new(1, 0), Point::new(200, 0)];
        let dists = centroid_distance(&tracks, &dets);

        let result = greedy_assignment(&dists, 50.0);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_detections, vec![1]);
    }
}
