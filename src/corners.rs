//! Corner expansion of uncertainty boxes.

use crate::types::PointSet;
use nalgebra::Vector2;

/// Expands every point's uncertainty box into its four corners.
///
/// Corners are emitted in point-index order, four per point, in a fixed
/// order: bottom-left, top-left, bottom-right, top-right. The order is part
/// of the method's observable behavior — the candidate scan keeps the first
/// extreme found, so reordering corners would change which of two
/// equally-extreme lines is reported.
pub fn expand_corners(points: &PointSet) -> Vec<Vector2<f64>> {
    let mut corners = Vec::with_capacity(points.len() * 4);
    for p in points.iter() {
        corners.push(Vector2::new(p.x - p.dx, p.y - p.dy));
        corners.push(Vector2::new(p.x - p.dx, p.y + p.dy));
        corners.push(Vector2::new(p.x + p.dx, p.y - p.dy));
        corners.push(Vector2::new(p.x + p.dx, p.y + p.dy));
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataPoint;

    #[test]
    fn four_corners_per_point_in_fixed_order() {
        let points = PointSet::new(vec![
            DataPoint::new(1.0, 2.0, 0.5, 0.25),
            DataPoint::new(4.0, 4.0, 0.0, 1.0),
        ])
        .unwrap();
        let corners = expand_corners(&points);
        assert_eq!(corners.len(), 8);
        assert_eq!(corners[0], Vector2::new(0.5, 1.75));
        assert_eq!(corners[1], Vector2::new(0.5, 2.25));
        assert_eq!(corners[2], Vector2::new(1.5, 1.75));
        assert_eq!(corners[3], Vector2::new(1.5, 2.25));
        assert_eq!(corners[4], Vector2::new(4.0, 3.0));
        assert_eq!(corners[5], Vector2::new(4.0, 5.0));
    }

    #[test]
    fn zero_uncertainty_collapses_to_repeated_point() {
        let points = PointSet::new(vec![DataPoint::exact(3.0, -1.0)]).unwrap();
        let corners = expand_corners(&points);
        assert!(corners.iter().all(|c| *c == Vector2::new(3.0, -1.0)));
    }
}
