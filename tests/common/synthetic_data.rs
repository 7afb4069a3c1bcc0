use slope_envelope::{DataPoint, PointSet};

/// Points scattered around `y = slope·x + intercept` with a fixed
/// deterministic offset pattern, each carrying the given half-widths.
///
/// Offsets stay within `dy`, so the true line always crosses every box.
pub fn noisy_line(slope: f64, intercept: f64, n: usize, dx: f64, dy: f64) -> PointSet {
    let offsets = [0.3, -0.5, 0.1, -0.2, 0.45, -0.35, 0.0, 0.25];
    let points = (0..n)
        .map(|i| {
            let x = i as f64;
            let wobble = dy * offsets[i % offsets.len()];
            DataPoint::new(x, slope * x + intercept + wobble, dx, dy)
        })
        .collect();
    PointSet::new(points).expect("synthetic points are valid")
}
