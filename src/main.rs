use slope_envelope::{DataPoint, EnvelopeSolver, PointSet};

fn main() {
    // Demo stub: a short synthetic run with boxy uncertainties
    let points = PointSet::new(vec![
        DataPoint::new(0.0, 0.1, 0.1, 0.2),
        DataPoint::new(1.0, 2.1, 0.1, 0.2),
        DataPoint::new(2.0, 3.9, 0.1, 0.2),
        DataPoint::new(3.0, 6.2, 0.1, 0.2),
    ])
    .expect("points are valid");

    match EnvelopeSolver::new().compute_report(&points) {
        Ok(report) => {
            println!(
                "found={} candidates={} latency_ms={:.3}",
                report.found, report.candidates, report.latency_ms
            );
            if let Some(fit) = report.fit {
                println!("{}", fit.mean_equation());
            }
        }
        Err(err) => eprintln!("envelope failed: {err}"),
    }
}
