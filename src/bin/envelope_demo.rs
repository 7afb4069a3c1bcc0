use slope_envelope::config::envelope::{load_config, EnvelopeToolConfig, OutputFormat};
use slope_envelope::dataset::{load_points, DataTable};
use slope_envelope::envelope::{EnvelopeReport, EnvelopeSolver};
use slope_envelope::export::write_csv;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "envelope_demo".to_string());
    let config_path = args
        .next()
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = load_config(Path::new(&config_path))?;

    let table = DataTable::from_csv_path(&config.input).map_err(|e| e.to_string())?;
    let points = load_points(
        &table,
        &config.x_column,
        &config.y_column,
        &config.x_uncertainty,
        &config.y_uncertainty,
    )
    .map_err(|e| e.to_string())?;

    let report = EnvelopeSolver::new()
        .compute_report(&points)
        .map_err(|e| e.to_string())?;

    if config.output.format.includes_text() {
        print_text_summary(&config, &report, points.len());
    }

    if config.output.format.includes_json() {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        if let Some(path) = &config.output.json_out {
            fs::write(path, &json)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("JSON report written to {}", path.display());
        } else if config.output.format == OutputFormat::Both {
            println!("\nJSON report:\n{json}");
        } else {
            println!("{json}");
        }
    }

    if let Some(path) = &config.output.csv_out {
        let fit = report
            .fit
            .as_ref()
            .ok_or_else(|| "No consistent line; nothing to export".to_string())?;
        write_csv(path, &["line", "slope", "intercept_or_uncertainty"], &fit.to_rows())
            .map_err(|e| e.to_string())?;
        println!("CSV results written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(config: &EnvelopeToolConfig, report: &EnvelopeReport, n: usize) {
    println!("Max-min slope summary");
    println!("  points: {n} ({} vs {})", config.y_column, config.x_column);
    println!("  found: {}", report.found);
    println!("  candidates: {}", report.candidates);
    println!("  validations: {}", report.validations);
    println!("  latency_ms: {:.3}", report.latency_ms);
    if let Some(fit) = &report.fit {
        println!("  minimum slope: {}", fit.min_equation());
        println!("  maximum slope: {}", fit.max_equation());
        println!("  result: {}", fit.mean_equation());
    } else {
        println!("  no line crosses every uncertainty box");
    }
}
