use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::audit::evaluation::AuditReport;
use crate::error::Result;
use crate::models::Category;

/// Round to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write one row per run, with a column for every category.
pub fn write_csv(report: &AuditReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![
        "seed".to_string(),
        "slots".to_string(),
        "filled".to_string(),
        "fallback".to_string(),
        "unfilled".to_string(),
        "degraded".to_string(),
        "failed".to_string(),
    ];
    header.extend(Category::ALL.iter().map(|c| c.as_str().to_string()));
    wtr.write_record(&header)?;

    for run in &report.runs {
        let mut row = vec![
            run.seed.to_string(),
            run.slots.to_string(),
            run.filled.to_string(),
            run.fallback.to_string(),
            run.unfilled.to_string(),
            run.degraded.to_string(),
            run.failed.to_string(),
        ];
        row.extend(
            Category::ALL
                .iter()
                .map(|c| run.category_counts.get(c).copied().unwrap_or(0).to_string()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the aggregate metrics as JSON.
pub fn write_summary_json(report: &AuditReport, path: &Path) -> Result<()> {
    let categories: serde_json::Map<String, serde_json::Value> = report
        .mean_category_counts
        .iter()
        .map(|(category, mean)| (category.to_string(), serde_json::json!(truncate(*mean, 2))))
        .collect();

    let json = serde_json::json!({
        "runs": report.runs.len(),
        "metrics": {
            "mean_fill_rate": truncate(report.mean_fill_rate, 3),
            "degraded_share": truncate(report.degraded_share, 3),
            "failure_share": truncate(report.failure_share, 3),
        },
        "most_unfilled_meal": report.most_unfilled_meal.map(|(meal, count)| {
            serde_json::json!({ "meal": meal.as_str(), "slots": count })
        }),
        "mean_category_counts": categories,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print the aggregate to stdout.
pub fn print_summary(report: &AuditReport) {
    println!("\n=== Audit over {} runs ===\n", report.runs.len());
    println!("Mean fill rate:   {:.1}%", report.mean_fill_rate * 100.0);
    println!("Degraded menus:   {:.1}%", report.degraded_share * 100.0);
    println!("Empty menus:      {:.1}%", report.failure_share * 100.0);

    match report.most_unfilled_meal {
        Some((meal, count)) => println!(
            "Most under-filled meal: {} ({} empty slots across all runs)",
            meal, count
        ),
        None => println!("Every slot was filled in every run."),
    }

    if !report.mean_category_counts.is_empty() {
        println!("\nMean uses per week:");
        for (category, mean) in &report.mean_category_counts {
            println!("  {:<14} {:.2}", category.as_str(), mean);
        }
    }
    println!();
}
