//! Rendering of the assembled report.
//!
//! Supports aligned plain-text tables on stdout and pretty JSON export.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::report::{BucketSummaryRow, GradeScoreRow, Report, SchoolSummaryRow};

/// Writes the whole report as pretty-printed JSON.
pub fn write_json(path: &Path, report: &Report) -> Result<()> {
    debug!(path = %path.display(), "writing report JSON");

    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)?;

    Ok(())
}

/// Prints every summary table to stdout.
pub fn print_report(report: &Report) {
    print_district(report);
    print_school_table("School Summary", &report.schools);
    print_school_table(
        "Top Performing Schools (by overall passing %)",
        &report.top_schools,
    );
    print_school_table(
        "Bottom Performing Schools (by overall passing %)",
        &report.bottom_schools,
    );
    print_grade_table("Math Scores by Grade", &report.math_by_grade);
    print_grade_table("Reading Scores by Grade", &report.reading_by_grade);
    print_bucket_table("Scores by School Spending (per student)", &report.by_spending);
    print_bucket_table("Scores by School Size", &report.by_size);
}

fn num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

fn print_district(report: &Report) {
    let d = &report.district;
    println!("District Summary");
    println!("  Total schools:       {}", d.total_schools);
    println!("  Total students:      {}", d.total_students);
    println!("  Total budget:        ${:.2}", d.total_budget);
    println!("  Budget per student:  {}", num(d.per_student_budget));
    println!("  Avg math score:      {}", num(d.scores.avg_math));
    println!("  Avg reading score:   {}", num(d.scores.avg_reading));
    println!("  % passing math:      {}", num(d.scores.pct_passing_math));
    println!("  % passing reading:   {}", num(d.scores.pct_passing_reading));
    println!("  % passing overall:   {}", num(d.scores.pct_overall_passing));
    println!();
}

fn print_school_table(title: &str, rows: &[SchoolSummaryRow]) {
    println!("{title}");
    println!(
        "  {:<24} {:<10} {:>8} {:>12} {:>10} {:>9} {:>9} {:>8} {:>8} {:>9}",
        "School",
        "Type",
        "Students",
        "Budget",
        "$/Student",
        "Avg Math",
        "Avg Read",
        "% Math",
        "% Read",
        "% Overall"
    );
    for r in rows {
        println!(
            "  {:<24} {:<10} {:>8} {:>12.2} {:>10.2} {:>9} {:>9} {:>8} {:>8} {:>9}",
            r.school_name,
            r.school_type,
            r.total_students,
            r.total_budget,
            r.per_student_budget,
            num(r.scores.avg_math),
            num(r.scores.avg_reading),
            num(r.scores.pct_passing_math),
            num(r.scores.pct_passing_reading),
            num(r.scores.pct_overall_passing),
        );
    }
    println!();
}

fn print_grade_table(title: &str, rows: &[GradeScoreRow]) {
    println!("{title}");
    println!(
        "  {:<24} {:>8} {:>8} {:>8} {:>8}",
        "School", "9th", "10th", "11th", "12th"
    );
    for r in rows {
        println!(
            "  {:<24} {:>8} {:>8} {:>8} {:>8}",
            r.school_name,
            num(r.ninth),
            num(r.tenth),
            num(r.eleventh),
            num(r.twelfth),
        );
    }
    println!();
}

fn print_bucket_table(title: &str, rows: &[BucketSummaryRow]) {
    println!("{title}");
    println!(
        "  {:<18} {:>7} {:>9} {:>9} {:>8} {:>8} {:>9}",
        "Bucket", "Schools", "Avg Math", "Avg Read", "% Math", "% Read", "% Overall"
    );
    for r in rows {
        println!(
            "  {:<18} {:>7} {:>9} {:>9} {:>8} {:>8} {:>9}",
            r.bucket,
            r.schools,
            num(r.avg_math),
            num(r.avg_reading),
            num(r.pct_passing_math),
            num(r.pct_passing_reading),
            num(r.pct_overall_passing),
        );
    }
    println!();
}
