//! Assembles the summary tables from the loaded and joined rows.

use crate::aggregate::ScoreSummary;
use crate::bins::{SIZE_LABELS, SPENDING_LABELS, size_bucket, spending_bucket};
use crate::join::JoinedRecord;
use crate::loader::School;
use crate::utility::{mean, mean_present};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Grade levels, in table column order.
pub const GRADES: [&str; 4] = ["9th", "10th", "11th", "12th"];

/// District-wide totals and score statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictSummary {
    pub total_schools: usize,
    pub total_students: u64,
    pub total_budget: f64,
    pub per_student_budget: Option<f64>,
    pub scores: ScoreSummary,
}

/// One per-school overview row, in schools-table order.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolSummaryRow {
    pub school_name: String,
    pub school_type: String,
    pub total_students: u32,
    pub total_budget: f64,
    pub per_student_budget: f64,
    pub scores: ScoreSummary,
}

/// Mean score per grade level for one school. `None` marks a grade with no
/// students at that school.
#[derive(Debug, Clone, Serialize)]
pub struct GradeScoreRow {
    pub school_name: String,
    #[serde(rename = "9th")]
    pub ninth: Option<f64>,
    #[serde(rename = "10th")]
    pub tenth: Option<f64>,
    #[serde(rename = "11th")]
    pub eleventh: Option<f64>,
    #[serde(rename = "12th")]
    pub twelfth: Option<f64>,
}

/// Average-of-averages statistics for one spending or size bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketSummaryRow {
    pub bucket: &'static str,
    pub schools: usize,
    pub avg_math: Option<f64>,
    pub avg_reading: Option<f64>,
    pub pct_passing_math: Option<f64>,
    pub pct_passing_reading: Option<f64>,
    pub pct_overall_passing: Option<f64>,
}

/// All summary tables for one run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub district: DistrictSummary,
    pub schools: Vec<SchoolSummaryRow>,
    pub top_schools: Vec<SchoolSummaryRow>,
    pub bottom_schools: Vec<SchoolSummaryRow>,
    pub math_by_grade: Vec<GradeScoreRow>,
    pub reading_by_grade: Vec<GradeScoreRow>,
    pub by_spending: Vec<BucketSummaryRow>,
    pub by_size: Vec<BucketSummaryRow>,
}

/// Builds every summary table from the schools table and the joined records.
pub fn build_report(schools: &[School], joined: &[JoinedRecord]) -> Report {
    let mut by_school: HashMap<&str, Vec<&JoinedRecord>> = HashMap::new();
    for record in joined {
        by_school
            .entry(record.school_name.as_str())
            .or_default()
            .push(record);
    }

    let school_rows: Vec<SchoolSummaryRow> = schools
        .iter()
        .map(|school| {
            let group = by_school
                .get(school.name.trim())
                .map(Vec::as_slice)
                .unwrap_or_default();
            SchoolSummaryRow {
                school_name: school.name.trim().to_string(),
                school_type: school.school_type.clone(),
                total_students: school.size,
                total_budget: school.budget,
                per_student_budget: school.per_student_budget(),
                scores: ScoreSummary::from_records(group.iter().copied()),
            }
        })
        .collect();

    let total_students: u64 = schools.iter().map(|s| u64::from(s.size)).sum();
    let total_budget: f64 = schools.iter().map(|s| s.budget).sum();
    let district = DistrictSummary {
        total_schools: schools.len(),
        total_students,
        total_budget,
        per_student_budget: if total_students == 0 {
            None
        } else {
            Some(total_budget / total_students as f64)
        },
        scores: ScoreSummary::from_records(joined),
    };

    let mut top_schools = school_rows.clone();
    top_schools.sort_by(by_overall_desc);
    top_schools.truncate(5);

    let mut bottom_schools = school_rows.clone();
    bottom_schools.sort_by(|a, b| by_overall_desc(b, a));
    bottom_schools.truncate(5);

    let math_by_grade = grade_table(&school_rows, &by_school, |r| r.math_score);
    let reading_by_grade = grade_table(&school_rows, &by_school, |r| r.reading_score);

    let by_spending = bucket_summaries(&school_rows, &SPENDING_LABELS, |row| {
        spending_bucket(row.per_student_budget)
    });
    let by_size = bucket_summaries(&school_rows, &SIZE_LABELS, |row| {
        size_bucket(row.total_students)
    });

    Report {
        generated_at: Utc::now(),
        district,
        schools: school_rows,
        top_schools,
        bottom_schools,
        math_by_grade,
        reading_by_grade,
        by_spending,
        by_size,
    }
}

/// Descending by overall passing percentage; the stable sort keeps ties in
/// schools-table order.
fn by_overall_desc(a: &SchoolSummaryRow, b: &SchoolSummaryRow) -> Ordering {
    b.scores
        .pct_overall_passing
        .partial_cmp(&a.scores.pct_overall_passing)
        .unwrap_or(Ordering::Equal)
}

fn grade_table(
    school_rows: &[SchoolSummaryRow],
    by_school: &HashMap<&str, Vec<&JoinedRecord>>,
    score: impl Fn(&JoinedRecord) -> f64,
) -> Vec<GradeScoreRow> {
    school_rows
        .iter()
        .map(|row| {
            let group = by_school
                .get(row.school_name.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let grade_mean = |grade: &str| {
                let scores: Vec<f64> = group
                    .iter()
                    .copied()
                    .filter(|r| r.grade == grade)
                    .map(&score)
                    .collect();
                mean(&scores)
            };

            GradeScoreRow {
                school_name: row.school_name.clone(),
                ninth: grade_mean(GRADES[0]),
                tenth: grade_mean(GRADES[1]),
                eleventh: grade_mean(GRADES[2]),
                twelfth: grade_mean(GRADES[3]),
            }
        })
        .collect()
}

fn bucket_summaries(
    school_rows: &[SchoolSummaryRow],
    labels: &[&'static str],
    bucket_of: impl Fn(&SchoolSummaryRow) -> Option<&'static str>,
) -> Vec<BucketSummaryRow> {
    labels
        .iter()
        .copied()
        .map(|label| {
            let group: Vec<&SchoolSummaryRow> = school_rows
                .iter()
                .filter(|&row| bucket_of(row) == Some(label))
                .collect();
            mean_of_school_averages(label, &group)
        })
        .collect()
}

/// Mean of already-per-school averages: each school contributes one value to
/// its bucket regardless of enrollment. Deliberately not a re-aggregation
/// over the underlying students.
fn mean_of_school_averages(
    bucket: &'static str,
    group: &[&SchoolSummaryRow],
) -> BucketSummaryRow {
    BucketSummaryRow {
        bucket,
        schools: group.len(),
        avg_math: mean_present(group.iter().map(|r| r.scores.avg_math)),
        avg_reading: mean_present(group.iter().map(|r| r.scores.avg_reading)),
        pct_passing_math: mean_present(group.iter().map(|r| r.scores.pct_passing_math)),
        pct_passing_reading: mean_present(group.iter().map(|r| r.scores.pct_passing_reading)),
        pct_overall_passing: mean_present(group.iter().map(|r| r.scores.pct_overall_passing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(id: u32, name: &str, kind: &str, size: u32, budget: f64) -> School {
        School {
            id,
            name: name.to_string(),
            school_type: kind.to_string(),
            size,
            budget,
        }
    }

    fn record(school: &School, grade: &str, math: f64, reading: f64) -> JoinedRecord {
        JoinedRecord {
            school_name: school.name.clone(),
            school_type: school.school_type.clone(),
            school_size: school.size,
            school_budget: school.budget,
            per_student_budget: school.per_student_budget(),
            student_name: "Test Student".to_string(),
            grade: grade.to_string(),
            reading_score: reading,
            math_score: math,
        }
    }

    /// Three schools with distinct overall passing rates and one empty school.
    fn fixture() -> (Vec<School>, Vec<JoinedRecord>) {
        let schools = vec![
            school(0, "Alden High School", "District", 2000, 1_000_000.0),
            school(1, "Briar High School", "Charter", 900, 540_000.0),
            school(2, "Crest High School", "Charter", 1500, 975_000.0),
            school(3, "Dunmore High School", "District", 5200, 3_400_000.0),
        ];

        let joined = vec![
            // Alden: both students pass both subjects
            record(&schools[0], "9th", 85.0, 90.0),
            record(&schools[0], "10th", 75.0, 80.0),
            // Briar: one of two passes math, both pass reading
            record(&schools[1], "9th", 60.0, 72.0),
            record(&schools[1], "12th", 95.0, 88.0),
            // Crest: nobody passes anything
            record(&schools[2], "11th", 40.0, 50.0),
            // Dunmore has no students
        ];

        (schools, joined)
    }

    #[test]
    fn test_district_totals_sum_over_schools() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        assert_eq!(report.district.total_schools, 4);
        assert_eq!(report.district.total_students, 2000 + 900 + 1500 + 5200);
        assert!((report.district.total_budget - 5_915_000.0).abs() < 1e-6);
        assert_eq!(report.district.scores.count, 5);
    }

    #[test]
    fn test_school_rows_keep_input_order() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let names: Vec<&str> = report
            .schools
            .iter()
            .map(|r| r.school_name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Alden High School",
                "Briar High School",
                "Crest High School",
                "Dunmore High School"
            ]
        );
    }

    #[test]
    fn test_school_with_no_students_gets_missing_markers() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let dunmore = &report.schools[3];
        assert_eq!(dunmore.scores.count, 0);
        assert_eq!(dunmore.scores.avg_math, None);
        assert_eq!(dunmore.scores.pct_overall_passing, None);
    }

    #[test]
    fn test_top_schools_sorted_descending() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let top: Vec<&str> = report
            .top_schools
            .iter()
            .map(|r| r.school_name.as_str())
            .collect();
        // Alden 100.0, Briar 75.0, Crest 0.0, Dunmore None
        assert_eq!(
            top,
            [
                "Alden High School",
                "Briar High School",
                "Crest High School",
                "Dunmore High School"
            ]
        );

        for pair in report.top_schools.windows(2) {
            assert!(pair[0].scores.pct_overall_passing >= pair[1].scores.pct_overall_passing);
        }
    }

    #[test]
    fn test_bottom_is_complement_ordering_of_top() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let top: Vec<&str> = report
            .top_schools
            .iter()
            .map(|r| r.school_name.as_str())
            .collect();
        let mut bottom: Vec<&str> = report
            .bottom_schools
            .iter()
            .map(|r| r.school_name.as_str())
            .collect();
        bottom.reverse();
        assert_eq!(top, bottom);
    }

    #[test]
    fn test_top_length_is_min_of_five_and_school_count() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);
        assert_eq!(report.top_schools.len(), 4);

        let many: Vec<School> = (0..8)
            .map(|i| school(i, &format!("School {i}"), "District", 1000, 600_000.0))
            .collect();
        let report = build_report(&many, &[]);
        assert_eq!(report.top_schools.len(), 5);
        assert_eq!(report.bottom_schools.len(), 5);
    }

    #[test]
    fn test_grade_tables_use_none_for_empty_cells() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let alden_math = &report.math_by_grade[0];
        assert_eq!(alden_math.ninth, Some(85.0));
        assert_eq!(alden_math.tenth, Some(75.0));
        assert_eq!(alden_math.eleventh, None);
        assert_eq!(alden_math.twelfth, None);

        let briar_reading = &report.reading_by_grade[1];
        assert_eq!(briar_reading.ninth, Some(72.0));
        assert_eq!(briar_reading.twelfth, Some(88.0));
    }

    #[test]
    fn test_every_bucket_label_is_present() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        let spending: Vec<&str> = report.by_spending.iter().map(|r| r.bucket).collect();
        assert_eq!(spending, SPENDING_LABELS);

        let size: Vec<&str> = report.by_size.iter().map(|r| r.bucket).collect();
        assert_eq!(size, SIZE_LABELS);
    }

    #[test]
    fn test_bucket_assignment() {
        let (schools, joined) = fixture();
        let report = build_report(&schools, &joined);

        // Alden $500, Briar $600, Crest $650, Dunmore ~$654; Dunmore's size
        // (5200) is outside the size edges entirely.
        let spending: Vec<usize> = report.by_spending.iter().map(|r| r.schools).collect();
        assert_eq!(spending, [1, 1, 0, 2]);

        let size: Vec<usize> = report.by_size.iter().map(|r| r.schools).collect();
        assert_eq!(size, [1, 1, 1]);
    }

    #[test]
    fn test_bucket_stats_are_mean_of_school_averages() {
        let a = SchoolSummaryRow {
            school_name: "A".to_string(),
            school_type: "District".to_string(),
            total_students: 100,
            total_budget: 50_000.0,
            per_student_budget: 500.0,
            scores: ScoreSummary {
                count: 100,
                avg_math: Some(90.0),
                avg_reading: Some(80.0),
                pct_passing_math: Some(100.0),
                pct_passing_reading: Some(100.0),
                pct_overall_passing: Some(100.0),
            },
        };
        let b = SchoolSummaryRow {
            school_name: "B".to_string(),
            school_type: "District".to_string(),
            total_students: 900,
            total_budget: 450_000.0,
            per_student_budget: 500.0,
            scores: ScoreSummary {
                count: 900,
                avg_math: Some(50.0),
                avg_reading: Some(60.0),
                pct_passing_math: Some(0.0),
                pct_passing_reading: Some(50.0),
                pct_overall_passing: Some(25.0),
            },
        };

        // Each school counts once; the 9x enrollment difference is ignored.
        let row = mean_of_school_averages("<$585", &[&a, &b]);
        assert_eq!(row.schools, 2);
        assert_eq!(row.avg_math, Some(70.0));
        assert_eq!(row.avg_reading, Some(70.0));
        assert_eq!(row.pct_passing_math, Some(50.0));
        assert_eq!(row.pct_passing_reading, Some(75.0));
        assert_eq!(row.pct_overall_passing, Some(62.5));
    }

    #[test]
    fn test_empty_bucket_is_all_none() {
        let row = mean_of_school_averages("$615-645", &[]);
        assert_eq!(row.schools, 0);
        assert_eq!(row.avg_math, None);
        assert_eq!(row.pct_overall_passing, None);
    }
}
