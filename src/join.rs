//! Inner join of the students table onto the schools table.

use crate::loader::{School, Student};
use std::collections::HashMap;
use tracing::warn;

/// One row per student, carrying the matched school's attributes alongside
/// the student's grade and scores.
#[derive(Debug, Clone)]
pub struct JoinedRecord {
    pub school_name: String,
    pub school_type: String,
    pub school_size: u32,
    pub school_budget: f64,
    pub per_student_budget: f64,
    pub student_name: String,
    pub grade: String,
    pub reading_score: f64,
    pub math_score: f64,
}

/// Joins students to schools on school name (trimmed).
///
/// Students whose school name matches no school row are dropped from the
/// result, as are schools with no students. Drops are logged, not errors.
pub fn join(schools: &[School], students: &[Student]) -> Vec<JoinedRecord> {
    let by_name: HashMap<&str, &School> = schools.iter().map(|s| (s.name.trim(), s)).collect();

    let mut joined = Vec::with_capacity(students.len());
    let mut dropped = 0usize;

    for student in students {
        match by_name.get(student.school_name.trim()) {
            Some(school) => joined.push(JoinedRecord {
                school_name: school.name.trim().to_string(),
                school_type: school.school_type.clone(),
                school_size: school.size,
                school_budget: school.budget,
                per_student_budget: school.per_student_budget(),
                student_name: student.name.clone(),
                grade: student.grade.clone(),
                reading_score: student.reading_score,
                math_score: student.math_score,
            }),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "students with no matching school dropped from join");
    }

    joined
}
