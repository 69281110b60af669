//! CSV input for the schools and students tables.
//!
//! Both tables are read once, in row order, into plain vectors. Header
//! validation happens before any row is parsed so a missing column fails
//! with the column's name instead of a mid-file serde error.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// One row of the schools table. Immutable reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct School {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub school_type: String,
    pub size: u32,
    pub budget: f64,
}

impl School {
    /// Total budget divided by enrollment.
    pub fn per_student_budget(&self) -> f64 {
        self.budget / self.size as f64
    }
}

/// One row of the students table.
#[derive(Debug, Clone, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub grade: String,
    pub school_name: String,
    pub reading_score: f64,
    pub math_score: f64,
}

const SCHOOL_COLUMNS: &[&str] = &["id", "name", "type", "size", "budget"];
const STUDENT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "grade",
    "school_name",
    "reading_score",
    "math_score",
];

/// Loads the schools table from a CSV file.
pub fn load_schools(path: &Path) -> Result<Vec<School>> {
    read_table(path, SCHOOL_COLUMNS)
}

/// Loads the students table from a CSV file.
pub fn load_students(path: &Path) -> Result<Vec<Student>> {
    read_table(path, STUDENT_COLUMNS)
}

fn read_table<T>(path: &Path, required: &[&str]) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?;
    for col in required {
        if !headers.iter().any(|h| h == *col) {
            bail!("{}: missing required column `{}`", path.display(), col);
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T =
            result.with_context(|| format!("failed to parse row in {}", path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}
