//! Score statistics over groups of joined records.

use crate::join::JoinedRecord;
use crate::utility::{mean, pct};
use serde::Serialize;

/// Passing threshold on the 0-100 score scale. Fixed business rule.
pub const PASSING_SCORE: f64 = 70.0;

/// Score statistics for one group of students.
///
/// `pct_overall_passing` is the simple mean of the math and reading passing
/// percentages, not the share of students passing both subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub avg_math: Option<f64>,
    pub avg_reading: Option<f64>,
    pub pct_passing_math: Option<f64>,
    pub pct_passing_reading: Option<f64>,
    pub pct_overall_passing: Option<f64>,
}

impl ScoreSummary {
    /// Summarizes a group of joined records. An empty group yields `None`
    /// for every statistic, never a zero or a division by zero.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a JoinedRecord>,
    {
        let mut math = Vec::new();
        let mut reading = Vec::new();
        let mut passing_math = 0usize;
        let mut passing_reading = 0usize;

        for r in records {
            math.push(r.math_score);
            reading.push(r.reading_score);

            if r.math_score >= PASSING_SCORE {
                passing_math += 1;
            }
            if r.reading_score >= PASSING_SCORE {
                passing_reading += 1;
            }
        }

        let count = math.len();
        let pct_passing_math = pct(passing_math, count);
        let pct_passing_reading = pct(passing_reading, count);
        let pct_overall_passing = match (pct_passing_math, pct_passing_reading) {
            (Some(m), Some(r)) => Some((m + r) / 2.0),
            _ => None,
        };

        ScoreSummary {
            count,
            avg_math: mean(&math),
            avg_reading: mean(&reading),
            pct_passing_math,
            pct_passing_reading,
            pct_overall_passing,
        }
    }
}
