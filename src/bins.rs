//! Fixed-edge buckets over per-school quantities.
//!
//! Bucket edges are left-inclusive and right-exclusive, except the final
//! size bucket which includes its upper edge. Values outside the edges are
//! unbucketed and excluded from the bucketed summaries.

pub const SPENDING_LABELS: [&str; 4] = ["<$585", "$585-615", "$615-645", "$645-675"];

// The "Medium" label text mismatches its [1000, 2000) range; the label is
// kept verbatim so consumers keep seeing the text they expect.
pub const SIZE_LABELS: [&str; 3] = ["Small <1000", "Medium 2000-5000", "Large >5000"];

/// Assigns a per-student budget (USD) to a spending bucket.
pub fn spending_bucket(per_student_budget: f64) -> Option<&'static str> {
    match per_student_budget {
        b if (0.0..585.0).contains(&b) => Some(SPENDING_LABELS[0]),
        b if (585.0..615.0).contains(&b) => Some(SPENDING_LABELS[1]),
        b if (615.0..645.0).contains(&b) => Some(SPENDING_LABELS[2]),
        b if (645.0..675.0).contains(&b) => Some(SPENDING_LABELS[3]),
        _ => None,
    }
}

/// Assigns an enrollment count to a size bucket.
pub fn size_bucket(size: u32) -> Option<&'static str> {
    match size {
        0..1000 => Some(SIZE_LABELS[0]),
        1000..2000 => Some(SIZE_LABELS[1]),
        2000..=5000 => Some(SIZE_LABELS[2]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_bucket_boundaries() {
        assert_eq!(spending_bucket(0.0), Some("<$585"));
        assert_eq!(spending_bucket(500.0), Some("<$585"));
        assert_eq!(spending_bucket(584.99), Some("<$585"));
        assert_eq!(spending_bucket(585.0), Some("$585-615"));
        assert_eq!(spending_bucket(614.99), Some("$585-615"));
        assert_eq!(spending_bucket(615.0), Some("$615-645"));
        assert_eq!(spending_bucket(645.0), Some("$645-675"));
        assert_eq!(spending_bucket(674.99), Some("$645-675"));
        assert_eq!(spending_bucket(675.0), None);
        assert_eq!(spending_bucket(-1.0), None);
    }

    #[test]
    fn test_size_bucket_boundaries() {
        assert_eq!(size_bucket(0), Some("Small <1000"));
        assert_eq!(size_bucket(999), Some("Small <1000"));
        assert_eq!(size_bucket(1000), Some("Medium 2000-5000"));
        assert_eq!(size_bucket(1999), Some("Medium 2000-5000"));
        assert_eq!(size_bucket(2000), Some("Large >5000"));
        assert_eq!(size_bucket(5000), Some("Large >5000"));
        assert_eq!(size_bucket(5001), None);
    }

    #[test]
    fn test_binning_is_deterministic() {
        for size in [0u32, 999, 1000, 2500, 5000, 6000] {
            assert_eq!(size_bucket(size), size_bucket(size));
        }
        for budget in [0.0, 584.5, 585.0, 650.0, 700.0] {
            assert_eq!(spending_bucket(budget), spending_bucket(budget));
        }
    }
}
