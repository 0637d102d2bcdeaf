
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Number of decimal places kept on every allele fraction we write
pub const VAF_DECIMALS: i32 = 4;

/// Reference and alternate fragment support for one variant in one read category.
/// Total is always derived, so `total = ref + alt` cannot drift.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FragmentCounts {
    /// fragments supporting the reference allele
    ref_count: u64,
    /// fragments supporting the alternate allele
    alt_count: u64
}

impl FragmentCounts {
    pub fn new(ref_count: u64, alt_count: u64) -> FragmentCounts {
        FragmentCounts {
            ref_count,
            alt_count
        }
    }

    pub fn ref_count(&self) -> u64 {
        self.ref_count
    }

    pub fn alt_count(&self) -> u64 {
        self.alt_count
    }

    pub fn total(&self) -> u64 {
        self.ref_count + self.alt_count
    }

    /// Variant allele fraction, alt / (alt + ref), rounded to 4 places; 0.0 when there is no coverage
    pub fn vaf(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            round_vaf(self.alt_count as f64 / total as f64)
        }
    }
}

impl Add for FragmentCounts {
    type Output = FragmentCounts;

    fn add(self, rhs: FragmentCounts) -> FragmentCounts {
        FragmentCounts::new(self.ref_count + rhs.ref_count, self.alt_count + rhs.alt_count)
    }
}

/// Rounds a fraction to the allele fraction precision; exact ties go to the even digit, so 1/32 becomes 0.0312
pub fn round_vaf(value: f64) -> f64 {
    let scale = 10.0_f64.powi(VAF_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// Formats an allele fraction in shortest decimal form, e.g. "0", "0.0006", "1"
pub fn format_vaf(value: f64) -> String {
    format!("{}", round_vaf(value))
}
