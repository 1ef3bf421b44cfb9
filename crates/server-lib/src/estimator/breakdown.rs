//! Cost breakdown allocation
//!
//! Splits a final cost estimate into fixed material/labor buckets using
//! a hardcoded percentage table summing to 100.0.

use std::collections::BTreeMap;

/// Category percentage table. The percentages sum to 100.0.
pub const COST_CATEGORIES: [(&str, f64); 13] = [
    ("Cement", 13.0),
    ("Sand", 8.3),
    ("Aggregate", 5.6),
    ("Steel", 15.7),
    ("Paint", 2.8),
    ("Bricks", 6.5),
    ("Flooring", 4.6),
    ("Windows", 2.8),
    ("Doors", 3.7),
    ("Transportation Costs", 4.6),
    ("Architect & Design Costs", 6.5),
    ("Labor Costs", 21.3),
    ("Miscellaneous Costs", 4.6),
];

/// The percentage table keyed by category name.
pub fn percentage_table() -> BTreeMap<String, f64> {
    COST_CATEGORIES
        .iter()
        .map(|(name, pct)| (name.to_string(), *pct))
        .collect()
}

/// Split `final_cost` into per-category monetary contributions.
pub fn allocate(final_cost: f64) -> BTreeMap<String, f64> {
    COST_CATEGORIES
        .iter()
        .map(|(name, pct)| (name.to_string(), final_cost * (pct / 100.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_sum_to_hundred() {
        let total: f64 = COST_CATEGORIES.iter().map(|(_, pct)| pct).sum();
        assert!((total - 100.0).abs() < 1e-9, "table sums to {}", total);
    }

    #[test]
    fn test_thirteen_categories() {
        assert_eq!(COST_CATEGORIES.len(), 13);
        assert_eq!(percentage_table().len(), 13);
    }

    #[test]
    fn test_contributions_sum_to_total() {
        let total = 1234567.89;
        let contributions = allocate(total);

        assert_eq!(contributions.len(), 13);
        let sum: f64 = contributions.values().sum();
        assert!((sum - total).abs() < 1e-6, "contributions sum to {}", sum);
    }

    #[test]
    fn test_labor_is_largest_bucket() {
        let contributions = allocate(100.0);
        assert!((contributions["Labor Costs"] - 21.3).abs() < 1e-9);
        let max = contributions.values().cloned().fold(f64::MIN, f64::max);
        assert!((contributions["Labor Costs"] - max).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_allocates_zeros() {
        let contributions = allocate(0.0);
        assert!(contributions.values().all(|v| *v == 0.0));
    }
}
