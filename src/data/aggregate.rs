use std::collections::HashMap;

use super::error::AggregateError;
use super::model::SessionTable;

/// Category value meaning "no signal"; never counted.
pub const NO_SIGNAL: &str = "None";

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionEntry {
    pub category: String,
    /// Share of counted rows, 0.0–100.0, unrounded.
    pub percentage: f64,
    /// Display label, one decimal place, e.g. `"60.0%"`.
    pub label: String,
}

impl DistributionEntry {
    fn new(category: impl Into<String>, percentage: f64) -> Self {
        Self {
            category: category.into(),
            percentage,
            label: format!("{percentage:.1}%"),
        }
    }
}

/// Ordered per-category percentages for one column of a filtered table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    pub entries: Vec<DistributionEntry>,
    /// Rows that entered the denominator.
    pub counted: usize,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(category, percentage)` pairs in axis order.
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), e.percentage))
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }

    pub fn max_percentage(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Percentage of rows holding each category of `column`.
///
/// * Null cells and the literal `"None"` are skipped and do not count toward
///   the denominator.
/// * With `category_order`, the result follows that order exactly: missing
///   categories appear as 0 %, observed values outside the order are dropped
///   (they still count toward the denominator).
/// * Without it, categories are listed by descending frequency, ties by name.
/// * `drop_zero` removes 0 % entries.
pub fn aggregate(
    table: &SessionTable,
    column: &str,
    category_order: Option<&[String]>,
    drop_zero: bool,
) -> Result<Distribution, AggregateError> {
    if !table.has_column(column) {
        return Err(AggregateError::MissingColumn(column.to_string()));
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut counted = 0usize;
    for value in table
        .rows
        .iter()
        .filter_map(|row| row.value(column))
        .filter(|v| *v != NO_SIGNAL)
    {
        *counts.entry(value).or_default() += 1;
        counted += 1;
    }

    let percent = |n: usize| {
        if counted == 0 {
            0.0
        } else {
            n as f64 * 100.0 / counted as f64
        }
    };

    let mut entries: Vec<DistributionEntry> = match category_order {
        Some(order) => order
            .iter()
            .map(|cat| {
                let n = counts.get(cat.as_str()).copied().unwrap_or(0);
                DistributionEntry::new(cat.as_str(), percent(n))
            })
            .collect(),
        None => {
            let mut observed: Vec<(&str, usize)> = counts.into_iter().collect();
            observed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            observed
                .into_iter()
                .map(|(cat, n)| DistributionEntry::new(cat, percent(n)))
                .collect()
        }
    };

    if drop_zero {
        entries.retain(|e| e.percentage > 0.0);
    }

    Ok(Distribution { entries, counted })
}
