use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::model::{DateRange, ModelOutcome, ModelPair, SessionRecord, SessionTable};

// ---------------------------------------------------------------------------
// Day-of-week selector
// ---------------------------------------------------------------------------

/// Either every weekday or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Selector options in display order: All, Monday … Friday.
    pub fn options() -> [DayFilter; 6] {
        use Weekday::*;
        [
            DayFilter::All,
            DayFilter::Only(Mon),
            DayFilter::Only(Tue),
            DayFilter::Only(Wed),
            DayFilter::Only(Thu),
            DayFilter::Only(Fri),
        ]
    }

    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => *d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Weekday::*;
        match self {
            DayFilter::All => write!(f, "All"),
            DayFilter::Only(d) => {
                let name = match d {
                    Mon => "Monday",
                    Tue => "Tuesday",
                    Wed => "Wednesday",
                    Thu => "Thursday",
                    Fri => "Friday",
                    Sat => "Saturday",
                    Sun => "Sunday",
                };
                write!(f, "{name}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState – every control's current value
// ---------------------------------------------------------------------------

/// Current selection of every filter control.
///
/// Each group is a pass-through at its default: `All` days, the full observed
/// date span, empty model sets. Groups combine with AND; a model set matches
/// any of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_day: DayFilter,
    pub date_range: DateRange,
    pub model_filters: BTreeMap<ModelPair, BTreeSet<ModelOutcome>>,
}

impl FilterState {
    /// Defaults for a table spanning `full_span`.
    pub fn new(full_span: DateRange) -> Self {
        Self {
            selected_day: DayFilter::All,
            date_range: full_span,
            model_filters: ModelPair::iter().map(|p| (p, BTreeSet::new())).collect(),
        }
    }

    /// Selected outcomes of one model group (empty = unrestricted).
    pub fn models(&self, pair: ModelPair) -> &BTreeSet<ModelOutcome> {
        static EMPTY: BTreeSet<ModelOutcome> = BTreeSet::new();
        self.model_filters.get(&pair).unwrap_or(&EMPTY)
    }

    /// Add or remove one outcome from a model group.
    pub fn toggle_model(&mut self, pair: ModelPair, outcome: ModelOutcome) {
        let selected = self.model_filters.entry(pair).or_default();
        if !selected.remove(&outcome) {
            selected.insert(outcome);
        }
    }

    /// True when every control is at its pass-through value for `full_span`.
    pub fn is_default_for(&self, full_span: DateRange) -> bool {
        *self == FilterState::new(full_span)
    }

    /// Whether a single session passes every active filter.
    pub fn accepts(&self, row: &SessionRecord) -> bool {
        self.selected_day.matches(row.day_of_week)
            && self.date_range.contains(row.date())
            && self.model_filters.iter().all(|(pair, selected)| {
                selected.is_empty()
                    || row
                        .value(pair.column())
                        .is_some_and(|v| selected.iter().any(|m| m.as_ref() == v))
            })
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Indices of rows that pass all active filters.
pub fn filtered_indices(table: &SessionTable, filters: &FilterState) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| filters.accepts(row))
        .map(|(i, _)| i)
        .collect()
}

/// Filtered copy of `table`; the input is left untouched.
///
/// The date range is used as given: a reversed range yields an empty table.
pub fn apply(table: &SessionTable, filters: &FilterState) -> SessionTable {
    let rows = filtered_indices(table, filters)
        .into_iter()
        .map(|i| table.rows[i].clone())
        .collect();
    table.with_rows(rows)
}
