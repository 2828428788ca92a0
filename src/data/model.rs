use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

// ---------------------------------------------------------------------------
// Instrument – the fixed ticker domain
// ---------------------------------------------------------------------------

/// Futures instruments with a published daily-cycle dataset.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
pub enum Instrument {
    #[default]
    ES,
    NQ,
    YM,
    RTY,
    CL,
    GC,
}

// ---------------------------------------------------------------------------
// Categorical enums
// ---------------------------------------------------------------------------

/// Directional outcome between two reference ranges.
/// Variant order is the display order used on chart axes and filter widgets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
pub enum ModelOutcome {
    #[strum(serialize = "UXP")]
    Uxp,
    #[strum(serialize = "UX")]
    Ux,
    #[strum(serialize = "U")]
    U,
    #[strum(serialize = "DXP")]
    Dxp,
    #[strum(serialize = "DX")]
    Dx,
    #[strum(serialize = "D")]
    D,
    #[strum(serialize = "RC")]
    Rc,
    #[strum(serialize = "RX")]
    Rx,
}

/// The four independently filterable model columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, EnumIter,
)]
pub enum ModelPair {
    PodrToRdr,
    RdrToAdr,
    RdrToOdr,
    AdrToOdr,
}

impl ModelPair {
    /// Column holding this pair's outcome in the dataset.
    pub fn column(self) -> &'static str {
        match self {
            ModelPair::PodrToRdr => "podr_to_rdr_model",
            ModelPair::RdrToAdr => "rdr_to_adr_model",
            ModelPair::RdrToOdr => "rdr_to_odr_model",
            ModelPair::AdrToOdr => "adr_to_odr_model",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModelPair::PodrToRdr => "PODR-RDR Model",
            ModelPair::RdrToAdr => "RDR-ADR Model",
            ModelPair::RdrToOdr => "RDR-ODR Model",
            ModelPair::AdrToOdr => "ADR-ODR Model",
        }
    }
}

/// Shape of a full or partial session range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
pub enum DayType {
    Upside,
    Downside,
    Inside,
    Outside,
    Undefined,
}

// ---------------------------------------------------------------------------
// DateRange – inclusive calendar-day interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends. A reversed range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Same range with the bounds in ascending order.
    pub fn normalized(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }
}

// ---------------------------------------------------------------------------
// SessionRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// One trading session for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Calendar date of the session; also serves as the `date` column.
    pub session_date: NaiveDate,
    pub day_of_week: Weekday,
    /// Categorical columns: column_name → value (`None` for a blank cell).
    pub fields: BTreeMap<String, Option<String>>,
}

impl SessionRecord {
    pub fn date(&self) -> NaiveDate {
        self.session_date
    }

    /// Non-null value of a categorical column.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }
}

// ---------------------------------------------------------------------------
// SessionTable – the loaded per-instrument dataset
// ---------------------------------------------------------------------------

/// A read-only table of sessions plus the set of columns it carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionTable {
    /// Categorical column names in file order (excludes `session_date`).
    pub columns: Vec<String>,
    pub rows: Vec<SessionRecord>,
}

impl SessionTable {
    pub fn new(columns: Vec<String>, rows: Vec<SessionRecord>) -> Self {
        Self { columns, rows }
    }

    /// Same schema, different rows.
    pub fn with_rows(&self, rows: Vec<SessionRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last session date, or `None` for an empty table.
    pub fn date_span(&self) -> Option<DateRange> {
        let start = self.rows.iter().map(|r| r.session_date).min()?;
        let end = self.rows.iter().map(|r| r.session_date).max()?;
        Some(DateRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn model_outcome_labels_round_trip_through_strum() {
        let labels: Vec<String> = ModelOutcome::iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, ["UXP", "UX", "U", "DXP", "DX", "D", "RC", "RX"]);
        assert_eq!(ModelOutcome::from_str("DXP").unwrap(), ModelOutcome::Dxp);
    }

    #[test]
    fn instrument_parses_ticker() {
        assert_eq!(Instrument::from_str("RTY").unwrap(), Instrument::RTY);
        assert!(Instrument::from_str("ZB").is_err());
    }

    #[test]
    fn reversed_range_contains_nothing_until_normalized() {
        let r = DateRange::new(d(2020, 1, 10), d(2020, 1, 1));
        assert!(!r.contains(d(2020, 1, 5)));
        assert!(r.normalized().contains(d(2020, 1, 5)));
        assert!(r.normalized().contains(d(2020, 1, 10)));
    }

    #[test]
    fn date_span_of_empty_table_is_none() {
        assert!(SessionTable::default().date_span().is_none());
    }
}
