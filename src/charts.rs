//! Declarative chart catalogue and the per-chart aggregation driver.

use strum::IntoEnumIterator;

use crate::data::aggregate::{aggregate, Distribution};
use crate::data::buckets::{full_session_window, partial_session_window};
use crate::data::error::AggregateError;
use crate::data::model::{DayType, ModelOutcome, ModelPair, SessionTable};

/// How a chart's x-axis is ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOrder {
    /// Exactly these categories, in this order.
    Fixed(Vec<String>),
    /// Whatever the data contains, most frequent first.
    FreeForm,
}

impl CategoryOrder {
    fn from_labels<T: ToString>(labels: impl IntoIterator<Item = T>) -> Self {
        CategoryOrder::Fixed(labels.into_iter().map(|l| l.to_string()).collect())
    }

    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            CategoryOrder::Fixed(v) => Some(v.as_slice()),
            CategoryOrder::FreeForm => None,
        }
    }
}

/// Which row of the dashboard a chart is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartGroup {
    Models,
    TimeBuckets,
    DayShape,
    Pairs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub column: String,
    pub title: String,
    pub order: CategoryOrder,
    pub drop_zero: bool,
    pub group: ChartGroup,
}

impl ChartSpec {
    fn new(column: &str, title: &str, order: CategoryOrder, group: ChartGroup) -> Self {
        // Free-form axes only show what was observed.
        let drop_zero = matches!(order, CategoryOrder::FreeForm);
        Self {
            column: column.to_string(),
            title: title.to_string(),
            order,
            drop_zero,
            group,
        }
    }

    pub fn aggregate(&self, table: &SessionTable) -> Result<Distribution, AggregateError> {
        aggregate(table, &self.column, self.order.as_slice(), self.drop_zero)
    }
}

/// Every chart on the dashboard, in display order.
pub fn catalogue() -> Vec<ChartSpec> {
    let models = || CategoryOrder::from_labels(ModelOutcome::iter());
    let day_types = || CategoryOrder::from_labels(DayType::iter());
    let partial = || CategoryOrder::Fixed(partial_session_window().labels());
    let full = || CategoryOrder::Fixed(full_session_window().labels());

    let mut charts: Vec<ChartSpec> = ModelPair::iter()
        .map(|p| ChartSpec::new(p.column(), p.title(), models(), ChartGroup::Models))
        .collect();

    charts.extend([
        ChartSpec::new("partial_day_high_hm", "Partial Day High", partial(), ChartGroup::TimeBuckets),
        ChartSpec::new("partial_day_low_hm", "Partial Day Low", partial(), ChartGroup::TimeBuckets),
        ChartSpec::new("day_high_hm", "HoD Time", full(), ChartGroup::TimeBuckets),
        ChartSpec::new("day_low_hm", "LoD Time", full(), ChartGroup::TimeBuckets),
        ChartSpec::new("partial_day_type", "Partial Day Type", day_types(), ChartGroup::DayShape),
        ChartSpec::new("full_day_type", "Full Day Type", day_types(), ChartGroup::DayShape),
        ChartSpec::new("cycle_pair", "Cycle Pair", CategoryOrder::FreeForm, ChartGroup::Pairs),
    ]);
    charts
}

/// A chart ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub spec: ChartSpec,
    pub distribution: Distribution,
}

/// Aggregate every chart against `table`. Charts whose column is missing are skipped.
pub fn build_views(specs: &[ChartSpec], table: &SessionTable) -> Vec<ChartView> {
    specs
        .iter()
        .filter_map(|spec| match spec.aggregate(table) {
            Ok(distribution) => Some(ChartView {
                spec: spec.clone(),
                distribution,
            }),
            Err(e) => {
                log::debug!("Skipping chart '{}': {e}", spec.title);
                None
            }
        })
        .collect()
}
