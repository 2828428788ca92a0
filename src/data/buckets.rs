use chrono::{Duration, NaiveTime, Timelike};

use crate::config::DASHBOARD;

/// A session window enumerated as `HH:MM:00` labels in wall-clock order.
///
/// `last` is the start of the final bucket, inclusive. When `last` is earlier
/// in the day than `first` the window wraps midnight, e.g. 18:00 → 15:55 runs
/// 18:00 … 23:55, 00:00 … 15:55.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucketWindow {
    pub first: NaiveTime,
    pub last: NaiveTime,
    pub step_minutes: u32,
}

impl TimeBucketWindow {
    /// Window at the configured resolution.
    pub fn new(first: NaiveTime, last: NaiveTime) -> Self {
        Self {
            first,
            last,
            step_minutes: DASHBOARD.buckets.step_minutes,
        }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.last < self.first
    }

    /// Number of buckets in the window.
    pub fn len(&self) -> usize {
        let step = self.step_minutes.max(1) as i64;
        let mut span = minutes_of_day(self.last) - minutes_of_day(self.first);
        if span < 0 {
            span += 24 * 60;
        }
        (span / step + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered bucket labels.
    pub fn labels(&self) -> Vec<String> {
        let step = Duration::minutes(self.step_minutes.max(1) as i64);
        let mut t = self.first;
        (0..self.len())
            .map(|_| {
                let label = t.format("%H:%M:00").to_string();
                // overflowing_add_signed wraps past midnight
                t = t.overflowing_add_signed(step).0;
                label
            })
            .collect()
    }
}

fn minutes_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Pre-market partial session used by the partial-day charts.
pub fn partial_session_window() -> TimeBucketWindow {
    TimeBucketWindow::new(
        NaiveTime::MIN + Duration::hours(4),
        NaiveTime::MIN + Duration::hours(9) + Duration::minutes(25),
    )
}

/// Full Globex session, 18:00 prior evening through 15:55.
pub fn full_session_window() -> TimeBucketWindow {
    TimeBucketWindow::new(
        NaiveTime::MIN + Duration::hours(18),
        NaiveTime::MIN + Duration::hours(15) + Duration::minutes(55),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_window_matches_report_axis() {
        let labels = partial_session_window().labels();
        assert_eq!(labels.len(), 66);
        assert_eq!(labels.first().map(String::as_str), Some("04:00:00"));
        assert_eq!(labels.last().map(String::as_str), Some("09:25:00"));
        assert!(labels.contains(&"06:35:00".to_string()));
    }

    #[test]
    fn wrapping_window_reads_in_session_order() {
        let window = full_session_window();
        assert!(window.wraps_midnight());

        let labels = window.labels();
        // 18:00–23:55 is 72 buckets, 00:00–15:55 is 192.
        assert_eq!(labels.len(), 72 + 192);
        assert_eq!(labels[0], "18:00:00");
        assert_eq!(labels[71], "23:55:00");
        assert_eq!(labels[72], "00:00:00");
        assert_eq!(labels.last().map(String::as_str), Some("15:55:00"));
    }

    #[test]
    fn windows_use_the_configured_step() {
        assert_eq!(partial_session_window().step_minutes, DASHBOARD.buckets.step_minutes);
        assert_eq!(full_session_window().step_minutes, DASHBOARD.buckets.step_minutes);
    }

    #[test]
    fn labels_are_unique() {
        let labels = full_session_window().labels();
        let unique: std::collections::BTreeSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn single_bucket_window() {
        let t = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let w = TimeBucketWindow::new(t, t);
        assert!(!w.wraps_midnight());
        assert_eq!(w.labels(), ["09:30:00"]);
    }
}
