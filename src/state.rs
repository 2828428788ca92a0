use std::sync::Arc;

use chrono::NaiveDate;

use crate::auth::{self, AuthError};
use crate::charts::{build_views, catalogue, ChartSpec, ChartView};
use crate::data::cache::DatasetCache;
use crate::data::filter::{apply, DayFilter, FilterState};
use crate::data::loader::DatasetSource;
use crate::data::model::{DateRange, Instrument, ModelOutcome, ModelPair, SessionTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    source: Box<dyn DatasetSource>,
    cache: DatasetCache,

    pub authenticated: bool,
    pub username: Option<String>,

    /// Login form inputs.
    pub login_user: String,
    pub login_password: String,

    pub instrument: Instrument,

    /// Table for `instrument` (None until loaded, or after a failed load).
    pub dataset: Option<Arc<SessionTable>>,

    /// Current filter selection; defaults follow the loaded table's date span.
    pub filters: FilterState,

    pub charts: Vec<ChartSpec>,

    /// Charts computed from the last recompute.
    pub views: Vec<ChartView>,

    /// Row count of the filtered table.
    pub filtered_rows: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            source,
            cache: DatasetCache::new(),
            authenticated: false,
            username: None,
            login_user: String::new(),
            login_password: String::new(),
            instrument: Instrument::default(),
            dataset: None,
            filters: FilterState::new(DateRange::new(today, today)),
            charts: catalogue(),
            views: Vec::new(),
            filtered_rows: 0,
            status_message: None,
        }
    }

    // -- authentication --

    /// Check credentials; on success clear cached datasets and load the
    /// current instrument. On failure nothing but the message changes.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if let Err(e) = auth::authenticate(username, password) {
            log::warn!("Failed login for '{}'", username.trim());
            self.status_message = Some(e.to_string());
            return Err(e);
        }

        log::info!("User '{}' logged in", username.trim());
        self.authenticated = true;
        self.username = Some(username.trim().to_string());
        self.login_password.clear();
        self.status_message = None;
        self.cache.clear();
        self.select_instrument(self.instrument);
        Ok(())
    }

    /// Submit the login form fields. A rejected attempt clears the password
    /// field and leaves the reason in `status_message`.
    pub fn submit_login(&mut self) {
        let user = self.login_user.clone();
        let password = self.login_password.clone();
        if self.login(&user, &password).is_err() {
            self.login_password.clear();
        }
    }

    pub fn logout(&mut self) {
        log::info!("User {:?} logged out", self.username);
        self.authenticated = false;
        self.username = None;
        self.dataset = None;
        self.views.clear();
        self.filtered_rows = 0;
        self.cache.clear();
    }

    // -- dataset --

    /// Switch instrument, loading its table through the cache.
    /// Filters are reset to the new table's defaults.
    pub fn select_instrument(&mut self, instrument: Instrument) {
        self.instrument = instrument;
        if !self.authenticated {
            return;
        }

        match self.cache.get_or_load(instrument, self.source.as_ref()) {
            Ok(table) => {
                self.dataset = Some(table);
                self.status_message = None;
                self.reset_filters();
            }
            Err(e) => {
                log::error!("Failed to load {instrument}: {e:#}");
                self.status_message = Some(format!("Error loading {instrument}: {e:#}"));
                self.dataset = None;
                self.views.clear();
                self.filtered_rows = 0;
            }
        }
    }

    /// Observed date span of the loaded table.
    pub fn full_span(&self) -> Option<DateRange> {
        self.dataset.as_ref().and_then(|t| t.date_span())
    }

    // -- filters --

    pub fn set_day(&mut self, day: DayFilter) {
        self.filters.selected_day = day;
        self.recompute();
    }

    /// Set the date range; a reversed pick is swapped first.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.filters.date_range = DateRange::new(start, end).normalized();
        self.recompute();
    }

    pub fn toggle_model(&mut self, pair: ModelPair, outcome: ModelOutcome) {
        self.filters.toggle_model(pair, outcome);
        self.recompute();
    }

    /// Restore every filter to its default in one assignment.
    pub fn reset_filters(&mut self) {
        let span = self.full_span().unwrap_or(self.filters.date_range);
        self.filters = FilterState::new(span);
        self.recompute();
    }

    /// Re-run filter + aggregation for every chart.
    pub fn recompute(&mut self) {
        let Some(table) = &self.dataset else {
            return;
        };
        let filtered = apply(table, &self.filters);
        self.filtered_rows = filtered.len();
        self.views = build_views(&self.charts, &filtered);
        log::debug!(
            "{}: {} of {} sessions pass filters, {} charts",
            self.instrument,
            filtered.len(),
            table.len(),
            self.views.len()
        );
    }

    /// Row-count caption, e.g. "Sample size: 1,234 rows".
    pub fn caption(&self) -> String {
        format!("Sample size: {} rows", thousands(self.filtered_rows))
    }
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn location(&self, instrument: Instrument) -> String {
            format!("unreachable://{instrument}")
        }

        fn fetch(&self, _instrument: Instrument) -> Result<SessionTable> {
            anyhow::bail!("network unreachable")
        }
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(4321987), "4,321,987");
    }

    #[test]
    fn bad_login_changes_nothing_but_the_message() {
        let mut state = AppState::new(Box::new(FailingSource));
        assert!(state.login("nobody", "nothing").is_err());
        assert!(!state.authenticated);
        assert!(state.username.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn rejected_form_submit_clears_the_password() {
        let mut state = AppState::new(Box::new(FailingSource));
        state.login_user = "nobody".to_string();
        state.login_password = "nothing".to_string();
        state.submit_login();

        assert!(!state.authenticated);
        assert!(state.login_password.is_empty());
        assert_eq!(state.login_user, "nobody");
        assert!(state.status_message.is_some());
    }

    #[test]
    fn accepted_form_submit_logs_in() {
        let mut state = AppState::new(Box::new(FailingSource));
        let (user, pass) = crate::config::USER_CREDENTIALS[0];
        state.login_user = user.to_string();
        state.login_password = pass.to_string();
        state.submit_login();

        assert!(state.authenticated);
        assert_eq!(state.username.as_deref(), Some(user));
        assert!(state.login_password.is_empty());
    }

    #[test]
    fn load_failure_surfaces_without_a_table() {
        let mut state = AppState::new(Box::new(FailingSource));
        let (user, pass) = crate::config::USER_CREDENTIALS[0];
        assert!(state.login(user, pass).is_ok());

        assert!(state.authenticated);
        assert!(state.dataset.is_none());
        assert!(state.views.is_empty());
        let msg = state.status_message.as_deref().unwrap_or_default();
        assert!(msg.contains("network unreachable"), "{msg}");
    }

    #[test]
    fn instrument_is_remembered_before_login() {
        let mut state = AppState::new(Box::new(FailingSource));
        state.select_instrument(Instrument::GC);
        assert_eq!(state.instrument, Instrument::GC);
        assert!(state.status_message.is_none());
    }
}
