// tests/dashboard_flow.rs
// End-to-end flow through AppState with an in-memory dataset source:
// login → load → filter → aggregate → reset → instrument switch → relogin.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use strum::IntoEnumIterator;

use daily_cycles::config::USER_CREDENTIALS;
use daily_cycles::data::filter::DayFilter;
use daily_cycles::data::loader::{parse_csv, DatasetSource};
use daily_cycles::data::model::{Instrument, ModelOutcome, ModelPair, SessionTable};
use daily_cycles::state::AppState;

const ES_CSV: &str = "\
session_date,day_of_week,podr_to_rdr_model,rdr_to_adr_model,full_day_type,cycle_pair,partial_day_high_hm
2024-01-01,Monday,UXP,DX,Upside,UX-D,04:00:00
2024-01-02,Tuesday,UXP,None,Downside,U-U,04:05:00
2024-01-03,Wednesday,DX,U,Inside,UX-D,
2024-01-04,Thursday,UXP,U,Upside,,05:30:00
2024-01-05,Friday,DX,DX,Outside,D-D,04:00:00
2024-01-08,Monday,None,UXP,Undefined,UX-D,09:25:00
";

const NQ_CSV: &str = "\
session_date,day_of_week,full_day_type
2023-06-01,Thursday,Inside
2023-06-02,Friday,Inside
";

struct MemorySource {
    fetches: Rc<Cell<usize>>,
}

impl DatasetSource for MemorySource {
    fn location(&self, instrument: Instrument) -> String {
        format!("memory://{instrument}")
    }

    fn fetch(&self, instrument: Instrument) -> Result<SessionTable> {
        self.fetches.set(self.fetches.get() + 1);
        match instrument {
            Instrument::ES => parse_csv(ES_CSV.as_bytes()),
            Instrument::NQ => parse_csv(NQ_CSV.as_bytes()),
            other => anyhow::bail!("404 Not Found for {other}"),
        }
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn logged_in() -> (AppState, Rc<Cell<usize>>) {
    let fetches = Rc::new(Cell::new(0));
    let mut state = AppState::new(Box::new(MemorySource {
        fetches: Rc::clone(&fetches),
    }));
    let (user, pass) = USER_CREDENTIALS[0];
    state.login(user, pass).expect("valid credentials");
    (state, fetches)
}

fn view<'a>(state: &'a AppState, title: &str) -> &'a daily_cycles::charts::ChartView {
    state
        .views
        .iter()
        .find(|v| v.spec.title == title)
        .unwrap_or_else(|| panic!("no chart titled {title}"))
}

// ============================================================================
// LOGIN
// ============================================================================

#[test]
fn nothing_loads_before_login() {
    let fetches = Rc::new(Cell::new(0));
    let mut state = AppState::new(Box::new(MemorySource {
        fetches: Rc::clone(&fetches),
    }));

    assert!(state.login("badboyz", "wrong").is_err());
    assert!(!state.authenticated);
    assert!(state.dataset.is_none());
    assert_eq!(fetches.get(), 0);
}

#[test]
fn login_loads_the_selected_instrument() {
    let (state, fetches) = logged_in();

    assert_eq!(fetches.get(), 1);
    assert_eq!(state.filtered_rows, 6);
    assert_eq!(state.caption(), "Sample size: 6 rows");

    // Charts whose columns are absent are skipped.
    let titles: Vec<&str> = state.views.iter().map(|v| v.spec.title.as_str()).collect();
    assert_eq!(
        titles,
        ["PODR-RDR Model", "RDR-ADR Model", "Partial Day High", "Full Day Type", "Cycle Pair"]
    );
}

// ============================================================================
// FILTER + AGGREGATE
// ============================================================================

#[test]
fn unfiltered_distributions() {
    let (state, _) = logged_in();

    // "None" on 2024-01-08 is excluded: 3 UXP, 2 DX of 5.
    let podr = &view(&state, "PODR-RDR Model").distribution;
    assert_eq!(podr.counted, 5);
    assert_eq!(podr.entries.len(), 8);
    assert_eq!(podr.entries[0].percentage, 60.0);
    assert_eq!(podr.entries[4].percentage, 40.0);

    // Free-form: zero entries dropped, most frequent first, blank excluded.
    let pairs = &view(&state, "Cycle Pair").distribution;
    assert_eq!(pairs.counted, 5);
    assert_eq!(pairs.pairs()[0], ("UX-D", 60.0));
    assert_eq!(pairs.entries.len(), 3);

    let high = &view(&state, "Partial Day High").distribution;
    assert_eq!(high.entries.len(), 66);
    assert_eq!(high.entries[0].percentage, 40.0);
    assert!((high.total() - 100.0).abs() < 1e-9);
}

#[test]
fn weekday_filter_narrows_every_chart() {
    let (mut state, _) = logged_in();
    state.set_day(DayFilter::Only(Weekday::Mon));

    assert_eq!(state.filtered_rows, 2);
    let podr = &view(&state, "PODR-RDR Model").distribution;
    assert_eq!(podr.counted, 1);
    assert_eq!(podr.entries[0].percentage, 100.0);
}

#[test]
fn model_filter_restricts_other_columns() {
    let (mut state, _) = logged_in();
    state.toggle_model(ModelPair::PodrToRdr, ModelOutcome::Uxp);

    assert_eq!(state.filtered_rows, 3);
    let adr = &view(&state, "RDR-ADR Model").distribution;
    assert_eq!(adr.counted, 2);
    let nonzero: Vec<(&str, f64)> = adr.pairs().into_iter().filter(|(_, p)| *p > 0.0).collect();
    assert_eq!(nonzero, [("U", 50.0), ("DX", 50.0)]);
}

#[test]
fn conflicting_filters_give_zero_rows_not_an_error() {
    let (mut state, _) = logged_in();
    state.set_day(DayFilter::Only(Weekday::Mon));
    state.set_date_range(d(2024, 1, 2), d(2024, 1, 2));

    assert_eq!(state.filtered_rows, 0);
    assert_eq!(state.caption(), "Sample size: 0 rows");
    assert!(state.status_message.is_none());

    let day_type = &view(&state, "Full Day Type").distribution;
    assert_eq!(day_type.entries.len(), 5);
    assert!(day_type.entries.iter().all(|e| e.percentage == 0.0));
    assert!(view(&state, "Cycle Pair").distribution.is_empty());
}

#[test]
fn reversed_date_pick_is_swapped_by_the_controller() {
    let (mut state, _) = logged_in();
    state.set_date_range(d(2024, 1, 4), d(2024, 1, 2));

    assert_eq!(state.filters.date_range.start, d(2024, 1, 2));
    assert_eq!(state.filters.date_range.end, d(2024, 1, 4));
    assert_eq!(state.filtered_rows, 3);
}

#[test]
fn reset_restores_every_default() {
    let (mut state, _) = logged_in();
    state.set_day(DayFilter::Only(Weekday::Fri));
    state.set_date_range(d(2024, 1, 3), d(2024, 1, 5));
    state.toggle_model(ModelPair::RdrToAdr, ModelOutcome::Dx);
    state.toggle_model(ModelPair::AdrToOdr, ModelOutcome::Rc);
    let span = state.full_span().unwrap();
    assert!(!state.filters.is_default_for(span));

    state.reset_filters();
    assert!(state.filters.is_default_for(span));

    assert_eq!(state.filters.selected_day, DayFilter::All);
    assert_eq!(state.filters.date_range.start, d(2024, 1, 1));
    assert_eq!(state.filters.date_range.end, d(2024, 1, 8));
    assert!(ModelPair::iter().all(|p| state.filters.models(p).is_empty()));
    assert_eq!(state.filtered_rows, 6);
}

// ============================================================================
// CACHE + INSTRUMENTS
// ============================================================================

#[test]
fn instruments_are_cached_until_next_login() {
    let (mut state, fetches) = logged_in();

    state.select_instrument(Instrument::NQ);
    assert_eq!(state.filtered_rows, 2);
    assert_eq!(state.filters.date_range.start, d(2023, 6, 1));
    state.select_instrument(Instrument::ES);
    state.select_instrument(Instrument::NQ);
    assert_eq!(fetches.get(), 2);

    let (user, pass) = USER_CREDENTIALS[1];
    state.login(user, pass).unwrap();
    assert_eq!(fetches.get(), 3);
    assert_eq!(state.username.as_deref(), Some(user));
}

#[test]
fn failed_instrument_load_is_visible_and_not_retried_automatically() {
    let (mut state, fetches) = logged_in();

    state.select_instrument(Instrument::CL);
    assert!(state.dataset.is_none());
    assert!(state.views.is_empty());
    assert!(state
        .status_message
        .as_deref()
        .is_some_and(|m| m.contains("404 Not Found")));
    assert_eq!(fetches.get(), 2);

    // Switching back recovers from the cache without refetching.
    state.select_instrument(Instrument::ES);
    assert!(state.status_message.is_none());
    assert_eq!(state.filtered_rows, 6);
    assert_eq!(fetches.get(), 2);
}

#[test]
fn logout_drops_data() {
    let (mut state, _) = logged_in();
    state.logout();
    assert!(!state.authenticated);
    assert!(state.dataset.is_none());
    assert!(state.views.is_empty());
}
