use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;
use strum::IntoEnumIterator;

use crate::data::filter::DayFilter;
use crate::data::model::{Instrument, ModelOutcome, ModelPair};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

/// Render the login form shown until the user authenticates.
pub fn login_form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Login to Database");
    ui.add_space(8.0);

    egui::Grid::new("login_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Username:");
            ui.text_edit_singleline(&mut state.login_user);
            ui.end_row();

            ui.label("Password:");
            let pw = ui.add(egui::TextEdit::singleline(&mut state.login_password).password(true));
            ui.end_row();

            let enter = pw.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Login").clicked() || enter {
                state.submit_login();
            }
        });

    if let Some(msg) = &state.status_message {
        ui.add_space(6.0);
        ui.label(RichText::new(msg).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Left side panel – instrument, day and date filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ui.strong("Instrument");
    let mut instrument = state.instrument;
    egui::ComboBox::from_id_salt("instrument")
        .selected_text(instrument.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in Instrument::iter() {
                ui.selectable_value(&mut instrument, option, option.to_string());
            }
        });
    if instrument != state.instrument {
        state.select_instrument(instrument);
    }
    ui.add_space(6.0);

    let Some(span) = state.full_span() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Day of Week");
    let mut day = state.filters.selected_day;
    egui::ComboBox::from_id_salt("selected_day")
        .selected_text(day.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in DayFilter::options() {
                ui.selectable_value(&mut day, option, option.to_string());
            }
        });
    if day != state.filters.selected_day {
        state.set_day(day);
    }
    ui.add_space(6.0);

    ui.strong("Date range");
    ui.small(format!("{} – {}", span.start, span.end));
    let mut start = state.filters.date_range.start;
    let mut end = state.filters.date_range.end;
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        changed |= ui.add(DatePickerButton::new(&mut start).id_salt("start_date")).changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        changed |= ui.add(DatePickerButton::new(&mut end).id_salt("end_date")).changed();
    });
    if changed {
        // Clamp to the observed span before handing over.
        state.set_date_range(start.clamp(span.start, span.end), end.clamp(span.start, span.end));
    }

    ui.add_space(10.0);
    let at_defaults = state.filters.is_default_for(span);
    if ui
        .add_enabled(!at_defaults, egui::Button::new("Reset all filters"))
        .clicked()
    {
        state.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Model filters – four independent multi-selects
// ---------------------------------------------------------------------------

/// Render the row of model multi-selects above the charts.
pub fn model_filters(ui: &mut Ui, state: &mut AppState) {
    let mut toggled: Vec<(ModelPair, ModelOutcome)> = Vec::new();

    ui.columns(4, |cols: &mut [Ui]| {
        for (col_ui, pair) in cols.iter_mut().zip(ModelPair::iter()) {
            let selected = state.filters.models(pair);
            let header = if selected.is_empty() {
                format!("{}  (any)", pair.title())
            } else {
                let picked: Vec<String> = selected.iter().map(|m| m.to_string()).collect();
                format!("{}  ({})", pair.title(), picked.join(", "))
            };

            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt(pair.column())
                .default_open(false)
                .show(col_ui, |ui: &mut Ui| {
                    ui.horizontal_wrapped(|ui: &mut Ui| {
                        for outcome in ModelOutcome::iter() {
                            let mut checked = selected.contains(&outcome);
                            if ui.checkbox(&mut checked, outcome.to_string()).changed() {
                                toggled.push((pair, outcome));
                            }
                        }
                    });
                });
        }
    });

    for (pair, outcome) in toggled {
        state.toggle_model(pair, outcome);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Daily Cycles");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} sessions loaded, {} visible",
                state.instrument,
                ds.len(),
                state.filtered_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Log out").clicked() {
                state.logout();
            }
            if let Some(user) = &state.username {
                ui.label(user.as_str());
            }
        });
    });
}
