use eframe::egui::{self, Ui};

use crate::charts::{ChartGroup, ChartView};
use crate::state::AppState;
use crate::ui::{panels, plot};

const MODEL_CHART_HEIGHT: f32 = 200.0;
const WIDE_CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DailyCyclesApp {
    pub state: AppState,
}

impl DailyCyclesApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DailyCyclesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.authenticated {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.set_max_width(320.0);
                    panels::login_form(ui, &mut self.state);
                });
            });
            return;
        }

        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: sample size ----
        egui::TopBottomPanel::bottom("caption").show(ctx, |ui| {
            ui.label(self.state.caption());
        });

        // ---- Central panel: model filters + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("No data for this instrument");
                });
                return;
            }

            panels::model_filters(ui, &mut self.state);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    chart_rows(ui, &self.state.views);
                });
        });
    }
}

/// Lay the charts out: models side by side, buckets full width,
/// day shapes side by side, pairs full width.
fn chart_rows(ui: &mut Ui, views: &[ChartView]) {
    let in_group = |g: ChartGroup| group(views, g);

    side_by_side(ui, &in_group(ChartGroup::Models), MODEL_CHART_HEIGHT);
    for view in in_group(ChartGroup::TimeBuckets) {
        plot::distribution_chart(ui, view, WIDE_CHART_HEIGHT);
        ui.add_space(8.0);
    }
    side_by_side(ui, &in_group(ChartGroup::DayShape), MODEL_CHART_HEIGHT);
    for view in in_group(ChartGroup::Pairs) {
        plot::distribution_chart(ui, view, WIDE_CHART_HEIGHT);
    }
}

fn group(views: &[ChartView], g: ChartGroup) -> Vec<&ChartView> {
    views.iter().filter(|v| v.spec.group == g).collect()
}

fn side_by_side(ui: &mut Ui, views: &[&ChartView], height: f32) {
    if views.is_empty() {
        return;
    }
    ui.columns(views.len(), |cols: &mut [Ui]| {
        for (col_ui, view) in cols.iter_mut().zip(views) {
            plot::distribution_chart(col_ui, view, height);
        }
    });
    ui.add_space(8.0);
}
