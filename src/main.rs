use daily_cycles::app::DailyCyclesApp;
use daily_cycles::data::loader::source_from_env;
use daily_cycles::state::AppState;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let source = match source_from_env() {
        Ok(source) => source,
        Err(e) => {
            log::error!("Cannot set up dataset source: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Daily Cycles",
        options,
        Box::new(move |_cc| Ok(Box::new(DailyCyclesApp::new(AppState::new(source))))),
    )
}
