mod cli;

use clap::Parser;
use eframe::egui;
use edu_dashboard::{AppState, DashboardApp};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = cli.resolve_config()?;
    log::info!(
        "Indicators: {}, PISA: {}",
        config.indicator_path.display(),
        config.pisa_path.display()
    );

    // Load once, before the first frame.
    let state = AppState::from_config(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Indonesia Education Progress",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
