mod app;
mod hud;

use app::App;
use grapex_experiment::ExperimentConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // Optional JSON config path; everything defaults to the original
    // study design.
    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        None => ExperimentConfig::default(),
    };

    let app = App::new(config)?;
    app.run()
}
