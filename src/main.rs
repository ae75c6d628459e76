use grid_edit::GridEditConfig;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "GRID_EDIT_CONFIG";

fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG=grid_edit=debug shows resize and render events
    env_logger::init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => GridEditConfig::load(&path).unwrap_or_else(|err| {
            log::warn!("{err}; using default configuration");
            GridEditConfig::default()
        }),
        None => GridEditConfig::default(),
    };

    grid_edit::run_app_with(config)
}
