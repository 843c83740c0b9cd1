use engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config;
use super::gameplay;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

/// Initializes logging, loads the tuning config, and wires the scene.
/// Everything fallible about startup happens here, before any window exists.
pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Detention Startup ===");

    let game_config = config::load_game_config()?;
    let scene = gameplay::build_chase_scene(game_config);

    Ok(AppWiring {
        config: LoopConfig::default(),
        scene: Box::new(scene),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
