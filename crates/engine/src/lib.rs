use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;

pub use app::{
    run_app, run_app_with_metrics, ActorMarker, AppError, AudioCue, CameraRig, InputAction,
    InputSnapshot, LoopConfig, LoopMetricsSnapshot, MetricsHandle, Renderer, RoomRect, Scene,
    SceneCommand, SceneVisualState, Vec2, Viewport, WinMarker,
};

pub const CONFIG_ENV_VAR: &str = "DETENTION_CONFIG";
pub const CONFIG_FILE_NAME: &str = "detention.config.json";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error("{var} is set but does not point to a readable file: {path}")]
    InvalidEnvConfig { var: &'static str, path: PathBuf },
}

/// Resolves the tuning-config file for this session.
///
/// Precedence: the `DETENTION_CONFIG` env var, then a `detention.config.json`
/// found by walking upward from the executable directory. `Ok(None)` means no
/// config file exists anywhere, which callers treat as "use built-in defaults".
pub fn resolve_config_path() -> Result<Option<PathBuf>, StartupError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(value) => {
            let path = normalize_path(&PathBuf::from(value));
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(StartupError::InvalidEnvConfig {
                    var: CONFIG_ENV_VAR,
                    path,
                })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            for candidate in exe_dir.ancestors() {
                let config = candidate.join(CONFIG_FILE_NAME);
                if config.is_file() {
                    return Ok(Some(normalize_path(&config)));
                }
            }
            Ok(None)
        }
        Err(source) => Err(StartupError::EnvVar {
            var: CONFIG_ENV_VAR,
            source,
        }),
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
