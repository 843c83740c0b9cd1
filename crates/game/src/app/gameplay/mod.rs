use engine::{
    ActorMarker, AudioCue, CameraRig, InputAction, InputSnapshot, RoomRect, Scene, SceneCommand,
    SceneVisualState, Vec2, WinMarker,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::{ConfigVec2, EncounterTuning, GameConfig, LevelConfig, LookMode, PlayerTuning};

const PLAYER_EYE_HEIGHT: f32 = 1.6;
/// Clamp margin keeping the player strictly off the walls.
const WALL_MARGIN: f32 = 0.05;
const PITCH_LIMIT_RADIANS: f32 = std::f32::consts::FRAC_PI_2;
const FLASH_PEAK_ALPHA: f32 = 0.3;
const MOVE_NORMALIZE_EPSILON: f32 = 1e-6;
const FOOTSTEP_INTERVAL_SECONDS: f32 = 0.45;
const START_BANNER: &str = "Detention: move to start";

include!("types.rs");
include!("player.rs");
include!("pursuit.rs");
include!("encounter.rs");
include!("scene_impl.rs");
include!("util.rs");

pub(crate) fn build_chase_scene(config: GameConfig) -> ChaseScene {
    ChaseScene::new(config)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
