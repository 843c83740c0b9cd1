pub(crate) mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{world_to_screen_px, Renderer, Viewport};
pub use scene::{
    ActorMarker, AudioCue, CameraRig, InputSnapshot, RoomRect, Scene, SceneCommand,
    SceneVisualState, Vec2, WinMarker,
};
