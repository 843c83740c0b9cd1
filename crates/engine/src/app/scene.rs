use super::input::{ActionStates, InputAction};

/// Planar gameplay vector. Gameplay happens on the x/z floor plane; the
/// renderer and camera rig add height separately.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Self) -> f32 {
        Self {
            x: other.x - self.x,
            y: other.y - self.y,
        }
        .length()
    }

    /// Unit vector in the same direction, or zero when the length is at or
    /// below `epsilon`. The epsilon guard is what keeps seek steps from
    /// dividing by zero and jittering at point-blank range.
    pub fn normalized_or_zero(self, epsilon: f32) -> Self {
        let length = self.length();
        if length <= epsilon {
            return Self::ZERO;
        }
        Self {
            x: self.x / length,
            y: self.y / length,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn plus(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn minus(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Moves this point a fraction `t` of the way toward `target`.
    /// `t` in [0, 1]; converging, never overshooting.
    pub fn lerp_toward(self, target: Self, t: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }
}

/// First-person camera transform published to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    pub position: Vec2,
    pub eye_height: f32,
    pub yaw_radians: f32,
    pub pitch_radians: f32,
}

impl CameraRig {
    /// Planar forward direction derived from yaw. Matches the convention
    /// where yaw 0 faces +y on the floor plane.
    pub fn planar_forward(&self) -> Vec2 {
        Vec2 {
            x: self.yaw_radians.sin(),
            y: self.yaw_radians.cos(),
        }
    }
}

/// Axis-aligned room footprint on the floor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl RoomRect {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains_strictly(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

impl Default for RoomRect {
    fn default() -> Self {
        Self {
            min: Vec2 { x: -10.0, y: -10.0 },
            max: Vec2 { x: 10.0, y: 10.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinMarker {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorMarker {
    pub position: Vec2,
    pub tint: [u8; 4],
}

/// Fire-and-forget audio triggers. The frontend may play them or just log
/// them; the core never reads anything back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Footstep,
    Stab,
    Win,
}

/// Everything the presentation layer needs for one frame. The scene rebuilds
/// this every update; the renderer only reads it.
#[derive(Debug, Clone, Default)]
pub struct SceneVisualState {
    pub camera: CameraRig,
    pub room: RoomRect,
    pub win_marker: Option<WinMarker>,
    pub actors: Vec<ActorMarker>,
    /// Red full-screen overlay strength in [0, 1].
    pub flash_alpha: f32,
    /// Black full-screen overlay strength in [0, 1].
    pub fade_alpha: f32,
    /// Terminal or start-screen message, shown via the window title.
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    /// The session is over; tear everything down and start from scratch.
    /// This is the whole-application restart from the design: the loop
    /// runner responds by calling `load()` on a fresh session.
    RestartSession,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    look_delta_px: Vec2,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        look_delta_px: Vec2,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            look_delta_px,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn any_movement_down(&self) -> bool {
        self.actions.any_movement_down()
    }

    /// Raw pointer motion accumulated since the previous tick snapshot.
    pub fn look_delta_px(&self) -> Vec2 {
        self.look_delta_px
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_look_delta_px(mut self, look_delta_px: Vec2) -> Self {
        self.look_delta_px = look_delta_px;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }
}

pub trait Scene {
    /// Resets the scene to a fresh session. Called once at startup and again
    /// after every `RestartSession` command.
    fn load(&mut self);

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;

    fn visual_state(&self) -> &SceneVisualState;

    /// Audio cues emitted since the last drain. Default: silent scene.
    fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_or_zero_guards_short_vectors() {
        let short = Vec2 { x: 0.05, y: 0.0 };
        assert_eq!(short.normalized_or_zero(0.2), Vec2::ZERO);

        let long = Vec2 { x: 3.0, y: 4.0 };
        let unit = long.normalized_or_zero(0.2);
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_toward_converges_without_overshoot() {
        let start = Vec2 { x: 0.0, y: 0.0 };
        let target = Vec2 { x: 10.0, y: 0.0 };
        let stepped = start.lerp_toward(target, 0.15);
        assert!((stepped.x - 1.5).abs() < 1e-6);
        assert!(stepped.x < target.x);
    }

    #[test]
    fn room_containment_is_strict() {
        let room = RoomRect::default();
        assert!(room.contains_strictly(Vec2 { x: 0.0, y: 0.0 }));
        assert!(!room.contains_strictly(Vec2 { x: 10.0, y: 0.0 }));
        assert!(!room.contains_strictly(Vec2 { x: 0.0, y: -10.0 }));
    }

    #[test]
    fn snapshot_movement_query_covers_all_four_keys() {
        for action in [
            InputAction::MoveForward,
            InputAction::MoveBack,
            InputAction::StrafeLeft,
            InputAction::StrafeRight,
        ] {
            let snapshot = InputSnapshot::empty().with_action_down(action, true);
            assert!(snapshot.any_movement_down());
        }
        let look_only = InputSnapshot::empty().with_action_down(InputAction::LookLeft, true);
        assert!(!look_only.any_movement_down());
    }
}
