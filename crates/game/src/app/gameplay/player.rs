#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlayerState {
    pub(crate) position: Vec2,
    pub(crate) yaw_radians: f32,
    pub(crate) pitch_radians: f32,
}

impl PlayerState {
    fn at_spawn(spawn: Vec2, yaw_radians: f32) -> Self {
        Self {
            position: spawn,
            yaw_radians,
            pitch_radians: 0.0,
        }
    }

    fn camera_rig(&self) -> CameraRig {
        CameraRig {
            position: self.position,
            eye_height: PLAYER_EYE_HEIGHT,
            yaw_radians: self.yaw_radians,
            pitch_radians: self.pitch_radians,
        }
    }

    /// Planar facing frame derived from yaw alone; pitch never affects
    /// ground movement.
    fn facing_frame(&self) -> (Vec2, Vec2) {
        let forward = Vec2 {
            x: self.yaw_radians.sin(),
            y: self.yaw_radians.cos(),
        };
        let right = Vec2 {
            x: forward.y,
            y: -forward.x,
        };
        (forward, right)
    }

    fn tick(
        &mut self,
        tuning: &PlayerTuning,
        input: &InputSnapshot,
        room: &RoomRect,
        dt_seconds: f32,
    ) {
        self.tick_look(tuning, input, dt_seconds);
        self.tick_movement(tuning, input, room, dt_seconds);
    }

    fn tick_look(&mut self, tuning: &PlayerTuning, input: &InputSnapshot, dt_seconds: f32) {
        match tuning.look_mode {
            LookMode::Keys => {
                if input.is_down(InputAction::LookLeft) {
                    self.yaw_radians += tuning.key_yaw_rate_radians * dt_seconds;
                }
                if input.is_down(InputAction::LookRight) {
                    self.yaw_radians -= tuning.key_yaw_rate_radians * dt_seconds;
                }
                if input.is_down(InputAction::LookUp) {
                    self.pitch_radians += tuning.key_pitch_rate_radians * dt_seconds;
                }
                if input.is_down(InputAction::LookDown) {
                    self.pitch_radians -= tuning.key_pitch_rate_radians * dt_seconds;
                }
            }
            LookMode::Mouse => {
                let delta = input.look_delta_px();
                self.yaw_radians -= delta.x * tuning.mouse_sensitivity_radians_per_px;
                self.pitch_radians -= delta.y * tuning.mouse_sensitivity_radians_per_px;
            }
        }
        self.pitch_radians = self
            .pitch_radians
            .clamp(-PITCH_LIMIT_RADIANS, PITCH_LIMIT_RADIANS);
    }

    fn tick_movement(
        &mut self,
        tuning: &PlayerTuning,
        input: &InputSnapshot,
        room: &RoomRect,
        dt_seconds: f32,
    ) {
        let (forward, right) = self.facing_frame();
        let mut move_vector = Vec2::ZERO;
        if input.is_down(InputAction::MoveForward) {
            move_vector = move_vector.plus(forward);
        }
        if input.is_down(InputAction::MoveBack) {
            move_vector = move_vector.minus(forward);
        }
        if input.is_down(InputAction::StrafeLeft) {
            move_vector = move_vector.minus(right);
        }
        if input.is_down(InputAction::StrafeRight) {
            move_vector = move_vector.plus(right);
        }

        // Normalizing first keeps diagonal movement at the same speed as
        // axis movement.
        let direction = move_vector.normalized_or_zero(MOVE_NORMALIZE_EPSILON);
        let stepped = self
            .position
            .plus(direction.scaled(tuning.move_speed * dt_seconds));
        self.position = clamp_to_room(stepped, room, WALL_MARGIN);
    }
}
