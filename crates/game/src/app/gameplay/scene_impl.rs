/// All mutable session data in one place, passed around explicitly: the
/// machine owns the phase, the player controller owns the player position,
/// and nothing else writes either.
#[derive(Debug, Clone)]
struct SessionState {
    machine: EncounterMachine,
    player: PlayerState,
    pursuers: Vec<Pursuer>,
    level_index: usize,
    room: RoomRect,
    win_zone: WinMarker,
    drag_point: Option<Vec2>,
    pursuer_speed: f32,
}

impl SessionState {
    fn new(config: &GameConfig) -> Self {
        let level = &config.levels[0];
        Self {
            machine: EncounterMachine::new(config.encounter),
            player: PlayerState::at_spawn(level.player_spawn.to_vec2(), level.player_spawn_yaw_radians),
            pursuers: spawn_pursuers(level),
            level_index: 0,
            room: room_rect(level),
            win_zone: WinMarker {
                position: level.win_zone.to_vec2(),
                radius: config.encounter.win_radius,
            },
            drag_point: level.drag_point.map(ConfigVec2::to_vec2),
            pursuer_speed: level.pursuer_speed,
        }
    }

    /// Re-initializes positions and bounds from the next level while the
    /// machine stays in `Playing`.
    fn advance_level(&mut self, config: &GameConfig) {
        let next_index = self.level_index + 1;
        let level = &config.levels[next_index];
        self.level_index = next_index;
        self.player = PlayerState::at_spawn(level.player_spawn.to_vec2(), level.player_spawn_yaw_radians);
        self.pursuers = spawn_pursuers(level);
        self.room = room_rect(level);
        self.win_zone = WinMarker {
            position: level.win_zone.to_vec2(),
            radius: config.encounter.win_radius,
        };
        self.drag_point = level.drag_point.map(ConfigVec2::to_vec2);
        self.pursuer_speed = level.pursuer_speed;
        info!(level = next_index, "level_advanced");
    }

    fn is_last_level(&self, config: &GameConfig) -> bool {
        self.level_index + 1 >= config.levels.len()
    }
}

fn room_rect(level: &LevelConfig) -> RoomRect {
    RoomRect {
        min: level.room_min.to_vec2(),
        max: level.room_max.to_vec2(),
    }
}

pub(crate) struct ChaseScene {
    config: GameConfig,
    session: SessionState,
    visual: SceneVisualState,
    audio_cues: Vec<AudioCue>,
    footstep_timer_seconds: f32,
}

impl ChaseScene {
    pub(crate) fn new(config: GameConfig) -> Self {
        let session = SessionState::new(&config);
        let mut scene = Self {
            config,
            session,
            visual: SceneVisualState::default(),
            audio_cues: Vec::new(),
            footstep_timer_seconds: 0.0,
        };
        scene.rebuild_visual_state();
        scene
    }

    fn tick_footsteps(&mut self, input: &InputSnapshot, dt_seconds: f32) {
        if input.any_movement_down() {
            self.footstep_timer_seconds += dt_seconds;
            if self.footstep_timer_seconds >= FOOTSTEP_INTERVAL_SECONDS {
                self.footstep_timer_seconds = 0.0;
                self.audio_cues.push(AudioCue::Footstep);
            }
        } else {
            self.footstep_timer_seconds = 0.0;
        }
    }

    fn rebuild_visual_state(&mut self) {
        let session = &self.session;
        let machine = &session.machine;
        self.visual.camera = session.player.camera_rig();
        self.visual.room = session.room;
        self.visual.win_marker = Some(session.win_zone);
        self.visual.actors.clear();
        for pursuer in &session.pursuers {
            self.visual.actors.push(ActorMarker {
                position: pursuer.position,
                tint: pursuer.role.tint(),
            });
        }
        self.visual.flash_alpha = machine.flash_alpha();
        self.visual.fade_alpha = machine.fade_alpha();
        self.visual.banner = match machine.phase() {
            SessionPhase::NotStarted => Some(START_BANNER.to_string()),
            SessionPhase::Ended => machine.outcome().map(Outcome::banner_text),
            _ => None,
        };
    }
}

impl Scene for ChaseScene {
    fn load(&mut self) {
        self.session = SessionState::new(&self.config);
        self.audio_cues.clear();
        self.footstep_timer_seconds = 0.0;
        self.rebuild_visual_state();
        info!(
            levels = self.config.levels.len(),
            pursuers = self.session.pursuers.len(),
            "chase_scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        let mut command = SceneCommand::None;
        match self.session.machine.phase() {
            SessionPhase::NotStarted => {
                if input.any_movement_down() {
                    self.session.machine.start_playing();
                }
            }
            SessionPhase::Playing => {
                let session = &mut self.session;
                session
                    .player
                    .tick(&self.config.player, input, &session.room, fixed_dt_seconds);
                let target = session.player.position;
                for pursuer in &mut session.pursuers {
                    pursuer.seek_step(
                        target,
                        session.pursuer_speed,
                        self.config.encounter.seek_epsilon,
                        fixed_dt_seconds,
                    );
                }
                let captured = session.machine.check_capture(
                    &session.player,
                    &session.pursuers,
                    session.drag_point.is_some(),
                );
                if !captured {
                    let is_last = session.is_last_level(&self.config);
                    let win = session
                        .machine
                        .check_win(&session.player, &session.win_zone, is_last);
                    if win == WinCheck::AdvanceLevel {
                        session.advance_level(&self.config);
                    }
                }
                self.tick_footsteps(input, fixed_dt_seconds);
            }
            SessionPhase::Dragging => {
                let session = &mut self.session;
                if let Some(drag_point) = session.drag_point {
                    session.machine.tick_dragging(
                        fixed_dt_seconds,
                        &mut session.player,
                        &mut session.pursuers,
                        drag_point,
                    );
                }
            }
            SessionPhase::Cutscene => {
                let session = &mut self.session;
                session.machine.tick_cutscene(
                    fixed_dt_seconds,
                    &mut session.player,
                    &mut session.pursuers,
                );
            }
            SessionPhase::Ended => {
                if self.session.machine.tick_ended(fixed_dt_seconds) {
                    command = SceneCommand::RestartSession;
                }
            }
        }

        let cues = self.session.machine.take_cues();
        self.audio_cues.extend(cues);
        self.rebuild_visual_state();
        command
    }

    fn visual_state(&self) -> &SceneVisualState {
        &self.visual
    }

    fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio_cues)
    }
}
