#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutsceneStep {
    Stabbing,
    PostDelay,
    Fading,
    FadeHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WinCheck {
    None,
    AdvanceLevel,
    Escaped,
}

/// The capture/cutscene state machine, advanced once per tick with an
/// elapsed-time accumulator. There are no timers to cancel: when the phase
/// leaves `Cutscene` nothing can fire another beat, which is the whole
/// dangling-timer hazard designed away.
#[derive(Debug, Clone)]
pub(crate) struct EncounterMachine {
    tuning: EncounterTuning,
    phase: SessionPhase,
    caught_by: Option<(PursuerId, PursuerRole)>,
    outcome: Option<Outcome>,
    cutscene_step: CutsceneStep,
    beats_played: u32,
    beat_timer_seconds: f32,
    flash_remaining_seconds: f32,
    step_elapsed_seconds: f32,
    drag_elapsed_seconds: f32,
    fade_alpha: f32,
    ended_elapsed_seconds: f32,
    pending_cues: Vec<AudioCue>,
}

impl EncounterMachine {
    fn new(tuning: EncounterTuning) -> Self {
        Self {
            tuning,
            phase: SessionPhase::NotStarted,
            caught_by: None,
            outcome: None,
            cutscene_step: CutsceneStep::Stabbing,
            beats_played: 0,
            beat_timer_seconds: 0.0,
            flash_remaining_seconds: 0.0,
            step_elapsed_seconds: 0.0,
            drag_elapsed_seconds: 0.0,
            fade_alpha: 0.0,
            ended_elapsed_seconds: 0.0,
            pending_cues: Vec::new(),
        }
    }

    fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn flash_alpha(&self) -> f32 {
        if self.phase == SessionPhase::Cutscene && self.flash_remaining_seconds > 0.0 {
            FLASH_PEAK_ALPHA
        } else {
            0.0
        }
    }

    fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.pending_cues)
    }

    fn start_playing(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.phase = SessionPhase::Playing;
        info!(phase = "playing", "session_started");
    }

    /// Capture check. Runs only in `Playing`, which makes entering the
    /// cutscene path its own latch: once left, `Playing` is never re-entered
    /// for the session, so capture can fire at most once.
    fn check_capture(
        &mut self,
        player: &PlayerState,
        pursuers: &[Pursuer],
        has_drag_point: bool,
    ) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        let Some(pursuer) = pursuers
            .iter()
            .find(|pursuer| pursuer.position.distance_to(player.position) < self.tuning.capture_radius)
        else {
            return false;
        };

        self.caught_by = Some((pursuer.id, pursuer.role));
        if has_drag_point {
            self.phase = SessionPhase::Dragging;
            self.drag_elapsed_seconds = 0.0;
        } else {
            self.enter_cutscene();
        }
        info!(
            pursuer = pursuer.role.as_label(),
            phase = ?self.phase,
            "player_captured"
        );
        true
    }

    /// Win check. Strictly-inside crossing only; the immediate phase change
    /// (or level advance by the caller) keeps it from double-firing.
    fn check_win(&mut self, player: &PlayerState, win_zone: &WinMarker, is_last_level: bool) -> WinCheck {
        if self.phase != SessionPhase::Playing {
            return WinCheck::None;
        }
        if player.position.distance_to(win_zone.position) >= win_zone.radius {
            return WinCheck::None;
        }
        if is_last_level {
            self.phase = SessionPhase::Ended;
            self.outcome = Some(Outcome::Escaped);
            self.pending_cues.push(AudioCue::Win);
            info!(outcome = "escaped", "session_ended");
            WinCheck::Escaped
        } else {
            WinCheck::AdvanceLevel
        }
    }

    fn enter_cutscene(&mut self) {
        self.phase = SessionPhase::Cutscene;
        self.cutscene_step = CutsceneStep::Stabbing;
        self.beats_played = 0;
        self.beat_timer_seconds = 0.0;
        self.flash_remaining_seconds = 0.0;
        self.step_elapsed_seconds = 0.0;
    }

    /// Both victim and captor converge on the drag point before the stab
    /// beats start.
    fn tick_dragging(
        &mut self,
        dt_seconds: f32,
        player: &mut PlayerState,
        pursuers: &mut [Pursuer],
        drag_point: Vec2,
    ) {
        if self.phase != SessionPhase::Dragging {
            return;
        }
        let blend = self.tuning.drag_blend_factor;
        player.position = player.position.lerp_toward(drag_point, blend);
        if let Some(pursuer) = self.caught_pursuer_mut(pursuers) {
            pursuer.position = pursuer.position.lerp_toward(drag_point, blend);
        }
        self.drag_elapsed_seconds += dt_seconds;
        if self.drag_elapsed_seconds >= self.tuning.drag_duration_seconds {
            self.enter_cutscene();
            info!(phase = "cutscene", "drag_finished");
        }
    }

    fn tick_cutscene(&mut self, dt_seconds: f32, player: &mut PlayerState, pursuers: &mut [Pursuer]) {
        if self.phase != SessionPhase::Cutscene {
            return;
        }
        self.flash_remaining_seconds = (self.flash_remaining_seconds - dt_seconds).max(0.0);

        match self.cutscene_step {
            CutsceneStep::Stabbing => {
                self.beat_timer_seconds += dt_seconds;
                while self.beat_timer_seconds >= self.tuning.beat_interval_seconds
                    && self.beats_played < self.tuning.stab_beats
                {
                    self.beat_timer_seconds -= self.tuning.beat_interval_seconds;
                    self.fire_stab_beat(player, pursuers);
                }
                if self.beats_played >= self.tuning.stab_beats {
                    self.cutscene_step = CutsceneStep::PostDelay;
                    self.step_elapsed_seconds = 0.0;
                }
            }
            CutsceneStep::PostDelay => {
                self.step_elapsed_seconds += dt_seconds;
                if self.step_elapsed_seconds >= self.tuning.post_stab_delay_seconds {
                    self.cutscene_step = CutsceneStep::Fading;
                    self.step_elapsed_seconds = 0.0;
                }
            }
            CutsceneStep::Fading => {
                self.step_elapsed_seconds += dt_seconds;
                if self.step_elapsed_seconds >= self.tuning.fade_in_seconds {
                    self.fade_alpha = 1.0;
                    self.cutscene_step = CutsceneStep::FadeHold;
                    self.step_elapsed_seconds = 0.0;
                } else {
                    self.fade_alpha = self.step_elapsed_seconds / self.tuning.fade_in_seconds;
                }
            }
            CutsceneStep::FadeHold => {
                self.step_elapsed_seconds += dt_seconds;
                if self.step_elapsed_seconds >= self.tuning.fade_hold_seconds {
                    let role = self
                        .caught_by
                        .map(|(_, role)| role)
                        .unwrap_or(PursuerRole::Teacher);
                    self.phase = SessionPhase::Ended;
                    self.outcome = Some(Outcome::Caught(role));
                    info!(outcome = "caught", pursuer = role.as_label(), "session_ended");
                }
            }
        }
    }

    /// One stab beat: face each other, converge, pulse the flash.
    fn fire_stab_beat(&mut self, player: &mut PlayerState, pursuers: &mut [Pursuer]) {
        let player_position = player.position;
        if let Some(pursuer) = self.caught_pursuer_mut(pursuers) {
            player.yaw_radians = yaw_facing(player_position, pursuer.position);
            pursuer.position = pursuer
                .position
                .lerp_toward(player_position, self.tuning.stab_blend_factor);
        }
        self.flash_remaining_seconds = self.tuning.flash_pulse_seconds;
        self.pending_cues.push(AudioCue::Stab);
        self.beats_played = self.beats_played.saturating_add(1);
    }

    /// True once the terminal hold is over and the session should restart.
    fn tick_ended(&mut self, dt_seconds: f32) -> bool {
        if self.phase != SessionPhase::Ended {
            return false;
        }
        self.ended_elapsed_seconds += dt_seconds;
        self.ended_elapsed_seconds >= self.tuning.ended_hold_seconds
    }

    fn caught_pursuer_mut<'a>(&self, pursuers: &'a mut [Pursuer]) -> Option<&'a mut Pursuer> {
        let (caught_id, _) = self.caught_by?;
        pursuers.iter_mut().find(|pursuer| pursuer.id == caught_id)
    }
}
