use super::*;
use crate::app::config::PursuerSpawn;

const DT: f32 = 1.0 / 60.0;

fn cv(x: f32, y: f32) -> ConfigVec2 {
    ConfigVec2 { x, y }
}

fn big_room() -> RoomRect {
    RoomRect {
        min: Vec2::new(-20.0, -50.0),
        max: Vec2::new(20.0, 50.0),
    }
}

fn teacher_at(x: f32, y: f32) -> Pursuer {
    Pursuer {
        id: PursuerId(0),
        position: Vec2::new(x, y),
        role: PursuerRole::Teacher,
    }
}

fn playing_machine() -> EncounterMachine {
    let mut machine = EncounterMachine::new(EncounterTuning::default());
    machine.start_playing();
    machine
}

fn test_level(
    player_spawn: ConfigVec2,
    pursuer_spawn: ConfigVec2,
    win_zone: ConfigVec2,
    drag_point: Option<ConfigVec2>,
) -> LevelConfig {
    LevelConfig {
        room_min: cv(-20.0, -50.0),
        room_max: cv(20.0, 50.0),
        player_spawn,
        player_spawn_yaw_radians: 0.0,
        pursuers: vec![PursuerSpawn {
            spawn: pursuer_spawn,
            role: PursuerRole::Teacher,
        }],
        pursuer_speed: 4.8,
        win_zone,
        drag_point,
    }
}

fn scene_with_levels(levels: Vec<LevelConfig>) -> ChaseScene {
    build_chase_scene(GameConfig {
        levels,
        ..GameConfig::default()
    })
}

fn forward_input() -> InputSnapshot {
    InputSnapshot::empty().with_action_down(InputAction::MoveForward, true)
}

#[test]
fn scene_waits_for_movement_to_start() {
    let mut scene = scene_with_levels(vec![test_level(
        cv(0.0, 5.0),
        cv(0.0, -5.0),
        cv(0.0, -9.0),
        None,
    )]);
    scene.load();
    assert_eq!(scene.session.machine.phase(), SessionPhase::NotStarted);

    scene.update(DT, &InputSnapshot::empty());
    assert_eq!(scene.session.machine.phase(), SessionPhase::NotStarted);
    assert_eq!(scene.visual_state().banner.as_deref(), Some(START_BANNER));

    scene.update(DT, &forward_input());
    assert_eq!(scene.session.machine.phase(), SessionPhase::Playing);
    assert_eq!(scene.visual_state().banner, None);
}

#[test]
fn diagonal_speed_matches_axis_speed() {
    let tuning = PlayerTuning::default();
    let room = big_room();

    let mut axis = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    axis.tick(&tuning, &forward_input(), &room, DT);
    let axis_distance = axis.position.length();
    assert!(axis_distance > 0.0);

    let mut diagonal = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let input = forward_input().with_action_down(InputAction::StrafeRight, true);
    diagonal.tick(&tuning, &input, &room, DT);
    assert!((diagonal.position.length() - axis_distance).abs() < 1e-5);
}

#[test]
fn player_is_clamped_inside_the_room() {
    let tuning = PlayerTuning::default();
    let room = RoomRect {
        min: Vec2::new(-2.0, -2.0),
        max: Vec2::new(2.0, 2.0),
    };
    let mut player = PlayerState::at_spawn(Vec2::new(0.0, 1.5), 0.0);
    for _ in 0..100 {
        player.tick(&tuning, &forward_input(), &room, DT);
        assert!(room.contains_strictly(player.position));
    }
    assert!((player.position.y - (room.max.y - WALL_MARGIN)).abs() < 1e-5);
}

#[test]
fn pitch_stays_clamped() {
    let tuning = PlayerTuning::default();
    let room = big_room();
    let input = InputSnapshot::empty().with_action_down(InputAction::LookUp, true);
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    for _ in 0..200 {
        player.tick(&tuning, &input, &room, DT);
    }
    assert!((player.pitch_radians - PITCH_LIMIT_RADIANS).abs() < 1e-5);
}

#[test]
fn mouse_look_applies_sensitivity() {
    let tuning = PlayerTuning {
        look_mode: LookMode::Mouse,
        ..PlayerTuning::default()
    };
    let input = InputSnapshot::empty().with_look_delta_px(Vec2::new(10.0, 4.0));
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    player.tick(&tuning, &input, &big_room(), DT);
    assert!((player.yaw_radians + 10.0 * tuning.mouse_sensitivity_radians_per_px).abs() < 1e-6);
    assert!((player.pitch_radians + 4.0 * tuning.mouse_sensitivity_radians_per_px).abs() < 1e-6);
}

#[test]
fn pursuer_seeks_toward_player() {
    let mut pursuer = teacher_at(0.0, -5.0);
    let target = Vec2::ZERO;
    let before = pursuer.position.distance_to(target);
    pursuer.seek_step(target, 4.8, 0.2, DT);
    let after = pursuer.position.distance_to(target);
    assert!(after < before);
    assert!((before - after - 4.8 * DT).abs() < 1e-5);
}

#[test]
fn pursuer_holds_still_within_epsilon() {
    let mut pursuer = teacher_at(0.1, 0.0);
    pursuer.seek_step(Vec2::ZERO, 4.8, 0.2, DT);
    assert_eq!(pursuer.position, Vec2::new(0.1, 0.0));
}

#[test]
fn capture_fires_at_most_once() {
    let mut machine = playing_machine();
    let player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let pursuers = [teacher_at(0.5, 0.0)];

    assert!(machine.check_capture(&player, &pursuers, false));
    assert_ne!(machine.phase(), SessionPhase::Playing);
    assert!(!machine.check_capture(&player, &pursuers, false));
}

#[test]
fn capture_without_drag_point_goes_straight_to_cutscene() {
    let mut machine = playing_machine();
    let player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    assert!(machine.check_capture(&player, &[teacher_at(0.5, 0.0)], false));
    assert_eq!(machine.phase(), SessionPhase::Cutscene);
}

#[test]
fn capture_with_drag_point_drags_first() {
    let mut machine = playing_machine();
    let player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    assert!(machine.check_capture(&player, &[teacher_at(0.5, 0.0)], true));
    assert_eq!(machine.phase(), SessionPhase::Dragging);
}

#[test]
fn capture_needs_proximity() {
    let mut machine = playing_machine();
    let player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    assert!(!machine.check_capture(&player, &[teacher_at(5.0, 0.0)], false));
    assert_eq!(machine.phase(), SessionPhase::Playing);
}

#[test]
fn dragging_converges_then_cuts_to_stabbing() {
    let mut machine = playing_machine();
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let mut pursuers = [teacher_at(0.5, 0.0)];
    let drag_point = Vec2::new(3.0, 4.0);
    assert!(machine.check_capture(&player, &pursuers, true));

    let drag_ticks = (machine.tuning.drag_duration_seconds / DT).ceil() as u32 + 1;
    for _ in 0..drag_ticks {
        machine.tick_dragging(DT, &mut player, &mut pursuers, drag_point);
    }
    assert_eq!(machine.phase(), SessionPhase::Cutscene);
    assert!(player.position.distance_to(drag_point) < 0.01);
    assert!(pursuers[0].position.distance_to(drag_point) < 0.01);
}

#[test]
fn stab_beats_fire_exactly_configured_count() {
    let mut machine = playing_machine();
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let mut pursuers = [teacher_at(1.0, 0.0)];
    assert!(machine.check_capture(&player, &pursuers, false));

    let mut stab_cues = 0;
    for _ in 0..1000 {
        machine.tick_cutscene(DT, &mut player, &mut pursuers);
        stab_cues += machine
            .take_cues()
            .iter()
            .filter(|cue| **cue == AudioCue::Stab)
            .count();
        if machine.phase() == SessionPhase::Ended {
            break;
        }
    }
    assert_eq!(stab_cues as u32, machine.tuning.stab_beats);
    assert_eq!(machine.phase(), SessionPhase::Ended);

    // A finished cutscene never fires another beat.
    machine.tick_cutscene(DT, &mut player, &mut pursuers);
    assert!(machine.take_cues().is_empty());
}

#[test]
fn stab_beat_faces_player_toward_captor() {
    let mut machine = playing_machine();
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let mut pursuers = [teacher_at(1.0, 0.0)];
    assert!(machine.check_capture(&player, &pursuers, false));

    loop {
        machine.tick_cutscene(DT, &mut player, &mut pursuers);
        if machine.take_cues().contains(&AudioCue::Stab) {
            break;
        }
    }
    // The captor sits on the +x axis, so the facing yaw is a quarter turn.
    assert!((player.yaw_radians - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn cutscene_ends_with_caught_outcome_and_full_fade() {
    let mut machine = playing_machine();
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let mut pursuers = [teacher_at(0.5, 0.0)];
    assert!(machine.check_capture(&player, &pursuers, false));

    for _ in 0..1000 {
        machine.tick_cutscene(DT, &mut player, &mut pursuers);
        if machine.phase() == SessionPhase::Ended {
            break;
        }
    }
    assert_eq!(machine.phase(), SessionPhase::Ended);
    assert_eq!(machine.outcome(), Some(Outcome::Caught(PursuerRole::Teacher)));
    assert!((machine.fade_alpha() - 1.0).abs() < 1e-6);
}

#[test]
fn flash_pulses_only_around_beats() {
    let mut machine = playing_machine();
    let mut player = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    let mut pursuers = [teacher_at(1.0, 0.0)];
    assert_eq!(machine.flash_alpha(), 0.0);
    assert!(machine.check_capture(&player, &pursuers, false));

    loop {
        machine.tick_cutscene(DT, &mut player, &mut pursuers);
        if machine.take_cues().contains(&AudioCue::Stab) {
            break;
        }
    }
    assert_eq!(machine.flash_alpha(), FLASH_PEAK_ALPHA);

    // The pulse is much shorter than the beat interval, so it decays to
    // nothing between beats.
    let pulse_ticks = (machine.tuning.flash_pulse_seconds / DT).ceil() as u32 + 1;
    for _ in 0..pulse_ticks {
        machine.tick_cutscene(DT, &mut player, &mut pursuers);
    }
    assert_eq!(machine.flash_alpha(), 0.0);
}

#[test]
fn win_check_is_strict_and_playing_only() {
    let win_zone = WinMarker {
        position: Vec2::ZERO,
        radius: 1.5,
    };

    let mut idle = EncounterMachine::new(EncounterTuning::default());
    let inside = PlayerState::at_spawn(Vec2::ZERO, 0.0);
    assert_eq!(idle.check_win(&inside, &win_zone, true), WinCheck::None);

    let mut machine = playing_machine();
    let on_boundary = PlayerState::at_spawn(Vec2::new(1.5, 0.0), 0.0);
    assert_eq!(machine.check_win(&on_boundary, &win_zone, true), WinCheck::None);
    assert_eq!(machine.phase(), SessionPhase::Playing);
}

#[test]
fn reaching_final_win_zone_escapes() {
    let win_zone = WinMarker {
        position: Vec2::ZERO,
        radius: 1.5,
    };
    let mut machine = playing_machine();
    let player = PlayerState::at_spawn(Vec2::new(0.5, 0.0), 0.0);
    assert_eq!(machine.check_win(&player, &win_zone, true), WinCheck::Escaped);
    assert_eq!(machine.phase(), SessionPhase::Ended);
    assert_eq!(machine.outcome(), Some(Outcome::Escaped));
    assert!(machine.take_cues().contains(&AudioCue::Win));
}

#[test]
fn intermediate_win_zone_advances_level() {
    let mut scene = scene_with_levels(vec![
        test_level(cv(0.0, 0.0), cv(10.0, 40.0), cv(0.0, 1.0), None),
        test_level(cv(5.0, 5.0), cv(-10.0, -40.0), cv(0.0, 30.0), None),
    ]);
    scene.load();
    scene.update(DT, &forward_input());
    assert_eq!(scene.session.machine.phase(), SessionPhase::Playing);

    // The spawn already sits inside the first win zone, so the next tick
    // crosses into it.
    scene.update(DT, &forward_input());
    assert_eq!(scene.session.level_index, 1);
    assert_eq!(scene.session.machine.phase(), SessionPhase::Playing);
    assert_eq!(scene.session.player.position, Vec2::new(5.0, 5.0));
    assert_eq!(scene.session.pursuers[0].position, Vec2::new(-10.0, -40.0));
}

#[test]
fn ended_session_restarts_after_hold() {
    let mut scene = scene_with_levels(vec![test_level(
        cv(0.0, 0.0),
        cv(10.0, 40.0),
        cv(0.0, 1.0),
        None,
    )]);
    scene.load();
    scene.update(DT, &forward_input());
    scene.update(DT, &forward_input());
    assert_eq!(scene.session.machine.phase(), SessionPhase::Ended);
    let banner = scene.visual_state().banner.clone().unwrap_or_default();
    assert!(banner.contains("escaped"), "got: {banner}");

    let mut restarted = false;
    for _ in 0..200 {
        if scene.update(DT, &InputSnapshot::empty()) == SceneCommand::RestartSession {
            restarted = true;
            break;
        }
    }
    assert!(restarted);

    scene.load();
    assert_eq!(scene.session.machine.phase(), SessionPhase::NotStarted);
    assert_eq!(scene.session.level_index, 0);
}

#[test]
fn full_capture_session_reports_the_captor() {
    let mut scene = scene_with_levels(vec![test_level(
        cv(0.0, 0.0),
        cv(0.0, 1.0),
        cv(0.0, -9.0),
        None,
    )]);
    scene.load();
    scene.update(DT, &forward_input());

    for _ in 0..2000 {
        scene.update(DT, &InputSnapshot::empty());
        if scene.session.machine.phase() == SessionPhase::Ended {
            break;
        }
    }
    assert_eq!(scene.session.machine.phase(), SessionPhase::Ended);
    assert_eq!(
        scene.session.machine.outcome(),
        Some(Outcome::Caught(PursuerRole::Teacher))
    );
    let banner = scene.visual_state().banner.clone().unwrap_or_default();
    assert!(banner.contains("teacher"), "got: {banner}");
    assert!((scene.visual_state().fade_alpha - 1.0).abs() < 1e-6);
}

#[test]
fn footsteps_tick_while_moving() {
    let mut scene = scene_with_levels(vec![test_level(
        cv(0.0, 0.0),
        cv(10.0, 40.0),
        cv(0.0, -40.0),
        None,
    )]);
    scene.load();
    scene.update(DT, &forward_input());
    scene.take_audio_cues();

    let mut footsteps = 0;
    for _ in 0..60 {
        scene.update(DT, &forward_input());
        footsteps += scene
            .take_audio_cues()
            .iter()
            .filter(|cue| **cue == AudioCue::Footstep)
            .count();
    }
    assert!(footsteps >= 1);
}

#[test]
fn visual_state_tracks_pursuers_and_camera() {
    let mut scene = scene_with_levels(vec![test_level(
        cv(0.0, 5.0),
        cv(0.0, -5.0),
        cv(0.0, -9.0),
        None,
    )]);
    scene.load();
    let visual = scene.visual_state();
    assert_eq!(visual.actors.len(), 1);
    assert_eq!(visual.actors[0].tint, PursuerRole::Teacher.tint());
    assert_eq!(visual.camera.position, Vec2::new(0.0, 5.0));
    assert_eq!(visual.camera.eye_height, PLAYER_EYE_HEIGHT);
    assert!(visual.win_marker.is_some());
}
