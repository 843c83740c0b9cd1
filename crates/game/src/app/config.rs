use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use engine::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::gameplay::PursuerRole;

pub(crate) type ConfigResult<T> = Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct ConfigVec2 {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl ConfigVec2 {
    pub(crate) fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum LookMode {
    /// Arrow keys steer yaw/pitch at a fixed rate.
    Keys,
    /// Raw pointer motion scaled by sensitivity.
    Mouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PlayerTuning {
    pub(crate) move_speed: f32,
    pub(crate) look_mode: LookMode,
    pub(crate) key_yaw_rate_radians: f32,
    pub(crate) key_pitch_rate_radians: f32,
    pub(crate) mouse_sensitivity_radians_per_px: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        // 0.1 units and 0.03/0.02 radians per tick at 60 ticks per second.
        Self {
            move_speed: 6.0,
            look_mode: LookMode::Keys,
            key_yaw_rate_radians: 1.8,
            key_pitch_rate_radians: 1.2,
            mouse_sensitivity_radians_per_px: 0.002,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EncounterTuning {
    pub(crate) capture_radius: f32,
    pub(crate) seek_epsilon: f32,
    pub(crate) win_radius: f32,
    pub(crate) stab_beats: u32,
    pub(crate) beat_interval_seconds: f32,
    pub(crate) flash_pulse_seconds: f32,
    pub(crate) stab_blend_factor: f32,
    pub(crate) post_stab_delay_seconds: f32,
    pub(crate) fade_in_seconds: f32,
    pub(crate) fade_hold_seconds: f32,
    pub(crate) drag_duration_seconds: f32,
    pub(crate) drag_blend_factor: f32,
    pub(crate) ended_hold_seconds: f32,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            capture_radius: 1.3,
            seek_epsilon: 0.2,
            win_radius: 1.5,
            stab_beats: 5,
            beat_interval_seconds: 0.6,
            flash_pulse_seconds: 0.1,
            stab_blend_factor: 0.15,
            post_stab_delay_seconds: 0.8,
            fade_in_seconds: 1.0,
            fade_hold_seconds: 1.5,
            drag_duration_seconds: 2.0,
            drag_blend_factor: 0.1,
            ended_hold_seconds: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct PursuerSpawn {
    pub(crate) spawn: ConfigVec2,
    pub(crate) role: PursuerRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LevelConfig {
    pub(crate) room_min: ConfigVec2,
    pub(crate) room_max: ConfigVec2,
    pub(crate) player_spawn: ConfigVec2,
    pub(crate) player_spawn_yaw_radians: f32,
    pub(crate) pursuers: Vec<PursuerSpawn>,
    /// Pursuer speed is the difficulty dial: it is deliberately independent
    /// of the player's speed and may exceed it on later levels.
    pub(crate) pursuer_speed: f32,
    pub(crate) win_zone: ConfigVec2,
    #[serde(default)]
    pub(crate) drag_point: Option<ConfigVec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    pub(crate) player: PlayerTuning,
    pub(crate) encounter: EncounterTuning,
    pub(crate) levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            encounter: EncounterTuning::default(),
            levels: default_levels(),
        }
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            room_min: ConfigVec2 { x: -20.0, y: -50.0 },
            room_max: ConfigVec2 { x: 20.0, y: 50.0 },
            player_spawn: ConfigVec2 { x: 0.0, y: 5.0 },
            // Spawn facing the exit door on the -y wall.
            player_spawn_yaw_radians: PI,
            pursuers: vec![PursuerSpawn {
                spawn: ConfigVec2 { x: 0.0, y: -5.0 },
                role: PursuerRole::Teacher,
            }],
            pursuer_speed: 4.8,
            win_zone: ConfigVec2 { x: 0.0, y: -9.95 },
            drag_point: None,
        },
        LevelConfig {
            room_min: ConfigVec2 { x: -20.0, y: -50.0 },
            room_max: ConfigVec2 { x: 20.0, y: 50.0 },
            player_spawn: ConfigVec2 { x: 0.0, y: 20.0 },
            player_spawn_yaw_radians: 0.0,
            pursuers: vec![
                PursuerSpawn {
                    spawn: ConfigVec2 { x: 0.0, y: 5.0 },
                    role: PursuerRole::Teacher,
                },
                PursuerSpawn {
                    spawn: ConfigVec2 { x: -6.0, y: 26.0 },
                    role: PursuerRole::Surgeon,
                },
            ],
            pursuer_speed: 5.4,
            win_zone: ConfigVec2 { x: 0.0, y: 30.0 },
            drag_point: Some(ConfigVec2 { x: 3.0, y: 24.0 }),
        },
    ]
}

/// Loads the game config from the resolved file, or falls back to the
/// built-in defaults when no file exists. A file that exists but fails to
/// parse or validate is an error, not a silent fallback.
pub(crate) fn load_game_config() -> ConfigResult<GameConfig> {
    let path = engine::resolve_config_path().map_err(|error| format!("resolve config: {error}"))?;
    let config = match path {
        Some(path) => {
            let config = load_from_file(&path)?;
            info!(path = %path.display(), "config_loaded");
            config
        }
        None => {
            warn!("config_defaults_used");
            GameConfig::default()
        }
    };
    validate(&config)?;
    Ok(config)
}

fn load_from_file(path: &Path) -> ConfigResult<GameConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read config '{}': {error}", path.display()))?;
    parse_config_json(&raw)
}

fn parse_config_json(raw: &str) -> ConfigResult<GameConfig> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse config json: {source}"))
            } else {
                Err(format!("parse config json at '{path}': {source}"))
            }
        }
    }
}

pub(crate) fn validate(config: &GameConfig) -> ConfigResult<()> {
    if config.player.move_speed <= 0.0 {
        return Err("player.move_speed must be positive".to_string());
    }
    let encounter = &config.encounter;
    if encounter.capture_radius <= 0.0 {
        return Err("encounter.capture_radius must be positive".to_string());
    }
    if encounter.win_radius <= 0.0 {
        return Err("encounter.win_radius must be positive".to_string());
    }
    if encounter.seek_epsilon < 0.0 {
        return Err("encounter.seek_epsilon must not be negative".to_string());
    }
    if encounter.stab_beats == 0 {
        return Err("encounter.stab_beats must be at least 1".to_string());
    }
    if encounter.beat_interval_seconds <= 0.0 {
        return Err("encounter.beat_interval_seconds must be positive".to_string());
    }
    if !(0.0..=1.0).contains(&encounter.stab_blend_factor) || encounter.stab_blend_factor == 0.0 {
        return Err("encounter.stab_blend_factor must be in (0, 1]".to_string());
    }
    if !(0.0..=1.0).contains(&encounter.drag_blend_factor) {
        return Err("encounter.drag_blend_factor must be in [0, 1]".to_string());
    }
    if config.levels.is_empty() {
        return Err("levels must not be empty".to_string());
    }
    for (index, level) in config.levels.iter().enumerate() {
        validate_level(index, level)?;
    }
    Ok(())
}

fn validate_level(index: usize, level: &LevelConfig) -> ConfigResult<()> {
    let min = level.room_min;
    let max = level.room_max;
    if min.x >= max.x || min.y >= max.y {
        return Err(format!("levels[{index}]: room_min must be below room_max on both axes"));
    }
    if level.pursuer_speed <= 0.0 {
        return Err(format!("levels[{index}]: pursuer_speed must be positive"));
    }
    if level.pursuers.is_empty() {
        return Err(format!("levels[{index}]: at least one pursuer is required"));
    }
    let inside = |point: ConfigVec2| {
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    };
    if !inside(level.player_spawn) {
        return Err(format!("levels[{index}]: player_spawn must be strictly inside the room"));
    }
    for (pursuer_index, pursuer) in level.pursuers.iter().enumerate() {
        if !inside(pursuer.spawn) {
            return Err(format!(
                "levels[{index}].pursuers[{pursuer_index}]: spawn must be strictly inside the room"
            ));
        }
    }
    if !inside(level.win_zone) {
        return Err(format!("levels[{index}]: win_zone must be strictly inside the room"));
    }
    if let Some(drag_point) = level.drag_point {
        if !inside(drag_point) {
            return Err(format!("levels[{index}]: drag_point must be strictly inside the room"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = GameConfig::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.levels.len(), 2);
    }

    #[test]
    fn default_pursuers_start_slower_than_player_on_level_one() {
        let config = GameConfig::default();
        assert!(config.levels[0].pursuer_speed < config.player.move_speed);
    }

    #[test]
    fn parse_error_reports_field_path() {
        let raw = r#"{ "player": { "move_speed": "fast" } }"#;
        let error = parse_config_json(raw).expect_err("type error should fail");
        assert!(error.contains("player.move_speed"), "got: {error}");
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let raw = r#"{ "player": { "move_speed": 9.5 } }"#;
        let config = parse_config_json(raw).expect("partial config");
        assert_eq!(config.player.move_speed, 9.5);
        assert_eq!(config.encounter.stab_beats, 5);
        assert!(!config.levels.is_empty());
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let config = GameConfig::default();
        let json = serde_json::to_string_pretty(&config).expect("encode");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write");

        let loaded = load_from_file(file.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = load_from_file(Path::new("no/such/detention.config.json"))
            .expect_err("missing file should fail");
        assert!(error.contains("read config"));
    }

    #[test]
    fn validation_rejects_empty_levels() {
        let config = GameConfig {
            levels: Vec::new(),
            ..GameConfig::default()
        };
        assert!(validate(&config).expect_err("empty levels").contains("levels"));
    }

    #[test]
    fn validation_rejects_spawn_outside_room() {
        let mut config = GameConfig::default();
        config.levels[0].player_spawn = ConfigVec2 { x: 100.0, y: 0.0 };
        let error = validate(&config).expect_err("outside spawn");
        assert!(error.contains("player_spawn"), "got: {error}");
    }

    #[test]
    fn validation_rejects_pursuerless_level() {
        let mut config = GameConfig::default();
        config.levels[0].pursuers.clear();
        let error = validate(&config).expect_err("no pursuers");
        assert!(error.contains("pursuer"), "got: {error}");
    }

    #[test]
    fn validation_rejects_zero_blend() {
        let mut config = GameConfig::default();
        config.encounter.stab_blend_factor = 0.0;
        assert!(validate(&config).is_err());
    }
}
