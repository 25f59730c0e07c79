//! Gameplay session snapshot reported by the game host, plus the display
//! texts derived from it.

/// Level metadata for the song being played.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LevelInfo {
    pub level_id: String,
    pub song_name: String,
    #[serde(default)]
    pub song_sub_name: String,
    #[serde(default)]
    pub song_author_name: String,
    #[serde(default)]
    pub level_author_name: String,
    #[serde(default)]
    pub beats_per_minute: f32,
}

/// Beatmap difficulty rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    #[serde(alias = "expert+")]
    ExpertPlus,
}

impl Difficulty {
    /// Name shown to players and used as the star-table difficulty column.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::ExpertPlus => "Expert+",
        }
    }
}

/// The selected difficulty beatmap.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct BeatmapInfo {
    /// Serialized characteristic name, e.g. `Standard` or `OneSaber`.
    #[serde(default = "default_characteristic")]
    pub characteristic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub note_jump_movement_speed: f32,
}

impl Default for BeatmapInfo {
    fn default() -> Self {
        Self {
            characteristic: default_characteristic(),
            difficulty: Difficulty::default(),
            note_jump_movement_speed: 0.0,
        }
    }
}

fn default_characteristic() -> String {
    "Standard".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyType {
    #[default]
    Bar,
    Battery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnabledObstacleType {
    #[default]
    All,
    FullHeightOnly,
    NoObstacles,
}

/// Gameplay modifiers chosen for the session.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct GameplayModifiers {
    pub no_fail_on_0_energy: bool,
    pub insta_fail: bool,
    pub energy_type: EnergyType,
    pub disappearing_arrows: bool,
    pub ghost_notes: bool,
    pub no_bombs: bool,
    pub enabled_obstacle_type: EnabledObstacleType,
    pub no_arrows: bool,
    pub fail_on_saber_clash: bool,
    pub strict_angles: bool,
    pub fast_notes: bool,
    pub small_cubes: bool,
    pub pro_mode: bool,
    pub zen_mode: bool,
    pub song_speed_mul: f32,
}

impl Default for GameplayModifiers {
    fn default() -> Self {
        Self {
            no_fail_on_0_energy: false,
            insta_fail: false,
            energy_type: EnergyType::Bar,
            disappearing_arrows: false,
            ghost_notes: false,
            no_bombs: false,
            enabled_obstacle_type: EnabledObstacleType::All,
            no_arrows: false,
            fail_on_saber_clash: false,
            strict_angles: false,
            fast_notes: false,
            small_cubes: false,
            pro_mode: false,
            zen_mode: false,
            song_speed_mul: 1.0,
        }
    }
}

impl GameplayModifiers {
    pub fn is_without_modifiers(&self) -> bool {
        *self == Self::default()
    }

    /// Comma-joined list of active modifiers. No-fail is reported separately.
    pub fn summary(&self) -> String {
        if self.is_without_modifiers() {
            return String::new();
        }

        let mut names: Vec<String> = [
            (self.insta_fail, "Instant Fail"),
            (self.energy_type == EnergyType::Battery, "Battery Energy"),
            (self.disappearing_arrows, "Disappearing Arrows"),
            (self.ghost_notes, "Ghost Notes"),
            (self.no_bombs, "No Bombs"),
            (
                self.enabled_obstacle_type == EnabledObstacleType::NoObstacles,
                "No Walls",
            ),
            (
                self.enabled_obstacle_type == EnabledObstacleType::FullHeightOnly,
                "No Walls(FullHeightOnly)",
            ),
            (self.no_arrows, "No Arrows"),
            (self.fail_on_saber_clash, "Fail On Saber Clash"),
            (self.strict_angles, "Strict Angles"),
            (self.fast_notes, "Fast Notes"),
            (self.small_cubes, "Small Cubes"),
            (self.pro_mode, "Pro Mode"),
            (self.zen_mode, "Zen Mode"),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, name)| name.to_string())
        .collect();

        if self.song_speed_mul != 1.0 {
            names.push(format!("Speed {}x", self.song_speed_mul));
        }
        names.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteJumpDurationType {
    #[default]
    Dynamic,
    Static,
}

/// Player preferences that affect how notes approach.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub note_jump_duration_type: NoteJumpDurationType,
    pub note_jump_start_beat_offset: f32,
    pub note_jump_fixed_duration: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            note_jump_duration_type: NoteJumpDurationType::Dynamic,
            note_jump_start_beat_offset: 0.0,
            note_jump_fixed_duration: 1.0,
        }
    }
}

const NOTE_JUMP_OFFSET_PRESETS: [(f32, &str); 5] = [
    (-0.5, "Close"),
    (-0.25, "Closer"),
    (0.0, "Default"),
    (0.25, "Further"),
    (0.5, "Far"),
];

impl PlayerSettings {
    /// Preset name for known dynamic offsets, the raw offset otherwise, or the
    /// fixed duration when the jump duration is static.
    pub fn note_jump_offset_text(&self) -> String {
        match self.note_jump_duration_type {
            NoteJumpDurationType::Dynamic => {
                let offset = self.note_jump_start_beat_offset;
                NOTE_JUMP_OFFSET_PRESETS
                    .iter()
                    .find(|(preset, _)| *preset == offset)
                    .map(|(_, name)| name.to_string())
                    .unwrap_or_else(|| offset.to_string())
            }
            NoteJumpDurationType::Static => {
                format!("{}s (Static)", self.note_jump_fixed_duration)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PracticeSettings {
    #[serde(default = "default_speed_mul")]
    pub song_speed_mul: f32,
}

fn default_speed_mul() -> f32 {
    1.0
}

/// Cuttable note and obstacle totals, known once the host has loaded beatmap data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct BeatmapCounts {
    pub notes_count: u32,
    pub obstacles_count: u32,
}

/// Everything the host reports when a game scene becomes active.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GameplaySession {
    pub level: LevelInfo,
    #[serde(default)]
    pub beatmap: BeatmapInfo,
    #[serde(default)]
    pub modifiers: GameplayModifiers,
    #[serde(default)]
    pub player_settings: PlayerSettings,
    #[serde(default)]
    pub practice_settings: Option<PracticeSettings>,
    #[serde(default)]
    pub is_isolated_level: bool,
    #[serde(default)]
    pub beatmap_counts: Option<BeatmapCounts>,
}

impl GameplaySession {
    pub fn is_practice_mode(&self) -> bool {
        self.practice_settings.is_some() && !self.is_isolated_level
    }

    /// Characteristic name, suffixed with the practice speed when practicing.
    pub fn game_mode_text(&self) -> String {
        let characteristic = self.beatmap.characteristic.as_str();
        match self.practice_settings.as_ref() {
            Some(practice) if self.is_practice_mode() => {
                if practice.song_speed_mul != 1.0 {
                    format!(
                        "{characteristic} (Practice Mode:{}x)",
                        practice.song_speed_mul
                    )
                } else {
                    format!("{characteristic} (Practice Mode)")
                }
            }
            _ => characteristic.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Difficulty, EnabledObstacleType, EnergyType, GameplayModifiers, GameplaySession,
        NoteJumpDurationType, PlayerSettings, PracticeSettings,
    };

    #[test]
    fn test_default_modifiers_have_empty_summary() {
        let modifiers = GameplayModifiers::default();
        assert!(modifiers.is_without_modifiers());
        assert_eq!(modifiers.summary(), "");
    }

    #[test]
    fn test_no_fail_alone_is_not_listed() {
        let modifiers = GameplayModifiers {
            no_fail_on_0_energy: true,
            ..GameplayModifiers::default()
        };
        assert!(!modifiers.is_without_modifiers());
        assert_eq!(modifiers.summary(), "");
    }

    #[test]
    fn test_summary_lists_modifiers_in_order() {
        let modifiers = GameplayModifiers {
            energy_type: EnergyType::Battery,
            fast_notes: true,
            pro_mode: true,
            enabled_obstacle_type: EnabledObstacleType::FullHeightOnly,
            song_speed_mul: 1.2,
            ..GameplayModifiers::default()
        };
        assert_eq!(
            modifiers.summary(),
            "Battery Energy, No Walls(FullHeightOnly), Fast Notes, Pro Mode, Speed 1.2x"
        );
    }

    #[test]
    fn test_summary_no_walls() {
        let modifiers = GameplayModifiers {
            enabled_obstacle_type: EnabledObstacleType::NoObstacles,
            ..GameplayModifiers::default()
        };
        assert_eq!(modifiers.summary(), "No Walls");
    }

    #[test]
    fn test_dynamic_offset_presets() {
        let expected = [
            (-0.5, "Close"),
            (-0.25, "Closer"),
            (0.0, "Default"),
            (0.25, "Further"),
            (0.5, "Far"),
        ];
        for (offset, name) in expected {
            let settings = PlayerSettings {
                note_jump_start_beat_offset: offset,
                ..PlayerSettings::default()
            };
            assert_eq!(settings.note_jump_offset_text(), name);
        }
    }

    #[test]
    fn test_unknown_dynamic_offset_renders_raw_value() {
        let settings = PlayerSettings {
            note_jump_start_beat_offset: 0.75,
            ..PlayerSettings::default()
        };
        assert_eq!(settings.note_jump_offset_text(), "0.75");

        let settings = PlayerSettings {
            note_jump_start_beat_offset: -1.0,
            ..PlayerSettings::default()
        };
        assert_eq!(settings.note_jump_offset_text(), "-1");
    }

    #[test]
    fn test_static_offset_uses_fixed_duration() {
        let settings = PlayerSettings {
            note_jump_duration_type: NoteJumpDurationType::Static,
            note_jump_fixed_duration: 0.6,
            ..PlayerSettings::default()
        };
        assert_eq!(settings.note_jump_offset_text(), "0.6s (Static)");
    }

    #[test]
    fn test_game_mode_text_practice_variants() {
        let mut session = GameplaySession::default();
        assert_eq!(session.game_mode_text(), "Standard");

        session.practice_settings = Some(PracticeSettings {
            song_speed_mul: 1.0,
        });
        assert_eq!(session.game_mode_text(), "Standard (Practice Mode)");

        session.practice_settings = Some(PracticeSettings {
            song_speed_mul: 0.85,
        });
        assert_eq!(session.game_mode_text(), "Standard (Practice Mode:0.85x)");

        session.is_isolated_level = true;
        assert_eq!(session.game_mode_text(), "Standard");
    }

    #[test]
    fn test_difficulty_display_names() {
        assert_eq!(Difficulty::ExpertPlus.display_name(), "Expert+");
        assert_eq!(Difficulty::Hard.display_name(), "Hard");
    }

    #[test]
    fn test_session_deserializes_with_defaults() {
        let session: GameplaySession = serde_json::from_str(
            r#"{"level":{"level_id":"custom_level_abc123","song_name":"Song"},
                "beatmap":{"difficulty":"expert_plus"}}"#,
        )
        .expect("session should parse");
        assert_eq!(session.level.song_name, "Song");
        assert_eq!(session.beatmap.difficulty, Difficulty::ExpertPlus);
        assert_eq!(session.beatmap.characteristic, "Standard");
        assert!(session.modifiers.is_without_modifiers());
        assert!(session.beatmap_counts.is_none());
    }
}
