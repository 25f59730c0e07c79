//! Maps a gameplay session to the ordered keyword values used by a render.

use crate::{session::GameplaySession, star_table::StarTable, text_template};

/// Placeholder names understood by status templates, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKeyword {
    SongName,
    SongSubName,
    AuthorName,
    LevelAuthorName,
    GameMode,
    Difficulty,
    Star,
    IsNoFail,
    Modifiers,
    BeatsPerMinute,
    NoteJumpSpeed,
    NotesCount,
    ObstaclesCount,
    NoteJumpStartBeatOffset,
}

impl StatusKeyword {
    pub const ALL: [StatusKeyword; 14] = [
        Self::SongName,
        Self::SongSubName,
        Self::AuthorName,
        Self::LevelAuthorName,
        Self::GameMode,
        Self::Difficulty,
        Self::Star,
        Self::IsNoFail,
        Self::Modifiers,
        Self::BeatsPerMinute,
        Self::NoteJumpSpeed,
        Self::NotesCount,
        Self::ObstaclesCount,
        Self::NoteJumpStartBeatOffset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SongName => "songName",
            Self::SongSubName => "songSubName",
            Self::AuthorName => "authorName",
            Self::LevelAuthorName => "levelAuthorName",
            Self::GameMode => "gamemode",
            Self::Difficulty => "difficulty",
            Self::Star => "star",
            Self::IsNoFail => "isNoFail",
            Self::Modifiers => "modifiers",
            Self::BeatsPerMinute => "beatsPerMinute",
            Self::NoteJumpSpeed => "noteJumpSpeed",
            Self::NotesCount => "notesCount",
            Self::ObstaclesCount => "obstaclesCount",
            Self::NoteJumpStartBeatOffset => "noteJumpStartBeatOffset",
        }
    }
}

impl AsRef<str> for StatusKeyword {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

fn value_for(
    keyword: StatusKeyword,
    session: &GameplaySession,
    template: &str,
    star_table: &StarTable,
) -> String {
    let level = &session.level;
    match keyword {
        StatusKeyword::SongName => level.song_name.clone(),
        StatusKeyword::SongSubName => level.song_sub_name.clone(),
        StatusKeyword::AuthorName => level.song_author_name.clone(),
        StatusKeyword::LevelAuthorName => level.level_author_name.clone(),
        StatusKeyword::GameMode => session.game_mode_text(),
        StatusKeyword::Difficulty => session.beatmap.difficulty.display_name().to_string(),
        StatusKeyword::Star => {
            // The table is only read when the template asks for it.
            if text_template::template_references(template, keyword.name()) {
                star_table.lookup(&level.level_id, session.beatmap.difficulty.display_name())
            } else {
                String::new()
            }
        }
        StatusKeyword::IsNoFail => {
            if session.modifiers.no_fail_on_0_energy {
                "No Fail".to_string()
            } else {
                String::new()
            }
        }
        StatusKeyword::Modifiers => session.modifiers.summary(),
        StatusKeyword::BeatsPerMinute => level.beats_per_minute.to_string(),
        StatusKeyword::NoteJumpSpeed => session.beatmap.note_jump_movement_speed.to_string(),
        StatusKeyword::NotesCount => session
            .beatmap_counts
            .map(|counts| counts.notes_count.to_string())
            .unwrap_or_default(),
        StatusKeyword::ObstaclesCount => session
            .beatmap_counts
            .map(|counts| counts.obstacles_count.to_string())
            .unwrap_or_default(),
        StatusKeyword::NoteJumpStartBeatOffset => session.player_settings.note_jump_offset_text(),
    }
}

/// Keyword values for `session` in [`StatusKeyword::ALL`] order.
pub fn status_keywords(
    session: &GameplaySession,
    template: &str,
    star_table: &StarTable,
) -> Vec<(StatusKeyword, String)> {
    StatusKeyword::ALL
        .iter()
        .map(|keyword| (*keyword, value_for(*keyword, session, template, star_table)))
        .collect()
}

/// Renders `template` with the values of `session`.
pub fn render_status(session: &GameplaySession, template: &str, star_table: &StarTable) -> String {
    let keywords = status_keywords(session, template, star_table);
    text_template::render_template(template, &keywords)
}
