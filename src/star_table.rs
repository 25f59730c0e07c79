//! Star-rating side table read from a user-maintained CSV file.
//!
//! Rows are `<id>,<difficulty>,<rating>` without a header. The id column holds
//! the custom level hash without the `custom_level_` prefix the host uses.

use std::path::PathBuf;

use log::{debug, warn};

pub const CUSTOM_LEVEL_PREFIX: &str = "custom_level_";
/// Returned whenever no rating is known.
pub const STAR_FALLBACK: &str = "-";

#[derive(Debug, Clone)]
pub struct StarTable {
    path: PathBuf,
}

impl StarTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Rating for a level id and difficulty name, or [`STAR_FALLBACK`].
    ///
    /// The file is re-read on every call so edits apply to the next song.
    pub fn lookup(&self, level_id: &str, difficulty: &str) -> String {
        if !self.path.exists() {
            warn!("StarTable: file not found: {}", self.path.display());
            return STAR_FALLBACK.to_string();
        }

        match self.find_rating(level_id, difficulty) {
            Ok(Some(rating)) => rating,
            Ok(None) => {
                debug!(
                    "StarTable: no rating for level_id={} difficulty={}",
                    level_id, difficulty
                );
                STAR_FALLBACK.to_string()
            }
            Err(err) => {
                warn!(
                    "StarTable: failed to read {}: {}",
                    self.path.display(),
                    err
                );
                STAR_FALLBACK.to_string()
            }
        }
    }

    fn find_rating(&self, level_id: &str, difficulty: &str) -> Result<Option<String>, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| err.to_string())?;

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    debug!("StarTable: skipping unreadable row: {}", err);
                    continue;
                }
            };
            if record.len() < 3 {
                continue;
            }
            let (Some(id), Some(row_difficulty), Some(rating)) =
                (record.get(0), record.get(1), record.get(2))
            else {
                continue;
            };
            if matches_level_id(id, level_id) && row_difficulty == difficulty {
                return Ok(Some(rating.to_string()));
            }
        }
        Ok(None)
    }
}

fn matches_level_id(row_id: &str, level_id: &str) -> bool {
    level_id
        .strip_prefix(CUSTOM_LEVEL_PREFIX)
        .is_some_and(|hash| hash == row_id)
}
