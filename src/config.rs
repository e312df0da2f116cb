/// Session settings and small on-disk state.
///
/// Settings are read from a RON file; every field is optional and falls back
/// to its default:
///
/// ```ron
/// (
///     fps: 60,
///     round_seconds: 60,
///     ruleset: Extended,
///     archetype: Power,
/// )
/// ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entities::{Archetype, Ruleset};
use crate::error::ConfigError;

pub const CONFIG_ENV_VAR: &str = "ARCADE_BRAWL_CONFIG";
const CONFIG_FILE: &str = ".arcade_brawl.ron";
const HIGH_SCORE_FILE: &str = ".arcade_brawl_dodge_score";
const LOG_FILE: &str = ".arcade_brawl.log";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation frames per second; also one round-clock second.
    pub fps: u32,
    pub round_seconds: u32,
    pub stage_count: u32,
    /// Frozen frames before each round (stage banner).
    pub pre_round_frames: u32,
    /// Frames between a won round and the next stage.
    pub stage_advance_frames: u32,
    pub ruleset: Ruleset,
    pub archetype: Archetype,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fps: 60,
            round_seconds: 60,
            stage_count: 5,
            pre_round_frames: 60,
            stage_advance_frames: 120,
            ruleset: Ruleset::Extended,
            archetype: Archetype::Balance,
        }
    }
}

impl GameConfig {
    /// Parse a config file.  A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(GameConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: GameConfig = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load from the default location, logging and falling back to defaults
    /// on any error.
    pub fn load_or_default() -> Self {
        let path = config_path();
        match GameConfig::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                GameConfig::default()
            }
        }
    }

    /// Clamp values that would stall the simulation.
    fn sanitized(mut self) -> Self {
        self.fps = self.fps.max(1);
        self.round_seconds = self.round_seconds.max(1);
        self.stage_count = self.stage_count.max(1);
        self
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(CONFIG_FILE))
}

pub fn log_path() -> PathBuf {
    home_dir().join(LOG_FILE)
}

// ── High-score persistence ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreFile { path: path.into() }
    }

    pub fn in_home() -> Self {
        HighScoreFile::new(home_dir().join(HIGH_SCORE_FILE))
    }

    /// Unreadable or garbled files count as no high score.
    pub fn load(&self) -> u32 {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) {
        if let Err(e) = std::fs::write(&self.path, score.to_string()) {
            warn!(path = %self.path.display(), error = %e, "could not save high score");
        }
    }
}
