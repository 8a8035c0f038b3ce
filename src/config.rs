//! Application-level configuration loading, including the global-challenge
//! seed set installed on first read.

use std::{
    env, fs,
    io::ErrorKind,
    path::PathBuf,
    time::{Duration, SystemTime},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::models::{ChallengeEntity, Difficulty};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CHALLENGE_ARENA_CONFIG_PATH";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    seeds: Vec<SeedChallenge>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in default seed set.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        count = config.seeds.len(),
                        "loaded global challenge seed set from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Materialize the seed set as challenge entities, with deadlines
    /// computed relative to now.
    pub fn seed_challenges(&self) -> Vec<ChallengeEntity> {
        let now = SystemTime::now();
        self.seeds
            .iter()
            .map(|seed| ChallengeEntity {
                id: seed.id.clone(),
                title: seed.title.clone(),
                description: seed.description.clone(),
                difficulty: seed.difficulty,
                stars: seed.stars,
                deadline: now + Duration::from_secs(seed.deadline_days * SECONDS_PER_DAY),
                created_by: None,
                is_ai: false,
                is_global: true,
                created_at: now,
                participants_count: seed.participants_count,
                completed_count: seed.completed_count,
            })
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
        }
    }
}

/// One global challenge entry of the seed set. The deadline is stored as a
/// day offset so the installed challenges always lie in the future.
#[derive(Debug, Clone, Deserialize)]
struct SeedChallenge {
    id: String,
    title: String,
    description: String,
    difficulty: Difficulty,
    stars: u32,
    deadline_days: u64,
    #[serde(default)]
    participants_count: u64,
    #[serde(default)]
    completed_count: u64,
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    global_challenges: Vec<SeedChallenge>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            seeds: value.global_challenges,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in seed set shipped with the binary.
fn default_seeds() -> Vec<SeedChallenge> {
    vec![
        SeedChallenge {
            id: "g1".into(),
            title: "30-Day Fitness Challenge".into(),
            description: "Exercise for at least 30 minutes every day for a month".into(),
            difficulty: Difficulty::Hard,
            stars: 10,
            deadline_days: 30,
            participants_count: 1247,
            completed_count: 523,
        },
        SeedChallenge {
            id: "g2".into(),
            title: "Read 5 Books This Month".into(),
            description: "Finish reading 5 books of any genre by end of month".into(),
            difficulty: Difficulty::Medium,
            stars: 7,
            deadline_days: 20,
            participants_count: 892,
            completed_count: 234,
        },
        SeedChallenge {
            id: "g3".into(),
            title: "Zero Waste Week".into(),
            description: "Produce no waste for 7 consecutive days".into(),
            difficulty: Difficulty::Extreme,
            stars: 15,
            deadline_days: 10,
            participants_count: 456,
            completed_count: 89,
        },
        SeedChallenge {
            id: "g4".into(),
            title: "Learn a New Language".into(),
            description: "Study a new language for 20 minutes daily for 2 weeks".into(),
            difficulty: Difficulty::Medium,
            stars: 6,
            deadline_days: 14,
            participants_count: 2103,
            completed_count: 876,
        },
        SeedChallenge {
            id: "g5".into(),
            title: "Cold Shower Challenge".into(),
            description: "Take cold showers every day for a week".into(),
            difficulty: Difficulty::Easy,
            stars: 4,
            deadline_days: 7,
            participants_count: 3421,
            completed_count: 1876,
        },
    ]
}
