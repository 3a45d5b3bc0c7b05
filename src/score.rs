//! Session scoring and high-score persistence.
//!
//! The session score is a plain monotonic counter: +1 per gameplay tick plus
//! the touchdown bonus applied by the landing evaluator.  The all-time high
//! score is a single scalar read once at startup and written back at process
//! exit only when beaten.
//!
//! Storage goes through the [`HighScoreStore`] trait injected as a boxed
//! resource, so the state machine never touches the filesystem and tests run
//! against an in-memory stand-in.  The production store is a tiny TOML file
//! under `saves/`.

use std::fs;
use std::path::PathBuf;

use bevy::app::AppExit;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

// ── Resources ─────────────────────────────────────────────────────────────────

/// Score accumulated during the current session.  Zeroed on every reset.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SessionScore(pub u32);

/// Best score ever recorded, loaded once at startup.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HighScore(pub u32);

/// The injected persistence backend.
#[derive(Resource)]
pub struct ScoreStore(pub Box<dyn HighScoreStore>);

// ── Store trait ───────────────────────────────────────────────────────────────

/// Minimal persistence capability for the single high-score scalar.
///
/// `load` is infallible by contract: any read problem (missing file, bad
/// contents) means "no prior high score" and yields 0.  `save` is
/// best-effort; callers log failures and move on.
pub trait HighScoreStore: Send + Sync {
    fn load(&self) -> u32;
    fn save(&self, best: u32) -> GameResult<()>;
}

/// On-disk TOML representation: a single `best` field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
struct HighScoreFile {
    best: u32,
}

/// File-backed store writing `saves/high_score.toml`.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(PathBuf::from("saves").join("high_score.toml"))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| toml::from_str::<HighScoreFile>(&contents).ok())
            .map(|file| file.best)
            .unwrap_or(0)
    }

    fn save(&self, best: u32) -> GameResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| GameError::ScoreStoreWrite {
                path: self.path.display().to_string(),
                reason: format!("failed to create save dir: {err}"),
            })?;
        }

        let serialized =
            toml::to_string_pretty(&HighScoreFile { best }).map_err(|err| {
                GameError::ScoreStoreWrite {
                    path: self.path.display().to_string(),
                    reason: format!("failed to serialize: {err}"),
                }
            })?;

        fs::write(&self.path, serialized).map_err(|err| GameError::ScoreStoreWrite {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Startup: populate [`HighScore`] from the injected store.
pub fn load_high_score_system(store: Res<ScoreStore>, mut high: ResMut<HighScore>) {
    high.0 = store.0.load();
    info!("High score loaded: {}", high.0);
}

/// +1 survival point per gameplay tick, including the tick that resolves the
/// session (it runs after the evaluator in the same fixed step).
pub fn survival_score_system(mut score: ResMut<SessionScore>) {
    score.0 += 1;
}

/// Runs in `Last` every frame; on the frame that carries an [`AppExit`]
/// message it persists the session score if it beat the loaded high score.
/// Write failures are logged and swallowed — losing a high-score update is
/// not worth a non-zero exit.
pub fn persist_high_score_on_exit_system(
    mut exits: MessageReader<AppExit>,
    score: Res<SessionScore>,
    high: Res<HighScore>,
    store: Res<ScoreStore>,
) {
    if exits.is_empty() {
        return;
    }
    exits.clear();

    if score.0 <= high.0 {
        return;
    }

    match store.0.save(score.0) {
        Ok(()) => info!("New high score saved: {}", score.0),
        Err(err) => error!("{err}"),
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers score resources, the startup load, and the exit-time persistence
/// hook.  The per-tick survival increment is scheduled by the simulation
/// plugin so it shares the gameplay pipeline's ordering and run conditions.
pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionScore>()
            .init_resource::<HighScore>()
            .add_systems(Startup, load_high_score_system)
            .add_systems(Last, persist_high_score_on_exit_system);
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
