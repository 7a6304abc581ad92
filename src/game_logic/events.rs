use bevy::prelude::*;

/// Game-rule outcomes of a tick, for the presentation layer to react to
/// (banners, sounds, the pause after a win or loss).
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceEvent {
    LevelStarted { level: u32 },
    /// The player hit the track border and was pushed back
    PlayerBounced,
    /// The player crossed the finish line; `level` is the level now waiting to start
    FinishCrossedCorrectly { level: u32 },
    /// The player touched the finish line from the wrong edge and was pushed back
    FinishCrossedWrong,
    /// The computer car got to the finish first and the session was reset
    ComputerReachedFinish,
    /// Every level was cleared and the session was reset
    GameFinished,
}

impl RaceEvent {
    /// Whether the event ends the current session
    pub fn ends_session(&self) -> bool {
        matches!(self, RaceEvent::ComputerReachedFinish | RaceEvent::GameFinished)
    }
}
