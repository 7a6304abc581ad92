use crate::game_logic::{InputIntents, KinematicBody, LEVELS, RaceEvent};
use bevy::prelude::*;
use std::time::Duration;

/// Level bookkeeping for one game session.
///
/// A level is either waiting for the first input (`started == false`) or
/// running since `level_start`. Timestamps are whatever clock the caller
/// feeds in; the plugin uses the fixed-step `Time`.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct RaceState {
    pub level: u32,
    pub levels: u32,
    pub started: bool,
    pub level_start: Option<Duration>,
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new(LEVELS)
    }
}

impl RaceState {
    pub fn new(levels: u32) -> Self {
        Self {
            level: 1,
            levels,
            started: false,
            level_start: None,
        }
    }

    pub fn next_level(&mut self) {
        self.level += 1;
        self.started = false;
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.started = false;
        self.level_start = None;
    }

    pub fn game_finished(&self) -> bool {
        self.level > self.levels
    }

    pub fn start_level(&mut self, now: Duration) {
        self.started = true;
        self.level_start = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.started
    }

    /// Seconds spent on the current level, 0 until it has started
    pub fn elapsed_time(&self, now: Duration) -> f32 {
        if !self.started {
            return 0.0;
        }
        self.level_start
            .map(|start| now.saturating_sub(start).as_secs_f32())
            .unwrap_or(0.0)
    }
}

/// Run condition for the movement and collision systems
pub fn race_running(race: Res<RaceState>) -> bool {
    race.is_running()
}

// a waiting level starts on the first tick with any input held
pub fn start_level_on_input(
    input: Res<InputIntents>,
    time: Res<Time>,
    mut race: ResMut<RaceState>,
    mut events: EventWriter<RaceEvent>,
) {
    if race.started || race.game_finished() || !input.any() {
        return;
    }

    race.start_level(time.elapsed());
    info!("Level {} started", race.level);
    events.write(RaceEvent::LevelStarted { level: race.level });
}

/// The three figures shown on the in-game HUD
#[derive(Clone, Debug, PartialEq)]
pub struct HudStatus {
    pub level: u32,
    pub level_time: f32,
    pub velocity: f32,
}

impl HudStatus {
    /// Snapshot rounded to one decimal, the way it is displayed
    pub fn capture(race: &RaceState, player: &KinematicBody, now: Duration) -> Self {
        Self {
            level: race.level,
            level_time: round_tenth(race.elapsed_time(now)),
            velocity: round_tenth(player.velocity),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Level {}", self.level),
            format!("Time - {:.1}sec", self.level_time),
            format!("Velocity- {:.1}px/sec", self.velocity),
        ]
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
